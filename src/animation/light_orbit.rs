use cgmath::Point3;

use crate::{
    animation::Animator, config::LightConfig, data_structures::scene_graph::SceneGraph,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightOrbitState {
    /// Grows without bound; only its sine and cosine matter.
    pub angle: f32,
    pub radius: f32,
}

/// Circles the sun around the anchor entity, aimed at it.
///
/// Nothing happens until the scene has an anchor. The anchor's position is
/// read every frame, so the orbit follows it if it ever moves.
#[derive(Debug)]
pub struct LightOrbitAnimator {
    state: LightOrbitState,
    angular_step: f32,
    height_offset: f32,
}

impl LightOrbitAnimator {
    pub fn new(config: &LightConfig) -> Self {
        Self {
            state: LightOrbitState {
                angle: config.initial_angle,
                radius: config.radius,
            },
            angular_step: config.angular_step,
            height_offset: config.height_offset,
        }
    }

    pub fn state(&self) -> &LightOrbitState {
        &self.state
    }
}

impl Animator for LightOrbitAnimator {
    fn tick(&mut self, scene: &mut SceneGraph) {
        let Some(anchor) = scene
            .anchor()
            .and_then(|id| scene.world_transform(id))
            .map(|transform| Point3::new(
                transform.position.x,
                transform.position.y,
                transform.position.z,
            ))
        else {
            return;
        };

        self.state.angle += self.angular_step;
        let (sin, cos) = self.state.angle.sin_cos();
        let sun = &mut scene.lighting_mut().sun;
        sun.position = Point3::new(
            anchor.x + self.state.radius * cos,
            anchor.y + self.height_offset,
            anchor.z + self.state.radius * sin,
        );
        sun.target = anchor;
    }

    fn name(&self) -> &str {
        "light_orbit"
    }
}
