use crate::{
    animation::Animator,
    data_structures::scene_graph::{EntityId, SceneGraph},
};

/// One drifting instance's x position and wrap rule.
///
/// The position is recomputed from the start of the current pass and the
/// number of steps taken, so rounding does not pile up over a pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriftState {
    position_x: f32,
    bound: f32,
    step: f32,
    origin: f32,
    ticks: u32,
}

impl DriftState {
    pub fn new(position_x: f32, bound: f32, step: f32) -> Self {
        Self {
            position_x,
            bound,
            step,
            origin: position_x,
            ticks: 0,
        }
    }

    pub fn position_x(&self) -> f32 {
        self.position_x
    }

    pub fn bound(&self) -> f32 {
        self.bound
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Moves one step along +x. Reaching `bound` snaps straight to `-bound`,
    /// so after every step `position_x < bound`.
    pub fn advance(&mut self) -> f32 {
        self.ticks += 1;
        let x = self.origin + self.ticks as f32 * self.step;
        // A step landing on the bound up to f32 rounding counts as reaching it.
        let tolerance = 4.0 * f32::EPSILON * self.bound.abs().max(1.0);
        if x >= self.bound - tolerance {
            self.position_x = -self.bound;
            self.origin = -self.bound;
            self.ticks = 0;
        } else {
            self.position_x = x;
        }
        self.position_x
    }
}

/// Slides one entity along x, wrapping at the bound.
#[derive(Debug)]
pub struct DriftAnimator {
    entity: EntityId,
    state: DriftState,
    name: String,
}

impl DriftAnimator {
    /// Starts from the entity's current x.
    pub fn new(scene: &SceneGraph, entity: EntityId, bound: f32, step: f32) -> Self {
        let (position_x, name) = scene
            .get(entity)
            .map(|e| (e.transform.position.x, format!("drift:{}", e.name)))
            .unwrap_or((0.0, format!("drift:{:?}", entity)));
        Self {
            entity,
            state: DriftState::new(position_x, bound, step),
            name,
        }
    }

    pub fn state(&self) -> &DriftState {
        &self.state
    }
}

impl Animator for DriftAnimator {
    fn tick(&mut self, scene: &mut SceneGraph) {
        let x = self.state.advance();
        if let Some(entity) = scene.get_mut(self.entity) {
            entity.transform.position.x = x;
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
