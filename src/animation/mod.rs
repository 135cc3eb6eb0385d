//! Per-frame animators.
//!
//! Animators do not schedule themselves. They are registered once in an
//! [`AnimatorRegistry`] and polled together every frame, so all movement for a
//! frame is done before that frame is presented.

pub mod drift;
pub mod light_orbit;

use crate::data_structures::scene_graph::SceneGraph;

pub use drift::{DriftAnimator, DriftState};
pub use light_orbit::{LightOrbitAnimator, LightOrbitState};

pub trait Animator {
    /// Advances the animation by one frame.
    fn tick(&mut self, scene: &mut SceneGraph);

    fn name(&self) -> &str;
}

#[derive(Default)]
pub struct AnimatorRegistry {
    animators: Vec<Box<dyn Animator>>,
}

impl AnimatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, animator: Box<dyn Animator>) {
        log::debug!("starting animator {}", animator.name());
        self.animators.push(animator);
    }

    /// Polls every animator once, in registration order.
    pub fn tick(&mut self, scene: &mut SceneGraph) {
        for animator in self.animators.iter_mut() {
            animator.tick(scene);
        }
    }

    pub fn len(&self) -> usize {
        self.animators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animators.is_empty()
    }

    /// Stops every animator.
    pub fn clear(&mut self) {
        self.animators.clear();
    }
}

impl std::fmt::Debug for AnimatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.animators.iter().map(|animator| animator.name()))
            .finish()
    }
}
