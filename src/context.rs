//! Application context: everything a flow may read or mutate.
//!
//! The context is plain data. It owns the scene, the camera and the
//! projection, and is only touched from the event-loop thread, so none of it
//! is behind a lock. GPU objects live in the presenter instead.

use crate::{
    camera::{CameraController, Projection},
    config::ViewerConfig,
    data_structures::{light::Lighting, scene_graph::SceneGraph},
};

#[derive(Debug)]
pub struct Context {
    pub config: ViewerConfig,
    pub scene: SceneGraph,
    pub camera: CameraController,
    pub projection: Projection,
    pub clear_colour: wgpu::Color,
    viewport: (u32, u32),
}

impl Context {
    pub fn new(config: ViewerConfig, width: u32, height: u32) -> Self {
        let scene = SceneGraph::new(Lighting::from_config(&config.light));
        let camera = CameraController::new(&config.camera);
        let projection = Projection::from_config(width, height, &config.camera);
        let clear_colour = config.clear_colour;
        Self {
            config,
            scene,
            camera,
            projection,
            clear_colour,
            viewport: (width, height),
        }
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Tracks a new output size. The camera itself does not move.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.viewport = (width, height);
        self.projection.resize(width, height);
    }
}
