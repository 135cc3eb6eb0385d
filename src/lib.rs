//! village-viewer
//!
//! An interactive 3D village scene. A fixed set of glTF models is loaded
//! asynchronously and placed in a shared scene next to a procedurally built
//! cottage whose surfaces can be re-textured with a click. The camera orbits
//! the village under keyboard control, the sun circles the main building and
//! clouds drift across the sky. Runs natively and on the web.
//!
//! High-level modules
//! - `config`: tunables for the camera, lighting and drifting props
//! - `camera`: orbit camera controller, projection and uniforms
//! - `input`: key and mouse mapping to viewer commands
//! - `data_structures`: scene graph, transforms, materials and lights
//! - `resources`: asset sources and glTF parsing
//! - `loader`: asynchronous placement of models into the scene
//! - `manifest`: the list of models that make up the village
//! - `materials`: texture variants and per-surface rerolls
//! - `cottage`: the procedurally built cottage and the ground
//! - `animation`: per-frame animators (sun orbit, drifting clouds)
//! - `flow`: the event loop and the flow trait
//! - `render`: GPU presentation
//! - `village`: the scene flow tying it all together
//!

pub mod animation;
pub mod camera;
pub mod config;
pub mod context;
pub mod cottage;
pub mod data_structures;
pub mod flow;
pub mod input;
pub mod loader;
pub mod manifest;
pub mod materials;
pub mod render;
pub mod resources;
pub mod village;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath;
pub use winit::event::WindowEvent;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Entry point on the web.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn run_web() -> Result<(), wasm_bindgen::JsValue> {
    flow::run(village::default_flow).map_err(|e| wasm_bindgen::JsValue::from_str(&format!("{:#}", e)))
}
