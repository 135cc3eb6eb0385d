//! Scene data: the entity tree and what hangs off it.
//!
//! - `scene_graph` holds the entity arena, the anchor and the lighting
//! - `transform` is position, rotation and scale of one entity
//! - `material` is a surface's texture binding and tint
//! - `light` holds the ambient light and the sun

pub mod light;
pub mod material;
pub mod scene_graph;
pub mod transform;
