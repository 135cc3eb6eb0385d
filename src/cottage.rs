//! The hand-built cottage and the ground it stands on.
//!
//! Geometry is described with primitives only; the external engine turns
//! boxes, cones and planes into meshes. Each decorated part of the cottage
//! gets its own material so that rerolls can retexture parts independently.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use cgmath::Vector3;
use rand::Rng;

use crate::{
    data_structures::{
        material::{Material, TextureRef},
        scene_graph::{EntityDesc, EntityId, MeshSource, Primitive, SceneGraph, Shadows},
        transform::Transform,
    },
    materials::{MaterialError, MaterialVariationPool, SurfaceId, cottage_variants},
};

pub const COTTAGE: &str = "cottage";
pub const GROUND: &str = "ground";

fn part(surface: SurfaceId, primitive: Primitive, position: [f32; 3], yaw: f32) -> (SurfaceId, EntityDesc) {
    let desc = EntityDesc::mesh(surface.name(), MeshSource::Primitive(primitive)).with_transform(
        Transform::from_parts(
            position.into(),
            Vector3::new(0.0, yaw, 0.0),
            Vector3::new(1.0, 1.0, 1.0),
        ),
    );
    (surface, desc)
}

fn parts() -> [(SurfaceId, EntityDesc); 6] {
    let window = Primitive::Box {
        width: 2.0,
        height: 1.5,
        depth: 0.1,
    };
    [
        part(
            SurfaceId::Walls,
            Primitive::Box {
                width: 8.0,
                height: 5.0,
                depth: 6.0,
            },
            [0.0, 0.0, 0.0],
            0.0,
        ),
        part(
            SurfaceId::Roof,
            Primitive::Cone {
                radius: 6.0,
                height: 4.0,
                segments: 4,
            },
            [0.0, 4.5, 0.0],
            FRAC_PI_4,
        ),
        part(
            SurfaceId::Door,
            Primitive::Box {
                width: 2.0,
                height: 3.5,
                depth: 0.1,
            },
            [0.0, -0.8, 3.01],
            0.0,
        ),
        part(SurfaceId::LeftWindow, window.clone(), [-4.0, 1.0, 0.0], FRAC_PI_2),
        part(SurfaceId::RightWindow, window, [4.0, 1.0, 0.0], -FRAC_PI_2),
        part(
            SurfaceId::Chimney,
            Primitive::Box {
                width: 0.8,
                height: 2.5,
                depth: 0.8,
            },
            [-1.5, 6.0, -1.0],
            0.0,
        ),
    ]
}

/// Builds the cottage with a random initial texture on every surface,
/// registers its variant sets in `pool` and binds each surface to its entity.
pub fn build<R: Rng + ?Sized>(
    scene: &mut SceneGraph,
    pool: &mut MaterialVariationPool,
    rng: &mut R,
) -> Result<EntityId, MaterialError> {
    for (surface, set) in cottage_variants()? {
        pool.insert_set(surface, set);
    }

    let mut cottage = EntityDesc::group(COTTAGE).with_transform(Transform::from_parts(
        Vector3::new(6.0, 2.6, 32.0),
        Vector3::new(0.0, FRAC_PI_2, 0.0),
        Vector3::new(0.5, 0.8, 0.5),
    ));
    let mut surfaces = Vec::new();
    for (surface, desc) in parts() {
        let desc = match pool.pick(surface, rng) {
            Some(texture) => desc.with_material(Material::textured(texture.clone())),
            None => desc,
        };
        surfaces.push(surface);
        cottage = cottage.with_child(desc);
    }

    let id = scene.insert(cottage);
    let children = scene
        .get(id)
        .map(|entity| entity.children().to_vec())
        .unwrap_or_default();
    for (surface, child) in surfaces.into_iter().zip(children) {
        pool.bind(surface, child);
    }
    Ok(id)
}

/// The grass plane under the village.
pub fn ground() -> EntityDesc {
    let mut material = Material::textured(TextureRef::repeating("grass.jpg", 4.0, 4.0));
    material.tint = [0.0, 0xaa as f32 / 255.0, 0.0];
    EntityDesc::mesh(
        GROUND,
        MeshSource::Primitive(Primitive::Plane {
            width: 70.0,
            height: 70.0,
        }),
    )
    .with_transform(Transform::from_parts(
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(-FRAC_PI_2, 0.0, 0.0),
        Vector3::new(1.0, 1.0, 1.0),
    ))
    .with_material(material)
    .with_shadows(Shadows {
        cast: false,
        receive: true,
    })
}
