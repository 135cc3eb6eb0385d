//! Where each model of the village goes.
//!
//! A [`Placement`] is consumed exactly once by the loader. Several placements
//! may point at the same file; each becomes its own entity.

use std::f32::consts::{FRAC_PI_2, PI};

use cgmath::Vector3;

use crate::{config::DriftConfig, data_structures::scene_graph::Shadows};

/// What happens to a placement's entity after it lands in the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlacementRole {
    Static,
    /// The entity the sun orbits.
    Anchor,
    /// Moves along +x and wraps from `bound` to `-bound`.
    Drifting { bound: f32, step: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    pub asset_path: String,
    pub name: String,
    pub position: Vector3<f32>,
    pub scale: Vector3<f32>,
    /// Euler angles in radians.
    pub rotation: Vector3<f32>,
    pub shadows: Shadows,
    pub role: PlacementRole,
}

impl Placement {
    pub fn new(
        asset_path: impl Into<String>,
        name: impl Into<String>,
        position: [f32; 3],
        scale: [f32; 3],
    ) -> Self {
        Self {
            asset_path: asset_path.into(),
            name: name.into(),
            position: position.into(),
            scale: scale.into(),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            shadows: Shadows::NONE,
            role: PlacementRole::Static,
        }
    }

    pub fn rotated(mut self, rotation: [f32; 3]) -> Self {
        self.rotation = rotation.into();
        self
    }

    pub fn with_shadows(mut self, shadows: Shadows) -> Self {
        self.shadows = shadows;
        self
    }

    pub fn with_role(mut self, role: PlacementRole) -> Self {
        self.role = role;
        self
    }
}

/// One row of a grouped manifest: many placements of the same file.
#[derive(Clone, Copy, Debug)]
pub struct GroupEntry {
    pub position: [f32; 3],
    pub scale: [f32; 3],
    pub rotation: [f32; 3],
}

const fn entry(position: [f32; 3], scale: [f32; 3]) -> GroupEntry {
    GroupEntry {
        position,
        scale,
        rotation: [0.0; 3],
    }
}

#[derive(Clone, Debug, Default)]
pub struct AssetManifest {
    placements: Vec<Placement>,
}

impl AssetManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, placement: Placement) -> &mut Self {
        self.placements.push(placement);
        self
    }

    /// Adds one placement per entry, named `<prefix>_<n>` counting from 1.
    pub fn push_group(
        &mut self,
        asset_path: &str,
        prefix: &str,
        entries: &[GroupEntry],
        shape: impl Fn(Placement) -> Placement,
    ) -> &mut Self {
        for (index, row) in entries.iter().enumerate() {
            let placement = Placement::new(
                asset_path,
                format!("{}_{}", prefix, index + 1),
                row.position,
                row.scale,
            )
            .rotated(row.rotation);
            self.placements.push(shape(placement));
        }
        self
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

impl IntoIterator for AssetManifest {
    type Item = Placement;
    type IntoIter = std::vec::IntoIter<Placement>;

    fn into_iter(self) -> Self::IntoIter {
        self.placements.into_iter()
    }
}

impl FromIterator<Placement> for AssetManifest {
    fn from_iter<T: IntoIterator<Item = Placement>>(iter: T) -> Self {
        Self {
            placements: iter.into_iter().collect(),
        }
    }
}

const MAPLE_TREES: [GroupEntry; 11] = [
    entry([-3.0, 0.001, -11.5], [11.0, 11.0, 11.0]),
    entry([-3.0, 0.001, -17.5], [11.0, 11.0, 11.0]),
    entry([-3.0, 0.001, -23.5], [9.0, 9.0, 9.0]),
    entry([-32.0, 0.001, -23.5], [9.0, 9.0, 9.0]),
    entry([-32.0, 0.001, -17.5], [9.0, 9.0, 9.0]),
    entry([-32.0, 0.001, -11.5], [9.0, 9.0, 9.0]),
    entry([6.1, 0.003, 23.5], [9.0, 9.0, 9.0]),
    entry([6.1, 0.003, 17.5], [9.0, 9.0, 9.0]),
    entry([10.0, 0.001, -11.5], [6.0, 6.0, 6.0]),
    entry([10.0, 0.001, -17.5], [6.0, 6.0, 6.0]),
    entry([10.0, 0.001, -23.5], [9.0, 9.0, 9.0]),
];

const HUTS: [GroupEntry; 4] = [
    entry([-16.0, 0.0, 0.0], [1.5, 1.9, 1.5]),
    entry([-20.0, 0.0, 0.0], [1.5, 1.9, 1.5]),
    entry([-12.0, 0.0, 0.0], [1.5, 1.9, 1.5]),
    entry([32.0, 0.0, 15.0], [1.5, 1.9, 1.5]),
];

const PROPS: [GroupEntry; 2] = [
    entry([-4.3, 0.0, -3.0], [1.5, 1.5, 1.5]),
    GroupEntry {
        position: [2.8, 0.0, -27.0],
        scale: [1.5, 1.5, 1.5],
        rotation: [0.0, FRAC_PI_2, 0.0],
    },
];

const CLOUDS: [GroupEntry; 3] = [
    GroupEntry {
        position: [0.0, 35.0, 0.0],
        scale: [2.5, 1.5, 2.5],
        rotation: [0.0, -PI, 0.0],
    },
    GroupEntry {
        position: [5.0, 35.0, 2.0],
        scale: [2.5, 1.5, 2.5],
        rotation: [0.0, -PI, 0.0],
    },
    GroupEntry {
        position: [5.0, 35.0, 6.0],
        scale: [3.5, 1.5, 2.5],
        rotation: [0.0, -PI, 0.0],
    },
];

/// Every model of the demo village.
pub fn village(drift: &DriftConfig) -> AssetManifest {
    let mut manifest = AssetManifest::new();
    manifest
        .push(Placement::new(
            "model8/scene.gltf",
            "landmark_1",
            [19.5, 1.8, 25.0],
            [1.5, 1.5, 1.5],
        ))
        .push(
            Placement::new(
                "model1/scene.gltf",
                "building",
                [-23.9, -0.2, -9.8],
                [0.38, 0.36, 0.5],
            )
            .with_shadows(Shadows::BOTH)
            .with_role(PlacementRole::Anchor),
        )
        .push_group("model2/scene.gltf", "maple_tree", &MAPLE_TREES, |p| p)
        .push_group("model3/scene.gltf", "hut", &HUTS, |p| p)
        .push_group("model4/scene.gltf", "prop", &PROPS, |p| p)
        .push(
            Placement::new(
                "model5/scene.gltf",
                "cart",
                [28.9, 0.8, -5.0],
                [0.0048, 0.008, 0.006],
            )
            .rotated([0.0, FRAC_PI_2, 0.0]),
        )
        .push(
            Placement::new(
                "model8/scene.gltf",
                "landmark_2",
                [-12.5, 1.8, 20.5],
                [2.2, 1.5, 1.5],
            )
            .rotated([0.0, -PI, 0.0]),
        )
        .push_group("model9/scene.gltf", "cloud", &CLOUDS, |p| {
            p.with_role(PlacementRole::Drifting {
                bound: drift.bound,
                step: drift.step,
            })
        });
    manifest
}
