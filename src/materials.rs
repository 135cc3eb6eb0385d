//! Random texture variants for the decorated surfaces of the cottage.
//!
//! Each surface owns a fixed, non-empty list of textures. A reroll draws one
//! of them uniformly at random and rebinds it on the surface's entity. Every
//! surface draws on its own: a full reroll is six independent trials, so the
//! walls and the door are not kept in matching tones.

use std::collections::BTreeMap;

use rand::Rng;
use thiserror::Error;

use crate::data_structures::{
    material::{Material, TextureRef},
    scene_graph::{EntityId, SceneGraph},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SurfaceId {
    Walls,
    Roof,
    Door,
    LeftWindow,
    RightWindow,
    Chimney,
}

impl SurfaceId {
    pub const ALL: [SurfaceId; 6] = [
        SurfaceId::Walls,
        SurfaceId::Roof,
        SurfaceId::Door,
        SurfaceId::LeftWindow,
        SurfaceId::RightWindow,
        SurfaceId::Chimney,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SurfaceId::Walls => "walls",
            SurfaceId::Roof => "roof",
            SurfaceId::Door => "door",
            SurfaceId::LeftWindow => "left_window",
            SurfaceId::RightWindow => "right_window",
            SurfaceId::Chimney => "chimney",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MaterialError {
    #[error("surface {0:?} needs at least one texture variant")]
    EmptyVariantSet(SurfaceId),
}

/// The textures one surface can show. Never empty.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceVariantSet {
    variants: Vec<TextureRef>,
}

impl SurfaceVariantSet {
    pub fn new(surface: SurfaceId, variants: Vec<TextureRef>) -> Result<Self, MaterialError> {
        if variants.is_empty() {
            return Err(MaterialError::EmptyVariantSet(surface));
        }
        Ok(Self { variants })
    }

    pub fn from_paths(surface: SurfaceId, paths: &[&str]) -> Result<Self, MaterialError> {
        Self::new(surface, paths.iter().map(|path| TextureRef::new(*path)).collect())
    }

    pub fn variants(&self) -> &[TextureRef] {
        &self.variants
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Uniform draw over the whole set.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &TextureRef {
        &self.variants[rng.random_range(0..self.variants.len())]
    }
}

#[derive(Debug, Default)]
pub struct MaterialVariationPool {
    sets: BTreeMap<SurfaceId, SurfaceVariantSet>,
    bindings: BTreeMap<SurfaceId, EntityId>,
}

impl MaterialVariationPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_set(&mut self, surface: SurfaceId, set: SurfaceVariantSet) {
        self.sets.insert(surface, set);
    }

    /// Ties `surface` to the entity whose material rerolls rebind.
    pub fn bind(&mut self, surface: SurfaceId, entity: EntityId) {
        self.bindings.insert(surface, entity);
    }

    pub fn set(&self, surface: SurfaceId) -> Option<&SurfaceVariantSet> {
        self.sets.get(&surface)
    }

    pub fn binding(&self, surface: SurfaceId) -> Option<EntityId> {
        self.bindings.get(&surface).copied()
    }

    /// Draws a variant for `surface` without touching the scene.
    pub fn pick<R: Rng + ?Sized>(&self, surface: SurfaceId, rng: &mut R) -> Option<&TextureRef> {
        self.sets.get(&surface).map(|set| set.pick(rng))
    }

    /// Draws a variant for `surface` and rebinds it on the bound entity,
    /// marking the material for refresh. Returns the drawn variant.
    pub fn reroll<R: Rng + ?Sized>(
        &self,
        surface: SurfaceId,
        scene: &mut SceneGraph,
        rng: &mut R,
    ) -> Option<TextureRef> {
        let texture = self.pick(surface, rng)?.clone();
        let Some(entity) = self
            .binding(surface)
            .and_then(|id| scene.get_mut(id))
        else {
            log::warn!("surface {} is not bound to an entity", surface.name());
            return Some(texture);
        };
        match entity.material.as_mut() {
            Some(material) => material.rebind(texture.clone()),
            None => entity.material = Some(Material::textured(texture.clone())),
        }
        Some(texture)
    }

    /// Rerolls every surface that has a variant set, each independently.
    pub fn reroll_all<R: Rng + ?Sized>(
        &self,
        scene: &mut SceneGraph,
        rng: &mut R,
    ) -> Vec<(SurfaceId, TextureRef)> {
        log::info!("Changing textures...");
        self.sets
            .keys()
            .filter_map(|&surface| {
                self.reroll(surface, scene, rng)
                    .map(|texture| (surface, texture))
            })
            .collect()
    }
}

/// The textures shipped with the demo cottage.
pub fn cottage_variants() -> Result<Vec<(SurfaceId, SurfaceVariantSet)>, MaterialError> {
    const WALLS: [&str; 5] = [
        "texture/wall-texture.jpg",
        "texture/wall-texture1.JPG",
        "texture/wall-texture2.jpg",
        "texture/wall-texture3.jpg",
        "texture/wall-texture4.jpg",
    ];
    const ROOF: [&str; 3] = [
        "texture/roof2.jpeg",
        "texture/roof.png",
        "texture/roof3.avif",
    ];
    const DOOR: [&str; 3] = [
        "texture/door_texture.jpg",
        "texture/door_texture1.jpg",
        "texture/door_texture2.jpg",
    ];
    const WINDOWS: [&str; 3] = [
        "texture/window-texture.jpeg",
        "texture/window-texture1.jpeg",
        "texture/window-texture2.jpeg",
    ];
    const CHIMNEY: [&str; 3] = [
        "texture/chimney-texture.avif",
        "texture/chimney.jpeg",
        "texture/chimneyy.jpg",
    ];

    SurfaceId::ALL
        .into_iter()
        .map(|surface| {
            let paths: &[&str] = match surface {
                SurfaceId::Walls => &WALLS,
                SurfaceId::Roof => &ROOF,
                SurfaceId::Door => &DOOR,
                SurfaceId::LeftWindow | SurfaceId::RightWindow => &WINDOWS,
                SurfaceId::Chimney => &CHIMNEY,
            };
            SurfaceVariantSet::from_paths(surface, paths).map(|set| (surface, set))
        })
        .collect()
}
