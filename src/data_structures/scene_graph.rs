//! Scene graph and hierarchical scene organization.
//!
//! Every placed model, the hand-built cottage and the ground live here as
//! trees of [`Entity`] nodes stored in one arena. The scene only grows: loads
//! that complete insert a subtree, nothing is removed while the viewer runs.
//!
//! What an entity *is* is decided once, when it is described, through
//! [`EntityKind`]. Code that needs "every mesh below this node" matches on the
//! kind instead of probing entities at runtime.

use log::warn;

use crate::data_structures::{light::Lighting, material::Material, transform::Transform};

/// Handle to an entity in a [`SceneGraph`]. Only valid for the graph that
/// created it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(usize);

impl EntityId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Geometry the external engine builds on our behalf.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Box { width: f32, height: f32, depth: f32 },
    Cone { radius: f32, height: f32, segments: u32 },
    Plane { width: f32, height: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub enum MeshSource {
    /// Mesh `mesh_index` of the model document the entity was loaded from.
    Asset { mesh_index: usize, primitives: usize },
    Primitive(Primitive),
}

#[derive(Clone, Debug, PartialEq)]
pub enum EntityKind {
    Group,
    Mesh(MeshSource),
}

impl EntityKind {
    pub fn is_mesh(&self) -> bool {
        matches!(self, EntityKind::Mesh(_))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Shadows {
    pub cast: bool,
    pub receive: bool,
}

impl Shadows {
    pub const NONE: Shadows = Shadows {
        cast: false,
        receive: false,
    };
    pub const BOTH: Shadows = Shadows {
        cast: true,
        receive: true,
    };
}

/// Description of an entity tree that is not in a scene yet.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityDesc {
    pub name: String,
    pub kind: EntityKind,
    pub transform: Transform,
    pub shadows: Shadows,
    pub material: Option<Material>,
    pub children: Vec<EntityDesc>,
}

impl EntityDesc {
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntityKind::Group,
            transform: Transform::default(),
            shadows: Shadows::NONE,
            material: None,
            children: Vec::new(),
        }
    }

    pub fn mesh(name: impl Into<String>, source: MeshSource) -> Self {
        Self {
            kind: EntityKind::Mesh(source),
            ..Self::group(name)
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    pub fn with_shadows(mut self, shadows: Shadows) -> Self {
        self.shadows = shadows;
        self
    }

    pub fn with_child(mut self, child: EntityDesc) -> Self {
        self.children.push(child);
        self
    }

    /// Number of nodes in this tree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(EntityDesc::node_count)
            .sum::<usize>()
    }
}

#[derive(Clone, Debug)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub kind: EntityKind,
    pub transform: Transform,
    pub shadows: Shadows,
    pub material: Option<Material>,
    parent: Option<EntityId>,
    children: Vec<EntityId>,
}

impl Entity {
    pub fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    pub fn children(&self) -> &[EntityId] {
        &self.children
    }
}

/// Owner of every live entity plus the scene lighting.
#[derive(Debug, Default)]
pub struct SceneGraph {
    entities: Vec<Entity>,
    roots: Vec<EntityId>,
    anchor: Option<EntityId>,
    lighting: Lighting,
}

impl SceneGraph {
    pub fn new(lighting: Lighting) -> Self {
        Self {
            entities: Vec::new(),
            roots: Vec::new(),
            anchor: None,
            lighting,
        }
    }

    /// Inserts `desc` and its children as a new top-level entity.
    pub fn insert(&mut self, desc: EntityDesc) -> EntityId {
        let root = self.insert_node(desc, None);
        self.roots.push(root);
        root
    }

    fn insert_node(&mut self, desc: EntityDesc, parent: Option<EntityId>) -> EntityId {
        let id = EntityId(self.entities.len());
        self.entities.push(Entity {
            id,
            name: desc.name,
            kind: desc.kind,
            transform: desc.transform,
            shadows: desc.shadows,
            material: desc.material,
            parent,
            children: Vec::new(),
        });
        for child in desc.children {
            let child_id = self.insert_node(child, Some(id));
            self.entities[id.0].children.push(child_id);
        }
        id
    }

    /// Number of top-level entities (one per successful placement).
    pub fn entity_count(&self) -> usize {
        self.roots.len()
    }

    /// Number of entities at any depth.
    pub fn node_count(&self) -> usize {
        self.entities.len()
    }

    pub fn roots(&self) -> &[EntityId] {
        &self.roots
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.0)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id.0)
    }

    /// First entity (in insertion order) called `name`.
    pub fn find_by_name(&self, name: &str) -> Option<EntityId> {
        self.entities
            .iter()
            .find(|entity| entity.name == name)
            .map(|entity| entity.id)
    }

    /// `id` followed by all of its descendants, depth first.
    pub fn subtree(&self, id: EntityId) -> Vec<EntityId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(entity) = self.get(next) {
                out.push(next);
                stack.extend(entity.children.iter().rev().copied());
            }
        }
        out
    }

    /// Sets shadow participation on every mesh in the subtree of `id`. Groups
    /// are left alone.
    pub fn apply_shadows(&mut self, id: EntityId, shadows: Shadows) {
        for node in self.subtree(id) {
            let entity = &mut self.entities[node.0];
            if entity.kind.is_mesh() {
                entity.shadows = shadows;
            }
        }
    }

    pub fn world_transform(&self, id: EntityId) -> Option<Transform> {
        let entity = self.get(id)?;
        let local = entity.transform;
        match entity.parent {
            Some(parent) => self.world_transform(parent).map(|world| &world * &local),
            None => Some(local),
        }
    }

    pub fn anchor(&self) -> Option<EntityId> {
        self.anchor
    }

    /// Marks `id` as the entity the sun orbits. The anchor is set once; later
    /// calls are ignored and return `false`.
    pub fn set_anchor(&mut self, id: EntityId) -> bool {
        if let Some(current) = self.anchor {
            warn!(
                "anchor already set to {:?}, ignoring request to move it to {:?}",
                current, id
            );
            return false;
        }
        if self.get(id).is_none() {
            warn!("cannot anchor unknown entity {:?}", id);
            return false;
        }
        self.anchor = Some(id);
        true
    }

    pub fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    pub fn lighting_mut(&mut self) -> &mut Lighting {
        &mut self.lighting
    }

    /// Materials flagged for refresh, cleared as they are handed out.
    pub fn take_dirty_materials(&mut self) -> Vec<(EntityId, Material)> {
        self.entities
            .iter_mut()
            .filter_map(|entity| {
                let material = entity.material.as_mut()?;
                if !material.needs_update {
                    return None;
                }
                material.needs_update = false;
                Some((entity.id, material.clone()))
            })
            .collect()
    }
}
