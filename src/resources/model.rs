//! glTF documents to entity descriptions.
//!
//! Only the node tree is read: names, local transforms, which nodes carry a
//! mesh and the base colour texture of that mesh. Vertex data stays in the
//! document for the external renderer.

use crate::{
    data_structures::{
        material::{Material, TextureRef},
        scene_graph::{EntityDesc, MeshSource},
        transform::Transform,
    },
    loader::LoadError,
};

/// The node trees of a model's scene, ready to be placed.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelAsset {
    pub nodes: Vec<EntityDesc>,
}

impl ModelAsset {
    pub fn node_count(&self) -> usize {
        self.nodes.iter().map(EntityDesc::node_count).sum()
    }
}

/// Parses a `.gltf` (JSON) or `.glb` document. `base_dir` is the document's
/// directory relative to the asset root; relative image URIs are joined onto
/// it so texture paths end up relative to the asset root as well.
pub fn parse_model(bytes: &[u8], base_dir: &str) -> Result<ModelAsset, LoadError> {
    let gltf = gltf::Gltf::from_slice(bytes)?;
    let scene = gltf
        .default_scene()
        .or_else(|| gltf.scenes().next())
        .ok_or(LoadError::EmptyScene)?;
    let nodes: Vec<EntityDesc> = scene
        .nodes()
        .map(|node| to_entity_desc(node, base_dir))
        .collect();
    if nodes.is_empty() {
        return Err(LoadError::EmptyScene);
    }
    Ok(ModelAsset { nodes })
}

fn to_entity_desc(node: gltf::Node, base_dir: &str) -> EntityDesc {
    let name = node
        .name()
        .map(str::to_string)
        .unwrap_or_else(|| format!("node_{}", node.index()));
    let mut desc = match node.mesh() {
        Some(mesh) => {
            let desc = EntityDesc::mesh(
                name,
                MeshSource::Asset {
                    mesh_index: mesh.index(),
                    primitives: mesh.primitives().count(),
                },
            );
            match base_colour_texture(&mesh, base_dir) {
                Some(texture) => desc.with_material(Material::textured(texture)),
                None => desc,
            }
        }
        None => EntityDesc::group(name),
    };
    let (translation, rotation, scale) = node.transform().decomposed();
    desc.transform = Transform {
        position: translation.into(),
        rotation: rotation.into(),
        scale: scale.into(),
    };
    desc.children = node
        .children()
        .map(|child| to_entity_desc(child, base_dir))
        .collect();
    desc
}

// TODO: embedded (buffer view) textures need a handle scheme before the
// renderer can refer to them; only URI textures are bound for now.
fn base_colour_texture(mesh: &gltf::Mesh, base_dir: &str) -> Option<TextureRef> {
    mesh.primitives().find_map(|primitive| {
        let info = primitive
            .material()
            .pbr_metallic_roughness()
            .base_color_texture()?;
        match info.texture().source().source() {
            gltf::image::Source::Uri { uri, .. } => {
                Some(TextureRef::new(resolve_uri(base_dir, uri)))
            }
            gltf::image::Source::View { .. } => None,
        }
    })
}

/// Directory part of an asset path, `""` for files at the asset root.
pub fn asset_dir(asset_path: &str) -> &str {
    asset_path
        .rsplit_once('/')
        .map(|(dir, _)| dir)
        .unwrap_or("")
}

/// Joins a URI found in a document onto the document's directory. Absolute
/// URLs, data URIs and root-relative paths are kept as they are.
pub fn resolve_uri(base_dir: &str, uri: &str) -> String {
    if base_dir.is_empty() || uri.starts_with('/') || uri.starts_with("data:") || uri.contains("://")
    {
        return uri.to_string();
    }
    let mut parts: Vec<&str> = base_dir.split('/').filter(|part| !part.is_empty()).collect();
    for part in uri.split('/') {
        match part {
            "" | "." => (),
            ".." => {
                parts.pop();
            }
            _ => parts.push(part),
        }
    }
    parts.join("/")
}
