use std::f32::consts::FRAC_PI_2;

use cgmath::Vector3;
use village_viewer::data_structures::{
    light::Lighting,
    material::{Material, TextureRef},
    scene_graph::{EntityDesc, MeshSource, Primitive, SceneGraph, Shadows},
    transform::Transform,
};

use crate::common::test_utils::assert_close;

mod common;

fn boxed(name: &str) -> EntityDesc {
    EntityDesc::mesh(
        name,
        MeshSource::Primitive(Primitive::Box {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
        }),
    )
}

#[test]
fn should_insert_trees_with_parent_links() {
    let mut scene = SceneGraph::new(Lighting::default());
    let root = scene.insert(
        EntityDesc::group("house")
            .with_child(boxed("wall"))
            .with_child(EntityDesc::group("upper").with_child(boxed("roof"))),
    );
    assert_eq!(scene.entity_count(), 1);
    assert_eq!(scene.node_count(), 4);

    let roof = scene.find_by_name("roof").unwrap();
    let upper = scene.find_by_name("upper").unwrap();
    assert_eq!(scene.get(roof).unwrap().parent(), Some(upper));
    assert_eq!(scene.get(upper).unwrap().parent(), Some(root));

    let names: Vec<_> = scene
        .subtree(root)
        .into_iter()
        .map(|id| scene.get(id).unwrap().name.clone())
        .collect();
    assert_eq!(names, vec!["house", "wall", "upper", "roof"]);
}

#[test]
fn should_apply_shadows_to_meshes_only() {
    let mut scene = SceneGraph::new(Lighting::default());
    let root = scene.insert(
        EntityDesc::group("building")
            .with_child(boxed("wall"))
            .with_child(EntityDesc::group("inner").with_child(boxed("beam"))),
    );
    scene.apply_shadows(root, Shadows::BOTH);

    for id in scene.subtree(root) {
        let entity = scene.get(id).unwrap();
        let expected = if entity.kind.is_mesh() {
            Shadows::BOTH
        } else {
            Shadows::NONE
        };
        assert_eq!(entity.shadows, expected, "{}", entity.name);
    }
}

#[test]
fn should_compose_world_transforms() {
    let mut scene = SceneGraph::new(Lighting::default());
    let parent = Transform::from_parts(
        Vector3::new(10.0, 0.0, 0.0),
        Vector3::new(0.0, FRAC_PI_2, 0.0),
        Vector3::new(2.0, 2.0, 2.0),
    );
    scene.insert(
        EntityDesc::group("parent")
            .with_transform(parent)
            .with_child(boxed("child").with_transform(Vector3::new(1.0, 0.0, 0.0).into())),
    );
    let child = scene.find_by_name("child").unwrap();
    let world = scene.world_transform(child).unwrap();

    // scaled to 2 along x, then a quarter turn about y sends +x to -z
    assert_close(world.position.x, 10.0, 1e-5);
    assert_close(world.position.y, 0.0, 1e-5);
    assert_close(world.position.z, -2.0, 1e-5);
    assert_eq!(world.scale, Vector3::new(2.0, 2.0, 2.0));
}

#[test]
fn should_set_the_anchor_once() {
    let mut scene = SceneGraph::new(Lighting::default());
    let first = scene.insert(EntityDesc::group("building"));
    let second = scene.insert(EntityDesc::group("other"));
    assert_eq!(scene.anchor(), None);
    assert!(scene.set_anchor(first));
    assert!(!scene.set_anchor(second));
    assert_eq!(scene.anchor(), Some(first));
}

#[test]
fn should_hand_out_dirty_materials_once() {
    let mut scene = SceneGraph::new(Lighting::default());
    let id = scene.insert(boxed("door").with_material(Material::textured(TextureRef::new("door.jpg"))));
    scene.insert(boxed("plain"));

    let dirty = scene.take_dirty_materials();
    assert_eq!(dirty.len(), 1);
    assert_eq!(dirty[0].0, id);
    assert!(scene.take_dirty_materials().is_empty());

    scene
        .get_mut(id)
        .unwrap()
        .material
        .as_mut()
        .unwrap()
        .rebind(TextureRef::new("door2.jpg"));
    let dirty = scene.take_dirty_materials();
    assert_eq!(dirty.len(), 1);
    assert_eq!(dirty[0].1.texture.as_ref().unwrap().path, "door2.jpg");
}
