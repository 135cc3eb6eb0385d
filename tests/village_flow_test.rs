use instant::Duration;
use village_viewer::{
    camera::CameraAction,
    config::{DriftConfig, ViewerConfig},
    cottage,
    flow::{GraphicsFlow, Out},
    input::Command,
    loader::AssetLoader,
    manifest::{self, AssetManifest, PlacementRole},
    materials::SurfaceId,
    village::VillageFlow,
    WindowEvent,
};
use winit::dpi::PhysicalSize;

use crate::common::test_utils::{MemorySource, init_and_load, seeded_rng, test_context};

mod common;

const VILLAGE_FILES: [&str; 7] = [
    "model1/scene.gltf",
    "model2/scene.gltf",
    "model3/scene.gltf",
    "model4/scene.gltf",
    "model5/scene.gltf",
    "model8/scene.gltf",
    "model9/scene.gltf",
];

fn village_source() -> MemorySource {
    VILLAGE_FILES
        .iter()
        .enumerate()
        .fold(MemorySource::new(), |source, (i, path)| {
            source.with_model(path).with_delay(path, (i * 2) as u64)
        })
}

#[test]
fn should_list_the_whole_village() {
    let manifest = manifest::village(&DriftConfig::default());
    assert_eq!(manifest.len(), 24);

    let count = |prefix: &str| {
        manifest
            .placements()
            .iter()
            .filter(|p| p.name.starts_with(prefix))
            .count()
    };
    assert_eq!(count("maple_tree_"), 11);
    assert_eq!(count("hut_"), 4);
    assert_eq!(count("prop_"), 2);
    assert_eq!(count("cloud_"), 3);

    let anchors: Vec<_> = manifest
        .placements()
        .iter()
        .filter(|p| p.role == PlacementRole::Anchor)
        .collect();
    assert_eq!(anchors.len(), 1);
    assert_eq!(anchors[0].name, "building");

    for cloud in manifest.placements().iter().filter(|p| p.name.starts_with("cloud_")) {
        assert_eq!(
            cloud.role,
            PlacementRole::Drifting {
                bound: 30.0,
                step: 0.3
            }
        );
    }
}

#[tokio::test]
async fn should_populate_the_village() {
    let mut ctx = test_context();
    let loader = AssetLoader::new(village_source());
    let mut flow = VillageFlow::new(loader, manifest::village(&ctx.config.drift), seeded_rng(2));
    init_and_load(&mut flow, &mut ctx).await;

    // ground, cottage and every placement
    assert_eq!(ctx.scene.entity_count(), 2 + 24);
    assert!(ctx.scene.find_by_name(cottage::GROUND).is_some());
    assert_eq!(flow.cottage(), ctx.scene.find_by_name(cottage::COTTAGE));

    let building = ctx.scene.find_by_name("building").unwrap();
    assert_eq!(ctx.scene.anchor(), Some(building));
    // the sun orbit and one drift per cloud
    assert_eq!(flow.animators().len(), 1 + 3);
}

#[tokio::test]
async fn should_keep_running_with_missing_models() {
    let mut ctx = test_context();
    // no building and no clouds
    let source = MemorySource::new()
        .with_model("model2/scene.gltf")
        .with_model("model8/scene.gltf");
    let mut flow = VillageFlow::new(
        AssetLoader::new(source),
        manifest::village(&ctx.config.drift),
        seeded_rng(4),
    );
    init_and_load(&mut flow, &mut ctx).await;

    assert_eq!(ctx.scene.entity_count(), 2 + 11 + 2);
    assert_eq!(ctx.scene.anchor(), None);
    assert_eq!(flow.animators().len(), 1);

    let sun = ctx.scene.lighting().sun.position;
    for _ in 0..10 {
        flow.on_update(&mut ctx, Duration::from_millis(16));
    }
    assert_eq!(ctx.scene.lighting().sun.position, sun);
}

#[tokio::test]
async fn should_animate_on_update() {
    let mut ctx = test_context();
    let mut flow = VillageFlow::new(
        AssetLoader::new(village_source()),
        manifest::village(&ctx.config.drift),
        seeded_rng(6),
    );
    init_and_load(&mut flow, &mut ctx).await;

    let cloud = ctx.scene.find_by_name("cloud_1").unwrap();
    let x = ctx.scene.get(cloud).unwrap().transform.position.x;
    let sun = ctx.scene.lighting().sun.position;

    flow.on_update(&mut ctx, Duration::from_millis(16));

    let moved = ctx.scene.get(cloud).unwrap().transform.position.x;
    assert!((moved - (x + ctx.config.drift.step)).abs() < 1e-5 || moved == -ctx.config.drift.bound);
    assert_ne!(ctx.scene.lighting().sun.position, sun);
}

#[test]
fn should_apply_commands() {
    let mut ctx = test_context();
    let mut flow = VillageFlow::new(
        AssetLoader::new(MemorySource::new()),
        AssetManifest::new(),
        seeded_rng(8),
    );
    flow.on_init(&mut ctx);
    ctx.scene.take_dirty_materials();

    let distance = ctx.camera.state().distance;
    flow.apply(&mut ctx, Command::Camera(CameraAction::ZoomIn));
    assert_eq!(ctx.camera.state().distance, distance - ctx.config.camera.zoom_step);

    flow.apply(&mut ctx, Command::RerollMaterials);
    let dirty = ctx.scene.take_dirty_materials();
    assert_eq!(dirty.len(), SurfaceId::ALL.len());
    for surface in SurfaceId::ALL {
        let part = flow.pool().binding(surface).unwrap();
        assert!(dirty.iter().any(|(id, _)| *id == part));
    }
}

#[test]
fn should_resize_without_moving_the_camera() {
    let mut ctx = test_context();
    let mut flow = VillageFlow::new(
        AssetLoader::new(MemorySource::new()),
        AssetManifest::new(),
        seeded_rng(10),
    );
    flow.on_init(&mut ctx);
    let state = *ctx.camera.state();
    let view = *ctx.camera.view();

    flow.on_window_events(&mut ctx, &WindowEvent::Resized(PhysicalSize::new(1200, 400)));
    assert_eq!(ctx.viewport(), (1200, 400));
    assert!((ctx.projection.aspect() - 3.0).abs() < 1e-6);
    assert_eq!(*ctx.camera.state(), state);
    assert_eq!(*ctx.camera.view(), view);

    flow.on_window_events(&mut ctx, &WindowEvent::Resized(PhysicalSize::new(0, 0)));
    assert_eq!(ctx.viewport(), (1200, 400));
}

#[test]
fn should_use_the_default_clear_colour() {
    let ctx = test_context();
    assert_eq!(ctx.clear_colour, ViewerConfig::default().clear_colour);
}

#[test]
fn should_only_hand_over_loads_from_init() {
    let mut ctx = test_context();
    let mut flow = VillageFlow::new(
        AssetLoader::new(village_source()),
        manifest::village(&DriftConfig::default()),
        seeded_rng(12),
    );
    let expected = manifest::village(&DriftConfig::default()).len();
    match flow.on_init(&mut ctx) {
        Out::Load(loads) => assert_eq!(loads.len(), expected),
        out => panic!("expected loads, got {:?}", out),
    }
    assert_eq!(ctx.clear_colour, ViewerConfig::default().clear_colour);

    let mut empty = VillageFlow::new(
        AssetLoader::new(MemorySource::new()),
        AssetManifest::new(),
        seeded_rng(13),
    );
    let mut ctx = test_context();
    assert!(matches!(empty.on_init(&mut ctx), Out::Empty));
    assert!(matches!(empty.on_update(&mut ctx, Duration::from_millis(16)), Out::Empty));
}
