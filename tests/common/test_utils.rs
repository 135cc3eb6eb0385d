#![allow(dead_code)]

use std::{collections::HashMap, time::Duration};

use futures::StreamExt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use village_viewer::{
    config::ViewerConfig,
    context::Context,
    flow::{GraphicsFlow, Out},
    loader::{self, LoadFuture, LoadOutcome},
    resources::{AssetSource, FetchFuture, Progress, ProgressFn},
};

/// A glTF document with a single empty node named `root`.
pub const NODE_ONLY_GLTF: &str = r#"{
    "asset": { "version": "2.0" },
    "scene": 0,
    "scenes": [ { "nodes": [0] } ],
    "nodes": [ { "name": "root" } ]
}"#;

/// A glTF document with a two-level node tree.
pub const NESTED_GLTF: &str = r#"{
    "asset": { "version": "2.0" },
    "scene": 0,
    "scenes": [ { "nodes": [0] } ],
    "nodes": [
        { "name": "trunk", "children": [1], "translation": [0.0, 2.0, 0.0] },
        { "name": "crown" }
    ]
}"#;

/// A glTF document with one textured triangle mesh. The base colour image
/// sits next to the document under `textures/`.
pub const TEXTURED_MESH_GLTF: &str = r#"{
    "asset": { "version": "2.0" },
    "scene": 0,
    "scenes": [ { "nodes": [0] } ],
    "nodes": [
        { "name": "tree", "children": [1] },
        { "name": "bark", "mesh": 0 }
    ],
    "meshes": [
        { "primitives": [ { "attributes": { "POSITION": 0 }, "material": 0 } ] }
    ],
    "materials": [
        { "pbrMetallicRoughness": { "baseColorTexture": { "index": 0 } } }
    ],
    "textures": [ { "source": 0 } ],
    "images": [ { "uri": "textures/bark.png" } ],
    "accessors": [
        {
            "bufferView": 0,
            "componentType": 5126,
            "count": 3,
            "type": "VEC3",
            "min": [0.0, 0.0, 0.0],
            "max": [1.0, 1.0, 0.0]
        }
    ],
    "bufferViews": [ { "buffer": 0, "byteLength": 36 } ],
    "buffers": [ { "byteLength": 36, "uri": "tree.bin" } ]
}"#;

/// An in-memory asset source. Paths without a file fail; paths with a delay
/// finish only after sleeping that long.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    files: HashMap<String, Vec<u8>>,
    delays: HashMap<String, Duration>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str, bytes: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.to_string(), bytes.into());
        self
    }

    pub fn with_model(self, path: &str) -> Self {
        self.with_file(path, NODE_ONLY_GLTF)
    }

    pub fn with_delay(mut self, path: &str, millis: u64) -> Self {
        self.delays
            .insert(path.to_string(), Duration::from_millis(millis));
        self
    }
}

impl AssetSource for MemorySource {
    fn fetch(&self, path: &str, mut progress: ProgressFn) -> FetchFuture<anyhow::Result<Vec<u8>>> {
        let file = self.files.get(path).cloned();
        let delay = self.delays.get(path).copied();
        let path = path.to_string();
        Box::pin(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            let data = file.ok_or_else(|| anyhow::anyhow!("no such file: {}", path))?;
            progress(Progress {
                loaded: data.len() as u64,
                total: Some(data.len() as u64),
            });
            Ok(data)
        })
    }
}

pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

pub fn test_context() -> Context {
    Context::new(ViewerConfig::default(), 800, 600)
}

/// Runs every load to completion, in completion order.
pub async fn drain(loads: Vec<LoadFuture>) -> Vec<LoadOutcome> {
    loader::completions(loads).collect().await
}

/// Initializes `flow` and feeds it every load it asks for.
pub async fn init_and_load<F: GraphicsFlow>(flow: &mut F, ctx: &mut Context) {
    match flow.on_init(ctx) {
        Out::Load(loads) => {
            for outcome in drain(loads).await {
                flow.on_loaded(ctx, outcome);
            }
        }
        Out::Empty => (),
    }
}

pub fn assert_close(actual: f32, expected: f32, tolerance: f32) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} to be within {} of {}",
        actual,
        tolerance,
        expected
    );
}
