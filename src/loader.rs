//! Asynchronous placement of models.
//!
//! [`AssetLoader::load`] turns one [`Placement`] into a future that fetches and
//! parses the model. The future never touches the scene: whoever drives it
//! hands the [`LoadOutcome`] back to the event loop, where [`complete`] inserts
//! the entity. Loads are independent. A failure is logged and leaves the scene
//! one entity short, nothing more.

use std::sync::Arc;

use futures::stream::FuturesUnordered;
use thiserror::Error;

use crate::{
    data_structures::{
        scene_graph::{EntityDesc, EntityId, SceneGraph},
        transform::Transform,
    },
    manifest::{AssetManifest, Placement},
    resources::{
        AssetSource, FetchFuture, Progress, ProgressFn,
        model::{ModelAsset, asset_dir, parse_model},
    },
};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not fetch {path}")]
    Fetch {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
    #[error("not a valid glTF document")]
    Parse(#[from] gltf::Error),
    #[error("the document has no scene nodes")]
    EmptyScene,
}

/// The result of one load, still carrying the placement it was issued for.
#[derive(Debug)]
pub struct LoadOutcome {
    pub placement: Placement,
    pub result: Result<ModelAsset, LoadError>,
}

pub type LoadFuture = FetchFuture<LoadOutcome>;

pub struct AssetLoader {
    source: Arc<dyn AssetSource>,
}

impl AssetLoader {
    pub fn new(source: impl AssetSource + 'static) -> Self {
        Self {
            source: Arc::new(source),
        }
    }

    /// Issues the fetch for `placement`. Placements sharing a file are fetched
    /// separately and end up as separate entities.
    // TODO: loads have no deadline; add one together with a cancellation path
    // once the viewer defines what a stalled load should do.
    pub fn load(&self, placement: Placement) -> LoadFuture {
        let name = placement.name.clone();
        let progress: ProgressFn = Box::new(move |progress: Progress| {
            if let Some(fraction) = progress.fraction() {
                log::debug!("Loading {}: {:.2}%", name, fraction * 100.0);
            }
        });
        let fetch = self.source.fetch(&placement.asset_path, progress);
        Box::pin(async move {
            let result = match fetch.await {
                Ok(bytes) => parse_model(&bytes, asset_dir(&placement.asset_path)),
                Err(source) => Err(LoadError::Fetch {
                    path: placement.asset_path.clone(),
                    source: source.into(),
                }),
            };
            LoadOutcome { placement, result }
        })
    }

    /// One future per placement, in manifest order. Completion order is up to
    /// the executor.
    pub fn load_all(&self, manifest: AssetManifest) -> Vec<LoadFuture> {
        manifest
            .into_iter()
            .map(|placement| self.load(placement))
            .collect()
    }
}

/// Drives `loads` concurrently and yields each outcome as soon as it is
/// ready, so one slow or failing load holds up nothing else.
pub fn completions(loads: Vec<LoadFuture>) -> FuturesUnordered<LoadFuture> {
    loads.into_iter().collect()
}

/// The entity tree a placement produces: a group carrying the placement's
/// name and transform with the model's nodes below it.
pub fn placed_entity(placement: &Placement, model: ModelAsset) -> EntityDesc {
    let mut root = EntityDesc::group(placement.name.clone()).with_transform(Transform::from_parts(
        placement.position,
        placement.rotation,
        placement.scale,
    ));
    root.children = model.nodes;
    root
}

/// Applies a finished load to the scene. Hands the placement back together
/// with the new entity, which is `None` when the load failed.
pub fn complete(
    scene: &mut SceneGraph,
    LoadOutcome { placement, result }: LoadOutcome,
) -> (Placement, Option<EntityId>) {
    match result {
        Ok(model) => {
            let id = scene.insert(placed_entity(&placement, model));
            scene.apply_shadows(id, placement.shadows);
            log::info!("{} loaded from {}", placement.name, placement.asset_path);
            (placement, Some(id))
        }
        Err(e) => {
            log::error!(
                "Error loading {} from {}: {}",
                placement.name,
                placement.asset_path,
                error_chain(&e)
            );
            (placement, None)
        }
    }
}

fn error_chain(e: &LoadError) -> String {
    let mut message = e.to_string();
    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
