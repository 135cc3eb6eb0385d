//! The village scene.
//!
//! [`VillageFlow`] wires the pieces together: it places the cottage and the
//! ground, issues one load per manifest entry, turns finished loads into
//! entities (setting the anchor or starting a drift as the placement asks),
//! maps input to camera moves and material rerolls, and ticks the animators.

use instant::Duration;
use rand::Rng;
use winit::event::WindowEvent;

use crate::{
    animation::{AnimatorRegistry, DriftAnimator, LightOrbitAnimator},
    config::ViewerConfig,
    context::Context,
    cottage,
    data_structures::scene_graph::EntityId,
    flow::{GraphicsFlow, Out},
    input::{Command, InputDispatcher},
    loader::{self, AssetLoader, LoadOutcome},
    manifest::{self, AssetManifest, PlacementRole},
    materials::MaterialVariationPool,
};

pub struct VillageFlow<R: Rng> {
    loader: AssetLoader,
    manifest: Option<AssetManifest>,
    dispatcher: InputDispatcher,
    pool: MaterialVariationPool,
    animators: AnimatorRegistry,
    rng: R,
    cottage: Option<EntityId>,
}

impl<R: Rng> VillageFlow<R> {
    pub fn new(loader: AssetLoader, manifest: AssetManifest, rng: R) -> Self {
        Self {
            loader,
            manifest: Some(manifest),
            dispatcher: InputDispatcher::new(),
            pool: MaterialVariationPool::new(),
            animators: AnimatorRegistry::new(),
            rng,
            cottage: None,
        }
    }

    pub fn pool(&self) -> &MaterialVariationPool {
        &self.pool
    }

    pub fn animators(&self) -> &AnimatorRegistry {
        &self.animators
    }

    pub fn dispatcher(&self) -> &InputDispatcher {
        &self.dispatcher
    }

    pub fn cottage(&self) -> Option<EntityId> {
        self.cottage
    }

    /// Carries out one command on the event-loop thread.
    pub fn apply(&mut self, ctx: &mut Context, command: Command) {
        match command {
            Command::Camera(action) => ctx.camera.apply(action),
            Command::RerollMaterials => {
                self.pool.reroll_all(&mut ctx.scene, &mut self.rng);
            }
            Command::Resize { width, height } => ctx.resize(width, height),
        }
    }
}

impl<R: Rng> GraphicsFlow for VillageFlow<R> {
    fn on_init(&mut self, ctx: &mut Context) -> Out {
        ctx.scene.insert(cottage::ground());
        match cottage::build(&mut ctx.scene, &mut self.pool, &mut self.rng) {
            Ok(id) => self.cottage = Some(id),
            Err(e) => log::error!("the cottage could not be built: {}", e),
        }
        self.animators
            .register(Box::new(LightOrbitAnimator::new(&ctx.config.light)));
        ctx.camera.update_view();

        match self.manifest.take() {
            Some(manifest) if !manifest.is_empty() => {
                log::info!("placing {} models", manifest.len());
                Out::Load(self.loader.load_all(manifest))
            }
            _ => Out::Empty,
        }
    }

    fn on_update(&mut self, ctx: &mut Context, _dt: Duration) -> Out {
        self.animators.tick(&mut ctx.scene);
        Out::Empty
    }

    fn on_window_events(&mut self, ctx: &mut Context, event: &WindowEvent) -> Out {
        let commands = match event {
            WindowEvent::KeyboardInput { event, .. } => {
                self.dispatcher.on_key(&event.logical_key, event.state)
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.dispatcher.on_mouse(*button, *state).into_iter().collect()
            }
            WindowEvent::Resized(size) => self
                .dispatcher
                .on_resize(size.width, size.height)
                .into_iter()
                .collect(),
            _ => Vec::new(),
        };
        for command in commands {
            self.apply(ctx, command);
        }
        Out::Empty
    }

    fn on_loaded(&mut self, ctx: &mut Context, outcome: LoadOutcome) -> Out {
        let (placement, entity) = loader::complete(&mut ctx.scene, outcome);
        let Some(entity) = entity else {
            return Out::Empty;
        };
        match placement.role {
            PlacementRole::Static => (),
            PlacementRole::Anchor => {
                ctx.scene.set_anchor(entity);
            }
            PlacementRole::Drifting { bound, step } => {
                self.animators.register(Box::new(DriftAnimator::new(
                    &ctx.scene, entity, bound, step,
                )));
            }
        }
        Out::Empty
    }
}

/// The demo village reading its models from the platform's asset source.
pub fn default_flow(config: &ViewerConfig) -> VillageFlow<rand::rngs::ThreadRng> {
    #[cfg(not(target_arch = "wasm32"))]
    let source = crate::resources::FsSource::new(config.asset_root.clone());
    #[cfg(target_arch = "wasm32")]
    let source = crate::resources::HttpSource;

    VillageFlow::new(
        AssetLoader::new(source),
        manifest::village(&config.drift),
        rand::rng(),
    )
}
