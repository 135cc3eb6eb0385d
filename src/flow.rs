//! Flow control and application event loop.
//!
//! A "flow" is the scene logic: it reacts to window events, advances the
//! animations each frame and receives finished loads. The [`App`] owns the
//! window, the [`Context`] and the [`Presenter`] and drives one flow.
//!
//! # Lifecycle
//!
//! 1. The window and presenter are created, then `on_init` is called once.
//! 2. Window events are handed to `on_window_events`.
//! 3. Every redraw calls `on_update` and then presents the frame.
//! 4. Loads returned through [`Out::Load`] run off the event loop (on a tokio
//!    runtime natively, with `spawn_local` on the web). Each result is posted
//!    back as an event and handed to `on_loaded` on the event-loop thread,
//!    so the scene is only ever mutated there.

use std::{fmt::Debug, sync::Arc};

use futures::StreamExt;
use instant::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy},
    window::Window,
};

use crate::{
    config::ViewerConfig,
    context::Context,
    loader::{self, LoadFuture, LoadOutcome},
    render::Presenter,
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Output of every lifecycle hook.
///
/// `Out::Load` hands over load futures. They are driven according to the
/// platform and their outcomes come back through [`GraphicsFlow::on_loaded`].
///
/// `Empty` is the default output used when there is nothing to hand over.
pub enum Out {
    Load(Vec<LoadFuture>),
    Empty,
}

impl Default for Out {
    fn default() -> Self {
        Self::Empty
    }
}

impl Debug for Out {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load(loads) => f.debug_tuple("Load").field(&loads.len()).finish(),
            Self::Empty => f.write_str("Empty"),
        }
    }
}

pub trait GraphicsFlow {
    /// Called once after the window and the GPU are ready.
    fn on_init(&mut self, ctx: &mut Context) -> Out;

    /// Called once per frame, before presenting.
    fn on_update(&mut self, ctx: &mut Context, dt: Duration) -> Out;

    fn on_window_events(&mut self, ctx: &mut Context, event: &WindowEvent) -> Out;

    /// Called on the event-loop thread for every finished load, successful
    /// or not, in completion order.
    fn on_loaded(&mut self, ctx: &mut Context, outcome: LoadOutcome) -> Out;
}

/// Window, presenter and context, once the GPU is up.
pub struct AppState {
    pub(crate) ctx: Context,
    presenter: Presenter,
}

pub(crate) enum FlowEvent {
    #[allow(dead_code)]
    Initialized(Presenter),
    Loaded(LoadOutcome),
    #[allow(dead_code)]
    Exit,
}

impl Debug for FlowEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initialized(_) => f.write_str("Initialized"),
            Self::Loaded(outcome) => f
                .debug_tuple("Loaded")
                .field(&outcome.placement.name)
                .finish(),
            Self::Exit => f.write_str("Exit"),
        }
    }
}

pub struct App<F: GraphicsFlow + 'static> {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    proxy: EventLoopProxy<FlowEvent>,
    config: Option<ViewerConfig>,
    state: Option<AppState>,
    flow: F,
    last_time: Instant,
}

impl<F: GraphicsFlow + 'static> App<F> {
    fn new(event_loop: &EventLoop<FlowEvent>, config: ViewerConfig, flow: F) -> anyhow::Result<Self> {
        let proxy = event_loop.create_proxy();
        #[cfg(not(target_arch = "wasm32"))]
        let async_runtime = tokio::runtime::Runtime::new()?;
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime,
            proxy,
            config: Some(config),
            state: None,
            flow,
            last_time: Instant::now(),
        })
    }

    fn initialize(&mut self, presenter: Presenter) {
        let Some(config) = self.config.take() else {
            log::warn!("the viewer was already initialized");
            return;
        };
        let size = presenter.window().inner_size();
        let mut state = AppState {
            ctx: Context::new(config, size.width, size.height),
            presenter,
        };
        let out = self.flow.on_init(&mut state.ctx);
        handle_flow_output(
            #[cfg(not(target_arch = "wasm32"))]
            &self.async_runtime,
            self.proxy.clone(),
            out,
        );
        state.presenter.window().request_redraw();
        self.last_time = Instant::now();
        self.state = Some(state);
    }
}

impl<F: GraphicsFlow + 'static> ApplicationHandler<FlowEvent> for App<F> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() || self.config.is_none() {
            return;
        }

        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes().with_title("Village");

        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            const CANVAS_ID: &str = "canvas";

            let window = wgpu::web_sys::window().unwrap_throw();
            let document = window.document().unwrap_throw();
            let canvas = document.get_element_by_id(CANVAS_ID).unwrap_throw();
            let html_canvas_element = canvas.unchecked_into();
            window_attributes = window_attributes.with_canvas(Some(html_canvas_element));
        }

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Cannot create the window: {}", e);
                event_loop.exit();
                return;
            }
        };

        #[cfg(not(target_arch = "wasm32"))]
        {
            match self.async_runtime.block_on(Presenter::new(window)) {
                Ok(presenter) => self.initialize(presenter),
                Err(e) => {
                    log::error!("App initialization failed: {:#}", e);
                    event_loop.exit();
                }
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let event = match Presenter::new(window).await {
                    Ok(presenter) => FlowEvent::Initialized(presenter),
                    Err(e) => {
                        log::error!("App initialization failed: {:#}", e);
                        FlowEvent::Exit
                    }
                };
                if proxy.send_event(event).is_err() {
                    log::error!("Event loop was closed before the app was initialized");
                }
            });
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: FlowEvent) {
        match event {
            FlowEvent::Initialized(presenter) => self.initialize(presenter),
            FlowEvent::Loaded(outcome) => {
                let Some(state) = &mut self.state else {
                    log::warn!("dropping {:?}: the app is not running", outcome.placement.name);
                    return;
                };
                let out = self.flow.on_loaded(&mut state.ctx, outcome);
                handle_flow_output(
                    #[cfg(not(target_arch = "wasm32"))]
                    &self.async_runtime,
                    self.proxy.clone(),
                    out,
                );
            }
            FlowEvent::Exit => event_loop.exit(),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        let out = self.flow.on_window_events(&mut state.ctx, &event);
        handle_flow_output(
            #[cfg(not(target_arch = "wasm32"))]
            &self.async_runtime,
            self.proxy.clone(),
            out,
        );

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.presenter.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                let dt = self.last_time.elapsed();
                self.last_time = Instant::now();

                let out = self.flow.on_update(&mut state.ctx, dt);
                handle_flow_output(
                    #[cfg(not(target_arch = "wasm32"))]
                    &self.async_runtime,
                    self.proxy.clone(),
                    out,
                );

                match state.presenter.render(&mut state.ctx) {
                    Ok(()) => (),
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        state.presenter.reconfigure();
                    }
                    Err(e) => {
                        log::error!("Unable to render {}", e);
                    }
                }
                state.presenter.window().request_redraw();
            }
            _ => {}
        }
    }
}

fn handle_flow_output(
    #[cfg(not(target_arch = "wasm32"))] async_runtime: &tokio::runtime::Runtime,
    proxy: EventLoopProxy<FlowEvent>,
    out: Out,
) {
    match out {
        // Every load reports back on its own, in completion order
        Out::Load(loads) => {
            let task = async move {
                let mut completions = loader::completions(loads);
                while let Some(outcome) = completions.next().await {
                    if proxy.send_event(FlowEvent::Loaded(outcome)).is_err() {
                        log::warn!("Event loop was closed before all loads finished");
                        break;
                    }
                }
            };
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime.spawn(task);
            #[cfg(target_arch = "wasm32")]
            wasm_bindgen_futures::spawn_local(task);
        }
        Out::Empty => (),
    }
}

/// Sets up logging, reads the configuration and runs `constructor`'s flow
/// until the window closes.
pub fn run<F, C>(constructor: C) -> anyhow::Result<()>
where
    F: GraphicsFlow + 'static,
    C: FnOnce(&ViewerConfig) -> F,
{
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        console_log::init_with_level(log::Level::Info).unwrap_throw();
    }

    let config = ViewerConfig::from_env();
    let flow = constructor(&config);

    let event_loop: EventLoop<FlowEvent> = EventLoop::with_user_event().build()?;
    let mut app = App::new(&event_loop, config, flow)?;
    event_loop.run_app(&mut app)?;

    Ok(())
}
