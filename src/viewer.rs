//! Standalone carousel window backed by winit.
//!
//! The window is the carousel's container, redraw requests are its
//! refresh-bound frame scheduler, and the platform URI opener handles
//! activation.
//!
//! ```no_run
//! # use depthreel::Viewer;
//! Viewer::builder()
//!     .with_image("photos/a.jpg")
//!     .with_image("https://example.com/b.png")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use web_time::Duration;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::card::ImageSource;
use crate::engine::{open_with_system, Carousel, CarouselSetup, Host};
use crate::error::{ActivationError, CarouselError};
use crate::gpu::{CardRenderer, RenderContext};
use crate::input::{InputEvent, KeyAction, MouseButton};
use crate::options::Options;

/// Container identifier the window answers to unless overridden.
pub const DEFAULT_CONTAINER: &str = "carousel";

/// How often the smoothed frame rate is logged.
const FPS_LOG_INTERVAL: Duration = Duration::from_secs(5);

// --- Builder ---

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    sources: Vec<ImageSource>,
    options: Option<Options>,
    title: String,
    container_id: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            sources: Vec::new(),
            options: None,
            title: "depthreel".into(),
            container_id: DEFAULT_CONTAINER.into(),
        }
    }

    /// Add one image (file path or `http(s)` URL).
    #[must_use]
    pub fn with_image(mut self, source: &str) -> Self {
        self.sources.push(ImageSource::parse(source));
        self
    }

    /// Add already-classified image sources.
    #[must_use]
    pub fn with_sources(
        mut self,
        sources: impl IntoIterator<Item = ImageSource>,
    ) -> Self {
        self.sources.extend(sources);
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Name the window's container.
    #[must_use]
    pub fn with_container(mut self, id: impl Into<String>) -> Self {
        self.container_id = id.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            sources: self.sources,
            options: self.options.unwrap_or_default(),
            title: self.title,
            container_id: self.container_id,
        }
    }
}

// --- Viewer ---

/// A window showing a depth-scrolling carousel.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    sources: Vec<ImageSource>,
    options: Options,
    title: String,
    container_id: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::Viewer`] if the event loop fails, or the
    /// setup error that closed the window (GPU, container, options).
    pub fn run(self) -> Result<(), CarouselError> {
        let event_loop = EventLoop::new()
            .map_err(|e| CarouselError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = ViewerApp {
            window: None,
            host: None,
            stage: Stage::Idle,
            sources: Some(self.sources),
            options: Some(self.options),
            title: self.title,
            container_id: self.container_id,
            failure: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| CarouselError::Viewer(e.to_string()))?;
        app.failure.map_or(Ok(()), Err)
    }
}

// --- Host ---

/// The window as the carousel's only container.
struct WindowHost {
    window: Arc<Window>,
    container_id: String,
}

impl Host for WindowHost {
    fn container_size(&self, id: &str) -> Option<(u32, u32)> {
        (id == self.container_id)
            .then(|| viewport_size(self.window.inner_size()))
    }

    fn open_uri(&mut self, uri: &str) -> Result<(), ActivationError> {
        log::info!("opening {uri}");
        open_with_system(uri)
    }
}

fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

// --- Winit app ---

/// Where the window is in its lifecycle.
enum Stage {
    /// No window yet, or setup failed.
    Idle,
    /// GPU ready, images still decoding.
    Loading {
        setup: CarouselSetup,
        renderer: CardRenderer,
    },
    /// Frames are being drawn.
    Running(Box<Carousel<CardRenderer>>),
}

struct ViewerApp {
    window: Option<Arc<Window>>,
    host: Option<WindowHost>,
    stage: Stage,
    sources: Option<Vec<ImageSource>>,
    options: Option<Options>,
    title: String,
    container_id: String,
    failure: Option<CarouselError>,
}

impl ViewerApp {
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: CarouselError) {
        log::error!("{error}");
        self.failure = Some(error);
        self.stage = Stage::Idle;
        event_loop.exit();
    }

    fn start(
        &mut self,
        window: &Arc<Window>,
        host: &WindowHost,
    ) -> Result<Stage, CarouselError> {
        let sources = self.sources.take().unwrap_or_default();
        let options = self.options.take().unwrap_or_default();

        // Fails fast, before any decode starts.
        let setup =
            CarouselSetup::start(sources, &self.container_id, host, options)?;

        let context = pollster::block_on(RenderContext::new(
            Arc::clone(window),
            setup.viewport(),
        ))?;
        Ok(Stage::Loading {
            setup,
            renderer: CardRenderer::new(context),
        })
    }

    /// Advance the lifecycle by one redraw.
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if let Stage::Loading { setup, .. } = &mut self.stage {
            if !setup.poll_ready() {
                return;
            }
            if let (Stage::Loading { setup, renderer }, Some(host)) =
                (std::mem::replace(&mut self.stage, Stage::Idle), &self.host)
            {
                let carousel = setup.finish_in(renderer, host);
                self.stage = Stage::Running(Box::new(carousel));
            }
        }

        let Stage::Running(carousel) = &mut self.stage else {
            return;
        };
        match carousel.frame() {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                if let Some(host) = &self.host {
                    if let Err(e) = carousel.resize(host) {
                        log::warn!("surface reconfigure failed: {e}");
                    }
                }
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                event_loop.exit();
            }
            Err(e) => log::warn!("frame skipped: {e}"),
        }
        if let Some((fps, frames)) = carousel.fps_report(FPS_LOG_INTERVAL) {
            log::debug!("{fps:.1} fps ({frames} frames)");
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            #[allow(clippy::cast_possible_truncation)]
            let logical_w = (mon_size.width as f64 / scale * 0.75) as u32;
            #[allow(clippy::cast_possible_truncation)]
            let logical_h = (mon_size.height as f64 / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                self.fail(event_loop, CarouselError::Viewer(e.to_string()));
                return;
            }
        };
        let host = WindowHost {
            window: Arc::clone(&window),
            container_id: self.container_id.clone(),
        };

        match self.start(&window, &host) {
            Ok(stage) => self.stage = stage,
            Err(e) => {
                self.fail(event_loop, e);
                return;
            }
        }

        window.request_redraw();
        self.window = Some(window);
        self.host = Some(host);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                // Re-scheduled every frame; pausing only skips the work.
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::Resized(_) => {
                if let (Stage::Running(carousel), Some(host)) =
                    (&mut self.stage, &self.host)
                {
                    if let Err(e) = carousel.resize(host) {
                        log::warn!("resize failed: {e}");
                    }
                }
            }

            WindowEvent::MouseInput { button, state, .. } => {
                self.pointer(InputEvent::MouseButton {
                    button: MouseButton::from(button),
                    pressed: state == ElementState::Pressed,
                });
            }

            WindowEvent::CursorMoved { position, .. } => {
                #[allow(clippy::cast_possible_truncation)]
                self.pointer(InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let key_str = format!("{code:?}");
                if let (Stage::Running(carousel), Some(host)) =
                    (&mut self.stage, &self.host)
                {
                    let action = carousel.handle_key(&key_str, host);
                    if action == Some(KeyAction::Quit) {
                        event_loop.exit();
                    }
                }
            }

            _ => (),
        }
    }
}

impl ViewerApp {
    fn pointer(&mut self, event: InputEvent) {
        if let (Stage::Running(carousel), Some(host)) =
            (&mut self.stage, &mut self.host)
        {
            if let Some(outcome) = carousel.handle_input(event, host) {
                if let Some(card) = outcome.selected {
                    log::trace!("pointer over {card}");
                }
            }
        }
    }
}
