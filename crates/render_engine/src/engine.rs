//! Engine core and event loop
//!
//! [`Engine::run`] drives the whole lifetime: window creation, renderer
//! setup, the application's `initialize`, then the frame loop. Every
//! frame updates the application first and renders second, so a frame
//! never draws state older than the current update.
//!
//! Pointer input is handled here: left-drag orbits the camera
//! controller, the scroll wheel zooms it, Escape closes the window.

use std::sync::Arc;

use thiserror::Error;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::application::{AppError, Application};
use crate::config::EngineConfig;
use crate::foundation::time::FrameClock;
use crate::render::primitives::{ArcRotateCamera, Camera};
use crate::render::systems::LightingEnvironment;
use crate::render::window::WindowHandle;
use crate::render::{RenderError, Renderer};
use crate::scene::Scene;

/// Pixel-delta scroll units per zoom step
const PIXELS_PER_SCROLL_STEP: f64 = 50.0;

/// Top-level engine errors
#[derive(Debug, Error)]
pub enum EngineError {
    /// The winit event loop failed
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// The window could not be created
    #[error("Window creation failed: {0}")]
    WindowCreation(#[from] winit::error::OsError),

    /// The renderer failed to initialize or draw
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// The application's callbacks returned an error
    #[error("Application error: {0}")]
    Application(#[from] AppError),
}

/// Engine state owned by the frame loop
///
/// Applications receive `&mut Engine` in their callbacks and use it to
/// reach the scene, renderer, camera controller, and lights.
pub struct Engine {
    window: WindowHandle,
    renderer: Renderer,
    scene: Scene,
    camera: Camera,
    orbit_camera: ArcRotateCamera,
    lighting: LightingEnvironment,
    clock: FrameClock,
    exit_requested: bool,
}

impl Engine {
    /// Run an application to completion
    ///
    /// Blocks until the window closes, the application requests exit,
    /// or an error stops the loop.
    pub fn run(config: EngineConfig, app: &mut dyn Application) -> Result<(), EngineError> {
        log::info!("Starting engine: {}", config.window.title);
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut runner = EngineRunner {
            config: Some(config),
            app,
            engine: None,
            drag: DragState::default(),
            result: Ok(()),
        };
        event_loop.run_app(&mut runner)?;
        runner.result
    }

    fn new(config: &EngineConfig, window: WindowHandle) -> Result<Self, EngineError> {
        let renderer = Renderer::new(&window, &config.renderer)?;
        let aspect = renderer.aspect_ratio();
        let camera = Camera::perspective(
            crate::foundation::math::Vec3::new(0.0, 0.0, 10.0),
            config.renderer.fov_degrees,
            aspect,
            config.renderer.near_plane,
            config.renderer.far_plane,
        );
        let orbit_camera = ArcRotateCamera::new(
            0.0,
            std::f32::consts::FRAC_PI_3,
            10.0,
            crate::foundation::math::Vec3::zeros(),
        );

        Ok(Self {
            window,
            renderer,
            scene: Scene::new(),
            camera,
            orbit_camera,
            lighting: LightingEnvironment::new(),
            clock: FrameClock::new(),
            exit_requested: false,
        })
    }

    /// The scene being rendered
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable access to the scene
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// The renderer, for uploading meshes and textures
    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    /// The perspective camera driven by the orbit controller
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The orbit controller fed by pointer input
    pub fn orbit_camera(&self) -> &ArcRotateCamera {
        &self.orbit_camera
    }

    /// Replace the orbit controller
    pub fn set_orbit_camera(&mut self, orbit_camera: ArcRotateCamera) {
        self.orbit_camera = orbit_camera;
    }

    /// Mutable access to the scene lights
    pub fn lighting_mut(&mut self) -> &mut LightingEnvironment {
        &mut self.lighting
    }

    /// Seconds of wall time since the engine started
    pub fn total_time(&self) -> f32 {
        self.clock.total_time()
    }

    /// Frames rendered so far
    pub fn frame_count(&self) -> u64 {
        self.clock.frame_count()
    }

    /// Ask the frame loop to stop after the current frame
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    fn render_frame(&mut self) -> Result<(), RenderError> {
        self.orbit_camera.apply_to(&mut self.camera);
        self.renderer.render(&self.scene, &self.camera, &self.lighting)
    }

    fn handle_resize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        self.renderer.resize(width, height)?;
        self.camera.set_aspect_ratio(width as f32 / height.max(1) as f32);
        Ok(())
    }
}

/// Pointer-drag bookkeeping for the orbit controller
#[derive(Debug, Default)]
struct DragState {
    dragging: bool,
    last_position: Option<(f64, f64)>,
}

/// winit handler bridging the event loop to the engine and application
struct EngineRunner<'a> {
    config: Option<EngineConfig>,
    app: &'a mut dyn Application,
    engine: Option<Engine>,
    drag: DragState,
    result: Result<(), EngineError>,
}

impl EngineRunner<'_> {
    fn fail(&mut self, error: EngineError, event_loop: &ActiveEventLoop) {
        log::error!("Stopping: {error}");
        self.result = Err(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for EngineRunner<'_> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.engine.is_some() {
            return;
        }
        let Some(config) = self.config.take() else {
            return;
        };

        let attributes = Window::default_attributes()
            .with_title(&config.window.title)
            .with_inner_size(LogicalSize::new(config.window.width, config.window.height));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => WindowHandle::new(Arc::new(window)),
            Err(error) => {
                self.fail(error.into(), event_loop);
                return;
            }
        };

        let mut engine = match Engine::new(&config, window) {
            Ok(engine) => engine,
            Err(error) => {
                self.fail(error, event_loop);
                return;
            }
        };

        if let Err(error) = self.app.initialize(&mut engine) {
            self.fail(error.into(), event_loop);
            return;
        }
        log::info!(
            "Scene initialized: {} nodes, {} lights",
            engine.scene.len(),
            engine.lighting.len()
        );
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                {
                    log::info!("Escape pressed, exiting");
                    event_loop.exit();
                }
            }
            WindowEvent::Resized(size) => {
                let result = engine.handle_resize(size.width, size.height);
                if let Err(error) = result {
                    self.fail(error.into(), event_loop);
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.drag.dragging = state == ElementState::Pressed;
                if !self.drag.dragging {
                    self.drag.last_position = None;
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.drag.dragging {
                    if let Some((last_x, last_y)) = self.drag.last_position {
                        let dx = (position.x - last_x) as f32;
                        let dy = (position.y - last_y) as f32;
                        engine.orbit_camera.rotate(dx, dy);
                    }
                    self.drag.last_position = Some((position.x, position.y));
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let steps = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(position) => {
                        (position.y / PIXELS_PER_SCROLL_STEP) as f32
                    }
                };
                engine.orbit_camera.zoom(steps);
            }
            WindowEvent::RedrawRequested => {
                // Update first, then render, so a frame never shows
                // state older than its own update.
                let delta_time = engine.clock.tick();
                let update_result = self.app.update(engine, delta_time);
                if let Err(error) = update_result {
                    self.fail(error.into(), event_loop);
                    return;
                }

                let render_result = engine.render_frame();
                if let Err(error) = render_result {
                    self.fail(error.into(), event_loop);
                    return;
                }

                if engine.exit_requested {
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(engine) = &self.engine {
            engine.window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(engine) = self.engine.as_mut() {
            self.app.cleanup(engine);
            log::info!("Engine shut down after {} frames", engine.clock.frame_count());
        }
    }
}
