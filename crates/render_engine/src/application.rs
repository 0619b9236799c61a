//! Application lifecycle trait

use thiserror::Error;

use crate::engine::Engine;
use crate::render::RenderError;

/// Errors returned from application callbacks
#[derive(Debug, Error)]
pub enum AppError {
    /// Scene or resource setup failed
    #[error("Initialization failed: {0}")]
    InitializationFailed(String),

    /// A per-frame update failed
    #[error("Update failed: {0}")]
    UpdateFailed(String),

    /// A renderer call made by the application failed
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

/// Hooks the engine calls over an application's lifetime
///
/// `initialize` runs once after the window and renderer exist,
/// `update` runs once per frame before that frame is rendered, and
/// `cleanup` runs when the event loop is shutting down.
pub trait Application {
    /// Build the scene: upload meshes and textures, add nodes and lights
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Advance per-frame state; `delta_time` is in seconds
    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError>;

    /// Release anything the engine does not own
    fn cleanup(&mut self, _engine: &mut Engine) {}
}
