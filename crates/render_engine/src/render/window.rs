//! Window wrapper
//!
//! Thin shared handle around the winit window so the backend can create
//! a surface without taking ownership of the event-loop side.

use std::sync::Arc;

use winit::window::Window;

/// Shared handle to the application window
#[derive(Debug, Clone)]
pub struct WindowHandle {
    window: Arc<Window>,
}

impl WindowHandle {
    /// Wrap a winit window
    pub fn new(window: Arc<Window>) -> Self {
        Self { window }
    }

    /// The underlying winit window
    pub fn window(&self) -> Arc<Window> {
        Arc::clone(&self.window)
    }

    /// Current inner size in physical pixels, clamped to at least 1x1
    pub fn inner_size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width.max(1), size.height.max(1))
    }

    /// Ask the window system for another redraw
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}
