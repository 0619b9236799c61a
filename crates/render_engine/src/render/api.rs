//! Backend abstraction
//!
//! The [`RenderBackend`] trait is the boundary between the engine-facing
//! [`Renderer`](crate::render::Renderer) facade and a concrete GPU
//! implementation. Resources cross the boundary as opaque slotmap keys,
//! so backend types never leak into scene or application code.

use thiserror::Error;

use crate::assets::{CubeImageData, ImageData};
use crate::foundation::math::Mat4;
use crate::render::primitives::Mesh;
use crate::render::resources::MaterialUbo;
use crate::render::systems::FrameLightData;
use crate::render::window::WindowHandle;

slotmap::new_key_type! {
    /// Opaque handle to a mesh uploaded to the GPU
    pub struct MeshHandle;

    /// Opaque handle to a 2D or cube texture uploaded to the GPU
    pub struct TextureHandle;
}

/// Errors reported by a render backend
#[derive(Debug, Error)]
pub enum BackendError {
    /// Backend initialization failed
    #[error("Backend initialization failed: {0}")]
    InitializationFailed(String),

    /// A GPU resource could not be created
    #[error("Resource creation failed: {0}")]
    ResourceCreationFailed(String),

    /// A handle did not resolve to a live resource
    #[error("Invalid resource handle: {0}")]
    InvalidHandle(String),

    /// The surface was lost or could not produce a frame
    #[error("Surface error: {0}")]
    SurfaceError(String),
}

/// Result alias for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// A single mesh draw within a frame
#[derive(Debug, Clone)]
pub struct DrawItem {
    /// Mesh to draw
    pub mesh: MeshHandle,
    /// Model-to-world transform
    pub model_matrix: Mat4,
    /// Packed material parameters
    pub material: MaterialUbo,
    /// Texture sampled by the material, if any
    pub texture: Option<TextureHandle>,
    /// Whether back faces are culled for this draw
    pub back_face_culling: bool,
}

/// Everything the backend needs to render one frame
#[derive(Debug)]
pub struct FrameDesc<'a> {
    /// Combined view-projection matrix
    pub view_projection: Mat4,
    /// View-projection with the view translation removed, for the skybox
    pub skybox_view_projection: Mat4,
    /// Packed frame lights
    pub lights: FrameLightData,
    /// Clear color as linear RGBA
    pub clear_color: [f32; 4],
    /// Meshes to draw, in submission order
    pub draws: &'a [DrawItem],
    /// Cube texture drawn behind everything, if any
    pub skybox: Option<TextureHandle>,
}

/// GPU backend interface
///
/// Implementations own the device, swapchain, pipelines, and all
/// uploaded resources. The facade calls these methods from the main
/// thread only.
pub trait RenderBackend {
    /// Upload a mesh and return a handle to it
    fn create_mesh(&mut self, mesh: &Mesh) -> BackendResult<MeshHandle>;

    /// Upload a 2D texture and return a handle to it
    fn create_texture(&mut self, image: &ImageData) -> BackendResult<TextureHandle>;

    /// Upload a six-face cube texture and return a handle to it
    fn create_cube_texture(&mut self, image: &CubeImageData) -> BackendResult<TextureHandle>;

    /// Resize the swapchain to match the window surface
    fn resize(&mut self, width: u32, height: u32) -> BackendResult<()>;

    /// Render one frame
    fn render_frame(&mut self, frame: &FrameDesc<'_>) -> BackendResult<()>;

    /// Current surface size in physical pixels
    fn surface_size(&self) -> (u32, u32);
}

/// Construct the default backend for a window
pub fn create_backend(
    window: &WindowHandle,
    application_name: &str,
) -> BackendResult<Box<dyn RenderBackend>> {
    let backend = crate::render::backends::WgpuBackend::new(window, application_name)?;
    Ok(Box::new(backend))
}
