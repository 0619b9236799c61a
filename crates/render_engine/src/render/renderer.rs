//! Renderer facade
//!
//! Owns the backend and translates a [`Scene`] plus a [`Camera`] and
//! [`LightingEnvironment`] into one frame submission. This is the only
//! rendering type applications interact with directly.

use thiserror::Error;

use crate::assets::{AssetError, CubeImageData, ImageData};
use crate::config::RendererConfig;
use crate::render::api::{
    self, BackendError, DrawItem, FrameDesc, MeshHandle, RenderBackend, TextureHandle,
};
use crate::render::primitives::{Camera, Mesh};
use crate::render::systems::LightingEnvironment;
use crate::render::window::WindowHandle;
use crate::scene::Scene;

/// Errors surfaced by the renderer
#[derive(Debug, Error)]
pub enum RenderError {
    /// The GPU backend reported a failure
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// An asset could not be loaded
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),
}

/// Result alias for renderer operations
pub type RenderResult<T> = Result<T, RenderError>;

/// High-level renderer over an opaque GPU backend
pub struct Renderer {
    backend: Box<dyn RenderBackend>,
}

impl Renderer {
    /// Create a renderer targeting the given window
    pub fn new(window: &WindowHandle, config: &RendererConfig) -> RenderResult<Self> {
        let backend = api::create_backend(window, &config.application_name)?;
        Ok(Self { backend })
    }

    /// Upload a mesh to the GPU
    pub fn create_mesh(&mut self, mesh: &Mesh) -> RenderResult<MeshHandle> {
        Ok(self.backend.create_mesh(mesh)?)
    }

    /// Upload a 2D texture to the GPU
    pub fn create_texture(&mut self, image: &ImageData) -> RenderResult<TextureHandle> {
        Ok(self.backend.create_texture(image)?)
    }

    /// Upload a six-face cube texture to the GPU
    pub fn create_cube_texture(&mut self, image: &CubeImageData) -> RenderResult<TextureHandle> {
        Ok(self.backend.create_cube_texture(image)?)
    }

    /// Load a 2D texture from an image file and upload it
    pub fn load_texture(&mut self, path: &str) -> RenderResult<TextureHandle> {
        let image = ImageData::from_file(path)?;
        log::info!("Loaded texture {path} ({}x{})", image.width, image.height);
        self.create_texture(&image)
    }

    /// Load six cubemap faces by path prefix and upload them
    ///
    /// See [`CubeImageData::from_prefix`] for the naming convention.
    pub fn load_cube_texture(
        &mut self,
        prefix: &str,
        extension: &str,
    ) -> RenderResult<TextureHandle> {
        let image = CubeImageData::from_prefix(prefix, extension)?;
        log::info!(
            "Loaded cubemap {prefix}_*.{extension} ({}x{} per face)",
            image.face_width(),
            image.face_height()
        );
        self.create_cube_texture(&image)
    }

    /// Resize the render surface
    pub fn resize(&mut self, width: u32, height: u32) -> RenderResult<()> {
        Ok(self.backend.resize(width, height)?)
    }

    /// Current surface aspect ratio (width / height)
    pub fn aspect_ratio(&self) -> f32 {
        let (width, height) = self.backend.surface_size();
        width as f32 / height.max(1) as f32
    }

    /// Render one frame of the scene
    pub fn render(
        &mut self,
        scene: &Scene,
        camera: &Camera,
        lights: &LightingEnvironment,
    ) -> RenderResult<()> {
        let mut draws: Vec<DrawItem> = Vec::with_capacity(scene.len());
        for (_, node) in scene.iter() {
            if !node.visible {
                continue;
            }
            draws.push(DrawItem {
                mesh: node.mesh,
                model_matrix: node.transform.to_matrix(),
                material: node.material.to_ubo(),
                texture: node.material.bound_texture(),
                back_face_culling: node.material.back_face_culling,
            });
        }

        let frame = FrameDesc {
            view_projection: camera.view_projection_matrix(),
            skybox_view_projection: camera.skybox_view_projection_matrix(),
            lights: lights.pack(camera.position),
            clear_color: scene.clear_color,
            draws: &draws,
            skybox: scene.skybox().map(|skybox| skybox.texture),
        };

        Ok(self.backend.render_frame(&frame)?)
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (width, height) = self.backend.surface_size();
        f.debug_struct("Renderer")
            .field("surface_size", &(width, height))
            .finish_non_exhaustive()
    }
}
