//! Rendering layer
//!
//! Application code talks to the [`Renderer`] facade; the facade
//! flattens the scene into draw submissions for a [`RenderBackend`]
//! implementation behind the [`api`] boundary.

pub mod api;
pub mod backends;
pub mod primitives;
pub mod resources;
pub mod systems;
pub mod window;

mod renderer;

pub use api::{BackendError, MeshHandle, TextureHandle};
pub use primitives::{ArcRotateCamera, Camera, Mesh, Vertex};
pub use renderer::{RenderError, RenderResult, Renderer};
pub use resources::{Material, MaterialUbo};
pub use systems::{Light, LightingEnvironment};
