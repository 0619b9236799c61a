//! # Render Engine
//!
//! A small scene-rendering engine with a wgpu backend.
//!
//! ## Features
//!
//! - **Forward Rendering**: Lit meshes, emissive materials, and cubemap skyboxes
//! - **Scene Graph**: Handle-based scene nodes with explicit transforms
//! - **Arc-Rotate Camera**: Pointer-drag orbiting and wheel zoom, handled by the engine
//! - **Asset Loading**: PNG/JPEG texture and cubemap-face loading
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use render_engine::prelude::*;
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         // Build your scene
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError> {
//!         // Advance per-frame state
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, engine: &mut Engine) {
//!         // Release anything the engine does not own
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::default();
//!     let mut app = MyApp;
//!     Engine::run(config, &mut app)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod assets;
pub mod config;
pub mod render;
pub mod scene;

mod application;
mod engine;

pub use application::{AppError, Application};
pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        application::{AppError, Application},
        assets::{CubeImageData, ImageData},
        config::{EngineConfig, RendererConfig, WindowConfig},
        engine::{Engine, EngineError},
        foundation::math::{Mat4, Transform, Vec3},
        render::{
            ArcRotateCamera, Camera, Light, LightingEnvironment, Material, Mesh, MeshHandle,
            Renderer, TextureHandle, Vertex,
        },
        scene::{NodeId, Scene, SceneNode, Skybox},
    };
}
