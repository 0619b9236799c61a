//! Core rendering primitives
//!
//! Backend-agnostic geometry and camera types.

mod camera;
mod mesh;

pub use camera::{ArcRotateCamera, Camera};
pub use mesh::{Mesh, Vertex};
