//! Asset loading
//!
//! Image decoding for textures and cubemap faces. Assets are loaded
//! synchronously by path; a missing or malformed file is an error the
//! caller decides how to handle.

mod image_loader;

pub use image_loader::{CubeImageData, ImageData};

use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// The asset file could not be found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// The asset file exists but could not be loaded or decoded
    #[error("Asset load failed: {0}")]
    LoadFailed(String),

    /// The asset data is structurally invalid
    #[error("Invalid asset data: {0}")]
    InvalidData(String),
}
