//! Image loading utilities for texture data
//!
//! Provides PNG and JPEG loading for use with the texture system, plus
//! cubemap-face loading by path prefix.

use std::path::Path;

use crate::assets::AssetError;

/// Loaded image data ready for GPU upload
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Raw RGBA pixel data
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageData {
    /// Load an image from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path_ref = path.as_ref();

        log::debug!("Loading image from: {:?}", path_ref);

        if !path_ref.exists() {
            return Err(AssetError::NotFound(path_ref.display().to_string()));
        }

        let img = image::open(path_ref)
            .map_err(|e| AssetError::LoadFailed(format!("{}: {e}", path_ref.display())))?;

        // RGBA8 is the canonical upload format for the backend
        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        log::info!("Loaded image {}x{} from {:?}", width, height, path_ref);

        Ok(Self {
            data: rgba_img.into_raw(),
            width,
            height,
        })
    }

    /// Load an image from memory (useful for embedded resources)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| AssetError::LoadFailed(format!("Failed to decode image: {e}")))?;

        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        log::debug!("Loaded image {}x{} from memory", width, height);

        Ok(Self {
            data: rgba_img.into_raw(),
            width,
            height,
        })
    }

    /// Create a solid color image (useful for default textures and tests)
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = (width * height) as usize;
        let mut data = Vec::with_capacity(pixel_count * 4);

        for _ in 0..pixel_count {
            data.extend_from_slice(&color);
        }

        Self {
            data,
            width,
            height,
        }
    }

    /// Get the size of the image data in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

/// Suffixes for the six cubemap faces, in the +X, -X, +Y, -Y, +Z, -Z
/// order GPU cubemap layers expect
const CUBE_FACE_SUFFIXES: [&str; 6] = ["_px", "_nx", "_py", "_ny", "_pz", "_nz"];

/// Six cubemap faces loaded from disk
///
/// Faces are stored in GPU layer order (+X, -X, +Y, -Y, +Z, -Z) and are
/// required to share identical dimensions.
#[derive(Debug, Clone)]
pub struct CubeImageData {
    /// The six face images in layer order
    pub faces: [ImageData; 6],
}

impl CubeImageData {
    /// Load six cubemap faces by path prefix
    ///
    /// `from_prefix("assets/skybox", "jpg")` loads `assets/skybox_px.jpg`,
    /// `assets/skybox_nx.jpg`, and so on for all six faces.
    pub fn from_prefix(prefix: &str, extension: &str) -> Result<Self, AssetError> {
        let mut loaded = Vec::with_capacity(6);
        for suffix in CUBE_FACE_SUFFIXES {
            let path = format!("{prefix}{suffix}.{extension}");
            loaded.push(ImageData::from_file(&path)?);
        }

        let (width, height) = (loaded[0].width, loaded[0].height);
        for (face, suffix) in loaded.iter().zip(CUBE_FACE_SUFFIXES) {
            if face.width != width || face.height != height {
                return Err(AssetError::InvalidData(format!(
                    "Cubemap face {prefix}{suffix}.{extension} is {}x{}, expected {width}x{height}",
                    face.width, face.height
                )));
            }
        }

        let faces: [ImageData; 6] = loaded
            .try_into()
            .map_err(|_| AssetError::InvalidData("Expected exactly six cubemap faces".into()))?;

        Ok(Self { faces })
    }

    /// Face width in pixels (all faces share dimensions)
    pub fn face_width(&self) -> u32 {
        self.faces[0].width
    }

    /// Face height in pixels (all faces share dimensions)
    pub fn face_height(&self) -> u32 {
        self.faces[0].height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_color_image() {
        let img = ImageData::solid_color(4, 4, [255, 0, 0, 255]);
        assert_eq!(img.width, 4);
        assert_eq!(img.height, 4);
        assert_eq!(img.size_bytes(), 4 * 4 * 4); // 4x4 pixels, 4 bytes each

        // Check first pixel is red
        assert_eq!(&img.data[0..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_missing_image_is_not_found() {
        let result = ImageData::from_file("no/such/texture.png");
        assert!(matches!(result, Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_cube_prefix_missing_faces() {
        let result = CubeImageData::from_prefix("no/such/skybox", "jpg");
        assert!(matches!(result, Err(AssetError::NotFound(_))));
    }
}
