//! Surface materials
//!
//! A [`Material`] describes the shaded appearance of a mesh: diffuse,
//! specular, and emissive terms, an optional texture for the diffuse or
//! emissive channel, and the face-culling mode. The renderer packs it
//! into a [`MaterialUbo`] when recording draws.

use bytemuck::{Pod, Zeroable};

use crate::foundation::math::Vec3;
use crate::render::api::TextureHandle;

/// Shaded appearance of a mesh
#[derive(Debug, Clone)]
pub struct Material {
    /// Diffuse reflectance color
    pub diffuse_color: Vec3,
    /// Specular reflectance color
    pub specular_color: Vec3,
    /// Self-illumination color, unaffected by lights
    pub emissive_color: Vec3,
    /// Specular exponent
    pub shininess: f32,
    /// Texture modulating the diffuse term
    pub diffuse_texture: Option<TextureHandle>,
    /// Texture providing the emissive term
    pub emissive_texture: Option<TextureHandle>,
    /// Whether back faces are culled; disable for inside-out geometry
    pub back_face_culling: bool,
}

impl Material {
    /// Plain lit material with the given diffuse color
    pub fn lit(diffuse_color: Vec3) -> Self {
        Self {
            diffuse_color,
            ..Self::default()
        }
    }

    /// Lit material sampling `texture` for its diffuse term
    pub fn textured(texture: TextureHandle) -> Self {
        Self {
            diffuse_texture: Some(texture),
            ..Self::default()
        }
    }

    /// Self-illuminated material sampling `texture` for its emissive term
    ///
    /// Diffuse and specular are black, so scene lights do not affect it.
    pub fn emissive_textured(texture: TextureHandle) -> Self {
        Self {
            diffuse_color: Vec3::zeros(),
            specular_color: Vec3::zeros(),
            emissive_texture: Some(texture),
            ..Self::default()
        }
    }

    /// Set the specular color
    #[must_use]
    pub fn with_specular(mut self, specular_color: Vec3) -> Self {
        self.specular_color = specular_color;
        self
    }

    /// Set the emissive color
    #[must_use]
    pub fn with_emissive(mut self, emissive_color: Vec3) -> Self {
        self.emissive_color = emissive_color;
        self
    }

    /// Set the face-culling mode
    #[must_use]
    pub fn with_back_face_culling(mut self, enabled: bool) -> Self {
        self.back_face_culling = enabled;
        self
    }

    /// Texture the renderer binds for this material, if any
    ///
    /// A material samples at most one texture per draw; the diffuse
    /// channel takes precedence when both are set.
    pub fn bound_texture(&self) -> Option<TextureHandle> {
        self.diffuse_texture.or(self.emissive_texture)
    }

    /// Pack shading parameters into the GPU block
    pub fn to_ubo(&self) -> MaterialUbo {
        let use_diffuse_texture = self.diffuse_texture.is_some();
        let use_emissive_texture = !use_diffuse_texture && self.emissive_texture.is_some();
        MaterialUbo {
            diffuse: [
                self.diffuse_color.x,
                self.diffuse_color.y,
                self.diffuse_color.z,
                1.0,
            ],
            specular: [
                self.specular_color.x,
                self.specular_color.y,
                self.specular_color.z,
                self.shininess,
            ],
            emissive: [
                self.emissive_color.x,
                self.emissive_color.y,
                self.emissive_color.z,
                1.0,
            ],
            flags: [u32::from(use_diffuse_texture), u32::from(use_emissive_texture), 0, 0],
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse_color: Vec3::new(1.0, 1.0, 1.0),
            specular_color: Vec3::new(1.0, 1.0, 1.0),
            emissive_color: Vec3::zeros(),
            shininess: 32.0,
            diffuse_texture: None,
            emissive_texture: None,
            back_face_culling: true,
        }
    }
}

/// Packed material block matching the shader uniform layout
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct MaterialUbo {
    /// Diffuse color (w unused)
    pub diffuse: [f32; 4],
    /// Specular color in xyz, shininess in w
    pub specular: [f32; 4],
    /// Emissive color (w unused)
    pub emissive: [f32; 4],
    /// x = sample bound texture for diffuse, y = for emissive
    pub flags: [u32; 4],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emissive_textured_disables_lighting_terms() {
        let handle = TextureHandle::default();
        let material = Material::emissive_textured(handle);
        assert_eq!(material.diffuse_color, Vec3::zeros());
        assert_eq!(material.specular_color, Vec3::zeros());

        let ubo = material.to_ubo();
        assert_eq!(ubo.flags[0], 0);
        assert_eq!(ubo.flags[1], 1);
    }

    #[test]
    fn test_diffuse_texture_takes_precedence() {
        let handle = TextureHandle::default();
        let material = Material {
            diffuse_texture: Some(handle),
            emissive_texture: Some(handle),
            ..Material::default()
        };
        let ubo = material.to_ubo();
        assert_eq!(ubo.flags[0], 1);
        assert_eq!(ubo.flags[1], 0);
    }

    #[test]
    fn test_ubo_size_is_vec4_aligned() {
        assert_eq!(std::mem::size_of::<MaterialUbo>(), 64);
    }
}
