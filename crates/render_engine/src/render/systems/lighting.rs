//! Light sources and per-frame light packing
//!
//! Scene code works with the [`Light`] enum; the renderer packs the
//! collected lights into [`FrameLightData`], a std140-compatible block
//! uploaded once per frame.

use bytemuck::{Pod, Zeroable};

use crate::foundation::math::Vec3;

/// Maximum number of point lights packed into a single frame
pub const MAX_POINT_LIGHTS: usize = 4;

/// Default distance attenuation coefficients (constant, linear, quadratic)
const POINT_ATTENUATION: (f32, f32, f32) = (1.0, 0.09, 0.032);

/// A light source in the scene
#[derive(Debug, Clone)]
pub enum Light {
    /// Ambient-style light arriving from a hemisphere around `direction`
    ///
    /// Surfaces facing the direction receive `color`, surfaces facing
    /// away receive `ground_color`, with a smooth blend in between.
    Hemispheric {
        /// Direction the hemisphere faces, typically straight up
        direction: Vec3,
        /// Sky color at full intensity
        color: Vec3,
        /// Color lighting surfaces that face away from `direction`
        ground_color: Vec3,
        /// Overall intensity multiplier
        intensity: f32,
    },

    /// Omnidirectional light radiating from a point
    Point {
        /// Light position in world space
        position: Vec3,
        /// Light color
        color: Vec3,
        /// Overall intensity multiplier
        intensity: f32,
    },

    /// Parallel rays from an infinitely distant source
    Directional {
        /// Direction the light travels, toward the scene
        direction: Vec3,
        /// Light color
        color: Vec3,
        /// Overall intensity multiplier
        intensity: f32,
    },
}

impl Light {
    /// White hemispheric light facing up with a neutral ground color
    pub fn hemispheric(direction: Vec3, intensity: f32) -> Self {
        Self::Hemispheric {
            direction,
            color: Vec3::new(1.0, 1.0, 1.0),
            ground_color: Vec3::new(0.2, 0.2, 0.2),
            intensity,
        }
    }

    /// White point light at `position`
    pub fn point(position: Vec3, intensity: f32) -> Self {
        Self::Point {
            position,
            color: Vec3::new(1.0, 1.0, 1.0),
            intensity,
        }
    }
}

/// All lights affecting the current frame
#[derive(Debug, Clone, Default)]
pub struct LightingEnvironment {
    lights: Vec<Light>,
}

impl LightingEnvironment {
    /// Create an empty lighting environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a light to the environment
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Remove all lights
    pub fn clear(&mut self) {
        self.lights.clear();
    }

    /// Number of lights in the environment
    pub fn len(&self) -> usize {
        self.lights.len()
    }

    /// Whether the environment has no lights
    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    /// Iterate over the lights
    pub fn iter(&self) -> impl Iterator<Item = &Light> {
        self.lights.iter()
    }

    /// Pack the environment into the per-frame GPU block
    ///
    /// Point lights beyond [`MAX_POINT_LIGHTS`] are dropped with a
    /// warning. Multiple hemispheric or directional lights accumulate
    /// into the single slot each has in the block.
    pub fn pack(&self, camera_position: Vec3) -> FrameLightData {
        let mut data = FrameLightData::zeroed();
        data.camera_position = [camera_position.x, camera_position.y, camera_position.z, 1.0];

        let mut point_count = 0usize;
        let mut has_hemispheric = false;
        let mut has_directional = false;
        for light in &self.lights {
            match light {
                Light::Hemispheric {
                    direction,
                    color,
                    ground_color,
                    intensity,
                } => {
                    let dir = direction.normalize();
                    data.hemi_direction = [dir.x, dir.y, dir.z, 0.0];
                    let sky = color * *intensity;
                    let ground = ground_color * *intensity;
                    data.hemi_sky_color = [sky.x, sky.y, sky.z, 1.0];
                    data.hemi_ground_color = [ground.x, ground.y, ground.z, 1.0];
                    has_hemispheric = true;
                }
                Light::Point {
                    position,
                    color,
                    intensity,
                } => {
                    if point_count >= MAX_POINT_LIGHTS {
                        log::warn!(
                            "Dropping point light beyond the limit of {}",
                            MAX_POINT_LIGHTS
                        );
                        continue;
                    }
                    let (constant, linear, quadratic) = POINT_ATTENUATION;
                    data.point_lights[point_count] = PointLightData {
                        position: [position.x, position.y, position.z, 1.0],
                        color: [color.x, color.y, color.z, *intensity],
                        attenuation: [constant, linear, quadratic, 0.0],
                        _padding: [0.0; 4],
                    };
                    point_count += 1;
                }
                Light::Directional {
                    direction,
                    color,
                    intensity,
                } => {
                    let dir = direction.normalize();
                    data.directional_direction = [dir.x, dir.y, dir.z, 0.0];
                    let scaled = color * *intensity;
                    data.directional_color = [scaled.x, scaled.y, scaled.z, 1.0];
                    has_directional = true;
                }
            }
        }

        data.counts = [
            point_count as u32,
            u32::from(has_directional),
            u32::from(has_hemispheric),
            0,
        ];
        data
    }
}

/// Per-frame light block matching the shader uniform layout
///
/// All fields are vec4-aligned so the struct is valid std140 without
/// compiler-inserted padding.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct FrameLightData {
    /// Camera position (w unused)
    pub camera_position: [f32; 4],
    /// Hemispheric light direction (w unused)
    pub hemi_direction: [f32; 4],
    /// Hemispheric sky color scaled by intensity
    pub hemi_sky_color: [f32; 4],
    /// Hemispheric ground color scaled by intensity
    pub hemi_ground_color: [f32; 4],
    /// Directional light travel direction (w unused)
    pub directional_direction: [f32; 4],
    /// Directional light color scaled by intensity
    pub directional_color: [f32; 4],
    /// Packed point lights; only the first `counts[0]` entries are live
    pub point_lights: [PointLightData; MAX_POINT_LIGHTS],
    /// x = point light count, y = directional present, z = hemispheric present
    pub counts: [u32; 4],
}

/// A single packed point light
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct PointLightData {
    /// World-space position (w unused)
    pub position: [f32; 4],
    /// Color in xyz, intensity in w
    pub color: [f32; 4],
    /// Constant, linear, quadratic attenuation coefficients (w unused)
    pub attenuation: [f32; 4],
    /// Pads the struct to a 16-byte multiple
    pub _padding: [f32; 4],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_point_light() {
        let mut env = LightingEnvironment::new();
        env.add_light(Light::point(Vec3::new(1.0, 2.0, 3.0), 2.0));

        let data = env.pack(Vec3::zeros());
        assert_eq!(data.counts[0], 1);
        assert_eq!(data.point_lights[0].position, [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(data.point_lights[0].color[3], 2.0);
    }

    #[test]
    fn test_pack_hemispheric_scales_by_intensity() {
        let mut env = LightingEnvironment::new();
        env.add_light(Light::Hemispheric {
            direction: Vec3::new(0.0, 2.0, 0.0),
            color: Vec3::new(1.0, 1.0, 1.0),
            ground_color: Vec3::new(0.0, 0.0, 1.0),
            intensity: 0.5,
        });

        let data = env.pack(Vec3::zeros());
        // Direction is normalized before packing
        assert_eq!(data.hemi_direction, [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(data.hemi_sky_color, [0.5, 0.5, 0.5, 1.0]);
        assert_eq!(data.hemi_ground_color, [0.0, 0.0, 0.5, 1.0]);
        assert_eq!(data.counts[2], 1);
    }

    #[test]
    fn test_excess_point_lights_are_dropped() {
        let mut env = LightingEnvironment::new();
        for i in 0..(MAX_POINT_LIGHTS + 2) {
            env.add_light(Light::point(Vec3::new(i as f32, 0.0, 0.0), 1.0));
        }

        let data = env.pack(Vec3::zeros());
        assert_eq!(data.counts[0] as usize, MAX_POINT_LIGHTS);
    }

    #[test]
    fn test_frame_light_data_size_is_vec4_aligned() {
        assert_eq!(std::mem::size_of::<FrameLightData>() % 16, 0);
        assert_eq!(std::mem::size_of::<PointLightData>(), 64);
    }
}
