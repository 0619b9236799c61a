//! Rendering systems
//!
//! Frame-level systems that gather scene state into GPU-ready form.

mod lighting;

pub use lighting::{
    FrameLightData, Light, LightingEnvironment, PointLightData, MAX_POINT_LIGHTS,
};
