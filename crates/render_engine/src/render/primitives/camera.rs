//! Camera types
//!
//! A perspective camera plus the arc-rotate controller that drives it
//! from pointer input. Matrix math follows right-handed, Y-up view
//! space conventions with depth mapped to [0, 1].

use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};

/// Smallest allowed polar angle distance from the poles
///
/// Keeps the up vector and the view direction from becoming parallel.
const BETA_EPSILON: f32 = 0.01;

/// 3D perspective camera
///
/// Position, look-at target, and projection parameters. Matrices are
/// computed on demand rather than cached.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,

    /// Point the camera is looking at in world space
    pub target: Vec3,

    /// Up vector for camera orientation (typically [0, 1, 0])
    pub up: Vec3,

    /// Field of view angle in radians
    pub fov: f32,

    /// Aspect ratio (width / height) for projection calculations
    pub aspect: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,
}

impl Camera {
    /// Create a new perspective camera looking at the origin
    ///
    /// `fov_degrees` is converted to radians internally.
    pub fn perspective(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            target: Vec3::zeros(),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov: utils::deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
        }
    }

    /// Update camera position in world space
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Configure camera to look at a specific point with a custom up vector
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        self.target = target;
        self.up = up;
    }

    /// Update camera aspect ratio for viewport changes
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if (self.aspect - aspect).abs() > 0.01 {
            log::debug!("Camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }

    /// Generate the world-to-camera view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.target, self.up)
    }

    /// Generate the perspective projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov, self.aspect, self.near, self.far)
    }

    /// Generate the combined view-projection matrix
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// View-projection matrix with the view translation removed
    ///
    /// Used for the skybox, which must appear infinitely distant: only
    /// the camera's rotation applies.
    pub fn skybox_view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix().without_translation()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 3.0, 10.0),
            target: Vec3::zeros(),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov: std::f32::consts::FRAC_PI_4,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 2000.0,
        }
    }
}

/// Arc-rotate camera controller
///
/// Orbits a target point on a sphere parameterized by longitude
/// (`alpha`), polar angle (`beta`, measured from +Y), and distance
/// (`radius`). Pointer drag adjusts the angles, wheel zoom adjusts the
/// radius within the configured limits.
#[derive(Debug, Clone)]
pub struct ArcRotateCamera {
    /// Longitude angle around the Y axis, in radians
    pub alpha: f32,
    /// Polar angle from the +Y axis, in radians; clamped away from the poles
    pub beta: f32,
    /// Distance from the target
    pub radius: f32,
    /// Orbit center in world space
    pub target: Vec3,
    /// Smallest allowed radius
    pub lower_radius_limit: f32,
    /// Largest allowed radius (maximum zoom-out), if any
    pub upper_radius_limit: Option<f32>,
    /// Radians of rotation per pixel of pointer drag
    pub rotate_speed: f32,
    /// Radius change per scroll step
    pub zoom_speed: f32,
}

impl ArcRotateCamera {
    /// Create a controller orbiting `target`
    pub fn new(alpha: f32, beta: f32, radius: f32, target: Vec3) -> Self {
        Self {
            alpha,
            beta: clamp_beta(beta),
            radius: radius.max(0.0),
            target,
            lower_radius_limit: 1.0,
            upper_radius_limit: None,
            rotate_speed: 0.005,
            zoom_speed: 1.0,
        }
    }

    /// Set the maximum zoom-out distance
    pub fn with_upper_radius_limit(mut self, limit: f32) -> Self {
        self.upper_radius_limit = Some(limit);
        self.radius = self.radius.min(limit);
        self
    }

    /// Apply a pointer-drag delta in pixels
    pub fn rotate(&mut self, delta_x: f32, delta_y: f32) {
        self.alpha -= delta_x * self.rotate_speed;
        self.beta = clamp_beta(self.beta - delta_y * self.rotate_speed);
    }

    /// Apply a scroll-wheel zoom; positive steps zoom in
    pub fn zoom(&mut self, steps: f32) {
        let mut radius = self.radius - steps * self.zoom_speed;
        radius = radius.max(self.lower_radius_limit);
        if let Some(limit) = self.upper_radius_limit {
            radius = radius.min(limit);
        }
        self.radius = radius;
    }

    /// Current camera position on the orbit sphere
    pub fn position(&self) -> Vec3 {
        let sin_beta = self.beta.sin();
        self.target
            + self.radius
                * Vec3::new(
                    sin_beta * self.alpha.sin(),
                    self.beta.cos(),
                    sin_beta * self.alpha.cos(),
                )
    }

    /// Write this controller's orbit state into a camera
    pub fn apply_to(&self, camera: &mut Camera) {
        camera.set_position(self.position());
        camera.look_at(self.target, Vec3::new(0.0, 1.0, 0.0));
    }
}

fn clamp_beta(beta: f32) -> f32 {
    utils::clamp(beta, BETA_EPSILON, std::f32::consts::PI - BETA_EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_arc_rotate_position_distance() {
        let controller = ArcRotateCamera::new(0.7, 1.2, 15.0, Vec3::zeros());
        let position = controller.position();
        assert_relative_eq!(position.norm(), 15.0, epsilon = 1e-4);
    }

    #[test]
    fn test_arc_rotate_equator_position() {
        // beta = pi/2, alpha = 0 places the camera on the +Z axis
        let controller =
            ArcRotateCamera::new(0.0, std::f32::consts::FRAC_PI_2, 10.0, Vec3::zeros());
        let position = controller.position();
        assert_relative_eq!(position.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(position.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(position.z, 10.0, epsilon = 1e-4);
    }

    #[test]
    fn test_beta_is_clamped_away_from_poles() {
        let mut controller = ArcRotateCamera::new(0.0, 0.0, 15.0, Vec3::zeros());
        assert!(controller.beta >= BETA_EPSILON);

        // Dragging far past the pole stays clamped
        controller.rotate(0.0, 1.0e6);
        assert!(controller.beta >= BETA_EPSILON);
        assert!(controller.beta <= std::f32::consts::PI - BETA_EPSILON);
    }

    #[test]
    fn test_zoom_respects_radius_limits() {
        let mut controller =
            ArcRotateCamera::new(0.0, 1.0, 15.0, Vec3::zeros()).with_upper_radius_limit(50.0);

        controller.zoom(-1000.0); // zoom out hard
        assert_relative_eq!(controller.radius, 50.0);

        controller.zoom(1000.0); // zoom in hard
        assert_relative_eq!(controller.radius, controller.lower_radius_limit);
    }

    #[test]
    fn test_apply_to_updates_camera() {
        let controller =
            ArcRotateCamera::new(0.0, std::f32::consts::FRAC_PI_2, 8.0, Vec3::zeros());
        let mut camera = Camera::default();
        controller.apply_to(&mut camera);
        assert_relative_eq!(camera.position.z, 8.0, epsilon = 1e-4);
        assert_eq!(camera.target, Vec3::zeros());
    }
}
