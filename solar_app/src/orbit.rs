//! Circular orbit simulation
//!
//! Each orbiting body pairs a scene node with its orbit parameters.
//! Once per frame the angle advances by the body's angular speed and
//! the node is repositioned on its circle:
//!
//! ```text
//! x = radius * sin(angle)
//! z = radius * cos(angle)
//! ```
//!
//! The Y coordinate is left alone, so all orbits lie in the body's own
//! horizontal plane.

use render_engine::prelude::*;

/// A scene node on a fixed circular orbit around the origin
#[derive(Debug, Clone)]
pub struct OrbitalBody {
    /// Node whose position this orbit drives
    pub node: NodeId,
    /// Orbit radius in world units
    pub radius: f32,
    /// Radians advanced per frame; negative values orbit the other way
    pub angular_speed: f32,
    /// Current angle in radians
    pub angle: f32,
}

impl OrbitalBody {
    /// Create a body at angle zero
    pub fn new(node: NodeId, radius: f32, angular_speed: f32) -> Self {
        Self {
            node,
            radius,
            angular_speed,
            angle: 0.0,
        }
    }

    /// Advance the orbit by one frame
    fn advance(&mut self) -> (f32, f32) {
        self.angle += self.angular_speed;
        (self.radius * self.angle.sin(), self.radius * self.angle.cos())
    }
}

/// Advance every orbit by one frame and reposition its scene node
///
/// Bodies whose node has been removed from the scene still accumulate
/// angle but move nothing.
pub fn advance_orbits(bodies: &mut [OrbitalBody], scene: &mut Scene) {
    for body in bodies {
        let (x, z) = body.advance();
        if let Some(node) = scene.node_mut(body.node) {
            node.transform.position.x = x;
            node.transform.position.z = z;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scene_with_body(radius: f32, angular_speed: f32) -> (Scene, Vec<OrbitalBody>) {
        let mut scene = Scene::new();
        let node = scene.add_node(
            SceneNode::new("body", MeshHandle::default(), Material::default())
                .with_position(Vec3::new(radius, 0.0, 0.0)),
        );
        let bodies = vec![OrbitalBody::new(node, radius, angular_speed)];
        (scene, bodies)
    }

    fn position(scene: &Scene, body: &OrbitalBody) -> Vec3 {
        scene.node(body.node).unwrap().transform.position
    }

    #[test]
    fn test_position_stays_on_circle() {
        for radius in [0.0_f32, 1.0, 4.0, 6.0, 123.5] {
            let (mut scene, mut bodies) = scene_with_body(radius, 0.37);
            for _ in 0..50 {
                advance_orbits(&mut bodies, &mut scene);
                let p = position(&scene, &bodies[0]);
                assert_relative_eq!(
                    p.x * p.x + p.z * p.z,
                    radius * radius,
                    epsilon = 1e-3,
                    max_relative = 1e-5
                );
            }
        }
    }

    #[test]
    fn test_angle_accumulates_linearly() {
        let (mut scene, mut bodies) = scene_with_body(4.0, 0.01);
        for _ in 0..250 {
            advance_orbits(&mut bodies, &mut scene);
        }
        assert_relative_eq!(bodies[0].angle, 2.5, epsilon = 1e-5);
    }

    #[test]
    fn test_opposite_speeds_mirror() {
        let mut scene = Scene::new();
        let a = scene.add_node(SceneNode::new("a", MeshHandle::default(), Material::default()));
        let b = scene.add_node(SceneNode::new("b", MeshHandle::default(), Material::default()));
        let mut bodies = vec![
            OrbitalBody::new(a, 5.0, 0.02),
            OrbitalBody::new(b, 5.0, -0.02),
        ];

        for _ in 0..40 {
            advance_orbits(&mut bodies, &mut scene);
        }

        assert_relative_eq!(bodies[0].angle, -bodies[1].angle, epsilon = 1e-6);
        let pa = position(&scene, &bodies[0]);
        let pb = position(&scene, &bodies[1]);
        // Mirrored around the Z axis
        assert_relative_eq!(pa.x, -pb.x, epsilon = 1e-5);
        assert_relative_eq!(pa.z, pb.z, epsilon = 1e-5);
    }

    #[test]
    fn test_zero_speed_is_stationary() {
        let (mut scene, mut bodies) = scene_with_body(4.0, 0.0);
        // One update pins the node onto the circle at angle zero
        advance_orbits(&mut bodies, &mut scene);
        let initial = position(&scene, &bodies[0]);

        for _ in 0..100 {
            advance_orbits(&mut bodies, &mut scene);
        }
        assert_eq!(position(&scene, &bodies[0]), initial);
        assert_eq!(bodies[0].angle, 0.0);
    }

    #[test]
    fn test_single_frame_positions() {
        let (mut scene, mut bodies) = scene_with_body(4.0, 0.01);
        advance_orbits(&mut bodies, &mut scene);

        let p = position(&scene, &bodies[0]);
        assert_relative_eq!(bodies[0].angle, 0.01, epsilon = 1e-7);
        assert_relative_eq!(p.x, 0.039_999_33, epsilon = 1e-6);
        assert_relative_eq!(p.z, 3.999_800_0, epsilon = 1e-6);
    }

    #[test]
    fn test_bodies_update_independently() {
        let mut scene = Scene::new();
        let inner = scene.add_node(SceneNode::new("inner", MeshHandle::default(), Material::default()));
        let outer = scene.add_node(SceneNode::new("outer", MeshHandle::default(), Material::default()));
        let mut bodies = vec![
            OrbitalBody::new(inner, 4.0, 0.01),
            OrbitalBody::new(outer, 6.0, -0.01),
        ];

        for _ in 0..100 {
            advance_orbits(&mut bodies, &mut scene);
        }

        assert_relative_eq!(bodies[0].angle, 1.0, epsilon = 1e-5);
        assert_relative_eq!(bodies[1].angle, -1.0, epsilon = 1e-5);

        let p_inner = position(&scene, &bodies[0]);
        let p_outer = position(&scene, &bodies[1]);
        assert_relative_eq!(p_inner.x.hypot(p_inner.z), 4.0, epsilon = 1e-4);
        assert_relative_eq!(p_outer.x.hypot(p_outer.z), 6.0, epsilon = 1e-4);
    }

    #[test]
    fn test_removed_node_keeps_accumulating_angle() {
        let (mut scene, mut bodies) = scene_with_body(4.0, 0.1);
        scene.remove_node(bodies[0].node);

        for _ in 0..10 {
            advance_orbits(&mut bodies, &mut scene);
        }
        assert_relative_eq!(bodies[0].angle, 1.0, epsilon = 1e-6);
    }
}
