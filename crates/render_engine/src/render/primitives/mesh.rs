//! Mesh representation for 3D models
//!
//! Geometry data structures and procedural builders for the shapes the
//! engine renders. Mesh data is backend-agnostic; GPU upload happens in
//! the backend and returns an opaque handle.

use bytemuck::{Pod, Zeroable};

/// 3D vertex data structure for rendering
///
/// Standard vertex layout with position, normal, and texture
/// coordinates. `#[repr(C)]` keeps the memory layout stable for GPU
/// buffer uploads.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in 3D space
    pub position: [f32; 3],

    /// Normal vector
    pub normal: [f32; 3],

    /// Texture coordinates
    pub tex_coord: [f32; 2],
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }
}

/// 3D mesh containing vertices and indices for rendering
///
/// The primary geometry container used by the rendering system. Indices
/// form counter-clockwise triangles when viewed from the outside, except
/// for the skybox, whose interior faces the camera.
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Vertex data
    pub vertices: Vec<Vertex>,

    /// Index data for triangles
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a new mesh
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Create a UV sphere centered at the origin
    ///
    /// `segments` controls tessellation: the sphere has `segments`
    /// latitude stacks and `2 * segments` longitude slices, so segment
    /// counts carry the same visual weight as in common scene toolkits.
    /// `diameter` is the full sphere diameter.
    ///
    /// Vertex count is `(segments + 1) * (2 * segments + 1)`; the seam
    /// column and both poles are duplicated for clean texture wrapping.
    pub fn sphere(segments: u32, diameter: f32) -> Self {
        let stacks = segments.max(2);
        let slices = (segments * 2).max(3);
        let radius = diameter * 0.5;

        let mut vertices =
            Vec::with_capacity(((stacks + 1) * (slices + 1)) as usize);
        for stack in 0..=stacks {
            // Polar angle from the +Y pole
            let phi = std::f32::consts::PI * stack as f32 / stacks as f32;
            let y = phi.cos();
            let ring_radius = phi.sin();

            for slice in 0..=slices {
                let theta = std::f32::consts::TAU * slice as f32 / slices as f32;
                let x = ring_radius * theta.sin();
                let z = ring_radius * theta.cos();

                vertices.push(Vertex::new(
                    [x * radius, y * radius, z * radius],
                    [x, y, z],
                    [
                        slice as f32 / slices as f32,
                        stack as f32 / stacks as f32,
                    ],
                ));
            }
        }

        let mut indices = Vec::with_capacity((stacks * slices * 6) as usize);
        for stack in 0..stacks {
            for slice in 0..slices {
                let a = stack * (slices + 1) + slice;
                let b = a + slices + 1;

                // Counter-clockwise when viewed from outside the sphere
                indices.extend_from_slice(&[a, b, a + 1]);
                indices.extend_from_slice(&[a + 1, b, b + 1]);
            }
        }

        Self::new(vertices, indices)
    }

    /// Create a skybox cube mesh with the given edge size
    ///
    /// The cube is centered at the origin with interior faces visible
    /// (normals point inward, winding reversed), since the camera sits
    /// inside it. The backend samples the skybox cubemap by direction,
    /// so no special UV layout is needed.
    pub fn skybox(size: f32) -> Self {
        let s = size * 0.5;

        let vertices = vec![
            // Front face (+Z), normal inward
            Vertex::new([-s, -s, s], [0.0, 0.0, -1.0], [0.0, 0.0]),
            Vertex::new([s, -s, s], [0.0, 0.0, -1.0], [1.0, 0.0]),
            Vertex::new([s, s, s], [0.0, 0.0, -1.0], [1.0, 1.0]),
            Vertex::new([-s, s, s], [0.0, 0.0, -1.0], [0.0, 1.0]),
            // Back face (-Z)
            Vertex::new([s, -s, -s], [0.0, 0.0, 1.0], [0.0, 0.0]),
            Vertex::new([-s, -s, -s], [0.0, 0.0, 1.0], [1.0, 0.0]),
            Vertex::new([-s, s, -s], [0.0, 0.0, 1.0], [1.0, 1.0]),
            Vertex::new([s, s, -s], [0.0, 0.0, 1.0], [0.0, 1.0]),
            // Left face (-X)
            Vertex::new([-s, -s, -s], [1.0, 0.0, 0.0], [0.0, 0.0]),
            Vertex::new([-s, -s, s], [1.0, 0.0, 0.0], [1.0, 0.0]),
            Vertex::new([-s, s, s], [1.0, 0.0, 0.0], [1.0, 1.0]),
            Vertex::new([-s, s, -s], [1.0, 0.0, 0.0], [0.0, 1.0]),
            // Right face (+X)
            Vertex::new([s, -s, s], [-1.0, 0.0, 0.0], [0.0, 0.0]),
            Vertex::new([s, -s, -s], [-1.0, 0.0, 0.0], [1.0, 0.0]),
            Vertex::new([s, s, -s], [-1.0, 0.0, 0.0], [1.0, 1.0]),
            Vertex::new([s, s, s], [-1.0, 0.0, 0.0], [0.0, 1.0]),
            // Top face (+Y)
            Vertex::new([-s, s, s], [0.0, -1.0, 0.0], [0.0, 0.0]),
            Vertex::new([s, s, s], [0.0, -1.0, 0.0], [1.0, 0.0]),
            Vertex::new([s, s, -s], [0.0, -1.0, 0.0], [1.0, 1.0]),
            Vertex::new([-s, s, -s], [0.0, -1.0, 0.0], [0.0, 1.0]),
            // Bottom face (-Y)
            Vertex::new([-s, -s, -s], [0.0, 1.0, 0.0], [0.0, 0.0]),
            Vertex::new([s, -s, -s], [0.0, 1.0, 0.0], [1.0, 0.0]),
            Vertex::new([s, -s, s], [0.0, 1.0, 0.0], [1.0, 1.0]),
            Vertex::new([-s, -s, s], [0.0, 1.0, 0.0], [0.0, 1.0]),
        ];

        // Reversed winding order for viewing from inside the cube
        let indices = vec![
            0, 3, 2, 2, 1, 0, // front
            4, 7, 6, 6, 5, 4, // back
            8, 11, 10, 10, 9, 8, // left
            12, 15, 14, 14, 13, 12, // right
            16, 19, 18, 18, 17, 16, // top
            20, 23, 22, 22, 21, 20, // bottom
        ];

        Self::new(vertices, indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sphere_structure() {
        let sphere = Mesh::sphere(16, 1.0);

        // (stacks + 1) * (slices + 1) vertices, 6 indices per quad
        assert_eq!(sphere.vertices.len(), 17 * 33);
        assert_eq!(sphere.indices.len(), 16 * 32 * 6);

        for &idx in &sphere.indices {
            assert!(idx < sphere.vertices.len() as u32, "Index {idx} is out of bounds");
        }
    }

    #[test]
    fn test_sphere_vertices_on_surface() {
        let diameter = 4.0;
        let sphere = Mesh::sphere(24, diameter);
        let radius = diameter / 2.0;

        for vertex in &sphere.vertices {
            let [x, y, z] = vertex.position;
            let distance = (x * x + y * y + z * z).sqrt();
            assert_relative_eq!(distance, radius, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_sphere_tex_coords_cover_unit_square() {
        let sphere = Mesh::sphere(16, 1.0);

        for vertex in &sphere.vertices {
            let [u, v] = vertex.tex_coord;
            assert!((0.0..=1.0).contains(&u), "U coordinate {u} out of range");
            assert!((0.0..=1.0).contains(&v), "V coordinate {v} out of range");
        }

        // The seam column closes the wrap at u = 1
        let max_u = sphere
            .vertices
            .iter()
            .map(|v| v.tex_coord[0])
            .fold(0.0_f32, f32::max);
        assert_relative_eq!(max_u, 1.0);
    }

    #[test]
    fn test_sphere_normals_are_unit_radial() {
        let sphere = Mesh::sphere(8, 2.0);

        for vertex in &sphere.vertices {
            let [nx, ny, nz] = vertex.normal;
            let length = (nx * nx + ny * ny + nz * nz).sqrt();
            assert_relative_eq!(length, 1.0, epsilon = 1e-4);

            // Normal is radial: parallel to the position vector
            let [x, y, z] = vertex.position;
            assert_relative_eq!(x, nx, epsilon = 1e-4);
            assert_relative_eq!(y, ny, epsilon = 1e-4);
            assert_relative_eq!(z, nz, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_skybox_mesh_structure() {
        let skybox = Mesh::skybox(1000.0);

        // 4 vertices per face * 6 faces, 2 triangles per face
        assert_eq!(skybox.vertices.len(), 24, "Skybox should have 24 vertices");
        assert_eq!(skybox.indices.len(), 36, "Skybox should have 36 indices");

        for &idx in &skybox.indices {
            assert!(idx < skybox.vertices.len() as u32, "Index {idx} is out of bounds");
        }
    }

    #[test]
    fn test_skybox_size() {
        let skybox = Mesh::skybox(1000.0);
        let half = 500.0;

        for vertex in &skybox.vertices {
            let pos = vertex.position;
            assert!(pos[0].abs() == half, "X coordinate should be ±{half}");
            assert!(pos[1].abs() == half, "Y coordinate should be ±{half}");
            assert!(pos[2].abs() == half, "Z coordinate should be ±{half}");
        }
    }

    #[test]
    fn test_skybox_normals_point_inward() {
        let skybox = Mesh::skybox(100.0);

        // Front face (+Z) should have normals pointing in -Z direction
        assert!(skybox.vertices[0].normal[2] < 0.0, "Front face normal should point inward (-Z)");
        // Back face (-Z) should have normals pointing in +Z direction
        assert!(skybox.vertices[4].normal[2] > 0.0, "Back face normal should point inward (+Z)");
        // Left face (-X) should have normals pointing in +X direction
        assert!(skybox.vertices[8].normal[0] > 0.0, "Left face normal should point inward (+X)");
        // Right face (+X) should have normals pointing in -X direction
        assert!(skybox.vertices[12].normal[0] < 0.0, "Right face normal should point inward (-X)");
    }
}
