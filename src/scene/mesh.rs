use crate::core::bounds::BoundingBox;
use crate::core::geometry::Vertex;
use nalgebra::{Point3, Vector3};

/// A collection of vertices and indices representing a 3D object.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    /// 3 indices per triangle.
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Object-space bounds, `None` for a mesh without vertices.
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.vertices.iter().map(|v| &v.position))
    }

    /// Iterates triangle edges as index pairs. Shared edges are visited twice.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.indices.chunks_exact(3).flat_map(|tri| {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            [(a, b), (b, c), (c, a)]
        })
    }

    /// Simple CCW triangle, used when a model file is unusable.
    pub fn create_test_triangle() -> Self {
        let normal = Vector3::z();
        let vertices = vec![
            Vertex::new(Point3::new(0.0, 0.5, 0.0), normal),
            Vertex::new(Point3::new(-0.5, -0.5, 0.0), normal),
            Vertex::new(Point3::new(0.5, -0.5, 0.0), normal),
        ];
        Self::new(vertices, vec![0, 1, 2])
    }

    /// Rectangle in the XY plane facing +Z, centered on the origin.
    pub fn create_plane(width: f32, height: f32) -> Self {
        let hw = width / 2.0;
        let hh = height / 2.0;
        let normal = Vector3::z();
        let vertices = vec![
            Vertex::new(Point3::new(-hw, -hh, 0.0), normal),
            Vertex::new(Point3::new(hw, -hh, 0.0), normal),
            Vertex::new(Point3::new(hw, hh, 0.0), normal),
            Vertex::new(Point3::new(-hw, hh, 0.0), normal),
        ];
        Self::new(vertices, vec![0, 1, 2, 0, 2, 3])
    }

    /// Axis-aligned box centered on the origin, 4 vertices per face.
    pub fn create_box(width: f32, height: f32, depth: f32) -> Self {
        let h = Vector3::new(width / 2.0, height / 2.0, depth / 2.0);
        // (normal, two in-plane axes); corners are normal +- u +- v
        let faces = [
            (Vector3::x(), Vector3::y(), Vector3::z()),
            (-Vector3::x(), Vector3::z(), Vector3::y()),
            (Vector3::y(), Vector3::z(), Vector3::x()),
            (-Vector3::y(), Vector3::x(), Vector3::z()),
            (Vector3::z(), Vector3::x(), Vector3::y()),
            (-Vector3::z(), Vector3::y(), Vector3::x()),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (normal, u, v) in faces {
            let base = vertices.len() as u32;
            for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                let p = normal + u * su + v * sv;
                vertices.push(Vertex::new(Point3::from(p.component_mul(&h)), normal));
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        Self::new(vertices, indices)
    }
}
