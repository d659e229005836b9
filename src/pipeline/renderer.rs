use crate::core::framebuffer::FrameBuffer;
use crate::core::math::transform::{apply_perspective_division, ndc_to_screen};
use crate::scene::camera::Camera;
use crate::scene::mesh::Mesh;
use nalgebra::{Matrix4, Point2, Vector3};
use std::sync::Arc;

/// One mesh placed in world space, ready for the wireframe pass.
#[derive(Debug, Clone)]
pub struct DrawItem {
    pub mesh: Arc<Mesh>,
    pub model: Matrix4<f32>,
    /// 0RGB
    pub color: u32,
}

/// Draws triangle edges of every item with the camera's projection.
pub struct WireframeRenderer {
    pub framebuffer: FrameBuffer,
}

impl WireframeRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            framebuffer: FrameBuffer::new(width, height),
        }
    }

    pub fn clear_gradient(&mut self, top: Vector3<f32>, bottom: Vector3<f32>) {
        self.framebuffer.clear_gradient(top, bottom);
    }

    pub fn draw(&mut self, camera: &Camera, items: &[DrawItem]) {
        let view_projection = camera.view_projection();
        for item in items {
            self.draw_item(&view_projection, camera.near, item);
        }
    }

    fn draw_item(&mut self, view_projection: &Matrix4<f32>, near: f32, item: &DrawItem) {
        let mvp = view_projection * item.model;
        let width = self.framebuffer.width as f32;
        let height = self.framebuffer.height as f32;

        // Vertices behind the near plane are dropped along with their edges.
        let screen: Vec<Option<Point2<f32>>> = item
            .mesh
            .vertices
            .iter()
            .map(|v| {
                let clip = mvp * v.position.to_homogeneous();
                if clip.w < near {
                    return None;
                }
                let ndc = apply_perspective_division(&clip);
                Some(ndc_to_screen(ndc.x, ndc.y, width, height))
            })
            .collect();

        for (a, b) in item.mesh.edges() {
            let (Some(Some(p0)), Some(Some(p1))) = (screen.get(a), screen.get(b)) else {
                continue;
            };
            self.framebuffer
                .draw_segment(p0.cast::<f64>(), p1.cast::<f64>(), item.color);
        }
    }
}
