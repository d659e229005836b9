use crate::core::bounds::BoundingBox;
use crate::core::math::transform::{TransformFactory, transform_point};
use crate::scene::mesh::Mesh;
use nalgebra::{Matrix4, Vector3};
use std::sync::Arc;

/// Local placement of a node relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    /// XYZ euler angles in radians.
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: Vector3::zeros(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    pub fn from_position(position: Vector3<f32>) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        TransformFactory::trs(&self.position, &self.rotation, &self.scale)
    }
}

/// A node of a loaded asset's scene graph.
///
/// Cloning a node deep-copies the hierarchy and transforms while mesh buffers
/// stay shared behind their `Arc`, so a clone can be repositioned freely
/// without touching the graph it came from.
#[derive(Debug, Clone, Default)]
pub struct SceneNode {
    pub name: String,
    pub transform: Transform,
    pub mesh: Option<Arc<Mesh>>,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_mesh(name: impl Into<String>, mesh: Mesh) -> Self {
        Self {
            name: name.into(),
            mesh: Some(Arc::new(mesh)),
            ..Default::default()
        }
    }

    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    /// Depth-first walk, handing each node its accumulated matrix
    /// (`parent` times every local transform down to and including the node).
    pub fn visit<F>(&self, parent: &Matrix4<f32>, f: &mut F)
    where
        F: FnMut(&SceneNode, &Matrix4<f32>),
    {
        let world = parent * self.transform.matrix();
        f(self, &world);
        for child in &self.children {
            child.visit(&world, f);
        }
    }

    /// Bounds of every vertex in the graph, expressed in `parent` space.
    pub fn bounds_in(&self, parent: &Matrix4<f32>) -> Option<BoundingBox> {
        let mut bounds: Option<BoundingBox> = None;
        self.visit(parent, &mut |node, world| {
            let Some(mesh) = &node.mesh else {
                return;
            };
            let points: Vec<_> = mesh
                .vertices
                .iter()
                .map(|v| transform_point(world, &v.position))
                .collect();
            if let Some(local) = BoundingBox::from_points(&points) {
                bounds = Some(bounds.map_or(local, |b| b.union(&local)));
            }
        });
        bounds
    }

    /// Bounds in the space of this node's parent.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.bounds_in(&Matrix4::identity())
    }

    pub fn mesh_count(&self) -> usize {
        let mut count = 0;
        self.visit(&Matrix4::identity(), &mut |node, _| {
            if node.mesh.is_some() {
                count += 1;
            }
        });
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn child_transforms_compose() {
        let mut child = SceneNode::with_mesh("cube", Mesh::create_box(2.0, 2.0, 2.0));
        child.transform.position = Vector3::new(10.0, 0.0, 0.0);
        let mut root = SceneNode::new("root").with_child(child);
        root.transform.scale = Vector3::new(2.0, 2.0, 2.0);

        let b = root.bounds().unwrap();
        assert!((b.min - Point3::new(18.0, -2.0, -2.0)).norm() < 1e-5);
        assert!((b.max - Point3::new(22.0, 2.0, 2.0)).norm() < 1e-5);
    }

    #[test]
    fn clone_shares_mesh_but_not_transform() {
        let original = SceneNode::with_mesh("tri", Mesh::create_test_triangle());
        let mut copy = original.clone();
        copy.transform.position.x = 5.0;

        assert_eq!(original.transform.position.x, 0.0);
        assert!(Arc::ptr_eq(
            original.mesh.as_ref().unwrap(),
            copy.mesh.as_ref().unwrap()
        ));
    }

    #[test]
    fn graph_without_meshes_has_no_bounds() {
        let root = SceneNode::new("empty").with_child(SceneNode::new("group"));
        assert!(root.bounds().is_none());
        assert_eq!(root.mesh_count(), 0);
    }
}
