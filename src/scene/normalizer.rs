use crate::core::bounds::BoundingBox;
use crate::core::math::transform::TransformFactory;
use crate::scene::node::SceneNode;
use log::debug;
use nalgebra::{Matrix4, Vector3};

/// A private copy of a loaded asset, fitted to a standard size.
///
/// The placement is `scale * (p + offset)`: the graph is first shifted so its
/// bounding box center sits on the origin, then scaled uniformly about the
/// origin. The result can be dropped into any parent without further
/// adjustment.
#[derive(Debug, Clone)]
pub struct NormalizedAsset {
    pub node: SceneNode,
    /// `-center` of the source bounds.
    pub offset: Vector3<f32>,
    pub scale: f32,
}

impl NormalizedAsset {
    pub fn matrix(&self) -> Matrix4<f32> {
        TransformFactory::scaling(self.scale) * TransformFactory::translation(&self.offset)
    }

    /// Bounds after normalization, in the space the asset is placed into.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.node.bounds_in(&self.matrix())
    }
}

/// Centers and rescales arbitrary assets so their largest side equals
/// `target_size`.
#[derive(Debug, Clone, Copy)]
pub struct AssetNormalizer {
    pub target_size: f32,
}

impl AssetNormalizer {
    pub fn new(target_size: f32) -> Self {
        Self { target_size }
    }

    /// Returns `None` when the graph has no vertices at all; callers render
    /// nothing for that slot.
    ///
    /// A zero-size graph (every vertex on one point) is centered but keeps a
    /// scale of 1.
    pub fn normalize(&self, source: &SceneNode) -> Option<NormalizedAsset> {
        let node = source.clone();
        let bounds = node.bounds()?;

        let offset = -bounds.center().coords;
        let max_dimension = bounds.max_dimension();
        let scale = if bounds.is_degenerate() {
            1.0
        } else {
            self.target_size / max_dimension
        };

        debug!(
            "Normalized '{}': center {:?}, max dimension {:.4}, scale {:.4}",
            node.name,
            bounds.center(),
            max_dimension,
            scale
        );

        Some(NormalizedAsset {
            node,
            offset,
            scale,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Vertex;
    use crate::scene::mesh::Mesh;
    use nalgebra::Point3;

    fn node_from_bounds(min: [f32; 3], max: [f32; 3]) -> SceneNode {
        let verts = [min, max]
            .iter()
            .map(|p| Vertex::new(Point3::from(*p), Vector3::y()))
            .collect();
        SceneNode::with_mesh("bounds", Mesh::new(verts, Vec::new()))
    }

    #[test]
    fn centered_source_only_scales() {
        let source = node_from_bounds([-2.0, -1.0, -1.0], [2.0, 1.0, 1.0]);
        let asset = AssetNormalizer::new(1.0).normalize(&source).unwrap();
        assert!((asset.scale - 0.25).abs() < 1e-6);
        assert_eq!(asset.offset, Vector3::zeros());
    }

    #[test]
    fn offset_source_is_shifted_then_scaled() {
        let source = node_from_bounds([0.0, 0.0, 0.0], [4.0, 2.0, 2.0]);
        let asset = AssetNormalizer::new(1.0).normalize(&source).unwrap();
        assert!((asset.scale - 0.25).abs() < 1e-6);
        assert_eq!(asset.offset, Vector3::new(-2.0, -1.0, -1.0));

        let b = asset.bounds().unwrap();
        assert!(b.center().coords.norm() < 1e-6);
        assert!((b.max_dimension() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn perfume_target_size() {
        let source = node_from_bounds([1.0, 5.0, 1.0], [2.0, 15.0, 3.0]);
        let asset = AssetNormalizer::new(3.2).normalize(&source).unwrap();
        let b = asset.bounds().unwrap();
        assert!((b.max_dimension() - 3.2).abs() < 1e-5);
        assert!(b.center().coords.norm() < 1e-5);
    }

    #[test]
    fn point_source_keeps_unit_scale() {
        let source = node_from_bounds([3.0, 3.0, 3.0], [3.0, 3.0, 3.0]);
        let asset = AssetNormalizer::new(1.0).normalize(&source).unwrap();
        assert_eq!(asset.scale, 1.0);
        assert_eq!(asset.offset, Vector3::new(-3.0, -3.0, -3.0));
    }

    #[test]
    fn source_is_left_untouched() {
        let mut source = node_from_bounds([0.0, 0.0, 0.0], [4.0, 2.0, 2.0]);
        source.transform.position = Vector3::new(1.0, 0.0, 0.0);
        let before = source.transform;
        let mut asset = AssetNormalizer::new(1.0).normalize(&source).unwrap();
        asset.node.transform.position.y = 9.0;
        assert_eq!(source.transform, before);
    }

    #[test]
    fn empty_graph_renders_nothing() {
        let source = SceneNode::new("loading");
        assert!(AssetNormalizer::new(1.0).normalize(&source).is_none());
    }
}
