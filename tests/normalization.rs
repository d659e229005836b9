use nalgebra::{Matrix4, Vector3};
use proptest::prelude::*;
use showcase::core::math::transform::TransformFactory;
use showcase::scene::mesh::Mesh;
use showcase::scene::node::{SceneNode, Transform};
use showcase::scene::normalizer::AssetNormalizer;

fn shifted_box(size: [f32; 3], center: [f32; 3]) -> SceneNode {
    let mut mesh = Mesh::create_box(size[0], size[1], size[2]);
    let shift = Vector3::from(center);
    for v in &mut mesh.vertices {
        v.position += shift;
    }
    SceneNode::with_mesh("box", mesh)
}

proptest! {
    #[test]
    fn normalized_box_is_centered_and_fitted(
        size in prop::array::uniform3(0.1f32..50.0),
        center in prop::array::uniform3(-50.0f32..50.0),
        target in 0.1f32..5.0,
    ) {
        let asset = AssetNormalizer::new(target)
            .normalize(&shifted_box(size, center))
            .unwrap();
        let bounds = asset.bounds().unwrap();

        let tolerance = 1e-3 * target.max(1.0);
        prop_assert!(bounds.center().coords.norm() < tolerance, "{:?}", bounds);
        prop_assert!((bounds.max_dimension() - target).abs() < tolerance);
    }

    #[test]
    fn nested_transforms_are_part_of_the_fit(
        offset in prop::array::uniform3(-10.0f32..10.0),
        child_scale in 0.5f32..4.0,
    ) {
        let mut child = SceneNode::with_mesh("leaf", Mesh::create_box(1.0, 1.0, 1.0));
        child.transform = Transform {
            position: Vector3::from(offset),
            scale: Vector3::repeat(child_scale),
            ..Transform::default()
        };
        let root = SceneNode::new("root")
            .with_child(SceneNode::with_mesh("base", Mesh::create_box(1.0, 1.0, 1.0)))
            .with_child(child);

        let asset = AssetNormalizer::new(1.0).normalize(&root).unwrap();
        let bounds = asset.bounds().unwrap();
        prop_assert!(bounds.center().coords.norm() < 1e-3);
        prop_assert!((bounds.max_dimension() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn single_point_keeps_unit_scale(point in prop::array::uniform3(-100.0f32..100.0)) {
        let asset = AssetNormalizer::new(2.0)
            .normalize(&shifted_box([0.0, 0.0, 0.0], point))
            .unwrap();
        prop_assert_eq!(asset.scale, 1.0);
        let bounds = asset.bounds().unwrap();
        prop_assert!(bounds.center().coords.norm() < 1e-3);
    }
}

#[test]
fn placement_matrix_translates_before_scaling() {
    let asset = AssetNormalizer::new(1.0)
        .normalize(&shifted_box([4.0, 2.0, 1.0], [5.0, 0.0, 0.0]))
        .unwrap();
    let expected: Matrix4<f32> = TransformFactory::scaling(0.25)
        * TransformFactory::translation(&Vector3::new(-5.0, 0.0, 0.0));
    assert!((asset.matrix() - expected).norm() < 1e-6);
}
