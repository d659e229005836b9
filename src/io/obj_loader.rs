use crate::core::geometry::Vertex;
use crate::error::AssetError;
use crate::scene::mesh::Mesh;
use crate::scene::node::SceneNode;
use log::{info, warn};
use nalgebra::{Point3, Vector3};
use std::path::Path;

/// Loads an OBJ file into a scene graph: one root named after the file with
/// one child per object/group in the file.
pub fn load_obj(path: &str) -> Result<SceneNode, AssetError> {
    let path_obj = Path::new(path);
    if !path_obj.exists() {
        return Err(AssetError::NotFound(path.to_string()));
    }

    info!("Loading OBJ file: {}", path);

    let load_options = tobj::LoadOptions {
        triangulate: true,
        single_index: true, // Unifies indices for Position/Normal
        ..Default::default()
    };

    // Materials are irrelevant for wireframe output
    let (models, _materials) = tobj::load_obj(path_obj, &load_options)?;

    let root_name = path_obj
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());
    let mut root = SceneNode::new(root_name);
    let mut total_vertices = 0;

    for model in models {
        let mesh = &model.mesh;
        let num_vertices = mesh.positions.len() / 3;
        if num_vertices == 0 {
            continue;
        }

        let has_normals = mesh.normals.len() == mesh.positions.len();
        if !has_normals {
            warn!(
                "Mesh '{}' is missing normals. Using default (0, 1, 0).",
                model.name
            );
        }

        let vertices = (0..num_vertices)
            .map(|i| {
                let position = Point3::new(
                    mesh.positions[i * 3],
                    mesh.positions[i * 3 + 1],
                    mesh.positions[i * 3 + 2],
                );
                let normal = if has_normals {
                    Vector3::new(
                        mesh.normals[i * 3],
                        mesh.normals[i * 3 + 1],
                        mesh.normals[i * 3 + 2],
                    )
                } else {
                    Vector3::y()
                };
                Vertex::new(position, normal)
            })
            .collect();

        total_vertices += num_vertices;
        root.children.push(SceneNode::with_mesh(
            model.name.clone(),
            Mesh::new(vertices, mesh.indices.clone()),
        ));
    }

    if root.children.is_empty() {
        return Err(AssetError::Empty(path.to_string()));
    }

    info!(
        "OBJ loaded successfully. Objects: {}, Total vertices: {}",
        root.children.len(),
        total_vertices
    );

    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const QUAD: &str = "\
o panel
v 0.0 0.0 0.0
v 4.0 0.0 0.0
v 4.0 2.0 0.0
v 0.0 2.0 2.0
f 1 2 3 4
";

    #[test]
    fn loads_objects_as_children() {
        let mut file = tempfile::Builder::new().suffix(".obj").tempfile().unwrap();
        file.write_all(QUAD.as_bytes()).unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let root = load_obj(&path).unwrap();
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].name, "panel");

        let mesh = root.children[0].mesh.as_ref().unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        // quad is triangulated
        assert_eq!(mesh.indices.len(), 6);

        let b = root.bounds().unwrap();
        assert_eq!(b.max, Point3::new(4.0, 2.0, 2.0));
    }

    #[test]
    fn bundled_character_model_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/models/cinna.obj");
        let root = load_obj(path).unwrap();
        assert_eq!(root.name, "cinna");
        assert_eq!(root.mesh_count(), 5);
        for part in &root.children {
            let mesh = part.mesh.as_ref().unwrap();
            assert_eq!(mesh.indices.len(), 36, "{}", part.name);
        }
        let b = root.bounds().unwrap();
        assert!((b.max_dimension() - 3.0).abs() < 1e-4);
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_obj("does/not/exist.obj").unwrap_err();
        assert!(matches!(err, AssetError::NotFound(_)));
    }
}
