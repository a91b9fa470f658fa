use crate::core::geometry::Vertex;
use crate::error::{Result, ShadeError};
use crate::scene::mesh::Mesh;
use log::{info, warn};
use nalgebra::{Point3, Vector2, Vector3, Vector4};
use std::path::Path;

/// Loads an OBJ file and merges all of its models into one triangle mesh.
///
/// Vertex colors are kept when the file carries them for every vertex;
/// they are always opaque.
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ShadeError::NotFound(path.display().to_string()));
    }

    info!("Loading OBJ file: {}", path.display());

    let load_options = tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    };

    let (models, _materials) = tobj::load_obj(path, &load_options)?;

    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    let mut index_offset = 0u32;

    for model in models {
        let mesh = &model.mesh;
        let num_vertices = mesh.positions.len() / 3;
        let has_normals = !mesh.normals.is_empty();
        let has_texcoords = !mesh.texcoords.is_empty();
        let has_colors = mesh.vertex_color.len() == mesh.positions.len();

        if !has_normals {
            warn!(
                "Mesh '{}' is missing normals. Using default (0, 1, 0).",
                model.name
            );
        }

        for i in 0..num_vertices {
            let position = Point3::new(
                mesh.positions[i * 3] as f64,
                mesh.positions[i * 3 + 1] as f64,
                mesh.positions[i * 3 + 2] as f64,
            );
            let normal = if has_normals {
                Vector3::new(
                    mesh.normals[i * 3] as f64,
                    mesh.normals[i * 3 + 1] as f64,
                    mesh.normals[i * 3 + 2] as f64,
                )
            } else {
                Vector3::y()
            };
            let texcoord = if has_texcoords {
                Vector2::new(mesh.texcoords[i * 2] as f64, mesh.texcoords[i * 2 + 1] as f64)
            } else {
                Vector2::zeros()
            };

            let mut vertex = Vertex::new(position, normal, texcoord);
            if has_colors {
                vertex = vertex.with_color(Vector4::new(
                    mesh.vertex_color[i * 3] as f64,
                    mesh.vertex_color[i * 3 + 1] as f64,
                    mesh.vertex_color[i * 3 + 2] as f64,
                    0.0,
                ));
            }
            vertices.push(vertex);
        }

        indices.extend(mesh.indices.iter().map(|index| index + index_offset));
        index_offset += num_vertices as u32;
    }

    info!(
        "OBJ loaded: {} vertices, {} triangles",
        vertices.len(),
        indices.len() / 3
    );

    Ok(Mesh::new(vertices, indices))
}
