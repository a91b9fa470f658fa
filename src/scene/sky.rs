use crate::core::polygon::Polygon;
use crate::core::vertex::{U, V, VertexRecord};
use crate::error::Result;
use crate::pipeline::factory::ShaderFactory;
use crate::scene::camera::Camera;
use crate::scene::mesh::ProjectionSetup;
use crate::scene::scene_object::SceneObject;
use crate::scene::texture::CubeMap;
use nalgebra::{Matrix4, Vector3, Vector4};
use std::sync::Arc;

/// Unit cube faces as (name, outward axis, corners).
const FACES: [(&str, [f64; 3], [[f64; 3]; 4]); 6] = [
    ("+x", [1.0, 0.0, 0.0], [[1.0, 1.0, 1.0], [1.0, 1.0, -1.0], [1.0, -1.0, -1.0], [1.0, -1.0, 1.0]]),
    ("-x", [-1.0, 0.0, 0.0], [[-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0], [-1.0, -1.0, 1.0], [-1.0, -1.0, -1.0]]),
    ("+y", [0.0, 1.0, 0.0], [[-1.0, 1.0, -1.0], [1.0, 1.0, -1.0], [1.0, 1.0, 1.0], [-1.0, 1.0, 1.0]]),
    ("-y", [0.0, -1.0, 0.0], [[-1.0, -1.0, 1.0], [1.0, -1.0, 1.0], [1.0, -1.0, -1.0], [-1.0, -1.0, -1.0]]),
    ("+z", [0.0, 0.0, 1.0], [[-1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, -1.0, 1.0], [-1.0, -1.0, 1.0]]),
    ("-z", [0.0, 0.0, -1.0], [[1.0, 1.0, -1.0], [-1.0, 1.0, -1.0], [-1.0, -1.0, -1.0], [1.0, -1.0, -1.0]]),
];

const FACE_UV: [[f64; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Builds the six sky-box faces around `camera`, one object per cube face.
///
/// World slots hold world-space corners of a cube of half-size `size` centered
/// on the camera; the sky-box shader subtracts the camera translation again,
/// leaving the cube centered on the viewer. Screen slots only see the view
/// rotation, so the sky never moves relative to the viewer.
pub fn build_sky(cube: &CubeMap, size: f64, camera: &Camera, width: f64, height: f64) -> Result<Vec<SceneObject>> {
    let setup = ProjectionSetup {
        model: Matrix4::identity(),
        view: camera.view_matrix(),
        projection: camera.projection_matrix(),
        width,
        height,
    };
    let eye = camera.position.coords;

    FACES
        .iter()
        .map(|(name, axis, corners)| -> Result<SceneObject> {
            let axis = Vector3::from(*axis);
            let vertices = corners
                .iter()
                .zip(FACE_UV.iter())
                .map(|(corner, uv)| {
                    let world = eye + Vector3::from(*corner) * size;
                    let world = Vector4::new(world.x, world.y, world.z, 1.0);
                    let mut record = VertexRecord::new()
                        .with_screen(setup.screen(&(setup.view * world)))
                        .with_normal(axis);
                    record.set_world(world);
                    record[U] = uv[0];
                    record[V] = uv[1];
                    record
                })
                .collect();

            let mut polygon = Polygon::new(vertices)?;
            polygon.set_face_normal(axis);

            let texture = Arc::clone(cube.face(CubeMap::face_for(&axis)));
            Ok(SceneObject::new(
                &format!("sky:{}", name),
                vec![polygon],
                ShaderFactory::skybox(Some(texture)),
                false,
            ))
        })
        .collect()
}
