use crate::core::geometry::Vertex;
use crate::core::math::transform::clip_to_viewport;
use crate::core::polygon::Polygon;
use crate::core::vertex::{U, V, VertexRecord};
use crate::error::Result;
use nalgebra::{Matrix3, Matrix4, Point3, Vector2, Vector3, Vector4};

/// A collection of vertices and indices representing a 3D object.
#[derive(Debug, Clone)]
pub struct Mesh {
    /// List of vertices.
    pub vertices: Vec<Vertex>,
    /// List of indices defining triangles (3 indices per triangle).
    pub indices: Vec<u32>,
}

/// Everything needed to place mesh vertices in the lighting frame and on screen.
#[derive(Debug, Clone, Copy)]
pub struct ProjectionSetup {
    pub model: Matrix4<f64>,
    pub view: Matrix4<f64>,
    pub projection: Matrix4<f64>,
    pub width: f64,
    pub height: f64,
}

impl ProjectionSetup {
    /// Screen slots for an eye-space position.
    pub fn screen(&self, eye: &Vector4<f64>) -> Vector4<f64> {
        clip_to_viewport(&(self.projection * eye), self.width, self.height)
    }
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Single CCW triangle in the XY plane, facing +Z.
    pub fn create_test_triangle() -> Self {
        let n = Vector3::z();
        let vertices = vec![
            Vertex::new(Point3::new(0.0, 0.5, 0.0), n, Vector2::new(0.5, 1.0)),
            Vertex::new(Point3::new(-0.5, -0.5, 0.0), n, Vector2::new(0.0, 0.0)),
            Vertex::new(Point3::new(0.5, -0.5, 0.0), n, Vector2::new(1.0, 0.0)),
        ];
        Self::new(vertices, vec![0, 1, 2])
    }

    /// Unit quad in the XY plane, facing +Z, split into two CCW triangles.
    pub fn create_test_quad() -> Self {
        let n = Vector3::z();
        let vertices = vec![
            Vertex::new(Point3::new(-0.5, -0.5, 0.0), n, Vector2::new(0.0, 0.0)),
            Vertex::new(Point3::new(0.5, -0.5, 0.0), n, Vector2::new(1.0, 0.0)),
            Vertex::new(Point3::new(0.5, 0.5, 0.0), n, Vector2::new(1.0, 1.0)),
            Vertex::new(Point3::new(-0.5, 0.5, 0.0), n, Vector2::new(0.0, 1.0)),
        ];
        Self::new(vertices, vec![0, 1, 2, 0, 2, 3])
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn has_vertex_colors(&self) -> bool {
        !self.vertices.is_empty() && self.vertices.iter().all(|v| v.color.is_some())
    }

    /// Builds one shading polygon per triangle.
    ///
    /// World slots receive eye-space coordinates (viewer at the origin), normals
    /// go through the inverse transpose of model-view, screen slots hold
    /// homogeneous viewport coordinates (see [`clip_to_viewport`]). Vertices
    /// without their own color get `color`.
    pub fn to_polygons(&self, setup: &ProjectionSetup, color: &Vector4<f64>) -> Result<Vec<Polygon>> {
        let model_view = setup.view * setup.model;
        let linear: Matrix3<f64> = model_view.fixed_view::<3, 3>(0, 0).into_owned();
        let normal_matrix = linear.try_inverse().map(|m| m.transpose()).unwrap_or(linear);

        let records: Vec<VertexRecord> = self
            .vertices
            .iter()
            .map(|v| {
                let eye = model_view * v.position.to_homogeneous();
                let screen = setup.screen(&eye);
                let normal = (normal_matrix * v.normal)
                    .try_normalize(f64::EPSILON)
                    .unwrap_or_else(Vector3::zeros);
                let rgba = v.color.unwrap_or(*color);

                let mut record = VertexRecord::new()
                    .with_screen(screen)
                    .with_normal(normal)
                    .with_color(rgba.xyz(), rgba.w);
                record.set_world(eye);
                record[U] = v.texcoord.x;
                record[V] = v.texcoord.y;
                record
            })
            .collect();

        self.indices
            .chunks_exact(3)
            .map(|tri| {
                let vertices = tri.iter().map(|&i| records[i as usize]).collect();
                Polygon::new(vertices)
            })
            .collect()
    }
}
