use crate::core::vertex::{A, B, G, R, SW, SX, SY, SZ, VertexRecord, WW, WX, WY, WZ};
use crate::error::{Result, ShadeError};
use crate::scene::texture::Texture;
use nalgebra::Vector3;
use std::sync::Arc;

/// Special scan-conversion treatment requested by a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RasterEffect {
    #[default]
    None,
    Hatch,
    Invert,
    Etch,
}

/// One planar face: an ordered ring of vertex records plus a synthetic center
/// record used by flat shading.
///
/// The public metadata fields are written by the polygon shader and read by
/// the rasterizer afterwards.
#[derive(Debug, Clone)]
pub struct Polygon {
    vertices: Vec<VertexRecord>,
    center: VertexRecord,
    face_normal: Option<Vector3<f64>>,

    pub texture: Option<Arc<Texture>>,
    pub transparency: f64,
    pub interpolate_color: bool,
    pub interpolate_alpha: bool,
    pub needs_sorting: bool,
    pub skybox: bool,
    /// The RX/RY/RZ slots of every vertex hold cube-map lookup vectors.
    pub reflection_vectors: bool,
    pub effect: RasterEffect,
}

impl Polygon {
    /// Builds a polygon from at least three vertex records.
    ///
    /// The center normal is the normalized average of the vertex normals
    /// unless [`Polygon::set_face_normal`] supplies an exact one.
    pub fn new(vertices: Vec<VertexRecord>) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(ShadeError::TooFewVertices(vertices.len()));
        }

        let mut polygon = Self {
            vertices,
            center: VertexRecord::new(),
            face_normal: None,
            texture: None,
            transparency: 0.0,
            interpolate_color: false,
            interpolate_alpha: false,
            needs_sorting: false,
            skybox: false,
            reflection_vectors: false,
            effect: RasterEffect::None,
        };
        polygon.update_center();
        Ok(polygon)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertex(&self, i: usize) -> &VertexRecord {
        &self.vertices[i]
    }

    pub fn vertices(&self) -> &[VertexRecord] {
        &self.vertices
    }

    pub fn vertices_mut(&mut self) -> &mut [VertexRecord] {
        &mut self.vertices
    }

    pub fn center(&self) -> &VertexRecord {
        &self.center
    }

    pub fn center_mut(&mut self) -> &mut VertexRecord {
        &mut self.center
    }

    /// Pins the center normal; later vertex normal edits no longer affect it.
    pub fn set_face_normal(&mut self, normal: Vector3<f64>) {
        self.face_normal = Some(normal);
        self.center.set_normal(normal);
    }

    /// Averages screen position, lighting-frame position and color (with alpha)
    /// of all vertices into the center record, and refreshes the center normal
    /// from the vertex normals unless a face normal was set.
    pub fn update_center(&mut self) {
        const AVERAGED: [usize; 12] = [SX, SY, SZ, SW, WX, WY, WZ, WW, R, G, B, A];

        let inv_n = 1.0 / self.vertices.len() as f64;
        for &slot in &AVERAGED {
            let sum: f64 = self.vertices.iter().map(|v| v[slot]).sum();
            self.center[slot] = sum * inv_n;
        }

        let normal = match self.face_normal {
            Some(n) => n,
            None => {
                let sum = self
                    .vertices
                    .iter()
                    .fold(Vector3::zeros(), |acc, v| acc + v.normal());
                sum.try_normalize(1e-12).unwrap_or(sum)
            }
        };
        self.center.set_normal(normal);
    }
}
