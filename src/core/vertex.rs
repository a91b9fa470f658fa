use nalgebra::{Point3, Vector3, Vector4};
use std::ops::{Index, IndexMut};

// Screen-space position (homogeneous), written by the transform stage.
pub const SX: usize = 0;
pub const SY: usize = 1;
pub const SZ: usize = 2;
pub const SW: usize = 3;
// Position in the lighting frame (viewer at the origin), homogeneous.
pub const WX: usize = 4;
pub const WY: usize = 5;
pub const WZ: usize = 6;
pub const WW: usize = 7;
// Surface normal.
pub const NX: usize = 8;
pub const NY: usize = 9;
pub const NZ: usize = 10;
// Color and transparency-style alpha (0.0 = opaque).
pub const R: usize = 11;
pub const G: usize = 12;
pub const B: usize = 13;
pub const A: usize = 14;
// Texture coordinates.
pub const U: usize = 15;
pub const V: usize = 16;
// Reflection lookup vector, valid only after an environment-mapped shader ran.
pub const RX: usize = 17;
pub const RY: usize = 18;
pub const RZ: usize = 19;

pub const VERTEX_LENGTH: usize = 20;

/// Flat per-vertex float buffer shared by every polygon in the pipeline.
///
/// Index constants in this module are the only way fields are addressed, so the
/// layout never moves. The typed accessors below are conveniences on top of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexRecord {
    pub data: [f64; VERTEX_LENGTH],
}

impl Default for VertexRecord {
    fn default() -> Self {
        let mut data = [0.0; VERTEX_LENGTH];
        data[SW] = 1.0;
        data[WW] = 1.0;
        Self { data }
    }
}

impl Index<usize> for VertexRecord {
    type Output = f64;

    #[inline(always)]
    fn index(&self, index: usize) -> &f64 {
        &self.data[index]
    }
}

impl IndexMut<usize> for VertexRecord {
    #[inline(always)]
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.data[index]
    }
}

impl VertexRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_world(mut self, p: Point3<f64>) -> Self {
        self.set_world(Vector4::new(p.x, p.y, p.z, 1.0));
        self
    }

    pub fn with_screen(mut self, s: Vector4<f64>) -> Self {
        self.set_screen(s);
        self
    }

    pub fn with_normal(mut self, n: Vector3<f64>) -> Self {
        self.set_normal(n);
        self
    }

    pub fn with_color(mut self, rgb: Vector3<f64>, alpha: f64) -> Self {
        self.set_color(rgb);
        self.data[A] = alpha;
        self
    }

    #[inline]
    pub fn screen(&self) -> Vector4<f64> {
        Vector4::new(self.data[SX], self.data[SY], self.data[SZ], self.data[SW])
    }

    #[inline]
    pub fn set_screen(&mut self, s: Vector4<f64>) {
        self.data[SX] = s.x;
        self.data[SY] = s.y;
        self.data[SZ] = s.z;
        self.data[SW] = s.w;
    }

    #[inline]
    pub fn world(&self) -> Vector4<f64> {
        Vector4::new(self.data[WX], self.data[WY], self.data[WZ], self.data[WW])
    }

    #[inline]
    pub fn set_world(&mut self, w: Vector4<f64>) {
        self.data[WX] = w.x;
        self.data[WY] = w.y;
        self.data[WZ] = w.z;
        self.data[WW] = w.w;
    }

    #[inline]
    pub fn normal(&self) -> Vector3<f64> {
        Vector3::new(self.data[NX], self.data[NY], self.data[NZ])
    }

    #[inline]
    pub fn set_normal(&mut self, n: Vector3<f64>) {
        self.data[NX] = n.x;
        self.data[NY] = n.y;
        self.data[NZ] = n.z;
    }

    #[inline]
    pub fn color(&self) -> Vector3<f64> {
        Vector3::new(self.data[R], self.data[G], self.data[B])
    }

    #[inline]
    pub fn set_color(&mut self, c: Vector3<f64>) {
        self.data[R] = c.x;
        self.data[G] = c.y;
        self.data[B] = c.z;
    }

    #[inline]
    pub fn alpha(&self) -> f64 {
        self.data[A]
    }

    #[inline]
    pub fn set_alpha(&mut self, a: f64) {
        self.data[A] = a;
    }

    #[inline]
    pub fn reflection(&self) -> Vector3<f64> {
        Vector3::new(self.data[RX], self.data[RY], self.data[RZ])
    }

    #[inline]
    pub fn set_reflection(&mut self, r: Vector3<f64>) {
        self.data[RX] = r.x;
        self.data[RY] = r.y;
        self.data[RZ] = r.z;
    }
}
