use nalgebra::{Point3, Vector3};
use std::f64::consts::PI;

/// A light source that is infinitely far away (e.g., Sun).
/// Rays are parallel.
#[derive(Debug, Clone)]
pub struct DirectionalLight {
    /// Normalized direction the light travels.
    pub direction: Vector3<f64>,
    pub color: Vector3<f64>,
    pub intensity: f64,
}

impl DirectionalLight {
    pub fn new(direction: Vector3<f64>, color: Vector3<f64>, intensity: f64) -> Self {
        Self {
            direction: direction.normalize(),
            color,
            intensity,
        }
    }

    /// Unit vector FROM any surface point TO the light.
    #[inline]
    pub fn to_light(&self) -> Vector3<f64> {
        -self.direction
    }
}

/// A positional light restricted to a cone, with quadratic distance attenuation.
#[derive(Debug, Clone)]
pub struct SpotLight {
    /// Normalized direction the cone axis points to.
    pub direction: Vector3<f64>,
    pub source: Point3<f64>,
    /// Half-opening angle of the cone, radians.
    pub cone_angle: f64,
    pub cos_cone_angle: f64,
    /// Outer share of the cone angle over which intensity fades to zero.
    pub soft_edge_fraction: f64,
    /// Attenuation coefficients: (constant, linear, quadratic)
    pub attenuation: (f64, f64, f64),
    pub color: Vector3<f64>,
    pub intensity: f64,
}

impl SpotLight {
    /// `cone_delta_angle` is the width of the soft edge at the cone boundary.
    pub fn new(
        source: Point3<f64>,
        direction: Vector3<f64>,
        cone_angle: f64,
        cone_delta_angle: f64,
        color: Vector3<f64>,
        intensity: f64,
    ) -> Self {
        let soft_edge_fraction = if cone_angle > 0.0 {
            (cone_delta_angle / cone_angle).clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            direction: direction.normalize(),
            source,
            cone_angle,
            // A full-sphere cone must accept dot products rounding just below -1.
            cos_cone_angle: if cone_angle >= PI {
                f64::NEG_INFINITY
            } else {
                cone_angle.cos()
            },
            soft_edge_fraction,
            attenuation: (1.0, 0.0, 0.0),
            color,
            intensity,
        }
    }

    /// A point light is a spot light whose cone covers the whole sphere.
    pub fn new_point(source: Point3<f64>, color: Vector3<f64>, intensity: f64) -> Self {
        Self::new(source, -Vector3::z(), PI, 0.0, color, intensity)
    }

    pub fn with_attenuation(mut self, a0: f64, a1: f64, a2: f64) -> Self {
        self.attenuation = (a0, a1, a2);
        self
    }

    /// Intensity after distance attenuation, before the cone test.
    #[inline]
    pub fn attenuated_intensity(&self, distance: f64) -> f64 {
        let (a0, a1, a2) = self.attenuation;
        self.intensity / (a0 + a1 * distance + a2 * distance * distance)
    }

    /// Cone factor for a point seen from the light at `cos_angle` off the axis:
    /// 0 outside the cone, falling linearly across the soft edge, 1 inside.
    #[inline]
    pub fn cone_factor(&self, cos_angle: f64) -> f64 {
        if cos_angle < self.cos_cone_angle {
            return 0.0;
        }
        if self.soft_edge_fraction <= 0.0 {
            return 1.0;
        }
        let angle = cos_angle.clamp(-1.0, 1.0).acos();
        let edge = self.cone_angle * self.soft_edge_fraction;
        let inner = self.cone_angle - edge;
        if angle > inner {
            ((self.cone_angle - angle) / edge).max(0.0)
        } else {
            1.0
        }
    }
}
