use nalgebra::{Matrix4, Point3, Vector3, Vector4};

//=================================
// Transform Matrix Factory
//=================================

/// Factory for the transformation matrices used to place meshes and the camera.
/// Right-handed throughout; the camera looks down -Z.
pub struct TransformFactory;

#[rustfmt::skip]
impl TransformFactory {
    /// Creates a rotation matrix around the X-axis.
    pub fn rotation_x(angle_rad: f64) -> Matrix4<f64> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c,  -s,   0.0,
            0.0, s,   c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a rotation matrix around the Y-axis.
    pub fn rotation_y(angle_rad: f64) -> Matrix4<f64> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            c,   0.0, s,   0.0,
            0.0, 1.0, 0.0, 0.0,
           -s,   0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a rotation matrix around the Z-axis.
    pub fn rotation_z(angle_rad: f64) -> Matrix4<f64> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            c,  -s,   0.0, 0.0,
            s,   c,   0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a translation matrix.
    pub fn translation(translation: &Vector3<f64>) -> Matrix4<f64> {
        Matrix4::new(
            1.0, 0.0, 0.0, translation.x,
            0.0, 1.0, 0.0, translation.y,
            0.0, 0.0, 1.0, translation.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a non-uniform scaling matrix.
    pub fn scaling_nonuniform(scale: &Vector3<f64>) -> Matrix4<f64> {
        Matrix4::new(
            scale.x, 0.0,     0.0,     0.0,
            0.0,     scale.y, 0.0,     0.0,
            0.0,     0.0,     scale.z, 0.0,
            0.0,     0.0,     0.0,     1.0,
        )
    }

    /// Object transform from Euler angles in degrees, applied X then Y then Z.
    pub fn model(position: &Vector3<f64>, rotation_deg: &Vector3<f64>, scale: &Vector3<f64>) -> Matrix4<f64> {
        let rotation = Self::rotation_x(rotation_deg.x.to_radians())
            * Self::rotation_y(rotation_deg.y.to_radians())
            * Self::rotation_z(rotation_deg.z.to_radians());
        Self::translation(position) * rotation * Self::scaling_nonuniform(scale)
    }

    /// Creates the world-to-camera rotation of a look-at camera (no translation).
    pub fn look_rotation(eye: &Point3<f64>, target: &Point3<f64>, up: &Vector3<f64>) -> Matrix4<f64> {
        let z_axis = (eye - target).normalize();
        let x_axis = up.cross(&z_axis).normalize();
        let y_axis = z_axis.cross(&x_axis);

        Matrix4::new(
            x_axis.x, x_axis.y, x_axis.z, 0.0,
            y_axis.x, y_axis.y, y_axis.z, 0.0,
            z_axis.x, z_axis.y, z_axis.z, 0.0,
            0.0,      0.0,      0.0,      1.0,
        )
    }

    /// Creates a View matrix (Look-At, Right-Handed).
    /// Transforms world space coordinates to camera space.
    pub fn view(eye: &Point3<f64>, target: &Point3<f64>, up: &Vector3<f64>) -> Matrix4<f64> {
        Self::look_rotation(eye, target, up) * Self::translation(&-eye.coords)
    }

    /// Creates a Perspective Projection matrix (Right-Handed).
    /// Maps view frustum to NDC [-1, 1].
    pub fn perspective(aspect_ratio: f64, fov_y_rad: f64, near: f64, far: f64) -> Matrix4<f64> {
        let f = 1.0 / (fov_y_rad / 2.0).tan();
        let nf = 1.0 / (near - far);

        Matrix4::new(
            f / aspect_ratio, 0.0, 0.0,               0.0,
            0.0,              f,   0.0,               0.0,
            0.0,              0.0, (far + near) * nf, 2.0 * far * near * nf,
            0.0,              0.0, -1.0,              0.0,
        )
    }
}

//=================================
// Core Transformation Functions
//=================================

/// Clip space to homogeneous viewport coordinates `(x·w, y·w, w, w)`.
///
/// Dividing by the last component gives pixels with the origin in the
/// bottom-left corner; `w` is the view distance and doubles as depth.
/// The map is linear in eye space, so the triple product of three mapped
/// points keeps the sign of the eye-space winding at every distance:
/// counter-clockwise faces turned towards the viewer come out non-negative.
#[inline]
pub fn clip_to_viewport(clip: &Vector4<f64>, width: f64, height: f64) -> Vector4<f64> {
    Vector4::new(
        (clip.x + clip.w) * 0.5 * width,
        (clip.y + clip.w) * 0.5 * height,
        clip.w,
        clip.w,
    )
}

/// Applies the linear (upper-left 3x3) part of `m` to a direction.
#[inline]
pub fn transform_direction(m: &Matrix4<f64>, v: &Vector3<f64>) -> Vector3<f64> {
    m.fixed_view::<3, 3>(0, 0) * v
}

/// Translation column of an affine matrix.
#[inline]
pub fn translation_of(m: &Matrix4<f64>) -> Vector3<f64> {
    Vector3::new(m[(0, 3)], m[(1, 3)], m[(2, 3)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_view_moves_eye_to_origin() {
        let eye = Point3::new(1.0, 2.0, 3.0);
        let view = TransformFactory::view(&eye, &Point3::origin(), &Vector3::y());
        let p = view * eye.to_homogeneous();
        assert_relative_eq!(p.xyz().norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_transform_direction_ignores_translation() {
        let m = TransformFactory::translation(&Vector3::new(5.0, 5.0, 5.0))
            * TransformFactory::rotation_z(FRAC_PI_2);
        let d = transform_direction(&m, &Vector3::x());
        assert_relative_eq!(d, Vector3::y(), epsilon = 1e-12);
        assert_relative_eq!(translation_of(&m), Vector3::new(5.0, 5.0, 5.0));
    }

    #[test]
    fn test_viewport_center_and_corner() {
        let projection = TransformFactory::perspective(1.0, FRAC_PI_2, 0.1, 100.0);
        let center = clip_to_viewport(&(projection * Vector4::new(0.0, 0.0, -4.0, 1.0)), 800.0, 600.0);
        assert_relative_eq!(center / center.w, Vector4::new(400.0, 300.0, 1.0, 1.0), epsilon = 1e-12);
        assert_relative_eq!(center.w, 4.0, epsilon = 1e-12);

        // 90 degree fov: (-d, d) at depth d is the top-left corner.
        let corner = clip_to_viewport(&(projection * Vector4::new(-2.0, 2.0, -2.0, 1.0)), 800.0, 600.0);
        assert_relative_eq!(corner.x / corner.w, 0.0, epsilon = 1e-12);
        assert_relative_eq!(corner.y / corner.w, 600.0, epsilon = 1e-12);
    }
}
