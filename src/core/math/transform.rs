use nalgebra::{Matrix4, Point2, Point3, Vector3, Vector4};

//=================================
// Transform Matrix Factory
//=================================

/// Factory for the handful of matrices the scene graph needs.
/// Written out by hand so the coordinate system (Right-Handed, column vectors)
/// is explicit at every call site.
pub struct TransformFactory;

#[rustfmt::skip]
impl TransformFactory {
    /// Rotation around the X-axis.
    pub fn rotation_x(angle_rad: f32) -> Matrix4<f32> {
        let (s, c) = angle_rad.sin_cos();
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c,  -s,   0.0,
            0.0, s,   c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation around the Y-axis. This is the turntable axis of the cabinet.
    pub fn rotation_y(angle_rad: f32) -> Matrix4<f32> {
        let (s, c) = angle_rad.sin_cos();
        Matrix4::new(
            c,   0.0, s,   0.0,
            0.0, 1.0, 0.0, 0.0,
           -s,   0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation around the Z-axis.
    pub fn rotation_z(angle_rad: f32) -> Matrix4<f32> {
        let (s, c) = angle_rad.sin_cos();
        Matrix4::new(
            c,  -s,   0.0, 0.0,
            s,   c,   0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// XYZ euler rotation, applied Z first.
    pub fn rotation_euler(euler: &Vector3<f32>) -> Matrix4<f32> {
        Self::rotation_x(euler.x) * Self::rotation_y(euler.y) * Self::rotation_z(euler.z)
    }

    pub fn translation(translation: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            1.0, 0.0, 0.0, translation.x,
            0.0, 1.0, 0.0, translation.y,
            0.0, 0.0, 1.0, translation.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    pub fn scaling(scale: f32) -> Matrix4<f32> {
        Self::scaling_nonuniform(&Vector3::new(scale, scale, scale))
    }

    pub fn scaling_nonuniform(scale: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            scale.x, 0.0,     0.0,     0.0,
            0.0,     scale.y, 0.0,     0.0,
            0.0,     0.0,     scale.z, 0.0,
            0.0,     0.0,     0.0,     1.0,
        )
    }

    /// Translation * Rotation * Scale.
    pub fn trs(
        translation: &Vector3<f32>,
        euler: &Vector3<f32>,
        scale: &Vector3<f32>,
    ) -> Matrix4<f32> {
        Self::translation(translation) * Self::rotation_euler(euler) * Self::scaling_nonuniform(scale)
    }

    /// Look-At view matrix. In RHS the camera looks down -Z.
    pub fn view(eye: &Point3<f32>, target: &Point3<f32>, up: &Vector3<f32>) -> Matrix4<f32> {
        let z_axis = (eye - target).normalize();
        let x_axis = up.cross(&z_axis).normalize();
        let y_axis = z_axis.cross(&x_axis);

        let rotation = Matrix4::new(
            x_axis.x, x_axis.y, x_axis.z, 0.0,
            y_axis.x, y_axis.y, y_axis.z, 0.0,
            z_axis.x, z_axis.y, z_axis.z, 0.0,
            0.0,      0.0,      0.0,      1.0,
        );

        rotation * Self::translation(&-eye.coords)
    }

    /// Perspective projection, maps the view frustum to NDC [-1, 1].
    pub fn perspective(aspect_ratio: f32, fov_y_rad: f32, near: f32, far: f32) -> Matrix4<f32> {
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

/// Applies an affine matrix to a point.
#[inline]
pub fn transform_point(matrix: &Matrix4<f32>, point: &Point3<f32>) -> Point3<f32> {
    let p = matrix * point.to_homogeneous();
    Point3::new(p.x, p.y, p.z)
}

/// Clip Space -> NDC.
#[inline]
pub fn apply_perspective_division(clip: &Vector4<f32>) -> Point3<f32> {
    let w = clip.w;
    if w.abs() > 1e-6 {
        Point3::new(clip.x / w, clip.y / w, clip.z / w)
    } else {
        Point3::origin()
    }
}

/// NDC -> Screen. NDC +Y is up, Screen +Y is down.
#[inline]
pub fn ndc_to_screen(ndc_x: f32, ndc_y: f32, width: f32, height: f32) -> Point2<f32> {
    Point2::new(
        (ndc_x + 1.0) * 0.5 * width,
        (1.0 - (ndc_y + 1.0) * 0.5) * height,
    )
}
