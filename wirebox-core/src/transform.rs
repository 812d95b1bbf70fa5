//! 4×4 homogeneous transformation matrices and the six-value box pose
use nalgebra::{Matrix4, Point3, Vector3};
use std::fmt;

/// Slider domain for the three rotation angles, in degrees
pub const ROTATION_RANGE: (f64, f64) = (0.0, 360.0);
/// Slider domain for the three translation offsets
pub const TRANSLATION_RANGE: (f64, f64) = (-5.0, 5.0);

/// One of the six scalar transform parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Param {
    RotateX,
    RotateY,
    RotateZ,
    TranslateX,
    TranslateY,
    TranslateZ,
}

impl Param {
    /// All parameters in slider order
    pub const ALL: [Param; 6] = [
        Param::RotateX,
        Param::RotateY,
        Param::RotateZ,
        Param::TranslateX,
        Param::TranslateY,
        Param::TranslateZ,
    ];

    /// Human readable slider label
    pub fn label(self) -> &'static str {
        match self {
            Param::RotateX => "Rotate X°",
            Param::RotateY => "Rotate Y°",
            Param::RotateZ => "Rotate Z°",
            Param::TranslateX => "Translate X",
            Param::TranslateY => "Translate Y",
            Param::TranslateZ => "Translate Z",
        }
    }

    /// Short key used in pose strings (`rx`, `ty`, ...)
    pub fn key(self) -> &'static str {
        match self {
            Param::RotateX => "rx",
            Param::RotateY => "ry",
            Param::RotateZ => "rz",
            Param::TranslateX => "tx",
            Param::TranslateY => "ty",
            Param::TranslateZ => "tz",
        }
    }

    pub fn from_key(key: &str) -> Option<Param> {
        Param::ALL.into_iter().find(|param| param.key() == key)
    }

    /// Inclusive `(min, max)` domain of the slider driving this parameter
    pub fn range(self) -> (f64, f64) {
        if self.is_rotation() {
            ROTATION_RANGE
        } else {
            TRANSLATION_RANGE
        }
    }

    pub fn is_rotation(self) -> bool {
        matches!(self, Param::RotateX | Param::RotateY | Param::RotateZ)
    }
}

/// The six values that fully determine the box pose.
///
/// Rotations are in degrees. The values are unconstrained reals here;
/// clamping to [`Param::range`] is the job of whoever edits them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformParams {
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub rotate_z: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    pub translate_z: f64,
}

impl TransformParams {
    pub fn new(rx: f64, ry: f64, rz: f64, tx: f64, ty: f64, tz: f64) -> Self {
        Self {
            rotate_x: rx,
            rotate_y: ry,
            rotate_z: rz,
            translate_x: tx,
            translate_y: ty,
            translate_z: tz,
        }
    }

    /// All zeros: the box stays centered on the origin
    pub fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0)
    }

    pub fn get(&self, param: Param) -> f64 {
        match param {
            Param::RotateX => self.rotate_x,
            Param::RotateY => self.rotate_y,
            Param::RotateZ => self.rotate_z,
            Param::TranslateX => self.translate_x,
            Param::TranslateY => self.translate_y,
            Param::TranslateZ => self.translate_z,
        }
    }

    pub fn set(&mut self, param: Param, value: f64) {
        let slot = match param {
            Param::RotateX => &mut self.rotate_x,
            Param::RotateY => &mut self.rotate_y,
            Param::RotateZ => &mut self.rotate_z,
            Param::TranslateX => &mut self.translate_x,
            Param::TranslateY => &mut self.translate_y,
            Param::TranslateZ => &mut self.translate_z,
        };
        *slot = value;
    }
}

/// Initial slider positions: 30/90/30 degrees, offset (-1, -1, 3)
impl Default for TransformParams {
    fn default() -> Self {
        Self::new(30.0, 90.0, 30.0, -1.0, -1.0, 3.0)
    }
}

/// Formats as a pose string, e.g. `rx=30 ry=90 rz=30 tx=-1 ty=-1 tz=3`
impl fmt::Display for TransformParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, param) in Param::ALL.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}={}", param.key(), self.get(*param))?;
        }
        Ok(())
    }
}

/// Transform builder for the box pose
pub struct Transform;

impl Transform {
    /// Right-handed rotation about the X axis
    pub fn rot_x(angle_deg: f64) -> Matrix4<f64> {
        let (s, c) = angle_deg.to_radians().sin_cos();
        #[rustfmt::skip]
        let m = Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c,   -s,  0.0,
            0.0, s,   c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        m
    }

    /// Right-handed rotation about the Y axis
    pub fn rot_y(angle_deg: f64) -> Matrix4<f64> {
        let (s, c) = angle_deg.to_radians().sin_cos();
        #[rustfmt::skip]
        let m = Matrix4::new(
            c,   0.0, s,   0.0,
            0.0, 1.0, 0.0, 0.0,
            -s,  0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        m
    }

    /// Right-handed rotation about the Z axis
    pub fn rot_z(angle_deg: f64) -> Matrix4<f64> {
        let (s, c) = angle_deg.to_radians().sin_cos();
        #[rustfmt::skip]
        let m = Matrix4::new(
            c,   -s,  0.0, 0.0,
            s,   c,   0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        m
    }

    /// Translation with the offsets in the last column
    pub fn translate(dx: f64, dy: f64, dz: f64) -> Matrix4<f64> {
        Matrix4::new_translation(&Vector3::new(dx, dy, dz))
    }

    /// Combined rotation `Rz · Ry · Rx`: X is applied first to a column vector
    pub fn rotation(rx: f64, ry: f64, rz: f64) -> Matrix4<f64> {
        Self::rot_z(rz) * Self::rot_y(ry) * Self::rot_x(rx)
    }

    /// Final transform `T · R`: rotate, then translate
    pub fn model_matrix(params: &TransformParams) -> Matrix4<f64> {
        let rotation = Self::rotation(params.rotate_x, params.rotate_y, params.rotate_z);
        let translation =
            Self::translate(params.translate_x, params.translate_y, params.translate_z);
        translation * rotation
    }

    /// Apply a homogeneous transform to a point (w = 1)
    pub fn apply(matrix: &Matrix4<f64>, point: &Point3<f64>) -> Point3<f64> {
        let h = matrix * point.to_homogeneous();
        Point3::new(h.x, h.y, h.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector4;

    const EPS: f64 = 1e-9;

    fn rotations() -> [fn(f64) -> Matrix4<f64>; 3] {
        [Transform::rot_x, Transform::rot_y, Transform::rot_z]
    }

    #[test]
    fn test_rotations_are_orthogonal() {
        for rot in rotations() {
            for angle in [-725.0, -90.0, 0.0, 17.5, 30.0, 90.0, 181.0, 360.0, 1234.5] {
                let m = rot(angle);
                assert!((m.transpose() * m - Matrix4::identity()).norm() < EPS);
                assert!((m.determinant() - 1.0).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_zero_rotation_is_identity() {
        for rot in rotations() {
            assert!((rot(0.0) - Matrix4::identity()).norm() < EPS);
        }
    }

    #[test]
    fn test_full_turn_matches_zero() {
        for rot in rotations() {
            assert!((rot(360.0) - rot(0.0)).norm() < EPS);
            assert!((rot(-90.0) - rot(270.0)).norm() < EPS);
        }
    }

    #[test]
    fn test_right_handed_quarter_turns() {
        let x = Vector4::new(1.0, 0.0, 0.0, 1.0);
        let y = Vector4::new(0.0, 1.0, 0.0, 1.0);
        let z = Vector4::new(0.0, 0.0, 1.0, 1.0);
        assert!((Transform::rot_x(90.0) * y - z).norm() < EPS);
        assert!((Transform::rot_y(90.0) * z - x).norm() < EPS);
        assert!((Transform::rot_z(90.0) * x - y).norm() < EPS);
    }

    #[test]
    fn test_translation() {
        assert_eq!(Transform::translate(0.0, 0.0, 0.0), Matrix4::identity());

        let m = Transform::translate(1.5, -2.0, 3.0);
        let moved = m * Vector4::new(4.0, 5.0, 6.0, 1.0);
        assert_eq!(moved, Vector4::new(5.5, 3.0, 9.0, 1.0));
        assert_eq!(m[(0, 3)], 1.5);
        assert_eq!(m[(1, 3)], -2.0);
        assert_eq!(m[(2, 3)], 3.0);
    }

    #[test]
    fn test_rotation_applies_x_first() {
        // X then Z: y-axis goes to z under Rx(90), and z is fixed by Rz
        let r = Transform::rotation(90.0, 0.0, 90.0);
        let p = Transform::apply(&r, &Point3::new(0.0, 1.0, 0.0));
        assert!((p - Point3::new(0.0, 0.0, 1.0)).norm() < EPS);

        let expected = Transform::rot_z(90.0) * Transform::rot_x(90.0);
        assert!((r - expected).norm() < EPS);
    }

    #[test]
    fn test_model_matrix_rotates_then_translates() {
        let params = TransformParams::new(0.0, 0.0, 90.0, 1.0, 2.0, 3.0);
        let m = Transform::model_matrix(&params);
        let p = Transform::apply(&m, &Point3::new(1.0, 0.0, 0.0));
        assert!((p - Point3::new(1.0, 3.0, 3.0)).norm() < EPS);
    }

    #[test]
    fn test_params_get_set() {
        let mut params = TransformParams::identity();
        for (i, param) in Param::ALL.into_iter().enumerate() {
            params.set(param, i as f64);
        }
        for (i, param) in Param::ALL.into_iter().enumerate() {
            assert_eq!(params.get(param), i as f64);
        }
    }

    #[test]
    fn test_param_metadata() {
        assert_eq!(Param::from_key("tz"), Some(Param::TranslateZ));
        assert_eq!(Param::from_key("rw"), None);
        assert_eq!(Param::RotateY.range(), (0.0, 360.0));
        assert_eq!(Param::TranslateX.range(), (-5.0, 5.0));
        assert_eq!(Param::RotateX.label(), "Rotate X°");
    }

    #[test]
    fn test_display_pose() {
        assert_eq!(
            TransformParams::default().to_string(),
            "rx=30 ry=90 rz=30 tx=-1 ty=-1 tz=3"
        );
    }
}
