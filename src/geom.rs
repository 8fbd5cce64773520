use nalgebra::{Matrix3, Matrix4, Point3, RowVector4, Vector3};
use std::ops::Mul;

#[cfg(test)]
mod tests {

    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn rotate_z_quarter_turn() {
        let rot = Transform::rotation(Axis::Z, FRAC_PI_2);
        let p = rot.apply(&Point3::new(1.0, 0.0, 0.0));
        assert_abs_diff_eq!(p, Point3::new(0.0, 1.0, 0.0), epsilon = 1e-15);
    }

    #[test]
    fn rotations_are_right_handed() {
        // x -> y about z, y -> z about x, z -> x about y
        let cases = [
            (Axis::Z, Vector3::x(), Vector3::y()),
            (Axis::X, Vector3::y(), Vector3::z()),
            (Axis::Y, Vector3::z(), Vector3::x()),
        ];
        for (axis, from, to) in cases {
            let v = Transform::rotation(axis, FRAC_PI_2).apply_vector(&from);
            assert_abs_diff_eq!(v, to, epsilon = 1e-15);
        }
    }

    #[test]
    fn composition_applies_left_first() {
        let rot = Transform::rotation(Axis::Z, FRAC_PI_2);
        let mirror = Transform::scale(-1.0, 1.0, 1.0);
        // rotate (1,0,0) to (0,1,0) then mirror x: unchanged
        let p = (rot * mirror).apply(&Point3::new(1.0, 0.0, 0.0));
        assert_abs_diff_eq!(p, Point3::new(0.0, 1.0, 0.0), epsilon = 1e-15);
        // mirror to (-1,0,0) then rotate: (0,-1,0)
        let p = mirror.then(&rot).apply(&Point3::new(1.0, 0.0, 0.0));
        assert_abs_diff_eq!(p, Point3::new(0.0, -1.0, 0.0), epsilon = 1e-15);
    }

    #[test]
    fn transpose_inverts_rotation() {
        let rot = Transform::rotation(Axis::Y, 0.7) * Transform::rotation(Axis::X, -1.3);
        let round = rot * rot.transpose();
        assert_abs_diff_eq!(*round.matrix(), Matrix4::identity(), epsilon = 1e-15);
    }

    #[test]
    fn three_thirds_make_a_turn() {
        let third = Transform::rotation(Axis::Z, 2.0 * PI / 3.0);
        let turn = third * third * third;
        assert_abs_diff_eq!(*turn.matrix(), Matrix4::identity(), epsilon = 1e-14);
    }

    #[test]
    fn vectors_ignore_translation() {
        let mut m = Matrix4::identity();
        m[(3, 0)] = 5.0;
        let shift = Transform::from_matrix(m);
        assert_abs_diff_eq!(
            shift.apply(&Point3::new(1.0, 2.0, 3.0)),
            Point3::new(6.0, 2.0, 3.0)
        );
        assert_abs_diff_eq!(
            shift.apply_vector(&Vector3::new(1.0, 2.0, 3.0)),
            Vector3::new(1.0, 2.0, 3.0)
        );
    }

    #[test]
    fn triangle_basis_is_orthonormal() {
        let basis = basis_from_triangle(
            &Point3::new(2.0, 0.1, 0.3),
            &Point3::new(0.4, 1.9, -0.2),
            &Point3::new(-1.0, -0.5, 0.8),
        );
        let round = basis * basis.transpose();
        assert_abs_diff_eq!(*round.matrix(), Matrix4::identity(), epsilon = 1e-14);
        // right handed: determinant +1
        assert_abs_diff_eq!(basis.matrix().determinant(), 1.0, epsilon = 1e-14);
    }

    #[test]
    fn apply_all_matches_apply() {
        let rot = Transform::rotation(Axis::X, 0.3);
        let points = vec![Point3::new(1.0, 2.0, 3.0), Point3::new(-0.5, 0.0, 4.0)];
        let mapped = rot.apply_all(&points);
        assert_eq!(mapped.len(), 2);
        for (p, q) in points.iter().zip(mapped.iter()) {
            assert_abs_diff_eq!(rot.apply(p), *q);
        }
    }
}

/// Coordinate axis of a rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// A 4x4 homogeneous transform acting on row vectors, `v' = v * M`.
///
/// Applying `a` and then `b` is the product `a * b`. Translation lives in the
/// bottom row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    m: Matrix4<f64>,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            m: Matrix4::identity(),
        }
    }

    pub fn from_matrix(m: Matrix4<f64>) -> Self {
        Self { m }
    }

    /// Rotation of `angle` radians about `axis`, right-hand rule.
    pub fn rotation(axis: Axis, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        match axis {
            Axis::X => {
                m[(1, 1)] = c;
                m[(1, 2)] = s;
                m[(2, 1)] = -s;
                m[(2, 2)] = c;
            }
            Axis::Y => {
                m[(0, 0)] = c;
                m[(0, 2)] = -s;
                m[(2, 0)] = s;
                m[(2, 2)] = c;
            }
            Axis::Z => {
                m[(0, 0)] = c;
                m[(0, 1)] = s;
                m[(1, 0)] = -s;
                m[(1, 1)] = c;
            }
        }
        Self { m }
    }

    /// Non-uniform scale. A negative factor mirrors that axis.
    pub fn scale(x: f64, y: f64, z: f64) -> Self {
        Self {
            m: Matrix4::new_nonuniform_scaling(&Vector3::new(x, y, z)),
        }
    }

    /// Transform whose columns are the given axes.
    /// For an orthonormal basis this maps coordinates in the parent frame onto
    /// the basis, and its transpose maps them back.
    pub fn from_basis(x: &Vector3<f64>, y: &Vector3<f64>, z: &Vector3<f64>) -> Self {
        Self {
            m: Matrix3::from_columns(&[*x, *y, *z]).to_homogeneous(),
        }
    }

    pub fn transpose(&self) -> Self {
        Self {
            m: self.m.transpose(),
        }
    }

    /// Applies `self` and then `other`.
    pub fn then(&self, other: &Transform) -> Self {
        Self { m: self.m * other.m }
    }

    pub fn matrix(&self) -> &Matrix4<f64> {
        &self.m
    }

    /// Transforms a point (w = 1).
    pub fn apply(&self, p: &Point3<f64>) -> Point3<f64> {
        let h = RowVector4::new(p.x, p.y, p.z, 1.0) * self.m;
        Point3::new(h[0], h[1], h[2])
    }

    /// Transforms a direction (w = 0).
    pub fn apply_vector(&self, v: &Vector3<f64>) -> Vector3<f64> {
        let h = RowVector4::new(v.x, v.y, v.z, 0.0) * self.m;
        Vector3::new(h[0], h[1], h[2])
    }

    pub fn apply_all(&self, points: &[Point3<f64>]) -> Vec<Point3<f64>> {
        points.iter().map(|p| self.apply(p)).collect()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Transform {
        self.then(&rhs)
    }
}

/// Builds a right-handed orthonormal frame from a triangle and returns it as
/// a transform whose columns are the frame axes.
///
/// The x axis runs from `p2` to `p0`, z is the normal of the plane through
/// `p2 -> p0` and `p2 -> p1`, and y completes the frame. Translation is not
/// considered. Degenerate triangles are not checked.
pub fn basis_from_triangle(p0: &Point3<f64>, p1: &Point3<f64>, p2: &Point3<f64>) -> Transform {
    let x = (p0 - p2).normalize();
    let y = (p1 - p2).normalize();
    let z = x.cross(&y).normalize();
    let y = z.cross(&x).normalize();

    Transform::from_basis(&x, &y, &z)
}
