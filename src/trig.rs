//! Oblique spherical triangles and the icosahedral reference triangle.
//!
//! This module solves spherical triangles given two sides and the angle
//! opposite one of them, and provides the lowest-common-denominator (LCD)
//! triangle of an icosahedron face from which every construction measures
//! its angles.
//!
//! The trigonometry provides:
//! - Napier's analogies for the general (b, c, C) case
//! - The ambiguous branch where b > c and C is acute
//! - Clamped inverse functions tolerant of round-off at ±1
//!
//! # Conventions
//!
//! Sides `a, b, c` are arcs in radians; `A, B, C` are the opposite vertex
//! angles. When a triangle is used to place a vertex, vertex `A` sits on the
//! pole, side `b` runs down azimuth 0 and side `c` reaches the new point.

use std::f64::consts::{FRAC_PI_2, PI};

#[cfg(test)]
mod tests {

    use super::*;
    use approx::assert_abs_diff_eq;

    /// Side `c` of the triangle with sides `a`, `b` enclosing angle `C`.
    fn third_side(a: f64, b: f64, cc: f64) -> f64 {
        (a.cos() * b.cos() + a.sin() * b.sin() * cc.cos()).acos()
    }

    fn assert_law_of_cosines(t: &SphericalTriangle) {
        let lhs = t.a.cos();
        let rhs = t.b.cos() * t.c.cos() + t.b.sin() * t.c.sin() * t.A.cos();
        assert!((lhs - rhs).abs() < 1e-9, "lhs {} rhs {} for {:?}", lhs, rhs, t);
    }

    #[test]
    fn recovers_known_triangle() {
        let (a, b, cc) = (0.7, 0.5, 1.2);
        let c = third_side(a, b, cc);
        assert!(b < c);

        let t = SphericalTriangle::solve_bcc(b, c, cc);
        assert_abs_diff_eq!(t.a, a, epsilon = 1e-9);
        assert_law_of_cosines(&t);

        // law of sines ties the solved angles back to the inputs
        assert_abs_diff_eq!(t.B.sin() / b.sin(), cc.sin() / c.sin(), epsilon = 1e-9);
        assert_abs_diff_eq!(t.A.sin() / t.a.sin(), cc.sin() / c.sin(), epsilon = 1e-9);
    }

    #[test]
    fn obtuse_included_angle() {
        let (a, b, cc) = (0.4, 0.6, 2.2);
        let c = third_side(a, b, cc);

        let t = SphericalTriangle::solve_bcc(b, c, cc);
        assert_abs_diff_eq!(t.a, a, epsilon = 1e-9);
        assert_law_of_cosines(&t);
    }

    #[test]
    fn ambiguous_branch_is_consistent() {
        let (a, b, cc) = (0.3, 0.5, 0.6);
        let c = third_side(a, b, cc);
        assert!(b > c && cc < FRAC_PI_2);

        let t = SphericalTriangle::solve_bcc(b, c, cc);
        assert!(t.A > 0.0);
        assert!(t.a.is_finite() && t.B.is_finite());
        assert_law_of_cosines(&t);
        assert_abs_diff_eq!(t.B.sin() / b.sin(), cc.sin() / c.sin(), epsilon = 1e-9);
    }

    #[test]
    fn inputs_are_kept() {
        let t = SphericalTriangle::solve_bcc(0.5, 0.8, 1.0);
        assert_eq!((t.b, t.c, t.C), (0.5, 0.8, 1.0));
    }

    #[test]
    fn clamp_tolerates_round_off() {
        assert_eq!(asin_clamped(1.0 + 1e-15), FRAC_PI_2);
        assert_eq!(asin_clamped(-1.0 - 1e-15), -FRAC_PI_2);
        assert_eq!(acos_clamped(1.0 + 1e-15), 0.0);
    }

    #[test]
    fn icosahedron_reference() {
        let r = ReferenceTriangle::icosahedron();
        // vertex to face centre
        assert_abs_diff_eq!(r.c.to_degrees(), 37.377368141, epsilon = 1e-8);
        // neighbouring icosahedron vertices are atan 2 apart
        assert_abs_diff_eq!(r.edge(), (2.0f64).atan(), epsilon = 1e-14);
        // face centre to edge midpoint
        assert_abs_diff_eq!(r.a.to_degrees(), 20.905157447, epsilon = 1e-8);
        assert_abs_diff_eq!(r.C, FRAC_PI_2);

        // the LCD triangle is right angled at C
        let t = r.as_triangle();
        assert_abs_diff_eq!(t.c.cos(), t.a.cos() * t.b.cos(), epsilon = 1e-14);
    }

    #[test]
    fn ambiguous_branch_takes_supplementary_pair() {
        // the (7,0) ring placement: first candidate gives a negative apex
        let r = ReferenceTriangle::icosahedron();
        let b = r.edge() + r.c;
        let c = b - 0.1;
        let cc = 60f64.to_radians();

        let t = SphericalTriangle::solve_bcc(b, c, cc);
        let b1 = (cc.sin() * b.sin() / c.sin()).asin();
        assert_abs_diff_eq!(t.B, PI - b1, epsilon = 1e-12);
        assert!(t.B > FRAC_PI_2);
        assert_abs_diff_eq!(t.A, 0.16974343443497125, epsilon = 1e-9);
        assert_abs_diff_eq!(t.a, 0.19553965182870603, epsilon = 1e-9);
        assert_law_of_cosines(&t);
    }
}

/// Clamps to [-1, 1] before taking the inverse sine.
pub fn asin_clamped(x: f64) -> f64 {
    x.clamp(-1.0, 1.0).asin()
}

/// Clamps to [-1, 1] before taking the inverse cosine.
pub fn acos_clamped(x: f64) -> f64 {
    x.clamp(-1.0, 1.0).acos()
}

/// A spherical triangle, all six parts in radians.
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SphericalTriangle {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub A: f64,
    pub B: f64,
    pub C: f64,
}

impl SphericalTriangle {
    /// Solves an oblique spherical triangle from sides `b`, `c` and the angle
    /// `C` opposite `c`.
    ///
    /// **Context**: Vertex constructions know the arc from the pole to an
    /// icosahedron vertex (`b`), the arc from the pole to the new point (`c`)
    /// and the turn at the icosahedron vertex (`C`). The azimuth of the new
    /// point is the apex angle `A`.
    ///
    /// **How it Works**: The law of sines gives `B`; Napier's analogies then
    /// give `a`, and the law of cosines gives `A`. When `b > c` and `C` is
    /// acute two triangles may fit, so both values of `B` are tried through
    /// the half-angle analogy for `A` and the first with `A > 0` is kept.
    ///
    /// Inputs must satisfy 0 < b, c, C < π and describe a real triangle;
    /// otherwise the result may contain NaN.
    #[allow(non_snake_case)]
    pub fn solve_bcc(b: f64, c: f64, C: f64) -> Self {
        let sine_rule = (C.sin() * b.sin() / c.sin()).clamp(-1.0, 1.0);

        let (a, A, B) = if b > c && C < FRAC_PI_2 {
            let B1 = sine_rule.asin();
            let B2 = PI - B1;
            let ratio = ((c + b) / 2.0).sin() / ((c - b) / 2.0).sin();

            let A1 = 2.0 * (1.0 / (((C - B1) / 2.0).tan() * ratio)).atan();
            let A2 = 2.0 * (1.0 / (((C - B2) / 2.0).tan() * ratio)).atan();

            let (A, B) = if A1 < 0.0 { (A2, B2) } else { (A1, B1) };
            let a = asin_clamped(A.sin() * b.sin() / B.sin());
            (a, A, B)
        } else {
            let B = sine_rule.asin();
            let a = 2.0
                * (((b + c) / 2.0).tan() * ((B + C) / 2.0).cos() / ((B - C) / 2.0).cos()).atan();
            let A = acos_clamped((a.cos() - b.cos() * c.cos()) / (b.sin() * c.sin()));
            (a, A, B)
        };

        Self { a, b, c, A, B, C }
    }
}

/// The LCD triangle of an icosahedron face.
///
/// Vertex `A` is an icosahedron vertex (36°, a tenth of a turn), `B` the
/// face centre (60°) and `C` the midpoint of an edge (90°). Side `c` joins an
/// icosahedron vertex to the face centre, `b` an icosahedron vertex to the
/// edge midpoint, and `a` the face centre to the edge midpoint.
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceTriangle {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub A: f64,
    pub B: f64,
    pub C: f64,
}

impl ReferenceTriangle {
    /// Derives the sides from the two defining angles of a right spherical
    /// triangle with `C = 90°`.
    #[allow(non_snake_case)]
    pub fn from_angles(A: f64, B: f64) -> Self {
        // cos A = cos a sin B, cos B = cos b sin A, cos c = cot A cot B
        let a = (A.cos() / B.sin()).acos();
        let b = (B.cos() / A.sin()).acos();
        let c = (1.0 / (A.tan() * B.tan())).acos();
        Self {
            a,
            b,
            c,
            A,
            B,
            C: FRAC_PI_2,
        }
    }

    pub fn icosahedron() -> Self {
        Self::from_angles(36f64.to_radians(), 60f64.to_radians())
    }

    pub fn as_triangle(&self) -> SphericalTriangle {
        SphericalTriangle {
            a: self.a,
            b: self.b,
            c: self.c,
            A: self.A,
            B: self.B,
            C: self.C,
        }
    }

    /// Arc between two neighbouring icosahedron vertices.
    pub fn edge(&self) -> f64 {
        2.0 * self.b
    }
}

impl Default for ReferenceTriangle {
    fn default() -> Self {
        Self::icosahedron()
    }
}
