//! Six-fold sector symmetry of an icosahedron face.
//!
//! An icosahedron face splits into six copies of the LCD triangle, called
//! sectors. Seen from outside with the face normal along +z (the *global*
//! frame) and the bottom edge along +x, the sectors are numbered
//! anticlockwise starting below the centre on the right:
//!
//! ```text
//!                 ^ y
//!                 |
//!                 +
//!               . | .
//!             .   |   .
//!           .  3  |  2  .
//!         .  4    +    1  .   ----> x
//!       .      5  |  0      .
//!      + . . . . . . . . . . +
//! ```
//!
//! Constructions work in the *local* frame, where the face rests against
//! the equator with an icosahedron vertex at the north pole. The sector
//! table maps a global point in one sector onto its image in another; it is
//! generated from a 120° rotation and a mirror rather than written out by
//! hand.

use nalgebra::Point3;
use std::fmt;

use crate::geom::{basis_from_triangle, Transform};
use crate::spherical::SphericalCoord;
use crate::vertex::Vertex;


/// One of the six LCD copies tiling a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub enum Sector {
    S0,
    S1,
    S2,
    S3,
    S4,
    S5,
}

impl Sector {
    pub const ALL: [Sector; 6] = [
        Sector::S0,
        Sector::S1,
        Sector::S2,
        Sector::S3,
        Sector::S4,
        Sector::S5,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Face frames and sector-to-sector transforms, built once and read-only
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceSymmetry {
    local_to_global: Transform,
    global_to_local: Transform,
    exchange: [[Transform; 6]; 6],
}

impl FaceSymmetry {
    pub fn new() -> Self {
        let local_to_global = {
            let [p0, p1, p2] = Self::face_corners();
            basis_from_triangle(&p0, &p1, &p2)
        };

        // generator g_k carries sector 0 onto sector k
        let (rotate_120, rotate_240) = Self::sector_rotations();
        let mirror = Transform::scale(-1.0, 1.0, 1.0);
        let generators = [
            Transform::identity(),
            mirror * rotate_120,
            rotate_120,
            mirror * rotate_240,
            rotate_240,
            mirror,
        ];

        let mut exchange = [[Transform::identity(); 6]; 6];
        for (i, gi) in generators.iter().enumerate() {
            for (j, gj) in generators.iter().enumerate() {
                if i != j {
                    exchange[i][j] = gi.transpose() * *gj;
                }
            }
        }

        Self {
            local_to_global,
            global_to_local: local_to_global.transpose(),
            exchange,
        }
    }

    /// Corners of the reference face in the local frame.
    ///
    /// Corner 1 is the neighbour of the pole on azimuth 0; corners 0 and 2
    /// lie below the equator at ±36°. Mapped to the global frame they become
    /// the lower right, apex and lower left corners.
    pub fn face_corners() -> [Point3<f64>; 3] {
        let upper = 2.0f64.atan();
        let lower = 180f64.to_radians() - upper;
        [
            SphericalCoord::unit(36f64.to_radians(), lower).to_cartesian(),
            SphericalCoord::unit(0.0, upper).to_cartesian(),
            SphericalCoord::unit((-36f64).to_radians(), lower).to_cartesian(),
        ]
    }

    /// The +120° and +240° rotations about the face normal, read off the edges
    /// of an equilateral triangle centred on the origin.
    fn sector_rotations() -> (Transform, Transform) {
        let h = 3.0f64.sqrt();
        let p0 = Point3::new(0.5, -h / 6.0, 0.0);
        let p1 = Point3::new(0.0, h / 3.0, 0.0);
        let p2 = Point3::new(-0.5, -h / 6.0, 0.0);

        let to_120 = basis_from_triangle(&p1, &p2, &p0);
        let to_240 = basis_from_triangle(&p2, &p0, &p1);
        (to_120.transpose(), to_240.transpose())
    }

    pub fn local_to_global(&self) -> &Transform {
        &self.local_to_global
    }

    pub fn global_to_local(&self) -> &Transform {
        &self.global_to_local
    }

    /// Transform carrying a global point in sector `from` onto its image in
    /// sector `to`.
    pub fn exchange(&self, from: Sector, to: Sector) -> &Transform {
        &self.exchange[from.index()][to.index()]
    }

    /// Expands a point known in one sector (local frame) into all six images.
    ///
    /// The known point goes to the global frame, is carried into every other
    /// sector by the exchange table, and all six are brought back to the local
    /// frame, so the known sector's point is round-tripped as well. Spherical
    /// coordinates are recomputed from the cartesian results.
    pub fn replicate(&self, known: Sector, point: &Point3<f64>) -> Vertex {
        let global = self.local_to_global.apply(point);

        let points = Sector::ALL.map(|s| {
            let image = if s == known {
                global
            } else {
                self.exchange(known, s).apply(&global)
            };
            self.global_to_local.apply(&image)
        });

        Vertex::from_points(points)
    }
}

impl Default for FaceSymmetry {
    fn default() -> Self {
        Self::new()
    }
}
