//! Vertex constructions for each class I frequency.
//!
//! Every construction works in the local frame, where an icosahedron vertex
//! sits on the north pole and its neighbour along azimuth 0 is `2b` away
//! (`a`, `b`, `c` are the sides of the reference triangle). A placement in
//! one sector is replicated into all six, so later steps may read any image
//! of an earlier vertex.
//!
//! - (2,0), (3,0) and (4,0) are fully determined by direct placements
//! - (5,0) has one free angle, fixed by one root find
//! - (6,0) has one free angle with two admissible closings
//! - (7,0) needs a root find for its base and offers three closings

use crate::{
    error::Result,
    problem::Problem,
    result::RootSolve,
    solution::Solution,
    symmetry::Sector::{S0, S1, S2},
    vertex::VertexId::{self, V0, V1, V2, V3, V4, V5, V6, V7},
};


/// An icosahedron vertex at the lower right corner of the face.
const CORNER: VertexId = V1;
/// Midpoint of the bottom edge of the face.
const EDGE_MIDPOINT: VertexId = V0;
/// Centre of the face.
const CENTRE: VertexId = V2;

impl Problem {
    /// (2,0): the edge midpoints and the face corner.
    pub(crate) fn build_icosa20(&mut self) {
        let r = self.reference;
        self.place_at(EDGE_MIDPOINT, S0, 0.0, r.edge() + r.c + r.a);
        self.place_at(CORNER, S0, 36f64.to_radians(), 2.0 * (r.c + r.a));
    }

    /// (3,0): the face centre and corner, then the vertex one edge from
    /// the centre.
    pub(crate) fn build_icosa30(&mut self) -> Result<()> {
        let r = self.reference;
        self.place_at(CENTRE, S0, 0.0, r.edge() + r.c);
        self.place_at(CORNER, S0, 36f64.to_radians(), 2.0 * (r.c + r.a));
        self.place_from(V0, S1, CENTRE, S0, r.edge(), 144f64.to_radians())
    }

    /// (4,0): slot 2 holds the corner and slot 3 a point on the equator.
    pub(crate) fn build_icosa40(&mut self) -> Result<()> {
        let r = self.reference;
        let turn = 144f64.to_radians();
        self.place_at(V2, S0, 36f64.to_radians(), 2.0 * (r.c + r.a));
        // equivalent to a direct placement at (18°, 90°)
        self.place_by_triangle(V0, S1, r.edge(), 90f64.to_radians(), turn);
        self.place_at(V3, S2, 0.0, 90f64.to_radians());
        self.place_from(V1, S1, V3, S0, r.edge(), turn)
    }

    /// (5,0): the free angle offsets slot 3 below the face centre until
    /// slots 4 and 0 share a ring in sector 2.
    pub(crate) fn solve_icosa50(&mut self) -> Result<RootSolve> {
        self.find_root("icosa50", 9.0, |p, x| {
            let r = p.reference;
            let turn = 144f64.to_radians();
            p.place_at(V3, S0, 0.0, r.edge() + r.c + x);
            p.place_from(V4, S0, V3, S0, r.edge() + r.c, 120f64.to_radians())?;
            p.place_from(V1, S1, V3, S0, r.edge(), turn)?;
            p.place_from(V0, S1, V3, S1, r.edge(), turn)?;
            p.place_at(V2, S0, 36f64.to_radians(), 2.0 * (r.c + r.a));
            Ok(p.inclination(V4, S2)? - p.inclination(V0, S2)?)
        })
    }

    /// (6,0): everything except slot 4, which depends on the closing.
    pub(crate) fn build_icosa60_base(&mut self) -> Result<()> {
        let r = self.reference;
        let turn = 144f64.to_radians();
        self.place_at(V0, S0, 0.0, r.edge() + r.c + r.a);
        self.place_at(V6, S0, 0.0, r.edge() + r.c);
        self.place_at(V3, S0, 36f64.to_radians(), 2.0 * (r.c + r.a));

        self.place_from(V1, S1, V6, S0, r.edge(), turn)?;
        let ring = self.inclination(V1, S2)?;
        self.place_at(V5, S2, 0.0, ring);
        self.place_from(V2, S1, V5, S0, r.edge(), turn)
    }

    /// Slides slot 4 around the ring of slot 5 until it levels with slot 1
    /// (closing A) or slot 0 (closing B).
    ///
    /// Returns `None` for solutions other than (6,0).
    pub(crate) fn close_icosa60(&mut self, solution: Solution) -> Result<Option<RootSolve>> {
        let (label, seed, target) = match solution {
            Solution::Icosa60A => ("icosa60_a", 5.0, (V4, S1, V1, S1)),
            Solution::Icosa60B => ("icosa60_b", 6.0, (V4, S2, V0, S1)),
            _ => return Ok(None),
        };
        let (v, vs, w, ws) = target;

        let root = self.find_root(label, seed, |p, x| {
            let ring = p.inclination(V5, S0)?;
            p.place_at(V4, S0, x, ring);
            Ok(p.inclination(v, vs)? - p.inclination(w, ws)?)
        })?;
        Ok(Some(root))
    }

    /// (7,0): the free angle raises slot 7 above the face centre until the
    /// ring through slot 6 levels with slot 1. Slot 5 is left for the
    /// closings.
    pub(crate) fn solve_icosa70_base(&mut self) -> Result<RootSolve> {
        self.find_root("icosa70", 5.5, |p, x| {
            let r = p.reference;
            let turn = 144f64.to_radians();
            p.place_at(V3, S0, 36f64.to_radians(), 2.0 * (r.a + r.c));

            p.place_at(V7, S2, 0.0, r.edge() + r.c - x);
            p.place_from(V4, S2, V7, S2, r.edge() + r.c, 60f64.to_radians())?;
            p.place_from(V0, S1, V7, S2, r.edge(), turn)?;

            p.place_from(V1, S1, V7, S1, r.edge(), turn)?;

            p.place_from(V6, S0, V4, S0, r.edge() + r.c, 120f64.to_radians())?;
            p.place_from(V2, S1, V4, S0, r.edge(), turn)?;
            Ok(p.inclination(V6, S2)? - p.inclination(V1, S2)?)
        })
    }

    /// Places slot 5 for one of the three (7,0) closings:
    /// - A: on the ring of slot 0 in sector 2, levelled with slot 1
    /// - B: on the same ring, levelled with slot 4
    /// - C: on the ring of slot 4 in sector 0, levelled with slot 1
    ///
    /// Returns `None` for solutions other than (7,0).
    pub(crate) fn close_icosa70(&mut self, solution: Solution) -> Result<Option<RootSolve>> {
        let label = match solution {
            Solution::Icosa70A => "icosa70_a",
            Solution::Icosa70B => "icosa70_b",
            Solution::Icosa70C => "icosa70_c",
            _ => return Ok(None),
        };

        let root = self.find_root(label, 4.0, |p, x| match solution {
            Solution::Icosa70C => {
                let ring = p.inclination(V4, S0)?;
                p.place_at(V5, S0, x, ring);
                Ok(p.inclination(V5, S1)? - p.inclination(V1, S1)?)
            }
            _ => {
                let ring = p.inclination(V0, S2)?;
                p.place_at(V5, S2, x, ring);
                if solution == Solution::Icosa70B {
                    Ok(p.inclination(V5, S0)? - p.inclination(V4, S0)?)
                } else {
                    Ok(p.inclination(V5, S1)? - p.inclination(V1, S1)?)
                }
            }
        })?;
        Ok(Some(root))
    }
}
