//! Catalogue of solvable truncations and their mesh layouts.
//!
//! A layout lists the (vertex, sector) images covering sector 0 of the
//! subdivided face and a fixed triangulation over them. Together with the
//! face transform this is everything the OFF writer needs.

use std::fmt;

use nalgebra::Point3;
use serde::Serialize;

use crate::config::OFF_PRECISION;
use crate::symmetry::Sector::{self, S0, S1, S2, S3, S4, S5};
use crate::vertex::VertexId::{self, V0, V1, V2, V3, V4, V5, V6, V7};


/// A class I frequency (b,0) with 2 <= b <= 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Frequency {
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
}

impl Frequency {
    pub const ALL: [Frequency; 6] = [
        Frequency::F2,
        Frequency::F3,
        Frequency::F4,
        Frequency::F5,
        Frequency::F6,
        Frequency::F7,
    ];

    pub fn number(self) -> u8 {
        self as u8 + 2
    }

    /// The solutions this frequency admits, in output order.
    pub fn solutions(self) -> &'static [Solution] {
        match self {
            Frequency::F2 => &[Solution::Icosa20],
            Frequency::F3 => &[Solution::Icosa30],
            Frequency::F4 => &[Solution::Icosa40],
            Frequency::F5 => &[Solution::Icosa50],
            Frequency::F6 => &[Solution::Icosa60A, Solution::Icosa60B],
            Frequency::F7 => &[Solution::Icosa70A, Solution::Icosa70B, Solution::Icosa70C],
        }
    }
}

impl TryFrom<u8> for Frequency {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2..=7 => Ok(Frequency::ALL[(value - 2) as usize]),
            _ => Err(format!(
                "frequency ({},0) is not supported, expected 2 to 7",
                value
            )),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},0)", self.number())
    }
}

/// One solved configuration. (6,0) and (7,0) have several valid closings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Solution {
    Icosa20,
    Icosa30,
    Icosa40,
    Icosa50,
    Icosa60A,
    Icosa60B,
    Icosa70A,
    Icosa70B,
    Icosa70C,
}

impl Solution {
    pub const ALL: [Solution; 9] = [
        Solution::Icosa20,
        Solution::Icosa30,
        Solution::Icosa40,
        Solution::Icosa50,
        Solution::Icosa60A,
        Solution::Icosa60B,
        Solution::Icosa70A,
        Solution::Icosa70B,
        Solution::Icosa70C,
    ];

    /// Output file stem.
    pub fn stem(self) -> &'static str {
        match self {
            Solution::Icosa20 => "icosa20",
            Solution::Icosa30 => "icosa30",
            Solution::Icosa40 => "icosa40",
            Solution::Icosa50 => "icosa50",
            Solution::Icosa60A => "icosa60_a",
            Solution::Icosa60B => "icosa60_b",
            Solution::Icosa70A => "icosa70_a",
            Solution::Icosa70B => "icosa70_b",
            Solution::Icosa70C => "icosa70_c",
        }
    }

    pub fn frequency(self) -> Frequency {
        match self {
            Solution::Icosa20 => Frequency::F2,
            Solution::Icosa30 => Frequency::F3,
            Solution::Icosa40 => Frequency::F4,
            Solution::Icosa50 => Frequency::F5,
            Solution::Icosa60A | Solution::Icosa60B => Frequency::F6,
            Solution::Icosa70A | Solution::Icosa70B | Solution::Icosa70C => Frequency::F7,
        }
    }

    /// Closing letter for frequencies with more than one solution.
    pub fn variant(self) -> Option<char> {
        match self {
            Solution::Icosa60A | Solution::Icosa70A => Some('A'),
            Solution::Icosa60B | Solution::Icosa70B => Some('B'),
            Solution::Icosa70C => Some('C'),
            _ => None,
        }
    }

    /// Vertex picks and triangulation. Every closing of a frequency shares
    /// one layout.
    pub fn layout(self) -> &'static Layout {
        match self.frequency() {
            Frequency::F2 => &ICOSA20,
            Frequency::F3 => &ICOSA30,
            Frequency::F4 => &ICOSA40,
            Frequency::F5 => &ICOSA50,
            Frequency::F6 => &ICOSA60,
            Frequency::F7 => &ICOSA70,
        }
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.variant() {
            Some(v) => write!(f, "{} ({})", self.frequency(), v),
            None => write!(f, "{}", self.frequency()),
        }
    }
}

/// Fixed (vertex, sector) picks and triangles over their indices.
#[derive(Debug, PartialEq)]
pub struct Layout {
    pub picks: &'static [(VertexId, Sector)],
    pub faces: &'static [[usize; 3]],
}

static ICOSA20: Layout = Layout {
    picks: &[(V0, S0), (V1, S0), (V0, S4), (V0, S1)],
    faces: &[[0, 1, 3], [0, 3, 2]],
};

static ICOSA30: Layout = Layout {
    picks: &[(V0, S5), (V0, S0), (V1, S0), (V2, S0), (V0, S1)],
    faces: &[[0, 1, 3], [1, 4, 3], [1, 2, 4]],
};

static ICOSA40: Layout = Layout {
    picks: &[
        (V0, S0),
        (V1, S0),
        (V2, S0),
        (V3, S5),
        (V3, S0),
        (V1, S1),
        (V3, S2),
    ],
    faces: &[[0, 4, 3], [0, 1, 4], [1, 5, 4], [1, 2, 5], [3, 4, 6]],
};

static ICOSA50: Layout = Layout {
    picks: &[
        (V0, S5),
        (V0, S0),
        (V1, S0),
        (V2, S0),
        (V3, S0),
        (V4, S0),
        (V1, S1),
        (V3, S3),
        (V3, S1),
    ],
    faces: &[
        [0, 1, 4],
        [1, 5, 4],
        [1, 2, 5],
        [2, 6, 5],
        [2, 3, 6],
        [4, 5, 8],
        [4, 8, 7],
    ],
};

static ICOSA60: Layout = Layout {
    picks: &[
        (V0, S0),
        (V1, S0),
        (V2, S0),
        (V3, S0),
        (V4, S5),
        (V4, S0),
        (V5, S0),
        (V2, S1),
        (V6, S0),
        (V4, S1),
    ],
    faces: &[
        [0, 1, 5],
        [0, 5, 4],
        [1, 2, 6],
        [1, 6, 5],
        [2, 3, 7],
        [2, 7, 6],
        [4, 5, 8],
        [5, 9, 8],
        [5, 6, 9],
    ],
};

static ICOSA70: Layout = Layout {
    picks: &[
        (V0, S5),
        (V0, S0),
        (V1, S0),
        (V2, S0),
        (V3, S0),
        (V4, S0),
        (V5, S0),
        (V6, S0),
        (V2, S1),
        (V7, S5),
        (V7, S0),
        (V5, S1),
        (V7, S2),
    ],
    faces: &[
        [0, 1, 5],
        [1, 6, 5],
        [1, 2, 6],
        [2, 7, 6],
        [2, 3, 7],
        [3, 8, 7],
        [3, 4, 8],
        [5, 10, 9],
        [5, 6, 10],
        [6, 11, 10],
        [6, 7, 11],
        [9, 10, 12],
    ],
};

/// A triangle mesh in the global face frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Point3<f64>>,
    pub faces: Vec<[usize; 3]>,
}

impl Mesh {
    /// Largest deviation of any vertex from the unit sphere.
    pub fn max_radius_error(&self) -> f64 {
        self.vertices
            .iter()
            .map(|p| (p.coords.norm() - 1.0).abs())
            .fold(0.0, f64::max)
    }
}

/// Object File Format text: header, counts, one vertex per line, then
/// triangles.
impl fmt::Display for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "OFF")?;
        writeln!(f, "{} {} 0", self.vertices.len(), self.faces.len())?;
        let width = OFF_PRECISION + 3;
        for p in &self.vertices {
            writeln!(
                f,
                "{:w$.prec$} {:w$.prec$} {:w$.prec$}",
                p.x,
                p.y,
                p.z,
                w = width,
                prec = OFF_PRECISION
            )?;
        }
        for [i, j, k] in &self.faces {
            writeln!(f, "3 {} {} {}", i, j, k)?;
        }
        Ok(())
    }
}
