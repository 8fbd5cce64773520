use nalgebra::Point3;
use std::fmt;

use crate::config::VERTEX_SLOTS;
use crate::error::{Result, SolveError};
use crate::spherical::SphericalCoord;
use crate::symmetry::Sector;


/// A vertex slot in the construction table.
///
/// Slots are reused between frequencies with different meanings; each
/// construction documents what its slots hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub enum VertexId {
    V0,
    V1,
    V2,
    V3,
    V4,
    V5,
    V6,
    V7,
}

impl VertexId {
    pub const ALL: [VertexId; VERTEX_SLOTS] = [
        VertexId::V0,
        VertexId::V1,
        VertexId::V2,
        VertexId::V3,
        VertexId::V4,
        VertexId::V5,
        VertexId::V6,
        VertexId::V7,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// One physical point and its images in all six sectors, in the local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    points: [Point3<f64>; 6],
    coords: [SphericalCoord; 6],
}

impl Vertex {
    /// Builds a vertex from its six sector images, deriving the spherical
    /// coordinates from the cartesian points.
    pub fn from_points(points: [Point3<f64>; 6]) -> Self {
        let coords = points.map(|p| SphericalCoord::from_cartesian(&p));
        Self { points, coords }
    }

    pub fn point(&self, sector: Sector) -> Point3<f64> {
        self.points[sector.index()]
    }

    pub fn coord(&self, sector: Sector) -> SphericalCoord {
        self.coords[sector.index()]
    }
}

/// Fixed table of vertex slots shared by one construction run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexTable {
    slots: [Option<Vertex>; VERTEX_SLOTS],
}

impl VertexTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: VertexId) -> Option<&Vertex> {
        self.slots[id.index()].as_ref()
    }

    /// Stores a vertex, replacing whatever the slot held.
    pub fn insert(&mut self, id: VertexId, vertex: Vertex) {
        self.slots[id.index()] = Some(vertex);
    }

    pub fn clear(&mut self) {
        self.slots = [None; VERTEX_SLOTS];
    }

    /// Slots holding a vertex, in slot order.
    pub fn populated(&self) -> impl Iterator<Item = VertexId> + '_ {
        VertexId::ALL
            .into_iter()
            .filter(move |id| self.slots[id.index()].is_some())
    }

    fn require(&self, id: VertexId, sector: Sector) -> Result<&Vertex> {
        self.get(id).ok_or(SolveError::Unpopulated { vertex: id, sector })
    }

    pub fn point(&self, id: VertexId, sector: Sector) -> Result<Point3<f64>> {
        Ok(self.require(id, sector)?.point(sector))
    }

    pub fn coord(&self, id: VertexId, sector: Sector) -> Result<SphericalCoord> {
        Ok(self.require(id, sector)?.coord(sector))
    }

    pub fn inclination(&self, id: VertexId, sector: Sector) -> Result<f64> {
        Ok(self.coord(id, sector)?.inclination)
    }
}
