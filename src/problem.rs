use std::sync::Arc;

use itertools::Itertools;
use tracing::{debug, info};

use crate::{
    convergence::RootFinder,
    error::Result,
    result::{RootSolve, SolveResult},
    settings::Settings,
    solution::{Mesh, Solution},
    spherical::SphericalCoord,
    symmetry::{FaceSymmetry, Sector},
    trig::{ReferenceTriangle, SphericalTriangle},
    vertex::{VertexId, VertexTable},
};


/// A solve context for one truncation construction.
///
/// The symmetry transforms are shared; the vertex table is private to the
/// problem and rebuilt by every run.
#[derive(Debug, Clone)]
pub struct Problem {
    symmetry: Arc<FaceSymmetry>,
    pub reference: ReferenceTriangle,
    pub finder: RootFinder,
    pub vertices: VertexTable,
}

impl Problem {
    /// Creates a new `Problem` sharing an existing set of face transforms.
    pub fn new(symmetry: Arc<FaceSymmetry>, finder: RootFinder) -> Self {
        Self {
            symmetry,
            reference: ReferenceTriangle::icosahedron(),
            finder,
            vertices: VertexTable::new(),
        }
    }

    /// Creates a new `Problem` with root finder parameters taken from the
    /// settings.
    pub fn from_settings(symmetry: Arc<FaceSymmetry>, settings: &Settings) -> Self {
        Self::new(symmetry, settings.root_finder())
    }

    pub fn symmetry(&self) -> &FaceSymmetry {
        &self.symmetry
    }

    /// Places a vertex at explicit spherical coordinates in `sector`.
    pub fn place_at(&mut self, v: VertexId, sector: Sector, azimuth: f64, inclination: f64) {
        let point = SphericalCoord::unit(azimuth, inclination).to_cartesian();
        let vertex = self.symmetry.replicate(sector, &point);
        debug!(
            "placed {:?} in {:?}: az {:.9}°, inc {:.9}°",
            v,
            sector,
            azimuth.to_degrees(),
            inclination.to_degrees()
        );
        self.vertices.insert(v, vertex);
    }

    /// Places a vertex by solving the triangle (b, c, C): it lands at
    /// inclination `c` and azimuth `A`.
    #[allow(non_snake_case)]
    pub fn place_by_triangle(&mut self, v: VertexId, sector: Sector, b: f64, c: f64, C: f64) {
        let triangle = SphericalTriangle::solve_bcc(b, c, C);
        self.place_at(v, sector, triangle.A, triangle.c);
    }

    /// Places a vertex by triangle, taking side `c` from the inclination of
    /// another vertex as seen in `source_sector`.
    #[allow(non_snake_case)]
    pub fn place_from(
        &mut self,
        v: VertexId,
        sector: Sector,
        source: VertexId,
        source_sector: Sector,
        b: f64,
        C: f64,
    ) -> Result<()> {
        let c = self.inclination(source, source_sector)?;
        self.place_by_triangle(v, sector, b, c, C);
        Ok(())
    }

    pub fn inclination(&self, v: VertexId, sector: Sector) -> Result<f64> {
        self.vertices.inclination(v, sector)
    }

    /// Runs the root finder over a constrained placement.
    ///
    /// `residual` receives the problem and the trial angle (radians); it must
    /// redo every placement that depends on the angle before measuring.
    /// The seed is given in degrees.
    pub fn find_root<F>(&mut self, label: &'static str, seed: f64, mut residual: F) -> Result<RootSolve>
    where
        F: FnMut(&mut Problem, f64) -> Result<f64>,
    {
        let finder = self.finder;
        let mut x = seed.to_radians();
        let outcome = finder.solve(&mut x, |x| residual(self, x))?;
        debug!("{}: {:?} at {:.9}°", label, outcome, x.to_degrees());
        Ok(RootSolve {
            label,
            seed: x,
            outcome,
        })
    }

    /// Builds the vertex table for one solution.
    ///
    /// The table is cleared first, so a run never sees slots left over from
    /// an earlier one.
    pub fn run(&mut self, solution: Solution) -> Result<SolveResult> {
        self.vertices.clear();
        info!("Class I icosahedron {} - compute truncation configuration", solution);

        let roots = match solution {
            Solution::Icosa20 => {
                self.build_icosa20();
                vec![]
            }
            Solution::Icosa30 => {
                self.build_icosa30()?;
                vec![]
            }
            Solution::Icosa40 => {
                self.build_icosa40()?;
                vec![]
            }
            Solution::Icosa50 => vec![self.solve_icosa50()?],
            Solution::Icosa60A | Solution::Icosa60B => {
                self.build_icosa60_base()?;
                self.close_icosa60(solution)?.into_iter().collect()
            }
            Solution::Icosa70A | Solution::Icosa70B | Solution::Icosa70C => {
                let mut roots = vec![self.solve_icosa70_base()?];
                roots.extend(self.close_icosa70(solution)?);
                for line in self.inclination_report()? {
                    debug!("{}", line);
                }
                roots
            }
        };

        Ok(SolveResult { solution, roots })
    }

    /// Collects the mesh of one sector of the face, in the global frame.
    pub fn mesh(&self, solution: Solution) -> Result<Mesh> {
        let layout = solution.layout();
        let local_to_global = self.symmetry.local_to_global();

        let vertices = layout
            .picks
            .iter()
            .map(|&(v, s)| Ok(local_to_global.apply(&self.vertices.point(v, s)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Mesh {
            vertices,
            faces: layout.faces.to_vec(),
        })
    }

    /// Inclinations, in degrees, of the vertex rings of the (7,0) solution.
    ///
    /// Each line lists vertices that should sit on one circle of latitude;
    /// for a given closing two of the rings disagree.
    pub fn inclination_report(&self) -> Result<Vec<String>> {
        use Sector::*;
        use VertexId::*;

        const RINGS: [&[(VertexId, Sector)]; 6] = [
            &[(V2, S3), (V2, S2)],
            &[(V6, S2), (V1, S2)],
            &[(V5, S2), (V0, S2)],
            &[(V7, S2), (V4, S2), (V0, S1)],
            &[(V7, S1), (V5, S1), (V1, S1)],
            &[(V4, S0), (V5, S0), (V6, S0), (V2, S1)],
        ];

        RINGS
            .iter()
            .map(|ring| {
                let label = ring.iter().map(|(v, s)| format!("{},{}", v, s)).join(" ");
                let values = ring
                    .iter()
                    .map(|&(v, s)| Ok(format!("{:12.9}", self.inclination(v, s)?.to_degrees())))
                    .collect::<Result<Vec<_>>>()?;
                Ok(format!("{:<17} {}", label, values.join("  ")))
            })
            .collect()
    }
}

impl Default for Problem {
    fn default() -> Self {
        Self::new(Arc::new(FaceSymmetry::new()), RootFinder::default())
    }
}
