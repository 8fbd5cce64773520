//! Spherical coordinates in the physics convention.
//!
//! Inclination is measured from +z, azimuth from +x in the xy-plane. Every
//! vertex in this crate sits on the unit sphere, so the radius is carried for
//! completeness rather than varied.

use nalgebra::Point3;
use std::fmt;

use crate::config::ZERO_EPSILON;


/// A spherical coordinate, angles in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SphericalCoord {
    pub radius: f64,
    pub azimuth: f64,
    pub inclination: f64,
}

impl SphericalCoord {
    pub fn new(radius: f64, azimuth: f64, inclination: f64) -> Self {
        Self {
            radius,
            azimuth,
            inclination,
        }
    }

    /// A point on the unit sphere.
    pub fn unit(azimuth: f64, inclination: f64) -> Self {
        Self::new(1.0, azimuth, inclination)
    }

    pub fn to_cartesian(&self) -> Point3<f64> {
        let (sin_inc, cos_inc) = self.inclination.sin_cos();
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        Point3::new(
            self.radius * sin_inc * cos_az,
            self.radius * sin_inc * sin_az,
            self.radius * cos_inc,
        )
    }

    /// Converts a cartesian point.
    ///
    /// A point within [`ZERO_EPSILON`] of the origin yields zero inclination
    /// and azimuth. Azimuth lies in (-180°, 180°]; coordinates within
    /// [`ZERO_EPSILON`] of an axis snap to that axis.
    pub fn from_cartesian(p: &Point3<f64>) -> Self {
        let radius = p.coords.norm();
        if radius.abs() <= ZERO_EPSILON {
            return Self::new(radius, 0.0, 0.0);
        }

        let inclination = (p.z / radius).acos();
        let azimuth = azimuth_of(p.x, p.y);

        Self::new(radius, azimuth, inclination)
    }

    pub fn azimuth_degrees(&self) -> f64 {
        self.azimuth.to_degrees()
    }

    pub fn inclination_degrees(&self) -> f64 {
        self.inclination.to_degrees()
    }
}

fn azimuth_of(x: f64, y: f64) -> f64 {
    let y_zero = y.abs() <= ZERO_EPSILON;
    if x.abs() <= ZERO_EPSILON {
        if y_zero {
            0.0
        } else if y > 0.0 {
            90f64.to_radians()
        } else {
            (-90f64).to_radians()
        }
    } else if x > 0.0 {
        if y_zero {
            0.0
        } else {
            (y / x).atan()
        }
    } else if y_zero {
        180f64.to_radians()
    } else if y > 0.0 {
        180f64.to_radians() + (y / x).atan()
    } else {
        (-180f64).to_radians() + (y / x).atan()
    }
}

impl fmt::Display for SphericalCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(r {:.6}, az {:.9}°, inc {:.9}°)",
            self.radius,
            self.azimuth_degrees(),
            self.inclination_degrees()
        )
    }
}
