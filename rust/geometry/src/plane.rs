// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plane fitting and projection
//!
//! A [`Plane`] is an origin plus a unit normal. It is derived once per host
//! boundary and then used to project candidate vertices, to test face
//! parallelism and to build the 2D basis for winding and containment tests.

use crate::error::{Error, Result};
use nalgebra::{Point2, Point3, Vector3};

/// Minimum cross-product magnitude accepted as a non-degenerate normal
pub const PLANE_FIT_TOLERANCE: f64 = 1e-6;

/// Strategy used to derive a plane from an ordered boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaneFit {
    /// First (edge, chord) pair whose cross product exceeds
    /// [`PLANE_FIT_TOLERANCE`]; the origin is that pair's shared vertex.
    #[default]
    FirstPair,
    /// Newell's method over the whole loop, through the vertex average.
    /// Smooths small out-of-plane noise at the cost of a different origin.
    Newell,
}

impl std::str::FromStr for PlaneFit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first-pair" | "firstpair" | "first_pair" => Ok(PlaneFit::FirstPair),
            "newell" => Ok(PlaneFit::Newell),
            other => Err(format!("unknown plane fit method '{}'", other)),
        }
    }
}

/// Infinite plane through `origin` with unit `normal`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub origin: Point3<f64>,
    pub normal: Vector3<f64>,
}

impl Plane {
    /// Create a plane, normalizing the given normal.
    ///
    /// Returns `None` when the normal is too short to normalize.
    pub fn new(origin: Point3<f64>, normal: Vector3<f64>) -> Option<Self> {
        let normal = normal.try_normalize(PLANE_FIT_TOLERANCE)?;
        Some(Self { origin, normal })
    }

    /// Signed distance of `point` along the normal
    #[inline]
    pub fn signed_distance(&self, point: &Point3<f64>) -> f64 {
        (point - self.origin).dot(&self.normal)
    }

    /// Orthogonal projection of `point` onto the plane
    #[inline]
    pub fn project_point(&self, point: &Point3<f64>) -> Point3<f64> {
        point - self.normal * self.signed_distance(point)
    }

    /// Whether `normal` is parallel (or anti-parallel) to this plane's normal,
    /// i.e. `|dot|` is within `tolerance` of 1.
    pub fn is_parallel_to(&self, normal: &Vector3<f64>, tolerance: f64) -> bool {
        match normal.try_normalize(PLANE_FIT_TOLERANCE) {
            Some(n) => (n.dot(&self.normal).abs() - 1.0).abs() <= tolerance,
            None => false,
        }
    }

    /// Plane with the same origin and the opposite normal
    pub fn flipped(&self) -> Self {
        Self {
            origin: self.origin,
            normal: -self.normal,
        }
    }

    /// In-plane orthonormal basis `(u, w)` where `u` is `direction` projected
    /// into the plane and `w = normal × u`.
    ///
    /// `(u, w, normal)` is right-handed, so a positive 2D signed area in this
    /// basis means counter-clockwise as seen looking down the normal.
    pub fn basis_from(&self, direction: &Vector3<f64>) -> Option<PlaneBasis> {
        let in_plane = direction - self.normal * direction.dot(&self.normal);
        let u = in_plane.try_normalize(PLANE_FIT_TOLERANCE)?;
        let w = self.normal.cross(&u);
        Some(PlaneBasis {
            origin: self.origin,
            u,
            w,
        })
    }
}

/// 2D coordinate frame inside a plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneBasis {
    pub origin: Point3<f64>,
    pub u: Vector3<f64>,
    pub w: Vector3<f64>,
}

impl PlaneBasis {
    /// Coordinates of `point` in this frame (out-of-plane component dropped)
    #[inline]
    pub fn to_2d(&self, point: &Point3<f64>) -> Point2<f64> {
        let d = point - self.origin;
        Point2::new(d.dot(&self.u), d.dot(&self.w))
    }
}

/// Fit a plane to an ordered boundary
pub fn fit_plane(points: &[Point3<f64>], method: PlaneFit) -> Result<Plane> {
    if points.len() < 3 {
        return Err(Error::TooFewPoints {
            needed: 3,
            got: points.len(),
        });
    }

    match method {
        PlaneFit::FirstPair => fit_first_pair(points),
        PlaneFit::Newell => fit_newell(points),
    }
}

fn fit_first_pair(points: &[Point3<f64>]) -> Result<Plane> {
    let n = points.len();
    for i in 0..n - 1 {
        let edge = points[i + 1] - points[i];
        for j in (i + 2)..n {
            let chord = points[j] - points[i];
            let cross = edge.cross(&chord);
            let len = cross.norm();
            if len > PLANE_FIT_TOLERANCE {
                return Ok(Plane {
                    origin: points[i],
                    normal: cross / len,
                });
            }
        }
    }
    Err(Error::NoPlane)
}

fn fit_newell(points: &[Point3<f64>]) -> Result<Plane> {
    let n = points.len();
    let mut normal = Vector3::<f64>::zeros();
    let mut sum = Vector3::<f64>::zeros();

    for i in 0..n {
        let curr = &points[i];
        let next = &points[(i + 1) % n];

        normal.x += (curr.y - next.y) * (curr.z + next.z);
        normal.y += (curr.z - next.z) * (curr.x + next.x);
        normal.z += (curr.x - next.x) * (curr.y + next.y);
        sum += curr.coords;
    }

    let len = normal.norm();
    if len <= PLANE_FIT_TOLERANCE {
        return Err(Error::NoPlane);
    }

    Ok(Plane {
        origin: Point3::from(sum / n as f64),
        normal: normal / len,
    })
}
