// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Centroid-in-host acceptance test
//!
//! Candidates are accepted when their vertex-average centroid lies inside the
//! host boundary. Only the centroid is tested; a candidate that straddles the
//! host edge but has its centroid inside is accepted.

use crate::error::{Error, Result};
use crate::plane::{Plane, PlaneBasis};
use crate::polygon::Polygon;
use nalgebra::{Point2, Point3};

/// Unweighted mean of `points`, or `None` when empty
pub fn centroid(points: &[Point3<f64>]) -> Option<Point3<f64>> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(nalgebra::Vector3::zeros(), |acc, p| acc + p.coords);
    Some(Point3::from(sum / points.len() as f64))
}

/// Even-odd test: count crossings of the ray from `point` towards +x
pub fn point_in_polygon_2d(point: &Point2<f64>, contour: &[Point2<f64>]) -> bool {
    let n = contour.len();
    if n < 3 {
        return false;
    }

    let crossings = (0..n)
        .filter(|&i| {
            let a = &contour[i];
            let b = &contour[(i + 1) % n];
            if (a.y > point.y) == (b.y > point.y) {
                return false;
            }
            let x_at = a.x + (point.y - a.y) / (b.y - a.y) * (b.x - a.x);
            point.x < x_at
        })
        .count();

    crossings % 2 == 1
}

/// Host boundary flattened into its own plane for repeated containment tests
#[derive(Debug, Clone)]
pub struct HostBoundary {
    basis: PlaneBasis,
    contour: Vec<Point2<f64>>,
}

impl HostBoundary {
    /// Flatten `boundary` using `plane`'s normal and the direction from the
    /// first vertex to the first vertex farther than `tolerance` from it.
    ///
    /// Fails with [`Error::NoPlane`] when no such direction lies in the plane.
    pub fn new(boundary: &Polygon, plane: &Plane, tolerance: f64) -> Result<Self> {
        let vertices = boundary.vertices();
        let first = vertices[0];

        let basis = vertices[1..]
            .iter()
            .map(|p| p - first)
            .filter(|d| d.norm() > tolerance)
            .find_map(|d| plane.basis_from(&d))
            .ok_or(Error::NoPlane)?;
        let basis = PlaneBasis {
            origin: first,
            ..basis
        };

        let contour = vertices.iter().map(|p| basis.to_2d(p)).collect();
        Ok(Self { basis, contour })
    }

    /// Whether `point`, projected into the host plane, lies inside the host
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        point_in_polygon_2d(&self.basis.to_2d(point), &self.contour)
    }

    /// Whether `candidate`'s vertex-average centroid lies inside the host
    pub fn contains_centroid(&self, candidate: &Polygon) -> bool {
        self.contains(&candidate.centroid())
    }
}
