// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Closed planar loops and their bounded edges

use crate::error::{Error, Result};
use crate::plane::Plane;
use nalgebra::{Point3, Vector3};

/// Bounded line segment between two points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
}

impl Segment {
    #[inline]
    pub fn new(start: Point3<f64>, end: Point3<f64>) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn direction(&self) -> Vector3<f64> {
        self.end - self.start
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.direction().norm()
    }
}

/// Build the closed segment chain `p0 -> p1 -> ... -> pn-1 -> p0`
pub fn segments_from_points(points: &[Point3<f64>]) -> Vec<Segment> {
    let n = points.len();
    (0..n)
        .map(|i| Segment::new(points[i], points[(i + 1) % n]))
        .collect()
}

/// Start point of every segment, in order
pub fn segment_starts(segments: &[Segment]) -> Vec<Point3<f64>> {
    segments.iter().map(|s| s.start).collect()
}

/// Closed polygon stored as its distinct vertices in loop order
///
/// The closing edge from the last vertex back to the first is implicit.
/// Instances produced by [`crate::LoopNormalizer`] have no coincident
/// neighbours, no colinear runs and at least three vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point3<f64>>,
}

impl Polygon {
    /// Wrap a vertex ring (without closing duplicate)
    pub fn new(vertices: Vec<Point3<f64>>) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(Error::TooFewPoints {
                needed: 3,
                got: vertices.len(),
            });
        }
        Ok(Self { vertices })
    }

    #[inline]
    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Vertex ring with the start point repeated at the end
    pub fn closed_points(&self) -> Vec<Point3<f64>> {
        let mut points = Vec::with_capacity(self.vertices.len() + 1);
        points.extend_from_slice(&self.vertices);
        points.push(self.vertices[0]);
        points
    }

    /// Closed edge sequence; the last edge ends at the first vertex
    pub fn edges(&self) -> Vec<Segment> {
        segments_from_points(&self.vertices)
    }

    /// Unweighted vertex average
    pub fn centroid(&self) -> Point3<f64> {
        let sum: Vector3<f64> = self.vertices.iter().map(|p| p.coords).sum();
        Point3::from(sum / self.vertices.len() as f64)
    }

    /// Same loop traversed in the opposite direction
    pub fn reversed(&self) -> Self {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        Self { vertices }
    }

    /// Signed area in `plane`'s basis anchored on the first non-degenerate
    /// edge. Positive means counter-clockwise looking down the plane normal.
    pub fn signed_area(&self, plane: &Plane, tolerance: f64) -> f64 {
        signed_area_in_plane(&self.vertices, plane, tolerance)
    }
}

/// Shoelace area of `ring` expressed in the `(u, w)` basis of `plane`, with
/// `u` taken from the first edge longer than `tolerance`.
///
/// Returns 0 when no such edge exists.
fn signed_area_in_plane(ring: &[Point3<f64>], plane: &Plane, tolerance: f64) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }

    let basis = (0..n)
        .map(|i| ring[(i + 1) % n] - ring[i])
        .filter(|d| d.norm() > tolerance)
        .find_map(|d| plane.basis_from(&d));

    let basis = match basis {
        Some(b) => b,
        None => return 0.0,
    };

    let flat: Vec<_> = ring.iter().map(|p| basis.to_2d(p)).collect();
    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += flat[i].x * flat[j].y;
        area -= flat[j].x * flat[i].y;
    }
    area * 0.5
}
