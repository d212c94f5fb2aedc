// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Loop normalization
//!
//! Turns a raw boundary (edges with shared or repeated endpoints, zero-length
//! edges, colinear runs, slight out-of-plane drift) into a minimal closed
//! [`Polygon`] lying on a given plane:
//!
//! 1. every vertex is projected onto the plane
//! 2. vertices within tolerance of their predecessor are skipped and the
//!    loop is explicitly closed
//! 3. colinear runs are collapsed until stable
//! 4. edges shorter than tolerance are dropped and closure is forced
//! 5. fewer than three distinct vertices is an error
//!
//! [`LoopNormalizer::normalize_oriented`] additionally normalizes winding to
//! counter-clockwise looking down the plane normal.

use crate::error::{Error, Result};
use crate::plane::Plane;
use crate::polygon::{Polygon, Segment};
use nalgebra::Point3;

/// Upper bound on the sine between consecutive edge directions for the
/// shared vertex to count as colinear
const COLINEAR_SINE: f64 = 1e-6;

/// Lower bound on the cosine between consecutive edge directions; excludes
/// back-tracking spikes from the colinear collapse
const COLINEAR_COSINE: f64 = 0.9999;

/// Default distance tolerance (τ) in model length units
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// Cleans raw boundaries into normalized polygons
#[derive(Debug, Clone, Copy)]
pub struct LoopNormalizer {
    tolerance: f64,
}

impl LoopNormalizer {
    /// Create a normalizer with distance tolerance `tolerance`
    pub fn new(tolerance: f64) -> Result<Self> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(Error::InvalidTolerance(tolerance));
        }
        Ok(Self { tolerance })
    }

    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Project, deduplicate, collapse colinear runs and re-close `boundary`.
    ///
    /// Winding is left as encountered.
    pub fn normalize(&self, boundary: &[Segment], plane: &Plane) -> Result<Polygon> {
        let collected = self.collect_vertices(boundary, plane);
        let ring = self.collapse_colinear(open_ring(collected, self.tolerance))?;
        let ring = self.rebuild(ring);

        let distinct = self.distinct_count(&ring);
        if distinct < 3 {
            return Err(Error::DegenerateLoop(distinct));
        }
        Polygon::new(ring)
    }

    /// [`Self::normalize`] followed by winding normalization
    pub fn normalize_oriented(&self, boundary: &[Segment], plane: &Plane) -> Result<Polygon> {
        let polygon = self.normalize(boundary, plane)?;
        Ok(self.orient(polygon, plane))
    }

    /// Reverse `polygon` if it winds clockwise looking down `plane`'s normal
    pub fn orient(&self, polygon: Polygon, plane: &Plane) -> Polygon {
        if polygon.signed_area(plane, self.tolerance) < 0.0 {
            polygon.reversed()
        } else {
            polygon
        }
    }

    /// Steps 1-2: projected vertex walk, closed with the start point
    fn collect_vertices(&self, boundary: &[Segment], plane: &Plane) -> Vec<Point3<f64>> {
        let mut points: Vec<Point3<f64>> = Vec::with_capacity(boundary.len() + 1);

        for segment in boundary {
            for p in [segment.start, segment.end] {
                let p = plane.project_point(&p);
                match points.last() {
                    Some(last) if (p - last).norm() <= self.tolerance => {}
                    _ => points.push(p),
                }
            }
        }

        if let (Some(first), Some(last)) = (points.first().copied(), points.last()) {
            if points.len() > 1 && (first - last).norm() > self.tolerance {
                points.push(first);
            }
        }

        points
    }

    /// Step 3: drop the middle vertex of near-parallel, same-direction edge
    /// pairs, repeating until nothing changes
    ///
    /// Triples are examined cyclically so the vertex at the seam is treated
    /// like any other.
    fn collapse_colinear(&self, mut ring: Vec<Point3<f64>>) -> Result<Vec<Point3<f64>>> {
        loop {
            if ring.len() < 3 {
                return Err(Error::DegenerateLoop(ring.len()));
            }

            let n = ring.len();
            let removable = (0..n).find(|&i| {
                let a = &ring[(i + n - 1) % n];
                let b = &ring[i];
                let c = &ring[(i + 1) % n];
                self.is_colinear(a, b, c)
            });

            match removable {
                Some(i) => {
                    ring.remove(i);
                }
                None => return Ok(ring),
            }
        }
    }

    fn is_colinear(&self, a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> bool {
        let ab = b - a;
        let bc = c - b;
        let (len_ab, len_bc) = (ab.norm(), bc.norm());
        if len_ab <= self.tolerance || len_bc <= self.tolerance {
            return false;
        }

        let d1 = ab / len_ab;
        let d2 = bc / len_bc;
        d1.cross(&d2).norm() <= COLINEAR_SINE && d1.dot(&d2) > COLINEAR_COSINE
    }

    /// Step 4: keep only vertices that start an edge longer than tolerance,
    /// including the closing edge back to the first kept vertex
    fn rebuild(&self, ring: Vec<Point3<f64>>) -> Vec<Point3<f64>> {
        let mut kept: Vec<Point3<f64>> = Vec::with_capacity(ring.len());
        for p in ring {
            match kept.last() {
                Some(last) if (p - last).norm() <= self.tolerance => {}
                _ => kept.push(p),
            }
        }
        while kept.len() > 1 {
            let (first, last) = (kept[0], kept[kept.len() - 1]);
            if (first - last).norm() <= self.tolerance {
                kept.pop();
            } else {
                break;
            }
        }
        kept
    }

    /// Step 5: number of vertices not within tolerance of an earlier one
    fn distinct_count(&self, ring: &[Point3<f64>]) -> usize {
        let mut seen: Vec<&Point3<f64>> = Vec::with_capacity(ring.len());
        for p in ring {
            if seen.iter().all(|q| (p - *q).norm() > self.tolerance) {
                seen.push(p);
            }
        }
        seen.len()
    }
}

impl Default for LoopNormalizer {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// Drop the closing duplicate of a closed vertex list
fn open_ring(mut closed: Vec<Point3<f64>>, tolerance: f64) -> Vec<Point3<f64>> {
    if closed.len() > 1 {
        let (first, last) = (closed[0], closed[closed.len() - 1]);
        if (first - last).norm() <= tolerance {
            closed.pop();
        }
    }
    closed
}
