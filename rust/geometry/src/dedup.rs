// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tolerance-aware polygon deduplication
//!
//! Two loops are equivalent when they have the same vertex count and some
//! cyclic shift of one matches the other vertex-for-vertex within tolerance.
//! The comparison is not reflection-invariant: loops are expected to have
//! gone through winding normalization first.
//!
//! Hashing is intentionally coarse (per-axis sums of grid-snapped vertices,
//! XOR-combined) so that any rotation of a loop lands in the same bucket;
//! the exact check resolves collisions.

use crate::polygon::Polygon;
use rustc_hash::FxHashMap;

/// Whether `a` and `b` describe the same closed loop up to starting vertex
pub fn loops_equivalent(a: &Polygon, b: &Polygon, tolerance: f64) -> bool {
    let (a, b) = (a.vertices(), b.vertices());
    let n = a.len();
    if n != b.len() {
        return false;
    }
    (0..n).any(|shift| (0..n).all(|i| (a[i] - b[(i + shift) % n]).norm() <= tolerance))
}

/// Bucket hash invariant under cyclic shifts of the vertex ring
pub fn coarse_hash(polygon: &Polygon, tolerance: f64) -> u64 {
    let snap = |v: f64| (v / tolerance).round() as i64;

    let (mut sx, mut sy, mut sz) = (0i64, 0i64, 0i64);
    for p in polygon.vertices() {
        sx = sx.wrapping_add(snap(p.x));
        sy = sy.wrapping_add(snap(p.y));
        sz = sz.wrapping_add(snap(p.z));
    }

    (sx as u64) ^ (sy as u64) ^ (sz as u64)
}

/// Insertion-ordered set of geometrically distinct polygons
#[derive(Debug, Clone)]
pub struct PolygonSet {
    tolerance: f64,
    items: Vec<Polygon>,
    buckets: FxHashMap<u64, Vec<usize>>,
}

impl PolygonSet {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            items: Vec::new(),
            buckets: FxHashMap::default(),
        }
    }

    /// Insert `polygon` unless an equivalent one is already present.
    ///
    /// Returns `false` for a duplicate, leaving the set unchanged.
    pub fn insert(&mut self, polygon: Polygon) -> bool {
        let key = coarse_hash(&polygon, self.tolerance);
        let bucket = self.buckets.entry(key).or_default();

        let duplicate = bucket
            .iter()
            .any(|&idx| loops_equivalent(&self.items[idx], &polygon, self.tolerance));
        if duplicate {
            return false;
        }

        bucket.push(self.items.len());
        self.items.push(polygon);
        true
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<Polygon> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn poly(coords: &[(f64, f64)]) -> Polygon {
        Polygon::new(coords.iter().map(|&(x, y)| Point3::new(x, y, 0.0)).collect()).unwrap()
    }

    fn square() -> Vec<(f64, f64)> {
        vec![(0.25, 0.25), (0.75, 0.25), (0.75, 0.75), (0.25, 0.75)]
    }

    #[test]
    fn test_rotation_is_equivalent() {
        let base = square();
        for shift in 0..base.len() {
            let mut rotated = base.clone();
            rotated.rotate_left(shift);
            assert!(loops_equivalent(&poly(&base), &poly(&rotated), 1e-6));
            assert_eq!(
                coarse_hash(&poly(&base), 1e-6),
                coarse_hash(&poly(&rotated), 1e-6)
            );
        }
    }

    #[test]
    fn test_reflection_is_not_equivalent() {
        let base = square();
        let mut reversed = base.clone();
        reversed.reverse();
        assert!(!loops_equivalent(&poly(&base), &poly(&reversed), 1e-6));
    }

    #[test]
    fn test_within_tolerance_is_equivalent() {
        let a = poly(&square());
        let b = poly(&[(0.25 + 4e-7, 0.25), (0.75, 0.25 - 3e-7), (0.75, 0.75), (0.25, 0.75)]);
        assert!(loops_equivalent(&a, &b, 1e-6));
        assert!(!loops_equivalent(&a, &b, 1e-8));
    }

    #[test]
    fn test_set_rejects_near_duplicate() {
        let mut set = PolygonSet::new(1e-6);
        let drifted = poly(&[(0.75, 0.25 - 3e-7), (0.75, 0.75), (0.25, 0.75), (0.25 + 4e-7, 0.25)]);

        assert!(set.insert(poly(&square())));
        assert_eq!(coarse_hash(&poly(&square()), 1e-6), coarse_hash(&drifted, 1e-6));
        assert!(!set.insert(drifted));
        assert_eq!(set.len(), 1);
        assert_eq!(set.into_vec()[0], poly(&square()));
    }

    #[test]
    fn test_different_vertex_count_differs() {
        let a = poly(&square());
        let b = poly(&[(0.25, 0.25), (0.75, 0.25), (0.75, 0.75)]);
        assert!(!loops_equivalent(&a, &b, 1e-6));
    }

    #[test]
    fn test_set_keeps_single_copy() {
        let mut set = PolygonSet::new(1e-6);
        let mut rotated = square();
        rotated.rotate_left(2);

        assert!(set.insert(poly(&square())));
        assert!(!set.insert(poly(&rotated)));
        assert!(set.insert(poly(&[(2.0, 2.0), (3.0, 2.0), (3.0, 3.0)])));

        assert_eq!(set.len(), 2);

        let items = set.into_vec();
        assert_eq!(items[0], poly(&square()));
        assert_eq!(items[1], poly(&[(2.0, 2.0), (3.0, 2.0), (3.0, 3.0)]));
    }

    #[test]
    fn test_hash_collision_resolved_by_equality() {
        // Same per-axis sums, different shapes
        let a = poly(&[(0.0, 0.0), (2.0, 0.0), (1.0, 2.0)]);
        let b = poly(&[(0.0, 1.0), (2.0, 1.0), (1.0, 0.0)]);
        assert_eq!(coarse_hash(&a, 1e-3), coarse_hash(&b, 1e-3));

        let mut set = PolygonSet::new(1e-3);
        assert!(set.insert(a));
        assert!(set.insert(b));
        assert_eq!(set.len(), 2);
    }
}
