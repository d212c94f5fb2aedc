// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axis-aligned box kernel for driving the pipeline in tests.
//!
//! Solids are boxes, intersection is exact box overlap, and extrusion only
//! supports axis-aligned directions (taking the profile's bounding box).

#![allow(dead_code)]

use nalgebra::{Point3, Vector3};
use openings_geometry::{segments_from_points, Polygon, Segment};
use openings_processing::{
    CuttingElement, ElementId, GeometryKernel, KernelError, KernelOp, KernelResult, PlanarFace,
    TargetSurface,
};
use std::cell::Cell;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Aabb {
    pub fn new(min: (f64, f64, f64), max: (f64, f64, f64)) -> Self {
        Self {
            min: Point3::new(min.0, min.1, min.2),
            max: Point3::new(max.0, max.1, max.2),
        }
    }

    pub fn volume(&self) -> f64 {
        let d = self.max - self.min;
        d.x.max(0.0) * d.y.max(0.0) * d.z.max(0.0)
    }

    pub fn intersection(&self, other: &Aabb) -> Option<Aabb> {
        let min = Point3::new(
            self.min.x.max(other.min.x),
            self.min.y.max(other.min.y),
            self.min.z.max(other.min.z),
        );
        let max = Point3::new(
            self.max.x.min(other.max.x),
            self.max.y.min(other.max.y),
            self.max.z.min(other.max.z),
        );
        if (0..3).any(|k| max[k] < min[k]) {
            None
        } else {
            Some(Aabb { min, max })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestSolid {
    pub bounds: Aabb,
    /// Makes the boolean fail when this solid takes part
    pub poisoned: bool,
}

impl TestSolid {
    pub fn new(bounds: Aabb) -> Self {
        Self {
            bounds,
            poisoned: false,
        }
    }

    pub fn poisoned(bounds: Aabb) -> Self {
        Self {
            bounds,
            poisoned: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TestElement {
    pub solids: Vec<TestSolid>,
    /// Instance geometry; only the first nesting level is resolved
    pub nested: Vec<TestElement>,
    /// Solid lookup fails
    pub broken: bool,
}

impl TestElement {
    pub fn boxed(bounds: Aabb) -> Self {
        Self {
            solids: vec![TestSolid::new(bounds)],
            ..Default::default()
        }
    }
}

#[derive(Debug, Default)]
pub struct BoxKernel {
    /// Extrusion along this direction fails
    pub reject_direction: Option<Vector3<f64>>,
    pub fail_all_extrusions: bool,
    pub fail_faces: bool,
    pub extrude_calls: Cell<usize>,
    pub intersect_calls: Cell<usize>,
}

impl BoxKernel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GeometryKernel for BoxKernel {
    type Solid = TestSolid;
    type Element = TestElement;

    fn element_solids(&self, element: &TestElement) -> KernelResult<Vec<TestSolid>> {
        if element.broken {
            return Err(KernelError::new(KernelOp::ElementSolids, "unreadable element"));
        }
        let mut solids = element.solids.clone();
        for inner in &element.nested {
            solids.extend(inner.solids.iter().copied());
        }
        Ok(solids)
    }

    fn extrude(
        &self,
        profile: &Polygon,
        direction: &Vector3<f64>,
        distance: f64,
    ) -> KernelResult<TestSolid> {
        self.extrude_calls.set(self.extrude_calls.get() + 1);

        if self.fail_all_extrusions {
            return Err(KernelError::new(KernelOp::Extrude, "extrusion disabled"));
        }
        if let Some(rejected) = self.reject_direction {
            if (rejected - direction).norm() < 1e-9 {
                return Err(KernelError::new(KernelOp::Extrude, "self-intersecting sweep"));
            }
        }

        let axis = (0..3)
            .find(|&k| direction[k].abs() > 1.0 - 1e-9)
            .ok_or_else(|| KernelError::new(KernelOp::Extrude, "direction not axis aligned"))?;

        let mut min = profile.vertices()[0];
        let mut max = min;
        for p in profile.vertices() {
            for k in 0..3 {
                min[k] = min[k].min(p[k]);
                max[k] = max[k].max(p[k]);
            }
        }
        if direction[axis] > 0.0 {
            max[axis] += distance;
        } else {
            min[axis] -= distance;
        }

        Ok(TestSolid::new(Aabb { min, max }))
    }

    fn intersect(&self, a: &TestSolid, b: &TestSolid) -> KernelResult<Option<TestSolid>> {
        self.intersect_calls.set(self.intersect_calls.get() + 1);
        if a.poisoned || b.poisoned {
            return Err(KernelError::new(KernelOp::Intersect, "non-manifold input"));
        }
        Ok(a.bounds.intersection(&b.bounds).map(TestSolid::new))
    }

    fn planar_faces(&self, solid: &TestSolid) -> KernelResult<Vec<PlanarFace>> {
        if self.fail_faces {
            return Err(KernelError::new(KernelOp::PlanarFaces, "face walk failed"));
        }
        Ok(box_faces(&solid.bounds))
    }

    fn volume(&self, solid: &TestSolid) -> f64 {
        solid.bounds.volume()
    }
}

/// Six faces of a box, each wound counter-clockwise about its outward normal
pub fn box_faces(b: &Aabb) -> Vec<PlanarFace> {
    let mut faces = Vec::with_capacity(6);
    for k in 0..3 {
        let (a, c) = ((k + 1) % 3, (k + 2) % 3);
        for (sign, level) in [(-1.0, b.min[k]), (1.0, b.max[k])] {
            let corner = |u: f64, v: f64| {
                let mut p = Point3::origin();
                p[k] = level;
                p[a] = u;
                p[c] = v;
                p
            };
            let mut ring = vec![
                corner(b.min[a], b.min[c]),
                corner(b.max[a], b.min[c]),
                corner(b.max[a], b.max[c]),
                corner(b.min[a], b.max[c]),
            ];
            if sign < 0.0 {
                ring.reverse();
            }
            let mut normal = Vector3::zeros();
            normal[k] = sign;
            faces.push(PlanarFace::new(normal, segments_from_points(&ring)));
        }
    }
    faces
}

pub fn square_ring(min: (f64, f64), max: (f64, f64), z: f64) -> Vec<Point3<f64>> {
    vec![
        Point3::new(min.0, min.1, z),
        Point3::new(max.0, min.1, z),
        Point3::new(max.0, max.1, z),
        Point3::new(min.0, max.1, z),
    ]
}

pub fn surface(id: u64, ring: &[Point3<f64>]) -> TargetSurface {
    TargetSurface::new(ElementId(id), segments_from_points(ring))
}

pub fn unit_square_surface(id: u64) -> TargetSurface {
    surface(id, &square_ring((0.0, 0.0), (1.0, 1.0), 0.0))
}

pub fn cutter(id: u64, element: TestElement) -> CuttingElement<TestElement> {
    CuttingElement::new(ElementId(id), element)
}

/// Vertical shaft through the z = 0 plane over the given footprint
pub fn shaft(min: (f64, f64), max: (f64, f64)) -> TestElement {
    TestElement::boxed(Aabb::new((min.0, min.1, -1.0), (max.0, max.1, 1.0)))
}

pub fn polygon(ring: Vec<Point3<f64>>) -> Polygon {
    Polygon::new(ring).expect("test polygon")
}

pub fn edges_of(ring: &[Point3<f64>]) -> Vec<Segment> {
    segments_from_points(ring)
}
