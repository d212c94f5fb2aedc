// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod common;

use common::*;
use nalgebra::{Point3, Vector3};
use openings_geometry::{loops_equivalent, Plane, Polygon, Segment};
use openings_processing::{
    CandidateGenerator, CuttingElement, ElementId, Error, GeometryKernel, KernelResult, MemoryLog,
    NullLog, PipelineConfig, PlanarFace, SkipStage,
};

fn xy_plane() -> Plane {
    Plane::new(Point3::origin(), Vector3::z()).unwrap()
}

fn unit_square() -> Polygon {
    polygon(square_ring((0.0, 0.0), (1.0, 1.0), 0.0))
}

/// Returns the same faces for any intersection
struct FixedFaceKernel {
    faces: Vec<PlanarFace>,
}

impl GeometryKernel for FixedFaceKernel {
    type Solid = ();
    type Element = ();

    fn element_solids(&self, _element: &()) -> KernelResult<Vec<()>> {
        Ok(vec![()])
    }

    fn extrude(
        &self,
        _profile: &Polygon,
        _direction: &Vector3<f64>,
        _distance: f64,
    ) -> KernelResult<()> {
        Ok(())
    }

    fn intersect(&self, _a: &(), _b: &()) -> KernelResult<Option<()>> {
        Ok(Some(()))
    }

    fn planar_faces(&self, _solid: &()) -> KernelResult<Vec<PlanarFace>> {
        Ok(self.faces.clone())
    }

    fn volume(&self, _solid: &()) -> f64 {
        1.0
    }
}

#[test]
fn test_prism_uses_thickness_floor() {
    let kernel = BoxKernel::new();
    let config = PipelineConfig {
        prism_thickness: 0.0001,
        ..Default::default()
    };
    let generator = CandidateGenerator::new(&kernel, &config).unwrap();

    let prism = generator.build_prism(&unit_square(), &xy_plane()).unwrap();
    assert_eq!(prism.bounds, Aabb::new((0.0, 0.0, 0.0), (1.0, 1.0, 0.01)));
}

#[test]
fn test_prism_failure_reports_both_attempts() {
    let kernel = BoxKernel {
        fail_all_extrusions: true,
        ..Default::default()
    };
    let config = PipelineConfig::default();
    let generator = CandidateGenerator::new(&kernel, &config).unwrap();

    let result = generator.generate(&unit_square(), &xy_plane(), &[], &mut NullLog);
    assert!(matches!(result, Err(Error::PrismFailed { .. })));
    assert_eq!(kernel.extrude_calls.get(), 2);
}

#[test]
fn test_only_flush_faces_become_candidates() {
    let kernel = BoxKernel::new();
    let config = PipelineConfig::default();
    let generator = CandidateGenerator::new(&kernel, &config).unwrap();
    let cutters = vec![cutter(1, shaft((0.25, 0.25), (0.75, 0.75)))];

    let out = generator
        .generate(&unit_square(), &xy_plane(), &cutters, &mut NullLog)
        .unwrap();

    // Top and bottom of the section; the four side walls are ignored
    assert_eq!(out.polygons.len(), 2);
    assert!(out.skips.is_empty());
    let expected = polygon(square_ring((0.25, 0.25), (0.75, 0.75), 0.0));
    for candidate in &out.polygons {
        assert_eq!(candidate.vertex_count(), 4);
        assert!(
            loops_equivalent(candidate, &expected, 1e-9)
                || loops_equivalent(&candidate.reversed(), &expected, 1e-9)
        );
    }
}

#[test]
fn test_every_loop_of_a_face_is_a_candidate() {
    let outer = square_ring((0.0, 0.0), (0.8, 0.8), 0.0);
    let hole = square_ring((0.3, 0.3), (0.5, 0.5), 0.0);
    let face = PlanarFace::new(Vector3::z(), edges_of(&outer)).with_hole(edges_of(&hole));
    let kernel = FixedFaceKernel { faces: vec![face] };
    let config = PipelineConfig::default();
    let generator = CandidateGenerator::new(&kernel, &config).unwrap();
    let cutters = vec![CuttingElement::new(ElementId(1), ())];

    let out = generator
        .generate(&unit_square(), &xy_plane(), &cutters, &mut NullLog)
        .unwrap();

    assert_eq!(out.polygons.len(), 2);
}

#[test]
fn test_nearly_parallel_face_within_tolerance_is_kept() {
    let ring = square_ring((0.2, 0.2), (0.4, 0.4), 0.0);
    let slightly_off = Vector3::new(0.01, 0.0, 1.0).normalize();
    let steep = Vector3::new(0.5, 0.0, 1.0).normalize();
    let kernel = FixedFaceKernel {
        faces: vec![
            PlanarFace::new(slightly_off, edges_of(&ring)),
            PlanarFace::new(steep, edges_of(&ring)),
            PlanarFace::new(Vector3::x(), edges_of(&ring)),
        ],
    };
    let config = PipelineConfig::default();
    let generator = CandidateGenerator::new(&kernel, &config).unwrap();
    let cutters = vec![CuttingElement::new(ElementId(1), ())];

    let out = generator
        .generate(&unit_square(), &xy_plane(), &cutters, &mut NullLog)
        .unwrap();

    assert_eq!(out.polygons.len(), 1);
}

#[test]
fn test_degenerate_loop_is_logged_and_dropped() {
    let a = Point3::new(0.2, 0.2, 0.0);
    let b = Point3::new(0.6, 0.2, 0.0);
    let sliver = vec![Segment::new(a, b), Segment::new(b, a)];
    let kernel = FixedFaceKernel {
        faces: vec![PlanarFace::new(-Vector3::z(), sliver)],
    };
    let config = PipelineConfig::default();
    let generator = CandidateGenerator::new(&kernel, &config).unwrap();
    let cutters = vec![CuttingElement::new(ElementId(7), ())];
    let mut log = MemoryLog::new();

    let out = generator
        .generate(&unit_square(), &xy_plane(), &cutters, &mut log)
        .unwrap();

    assert!(out.polygons.is_empty());
    assert_eq!(out.skips.len(), 1);
    assert_eq!(out.skips[0].stage, SkipStage::Loop);
    assert!(log.contains("cutter #7: skipped"));
}
