// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Candidate opening generation
//!
//! For one host surface:
//! 1. extrude a thin prism from the clean host boundary (retrying along the
//!    negated normal)
//! 2. intersect every constituent solid of every cutter with the prism
//! 3. keep the intersection faces parallel to the host plane; these are the
//!    opening cross-sections, not the prism side walls
//! 4. normalize each of their loops against the host plane
//!
//! Only the prism is fatal for the surface. Everything below it degrades to
//! "no candidates from this source" with a log line and a [`Skip`] entry.

use crate::config::PipelineConfig;
use crate::diagnostics::DiagnosticSink;
use crate::error::{Error, Result};
use crate::kernel::{GeometryKernel, PlanarFace};
use crate::report::{Skip, SkipStage};
use crate::source::{CuttingElement, ElementId};
use openings_geometry::{LoopNormalizer, Plane, Polygon};

/// Candidates and skipped sources for one surface
#[derive(Debug, Clone, Default)]
pub struct SurfaceCandidates {
    pub polygons: Vec<Polygon>,
    pub skips: Vec<Skip>,
}

/// Produces candidate polygons for a host surface
pub struct CandidateGenerator<'a, K: GeometryKernel> {
    kernel: &'a K,
    config: &'a PipelineConfig,
    normalizer: LoopNormalizer,
}

impl<'a, K: GeometryKernel> CandidateGenerator<'a, K> {
    pub fn new(kernel: &'a K, config: &'a PipelineConfig) -> Result<Self> {
        Ok(Self {
            kernel,
            config,
            normalizer: LoopNormalizer::new(config.tolerance)?,
        })
    }

    /// Extrude `boundary` along `plane`'s normal, then along its negation
    pub fn build_prism(&self, boundary: &Polygon, plane: &Plane) -> Result<K::Solid> {
        let thickness = self.config.effective_prism_thickness();

        let forward = match self.kernel.extrude(boundary, &plane.normal, thickness) {
            Ok(solid) => return Ok(solid),
            Err(e) => e,
        };
        tracing::debug!(error = %forward, "Prism extrusion along normal failed, retrying reversed");

        match self.kernel.extrude(boundary, &(-plane.normal), thickness) {
            Ok(solid) => Ok(solid),
            Err(backward) => Err(Error::PrismFailed { forward, backward }),
        }
    }

    /// All candidate loops cut into the surface bounded by `boundary`
    pub fn generate(
        &self,
        boundary: &Polygon,
        plane: &Plane,
        cutters: &[CuttingElement<K::Element>],
        log: &mut dyn DiagnosticSink,
    ) -> Result<SurfaceCandidates> {
        let prism = self.build_prism(boundary, plane)?;
        let mut out = SurfaceCandidates::default();

        for cutter in cutters {
            self.cutter_candidates(&prism, plane, cutter, &mut out, log);
        }

        Ok(out)
    }

    fn cutter_candidates(
        &self,
        prism: &K::Solid,
        plane: &Plane,
        cutter: &CuttingElement<K::Element>,
        out: &mut SurfaceCandidates,
        log: &mut dyn DiagnosticSink,
    ) {
        let solids = match self.kernel.element_solids(&cutter.handle) {
            Ok(solids) => solids,
            Err(e) => {
                skip(out, log, cutter.id, SkipStage::ElementSolids, e.to_string());
                return;
            }
        };

        for solid in &solids {
            if self.kernel.volume(solid) <= self.config.min_solid_volume {
                skip(out, log, cutter.id, SkipStage::NegligibleSolid, "negligible volume".into());
                continue;
            }

            let section = match self.kernel.intersect(solid, prism) {
                Ok(Some(section)) => section,
                Ok(None) => {
                    skip(out, log, cutter.id, SkipStage::EmptyIntersection, "no overlap".into());
                    continue;
                }
                Err(e) => {
                    skip(out, log, cutter.id, SkipStage::Intersection, e.to_string());
                    continue;
                }
            };

            if self.kernel.volume(&section) <= self.config.min_solid_volume {
                skip(
                    out,
                    log,
                    cutter.id,
                    SkipStage::EmptyIntersection,
                    "negligible intersection volume".into(),
                );
                continue;
            }

            let faces = match self.kernel.planar_faces(&section) {
                Ok(faces) => faces,
                Err(e) => {
                    skip(out, log, cutter.id, SkipStage::PlanarFaces, e.to_string());
                    continue;
                }
            };

            for face in faces.iter().filter(|f| self.is_flush(f, plane)) {
                self.face_candidates(face, plane, cutter.id, out, log);
            }
        }
    }

    #[inline]
    fn is_flush(&self, face: &PlanarFace, plane: &Plane) -> bool {
        plane.is_parallel_to(&face.normal, self.config.parallel_tolerance)
    }

    fn face_candidates(
        &self,
        face: &PlanarFace,
        plane: &Plane,
        element: ElementId,
        out: &mut SurfaceCandidates,
        log: &mut dyn DiagnosticSink,
    ) {
        for boundary in &face.loops {
            match self.normalizer.normalize(boundary, plane) {
                Ok(polygon) => out.polygons.push(polygon),
                Err(e) => skip(out, log, element, SkipStage::Loop, e.to_string()),
            }
        }
    }
}

fn skip(
    out: &mut SurfaceCandidates,
    log: &mut dyn DiagnosticSink,
    element: ElementId,
    stage: SkipStage,
    reason: String,
) {
    tracing::debug!(element = %element, ?stage, %reason, "Skipped cutter contribution");
    log.record(&format!("cutter {}: skipped ({:?}): {}", element, stage, reason));
    out.skips.push(Skip {
        element,
        stage,
        reason,
    });
}
