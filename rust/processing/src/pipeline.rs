// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Opening derivation pipeline
//!
//! Per surface: fit the host plane, clean the host boundary, refit the plane
//! on the clean boundary, generate candidates, then re-project, normalize,
//! deduplicate and containment-check each candidate. Surfaces are processed
//! one after another; a failure on one never affects the next. Accepted
//! polygons are committed in a single pass at the end of the run.

use crate::candidates::CandidateGenerator;
use crate::config::PipelineConfig;
use crate::diagnostics::DiagnosticSink;
use crate::error::Result;
use crate::kernel::GeometryKernel;
use crate::report::{CancelReason, CommitRecord, RunOutcome, RunReport, SurfaceReport};
use crate::sink::OpeningSink;
use crate::source::{CuttingElement, ElementId, SelectionProvider, TargetSurface};
use openings_geometry::{
    fit_plane, project_polygon, segment_starts, segments_from_points, HostBoundary,
    LoopNormalizer, Plane, Polygon, PolygonSet,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Result opening polygons for one surface
#[derive(Debug, Clone)]
pub struct SurfaceOpenings {
    pub surface: ElementId,
    /// Host plane the openings lie on
    pub plane: Plane,
    pub openings: Vec<Polygon>,
    pub report: SurfaceReport,
}

/// Derives opening polygons for host surfaces from cutting elements
pub struct OpeningPipeline<'a, K: GeometryKernel> {
    kernel: &'a K,
    config: PipelineConfig,
    normalizer: LoopNormalizer,
    cancel: Option<Arc<AtomicBool>>,
}

impl<'a, K: GeometryKernel> OpeningPipeline<'a, K> {
    pub fn new(kernel: &'a K, config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let normalizer = LoopNormalizer::new(config.tolerance)?;
        Ok(Self {
            kernel,
            config,
            normalizer,
            cancel: None,
        })
    }

    /// Stop before the next surface once `flag` is set
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .map_or(false, |flag| flag.load(Ordering::Relaxed))
    }

    /// Derive the openings of a single surface
    pub fn process_surface(
        &self,
        surface: &TargetSurface,
        cutters: &[CuttingElement<K::Element>],
        log: &mut dyn DiagnosticSink,
    ) -> Result<SurfaceOpenings> {
        let tolerance = self.config.tolerance;

        let rough_plane = fit_plane(&segment_starts(&surface.boundary), self.config.plane_fit)?;
        let boundary = self.normalizer.normalize(&surface.boundary, &rough_plane)?;
        let plane = fit_plane(boundary.vertices(), self.config.plane_fit)?;
        let host = HostBoundary::new(&boundary, &plane, tolerance)?;

        let generator = CandidateGenerator::new(self.kernel, &self.config)?;
        let candidates = generator.generate(&boundary, &plane, cutters, log)?;

        let mut report = SurfaceReport::new(surface.id);
        report.candidates = candidates.polygons.len();
        report.skips = candidates.skips;

        let mut distinct = PolygonSet::new(tolerance);
        for candidate in candidates.polygons {
            let projected = project_polygon(&candidate, &plane);
            let ring = segments_from_points(&segment_starts(&projected));
            match self.normalizer.normalize_oriented(&ring, &plane) {
                Ok(polygon) => {
                    if !distinct.insert(polygon) {
                        report.duplicates += 1;
                        log.record(&format!("surface {}: duplicate candidate ignored", surface.id));
                    }
                }
                Err(e) => {
                    report.degenerate += 1;
                    log.record(&format!("surface {}: candidate dropped: {}", surface.id, e));
                }
            }
        }

        let mut openings = Vec::with_capacity(distinct.len());
        for polygon in distinct.into_vec() {
            if host.contains_centroid(&polygon) {
                openings.push(polygon);
            } else {
                report.outside += 1;
                log.record(&format!(
                    "surface {}: candidate centroid outside host, rejected",
                    surface.id
                ));
            }
        }
        report.accepted = openings.len();

        tracing::debug!(
            surface = %surface.id,
            candidates = report.candidates,
            duplicates = report.duplicates,
            outside = report.outside,
            accepted = report.accepted,
            "Surface processed"
        );

        Ok(SurfaceOpenings {
            surface: surface.id,
            plane,
            openings,
            report,
        })
    }

    /// Process every selected surface, then commit all accepted openings
    pub fn run<S, O>(&self, selection: &mut S, sink: &mut O, log: &mut dyn DiagnosticSink) -> RunOutcome
    where
        S: SelectionProvider<K::Element> + ?Sized,
        O: OpeningSink + ?Sized,
    {
        let surfaces = selection.target_surfaces();
        if surfaces.is_empty() {
            log.record("No target surfaces selected, nothing to do");
            return RunOutcome::Cancelled(CancelReason::NoSurfaces);
        }

        let cutters = selection.cutting_elements();
        if cutters.is_empty() {
            log.record("No cutting elements selected, nothing to do");
            return RunOutcome::Cancelled(CancelReason::NoCutters);
        }

        tracing::info!(
            surfaces = surfaces.len(),
            cutters = cutters.len(),
            "Starting opening derivation"
        );
        log.record(&format!(
            "Processing {} surface(s) against {} cutter(s)",
            surfaces.len(),
            cutters.len()
        ));

        let mut report = RunReport::default();
        let mut accepted: Vec<(ElementId, Polygon)> = Vec::new();

        for (index, surface) in surfaces.iter().enumerate() {
            if self.cancelled() {
                log.record(&format!("Cancelled after {} surface(s)", index));
                report.cancelled_after = Some(index);
                break;
            }

            match self.process_surface(surface, &cutters, log) {
                Ok(result) => {
                    log.record(&format!(
                        "surface {}: {} opening(s) from {} candidate(s)",
                        surface.id, result.report.accepted, result.report.candidates
                    ));
                    accepted.extend(result.openings.into_iter().map(|p| (surface.id, p)));
                    report.surfaces.push(result.report);
                }
                Err(e) => {
                    tracing::warn!(surface = %surface.id, error = %e, "Surface skipped");
                    log.record(&format!("surface {}: skipped: {}", surface.id, e));
                    let mut failed = SurfaceReport::new(surface.id);
                    failed.failure = Some(e.to_string());
                    report.surfaces.push(failed);
                }
            }
        }

        for (host, polygon) in &accepted {
            let opening = sink.create_opening(*host, polygon);
            match opening {
                Some(id) => log.record(&format!("surface {}: created opening {}", host, id)),
                None => log.record(&format!("surface {}: opening creation failed", host)),
            }
            report.commits.push(CommitRecord {
                host: *host,
                opening,
            });
        }

        tracing::info!(
            created = report.openings_created(),
            failed_commits = report.commit_failures(),
            failed_surfaces = report.failed_surfaces(),
            "Opening derivation complete"
        );
        log.record(&format!(
            "Done: {} opening(s) created, {} failed, {} surface(s) skipped",
            report.openings_created(),
            report.commit_failures(),
            report.failed_surfaces()
        ));

        RunOutcome::Completed(report)
    }
}
