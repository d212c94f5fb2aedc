// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-of-run status

use crate::sink::OpeningId;
use crate::source::ElementId;
use serde::Serialize;

/// Pipeline stage at which a source was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipStage {
    ElementSolids,
    NegligibleSolid,
    Intersection,
    EmptyIntersection,
    PlanarFaces,
    Loop,
}

/// A cutter, solid, face or loop that contributed no candidates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Skip {
    pub element: ElementId,
    pub stage: SkipStage,
    pub reason: String,
}

/// Per-surface counts
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SurfaceReport {
    pub surface: Option<ElementId>,
    /// Loops extracted from flush faces
    pub candidates: usize,
    /// Candidates that collapsed after re-projection
    pub degenerate: usize,
    /// Candidates equivalent to an earlier one
    pub duplicates: usize,
    /// Candidates whose centroid fell outside the host
    pub outside: usize,
    pub accepted: usize,
    pub skips: Vec<Skip>,
    /// Set when the whole surface was skipped
    pub failure: Option<String>,
}

impl SurfaceReport {
    pub fn new(surface: ElementId) -> Self {
        Self {
            surface: Some(surface),
            ..Default::default()
        }
    }
}

/// Outcome of one commit call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitRecord {
    pub host: ElementId,
    pub opening: Option<OpeningId>,
}

/// Summary of a completed run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunReport {
    pub surfaces: Vec<SurfaceReport>,
    pub commits: Vec<CommitRecord>,
    /// Number of surfaces processed before cancellation was observed
    pub cancelled_after: Option<usize>,
}

impl RunReport {
    pub fn openings_created(&self) -> usize {
        self.commits.iter().filter(|c| c.opening.is_some()).count()
    }

    pub fn commit_failures(&self) -> usize {
        self.commits.len() - self.openings_created()
    }

    pub fn failed_surfaces(&self) -> usize {
        self.surfaces.iter().filter(|s| s.failure.is_some()).count()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Why a run stopped before processing anything
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CancelReason {
    NoSurfaces,
    NoCutters,
}

/// Result of [`crate::OpeningPipeline::run`]
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Cancelled(CancelReason),
    Completed(RunReport),
}

impl RunOutcome {
    pub fn report(&self) -> Option<&RunReport> {
        match self {
            RunOutcome::Completed(report) => Some(report),
            RunOutcome::Cancelled(_) => None,
        }
    }
}
