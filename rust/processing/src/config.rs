// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pipeline configuration, optionally loaded from environment variables.

use crate::diagnostics::{DiagnosticSink, FileLog, NullLog};
use crate::error::{Error, Result};
use openings_geometry::{PlaneFit, DEFAULT_TOLERANCE};
use std::path::PathBuf;
use std::str::FromStr;

/// Pipeline configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Distance under which two points are the same (τ).
    pub tolerance: f64,
    /// Requested thickness of the prism extruded from each host.
    pub prism_thickness: f64,
    /// Lower bound applied to `prism_thickness`.
    pub min_prism_thickness: f64,
    /// Allowed deviation of `|dot|` from 1 for a face to count as parallel.
    pub parallel_tolerance: f64,
    /// Solids at or below this volume are ignored.
    pub min_solid_volume: f64,
    /// How the host plane is derived from its boundary.
    pub plane_fit: PlaneFit,
    /// Diagnostic log file, if any.
    pub log_path: Option<PathBuf>,
}

impl PipelineConfig {
    /// Load configuration from `OPENINGS_*` environment variables.
    ///
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            tolerance: env_or("OPENINGS_TOLERANCE", defaults.tolerance),
            prism_thickness: env_or("OPENINGS_PRISM_THICKNESS", defaults.prism_thickness),
            min_prism_thickness: env_or(
                "OPENINGS_MIN_PRISM_THICKNESS",
                defaults.min_prism_thickness,
            ),
            parallel_tolerance: env_or("OPENINGS_PARALLEL_TOLERANCE", defaults.parallel_tolerance),
            min_solid_volume: env_or("OPENINGS_MIN_SOLID_VOLUME", defaults.min_solid_volume),
            plane_fit: env_or("OPENINGS_PLANE_FIT", defaults.plane_fit),
            log_path: std::env::var("OPENINGS_LOG_PATH")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Thickness actually used for the host prism
    pub fn effective_prism_thickness(&self) -> f64 {
        self.prism_thickness.max(self.min_prism_thickness)
    }

    /// Diagnostic sink for `log_path`; discards everything when unset
    pub fn diagnostic_sink(&self) -> Box<dyn DiagnosticSink> {
        match &self.log_path {
            Some(path) => Box::new(FileLog::new(path)),
            None => Box::new(NullLog),
        }
    }

    /// Reject non-finite or non-positive tolerances and thicknesses
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("tolerance", self.tolerance),
            ("min_prism_thickness", self.min_prism_thickness),
            ("parallel_tolerance", self.parallel_tolerance),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::Config(format!("{} must be positive, got {}", name, value)));
            }
        }

        let non_negative = [
            ("prism_thickness", self.prism_thickness),
            ("min_solid_volume", self.min_solid_volume),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Config(format!(
                    "{} must be non-negative, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            prism_thickness: 0.01,
            min_prism_thickness: 0.01,
            parallel_tolerance: 1e-3,
            min_solid_volume: 1e-9,
            plane_fit: PlaneFit::FirstPair,
            log_path: None,
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
