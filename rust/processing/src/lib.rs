// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Openings Processing
//!
//! Derives opening polygons on planar host surfaces (slabs, walls, roofs)
//! wherever cutting elements such as ducts or shafts pass through them.
//!
//! Solid booleans and extrusion are delegated to a [`GeometryKernel`]
//! supplied by the host application; selection, persistence and the
//! diagnostic log are likewise passed in as traits, so a run has no hidden
//! global state:
//!
//! ```ignore
//! let config = PipelineConfig::from_env();
//! let mut log = config.diagnostic_sink();
//! let pipeline = OpeningPipeline::new(&kernel, config)?;
//! match pipeline.run(&mut selection, &mut document, log.as_mut()) {
//!     RunOutcome::Completed(report) => println!("{}", report.to_json()?),
//!     RunOutcome::Cancelled(reason) => println!("cancelled: {:?}", reason),
//! }
//! ```

pub mod candidates;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod kernel;
pub mod pipeline;
pub mod report;
pub mod sink;
pub mod source;

pub use candidates::{CandidateGenerator, SurfaceCandidates};
pub use config::PipelineConfig;
pub use diagnostics::{DiagnosticSink, FileLog, MemoryLog, NullLog};
pub use error::{Error, Result};
pub use kernel::{GeometryKernel, KernelError, KernelOp, KernelResult, PlanarFace};
pub use pipeline::{OpeningPipeline, SurfaceOpenings};
pub use report::{CancelReason, CommitRecord, RunOutcome, RunReport, Skip, SkipStage, SurfaceReport};
pub use sink::{OpeningId, OpeningSink, RecordingSink};
pub use source::{CuttingElement, ElementId, SelectionProvider, StaticSelection, TargetSurface};
