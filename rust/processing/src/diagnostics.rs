// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Diagnostic log sinks
//!
//! The run log is plain text, one `HH:MM:SS - message` line per event.
//! Writing is best-effort: a sink never reports failure to the pipeline.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only destination for run diagnostics
pub trait DiagnosticSink {
    fn record(&mut self, message: &str);
}

/// Format a log line stamped with the current local time
pub fn format_line(message: &str) -> String {
    format!("{} - {}", chrono::Local::now().format("%H:%M:%S"), message)
}

/// Appends lines to a file, opening it on the first write
#[derive(Debug)]
pub struct FileLog {
    path: PathBuf,
    file: Option<File>,
    disabled: bool,
}

impl FileLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
            disabled: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn handle(&mut self) -> Option<&mut File> {
        if self.file.is_none() && !self.disabled {
            match OpenOptions::new().create(true).append(true).open(&self.path) {
                Ok(file) => self.file = Some(file),
                Err(e) => {
                    // Report once, then stay quiet
                    tracing::warn!(path = %self.path.display(), error = %e, "Diagnostic log unavailable");
                    self.disabled = true;
                }
            }
        }
        self.file.as_mut()
    }
}

impl DiagnosticSink for FileLog {
    fn record(&mut self, message: &str) {
        let line = format_line(message);
        if let Some(file) = self.handle() {
            if let Err(e) = writeln!(file, "{}", line) {
                tracing::warn!(error = %e, "Failed to write diagnostic line");
            }
        }
    }
}

/// Keeps lines in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryLog {
    pub lines: Vec<String>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any recorded message contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }
}

impl DiagnosticSink for MemoryLog {
    fn record(&mut self, message: &str) {
        self.lines.push(format_line(message));
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLog;

impl DiagnosticSink for NullLog {
    fn record(&mut self, _message: &str) {}
}
