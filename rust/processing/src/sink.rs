// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Persistence of accepted openings

use crate::source::ElementId;
use openings_geometry::Polygon;
use serde::Serialize;
use std::fmt;

/// Host-document identity of a created opening
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct OpeningId(pub u64);

impl fmt::Display for OpeningId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Creates openings in the host document
pub trait OpeningSink {
    /// Create an opening with `polygon` as its profile in `host`.
    ///
    /// `None` means the host refused; the pipeline logs it and moves on.
    fn create_opening(&mut self, host: ElementId, polygon: &Polygon) -> Option<OpeningId>;
}

/// Keeps created openings in memory, numbering them from `first_id`
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub openings: Vec<(ElementId, Polygon)>,
    next_id: u64,
}

impl RecordingSink {
    pub fn new(first_id: u64) -> Self {
        Self {
            openings: Vec::new(),
            next_id: first_id,
        }
    }

    /// Openings created in `host`
    pub fn openings_in(&self, host: ElementId) -> impl Iterator<Item = &Polygon> {
        self.openings
            .iter()
            .filter(move |(h, _)| *h == host)
            .map(|(_, p)| p)
    }
}

impl OpeningSink for RecordingSink {
    fn create_opening(&mut self, host: ElementId, polygon: &Polygon) -> Option<OpeningId> {
        let id = OpeningId(self.next_id);
        self.next_id += 1;
        self.openings.push((host, polygon.clone()));
        Some(id)
    }
}
