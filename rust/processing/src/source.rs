// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pipeline inputs: host surfaces and cutting elements

use openings_geometry::Segment;
use serde::Serialize;
use std::fmt;

/// Host-document identity of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Planar host element that openings are cut into
#[derive(Debug, Clone)]
pub struct TargetSurface {
    pub id: ElementId,
    /// Outer boundary as an ordered edge sequence
    pub boundary: Vec<Segment>,
}

impl TargetSurface {
    pub fn new(id: ElementId, boundary: Vec<Segment>) -> Self {
        Self { id, boundary }
    }
}

/// Element whose solids define opening shapes
#[derive(Debug, Clone)]
pub struct CuttingElement<E> {
    pub id: ElementId,
    /// Kernel handle, resolved through `GeometryKernel::element_solids`
    pub handle: E,
}

impl<E> CuttingElement<E> {
    pub fn new(id: ElementId, handle: E) -> Self {
        Self { id, handle }
    }
}

/// Supplies the surfaces and cutters for one run.
///
/// An empty list from either method cancels the run.
pub trait SelectionProvider<E> {
    fn target_surfaces(&mut self) -> Vec<TargetSurface>;

    fn cutting_elements(&mut self) -> Vec<CuttingElement<E>>;
}

/// Fixed selection handed over up front
#[derive(Debug, Clone)]
pub struct StaticSelection<E> {
    pub surfaces: Vec<TargetSurface>,
    pub cutters: Vec<CuttingElement<E>>,
}

impl<E> StaticSelection<E> {
    pub fn new(surfaces: Vec<TargetSurface>, cutters: Vec<CuttingElement<E>>) -> Self {
        Self { surfaces, cutters }
    }
}

impl<E: Clone> SelectionProvider<E> for StaticSelection<E> {
    fn target_surfaces(&mut self) -> Vec<TargetSurface> {
        self.surfaces.clone()
    }

    fn cutting_elements(&mut self) -> Vec<CuttingElement<E>> {
        self.cutters.clone()
    }
}
