// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry kernel boundary
//!
//! Solid booleans, extrusion and B-rep introspection are delegated to the
//! host application's kernel. Every call returns a [`KernelResult`]; the
//! pipeline branches on failures instead of unwinding.

use nalgebra::Vector3;
use openings_geometry::{Polygon, Segment};
use smallvec::SmallVec;
use std::fmt;

/// Kernel operation that produced a [`KernelError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelOp {
    ElementSolids,
    Extrude,
    Intersect,
    PlanarFaces,
}

impl KernelOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            KernelOp::ElementSolids => "element solids",
            KernelOp::Extrude => "extrude",
            KernelOp::Intersect => "intersect",
            KernelOp::PlanarFaces => "planar faces",
        }
    }
}

impl fmt::Display for KernelOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure reported by the geometry kernel
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{operation} failed: {reason}")]
pub struct KernelError {
    pub operation: KernelOp,
    pub reason: String,
}

impl KernelError {
    pub fn new(operation: KernelOp, reason: impl Into<String>) -> Self {
        Self {
            operation,
            reason: reason.into(),
        }
    }
}

/// Result of a kernel call
pub type KernelResult<T> = std::result::Result<T, KernelError>;

/// Planar face of a solid
#[derive(Debug, Clone)]
pub struct PlanarFace {
    /// Unit outward normal
    pub normal: Vector3<f64>,
    /// Boundary loops as edge chains; outer perimeter and holes alike
    pub loops: SmallVec<[Vec<Segment>; 1]>,
}

impl PlanarFace {
    pub fn new(normal: Vector3<f64>, outer: Vec<Segment>) -> Self {
        let mut loops = SmallVec::new();
        loops.push(outer);
        Self { normal, loops }
    }

    pub fn with_hole(mut self, hole: Vec<Segment>) -> Self {
        self.loops.push(hole);
        self
    }
}

/// Solid-modelling operations the pipeline needs from its host
pub trait GeometryKernel {
    /// Solid handle
    type Solid;
    /// Cutting element handle
    type Element;

    /// Constituent solids of `element`, including one level of nested
    /// instance geometry
    fn element_solids(&self, element: &Self::Element) -> KernelResult<Vec<Self::Solid>>;

    /// Extrude a planar profile along `direction` by `distance`
    fn extrude(
        &self,
        profile: &Polygon,
        direction: &Vector3<f64>,
        distance: f64,
    ) -> KernelResult<Self::Solid>;

    /// Boolean intersection; `Ok(None)` when the solids do not overlap
    fn intersect(&self, a: &Self::Solid, b: &Self::Solid) -> KernelResult<Option<Self::Solid>>;

    /// Planar faces of `solid`
    fn planar_faces(&self, solid: &Self::Solid) -> KernelResult<Vec<PlanarFace>>;

    /// Enclosed volume of `solid`
    fn volume(&self, solid: &Self::Solid) -> f64;
}
