// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Openings Geometry
//!
//! Planar contour processing for derived openings: plane fitting, loop
//! normalization and winding, re-projection, tolerance-aware deduplication
//! and centroid containment. No solid modelling happens here; boolean and
//! extrusion work belongs to the host application's geometry kernel.

pub mod containment;
pub mod dedup;
pub mod error;
pub mod normalize;
pub mod plane;
pub mod polygon;
pub mod project;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector3};

pub use containment::{centroid, point_in_polygon_2d, HostBoundary};
pub use dedup::{coarse_hash, loops_equivalent, PolygonSet};
pub use error::{Error, Result};
pub use normalize::{LoopNormalizer, DEFAULT_TOLERANCE};
pub use plane::{fit_plane, Plane, PlaneBasis, PlaneFit, PLANE_FIT_TOLERANCE};
pub use polygon::{segment_starts, segments_from_points, Polygon, Segment};
pub use project::{project_polygon, project_segments};
