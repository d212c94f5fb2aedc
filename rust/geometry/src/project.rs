// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Re-projection of candidate loops onto the host plane

use crate::plane::Plane;
use crate::polygon::{Polygon, Segment};

/// Project both endpoints of every segment onto `plane`.
///
/// Edge count and order are preserved; nothing is merged or removed.
pub fn project_segments(segments: &[Segment], plane: &Plane) -> Vec<Segment> {
    segments
        .iter()
        .map(|s| Segment::new(plane.project_point(&s.start), plane.project_point(&s.end)))
        .collect()
}

/// Project a polygon's closed edge chain onto `plane`
pub fn project_polygon(polygon: &Polygon, plane: &Plane) -> Vec<Segment> {
    project_segments(&polygon.edges(), plane)
}
