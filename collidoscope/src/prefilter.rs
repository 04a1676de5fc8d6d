// Copyright 2026 the Collidoscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cheap rejection of outline pairs that cannot overlap.
//!
//! Two filled regions can only share area inside the intersection of their bounding
//! boxes. If that intersection has no area, neither do the regions, so rejecting such a
//! pair never hides a real overlap. Pairs that pass may still turn out not to overlap.

use crate::flatten::Line;
use crate::kurbo::Rect;
use crate::outline::Outline;

/// Whether two boxes share area.
///
/// Boxes that only touch along an edge or at a corner do not.
pub fn boxes_overlap(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

/// The region where two outlines could overlap, or `None` if they cannot.
pub fn overlap_region(a: &Outline, b: &Outline) -> Option<Rect> {
    let (a, b) = (a.bbox()?, b.bbox()?);
    boxes_overlap(a, b).then(|| a.intersect(b))
}

/// Whether two outlines may overlap.
pub fn may_overlap(a: &Outline, b: &Outline) -> bool {
    overlap_region(a, b).is_some()
}

/// The lines of all contours of `outline` that reach into `region`.
///
/// A contour whose box misses the region cannot contain any point of it, so dropping it
/// leaves the winding number everywhere inside the region unchanged.
pub fn contours_in(outline: &Outline, region: Rect) -> impl Iterator<Item = &[Line]> + '_ {
    outline
        .contours()
        .iter()
        .filter(move |contour| boxes_overlap(contour.bbox, region))
        .map(move |contour| outline.contour_lines(contour))
}
