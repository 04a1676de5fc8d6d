// Copyright 2026 the Collidoscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flattening filled bezier paths into line segments.

use crate::kurbo::{self, Affine, PathEl, Point};
use log::warn;

/// The flattening tolerance, in font units.
///
/// Outlines are compared in font units, so a quarter of a unit is far below anything
/// visible at text sizes while keeping segment counts low.
pub const TOLERANCE: f64 = 0.25;

/// A line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    /// The start point of the line.
    pub p0: Point,
    /// The end point of the line.
    pub p1: Point,
}

impl Line {
    /// Create a new line.
    pub fn new(p0: Point, p1: Point) -> Self {
        Self { p0, p1 }
    }
}

/// Flatten a filled bezier path into line segments.
///
/// Every subpath is closed, explicitly or not, and `contour_ends` receives the index
/// one past the last line of each closed subpath that produced at least one line.
pub fn fill(
    path: impl IntoIterator<Item = PathEl>,
    affine: Affine,
    line_buf: &mut Vec<Line>,
    contour_ends: &mut Vec<usize>,
) {
    line_buf.clear();
    contour_ends.clear();

    let mut lb = FlattenerCallback {
        line_buf,
        contour_ends,
        start: Point::ZERO,
        p0: Point::ZERO,
        is_nan: false,
    };

    kurbo::flatten(path.into_iter().map(|el| affine * el), TOLERANCE, |el| {
        lb.callback(el);
    });
    lb.close();

    // A path that contains NaN is ill-defined, so ignore it.
    if lb.is_nan {
        warn!("A path contains NaN, ignoring it.");

        line_buf.clear();
        contour_ends.clear();
    }
}

struct FlattenerCallback<'a> {
    line_buf: &'a mut Vec<Line>,
    contour_ends: &'a mut Vec<usize>,
    start: Point,
    p0: Point,
    is_nan: bool,
}

impl FlattenerCallback<'_> {
    fn callback(&mut self, el: PathEl) {
        match el {
            PathEl::MoveTo(p) => {
                self.is_nan |= p.is_nan();
                self.close();

                self.start = p;
                self.p0 = p;
            }
            PathEl::LineTo(p) => {
                self.is_nan |= p.is_nan();

                if p != self.p0 {
                    self.line_buf.push(Line::new(self.p0, p));
                }
                self.p0 = p;
            }
            PathEl::ClosePath => self.close(),
            // `kurbo::flatten` only ever emits the three elements above.
            PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
        }
    }

    /// Close the current subpath with a line back to its start.
    fn close(&mut self) {
        if self.p0 != self.start {
            self.line_buf.push(Line::new(self.p0, self.start));
        }
        self.p0 = self.start;

        let end = self.line_buf.len();
        if self.contour_ends.last().copied().unwrap_or(0) != end {
            self.contour_ends.push(end);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{fill, Line};
    use crate::kurbo::{Affine, BezPath, Circle, Point, Shape};

    fn flatten(path: &BezPath) -> (Vec<Line>, Vec<usize>) {
        let mut lines = vec![];
        let mut ends = vec![];
        fill(path, Affine::IDENTITY, &mut lines, &mut ends);
        (lines, ends)
    }

    #[test]
    fn unclosed_subpath_is_closed() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        path.line_to((10.0, 10.0));

        let (lines, ends) = flatten(&path);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], Line::new(Point::new(10.0, 10.0), Point::ZERO));
        assert_eq!(ends, vec![3]);
    }

    #[test]
    fn contours_are_delimited() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        path.line_to((10.0, 10.0));
        path.close_path();
        path.move_to((20.0, 0.0));
        path.line_to((30.0, 0.0));
        path.line_to((30.0, 10.0));
        path.close_path();

        let (lines, ends) = flatten(&path);
        assert_eq!(lines.len(), 6);
        assert_eq!(ends, vec![3, 6]);
    }

    #[test]
    fn curves_stay_within_bounds() {
        let circle = Circle::new((50.0, 50.0), 20.0).to_path(0.01);
        let (lines, ends) = flatten(&circle);
        assert!(lines.len() > 8);
        assert_eq!(ends.len(), 1);
        for line in &lines {
            assert!((line.p0 - Point::new(50.0, 50.0)).hypot() <= 20.1);
        }
    }

    #[test]
    fn translation_is_applied() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((1.0, 0.0));
        path.line_to((1.0, 1.0));
        path.close_path();

        let mut lines = vec![];
        let mut ends = vec![];
        fill(&path, Affine::translate((5.0, 7.0)), &mut lines, &mut ends);
        assert_eq!(lines[0].p0, Point::new(5.0, 7.0));
    }

    #[test]
    fn nan_paths_are_ignored() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((f64::NAN, 0.0));
        path.line_to((1.0, 1.0));
        path.close_path();

        let (lines, ends) = flatten(&path);
        assert!(lines.is_empty());
        assert!(ends.is_empty());
    }

    #[test]
    fn empty_path_has_no_contours() {
        let (lines, ends) = flatten(&BezPath::new());
        assert!(lines.is_empty());
        assert!(ends.is_empty());
    }
}
