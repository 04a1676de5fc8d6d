// Copyright 2026 the Collidoscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph outlines placed in run space.
//!
//! Outlines arrive in font units from the font data source. A [`GlyphPlacement`] moves the
//! outline to its shaped position once, flattens it, and caches the bounding boxes the
//! [pre-filter](crate::prefilter) needs. Everything is read-only afterwards, so placements
//! can be shared freely between threads.

use crate::flatten::{self, Line};
use crate::kurbo::{Affine, BezPath, Point, Rect, Vec2};
use core::ops::Range;
use peniko::Fill;
use smallvec::SmallVec;
use std::sync::OnceLock;

/// A closed contour of an [`Outline`].
#[derive(Clone, Debug, PartialEq)]
pub struct Contour {
    /// The range of the contour's lines in [`Outline::lines`].
    pub lines: Range<usize>,
    /// The bounding box of the contour.
    pub bbox: Rect,
}

/// A flattened, positioned glyph outline.
#[derive(Clone, Debug)]
pub struct Outline {
    path: BezPath,
    lines: Vec<Line>,
    contours: SmallVec<[Contour; 4]>,
    bbox: Option<Rect>,
    /// Filled areas, by fill rule.
    areas: [OnceLock<f64>; 2],
}

impl Outline {
    /// Create an outline from a path that is already in run space.
    pub fn new(path: BezPath) -> Self {
        let mut lines = vec![];
        let mut ends = vec![];
        flatten::fill(&path, Affine::IDENTITY, &mut lines, &mut ends);

        let mut contours = SmallVec::new();
        let mut start = 0;
        for end in ends {
            contours.push(Contour {
                lines: start..end,
                bbox: line_bounds(&lines[start..end]),
            });
            start = end;
        }

        let bbox = contours
            .iter()
            .map(|contour: &Contour| contour.bbox)
            .reduce(|acc: Rect, bbox| acc.union(bbox));

        Self {
            path,
            lines,
            contours,
            bbox,
            areas: Default::default(),
        }
    }

    /// An outline with nothing to draw, like the one of a space glyph.
    pub fn empty() -> Self {
        Self::new(BezPath::new())
    }

    /// Whether the outline has no contours.
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    /// The path the outline was built from.
    pub fn path(&self) -> &BezPath {
        &self.path
    }

    /// All flattened lines of the outline, contour after contour.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// The closed contours of the outline.
    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    /// The lines of a single contour.
    pub fn contour_lines(&self, contour: &Contour) -> &[Line] {
        &self.lines[contour.lines.clone()]
    }

    /// The bounding box of the flattened outline, or `None` if it is empty.
    pub fn bbox(&self) -> Option<Rect> {
        self.bbox
    }

    /// The area filled under `fill`.
    ///
    /// The area is computed by `compute` the first time it is asked for and cached with
    /// the outline afterwards.
    pub fn filled_area(&self, fill: Fill, compute: impl FnOnce() -> f64) -> f64 {
        let slot = match fill {
            Fill::NonZero => 0,
            Fill::EvenOdd => 1,
        };
        *self.areas[slot].get_or_init(compute)
    }
}

fn line_bounds(lines: &[Line]) -> Rect {
    let mut points = lines.iter().map(|line| line.p0);
    let Some(first) = points.next() else {
        return Rect::ZERO;
    };
    // Every line starts where the previous one ended, so start points cover the contour.
    points.fold(Rect::from_points(first, first), |acc, p| {
        Rect::new(
            acc.x0.min(p.x),
            acc.y0.min(p.y),
            acc.x1.max(p.x),
            acc.y1.max(p.y),
        )
    })
}

/// The script role of a glyph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GlyphCategory {
    /// A base letter or other spacing glyph.
    #[default]
    Base,
    /// A combining mark.
    Mark,
}

/// Where the shaper put a glyph, in run space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    /// Horizontal offset of the glyph origin.
    pub x: f64,
    /// Vertical offset of the glyph origin.
    pub y: f64,
    /// Horizontal advance.
    pub x_advance: f64,
    /// Vertical advance.
    pub y_advance: f64,
}

impl Position {
    /// Create a new position.
    pub const fn new(x: f64, y: f64, x_advance: f64, y_advance: f64) -> Self {
        Self {
            x,
            y,
            x_advance,
            y_advance,
        }
    }

    /// The offset of the glyph origin.
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// One glyph instance within a shaped run.
#[derive(Clone, Debug)]
pub struct GlyphPlacement {
    /// Font-internal glyph identifier.
    pub glyph_id: u32,
    /// Position of the glyph in run space.
    pub position: Position,
    /// Base or mark.
    pub category: GlyphCategory,
    /// Cursive attachment point in run space, if the font gives the glyph one.
    pub cursive_anchor: Option<Point>,
    /// Index of the glyph in the run's logical order.
    pub run_index: usize,
    /// Index of the source character the glyph was shaped from.
    pub cluster: u32,
    outline: Outline,
}

impl GlyphPlacement {
    /// Place a glyph whose outline is given in font units.
    ///
    /// The glyph is a base without a cursive anchor; use the `with_*` methods to refine it.
    pub fn new(run_index: usize, glyph_id: u32, outline: &BezPath, position: Position) -> Self {
        let mut path = outline.clone();
        path.apply_affine(Affine::translate(position.offset()));

        Self {
            glyph_id,
            position,
            category: GlyphCategory::Base,
            cursive_anchor: None,
            run_index,
            cluster: 0,
            outline: Outline::new(path),
        }
    }

    /// Set the category of the glyph.
    pub fn with_category(mut self, category: GlyphCategory) -> Self {
        self.category = category;
        self
    }

    /// Set the cursive attachment point, given in font units.
    pub fn with_cursive_anchor(mut self, anchor: Point) -> Self {
        self.cursive_anchor = Some(anchor + self.position.offset());
        self
    }

    /// Set the index of the source character.
    pub fn with_cluster(mut self, cluster: u32) -> Self {
        self.cluster = cluster;
        self
    }

    /// The outline of the glyph, in run space.
    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    /// Whether the glyph is a mark.
    pub fn is_mark(&self) -> bool {
        self.category == GlyphCategory::Mark
    }
}
