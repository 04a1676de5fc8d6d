// Copyright 2026 the Collidoscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph builders shared by the integration tests.

#![allow(dead_code)]

use collidoscope::kurbo::{BezPath, Circle, Point, Rect, Shape};
use collidoscope::{GlyphCategory, GlyphPlacement, Position};

/// A square glyph outline with its lower left corner at the origin.
pub fn square(size: f64) -> BezPath {
    Rect::new(0.0, 0.0, size, size).to_path(0.1)
}

/// A round glyph outline centred on `(radius, radius)`.
pub fn disc(radius: f64) -> BezPath {
    Circle::new((radius, radius), radius).to_path(0.1)
}

/// A 10 by 10 base glyph at `x`.
pub fn base(run_index: usize, x: f64) -> GlyphPlacement {
    GlyphPlacement::new(run_index, 1, &square(10.0), Position::new(x, 0.0, 10.0, 0.0))
}

/// A 10 by 10 mark glyph at `(x, y)`.
pub fn mark(run_index: usize, x: f64, y: f64) -> GlyphPlacement {
    GlyphPlacement::new(run_index, 2, &square(10.0), Position::new(x, y, 0.0, 0.0))
        .with_category(GlyphCategory::Mark)
}

/// Give a glyph an anchor on its right edge.
pub fn anchored(glyph: GlyphPlacement) -> GlyphPlacement {
    glyph.with_cursive_anchor(Point::new(10.0, 5.0))
}
