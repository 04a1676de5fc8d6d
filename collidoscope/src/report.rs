// Copyright 2026 the Collidoscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing runs and their collisions as SVG.
//!
//! Glyphs are filled with a colour picked by their position in the run, and the overlap
//! of every collision is painted in black on top. Font units grow upwards while SVG
//! coordinates grow downwards, so all y coordinates are negated.

use crate::engine::Collision;
use crate::kurbo::{BezPath, PathEl, Point, Rect};
use crate::outline::GlyphPlacement;
use crate::overlap::{SlabDecomposition, Trapezoid};
use svg::node::element::path::Data;
use svg::node::element::Path;
use svg::{Document, Node};

/// Glyph fill colours, cycled through by run position.
pub const PALETTE: [&str; 5] = ["green", "red", "purple", "blue", "yellow"];

/// Space around the glyphs, in font units.
const MARGIN: f64 = 20.0;

/// Draw `run` with the overlaps of `collisions` painted over it.
///
/// Collisions referring to glyphs outside of the run are skipped.
pub fn render(
    run: &[GlyphPlacement],
    collisions: &[Collision],
    backend: &SlabDecomposition,
) -> Document {
    let bounds = run
        .iter()
        .filter_map(|glyph| glyph.outline().bbox())
        .reduce(|acc, bbox| acc.union(bbox))
        .unwrap_or(Rect::ZERO)
        .inflate(MARGIN, MARGIN);

    let mut document = Document::new().set(
        "viewBox",
        (
            bounds.x0 as f32,
            -bounds.y1 as f32,
            bounds.width() as f32,
            bounds.height() as f32,
        ),
    );

    for (ix, glyph) in run.iter().enumerate() {
        if glyph.outline().is_empty() {
            continue;
        }
        let path = Path::new()
            .set("fill", PALETTE[ix % PALETTE.len()])
            .set("d", path_data(glyph.outline().path()));

        document.append(path);
    }

    for collision in collisions {
        let (Some(first), Some(second)) = (run.get(collision.first), run.get(collision.second))
        else {
            continue;
        };
        let trapezoids = backend.intersection_trapezoids(first.outline(), second.outline());
        if trapezoids.is_empty() {
            continue;
        }
        let overlap = Path::new()
            .set("fill", "black")
            .set("d", trapezoid_data(&trapezoids));

        document.append(overlap);
    }

    document
}

fn flip(p: Point) -> (f32, f32) {
    (p.x as f32, -p.y as f32)
}

fn path_data(path: &BezPath) -> Data {
    let mut data = Data::new();
    for el in path.elements() {
        data = match *el {
            PathEl::MoveTo(p) => data.move_to(flip(p)),
            PathEl::LineTo(p) => data.line_to(flip(p)),
            PathEl::QuadTo(p1, p2) => {
                let ((x1, y1), (x2, y2)) = (flip(p1), flip(p2));
                data.quadratic_curve_to((x1, y1, x2, y2))
            }
            PathEl::CurveTo(p1, p2, p3) => {
                let ((x1, y1), (x2, y2), (x3, y3)) = (flip(p1), flip(p2), flip(p3));
                data.cubic_curve_to((x1, y1, x2, y2, x3, y3))
            }
            PathEl::ClosePath => data.close(),
        };
    }
    data
}

fn trapezoid_data(trapezoids: &[Trapezoid]) -> Data {
    let mut data = Data::new();
    for trapezoid in trapezoids {
        let [p0, p1, p2, p3] = trapezoid.points();
        data = data
            .move_to(flip(p0))
            .line_to(flip(p1))
            .line_to(flip(p2))
            .line_to(flip(p3))
            .close();
    }
    data
}
