// Copyright 2026 the Collidoscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Exact overlap and area computation between outlines.
//!
//! The rule evaluator only talks to an [`OverlapBackend`], so the geometry behind it can be
//! swapped without touching the rules. The default backend, [`SlabDecomposition`], works on
//! the flattened outline boundaries:
//!
//! 1. The plane is cut into horizontal slabs at every vertex and at every point where two
//!    edges cross. Inside a slab no two edges cross, so their left-to-right order is fixed.
//! 2. Within each slab, a left-to-right sweep over the edges tracks the winding number of
//!    each outline. Every gap between two neighbouring edges is a trapezoid that is either
//!    entirely inside the region of interest or entirely outside of it.
//!
//! Summing the inside trapezoids gives an area that depends only on the vector geometry,
//! so results are reproducible bit for bit for identical inputs.

use crate::flatten::Line;
use crate::kurbo::{Point, Rect};
use crate::outline::Outline;
use crate::prefilter;
use core::cmp::Ordering;
use core::ops::ControlFlow;
use peniko::Fill;

/// Areas at or below this value, in square font units, count as no area at all.
///
/// Outlines that only touch along a shared boundary can produce slivers of this size
/// from floating point noise.
pub const AREA_EPSILON: f64 = 1e-6;

/// Exact geometric queries on outlines.
pub trait OverlapBackend: Send + Sync {
    /// The filled area of an outline.
    fn area(&self, outline: &Outline) -> f64;

    /// The area of the region filled by both outlines.
    ///
    /// This is `0` whenever [`overlaps`](Self::overlaps) is false.
    fn intersection_area(&self, a: &Outline, b: &Outline) -> f64;

    /// Whether the filled regions of both outlines share any area.
    ///
    /// Touching at a point or along a boundary is not an overlap.
    fn overlaps(&self, a: &Outline, b: &Outline) -> bool {
        self.intersection_area(a, b) > 0.0
    }
}

/// A trapezoid with horizontal top and bottom edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trapezoid {
    /// The lower y coordinate.
    pub y0: f64,
    /// The upper y coordinate.
    pub y1: f64,
    /// The left x coordinate at `y0`.
    pub left0: f64,
    /// The right x coordinate at `y0`.
    pub right0: f64,
    /// The left x coordinate at `y1`.
    pub left1: f64,
    /// The right x coordinate at `y1`.
    pub right1: f64,
}

impl Trapezoid {
    /// The area of the trapezoid.
    pub fn area(&self) -> f64 {
        (self.y1 - self.y0) * ((self.right0 - self.left0) + (self.right1 - self.left1)) * 0.5
    }

    /// The corners of the trapezoid, counter-clockwise from the lower left.
    pub fn points(&self) -> [Point; 4] {
        [
            Point::new(self.left0, self.y0),
            Point::new(self.right0, self.y0),
            Point::new(self.right1, self.y1),
            Point::new(self.left1, self.y1),
        ]
    }
}

/// The default [`OverlapBackend`], decomposing filled regions into trapezoids.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlabDecomposition {
    fill: Fill,
    epsilon: f64,
}

impl Default for SlabDecomposition {
    fn default() -> Self {
        Self::new(Fill::NonZero)
    }
}

impl SlabDecomposition {
    /// Create a backend filling outlines with the given rule.
    ///
    /// Font outlines use [`Fill::NonZero`].
    pub fn new(fill: Fill) -> Self {
        Self {
            fill,
            epsilon: AREA_EPSILON,
        }
    }

    /// Set the area below which an intersection is treated as empty.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon.max(0.0);
        self
    }

    /// The fill rule used for outlines.
    pub fn fill(&self) -> Fill {
        self.fill
    }

    /// The region filled by both outlines, as trapezoids.
    pub fn intersection_trapezoids(&self, a: &Outline, b: &Outline) -> Vec<Trapezoid> {
        let mut trapezoids = vec![];
        self.sweep_intersection(a, b, |trapezoid| {
            trapezoids.push(trapezoid);
            ControlFlow::Continue(())
        });
        trapezoids
    }

    fn is_filled(&self, winding: i32) -> bool {
        match self.fill {
            Fill::NonZero => winding != 0,
            Fill::EvenOdd => winding % 2 != 0,
        }
    }

    fn sweep_intersection(
        &self,
        a: &Outline,
        b: &Outline,
        sink: impl FnMut(Trapezoid) -> ControlFlow<()>,
    ) {
        let Some(region) = prefilter::overlap_region(a, b) else {
            return;
        };

        let mut edges = vec![];
        for lines in prefilter::contours_in(a, region) {
            push_edges(&mut edges, lines, 0);
        }
        for lines in prefilter::contours_in(b, region) {
            push_edges(&mut edges, lines, 1);
        }

        sweep(
            &mut edges,
            (region.y0, region.y1),
            |winding| self.is_filled(winding[0]) && self.is_filled(winding[1]),
            sink,
        );
    }
}

impl OverlapBackend for SlabDecomposition {
    fn area(&self, outline: &Outline) -> f64 {
        let Some(bbox) = outline.bbox() else {
            return 0.0;
        };

        outline.filled_area(self.fill, || {
            let mut edges = vec![];
            push_edges(&mut edges, outline.lines(), 0);

            let mut area = 0.0;
            sweep(
                &mut edges,
                (bbox.y0, bbox.y1),
                |winding| self.is_filled(winding[0]),
                |trapezoid| {
                    area += trapezoid.area();
                    ControlFlow::Continue(())
                },
            );
            area.max(0.0)
        })
    }

    fn intersection_area(&self, a: &Outline, b: &Outline) -> f64 {
        let mut area = 0.0;
        self.sweep_intersection(a, b, |trapezoid| {
            area += trapezoid.area();
            ControlFlow::Continue(())
        });

        if area > self.epsilon {
            area
        } else {
            0.0
        }
    }

    fn overlaps(&self, a: &Outline, b: &Outline) -> bool {
        let mut area = 0.0;
        let mut overlaps = false;
        self.sweep_intersection(a, b, |trapezoid| {
            area += trapezoid.area();
            if area > self.epsilon {
                overlaps = true;
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        overlaps
    }
}

/// A non-horizontal line, oriented upwards.
#[derive(Clone, Copy, Debug)]
struct Edge {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    /// `+1` if the input line pointed upwards, `-1` otherwise.
    winding: i32,
    /// Which of the swept outlines the edge belongs to.
    owner: usize,
}

impl Edge {
    fn new(line: &Line, owner: usize) -> Option<Self> {
        let (lower, upper, winding) = match line.p0.y.partial_cmp(&line.p1.y)? {
            Ordering::Less => (line.p0, line.p1, 1),
            Ordering::Greater => (line.p1, line.p0, -1),
            Ordering::Equal => return None,
        };
        Some(Self {
            x0: lower.x,
            y0: lower.y,
            x1: upper.x,
            y1: upper.y,
            winding,
            owner,
        })
    }

    fn x_at(&self, y: f64) -> f64 {
        if y <= self.y0 {
            self.x0
        } else if y >= self.y1 {
            self.x1
        } else {
            self.x0 + (y - self.y0) * (self.x1 - self.x0) / (self.y1 - self.y0)
        }
    }
}

fn push_edges(edges: &mut Vec<Edge>, lines: &[Line], owner: usize) {
    edges.extend(lines.iter().filter_map(|line| Edge::new(line, owner)));
}

/// The y coordinate where two edges cross, if they cross strictly inside their common span.
fn crossing(a: &Edge, b: &Edge) -> Option<f64> {
    let lo = a.y0.max(b.y0);
    let hi = a.y1.min(b.y1);
    if hi <= lo {
        return None;
    }

    let d_lo = a.x_at(lo) - b.x_at(lo);
    let d_hi = a.x_at(hi) - b.x_at(hi);
    if (d_lo < 0.0 && d_hi > 0.0) || (d_lo > 0.0 && d_hi < 0.0) {
        let y = lo + (hi - lo) * (d_lo / (d_lo - d_hi));
        (y > lo && y < hi).then_some(y)
    } else {
        None
    }
}

/// An edge crossing a slab.
struct Crossing {
    /// x at the bottom, the middle and the top of the slab.
    x: [f64; 3],
    winding: i32,
    owner: usize,
}

/// Decompose the region selected by `filled` into trapezoids within `y_range`.
///
/// `filled` receives the winding number of each owner left of a gap between two edges.
/// `sink` can stop the sweep early by returning [`ControlFlow::Break`].
fn sweep(
    edges: &mut [Edge],
    (y_lo, y_hi): (f64, f64),
    filled: impl Fn(&[i32; 2]) -> bool,
    mut sink: impl FnMut(Trapezoid) -> ControlFlow<()>,
) {
    if y_hi <= y_lo || edges.is_empty() {
        return;
    }

    edges.sort_by(|a, b| a.y0.total_cmp(&b.y0).then(a.x0.total_cmp(&b.x0)));

    let in_range = |y: f64| y > y_lo && y < y_hi;
    let mut ys = vec![y_lo, y_hi];
    for (i, edge) in edges.iter().enumerate() {
        for y in [edge.y0, edge.y1] {
            if in_range(y) {
                ys.push(y);
            }
        }
        // Edges are sorted by their lower end, so later edges starting above this one's
        // upper end cannot cross it.
        for other in edges[i + 1..].iter().take_while(|other| other.y0 < edge.y1) {
            if let Some(y) = crossing(edge, other).filter(|y| in_range(*y)) {
                ys.push(y);
            }
        }
    }
    ys.sort_by(f64::total_cmp);
    ys.dedup();

    let mut next_edge = 0;
    let mut active: Vec<usize> = vec![];
    let mut crossings: Vec<Crossing> = vec![];

    for slab in ys.windows(2) {
        let (ya, yb) = (slab[0], slab[1]);

        while next_edge < edges.len() && edges[next_edge].y0 <= ya {
            active.push(next_edge);
            next_edge += 1;
        }
        // Every edge end is a slab boundary, so an edge reaching past `ya` spans the slab.
        active.retain(|&idx| edges[idx].y1 > ya);

        let ym = 0.5 * (ya + yb);
        crossings.clear();
        crossings.extend(active.iter().map(|&idx| {
            let edge = &edges[idx];
            Crossing {
                x: [edge.x_at(ya), edge.x_at(ym), edge.x_at(yb)],
                winding: edge.winding,
                owner: edge.owner,
            }
        }));
        crossings.sort_by(|a, b| a.x[1].total_cmp(&b.x[1]).then(a.x[0].total_cmp(&b.x[0])));

        let mut winding = [0_i32; 2];
        for pair in crossings.windows(2) {
            let (left, right) = (&pair[0], &pair[1]);
            winding[left.owner] += left.winding;
            if !filled(&winding) {
                continue;
            }

            let trapezoid = Trapezoid {
                y0: ya,
                y1: yb,
                left0: left.x[0],
                right0: right.x[0],
                left1: left.x[2],
                right1: right.x[2],
            };
            if sink(trapezoid).is_break() {
                return;
            }
        }
    }
}

/// The filled area of an outline, using the default backend.
pub fn area(outline: &Outline) -> f64 {
    SlabDecomposition::default().area(outline)
}

/// The area filled by both outlines, using the default backend.
pub fn intersection_area(a: &Outline, b: &Outline) -> f64 {
    SlabDecomposition::default().intersection_area(a, b)
}

/// Whether two outlines overlap, using the default backend.
pub fn overlaps(a: &Outline, b: &Outline) -> bool {
    SlabDecomposition::default().overlaps(a, b)
}

/// The bounding box of a set of trapezoids.
pub fn trapezoid_bounds(trapezoids: &[Trapezoid]) -> Option<Rect> {
    trapezoids
        .iter()
        .map(|t| {
            Rect::new(
                t.left0.min(t.left1),
                t.y0,
                t.right0.max(t.right1),
                t.y1,
            )
        })
        .reduce(|acc, r| acc.union(r))
}

#[cfg(test)]
mod tests {
    use super::{
        area, intersection_area, overlaps, trapezoid_bounds, OverlapBackend, SlabDecomposition,
    };
    use crate::kurbo::{BezPath, Circle, Rect, Shape};
    use crate::outline::Outline;
    use peniko::Fill;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Outline {
        Outline::new(Rect::new(x0, y0, x1, y1).to_path(0.1))
    }

    /// A square with a square hole, the hole wound in the opposite direction.
    fn frame() -> Outline {
        let mut path = Rect::new(0.0, 0.0, 30.0, 30.0).to_path(0.1);
        path.move_to((10.0, 10.0));
        path.line_to((10.0, 20.0));
        path.line_to((20.0, 20.0));
        path.line_to((20.0, 10.0));
        path.close_path();
        Outline::new(path)
    }

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "{actual} is not within {tolerance} of {expected}"
        );
    }

    #[test]
    fn areas_are_cached_per_fill_rule() {
        let outline = frame();
        let non_zero = SlabDecomposition::default().area(&outline);
        assert_close(non_zero, 800.0, 1e-9);

        // Later requests are answered from the cache.
        assert_eq!(outline.filled_area(Fill::NonZero, || -1.0), non_zero);
        assert_eq!(SlabDecomposition::default().area(&outline), non_zero);
        assert_eq!(outline.filled_area(Fill::EvenOdd, || -1.0), -1.0);
    }

    #[test]
    fn rect_area() {
        assert_eq!(area(&rect(0.0, 0.0, 10.0, 20.0)), 200.0);
    }

    #[test]
    fn triangle_area() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        path.line_to((0.0, 10.0));
        path.close_path();
        assert_close(area(&Outline::new(path)), 50.0, 1e-9);
    }

    #[test]
    fn circle_area() {
        let circle = Outline::new(Circle::new((0.0, 0.0), 100.0).to_path(0.01));
        // Flattening loses a little area along the curve.
        assert_close(area(&circle), core::f64::consts::PI * 100.0 * 100.0, 250.0);
    }

    #[test]
    fn holes_subtract() {
        assert_eq!(area(&frame()), 800.0);
        let even_odd = SlabDecomposition::new(Fill::EvenOdd);
        assert_eq!(even_odd.area(&frame()), 800.0);
    }

    #[test]
    fn overlapping_contours_are_not_counted_twice() {
        let mut path = Rect::new(0.0, 0.0, 10.0, 10.0).to_path(0.1);
        path.extend(Rect::new(5.0, 5.0, 15.0, 15.0).path_elements(0.1));
        let outline = Outline::new(path);

        assert_eq!(area(&outline), 175.0);
        // Under even-odd, the shared square is a hole.
        assert_eq!(SlabDecomposition::new(Fill::EvenOdd).area(&outline), 150.0);
    }

    #[test]
    fn empty_outline_has_no_area() {
        assert_eq!(area(&Outline::empty()), 0.0);
        let unit = rect(0.0, 0.0, 1.0, 1.0);
        assert_eq!(intersection_area(&Outline::empty(), &unit), 0.0);
    }

    #[test]
    fn partial_overlap() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(7.5, 0.0, 17.5, 10.0);
        assert_eq!(intersection_area(&a, &b), 25.0);
        assert!(overlaps(&a, &b));
    }

    #[test]
    fn touching_is_not_overlapping() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let edge = rect(10.0, 0.0, 20.0, 10.0);
        let corner = rect(10.0, 10.0, 20.0, 20.0);
        for b in [&edge, &corner] {
            assert_eq!(intersection_area(&a, b), 0.0);
            assert!(!overlaps(&a, b));
        }
    }

    #[test]
    fn containment() {
        let outer = rect(0.0, 0.0, 100.0, 100.0);
        let inner = rect(40.0, 40.0, 50.0, 60.0);
        assert_eq!(intersection_area(&outer, &inner), 200.0);
        assert_eq!(intersection_area(&inner, &outer), 200.0);
    }

    #[test]
    fn shape_inside_a_hole_does_not_overlap() {
        let inner = rect(12.0, 12.0, 18.0, 18.0);
        assert!(!overlaps(&frame(), &inner));
        assert_eq!(intersection_area(&frame(), &inner), 0.0);
    }

    #[test]
    fn diagonal_crossings() {
        // Two triangles whose slanted edges cross; the overlap is a smaller triangle.
        let mut a = BezPath::new();
        a.move_to((0.0, 0.0));
        a.line_to((10.0, 0.0));
        a.line_to((0.0, 10.0));
        a.close_path();
        let mut b = BezPath::new();
        b.move_to((0.0, 0.0));
        b.line_to((10.0, 0.0));
        b.line_to((10.0, 10.0));
        b.close_path();

        let (a, b) = (Outline::new(a), Outline::new(b));
        assert_close(intersection_area(&a, &b), 25.0, 1e-9);
    }

    #[test]
    fn circles_are_symmetric() {
        let a = Outline::new(Circle::new((0.0, 0.0), 50.0).to_path(0.1));
        let b = Outline::new(Circle::new((60.0, 10.0), 40.0).to_path(0.1));
        let ab = intersection_area(&a, &b);
        let ba = intersection_area(&b, &a);
        assert!(ab > 0.0);
        assert_eq!(ab, ba);
        assert!(ab <= area(&a).min(area(&b)));
    }

    #[test]
    fn trapezoids_cover_the_intersection() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(5.0, 2.0, 20.0, 8.0);
        let backend = SlabDecomposition::default();
        let trapezoids = backend.intersection_trapezoids(&a, &b);
        let total: f64 = trapezoids.iter().map(|t| t.area()).sum();
        assert_eq!(total, 30.0);
        assert_eq!(
            trapezoid_bounds(&trapezoids),
            Some(Rect::new(5.0, 2.0, 10.0, 8.0))
        );
    }

    #[test]
    fn epsilon_swallows_slivers() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(10.0 - 1e-8, 0.0, 20.0, 10.0);
        assert_eq!(intersection_area(&a, &b), 0.0);
        assert!(!overlaps(&a, &b));

        let strict = SlabDecomposition::default().with_epsilon(0.0);
        assert!(strict.overlaps(&a, &b));
    }
}
