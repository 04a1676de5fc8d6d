// Copyright 2026 the Collidoscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Applying a [`RuleConfig`] to the glyph pairs of a run.
//!
//! Every pair `(i, j)` with `i < j` goes through a fixed sequence of guards, the first one
//! that applies decides how the pair is tested:
//!
//! 1. Two marks are tested only under the `marks` rule, and any overlap is reported.
//! 2. Two adjacent bases are skipped when `bases` is off.
//! 3. An adjacent pair is exempt when `cursive` is on and both glyphs carry an anchor.
//!    Otherwise, with an `area` tolerance the intersection must exceed that fraction of
//!    the smaller outline; without one, any overlap is reported.
//! 4. Two non-adjacent bases are tested only under the `faraway` rule, and any overlap is
//!    reported. Non-adjacent pairs involving one mark are never tested.
//!
//! Pairs are produced lazily, so stopping after the first [`Collision`] skips all
//! remaining geometry.

use crate::engine::{Collision, CollisionKind};
use crate::outline::GlyphPlacement;
use crate::overlap::OverlapBackend;
use crate::prefilter;
use crate::rules::RuleConfig;
use log::trace;

/// Evaluates the rules of a [`RuleConfig`] over one run.
///
/// The run is trusted to be well formed; see [`CollisionEngine`](crate::CollisionEngine)
/// for the validating entry point.
#[derive(Debug)]
pub struct Evaluator<'a, B: OverlapBackend + ?Sized> {
    run: &'a [GlyphPlacement],
    config: &'a RuleConfig,
    backend: &'a B,
}

impl<B: OverlapBackend + ?Sized> Clone for Evaluator<'_, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: OverlapBackend + ?Sized> Copy for Evaluator<'_, B> {}

impl<'a, B: OverlapBackend + ?Sized> Evaluator<'a, B> {
    /// Create an evaluator for `run`.
    pub fn new(run: &'a [GlyphPlacement], config: &'a RuleConfig, backend: &'a B) -> Self {
        Self {
            run,
            config,
            backend,
        }
    }

    /// All collisions of the run, in pair order, computed on demand.
    pub fn collisions(self) -> Collisions<'a, B> {
        Collisions {
            evaluator: self,
            pairs: Pairs::new(self.run.len(), !self.config.tests_distant_pairs()),
        }
    }

    /// Decide whether the glyphs at positions `i` and `j` collide.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is out of bounds for the run.
    pub fn evaluate_pair(&self, i: usize, j: usize) -> Option<Collision> {
        let (i, j) = (i.min(j), i.max(j));
        let (first, second) = (&self.run[i], &self.run[j]);
        let config = self.config;

        if first.is_mark() && second.is_mark() {
            if !config.marks() {
                return None;
            }
            return self
                .overlaps(first, second)
                .then(|| Collision::new(i, j, CollisionKind::MarkMark));
        }

        let adjacent = first.run_index.abs_diff(second.run_index) == 1;
        if !adjacent {
            if !config.faraway() || first.is_mark() || second.is_mark() {
                return None;
            }
            return self
                .overlaps(first, second)
                .then(|| Collision::new(i, j, CollisionKind::NonAdjacent));
        }

        if !config.bases() && !first.is_mark() && !second.is_mark() {
            return None;
        }
        if config.cursive()
            && first.cursive_anchor.is_some()
            && second.cursive_anchor.is_some()
        {
            trace!("glyphs {i} and {j} are cursively attached");
            return None;
        }

        match config.area() {
            Some(fraction) => {
                if !prefilter::may_overlap(first.outline(), second.outline()) {
                    return None;
                }
                let overlap = self
                    .backend
                    .intersection_area(first.outline(), second.outline());
                if overlap <= 0.0 {
                    return None;
                }
                let smaller = self
                    .backend
                    .area(first.outline())
                    .min(self.backend.area(second.outline()));
                let threshold = fraction * smaller;
                trace!("glyphs {i} and {j} overlap by {overlap}, tolerated up to {threshold}");
                (overlap > threshold).then(|| {
                    Collision::new(i, j, CollisionKind::Adjacent).with_overlap_area(overlap)
                })
            }
            None => self
                .overlaps(first, second)
                .then(|| Collision::new(i, j, CollisionKind::Adjacent)),
        }
    }

    fn overlaps(&self, a: &GlyphPlacement, b: &GlyphPlacement) -> bool {
        prefilter::may_overlap(a.outline(), b.outline())
            && self.backend.overlaps(a.outline(), b.outline())
    }
}

/// The index pairs `(i, j)` with `i < j`, in lexicographic order.
#[derive(Clone, Debug)]
struct Pairs {
    len: usize,
    i: usize,
    j: usize,
    consecutive_only: bool,
}

impl Pairs {
    fn new(len: usize, consecutive_only: bool) -> Self {
        Self {
            len,
            i: 0,
            j: 1,
            consecutive_only,
        }
    }
}

impl Iterator for Pairs {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.i + 1 >= self.len {
                return None;
            }
            if self.j < self.len {
                let pair = (self.i, self.j);
                self.j += 1;
                if self.consecutive_only {
                    self.j = self.len;
                }
                return Some(pair);
            }
            self.i += 1;
            self.j = self.i + 1;
        }
    }
}

/// A lazy iterator over the collisions of a run.
///
/// Created by [`Evaluator::collisions`] and
/// [`CollisionEngine::collisions`](crate::CollisionEngine::collisions). Take the first
/// item for a pass/fail answer, or drain it for every collision of the run.
#[derive(Debug)]
pub struct Collisions<'a, B: OverlapBackend + ?Sized> {
    evaluator: Evaluator<'a, B>,
    pairs: Pairs,
}

impl<B: OverlapBackend + ?Sized> Iterator for Collisions<'_, B> {
    type Item = Collision;

    fn next(&mut self) -> Option<Self::Item> {
        let evaluator = self.evaluator;
        self.pairs.find_map(|(i, j)| evaluator.evaluate_pair(i, j))
    }
}
