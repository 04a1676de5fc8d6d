// Copyright 2026 the Collidoscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The entry points of the collision engine.

use crate::error::{Error, Result};
use crate::evaluator::{Collisions, Evaluator};
use crate::outline::GlyphPlacement;
use crate::overlap::{OverlapBackend, SlabDecomposition};
use crate::rules::RuleConfig;

/// Which rule a [`Collision`] was reported under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollisionKind {
    /// Two glyphs next to each other in the run.
    Adjacent,
    /// Two base glyphs further apart in the run.
    NonAdjacent,
    /// Two mark glyphs, anywhere in the run.
    MarkMark,
}

/// Two glyphs of a run whose outlines overlap where they should not.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Collision {
    /// Position of the earlier glyph in the run.
    pub first: usize,
    /// Position of the later glyph in the run.
    pub second: usize,
    /// The rule that reported the overlap.
    pub kind: CollisionKind,
    /// The intersection area, when it was needed to decide.
    ///
    /// Only the `area` tolerance measures it; every other rule stops at the first sign
    /// of overlap.
    pub overlap_area: Option<f64>,
}

impl Collision {
    /// Create a collision between the glyphs at `first` and `second`.
    pub fn new(first: usize, second: usize, kind: CollisionKind) -> Self {
        Self {
            first,
            second,
            kind,
            overlap_area: None,
        }
    }

    /// Record the measured intersection area.
    pub fn with_overlap_area(mut self, area: f64) -> Self {
        self.overlap_area = Some(area);
        self
    }
}

/// Checks runs against one [`RuleConfig`].
///
/// The engine holds no state besides its configuration and backend, so one instance can
/// be shared by any number of threads checking different runs.
#[derive(Clone, Debug)]
pub struct CollisionEngine<B = SlabDecomposition> {
    config: RuleConfig,
    backend: B,
}

impl CollisionEngine {
    /// Create an engine using the default [`SlabDecomposition`] backend.
    pub fn new(config: RuleConfig) -> Self {
        Self::with_backend(config, SlabDecomposition::default())
    }
}

impl<B: OverlapBackend> CollisionEngine<B> {
    /// Create an engine using a custom geometry backend.
    pub fn with_backend(config: RuleConfig, backend: B) -> Self {
        Self { config, backend }
    }

    /// The rules the engine applies.
    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// The geometry backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The collisions of `run`, computed lazily in pair order.
    ///
    /// The run is validated up front; an invalid run is an error rather than a run
    /// without collisions.
    pub fn collisions<'a>(&'a self, run: &'a [GlyphPlacement]) -> Result<Collisions<'a, B>> {
        validate_run(run)?;
        Ok(Evaluator::new(run, &self.config, &self.backend).collisions())
    }

    /// Check `run`, stopping at the first collision.
    ///
    /// The result holds at most one collision; it is empty if the run is clean. Use
    /// [`all_collisions`](Self::all_collisions) to list every collision.
    pub fn has_collisions(&self, run: &[GlyphPlacement]) -> Result<Vec<Collision>> {
        Ok(self.collisions(run)?.take(1).collect())
    }

    /// Every collision of `run`.
    pub fn all_collisions(&self, run: &[GlyphPlacement]) -> Result<Vec<Collision>> {
        Ok(self.collisions(run)?.collect())
    }
}

#[cfg(feature = "svg")]
impl CollisionEngine<SlabDecomposition> {
    /// Draw `run` with the overlaps of `collisions` painted over it.
    pub fn render(&self, run: &[GlyphPlacement], collisions: &[Collision]) -> svg::Document {
        crate::report::render(run, collisions, &self.backend)
    }
}

/// Check `run` against `config` with the default backend, stopping at the first collision.
pub fn has_collisions(run: &[GlyphPlacement], config: &RuleConfig) -> Result<Vec<Collision>> {
    CollisionEngine::new(*config).has_collisions(run)
}

fn validate_run(run: &[GlyphPlacement]) -> Result<()> {
    if run.is_empty() {
        return Err(Error::EmptyRun);
    }
    for (position, glyph) in run.iter().enumerate() {
        if glyph.run_index != position {
            return Err(Error::RunOrder {
                position,
                expected: position,
                found: glyph.run_index,
            });
        }
        if glyph.is_mark() && glyph.outline().is_empty() {
            return Err(Error::MissingOutline {
                position,
                glyph_id: glyph.glyph_id,
            });
        }
    }
    Ok(())
}
