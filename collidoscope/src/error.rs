// Copyright 2026 the Collidoscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by the collision engine.

use thiserror::Error;

/// Errors that can occur while configuring the engine or checking a run.
///
/// None of these are transient: they are deterministic consequences of the inputs,
/// so retrying the same call will fail the same way.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The area tolerance must be a fraction in `[0, 1]`.
    #[error("area tolerance {0} is outside of [0, 1]")]
    AreaOutOfRange(f64),
    /// Every rule of the configuration is switched off.
    #[error("no collision rule is enabled")]
    NoRulesEnabled,
    /// The run contains no glyphs.
    ///
    /// This usually means the shaper failed upstream, so it is not treated as "no collision".
    #[error("cannot check an empty run")]
    EmptyRun,
    /// Run indices must count up from zero without gaps, in slice order.
    #[error("glyph at position {position} has run index {found}, expected {expected}")]
    RunOrder {
        /// Position of the offending glyph in the slice.
        position: usize,
        /// The run index the glyph should have carried.
        expected: usize,
        /// The run index it actually carried.
        found: usize,
    },
    /// A mark glyph has nothing to draw.
    #[error("mark glyph {glyph_id} at position {position} has no outline")]
    MissingOutline {
        /// Position of the offending glyph in the slice.
        position: usize,
        /// Font glyph identifier.
        glyph_id: u32,
    },
}

/// A specialized `Result` for collision checks.
pub type Result<T, E = Error> = core::result::Result<T, E>;
