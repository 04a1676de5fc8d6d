// Copyright 2026 the Collidoscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collidoscope finds glyph outlines that overlap where they should not.
//!
//! Font engineers use it to brute-force every string up to a given length over a set of
//! code points, shape each string, and report the strings whose glyphs collide: a mark
//! crashing into a stroke, two base letters touching, and so on.
//!
//! This crate is the collision engine. It does not shape text or read fonts itself;
//! see `collidoscope_font` for a [`RunSource`][source::RunSource] backed by real font files.
//!
//! # Usage
//!
//! ```
//! use collidoscope::kurbo::{BezPath, Rect, Shape};
//! use collidoscope::{CollisionEngine, GlyphPlacement, Position, RuleConfig};
//!
//! let square = Rect::new(0.0, 0.0, 100.0, 100.0).to_path(0.1);
//! let run = [
//!     GlyphPlacement::new(0, 1, &square, Position::new(0.0, 0.0, 90.0, 0.0)),
//!     GlyphPlacement::new(1, 1, &square, Position::new(90.0, 0.0, 90.0, 0.0)),
//! ];
//! let config = RuleConfig::builder().bases(true).build().unwrap();
//! let engine = CollisionEngine::new(config);
//! assert_eq!(engine.has_collisions(&run).unwrap().len(), 1);
//! ```
//!
//! # Features
//!
//! - `svg` (enabled by default): Render a run and its collisions as an SVG document
//!   (see the [`report`] module).
//!
//! # Contents
//!
//! - [`outline`]: the path model, outlines flattened once and placed in run space.
//! - [`prefilter`]: bounding box rejection of pairs that cannot overlap.
//! - [`overlap`]: exact overlap and area computation.
//! - [`rules`] and [`evaluator`]: which pairs are tested and which overlaps are reported.
//! - [`engine`]: the entry points tying it all together.
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod engine;
pub mod error;
pub mod evaluator;
pub mod flatten;
pub mod outline;
pub mod overlap;
pub mod prefilter;
#[cfg(feature = "svg")]
pub mod report;
pub mod rules;
pub mod source;

pub use engine::{has_collisions, Collision, CollisionEngine, CollisionKind};
pub use error::{Error, Result};
pub use outline::{GlyphCategory, GlyphPlacement, Outline, Position};
pub use overlap::{OverlapBackend, SlabDecomposition};
pub use rules::RuleConfig;

pub use peniko;
pub use peniko::kurbo;
