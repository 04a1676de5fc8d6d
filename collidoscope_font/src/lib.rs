// Copyright 2026 the Collidoscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Real fonts for the collidoscope collision engine.
//!
//! [`FontData`] reads a font file once: its glyph classes (base or mark) and its cursive
//! attachment anchors. A [`ShapingContext`] then shapes strings with [HarfRust] and turns
//! the result into a run of [`GlyphPlacement`](collidoscope::GlyphPlacement)s with outlines
//! drawn by [Skrifa], ready for [`CollisionEngine`](collidoscope::CollisionEngine).
//!
//! Everything stays in font units: glyphs are neither scaled nor hinted.
//!
//! ```no_run
//! use collidoscope::{CollisionEngine, RuleConfig};
//! use collidoscope_font::{FontData, ShapingContext};
//!
//! let font = FontData::open("NotoNastaliqUrdu-Regular.ttf", 0)?;
//! let mut context = ShapingContext::new(&font)?;
//! let run = context.shape("سلام")?;
//!
//! let engine = CollisionEngine::new(RuleConfig::default());
//! for collision in engine.all_collisions(&run)? {
//!     println!("{collision:?}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [HarfRust]: harfrust
//! [Skrifa]: skrifa
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![forbid(unsafe_code)]

mod error;
mod font;
mod shaping;

pub use error::{FontError, Result};
pub use font::FontData;
pub use shaping::ShapingContext;

pub use harfrust;
pub use skrifa;
