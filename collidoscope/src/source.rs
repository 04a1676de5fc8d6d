// Copyright 2026 the Collidoscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The boundary between text and placed glyphs.

use crate::outline::GlyphPlacement;

/// Something that turns a string into a run of placed glyphs.
///
/// Implementations shape the text, look up each glyph's outline and classification, and
/// return the placements in logical run order, with `run_index` counting up from zero.
/// Shaping usually keeps scratch buffers and caches around, hence `&mut self`; sweeps
/// create one source per worker thread.
pub trait RunSource {
    /// The error produced when a string cannot be turned into a run.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Shape `text` into a run.
    fn shape(&mut self, text: &str) -> Result<Vec<GlyphPlacement>, Self::Error>;
}

impl<S: RunSource + ?Sized> RunSource for &mut S {
    type Error = S::Error;

    fn shape(&mut self, text: &str) -> Result<Vec<GlyphPlacement>, Self::Error> {
        (**self).shape(text)
    }
}
