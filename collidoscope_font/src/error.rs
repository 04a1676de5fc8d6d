// Copyright 2026 the Collidoscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use skrifa::outline::DrawError;
use skrifa::raw::ReadError;
use thiserror::Error;

/// Errors that can occur while loading a font or shaping text with it.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FontError {
    /// The font file could not be read.
    #[error("cannot read font file: {0}")]
    Io(#[from] std::io::Error),
    /// The font data is malformed.
    #[error("malformed font: {0}")]
    Read(#[from] ReadError),
    /// The shaper rejected the font data.
    #[error("cannot shape with this font: {0}")]
    Shaper(String),
    /// A variation setting names an axis the font does not have.
    #[error("font has no variation axis '{0}'")]
    UnknownAxis(String),
    /// A glyph outline could not be drawn.
    #[error("cannot draw glyph {glyph_id}: {reason}")]
    Outline {
        /// The glyph that failed.
        glyph_id: u32,
        /// What went wrong.
        reason: DrawError,
    },
}

/// A specialized `Result` for font operations.
pub type Result<T, E = FontError> = core::result::Result<T, E>;
