// Copyright 2026 the Collidoscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turning strings into runs of placed glyphs.

use crate::error::{FontError, Result};
use crate::font::FontData;
use collidoscope::kurbo::BezPath;
use collidoscope::source::RunSource;
use collidoscope::{GlyphPlacement, Position};
use harfrust::UnicodeBuffer;
use log::trace;
use skrifa::instance::{NormalizedCoord, Size};
use skrifa::outline::{DrawSettings, OutlinePen};
use skrifa::{GlyphId, MetadataProvider, OutlineGlyphCollection};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Shapes strings with one [`FontData`].
///
/// A context keeps a shaping buffer and a cache of glyph outlines between calls, so it
/// is meant to be reused for many strings. It is not shared between threads; create one
/// per worker instead.
pub struct ShapingContext<'a> {
    font: &'a FontData,
    hb_font: harfrust::FontRef<'a>,
    outlines: OutlineGlyphCollection<'a>,
    buffer: Option<UnicodeBuffer>,
    cache: HashMap<u32, BezPath>,
    cursive_anchors: bool,
}

impl core::fmt::Debug for ShapingContext<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ShapingContext")
            .field("font", &self.font)
            .field("cached_outlines", &self.cache.len())
            .field("cursive_anchors", &self.cursive_anchors)
            .finish_non_exhaustive()
    }
}

impl<'a> ShapingContext<'a> {
    /// Create a context shaping with `font`.
    pub fn new(font: &'a FontData) -> Result<Self> {
        Ok(Self {
            font,
            hb_font: font.harfrust()?,
            outlines: font.skrifa()?.outline_glyphs(),
            buffer: None,
            cache: HashMap::new(),
            cursive_anchors: false,
        })
    }

    /// Attach the font's cursive anchors to the placed glyphs.
    ///
    /// Anchors only matter for the cursive exemption, so they are left off by default.
    pub fn with_cursive_anchors(mut self, cursive_anchors: bool) -> Self {
        self.cursive_anchors = cursive_anchors;
        self
    }

    /// The font this context shapes with.
    pub fn font(&self) -> &'a FontData {
        self.font
    }

    /// Shape `text` into a run, in font units.
    ///
    /// Glyphs come out in the order of the shaped buffer, which is also the order that
    /// defines adjacency.
    pub fn shape(&mut self, text: &str) -> Result<Vec<GlyphPlacement>> {
        let font = self.font;
        let mut buffer = self.buffer.take().unwrap_or_else(UnicodeBuffer::new);
        buffer.push_str(text);
        buffer.guess_segment_properties();

        let shaper = font
            .shaper_data()
            .shaper(&self.hb_font)
            .instance(font.instance())
            .point_size(None)
            .build();
        let glyphs = shaper.shape(buffer, &[]);

        let mut run = Vec::with_capacity(glyphs.len());
        let (mut x, mut y) = (0.0, 0.0);
        for (run_index, (info, pos)) in glyphs
            .glyph_infos()
            .iter()
            .zip(glyphs.glyph_positions())
            .enumerate()
        {
            let position = Position::new(
                x + f64::from(pos.x_offset),
                y + f64::from(pos.y_offset),
                f64::from(pos.x_advance),
                f64::from(pos.y_advance),
            );
            let outline =
                cached_outline(&mut self.cache, &self.outlines, font.coords(), info.glyph_id)?;

            let mut glyph = GlyphPlacement::new(run_index, info.glyph_id, outline, position)
                .with_category(font.category(info.glyph_id, pos.x_advance))
                .with_cluster(info.cluster);
            if self.cursive_anchors {
                if let Some(anchor) = font.cursive_anchor(info.glyph_id) {
                    glyph = glyph.with_cursive_anchor(anchor);
                }
            }
            run.push(glyph);

            x += f64::from(pos.x_advance);
            y += f64::from(pos.y_advance);
        }
        trace!("shaped {text:?} into {} glyphs", run.len());

        self.buffer = Some(glyphs.clear());
        Ok(run)
    }
}

impl RunSource for ShapingContext<'_> {
    type Error = FontError;

    fn shape(&mut self, text: &str) -> Result<Vec<GlyphPlacement>> {
        Self::shape(self, text)
    }
}

fn cached_outline<'c>(
    cache: &'c mut HashMap<u32, BezPath>,
    outlines: &OutlineGlyphCollection<'_>,
    coords: &[NormalizedCoord],
    glyph_id: u32,
) -> Result<&'c BezPath> {
    match cache.entry(glyph_id) {
        Entry::Occupied(entry) => Ok(entry.into_mut()),
        Entry::Vacant(entry) => {
            let mut path = OutlinePath(BezPath::new());
            // Glyphs without an outline, like spaces, stay empty.
            if let Some(outline) = outlines.get(GlyphId::new(glyph_id)) {
                let settings = DrawSettings::unhinted(Size::unscaled(), coords);
                outline
                    .draw(settings, &mut path)
                    .map_err(|reason| FontError::Outline { glyph_id, reason })?;
            }
            Ok(entry.insert(path.0))
        }
    }
}

/// Collects a drawn outline, in font units with y pointing up.
struct OutlinePath(BezPath);

impl OutlinePen for OutlinePath {
    #[inline]
    fn move_to(&mut self, x: f32, y: f32) {
        self.0.move_to((x, y));
    }

    #[inline]
    fn line_to(&mut self, x: f32, y: f32) {
        self.0.line_to((x, y));
    }

    #[inline]
    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.0.curve_to((cx0, cy0), (cx1, cy1), (x, y));
    }

    #[inline]
    fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        self.0.quad_to((cx, cy), (x, y));
    }

    #[inline]
    fn close(&mut self) {
        self.0.close_path();
    }
}
