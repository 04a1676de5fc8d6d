// Copyright 2026 the Collidoscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font data parsed once and shared by all shaping contexts.

use crate::error::{FontError, Result};
use collidoscope::kurbo::Point;
use collidoscope::peniko::{Blob, Font};
use collidoscope::GlyphCategory;
use harfrust::{ShaperData, ShaperInstance, Variation};
use log::debug;
use skrifa::instance::NormalizedCoord;
use skrifa::raw::tables::gpos::PositionSubtables;
use skrifa::raw::{ReadError, TableProvider};
use skrifa::{MetadataProvider, Tag};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

/// The GDEF glyph class of combining marks.
const MARK_CLASS: u16 = 3;

/// A font prepared for collision checks.
///
/// Construction reads the glyph classes and cursive anchors; afterwards, `FontData` is
/// immutable and can be shared between threads, each of which shapes text through its
/// own [`ShapingContext`](crate::ShapingContext).
pub struct FontData {
    font: Font,
    shaper_data: ShaperData,
    instance: Option<ShaperInstance>,
    coords: Vec<NormalizedCoord>,
    /// Glyphs of the GDEF mark class, or `None` if the font does not classify glyphs.
    marks: Option<HashSet<u32>>,
    anchors: HashMap<u32, Point>,
}

impl core::fmt::Debug for FontData {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FontData")
            .field("index", &self.font.index)
            .field("coords", &self.coords)
            .field("marks", &self.marks.as_ref().map(HashSet::len))
            .field("anchors", &self.anchors.len())
            .finish_non_exhaustive()
    }
}

impl FontData {
    /// Load the font at `index` of the font file or collection at `path`.
    pub fn open(path: impl AsRef<Path>, index: u32) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(data, index)
    }

    /// Load the font at `index` of a font file or collection.
    pub fn from_bytes(data: Vec<u8>, index: u32) -> Result<Self> {
        Self::new(Font::new(Blob::new(Arc::new(data)), index))
    }

    /// Prepare a font.
    pub fn new(font: Font) -> Result<Self> {
        let font_ref = skrifa::FontRef::from_index(font.data.as_ref(), font.index)?;
        let marks = mark_glyphs(&font_ref)?;
        let anchors = cursive_anchors(&font_ref)?;
        debug!(
            "font has {} marks and {} cursive anchors",
            marks.as_ref().map_or(0, HashSet::len),
            anchors.len()
        );

        let hb_font = harfrust::FontRef::from_index(font.data.as_ref(), font.index)
            .map_err(|err| FontError::Shaper(err.to_string()))?;
        let shaper_data = ShaperData::new(&hb_font);

        Ok(Self {
            font,
            shaper_data,
            instance: None,
            coords: vec![],
            marks,
            anchors,
        })
    }

    /// Select a variable font instance, for both shaping and outlines.
    ///
    /// Settings are pairs of an axis tag and a user-space value, like `(*b"wght", 700.0)`.
    /// Axes that are not mentioned keep their default value.
    pub fn with_location(
        mut self,
        settings: impl IntoIterator<Item = ([u8; 4], f32)>,
    ) -> Result<Self> {
        let settings: Vec<_> = settings.into_iter().collect();

        let font_ref = self.skrifa()?;
        let axes = font_ref.axes();
        for (tag, _) in &settings {
            let tag = Tag::new(tag);
            if !axes.iter().any(|axis| axis.tag() == tag) {
                return Err(FontError::UnknownAxis(tag.to_string()));
            }
        }
        let location = axes.location(
            settings
                .iter()
                .map(|(tag, value)| (Tag::new(tag), *value)),
        );
        let coords = location.coords().to_vec();

        let hb_font = self.harfrust()?;
        let instance = ShaperInstance::from_variations(
            &hb_font,
            settings.iter().map(|(tag, value)| Variation {
                tag: harfrust::Tag::new(tag),
                value: *value,
            }),
        );

        self.coords = coords;
        self.instance = Some(instance);
        Ok(self)
    }

    /// The font.
    pub fn font(&self) -> &Font {
        &self.font
    }

    /// Normalized variation coordinates of the selected instance.
    pub fn coords(&self) -> &[NormalizedCoord] {
        &self.coords
    }

    /// Whether the font maps `ch` to a glyph.
    pub fn covers(&self, ch: char) -> bool {
        self.skrifa()
            .map(|font_ref| font_ref.charmap().map(ch).is_some())
            .unwrap_or(false)
    }

    /// The category of a glyph.
    ///
    /// Fonts without GDEF glyph classes have their zero-advance glyphs treated as marks.
    pub fn category(&self, glyph_id: u32, x_advance: i32) -> GlyphCategory {
        classify(self.marks.as_ref(), glyph_id, x_advance)
    }

    /// The cursive attachment point of a glyph, in font units.
    pub fn cursive_anchor(&self, glyph_id: u32) -> Option<Point> {
        self.anchors.get(&glyph_id).copied()
    }

    pub(crate) fn skrifa(&self) -> Result<skrifa::FontRef<'_>> {
        Ok(skrifa::FontRef::from_index(
            self.font.data.as_ref(),
            self.font.index,
        )?)
    }

    pub(crate) fn harfrust(&self) -> Result<harfrust::FontRef<'_>> {
        harfrust::FontRef::from_index(self.font.data.as_ref(), self.font.index)
            .map_err(|err| FontError::Shaper(err.to_string()))
    }

    pub(crate) fn shaper_data(&self) -> &ShaperData {
        &self.shaper_data
    }

    pub(crate) fn instance(&self) -> Option<&ShaperInstance> {
        self.instance.as_ref()
    }
}

fn classify(marks: Option<&HashSet<u32>>, glyph_id: u32, x_advance: i32) -> GlyphCategory {
    let is_mark = match marks {
        Some(marks) => marks.contains(&glyph_id),
        None => x_advance == 0,
    };
    if is_mark {
        GlyphCategory::Mark
    } else {
        GlyphCategory::Base
    }
}

fn mark_glyphs(font: &skrifa::FontRef<'_>) -> Result<Option<HashSet<u32>>, ReadError> {
    let gdef = match font.gdef() {
        Ok(gdef) => gdef,
        Err(ReadError::TableIsMissing(_)) => return Ok(None),
        Err(err) => return Err(err),
    };
    let Some(class_def) = gdef.glyph_class_def().transpose()? else {
        return Ok(None);
    };
    Ok(Some(
        class_def
            .iter()
            .filter(|(_, class)| *class == MARK_CLASS)
            .map(|(glyph, _)| u32::from(glyph.to_u16()))
            .collect(),
    ))
}

/// The cursive attachment anchors of all glyphs, preferring exit over entry anchors.
fn cursive_anchors(font: &skrifa::FontRef<'_>) -> Result<HashMap<u32, Point>, ReadError> {
    let mut anchors = HashMap::new();
    let gpos = match font.gpos() {
        Ok(gpos) => gpos,
        Err(ReadError::TableIsMissing(_)) => return Ok(anchors),
        Err(err) => return Err(err),
    };

    for lookup in gpos.lookup_list()?.lookups().iter() {
        let PositionSubtables::Cursive(subtables) = lookup?.subtables()? else {
            continue;
        };
        for subtable in subtables.iter() {
            let subtable = subtable?;
            let data = subtable.offset_data();
            let coverage = subtable.coverage()?;
            for (glyph, record) in coverage.iter().zip(subtable.entry_exit_record()) {
                let anchor = record
                    .exit_anchor(data)
                    .or_else(|| record.entry_anchor(data))
                    .transpose()?;
                if let Some(anchor) = anchor {
                    let point = Point::new(
                        f64::from(anchor.x_coordinate()),
                        f64::from(anchor.y_coordinate()),
                    );
                    anchors.entry(u32::from(glyph.to_u16())).or_insert(point);
                }
            }
        }
    }
    Ok(anchors)
}
