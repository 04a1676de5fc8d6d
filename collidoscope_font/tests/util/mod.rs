// Copyright 2026 the Collidoscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A tiny TrueType font assembled in memory.
//!
//! | glyph | char   | outline (font units)   | advance | GDEF class |
//! |-------|--------|------------------------|---------|------------|
//! | 0     |        | empty (`.notdef`)      | 500     |            |
//! | 1     | A      | 0,0 - 500,700          | 600     | base       |
//! | 2     | B      | 0,0 - 700,700          | 600     | base       |
//! | 3     | U+0301 | 100,750 - 300,900      | 0       | mark       |
//!
//! `B` hangs 100 units into whatever follows it and carries a cursive attachment with
//! entry anchor [`B_ENTRY`] and exit anchor [`B_EXIT`]. The cursive lookup is not
//! referenced by any feature, so it does not move glyphs while shaping. The font has a
//! `wght` axis from 100 to 900 (default 400) without any variation data.

#![allow(dead_code, reason = "not every test file uses every item")]

pub const A: u32 = 1;
pub const B: u32 = 2;
pub const ACUTE: u32 = 3;
pub const ADVANCE: f64 = 600.0;
pub const B_ENTRY: (i16, i16) = (0, 300);
pub const B_EXIT: (i16, i16) = (550, 350);

#[derive(Default)]
struct Writer(Vec<u8>);

impl Writer {
    fn u16(&mut self, value: u16) -> &mut Self {
        self.0.extend_from_slice(&value.to_be_bytes());
        self
    }

    fn i16(&mut self, value: i16) -> &mut Self {
        self.0.extend_from_slice(&value.to_be_bytes());
        self
    }

    fn u32(&mut self, value: u32) -> &mut Self {
        self.0.extend_from_slice(&value.to_be_bytes());
        self
    }

    fn tag(&mut self, tag: &[u8; 4]) -> &mut Self {
        self.0.extend_from_slice(tag);
        self
    }

    fn pad(&mut self) -> &mut Self {
        while self.0.len() % 4 != 0 {
            self.0.push(0);
        }
        self
    }
}

fn head() -> Vec<u8> {
    let mut w = Writer::default();
    w.u16(1).u16(0); // version
    w.u32(0x0001_0000); // fontRevision
    w.u32(0); // checksumAdjustment
    w.u32(0x5F0F_3CF5); // magicNumber
    w.u16(0); // flags
    w.u16(1000); // unitsPerEm
    w.u32(0).u32(0).u32(0).u32(0); // created, modified
    w.i16(0).i16(0).i16(700).i16(900); // bounds
    w.u16(0); // macStyle
    w.u16(8); // lowestRecPPEM
    w.i16(2); // fontDirectionHint
    w.i16(1); // indexToLocFormat: long
    w.i16(0); // glyphDataFormat
    w.0
}

fn hhea() -> Vec<u8> {
    let mut w = Writer::default();
    w.u16(1).u16(0);
    w.i16(900).i16(-200).i16(0); // ascender, descender, lineGap
    w.u16(600); // advanceWidthMax
    w.i16(0).i16(0).i16(700); // minLeftSideBearing, minRightSideBearing, xMaxExtent
    w.i16(1).i16(0).i16(0); // caret
    w.i16(0).i16(0).i16(0).i16(0); // reserved
    w.i16(0); // metricDataFormat
    w.u16(4); // numberOfHMetrics
    w.0
}

fn maxp() -> Vec<u8> {
    let mut w = Writer::default();
    w.u32(0x0001_0000);
    w.u16(4); // numGlyphs
    w.u16(4).u16(1); // maxPoints, maxContours
    w.u16(0).u16(0); // maxCompositePoints, maxCompositeContours
    w.u16(2); // maxZones
    for _ in 0..8 {
        w.u16(0);
    }
    w.0
}

fn hmtx() -> Vec<u8> {
    let mut w = Writer::default();
    w.u16(500).i16(0);
    w.u16(600).i16(0);
    w.u16(600).i16(0);
    w.u16(0).i16(100);
    w.0
}

fn cmap() -> Vec<u8> {
    // (start, end, delta) segments of a format 4 subtable.
    let segments: [(u16, u16, u16); 3] = [
        (0x41, 0x42, 1_u16.wrapping_sub(0x41)),
        (0x301, 0x301, 3_u16.wrapping_sub(0x301)),
        (0xFFFF, 0xFFFF, 1),
    ];
    let seg_count = segments.len() as u16;

    let mut w = Writer::default();
    w.u16(0).u16(1); // version, numTables
    w.u16(3).u16(1).u32(12); // Windows Unicode BMP
    w.u16(4); // format
    w.u16(16 + 8 * seg_count); // length
    w.u16(0); // language
    w.u16(seg_count * 2).u16(4).u16(1).u16(2);
    for (_, end, _) in segments {
        w.u16(end);
    }
    w.u16(0); // reservedPad
    for (start, _, _) in segments {
        w.u16(start);
    }
    for (_, _, delta) in segments {
        w.u16(delta);
    }
    for _ in segments {
        w.u16(0); // idRangeOffset
    }
    w.0
}

/// A simple glyph with one rectangular contour.
fn rectangle(x0: i16, y0: i16, x1: i16, y1: i16) -> Vec<u8> {
    let mut w = Writer::default();
    w.i16(1); // numberOfContours
    w.i16(x0).i16(y0).i16(x1).i16(y1);
    w.u16(3); // endPtsOfContours
    w.u16(0); // instructionLength
    w.0.extend_from_slice(&[1, 1, 1, 1]); // on-curve, 16-bit deltas
    w.i16(x0).i16(x1 - x0).i16(0).i16(x0 - x1);
    w.i16(y0).i16(0).i16(y1 - y0).i16(0);
    w.pad();
    w.0
}

fn glyf_and_loca() -> (Vec<u8>, Vec<u8>) {
    let glyphs = [
        vec![],
        rectangle(0, 0, 500, 700),
        rectangle(0, 0, 700, 700),
        rectangle(100, 750, 300, 900),
    ];
    let mut glyf = vec![];
    let mut loca = Writer::default();
    for glyph in glyphs {
        loca.u32(glyf.len() as u32);
        glyf.extend(glyph);
    }
    loca.u32(glyf.len() as u32);
    (glyf, loca.0)
}

fn gdef() -> Vec<u8> {
    let mut w = Writer::default();
    w.u16(1).u16(0);
    w.u16(12); // glyphClassDefOffset
    w.u16(0).u16(0).u16(0);
    // ClassDef format 2.
    w.u16(2).u16(2);
    w.u16(1).u16(2).u16(1);
    w.u16(3).u16(3).u16(3);
    w.0
}

fn gpos() -> Vec<u8> {
    let mut w = Writer::default();
    w.u16(1).u16(0);
    w.u16(10).u16(12).u16(14); // script, feature and lookup lists
    w.u16(0); // scriptCount
    w.u16(0); // featureCount
    // LookupList at 14.
    w.u16(1).u16(4);
    // Lookup at 18.
    w.u16(3).u16(0).u16(1).u16(8);
    // CursivePosFormat1 at 26.
    w.u16(1).u16(10).u16(1);
    w.u16(16).u16(22); // entry and exit anchor offsets
    w.u16(1).u16(1).u16(B as u16); // coverage
    w.u16(1).i16(B_ENTRY.0).i16(B_ENTRY.1);
    w.u16(1).i16(B_EXIT.0).i16(B_EXIT.1);
    w.0
}

fn fvar() -> Vec<u8> {
    let mut w = Writer::default();
    w.u16(1).u16(0);
    w.u16(16); // axesArrayOffset
    w.u16(2); // reserved
    w.u16(1).u16(20); // axisCount, axisSize
    w.u16(0).u16(8); // instanceCount, instanceSize
    w.tag(b"wght");
    w.u32(100 << 16).u32(400 << 16).u32(900 << 16);
    w.u16(0).u16(256); // flags, axisNameID
    w.0
}

/// The bytes of the test font.
pub fn test_font() -> Vec<u8> {
    let (glyf, loca) = glyf_and_loca();
    // Sorted by tag.
    let tables: [(&[u8; 4], Vec<u8>); 10] = [
        (b"GDEF", gdef()),
        (b"GPOS", gpos()),
        (b"cmap", cmap()),
        (b"fvar", fvar()),
        (b"glyf", glyf),
        (b"head", head()),
        (b"hhea", hhea()),
        (b"hmtx", hmtx()),
        (b"loca", loca),
        (b"maxp", maxp()),
    ];

    let mut font = Writer::default();
    font.u32(0x0001_0000);
    font.u16(tables.len() as u16).u16(128).u16(3).u16(32);

    let mut offset = 12 + 16 * tables.len();
    for (tag, data) in &tables {
        font.tag(tag).u32(0).u32(offset as u32).u32(data.len() as u32);
        offset += data.len().next_multiple_of(4);
    }
    for (_, data) in &tables {
        font.0.extend_from_slice(data);
        font.pad();
    }
    font.0
}
