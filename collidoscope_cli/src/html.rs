// Copyright 2026 the Collidoscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An HTML page showing every colliding string.

use crate::sweep::Finding;
use anyhow::{Context, Result};
use collidoscope::{CollisionEngine, CollisionKind, GlyphPlacement};
use core::fmt::Write as _;
use std::path::Path;

const STYLE: &str = "body { font-family: sans-serif; }
figure { display: inline-block; margin: 1em; }
svg { height: 10em; }";

/// Write the report for `findings` to `path`.
pub fn write_report(path: &Path, engine: &CollisionEngine, findings: &[Finding]) -> Result<()> {
    std::fs::write(path, report(engine, findings))
        .with_context(|| format!("cannot write report to {}", path.display()))
}

/// The report for `findings` as a standalone HTML page.
pub fn report(engine: &CollisionEngine, findings: &[Finding]) -> String {
    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(page, "<title>Collisions</title>\n<style>\n{STYLE}\n</style>");
    page.push_str("</head>\n<body>\n");
    let _ = writeln!(page, "<h1>{} colliding strings</h1>", findings.len());

    for finding in findings {
        let code_points: Vec<_> = finding
            .text
            .chars()
            .map(|ch| format!("U+{:04X}", u32::from(ch)))
            .collect();
        page.push_str("<figure>\n");
        let _ = writeln!(
            page,
            "<figcaption>{} ({})<br>{}</figcaption>",
            escape(&finding.text),
            code_points.join(" "),
            escape(&describe(finding)),
        );
        let _ = writeln!(page, "{}", engine.render(&finding.run, &finding.collisions));
        page.push_str("</figure>\n");
    }

    page.push_str("</body>\n</html>\n");
    page
}

/// A short description of the collisions of a finding, like `0 (a) / 1 (b) adjacent`.
///
/// Glyphs are named by their position in the run and the character they were shaped from.
pub fn describe(finding: &Finding) -> String {
    let glyph = |index: usize| {
        let source = finding
            .run
            .get(index)
            .and_then(|glyph| source_char(&finding.text, glyph))
            .unwrap_or('?');
        format!("{index} ({source})")
    };
    let parts: Vec<_> = finding
        .collisions
        .iter()
        .map(|collision| {
            let kind = match collision.kind {
                CollisionKind::Adjacent => "adjacent",
                CollisionKind::NonAdjacent => "non-adjacent",
                CollisionKind::MarkMark => "mark-mark",
            };
            let pair = format!("{} / {}", glyph(collision.first), glyph(collision.second));
            match collision.overlap_area {
                Some(area) => format!("{pair} {kind} ({area:.0} units²)"),
                None => format!("{pair} {kind}"),
            }
        })
        .collect();
    parts.join(", ")
}

/// The character a glyph was shaped from, found through its cluster.
fn source_char(text: &str, glyph: &GlyphPlacement) -> Option<char> {
    let start = usize::try_from(glyph.cluster).ok()?;
    text.get(start..)?.chars().next()
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
