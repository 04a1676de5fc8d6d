// Copyright 2026 the Collidoscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Brute-force search for strings whose glyphs collide in a font.
//!
//! ```text
//! collidoscope Nunito.ttf -r 0061-007A -r 0300-036F -l 3 --marks -o report.html
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![forbid(unsafe_code)]

mod html;
mod ranges;
mod sweep;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use collidoscope::{CollisionEngine, RuleConfig};
use collidoscope_font::{FontData, ShapingContext};
use log::info;
use ranges::{characters, parse_range, Strings};
use std::num::NonZeroUsize;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;
use sweep::{sweep, SweepOptions};

#[derive(Parser, Debug)]
#[command(about, version)]
struct Args {
    /// The font file to check.
    font: PathBuf,
    /// Index of the font within a font collection.
    #[arg(long, default_value_t = 0)]
    index: u32,
    /// Code points to combine, like `0627`, `U+0627` or `0627-064A`.
    #[arg(short, long = "range", value_parser = parse_range, required = true)]
    ranges: Vec<RangeInclusive<u32>>,
    /// Longest string to try.
    #[arg(short = 'l', long, default_value_t = 2)]
    max_length: usize,
    /// Check base glyphs that are not next to each other.
    #[arg(long)]
    faraway: bool,
    /// Check marks against each other.
    #[arg(long)]
    marks: bool,
    /// Do not check adjacent base glyphs.
    #[arg(long)]
    no_bases: bool,
    /// Allow cursively attached glyphs to touch.
    #[arg(long)]
    cursive: bool,
    /// Allow adjacent glyphs to overlap by up to this fraction of the smaller glyph.
    #[arg(long)]
    area: Option<f64>,
    /// A variable font location, like `wght=700`.
    #[arg(long, value_parser = parse_location)]
    location: Vec<([u8; 4], f32)>,
    /// Worker threads, one per core by default.
    #[arg(short = 'j', long)]
    threads: Option<NonZeroUsize>,
    /// Stop after this many colliding strings.
    #[arg(long)]
    max_collisions: Option<usize>,
    /// Stop after this many seconds.
    #[arg(long, value_parser = parse_seconds)]
    time_limit: Option<Duration>,
    /// Report every collision of a colliding string.
    #[arg(long)]
    exhaustive: bool,
    /// Leave out code points the font has no glyph for.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    skip_missing: bool,
    /// Write an HTML report of the colliding strings.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Args {
    fn rules(&self) -> Result<RuleConfig> {
        RuleConfig::builder()
            .faraway(self.faraway)
            .marks(self.marks)
            .bases(!self.no_bases)
            .cursive(self.cursive)
            .area(self.area)
            .build()
            .context("invalid rules")
    }
}

fn parse_location(text: &str) -> Result<([u8; 4], f32), String> {
    let (tag, value) = text
        .split_once('=')
        .ok_or_else(|| format!("expected TAG=VALUE, got '{text}'"))?;
    let tag: [u8; 4] = tag
        .as_bytes()
        .try_into()
        .map_err(|_| format!("axis tag '{tag}' is not four bytes long"))?;
    let value = value
        .trim()
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    Ok((tag, value))
}

fn parse_seconds(text: &str) -> Result<Duration, String> {
    let seconds: f64 = text
        .parse()
        .map_err(|_| format!("'{text}' is not a number of seconds"))?;
    Duration::try_from_secs_f64(seconds).map_err(|err| err.to_string())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = args.rules()?;

    let mut font = FontData::open(&args.font, args.index)
        .with_context(|| format!("cannot load {}", args.font.display()))?;
    if !args.location.is_empty() {
        font = font
            .with_location(args.location.iter().copied())
            .context("invalid location")?;
    }

    let mut alphabet = characters(&args.ranges);
    if args.skip_missing {
        let before = alphabet.len();
        alphabet.retain(|&ch| font.covers(ch));
        info!("{} of {before} code points are in the font", alphabet.len());
    }
    if alphabet.is_empty() {
        bail!("no code points to check");
    }
    match Strings::total(alphabet.len(), args.max_length) {
        Some(total) => info!("{total} strings to check"),
        None => info!("more strings to check than can be counted"),
    }

    let threads = args
        .threads
        .or_else(|| std::thread::available_parallelism().ok())
        .map_or(1, NonZeroUsize::get);
    let options = SweepOptions {
        threads,
        max_collisions: args.max_collisions,
        time_limit: args.time_limit,
        exhaustive: args.exhaustive,
    };
    let engine = CollisionEngine::new(config);
    let strings = Strings::new(alphabet, args.max_length);
    let summary = sweep(strings, &engine, &options, || {
        ShapingContext::new(&font).map(|context| context.with_cursive_anchors(config.cursive()))
    })?;

    for finding in &summary.findings {
        println!("{}: {}", finding.text, html::describe(finding));
    }
    let stopped = match summary.stopped {
        Some(reason) => format!(", stopped early ({reason:?})"),
        None => String::new(),
    };
    println!(
        "{} strings checked, {} collide, {} failed{stopped}",
        summary.checked,
        summary.findings.len(),
        summary.failed
    );

    if let Some(output) = &args.output {
        html::write_report(output, &engine, &summary.findings)?;
        info!("wrote {}", output.display());
    }
    Ok(())
}
