// Copyright 2026 the Collidoscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Which overlaps count as collisions.

use crate::error::{Error, Result};

/// Immutable configuration for a detection pass.
///
/// Build one with [`RuleConfig::builder`]; invalid combinations are rejected there, before
/// any run is checked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RuleConfig {
    faraway: bool,
    marks: bool,
    bases: bool,
    cursive: bool,
    area: Option<f64>,
}

impl Default for RuleConfig {
    /// Test adjacent glyphs, including two adjacent bases, and nothing else.
    fn default() -> Self {
        Self {
            faraway: false,
            marks: false,
            bases: true,
            cursive: false,
            area: None,
        }
    }
}

impl RuleConfig {
    /// Start building a configuration from the [default](Self::default).
    pub fn builder() -> RuleConfigBuilder {
        RuleConfigBuilder {
            config: Self::default(),
        }
    }

    /// Whether non-adjacent base glyphs are tested.
    pub fn faraway(&self) -> bool {
        self.faraway
    }

    /// Whether pairs of mark glyphs are tested.
    pub fn marks(&self) -> bool {
        self.marks
    }

    /// Whether two adjacent base glyphs are tested.
    pub fn bases(&self) -> bool {
        self.bases
    }

    /// Whether adjacent glyphs that both carry a cursive anchor are exempt.
    pub fn cursive(&self) -> bool {
        self.cursive
    }

    /// The fraction of the smaller outline's area an adjacent overlap may cover
    /// before it is reported.
    pub fn area(&self) -> Option<f64> {
        self.area
    }

    /// Whether any pair beyond direct neighbours needs to be visited.
    pub(crate) fn tests_distant_pairs(&self) -> bool {
        self.faraway || self.marks
    }
}

/// A builder for [`RuleConfig`].
#[derive(Clone, Debug)]
pub struct RuleConfigBuilder {
    config: RuleConfig,
}

impl RuleConfigBuilder {
    /// Test non-adjacent base glyphs for overlap.
    pub fn faraway(mut self, faraway: bool) -> Self {
        self.config.faraway = faraway;
        self
    }

    /// Test all pairs of mark glyphs for overlap.
    pub fn marks(mut self, marks: bool) -> Self {
        self.config.marks = marks;
        self
    }

    /// Test two adjacent base glyphs for overlap.
    pub fn bases(mut self, bases: bool) -> Self {
        self.config.bases = bases;
        self
    }

    /// Exempt adjacent glyphs that both carry a cursive anchor.
    pub fn cursive(mut self, cursive: bool) -> Self {
        self.config.cursive = cursive;
        self
    }

    /// Tolerate adjacent overlaps up to this fraction of the smaller outline's area.
    pub fn area(mut self, area: impl Into<Option<f64>>) -> Self {
        self.config.area = area.into();
        self
    }

    /// Validate and finish the configuration.
    pub fn build(self) -> Result<RuleConfig> {
        let config = self.config;
        if let Some(area) = config.area {
            if !(0.0..=1.0).contains(&area) {
                return Err(Error::AreaOutOfRange(area));
            }
        }
        let any_rule = config.faraway
            || config.marks
            || config.bases
            || config.cursive
            || config.area.is_some();
        if !any_rule {
            return Err(Error::NoRulesEnabled);
        }
        Ok(config)
    }
}
