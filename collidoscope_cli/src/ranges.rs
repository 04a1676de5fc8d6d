// Copyright 2026 the Collidoscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Code point ranges and the strings they span.

use core::ops::RangeInclusive;
use thiserror::Error;

/// A malformed code point range on the command line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// Not a hexadecimal number.
    #[error("'{0}' is not a hexadecimal code point")]
    NotHex(String),
    /// The end of a span comes before its start.
    #[error("range {0:04X}-{1:04X} is backwards")]
    Backwards(u32, u32),
    /// Beyond the Unicode code space.
    #[error("{0:X} is beyond the last code point")]
    OutOfRange(u32),
}

fn parse_code_point(text: &str) -> Result<u32, RangeError> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("U+")
        .or_else(|| trimmed.strip_prefix("u+"))
        .unwrap_or(trimmed);
    let value = u32::from_str_radix(digits, 16).map_err(|_| RangeError::NotHex(text.to_owned()))?;
    if value > u32::from(char::MAX) {
        return Err(RangeError::OutOfRange(value));
    }
    Ok(value)
}

/// Parse a single code point (`0627`, `U+0627`) or a span of them (`0627-064A`).
pub fn parse_range(text: &str) -> Result<RangeInclusive<u32>, RangeError> {
    match text.split_once('-') {
        Some((start, end)) => {
            let (start, end) = (parse_code_point(start)?, parse_code_point(end)?);
            if end < start {
                return Err(RangeError::Backwards(start, end));
            }
            Ok(start..=end)
        }
        None => {
            let value = parse_code_point(text)?;
            Ok(value..=value)
        }
    }
}

/// The characters covered by a set of ranges, sorted and without duplicates.
///
/// Surrogates are not characters and are skipped.
pub fn characters(ranges: &[RangeInclusive<u32>]) -> Vec<char> {
    let mut chars: Vec<char> = ranges
        .iter()
        .flat_map(|range| range.clone().filter_map(char::from_u32))
        .collect();
    chars.sort_unstable();
    chars.dedup();
    chars
}

/// Every string of one up to `max_len` characters over an alphabet, shortest first.
///
/// Strings of equal length come in odometer order: the last character turns fastest.
#[derive(Clone, Debug)]
pub struct Strings {
    alphabet: Vec<char>,
    max_len: usize,
    digits: Vec<usize>,
}

impl Strings {
    /// Enumerate strings over `alphabet`.
    pub fn new(alphabet: Vec<char>, max_len: usize) -> Self {
        let digits = if alphabet.is_empty() || max_len == 0 {
            vec![]
        } else {
            vec![0]
        };
        Self {
            alphabet,
            max_len,
            digits,
        }
    }

    /// How many strings there are in total, if that fits in a `u128`.
    pub fn total(alphabet_len: usize, max_len: usize) -> Option<u128> {
        let base = u128::try_from(alphabet_len).ok()?;
        let mut per_length = 1_u128;
        let mut total = 0_u128;
        for _ in 0..max_len {
            per_length = per_length.checked_mul(base)?;
            total = total.checked_add(per_length)?;
        }
        Some(total)
    }
}

impl Iterator for Strings {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.digits.is_empty() {
            return None;
        }
        let text = self.digits.iter().map(|&d| self.alphabet[d]).collect();

        // Turn the odometer.
        let base = self.alphabet.len();
        let mut position = self.digits.len();
        loop {
            if position == 0 {
                let len = self.digits.len() + 1;
                self.digits.clear();
                if len <= self.max_len {
                    self.digits.resize(len, 0);
                }
                break;
            }
            position -= 1;
            self.digits[position] += 1;
            if self.digits[position] < base {
                break;
            }
            self.digits[position] = 0;
        }

        Some(text)
    }
}
