//! Color normalization: hex strings, RGB triples and palette aliases.
//!
//! Every input form resolves to the same canonical [`Rgb8`]. Resolution order:
//! 1. literal hex (`#RRGGBB`, case-insensitive)
//! 2. literal RGB triple (channels clamped to `0..=255`)
//! 3. alias in the main palette
//! 4. alias in the supplementary palette
//!
//! A string that is both valid hex and an alias name is treated as hex.

use std::fmt;
use std::str::FromStr;

use crate::error::{StyleError, StyleResult};
use crate::palette::Palettes;

/// Longest alias chain followed before giving up.
pub const MAX_ALIAS_DEPTH: usize = 16;

/// A resolved 24-bit color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from arbitrary integers, saturating each channel into `0..=255`.
    pub fn clamped(r: i64, g: i64, b: i64) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
        }
    }

    /// Parse `#RRGGBB`. Returns `None` for anything that is not exactly `#` + 6 hex digits.
    pub fn parse_hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#')?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// Uppercase `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub fn as_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

fn clamp_channel(v: i64) -> u8 {
    v.clamp(0, 255) as u8
}

pub fn is_hex_color(s: &str) -> bool {
    Rgb8::parse_hex(s).is_some()
}

/// Any accepted color input, before resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColorSpec {
    /// Hex string or palette alias.
    Text(String),
    /// Raw channels; out-of-range values are clamped on resolution.
    Triple([i64; 3]),
}

impl fmt::Display for ColorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorSpec::Text(s) => f.write_str(s),
            ColorSpec::Triple([r, g, b]) => write!(f, "({r}, {g}, {b})"),
        }
    }
}

impl From<&str> for ColorSpec {
    fn from(s: &str) -> Self {
        ColorSpec::Text(s.to_string())
    }
}

impl From<&String> for ColorSpec {
    fn from(s: &String) -> Self {
        ColorSpec::Text(s.clone())
    }
}

impl From<String> for ColorSpec {
    fn from(s: String) -> Self {
        ColorSpec::Text(s)
    }
}

impl From<[i64; 3]> for ColorSpec {
    fn from(c: [i64; 3]) -> Self {
        ColorSpec::Triple(c)
    }
}

impl From<(i64, i64, i64)> for ColorSpec {
    fn from((r, g, b): (i64, i64, i64)) -> Self {
        ColorSpec::Triple([r, g, b])
    }
}

impl From<Rgb8> for ColorSpec {
    fn from(c: Rgb8) -> Self {
        ColorSpec::Triple([c.r.into(), c.g.into(), c.b.into()])
    }
}

impl From<&ColorSpec> for ColorSpec {
    fn from(c: &ColorSpec) -> Self {
        c.clone()
    }
}

/// Parses `r,g,b` (three integers) as a triple, anything else as text.
impl FromStr for ColorSpec {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parts: Vec<&str> = s
            .trim_start_matches('(')
            .trim_end_matches(')')
            .split(',')
            .map(str::trim)
            .collect();
        if parts.len() == 3 {
            let parsed: Option<Vec<i64>> = parts.iter().map(|p| p.parse::<i64>().ok()).collect();
            if let Some(v) = parsed {
                return Ok(ColorSpec::Triple([v[0], v[1], v[2]]));
            }
        }
        Ok(ColorSpec::Text(s.to_string()))
    }
}

impl Palettes {
    /// Resolve any color input to its canonical value.
    pub fn resolve(&self, color: &ColorSpec) -> StyleResult<Rgb8> {
        match color {
            ColorSpec::Triple([r, g, b]) => Ok(Rgb8::clamped(*r, *g, *b)),
            ColorSpec::Text(text) => self.resolve_text(text),
        }
    }

    /// Normalize to uppercase `#RRGGBB`.
    pub fn to_hex(&self, color: impl Into<ColorSpec>) -> StyleResult<String> {
        Ok(self.resolve(&color.into())?.to_hex())
    }

    /// Normalize to an `(r, g, b)` triple.
    pub fn to_rgb(&self, color: impl Into<ColorSpec>) -> StyleResult<(u8, u8, u8)> {
        Ok(self.resolve(&color.into())?.as_tuple())
    }

    fn resolve_text<'a>(&'a self, text: &'a str) -> StyleResult<Rgb8> {
        let mut current = text;
        let mut visited: Vec<&str> = Vec::new();
        loop {
            if let Some(rgb) = Rgb8::parse_hex(current) {
                return Ok(rgb);
            }
            let next = self
                .main
                .get(current)
                .or_else(|| self.supplementary.get(current));
            let Some(next) = next else {
                return Err(StyleError::InvalidColor(current.to_string()));
            };
            if visited.contains(&current) || visited.len() >= MAX_ALIAS_DEPTH {
                return Err(StyleError::AliasCycle(text.to_string()));
            }
            visited.push(current);
            current = next;
        }
    }
}

/// [`Palettes::to_hex`] against the standard palettes.
pub fn to_hex(color: impl Into<ColorSpec>) -> StyleResult<String> {
    Palettes::standard().to_hex(color)
}

/// [`Palettes::to_rgb`] against the standard palettes.
pub fn to_rgb(color: impl Into<ColorSpec>) -> StyleResult<(u8, u8, u8)> {
    Palettes::standard().to_rgb(color)
}
