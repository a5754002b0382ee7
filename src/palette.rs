//! Fixed alias → color tables.
//!
//! Two palettes sit side by side: **main** (the presentation colors) and
//! **supplementary** (extra accents). They overlap on some aliases; lookups try
//! main first. Both are immutable once built.

use std::sync::LazyLock;

use crate::color::Rgb8;
use crate::error::StyleResult;

/// Main presentation palette, in cycle order.
pub const MAIN: [(&str, &str); 6] = [
    ("strong-blue", "#4C6FE7"),
    ("strong-dark-gray", "#4F4F4F"),
    ("strong-light-blue", "#B5C3FF"),
    ("strong-off-black", "#2a2a2a"),
    ("strong-dark-blue", "#3958C4"),
    ("strong-off-white", "#F4F4F4"),
];

/// Supplementary accents, in cycle order.
pub const SUPPLEMENTARY: [(&str, &str); 10] = [
    ("strong-blue", "#4C6FE7"),
    ("red", "#DE364F"),
    ("orange", "#FFC65F"),
    ("green", "#1FC198"),
    ("purple", "#D065D3"),
    ("yellow", "#F9F871"),
    ("dark-orange", "#D24B00"),
    ("dark-green", "#008A65"),
    ("light-purple", "#A5A7DD"),
    ("dark-red", "#9F0023"),
];

static STANDARD: LazyLock<Palettes> = LazyLock::new(|| {
    Palettes::new(
        Palette::new("main", MAIN),
        Palette::new("supplementary", SUPPLEMENTARY),
    )
});

/// An ordered alias → value mapping. Values are hex or further aliases.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    name: String,
    entries: Vec<(String, String)>,
}

impl Palette {
    pub fn new<I, K, V>(name: &str, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            name: name.to_string(),
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stored value for `alias`, unresolved.
    pub fn get(&self, alias: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == alias)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.get(alias).is_some()
    }

    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The main/supplementary pair the resolver reads from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palettes {
    pub main: Palette,
    pub supplementary: Palette,
}

impl Palettes {
    pub fn new(main: Palette, supplementary: Palette) -> Self {
        Self {
            main,
            supplementary,
        }
    }

    /// The built-in palettes, constructed once per process.
    pub fn standard() -> &'static Palettes {
        &STANDARD
    }

    /// Resolved colors of one palette, in its declared order.
    ///
    /// # Errors
    /// Fails if an entry does not resolve (bad hex, dangling alias, cycle).
    pub fn colors(&self, palette: &Palette) -> StyleResult<Vec<Rgb8>> {
        palette
            .entries
            .iter()
            .map(|(_, v)| self.resolve(&v.into()))
            .collect()
    }

    /// Series colors for charts: the main palette, or the supplementary one.
    pub fn series_colors(&self, supplementary: bool) -> StyleResult<Vec<Rgb8>> {
        if supplementary {
            self.colors(&self.supplementary)
        } else {
            self.colors(&self.main)
        }
    }
}

impl Default for Palettes {
    fn default() -> Self {
        Palettes::standard().clone()
    }
}
