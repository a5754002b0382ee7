//! Continuous colormaps built from ordered color stops.
//!
//! Stop `i` of `n` sits at `i / (n - 1)`, so the first stop is always at 0.0 and
//! the last at 1.0. Each channel is rescaled from `0..=255` to `[0, 1]` and
//! interpolated linearly and independently between neighboring stops.

use crate::color::{ColorSpec, Rgb8};
use crate::error::{StyleError, StyleResult};
use crate::palette::Palettes;

/// Predefined gradients, by name. Stops are aliases or hex.
pub const GRADIENTS: [(&str, &[&str]); 4] = [
    (
        "strong",
        &[
            "strong-off-white",
            "strong-light-blue",
            "strong-blue",
            "strong-dark-blue",
        ],
    ),
    (
        "hot_cold",
        &[
            "dark-red",
            "red",
            "strong-off-white",
            "strong-light-blue",
            "strong-blue",
            "strong-dark-blue",
        ],
    ),
    (
        "rainbow",
        &[
            "dark-red",
            "red",
            "orange",
            "yellow",
            "green",
            "strong-blue",
            "strong-dark-blue",
        ],
    ),
    (
        "bw",
        &[
            "strong-off-white",
            "#D0D0D0",
            "#808080",
            "strong-dark-gray",
            "strong-off-black",
        ],
    ),
];

pub const DEFAULT_GRADIENT: &str = "strong";

/// Stops of a named gradient.
///
/// # Errors
/// [`StyleError::UnknownGradient`] when `name` is not in [`GRADIENTS`].
pub fn gradient_stops(name: &str) -> StyleResult<&'static [&'static str]> {
    GRADIENTS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, stops)| *stops)
        .ok_or_else(|| StyleError::UnknownGradient(name.to_string()))
}

pub fn gradient_names() -> impl Iterator<Item = &'static str> {
    GRADIENTS.iter().map(|(n, _)| *n)
}

/// Piecewise-linear map from `[0, 1]` to a color.
#[derive(Clone, Debug, PartialEq)]
pub struct Colormap {
    /// `(position, [r, g, b])` with channels in `[0, 1]`, positions ascending.
    stops: Vec<(f64, [f64; 3])>,
}

impl Colormap {
    /// Build from already-resolved colors, evenly spaced.
    ///
    /// # Errors
    /// [`StyleError::InvalidGradient`] for fewer than two colors.
    pub fn from_colors(colors: &[Rgb8]) -> StyleResult<Self> {
        let n = colors.len();
        if n < 2 {
            return Err(StyleError::InvalidGradient { stops: n });
        }
        let last = (n - 1) as f64;
        let stops = colors
            .iter()
            .enumerate()
            .map(|(i, c)| {
                (
                    i as f64 / last,
                    [unit(c.r), unit(c.g), unit(c.b)],
                )
            })
            .collect();
        Ok(Self { stops })
    }

    pub fn stops(&self) -> &[(f64, [f64; 3])] {
        &self.stops
    }

    /// Channel values in `[0, 1]` at `t`. `t` is clamped; NaN reads as 0.
    pub fn eval(&self, t: f64) -> [f64; 3] {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let seg = self
            .stops
            .windows(2)
            .position(|w| t <= w[1].0)
            .unwrap_or(self.stops.len() - 2);
        let (p0, c0) = self.stops[seg];
        let (p1, c1) = self.stops[seg + 1];
        let frac = if p1 > p0 { (t - p0) / (p1 - p0) } else { 0.0 };
        [
            c0[0] + frac * (c1[0] - c0[0]),
            c0[1] + frac * (c1[1] - c0[1]),
            c0[2] + frac * (c1[2] - c0[2]),
        ]
    }

    /// Color at `t`, each channel rounded to the nearest 8-bit value.
    pub fn color_at(&self, t: f64) -> Rgb8 {
        let [r, g, b] = self.eval(t);
        Rgb8::new(to_byte(r), to_byte(g), to_byte(b))
    }

    /// `n` colors evenly spaced over `[0, 1]`, endpoints included.
    pub fn sample(&self, n: usize) -> Vec<Rgb8> {
        match n {
            0 => Vec::new(),
            1 => vec![self.color_at(0.0)],
            _ => (0..n)
                .map(|i| self.color_at(i as f64 / (n - 1) as f64))
                .collect(),
        }
    }
}

fn unit(channel: u8) -> f64 {
    f64::from(channel) / 255.0
}

fn to_byte(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl Palettes {
    /// Resolve `stops` and build a fresh colormap. With `reversed` the stop order
    /// is inverted first.
    ///
    /// # Errors
    /// Any stop that fails to resolve, or fewer than two stops.
    pub fn build_colormap<I, C>(&self, stops: I, reversed: bool) -> StyleResult<Colormap>
    where
        I: IntoIterator<Item = C>,
        C: Into<ColorSpec>,
    {
        let mut specs: Vec<ColorSpec> = stops.into_iter().map(Into::into).collect();
        if reversed {
            specs.reverse();
        }
        let colors = specs
            .iter()
            .map(|s| self.resolve(s))
            .collect::<StyleResult<Vec<_>>>()?;
        Colormap::from_colors(&colors)
    }

    /// Look up a named gradient and build it.
    pub fn named_colormap(&self, name: &str, reversed: bool) -> StyleResult<Colormap> {
        self.build_colormap(gradient_stops(name)?.iter().copied(), reversed)
    }
}

/// [`Palettes::build_colormap`] against the standard palettes.
pub fn build_colormap<I, C>(stops: I, reversed: bool) -> StyleResult<Colormap>
where
    I: IntoIterator<Item = C>,
    C: Into<ColorSpec>,
{
    Palettes::standard().build_colormap(stops, reversed)
}

/// [`Palettes::named_colormap`] against the standard palettes.
pub fn named_colormap(name: &str, reversed: bool) -> StyleResult<Colormap> {
    Palettes::standard().named_colormap(name, reversed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f64; 3], b: [f64; 3]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-9)
    }

    #[test]
    fn endpoints_reproduce_first_and_last_stop() {
        for name in gradient_names() {
            let stops = gradient_stops(name).unwrap();
            let cmap = named_colormap(name, false).unwrap();
            let first = Palettes::standard().resolve(&stops[0].into()).unwrap();
            let last = Palettes::standard()
                .resolve(&stops[stops.len() - 1].into())
                .unwrap();
            assert_eq!(cmap.color_at(0.0), first, "{name}");
            assert_eq!(cmap.color_at(1.0), last, "{name}");
        }
    }

    #[test]
    fn stops_are_evenly_spaced() {
        let cmap = build_colormap(["#000000", "#808080", "#FFFFFF", "#FF0000"], false).unwrap();
        let positions: Vec<f64> = cmap.stops().iter().map(|(p, _)| *p).collect();
        assert_eq!(positions[0], 0.0);
        assert!((positions[1] - 1.0 / 3.0).abs() < 1e-12);
        assert!((positions[2] - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(positions[3], 1.0);
        // interior stops are reproduced exactly
        assert_eq!(cmap.color_at(1.0 / 3.0), Rgb8::new(0x80, 0x80, 0x80));
        assert_eq!(cmap.color_at(2.0 / 3.0), Rgb8::new(255, 255, 255));
    }

    #[test]
    fn black_to_white_is_linear_and_monotonic() {
        let cmap = build_colormap([(0i64, 0, 0), (255, 255, 255)], false).unwrap();
        let mut prev = 0u8;
        for i in 0..=100 {
            let t = f64::from(i) / 100.0;
            let c = cmap.color_at(t);
            let expected = (255.0 * t).round() as i32;
            for ch in [c.r, c.g, c.b] {
                assert!((i32::from(ch) - expected).abs() <= 1, "t={t}");
            }
            assert!(c.r >= prev);
            prev = c.r;
        }
    }

    #[test]
    fn reversed_matches_mirrored_query() {
        let stops = ["dark-red", "orange", "green", "strong-dark-blue"];
        let fwd = build_colormap(stops, false).unwrap();
        let rev = build_colormap(stops, true).unwrap();
        for i in 0..=40 {
            let t = f64::from(i) / 40.0;
            assert!(close(rev.eval(t), fwd.eval(1.0 - t)), "t={t}");
        }
    }

    #[test]
    fn out_of_range_queries_clamp() {
        let cmap = build_colormap(["#000000", "#FFFFFF"], false).unwrap();
        assert_eq!(cmap.color_at(-3.0), Rgb8::new(0, 0, 0));
        assert_eq!(cmap.color_at(7.5), Rgb8::new(255, 255, 255));
        assert_eq!(cmap.color_at(f64::NAN), Rgb8::new(0, 0, 0));
    }

    #[test]
    fn too_few_stops_is_an_error() {
        assert_eq!(
            build_colormap(Vec::<&str>::new(), false),
            Err(StyleError::InvalidGradient { stops: 0 })
        );
        assert_eq!(
            build_colormap(["red"], false),
            Err(StyleError::InvalidGradient { stops: 1 })
        );
    }

    #[test]
    fn unknown_gradient_and_bad_stop() {
        assert_eq!(
            named_colormap("sunset", false),
            Err(StyleError::UnknownGradient("sunset".into()))
        );
        assert!(matches!(
            build_colormap(["red", "not-a-color"], false),
            Err(StyleError::InvalidColor(_))
        ));
    }

    #[test]
    fn sample_includes_both_ends() {
        let cmap = named_colormap("bw", false).unwrap();
        let s = cmap.sample(5);
        assert_eq!(s.len(), 5);
        assert_eq!(s[0].to_hex(), "#F4F4F4");
        assert_eq!(s[4].to_hex(), "#2A2A2A");
        // five stops sampled five times lands on each stop
        assert_eq!(s[1].to_hex(), "#D0D0D0");
        assert_eq!(s[2].to_hex(), "#808080");
        assert!(cmap.sample(0).is_empty());
    }
}
