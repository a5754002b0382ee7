//! customplot
//!
//! Color and gradient resolution for a small plotting layer, plus a styled
//! chart facade over plotters. Pairs with the `customplot` CLI.
//!
//! ### Features
//! - Resolve hex strings, RGB triples and palette aliases to one canonical color
//! - Build continuous colormaps from color stops or named gradients
//! - Cycle series colors, dash patterns and markers (color-blind friendly mode)
//! - Render line, scatter, heatmap, surface, pie and density charts to SVG/PNG
//!
//! ### Example
//! ```no_run
//! use customplot::{Customplot, Series, StyleConfig, to_hex, to_rgb, named_colormap};
//!
//! assert_eq!(to_hex("strong-blue")?, "#4C6FE7");
//! assert_eq!(to_rgb((300i64, -10, 128))?, (255, 0, 128));
//!
//! let cmap = named_colormap("hot_cold", false)?;
//! let mid = cmap.color_at(0.5);
//! println!("{mid}");
//!
//! let plot = Customplot::new(StyleConfig::default())?;
//! let line = Series::from_xy(&[0.0, 1.0, 2.0], &[1.0, 4.0, 9.0]).with_label("squares");
//! plot.plot(&[line], &customplot::ChartOptions::titled("Squares").out("squares.svg"))?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod color;
pub mod config;
pub mod error;
pub mod gradient;
pub mod palette;
pub mod style;
pub mod viz;
pub mod viz_plotters_adapter;

pub use color::{ColorSpec, Rgb8, to_hex, to_rgb};
pub use config::{LegendPosition, StyleConfig};
pub use error::{StyleError, StyleResult};
pub use gradient::{Colormap, build_colormap, gradient_names, named_colormap};
pub use palette::{Palette, Palettes};
pub use style::{LineDash, MarkerShape, SeriesStyle, StyleCycle};
pub use viz::{
    ChartOptions, Customplot, DensityOptions, GradientChoice, HeatmapOptions, Samples, Series,
    SurfaceOptions,
};
