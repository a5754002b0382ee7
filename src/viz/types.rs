//! Input and option types for the chart methods.

use std::path::PathBuf;

use crate::color::ColorSpec;
use crate::config::LegendPosition;
use crate::gradient::DEFAULT_GRADIENT;

/// One x/y series, optionally labeled for the legend.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    pub label: Option<String>,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self {
            label: None,
            points,
        }
    }

    pub fn labeled<S: Into<String>>(label: S, points: Vec<(f64, f64)>) -> Self {
        Self {
            label: Some(label.into()),
            points,
        }
    }

    /// Zip separate x and y columns; the longer one is truncated.
    pub fn from_xy(xs: &[f64], ys: &[f64]) -> Self {
        Self::new(xs.iter().copied().zip(ys.iter().copied()).collect())
    }

    pub fn with_label<S: Into<String>>(mut self, label: S) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Raw observations for a density curve.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Samples {
    pub label: Option<String>,
    pub values: Vec<f64>,
}

impl Samples {
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            label: None,
            values,
        }
    }

    pub fn labeled<S: Into<String>>(label: S, values: Vec<f64>) -> Self {
        Self {
            label: Some(label.into()),
            values,
        }
    }
}

/// Options shared by every chart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartOptions {
    pub title: Option<String>,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    /// Explicit output file; `None` autosaves (when enabled).
    pub out: Option<PathBuf>,
    /// Overrides the configured legend position for this chart.
    pub legend: Option<LegendPosition>,
}

impl ChartOptions {
    pub fn titled<S: Into<String>>(title: S) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn out<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.out = Some(path.into());
        self
    }

    pub fn labels<X: Into<String>, Y: Into<String>>(mut self, xlabel: X, ylabel: Y) -> Self {
        self.xlabel = Some(xlabel.into());
        self.ylabel = Some(ylabel.into());
        self
    }

    pub fn legend(mut self, legend: LegendPosition) -> Self {
        self.legend = Some(legend);
        self
    }
}

/// Which colormap to shade with.
#[derive(Debug, Clone, PartialEq)]
pub enum GradientChoice {
    /// Entry of the named gradient table.
    Named(String),
    /// Explicit stops (hex, alias or triple).
    Stops(Vec<ColorSpec>),
}

impl Default for GradientChoice {
    fn default() -> Self {
        GradientChoice::Named(DEFAULT_GRADIENT.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapOptions {
    pub chart: ChartOptions,
    pub gradient: GradientChoice,
    /// Reverse the gradient's stop order.
    pub invert: bool,
    pub colorbar: bool,
}

impl Default for HeatmapOptions {
    fn default() -> Self {
        Self {
            chart: ChartOptions::default(),
            gradient: GradientChoice::default(),
            invert: false,
            colorbar: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceOptions {
    pub chart: ChartOptions,
    pub gradient: GradientChoice,
    pub invert: bool,
    /// Camera rotation around the vertical axis, radians.
    pub yaw: f64,
    /// Camera tilt, radians.
    pub pitch: f64,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            chart: ChartOptions::default(),
            gradient: GradientChoice::default(),
            invert: false,
            yaw: 0.5,
            pitch: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DensityOptions {
    pub chart: ChartOptions,
    /// Kernel bandwidth; `None` picks Silverman's rule per sample set.
    pub bandwidth: Option<f64>,
    /// Shade the area under each curve.
    pub fill: bool,
    /// Evaluation points per curve.
    pub resolution: usize,
}

impl Default for DensityOptions {
    fn default() -> Self {
        Self {
            chart: ChartOptions::default(),
            bandwidth: None,
            fill: true,
            resolution: 200,
        }
    }
}
