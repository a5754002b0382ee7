//! Per-series styling: which color, dash and marker the i-th series gets.
//!
//! Colors cycle through the active palette. In color-blind mode the dash pattern
//! and marker shape cycle alongside, so series stay distinguishable without hue.

use crate::color::Rgb8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerShape {
    Circle,
    Square,
    Triangle,
    Diamond,
    Cross,
    X,
}

/// Marker order used in color-blind mode.
pub const MARKER_CYCLE: [MarkerShape; 6] = [
    MarkerShape::Circle,
    MarkerShape::Triangle,
    MarkerShape::Square,
    MarkerShape::Diamond,
    MarkerShape::Cross,
    MarkerShape::X,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineDash {
    Solid,
    Dotted,
    Dashed,
    DenselyDashed,
    LooselyDashed,
}

/// Dash order used in color-blind mode.
pub const DASH_CYCLE: [LineDash; 5] = [
    LineDash::Solid,
    LineDash::Dotted,
    LineDash::Dashed,
    LineDash::DenselyDashed,
    LineDash::LooselyDashed,
];

impl LineDash {
    /// `(dash length, gap)` in pixels for a stroke of `width`; `None` for solid.
    pub fn pattern(self, width: u32) -> Option<(u32, u32)> {
        let w = width.max(1);
        match self {
            LineDash::Solid => None,
            LineDash::Dotted => Some((w, w * 2)),
            LineDash::Dashed => Some((w * 5, w * 5)),
            LineDash::DenselyDashed => Some((w * 5, w * 2)),
            LineDash::LooselyDashed => Some((w * 5, w * 10)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeriesStyle {
    pub color: Rgb8,
    pub dash: LineDash,
    pub marker: MarkerShape,
    pub marker_size: u32,
    pub line_width: u32,
}

/// Hands out [`SeriesStyle`]s in a fixed, repeating order.
#[derive(Clone, Debug)]
pub struct StyleCycle {
    colors: Vec<Rgb8>,
    color_blind: bool,
    marker_size: u32,
    line_width: u32,
}

impl StyleCycle {
    /// An empty `colors` list falls back to black.
    pub fn new(colors: Vec<Rgb8>, color_blind: bool) -> Self {
        let colors = if colors.is_empty() {
            vec![Rgb8::new(0, 0, 0)]
        } else {
            colors
        };
        Self {
            colors,
            color_blind,
            marker_size: 6,
            line_width: 2,
        }
    }

    pub fn with_sizes(mut self, marker_size: u32, line_width: u32) -> Self {
        self.marker_size = marker_size;
        self.line_width = line_width;
        self
    }

    pub fn colors(&self) -> &[Rgb8] {
        &self.colors
    }

    pub fn color_for(&self, idx: usize) -> Rgb8 {
        self.colors[idx % self.colors.len()]
    }

    /// Dash and marker are picked from the position within the color cycle, so
    /// all three repeat together with the palette's period.
    pub fn style_for(&self, idx: usize) -> SeriesStyle {
        let k = idx % self.colors.len();
        let (dash, marker) = if self.color_blind {
            (
                DASH_CYCLE[k % DASH_CYCLE.len()],
                MARKER_CYCLE[k % MARKER_CYCLE.len()],
            )
        } else {
            (LineDash::Solid, MarkerShape::Circle)
        };
        SeriesStyle {
            color: self.color_for(idx),
            dash,
            marker,
            marker_size: self.marker_size,
            line_width: self.line_width,
        }
    }
}
