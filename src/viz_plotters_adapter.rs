//! Adapter helpers to draw resolved styles with the plotters crate.
//!
//! Usage example (inside a chart painter):
//! ```ignore
//!     let style = cycle.style_for(idx);
//!     draw_line(&mut chart, &series.points, &style)?;
//!     draw_markers(&mut chart, &series.points, &style)?;
//! ```

use anyhow::{Result, anyhow};
use plotters::coord::Shift;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;

use crate::color::Rgb8;
use crate::style::{MarkerShape, SeriesStyle};

/// 2-D chart over `f64` axes, as used by every x/y painter.
pub type XyChart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

pub fn rgb_color(c: Rgb8) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

/// Stroke for lines.
pub fn line_style(style: &SeriesStyle) -> ShapeStyle {
    rgb_color(style.color).stroke_width(style.line_width)
}

/// Filled style for markers, bars and patches.
pub fn fill_style(style: &SeriesStyle) -> ShapeStyle {
    rgb_color(style.color).filled()
}

/// Draw a polyline, dashed when the style asks for it.
pub fn draw_line<DB: DrawingBackend>(
    chart: &mut XyChart<'_, DB>,
    points: &[(f64, f64)],
    style: &SeriesStyle,
) -> Result<()> {
    let stroke = line_style(style);
    match style.dash.pattern(style.line_width) {
        None => {
            chart
                .draw_series(LineSeries::new(points.iter().copied(), stroke))
                .map_err(|e| anyhow!("{:?}", e))?;
        }
        Some((dash, gap)) => {
            chart
                .draw_series(DashedLineSeries::new(
                    points.iter().copied(),
                    dash,
                    gap,
                    stroke,
                ))
                .map_err(|e| anyhow!("{:?}", e))?;
        }
    }
    Ok(())
}

/// Pixel outline of a marker centered on the origin, `s` pixels from center to edge.
///
/// Every shape is a closed polygon, so markers compose into one element type for
/// both chart series and legend swatches.
pub fn marker_outline(marker: MarkerShape, s: i32) -> Vec<(i32, i32)> {
    let s = s.max(1);
    match marker {
        MarkerShape::Circle => (0..16)
            .map(|i| {
                let a = f64::from(i) * std::f64::consts::TAU / 16.0;
                (
                    (f64::from(s) * a.cos()).round() as i32,
                    (f64::from(s) * a.sin()).round() as i32,
                )
            })
            .collect(),
        MarkerShape::Square => vec![(-s, -s), (s, -s), (s, s), (-s, s)],
        MarkerShape::Triangle => vec![(0, -s), (s, s), (-s, s)],
        MarkerShape::Diamond => vec![(0, -s), (s, 0), (0, s), (-s, 0)],
        MarkerShape::Cross => plus_outline(s),
        MarkerShape::X => plus_outline(s)
            .into_iter()
            .map(|(x, y)| {
                let (x, y) = (f64::from(x), f64::from(y));
                (
                    ((x - y) * std::f64::consts::FRAC_1_SQRT_2).round() as i32,
                    ((x + y) * std::f64::consts::FRAC_1_SQRT_2).round() as i32,
                )
            })
            .collect(),
    }
}

/// Plus sign with arms of length `s` and a third of that in thickness.
fn plus_outline(s: i32) -> Vec<(i32, i32)> {
    let a = (s / 3).max(1);
    vec![
        (-a, -s),
        (a, -s),
        (a, -a),
        (s, -a),
        (s, a),
        (a, a),
        (a, s),
        (-a, s),
        (-a, a),
        (-s, a),
        (-s, -a),
        (-a, -a),
    ]
}

/// Draw one marker per point in the style's shape.
pub fn draw_markers<DB: DrawingBackend>(
    chart: &mut XyChart<'_, DB>,
    points: &[(f64, f64)],
    style: &SeriesStyle,
) -> Result<()> {
    let s = i32::try_from(style.marker_size).unwrap_or(i32::MAX);
    let outline = marker_outline(style.marker, s);
    let st = fill_style(style);
    chart
        .draw_series(
            points
                .iter()
                .map(|&c| EmptyElement::at(c) + Polygon::new(outline.clone(), st)),
        )
        .map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

/// Draw a marker glyph at a pixel position (legend swatches).
pub fn draw_marker_glyph<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    c: (i32, i32),
    s: i32,
    style: &SeriesStyle,
) -> Result<()> {
    let outline = marker_outline(style.marker, s);
    let glyph = EmptyElement::at(c) + Polygon::new(outline, fill_style(style));
    area.draw(&glyph).map_err(|e| anyhow!("{:?}", e))
}
