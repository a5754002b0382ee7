//! Legend box: one swatch plus label per series, stacked vertically.

use anyhow::{Result, anyhow};
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::style::SeriesStyle;
use crate::viz_plotters_adapter::{draw_marker_glyph, fill_style, line_style};

/// How a legend entry's swatch is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendGlyph {
    /// Short stroke, plus a marker in color-blind mode.
    Line,
    /// Marker only.
    Marker,
    /// Filled square (pie slices, density fills).
    Patch,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendItem {
    pub label: String,
    pub style: SeriesStyle,
    pub glyph: LegendGlyph,
}

const SWATCH_W: i32 = 24;
const SWATCH_GAP: i32 = 8;
const PAD: i32 = 8;

/// Heuristic: estimate pixel width of text (Plotters has no built-in text measuring).
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

/// Truncate to fit `max_px`, ending with an ellipsis when shortened.
pub fn truncate_to_width(text: &str, font_px: u32, max_px: u32) -> String {
    if estimate_text_width_px(text, font_px) <= max_px {
        return text.to_string();
    }
    let mut out: String = String::new();
    for ch in text.chars() {
        let candidate = format!("{out}{ch}…");
        if estimate_text_width_px(&candidate, font_px) > max_px {
            break;
        }
        out.push(ch);
    }
    out.push('…');
    out
}

/// Pixel size `(w, h)` of the legend box for `items`, capped at `max_w` wide.
pub fn legend_box_size(items: &[LegendItem], font_px: u32, max_w: i32) -> (i32, i32) {
    let row_h = font_px as i32 + 6;
    let text_w = items
        .iter()
        .map(|it| estimate_text_width_px(&it.label, font_px) as i32)
        .max()
        .unwrap_or(0);
    let w = (PAD * 2 + SWATCH_W + SWATCH_GAP + text_w).min(max_w.max(PAD * 2 + SWATCH_W));
    let h = PAD * 2 + row_h * items.len() as i32;
    (w, h)
}

/// Draw the legend with its top-left corner at `origin` (pixels within `area`).
pub fn draw_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    items: &[LegendItem],
    origin: (i32, i32),
    font: &str,
    font_px: u32,
    max_w: i32,
) -> Result<()> {
    if items.is_empty() {
        return Ok(());
    }
    let (w, h) = legend_box_size(items, font_px, max_w);
    let (x0, y0) = origin;

    area.draw(&Rectangle::new([(x0, y0), (x0 + w, y0 + h)], WHITE.mix(0.85).filled()))
        .map_err(|e| anyhow!("{:?}", e))?;
    area.draw(&Rectangle::new([(x0, y0), (x0 + w, y0 + h)], BLACK.stroke_width(1)))
        .map_err(|e| anyhow!("{:?}", e))?;

    let row_h = font_px as i32 + 6;
    let text_room = (w - PAD * 2 - SWATCH_W - SWATCH_GAP).max(0) as u32;
    let text_style = TextStyle::from((font, font_px).into_font())
        .color(&BLACK)
        .pos(Pos::new(HPos::Left, VPos::Center));

    for (i, item) in items.iter().enumerate() {
        let cy = y0 + PAD + row_h * i as i32 + row_h / 2;
        let sx = x0 + PAD;
        match item.glyph {
            LegendGlyph::Line => {
                area.draw(&PathElement::new(
                    vec![(sx, cy), (sx + SWATCH_W, cy)],
                    line_style(&item.style),
                ))
                .map_err(|e| anyhow!("{:?}", e))?;
                if item.style.dash != crate::style::LineDash::Solid {
                    draw_marker_glyph(area, (sx + SWATCH_W / 2, cy), 4, &item.style)?;
                }
            }
            LegendGlyph::Marker => {
                draw_marker_glyph(area, (sx + SWATCH_W / 2, cy), 5, &item.style)?;
            }
            LegendGlyph::Patch => {
                let half = (row_h / 2 - 2).max(3);
                area.draw(&Rectangle::new(
                    [
                        (sx + SWATCH_W / 2 - half, cy - half),
                        (sx + SWATCH_W / 2 + half, cy + half),
                    ],
                    fill_style(&item.style),
                ))
                .map_err(|e| anyhow!("{:?}", e))?;
            }
        }
        let label = truncate_to_width(&item.label, font_px, text_room);
        area.draw(&Text::new(
            label,
            (sx + SWATCH_W + SWATCH_GAP, cy),
            text_style.clone(),
        ))
        .map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}
