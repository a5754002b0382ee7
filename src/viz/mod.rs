//! Styled charts rendered to **PNG** or **SVG** with plotters.
//!
//! [`Customplot`] holds a [`StyleConfig`] and the palettes, and exposes a fixed
//! set of chart methods: `plot`, `scatter`, `matshow`, `surface`, `pie` and
//! `density`. Each resolves colors, fonts and legend placement from the config
//! and writes one file: the explicit `out` path if given, otherwise a
//! timestamped PNG under the autosave directory.

pub mod kde;
pub mod legend;
pub mod types;
pub mod util;

pub use types::{
    ChartOptions, DensityOptions, GradientChoice, HeatmapOptions, Samples, Series,
    SurfaceOptions,
};

use anyhow::{Context, Result, anyhow, bail};
use chrono::Local;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontStyle;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, Once};

use crate::config::{LegendPosition, StyleConfig};
use crate::error::StyleError;
use crate::gradient::Colormap;
use crate::palette::Palettes;
use crate::style::{SeriesStyle, StyleCycle};
use crate::viz_plotters_adapter::{XyChart, draw_line, draw_markers, rgb_color};
use legend::{LegendGlyph, LegendItem, draw_legend, legend_box_size};
use util::{autosave_file_name, finite_extent, padded_range, tick_label, xy_bounds};

const MARGIN: u32 = 16;
const DEFAULT_FONT: &str = "sans-serif";

/// One-time registration for the bundled "sans-serif" font when using the `ab_glyph` text path.
/// Required because `ab_glyph` doesn't discover OS fonts.
static INIT_FONTS: Once = Once::new();

/// Families registered from user font files.
static CUSTOM_FONTS: LazyLock<Mutex<BTreeSet<String>>> =
    LazyLock::new(|| Mutex::new(BTreeSet::new()));

fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        let registered = plotters::style::register_font(
            DEFAULT_FONT,
            FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        );
        if registered.is_err() {
            log::warn!("bundled font could not be registered; text may not render");
        }
    });
}

/// Register a TrueType/OpenType file under `family`. Repeated calls for the same
/// family are no-ops.
///
/// # Errors
/// The file can't be read or isn't a usable font.
pub fn register_font_file(family: &str, path: &Path) -> Result<()> {
    let mut fonts = CUSTOM_FONTS
        .lock()
        .map_err(|_| anyhow!("font registry lock poisoned"))?;
    if fonts.contains(family) {
        return Ok(());
    }
    let bytes = fs::read(path).with_context(|| format!("reading font {}", path.display()))?;
    // plotters keeps a 'static reference for the life of the process
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    plotters::style::register_font(family, FontStyle::Normal, bytes)
        .map_err(|_| anyhow!("{} is not a valid font file", path.display()))?;
    fonts.insert(family.to_string());
    log::debug!("registered font {family} from {}", path.display());
    Ok(())
}

fn is_font_registered(family: &str) -> bool {
    family == DEFAULT_FONT
        || CUSTOM_FONTS
            .lock()
            .map(|f| f.contains(family))
            .unwrap_or(false)
}

/// Styling facade over plotters.
#[derive(Debug, Clone)]
pub struct Customplot {
    config: StyleConfig,
    palettes: Palettes,
    cycle: StyleCycle,
    font: String,
}

impl Customplot {
    /// Build with the standard palettes.
    ///
    /// # Errors
    /// A configured `font_file` that can't be loaded.
    pub fn new(config: StyleConfig) -> Result<Self> {
        Self::with_palettes(config, Palettes::standard().clone())
    }

    pub fn with_palettes(config: StyleConfig, palettes: Palettes) -> Result<Self> {
        ensure_fonts_registered();
        if let Some(file) = config.font_file.as_deref() {
            register_font_file(&config.font, file)?;
        }
        let font = if is_font_registered(&config.font) {
            config.font.clone()
        } else {
            log::warn!(
                "font {} is not registered, falling back to {DEFAULT_FONT}",
                config.font
            );
            DEFAULT_FONT.to_string()
        };
        let colors = palettes.series_colors(config.supp_colors)?;
        let cycle = StyleCycle::new(colors, config.color_blind_mode)
            .with_sizes((config.markersize / 2).max(1), config.linewidth);
        Ok(Self {
            config,
            palettes,
            cycle,
            font,
        })
    }

    pub fn config(&self) -> &StyleConfig {
        &self.config
    }

    pub fn palettes(&self) -> &Palettes {
        &self.palettes
    }

    /// Style the `idx`-th series receives.
    pub fn series_style(&self, idx: usize) -> SeriesStyle {
        self.cycle.style_for(idx)
    }

    /// Font family actually used for text.
    pub fn font(&self) -> &str {
        &self.font
    }

    /// Resolve a gradient choice into a fresh colormap.
    ///
    /// # Errors
    /// Unknown gradient name, unresolvable stop, or fewer than two stops.
    pub fn colormap(&self, gradient: &GradientChoice, invert: bool) -> Result<Colormap, StyleError> {
        match gradient {
            GradientChoice::Named(name) => self.palettes.named_colormap(name, invert),
            GradientChoice::Stops(stops) => self.palettes.build_colormap(stops, invert),
        }
    }

    /// Where the next chart is written.
    ///
    /// # Errors
    /// [`StyleError::NoOutput`] without an explicit path while autosave is off,
    /// or a directory that can't be created.
    pub fn output_path(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(p) = explicit {
            if let Some(parent) = p.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            return Ok(p.to_path_buf());
        }
        if !self.config.autosave {
            return Err(StyleError::NoOutput.into());
        }
        let dir = &self.config.save_dir;
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        let name = autosave_file_name(&Local::now());
        let mut path = dir.join(&name);
        let stem = name.trim_end_matches(".png").to_string();
        let mut n = 1;
        while path.exists() {
            path = dir.join(format!("{stem}-{n}.png"));
            n += 1;
        }
        log::debug!("autosaving chart to {}", path.display());
        Ok(path)
    }

    /// Line chart, one line per series.
    pub fn plot(&self, series: &[Series], opts: &ChartOptions) -> Result<PathBuf> {
        ensure_xy_data(series)?;
        self.render(
            &XyPainter {
                series,
                opts,
                markers_only: false,
            },
            opts.out.as_deref(),
        )
    }

    /// Scatter chart, markers only.
    pub fn scatter(&self, series: &[Series], opts: &ChartOptions) -> Result<PathBuf> {
        ensure_xy_data(series)?;
        self.render(
            &XyPainter {
                series,
                opts,
                markers_only: true,
            },
            opts.out.as_deref(),
        )
    }

    /// Matrix heatmap shaded by a gradient, with an optional colorbar.
    /// Row 0 is drawn at the top.
    pub fn matshow(&self, matrix: &[Vec<f64>], opts: &HeatmapOptions) -> Result<PathBuf> {
        let cols = matrix.iter().map(Vec::len).max().unwrap_or(0);
        if matrix.is_empty() || cols == 0 {
            bail!("no data to plot");
        }
        let (vmin, vmax) = finite_extent(matrix.iter().flatten().copied())
            .ok_or_else(|| anyhow!("no numeric values to plot"))?;
        let cmap = self.colormap(&opts.gradient, opts.invert)?;
        self.render(
            &HeatmapPainter {
                matrix,
                cols,
                vmin,
                vmax,
                cmap,
                opts,
            },
            opts.chart.out.as_deref(),
        )
    }

    /// 3-D surface over a grid: `z[j][i]` is the height at `(xs[i], ys[j])`.
    pub fn surface(
        &self,
        xs: &[f64],
        ys: &[f64],
        z: &[Vec<f64>],
        opts: &SurfaceOptions,
    ) -> Result<PathBuf> {
        if xs.len() < 2 || ys.len() < 2 {
            bail!("surface needs at least a 2x2 grid");
        }
        if z.len() != ys.len() || z.iter().any(|row| row.len() != xs.len()) {
            bail!(
                "surface grid must be {} rows of {} values",
                ys.len(),
                xs.len()
            );
        }
        let (zmin, zmax) = finite_extent(z.iter().flatten().copied())
            .ok_or_else(|| anyhow!("no numeric values to plot"))?;
        let cmap = self.colormap(&opts.gradient, opts.invert)?;
        self.render(
            &SurfacePainter {
                xs,
                ys,
                z,
                zmin,
                zmax,
                cmap,
                opts,
            },
            opts.chart.out.as_deref(),
        )
    }

    /// Pie chart; slices take consecutive series colors.
    pub fn pie(&self, slices: &[(String, f64)], opts: &ChartOptions) -> Result<PathBuf> {
        if slices.is_empty() {
            bail!("no data to plot");
        }
        if slices.iter().any(|(_, v)| !v.is_finite() || *v < 0.0) {
            bail!("pie values must be finite and non-negative");
        }
        if slices.iter().map(|(_, v)| v).sum::<f64>() <= 0.0 {
            bail!("pie values sum to zero");
        }
        self.render(&PiePainter { slices, opts }, opts.out.as_deref())
    }

    /// Kernel density curve per sample set.
    pub fn density(&self, samples: &[Samples], opts: &DensityOptions) -> Result<PathBuf> {
        let curves: Vec<Series> = samples
            .iter()
            .map(|s| {
                let h = opts
                    .bandwidth
                    .unwrap_or_else(|| kde::silverman_bandwidth(&s.values));
                Series {
                    label: s.label.clone(),
                    points: kde::density_curve(&s.values, h, opts.resolution.max(2)),
                }
            })
            .collect();
        ensure_xy_data(&curves)?;
        self.render(
            &DensityPainter {
                curves: &curves,
                opts,
            },
            opts.chart.out.as_deref(),
        )
    }

    fn render<P: ChartPainter>(&self, painter: &P, out: Option<&Path>) -> Result<PathBuf> {
        let path = self.output_path(out)?;
        let size = self.config.figsize;
        if path.extension().and_then(|s| s.to_str()) == Some("svg") {
            let root = SVGBackend::new(&path, size).into_drawing_area();
            painter.paint(root, self)?;
        } else {
            let root = BitMapBackend::new(&path, size).into_drawing_area();
            painter.paint(root, self)?;
        }
        log::info!("wrote chart to {}", path.display());
        Ok(path)
    }

    fn legend_position(&self, opts: &ChartOptions) -> LegendPosition {
        opts.legend.unwrap_or(self.config.legend)
    }

    /// Split off a right-hand legend panel when one is needed.
    fn split_for_legend<DB: DrawingBackend>(
        &self,
        root: DrawingArea<DB, Shift>,
        opts: &ChartOptions,
        has_items: bool,
    ) -> (DrawingArea<DB, Shift>, Option<DrawingArea<DB, Shift>>) {
        if has_items && self.legend_position(opts) == LegendPosition::Right {
            let (plot, legend) = root.split_horizontally((80).percent_width());
            (plot, Some(legend))
        } else {
            (root, None)
        }
    }

    /// Draw legend entries either in the side panel or inside the plot area.
    fn finish_legend<DB: DrawingBackend>(
        &self,
        plot_area: &DrawingArea<DB, Shift>,
        legend_area: Option<&DrawingArea<DB, Shift>>,
        items: &[LegendItem],
        opts: &ChartOptions,
    ) -> Result<()> {
        if items.is_empty() {
            return Ok(());
        }
        let font_px = self.config.fontsize.saturating_sub(2).max(8);
        match (self.legend_position(opts), legend_area) {
            (LegendPosition::Right, Some(area)) => {
                let (w, h) = area.dim_in_pixel();
                let (w, h) = (w as i32, h as i32);
                let (_, box_h) = legend_box_size(items, font_px, w - 8);
                // anchored a bit above mid-height, right of the axes
                let y = ((h as f32 * 0.35) as i32 - box_h / 2).max(8);
                draw_legend(area, items, (4, y), &self.font, font_px, w - 8)
            }
            (LegendPosition::Inside, _) => {
                let (w, _) = plot_area.dim_in_pixel();
                draw_legend(
                    plot_area,
                    items,
                    (MARGIN as i32 + 80, MARGIN as i32 + 40),
                    &self.font,
                    font_px,
                    (w as i32 / 2).max(80),
                )
            }
            _ => Ok(()),
        }
    }

    fn caption_px(&self) -> u32 {
        self.config.fontsize + 6
    }
}

fn ensure_xy_data(series: &[Series]) -> Result<()> {
    if series.iter().all(|s| s.points.is_empty()) {
        bail!("no data to plot");
    }
    if xy_bounds(series.iter().flat_map(|s| s.points.iter())).is_none() {
        bail!("no numeric values to plot");
    }
    Ok(())
}

/// One chart kind, drawable on any backend.
trait ChartPainter {
    fn paint<DB: DrawingBackend>(&self, root: DrawingArea<DB, Shift>, plot: &Customplot)
    -> Result<()>;
}

struct XyPainter<'a> {
    series: &'a [Series],
    opts: &'a ChartOptions,
    markers_only: bool,
}

impl ChartPainter for XyPainter<'_> {
    fn paint<DB: DrawingBackend>(
        &self,
        root: DrawingArea<DB, Shift>,
        plot: &Customplot,
    ) -> Result<()> {
        root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
        let ((x0, x1), (y0, y1)) = xy_bounds(self.series.iter().flat_map(|s| s.points.iter()))
            .ok_or_else(|| anyhow!("no numeric values to plot"))?;

        let glyph = if self.markers_only {
            LegendGlyph::Marker
        } else {
            LegendGlyph::Line
        };
        let items = legend_items(
            plot,
            self.opts,
            self.series.iter().map(|s| s.label.as_deref()),
            glyph,
        );
        let (plot_area, legend_area) = plot.split_for_legend(root, self.opts, !items.is_empty());

        let mut chart = build_xy_chart(&plot_area, plot, self.opts, (x0, x1), (y0, y1))?;
        for (idx, s) in self.series.iter().enumerate() {
            let style = plot.series_style(idx);
            if self.markers_only {
                draw_markers(&mut chart, &s.points, &style)?;
            } else {
                draw_line(&mut chart, &s.points, &style)?;
                if plot.config.color_blind_mode {
                    draw_markers(&mut chart, &s.points, &style)?;
                }
            }
        }

        plot.finish_legend(&plot_area, legend_area.as_ref(), &items, self.opts)?;
        present(&plot_area, legend_area.as_ref())
    }
}

struct DensityPainter<'a> {
    curves: &'a [Series],
    opts: &'a DensityOptions,
}

impl ChartPainter for DensityPainter<'_> {
    fn paint<DB: DrawingBackend>(
        &self,
        root: DrawingArea<DB, Shift>,
        plot: &Customplot,
    ) -> Result<()> {
        root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
        let ((x0, x1), (_, y1)) = xy_bounds(self.curves.iter().flat_map(|s| s.points.iter()))
            .ok_or_else(|| anyhow!("no numeric values to plot"))?;
        let chart_opts = &self.opts.chart;
        let glyph = if self.opts.fill {
            LegendGlyph::Patch
        } else {
            LegendGlyph::Line
        };
        let items = legend_items(
            plot,
            chart_opts,
            self.curves.iter().map(|s| s.label.as_deref()),
            glyph,
        );
        let (plot_area, legend_area) = plot.split_for_legend(root, chart_opts, !items.is_empty());

        // densities are never negative; keep the baseline on the axis
        let mut chart = build_xy_chart(&plot_area, plot, chart_opts, (x0, x1), (0.0, y1))?;
        for (idx, curve) in self.curves.iter().enumerate() {
            let style = plot.series_style(idx);
            if self.opts.fill {
                let color = rgb_color(style.color);
                chart
                    .draw_series(AreaSeries::new(
                        curve.points.iter().copied(),
                        0.0,
                        color.mix(0.20).filled(),
                    ))
                    .map_err(|e| anyhow!("{:?}", e))?;
            }
            draw_line(&mut chart, &curve.points, &style)?;
        }

        plot.finish_legend(&plot_area, legend_area.as_ref(), &items, chart_opts)?;
        present(&plot_area, legend_area.as_ref())
    }
}

struct HeatmapPainter<'a> {
    matrix: &'a [Vec<f64>],
    cols: usize,
    vmin: f64,
    vmax: f64,
    cmap: Colormap,
    opts: &'a HeatmapOptions,
}

impl HeatmapPainter<'_> {
    fn shade(&self, v: f64) -> RGBColor {
        let t = if self.vmax > self.vmin {
            (v - self.vmin) / (self.vmax - self.vmin)
        } else {
            0.5
        };
        rgb_color(self.cmap.color_at(t))
    }
}

impl ChartPainter for HeatmapPainter<'_> {
    fn paint<DB: DrawingBackend>(
        &self,
        root: DrawingArea<DB, Shift>,
        plot: &Customplot,
    ) -> Result<()> {
        root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
        let rows = self.matrix.len();
        let rows_f = rows as f64;
        let (cells_area, bar_area) = if self.opts.colorbar {
            let (a, b) = root.split_horizontally((86).percent_width());
            (a, Some(b))
        } else {
            (root, None)
        };

        let chart_opts = &self.opts.chart;
        let mut chart = build_xy_chart(
            &cells_area,
            plot,
            chart_opts,
            (0.0, self.cols as f64),
            (0.0, rows_f),
        )?;
        // cell (r, c) spans x in [c, c+1] and y in [rows-r-1, rows-r]
        for (r, row) in self.matrix.iter().enumerate() {
            let top = rows_f - r as f64;
            chart
                .draw_series(row.iter().enumerate().filter(|(_, v)| v.is_finite()).map(
                    |(c, v)| {
                        Rectangle::new(
                            [(c as f64, top - 1.0), (c as f64 + 1.0, top)],
                            self.shade(*v).filled(),
                        )
                    },
                ))
                .map_err(|e| anyhow!("{:?}", e))?;
        }

        if let Some(bar) = bar_area.as_ref() {
            draw_colorbar(bar, plot, &self.cmap, self.vmin, self.vmax)?;
        }
        present(&cells_area, bar_area.as_ref())
    }
}

/// Vertical colorbar: the colormap sampled bottom (vmin) to top (vmax).
fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    plot: &Customplot,
    cmap: &Colormap,
    vmin: f64,
    vmax: f64,
) -> Result<()> {
    const STEPS: usize = 128;
    let (lo, hi) = if vmax > vmin {
        (vmin, vmax)
    } else {
        padded_range(vmin, vmax)
    };
    let font_px = plot.config.fontsize.saturating_sub(4).max(8);
    let mut bar = ChartBuilder::on(area)
        .margin(MARGIN)
        .margin_top(MARGIN + plot.caption_px() + 8)
        .margin_bottom(MARGIN + 48)
        .y_label_area_size(0)
        .right_y_label_area_size(56)
        .build_cartesian_2d(0.0..1.0, lo..hi)
        .map_err(|e| anyhow!("{:?}", e))?
        .set_secondary_coord(0.0..1.0, lo..hi);
    bar.configure_secondary_axes()
        .y_labels(6)
        .y_label_formatter(&|v: &f64| tick_label(*v))
        .label_style((plot.font(), font_px))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;
    let step = (hi - lo) / STEPS as f64;
    bar.draw_series((0..STEPS).map(|i| {
        let y0 = lo + step * i as f64;
        let t = (i as f64 + 0.5) / STEPS as f64;
        Rectangle::new(
            [(0.0, y0), (1.0, y0 + step)],
            rgb_color(cmap.color_at(t)).filled(),
        )
    }))
    .map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

struct SurfacePainter<'a> {
    xs: &'a [f64],
    ys: &'a [f64],
    z: &'a [Vec<f64>],
    zmin: f64,
    zmax: f64,
    cmap: Colormap,
    opts: &'a SurfaceOptions,
}

impl ChartPainter for SurfacePainter<'_> {
    fn paint<DB: DrawingBackend>(
        &self,
        root: DrawingArea<DB, Shift>,
        plot: &Customplot,
    ) -> Result<()> {
        root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
        let chart_opts = &self.opts.chart;
        let (x0, x1) = finite_extent(self.xs.iter().copied())
            .ok_or_else(|| anyhow!("no numeric x values"))?;
        let (y0, y1) = finite_extent(self.ys.iter().copied())
            .ok_or_else(|| anyhow!("no numeric y values"))?;
        let (x0, x1) = if x1 > x0 { (x0, x1) } else { padded_range(x0, x1) };
        let (y0, y1) = if y1 > y0 { (y0, y1) } else { padded_range(y0, y1) };
        let (z0, z1) = padded_range(self.zmin, self.zmax);

        let mut builder = ChartBuilder::on(&root);
        builder.margin(MARGIN);
        if let Some(title) = chart_opts.title.as_deref() {
            builder.caption(title, (plot.font(), plot.caption_px()));
        }
        // plotters' vertical axis is the middle one
        let mut chart = builder
            .build_cartesian_3d(x0..x1, z0..z1, y0..y1)
            .map_err(|e| anyhow!("{:?}", e))?;
        let (yaw, pitch) = (self.opts.yaw, self.opts.pitch);
        chart.with_projection(|mut pb| {
            pb.yaw = yaw;
            pb.pitch = pitch;
            pb.scale = 0.9;
            pb.into_matrix()
        });
        chart
            .configure_axes()
            .light_grid_style(BLACK.mix(0.15))
            .max_light_lines(3)
            .label_style((plot.font(), plot.config.fontsize.saturating_sub(4).max(8)))
            .draw()
            .map_err(|e| anyhow!("{:?}", e))?;

        let span = self.zmax - self.zmin;
        let shade = |v: f64| {
            let t = if span > 0.0 { (v - self.zmin) / span } else { 0.5 };
            rgb_color(self.cmap.color_at(t))
        };
        let mut quads = Vec::new();
        for j in 0..self.ys.len() - 1 {
            for i in 0..self.xs.len() - 1 {
                let corners = [
                    (i, j),
                    (i + 1, j),
                    (i + 1, j + 1),
                    (i, j + 1),
                ];
                let heights: Vec<f64> = corners.iter().map(|&(a, b)| self.z[b][a]).collect();
                if heights.iter().any(|h| !h.is_finite()) {
                    continue;
                }
                let mean = heights.iter().sum::<f64>() / 4.0;
                let poly: Vec<(f64, f64, f64)> = corners
                    .iter()
                    .zip(heights.iter())
                    .map(|(&(a, b), &h)| (self.xs[a], h, self.ys[b]))
                    .collect();
                quads.push(Polygon::new(poly, shade(mean).mix(0.9).filled()));
            }
        }
        chart
            .draw_series(quads)
            .map_err(|e| anyhow!("{:?}", e))?;

        if let Some(xl) = chart_opts.xlabel.as_deref() {
            let style = TextStyle::from((plot.font(), plot.config.fontsize).into_font());
            chart
                .draw_series(std::iter::once(Text::new(
                    xl.to_string(),
                    (x1, z0, y0),
                    style,
                )))
                .map_err(|e| anyhow!("{:?}", e))?;
        }
        if let Some(yl) = chart_opts.ylabel.as_deref() {
            let style = TextStyle::from((plot.font(), plot.config.fontsize).into_font());
            chart
                .draw_series(std::iter::once(Text::new(
                    yl.to_string(),
                    (x0, z0, y1),
                    style,
                )))
                .map_err(|e| anyhow!("{:?}", e))?;
        }
        root.present().map_err(|e| anyhow!("{:?}", e))?;
        Ok(())
    }
}

struct PiePainter<'a> {
    slices: &'a [(String, f64)],
    opts: &'a ChartOptions,
}

impl ChartPainter for PiePainter<'_> {
    fn paint<DB: DrawingBackend>(
        &self,
        root: DrawingArea<DB, Shift>,
        plot: &Customplot,
    ) -> Result<()> {
        root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
        let area = match self.opts.title.as_deref() {
            Some(title) => root
                .titled(title, (plot.font(), plot.caption_px()))
                .map_err(|e| anyhow!("{:?}", e))?,
            None => root.clone(),
        };
        let items = legend_items(
            plot,
            self.opts,
            self.slices.iter().map(|(l, _)| Some(l.as_str())),
            LegendGlyph::Patch,
        );
        let (pie_area, legend_area) = plot.split_for_legend(area, self.opts, !items.is_empty());

        let (w, h) = pie_area.dim_in_pixel();
        let center = (w as i32 / 2, h as i32 / 2);
        let radius = f64::from(w.min(h)) * 0.38;
        let sizes: Vec<f64> = self.slices.iter().map(|(_, v)| *v).collect();
        let colors: Vec<RGBColor> = (0..self.slices.len())
            .map(|i| rgb_color(plot.series_style(i).color))
            .collect();
        // labels live in the legend; slices only carry percentages
        let labels: Vec<&str> = if !items.is_empty() {
            vec![""; self.slices.len()]
        } else {
            self.slices.iter().map(|(l, _)| l.as_str()).collect()
        };
        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.start_angle(-90.0);
        pie.label_style((plot.font(), plot.config.fontsize).into_font().color(&BLACK));
        pie.percentages(
            (plot.font(), plot.config.fontsize.saturating_sub(2).max(8))
                .into_font()
                .color(&WHITE),
        );
        pie_area.draw(&pie).map_err(|e| anyhow!("{:?}", e))?;

        plot.finish_legend(&pie_area, legend_area.as_ref(), &items, self.opts)?;
        present(&pie_area, legend_area.as_ref())?;
        root.present().map_err(|e| anyhow!("{:?}", e))?;
        Ok(())
    }
}

/// Legend entries for every labeled series, in series order.
fn legend_items<'a, I>(
    plot: &Customplot,
    opts: &ChartOptions,
    labels: I,
    glyph: LegendGlyph,
) -> Vec<LegendItem>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    if plot.legend_position(opts) == LegendPosition::None {
        return Vec::new();
    }
    labels
        .into_iter()
        .enumerate()
        .filter_map(|(idx, label)| {
            label.filter(|l| !l.trim().is_empty()).map(|l| LegendItem {
                label: l.to_string(),
                style: plot.series_style(idx),
                glyph,
            })
        })
        .collect()
}

/// 2-D chart with title, axis descriptions and tick labels in the configured font.
fn build_xy_chart<'a, DB: DrawingBackend>(
    area: &'a DrawingArea<DB, Shift>,
    plot: &'a Customplot,
    opts: &'a ChartOptions,
    x: (f64, f64),
    y: (f64, f64),
) -> Result<XyChart<'a, DB>> {
    let font = plot.font();
    let fontsize = plot.config.fontsize;

    let mut builder = ChartBuilder::on(area);
    builder
        .margin(MARGIN)
        .x_label_area_size(fontsize * 3)
        .y_label_area_size(fontsize * 4);
    if let Some(title) = opts.title.as_deref() {
        builder.caption(title, (font, plot.caption_px()));
    }
    let mut chart = builder
        .build_cartesian_2d(x.0..x.1, y.0..y.1)
        .map_err(|e| anyhow!("{:?}", e))?;

    let fmt = |v: &f64| tick_label(*v);
    {
        let mut mesh = chart.configure_mesh();
        mesh.x_label_formatter(&fmt)
            .y_label_formatter(&fmt)
            .label_style((font, fontsize.saturating_sub(4).max(8)))
            .axis_desc_style((font, fontsize));
        if let Some(xl) = opts.xlabel.as_deref() {
            mesh.x_desc(xl);
        }
        if let Some(yl) = opts.ylabel.as_deref() {
            mesh.y_desc(yl);
        }
        mesh.draw().map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(chart)
}

fn present<DB: DrawingBackend>(
    main: &DrawingArea<DB, Shift>,
    side: Option<&DrawingArea<DB, Shift>>,
) -> Result<()> {
    main.present().map_err(|e| anyhow!("{:?}", e))?;
    if let Some(side) = side {
        side.present().map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}
