use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use customplot::{
    ChartOptions, ColorSpec, Customplot, GradientChoice, HeatmapOptions, Palettes, Series,
    StyleConfig, gradient_names,
};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "customplot",
    version,
    about = "Resolve palette colors and gradients, and render styled charts"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a hex string, alias or r,g,b triple.
    Color {
        /// e.g. "#4c6fe7", strong-blue or 76,111,231
        value: String,
    },
    /// List palette aliases with their resolved hex values.
    Palette {
        /// Show the supplementary palette instead of the main one.
        #[arg(long, default_value_t = false)]
        supplementary: bool,
    },
    /// Sample a named gradient.
    Gradient(GradientArgs),
    /// Render a CSV matrix as a heatmap.
    Heatmap(HeatmapArgs),
    /// Render CSV columns as line (or scatter) series.
    Lines(LinesArgs),
}

#[derive(Args, Debug)]
struct GradientArgs {
    /// Gradient name (strong, hot_cold, rainbow, bw)
    name: String,
    /// Reverse the stop order.
    #[arg(long, default_value_t = false)]
    reverse: bool,
    /// Number of evenly spaced samples to print.
    #[arg(long, default_value_t = 5)]
    samples: usize,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Input CSV file.
    #[arg(short, long)]
    input: PathBuf,
    /// Output chart (.svg or .png). Without it the chart is autosaved.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Style config (JSON).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Chart title.
    #[arg(long)]
    title: Option<String>,
}

#[derive(Args, Debug)]
struct HeatmapArgs {
    #[command(flatten)]
    render: RenderArgs,
    /// Named gradient to shade with.
    #[arg(long, default_value = "strong")]
    gradient: String,
    /// Reverse the gradient.
    #[arg(long, default_value_t = false)]
    invert: bool,
}

#[derive(Args, Debug)]
struct LinesArgs {
    #[command(flatten)]
    render: RenderArgs,
    /// Draw markers only.
    #[arg(long, default_value_t = false)]
    scatter: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Color { value } => cmd_color(&value),
        Command::Palette { supplementary } => cmd_palette(supplementary),
        Command::Gradient(args) => cmd_gradient(args),
        Command::Heatmap(args) => cmd_heatmap(args),
        Command::Lines(args) => cmd_lines(args),
    }
}

fn cmd_color(value: &str) -> Result<()> {
    let spec: ColorSpec = value.parse()?;
    let rgb = Palettes::standard().resolve(&spec)?;
    println!("hex: {}", rgb.to_hex());
    println!("rgb: ({}, {}, {})", rgb.r, rgb.g, rgb.b);
    Ok(())
}

fn cmd_palette(supplementary: bool) -> Result<()> {
    let palettes = Palettes::standard();
    let palette = if supplementary {
        &palettes.supplementary
    } else {
        &palettes.main
    };
    for alias in palette.aliases() {
        println!("{:<20} {}", alias, palettes.to_hex(alias)?);
    }
    Ok(())
}

fn cmd_gradient(args: GradientArgs) -> Result<()> {
    let cmap = customplot::named_colormap(&args.name, args.reverse).with_context(|| {
        format!(
            "available gradients: {}",
            gradient_names().collect::<Vec<_>>().join(", ")
        )
    })?;
    for c in cmap.sample(args.samples.max(2)) {
        println!("{}", c.to_hex());
    }
    Ok(())
}

fn cmd_heatmap(args: HeatmapArgs) -> Result<()> {
    let plot = Customplot::new(load_config(args.render.config.as_deref())?)?;
    let matrix = read_matrix(&args.render.input)?;
    let opts = HeatmapOptions {
        chart: chart_options(&args.render),
        gradient: GradientChoice::Named(args.gradient),
        invert: args.invert,
        ..Default::default()
    };
    let path = plot.matshow(&matrix, &opts)?;
    println!("{}", path.display());
    Ok(())
}

fn cmd_lines(args: LinesArgs) -> Result<()> {
    let plot = Customplot::new(load_config(args.render.config.as_deref())?)?;
    let series = read_series(&args.render.input)?;
    let opts = chart_options(&args.render);
    let path = if args.scatter {
        plot.scatter(&series, &opts)?
    } else {
        plot.plot(&series, &opts)?
    };
    println!("{}", path.display());
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<StyleConfig> {
    match path {
        Some(p) => StyleConfig::from_json_file(p),
        None => Ok(StyleConfig::default()),
    }
}

fn chart_options(args: &RenderArgs) -> ChartOptions {
    ChartOptions {
        title: args.title.clone(),
        out: args.out.clone(),
        ..Default::default()
    }
}

/// Empty cells read as NaN and are left blank in the chart.
fn parse_cell(cell: &str, row: usize, col: usize) -> Result<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(f64::NAN);
    }
    cell.parse::<f64>()
        .with_context(|| format!("row {row}, column {col}: {cell:?} is not a number"))
}

/// Headerless numeric CSV, one matrix row per line.
fn read_matrix(path: &Path) -> Result<Vec<Vec<f64>>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut rows = Vec::new();
    for (r, rec) in rdr.records().enumerate() {
        let rec = rec.with_context(|| format!("reading {}", path.display()))?;
        let row = rec
            .iter()
            .enumerate()
            .map(|(c, cell)| parse_cell(cell, r + 1, c + 1))
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }
    Ok(rows)
}

/// First column is x; every further column becomes a series named by its header.
fn read_series(path: &Path) -> Result<Vec<Series>> {
    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let headers = rdr
        .headers()
        .with_context(|| format!("reading header of {}", path.display()))?
        .clone();
    if headers.len() < 2 {
        bail!("{} needs an x column and at least one series column", path.display());
    }
    let mut series: Vec<Series> = headers
        .iter()
        .skip(1)
        .map(|h| Series::labeled(h.trim(), Vec::new()))
        .collect();
    for (r, rec) in rdr.records().enumerate() {
        let rec = rec.with_context(|| format!("reading {}", path.display()))?;
        let x = parse_cell(rec.get(0).unwrap_or(""), r + 2, 1)?;
        for (i, s) in series.iter_mut().enumerate() {
            let y = parse_cell(rec.get(i + 1).unwrap_or(""), r + 2, i + 2)?;
            if x.is_finite() && y.is_finite() {
                s.points.push((x, y));
            }
        }
    }
    Ok(series)
}
