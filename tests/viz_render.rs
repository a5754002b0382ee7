use customplot::{
    ChartOptions, ColorSpec, Customplot, DensityOptions, GradientChoice, HeatmapOptions,
    LegendPosition, Samples, Series, StyleConfig, StyleError, SurfaceOptions,
};
use std::fs;
use std::path::Path;

fn plotter(dir: &Path) -> Customplot {
    Customplot::new(StyleConfig::default().with_save_dir(dir.join("saved_figs"))).unwrap()
}

fn two_series() -> Vec<Series> {
    vec![
        Series::from_xy(&[2019.0, 2020.0, 2021.0], &[1.0, 2.0, 3.0]).with_label("DEU"),
        Series::from_xy(&[2019.0, 2020.0, 2021.0], &[2.0, 2.5, 3.5]).with_label("USA"),
    ]
}

fn assert_written(path: &Path) {
    let meta = fs::metadata(path).expect("file created");
    assert!(meta.len() > 0, "{} has content", path.display());
}

#[test]
fn line_chart_svg_and_png() {
    let tmp = tempfile::tempdir().unwrap();
    let plot = plotter(tmp.path());
    for ext in ["svg", "png"] {
        let out = tmp.path().join(format!("lines.{ext}"));
        let opts = ChartOptions::titled("Demo").labels("Year", "Value").out(&out);
        let written = plot.plot(&two_series(), &opts).unwrap();
        assert_eq!(written, out);
        assert_written(&written);
    }
}

#[test]
fn svg_output_contains_the_title() {
    let tmp = tempfile::tempdir().unwrap();
    let plot = plotter(tmp.path());
    let out = tmp.path().join("titled.svg");
    plot.plot(&two_series(), &ChartOptions::titled("GDP per capita").out(&out))
        .unwrap();
    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("GDP per capita"));
}

#[test]
fn scatter_in_color_blind_mode_with_inside_legend() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = StyleConfig::default()
        .with_color_blind_mode(true)
        .with_supp_colors(true);
    let plot = Customplot::new(cfg).unwrap();
    let out = tmp.path().join("scatter.svg");
    let opts = ChartOptions::default()
        .legend(LegendPosition::Inside)
        .out(&out);
    plot.scatter(&two_series(), &opts).unwrap();
    assert_written(&out);
}

#[test]
fn autosave_lands_in_save_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let plot = plotter(tmp.path());
    let written = plot.plot(&two_series(), &ChartOptions::default()).unwrap();
    assert_eq!(written.parent(), Some(tmp.path().join("saved_figs").as_path()));
    assert_eq!(written.extension().and_then(|e| e.to_str()), Some("png"));
    assert_written(&written);

    // a second chart in the same instant must not overwrite the first
    let again = plot.plot(&two_series(), &ChartOptions::default()).unwrap();
    assert_ne!(written, again);
    assert_written(&again);
}

#[test]
fn no_output_when_autosave_is_off() {
    let plot = Customplot::new(StyleConfig::default().with_autosave(false)).unwrap();
    let err = plot
        .plot(&two_series(), &ChartOptions::default())
        .unwrap_err();
    assert_eq!(err.downcast_ref::<StyleError>(), Some(&StyleError::NoOutput));
}

#[test]
fn empty_data_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let plot = plotter(tmp.path());
    let out = tmp.path().join("empty.svg");
    assert!(plot.plot(&[], &ChartOptions::default().out(&out)).is_err());
    assert!(
        plot.plot(&[Series::new(Vec::new())], &ChartOptions::default().out(&out))
            .is_err()
    );
    assert!(plot.matshow(&[], &HeatmapOptions::default()).is_err());
    assert!(!out.exists());
    assert!(!tmp.path().join("saved_figs").exists());
}

#[test]
fn heatmap_named_and_explicit_gradients() {
    let tmp = tempfile::tempdir().unwrap();
    let plot = plotter(tmp.path());
    let matrix = vec![
        vec![0.0, 1.0, 2.0],
        vec![3.0, f64::NAN, 5.0],
        vec![6.0, 7.0, 8.0],
    ];

    let out = tmp.path().join("heat.png");
    let opts = HeatmapOptions {
        chart: ChartOptions::titled("Heat").out(&out),
        gradient: GradientChoice::Named("hot_cold".into()),
        invert: true,
        ..Default::default()
    };
    plot.matshow(&matrix, &opts).unwrap();
    assert_written(&out);

    let out = tmp.path().join("heat.svg");
    let opts = HeatmapOptions {
        chart: ChartOptions::default().out(&out),
        gradient: GradientChoice::Stops(vec![
            ColorSpec::from("strong-off-white"),
            ColorSpec::from("#000000"),
        ]),
        colorbar: false,
        ..Default::default()
    };
    plot.matshow(&matrix, &opts).unwrap();
    assert_written(&out);
}

#[test]
fn heatmap_with_unknown_gradient_fails_typed() {
    let tmp = tempfile::tempdir().unwrap();
    let plot = plotter(tmp.path());
    let opts = HeatmapOptions {
        chart: ChartOptions::default().out(tmp.path().join("x.svg")),
        gradient: GradientChoice::Named("plasma".into()),
        ..Default::default()
    };
    let err = plot.matshow(&[vec![1.0, 2.0]], &opts).unwrap_err();
    assert_eq!(
        err.downcast_ref::<StyleError>(),
        Some(&StyleError::UnknownGradient("plasma".into()))
    );
}

#[test]
fn surface_renders_and_validates_grid() {
    let tmp = tempfile::tempdir().unwrap();
    let plot = plotter(tmp.path());
    let xs: Vec<f64> = (0..10).map(|i| i as f64 / 3.0).collect();
    let ys: Vec<f64> = (0..8).map(|i| i as f64 / 3.0).collect();
    let z: Vec<Vec<f64>> = ys
        .iter()
        .map(|y| xs.iter().map(|x| (x * y).sin()).collect())
        .collect();
    let out = tmp.path().join("surface.svg");
    let opts = SurfaceOptions {
        chart: ChartOptions::titled("Surface").labels("x", "y").out(&out),
        ..Default::default()
    };
    plot.surface(&xs, &ys, &z, &opts).unwrap();
    assert_written(&out);

    let short = vec![vec![0.0; xs.len()]; 2];
    assert!(plot.surface(&xs, &ys, &short, &opts).is_err());
}

#[test]
fn pie_renders_and_rejects_bad_values() {
    let tmp = tempfile::tempdir().unwrap();
    let plot = plotter(tmp.path());
    let slices = vec![
        ("Rent".to_string(), 40.0),
        ("Food".to_string(), 25.0),
        ("Travel".to_string(), 35.0),
    ];
    let out = tmp.path().join("pie.svg");
    plot.pie(&slices, &ChartOptions::titled("Budget").out(&out))
        .unwrap();
    assert_written(&out);

    let opts = ChartOptions::default().out(tmp.path().join("bad.svg"));
    assert!(plot.pie(&[("a".into(), -1.0)], &opts).is_err());
    assert!(plot.pie(&[("a".into(), 0.0)], &opts).is_err());
}

#[test]
fn density_curves_render() {
    let tmp = tempfile::tempdir().unwrap();
    let plot = plotter(tmp.path());
    let samples = vec![
        Samples::labeled("a", vec![1.0, 2.0, 2.5, 3.0, 3.2, 4.0]),
        Samples::labeled("b", vec![4.0, 5.5, 6.0, 6.1, 7.0]),
    ];
    let out = tmp.path().join("density.png");
    let opts = DensityOptions {
        chart: ChartOptions::titled("Density").out(&out),
        ..Default::default()
    };
    plot.density(&samples, &opts).unwrap();
    assert_written(&out);
}

#[test]
fn unknown_font_falls_back_to_bundled() {
    let cfg = StyleConfig {
        font: "No Such Font".into(),
        ..StyleConfig::default()
    };
    let plot = Customplot::new(cfg).unwrap();
    assert_eq!(plot.font(), "sans-serif");
}

#[test]
fn missing_font_file_is_an_error() {
    let cfg = StyleConfig {
        font: "Custom".into(),
        font_file: Some("/definitely/not/here.ttf".into()),
        ..StyleConfig::default()
    };
    assert!(Customplot::new(cfg).is_err());
}

#[test]
fn per_chart_legend_overrides_config() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = StyleConfig {
        legend: LegendPosition::None,
        ..StyleConfig::default()
    };
    let plot = Customplot::new(cfg).unwrap();
    let series = [Series::from_xy(&[0.0, 1.0, 2.0], &[3.0, 1.0, 2.0]).with_label("Exports")];

    let hidden = tmp.path().join("hidden.svg");
    plot.plot(&series, &ChartOptions::default().out(&hidden))
        .unwrap();
    assert!(!fs::read_to_string(&hidden).unwrap().contains("Exports"));

    for (name, legend) in [("inside", LegendPosition::Inside), ("right", LegendPosition::Right)] {
        let out = tmp.path().join(format!("{name}.svg"));
        plot.plot(&series, &ChartOptions::default().legend(legend).out(&out))
            .unwrap();
        let svg = fs::read_to_string(&out).unwrap();
        assert!(svg.contains("Exports"), "legend {name} missing its label");
    }
}

#[test]
fn pie_labels_are_drawn_once() {
    let tmp = tempfile::tempdir().unwrap();
    let plot = plotter(tmp.path());
    let slices = vec![("Rent".to_string(), 40.0), ("Food".to_string(), 60.0)];
    for legend in [LegendPosition::Inside, LegendPosition::Right, LegendPosition::None] {
        let out = tmp.path().join(format!("pie-{legend:?}.svg"));
        plot.pie(&slices, &ChartOptions::default().legend(legend).out(&out))
            .unwrap();
        let svg = fs::read_to_string(&out).unwrap();
        assert_eq!(svg.matches("Rent").count(), 1, "legend {legend:?}");
    }
}
