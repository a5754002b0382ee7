//! Chart styling configuration.
//!
//! Defaults mirror the house style: 1000×600 px figures, 16 px text, a legend
//! to the right of the axes and autosave into `saved_figs/`. Any subset of keys
//! can be overridden from a JSON file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Where the legend goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    /// Overlay inside the plotting area, upper left.
    Inside,
    /// Separate panel on the right side of the axes.
    Right,
    /// No legend.
    None,
}

/// Immutable style settings shared by every chart call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Figure size in pixels (width, height).
    pub figsize: (u32, u32),
    /// Font family name used for all text.
    pub font: String,
    /// Optional TrueType file registered under `font`.
    pub font_file: Option<PathBuf>,
    pub fontsize: u32,
    pub markersize: u32,
    pub linewidth: u32,
    pub legend: LegendPosition,
    /// Write every chart to a timestamped file under `save_dir` when no output path is given.
    pub autosave: bool,
    pub save_dir: PathBuf,
    /// Cycle the supplementary palette instead of the main one.
    pub supp_colors: bool,
    /// Cycle line dashes and marker shapes alongside colors.
    pub color_blind_mode: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            figsize: (1000, 600),
            font: "sans-serif".to_string(),
            font_file: None,
            fontsize: 16,
            markersize: 12,
            linewidth: 2,
            legend: LegendPosition::Right,
            autosave: true,
            save_dir: PathBuf::from("saved_figs"),
            supp_colors: false,
            color_blind_mode: false,
        }
    }
}

impl StyleConfig {
    /// Load from a JSON file; missing keys take their defaults.
    ///
    /// # Errors
    /// IO failure or malformed JSON.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading style config {}", path.display()))?;
        let cfg: StyleConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing style config {}", path.display()))?;
        log::debug!("loaded style config from {}", path.display());
        Ok(cfg)
    }

    /// Save as pretty JSON.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let s = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), s)
            .with_context(|| format!("writing style config {}", path.as_ref().display()))?;
        Ok(())
    }

    /// Builder-style override for the autosave directory.
    pub fn with_save_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.save_dir = dir.into();
        self
    }

    pub fn with_autosave(mut self, on: bool) -> Self {
        self.autosave = on;
        self
    }

    pub fn with_color_blind_mode(mut self, on: bool) -> Self {
        self.color_blind_mode = on;
        self
    }

    pub fn with_supp_colors(mut self, on: bool) -> Self {
        self.supp_colors = on;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn partial_json_fills_defaults() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("style.json");
        fs::write(&p, r#"{ "fontsize": 20, "legend": "inside", "autosave": false }"#).unwrap();
        let cfg = StyleConfig::from_json_file(&p).unwrap();
        assert_eq!(cfg.fontsize, 20);
        assert_eq!(cfg.legend, LegendPosition::Inside);
        assert!(!cfg.autosave);
        assert_eq!(cfg.figsize, (1000, 600));
        assert_eq!(cfg.save_dir, PathBuf::from("saved_figs"));
    }

    #[test]
    fn save_then_load() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("style.json");
        let cfg = StyleConfig::default()
            .with_color_blind_mode(true)
            .with_save_dir(dir.path());
        cfg.save_json(&p).unwrap();
        assert_eq!(StyleConfig::from_json_file(&p).unwrap(), cfg);
    }

    #[test]
    fn malformed_json_reports_path() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("broken.json");
        fs::write(&p, "{ not json").unwrap();
        let err = StyleConfig::from_json_file(&p).unwrap_err();
        assert!(format!("{err:#}").contains("broken.json"));
    }
}
