//! Configuration schema definitions using serde.

use covidash_common::{LoggingConfig, Metric};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure.
///
/// Every section has defaults, so an empty file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dataset location.
    pub data: DataConfig,
    /// Where and what the pipeline writes.
    pub output: OutputConfig,
    /// Chart dimensions and theme.
    pub charts: ChartsConfig,
    /// Widget defaults and bounds.
    pub widgets: WidgetsConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Dataset configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path of the JSON dataset produced by the data provider.
    pub path: PathBuf,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving chart specs and images.
    pub dir: PathBuf,
    /// Write each chart spec as JSON.
    pub write_specs: bool,
    /// Render each chart to PNG.
    pub write_images: bool,
}

/// Chart color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChartTheme {
    /// Dark background, light text.
    #[default]
    Dark,
    /// Light background, dark text.
    Light,
}

/// Chart rendering configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartsConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Color theme.
    pub theme: ChartTheme,
}

/// Widget defaults and slider bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetsConfig {
    /// Metric preselected in every metric selector.
    pub default_metric: Metric,
    /// Preselected value of the top-N sliders.
    pub top_n_default: usize,
    /// Lower bound of the top-N sliders.
    pub top_n_min: usize,
    /// Upper bound of the top-N sliders.
    pub top_n_max: usize,
}
