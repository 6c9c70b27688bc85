//! Default values for every configuration section.

use crate::schema::*;
use covidash_common::{LoggingConfig, Metric};
use std::path::PathBuf;

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            output: OutputConfig::default(),
            charts: ChartsConfig::default(),
            widgets: WidgetsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("covid_data/jhu.json"),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("dashboard"),
            write_specs: true,
            write_images: true,
        }
    }
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            theme: ChartTheme::Dark,
        }
    }
}

impl Default for WidgetsConfig {
    fn default() -> Self {
        Self {
            default_metric: Metric::Cases,
            top_n_default: 10,
            top_n_min: 5,
            top_n_max: 20,
        }
    }
}
