//! Runtime validation of a loaded configuration.

use crate::loader::ConfigError;
use crate::schema::Config;

/// Smallest chart edge that still leaves room for axes and a caption.
pub const MIN_CHART_EDGE: u32 = 200;

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data.path.as_os_str().is_empty() {
            return Err(ConfigError::validation("data.path", "must not be empty"));
        }

        if self.output.dir.as_os_str().is_empty() {
            return Err(ConfigError::validation("output.dir", "must not be empty"));
        }

        if self.charts.width < MIN_CHART_EDGE || self.charts.height < MIN_CHART_EDGE {
            return Err(ConfigError::validation(
                "charts",
                format!("width and height must be at least {MIN_CHART_EDGE} pixels"),
            ));
        }

        let widgets = &self.widgets;
        if widgets.top_n_min > widgets.top_n_max {
            return Err(ConfigError::validation(
                "widgets.top_n_min",
                "must not exceed widgets.top_n_max",
            ));
        }
        if !(widgets.top_n_min..=widgets.top_n_max).contains(&widgets.top_n_default) {
            return Err(ConfigError::validation(
                "widgets.top_n_default",
                format!(
                    "must lie within {}..={}",
                    widgets.top_n_min, widgets.top_n_max
                ),
            ));
        }

        Ok(())
    }
}
