//! Command-line interface.

use crate::params::WidgetInput;
use chrono::NaiveDate;
use clap::Parser;
use covidash_config::Config;
use std::path::PathBuf;

/// Builds the COVID-19 dashboard charts from a local dataset.
#[derive(Debug, Clone, Parser)]
#[command(name = "covidash", version, about)]
pub struct Cli {
    /// Configuration file (YAML or TOML).
    #[arg(short, long, env = "COVIDASH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Dataset file, overriding `data.path`.
    #[arg(long, env = "COVIDASH_DATA_PATH")]
    pub data: Option<PathBuf>,

    /// Output directory, overriding `output.dir`.
    #[arg(long, env = "COVIDASH_OUTPUT_DIR")]
    pub out: Option<PathBuf>,

    /// Trend start date (YYYY-MM-DD); defaults to the first date in the data.
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Trend end date (YYYY-MM-DD); defaults to the last date in the data.
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Metric of the global trend.
    #[arg(long)]
    pub case_type: Option<String>,

    /// First compared country.
    #[arg(long)]
    pub country1: Option<String>,

    /// Second compared country.
    #[arg(long)]
    pub country2: Option<String>,

    /// Number of top countries.
    #[arg(long)]
    pub top_n: Option<usize>,

    /// Metric ranking the top countries (cases or deaths).
    #[arg(long)]
    pub top_metric: Option<String>,

    /// Metric of the daily global chart.
    #[arg(long)]
    pub daily_metric: Option<String>,

    /// Metric of the daily top-countries chart.
    #[arg(long)]
    pub daily_top_metric: Option<String>,

    /// Number of countries in the daily top-countries chart.
    #[arg(long)]
    pub daily_top_n: Option<usize>,

    /// Country of the single-country trend.
    #[arg(long)]
    pub country: Option<String>,

    /// Metric of the single-country trend.
    #[arg(long)]
    pub country_metric: Option<String>,

    /// Log level, overriding `logging.level`.
    #[arg(long, env = "COVIDASH_LOG_LEVEL")]
    pub log_level: Option<String>,
}

impl Cli {
    /// The widget values given on the command line.
    #[must_use]
    pub fn widget_input(&self) -> WidgetInput {
        WidgetInput {
            start: self.start,
            end: self.end,
            case_type: self.case_type.clone(),
            country1: self.country1.clone(),
            country2: self.country2.clone(),
            top_n: self.top_n,
            top_metric: self.top_metric.clone(),
            daily_metric: self.daily_metric.clone(),
            daily_top_metric: self.daily_top_metric.clone(),
            daily_top_n: self.daily_top_n,
            country: self.country.clone(),
            country_metric: self.country_metric.clone(),
        }
    }

    /// Applies path and log-level flags on top of the loaded configuration.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(data) = &self.data {
            config.data.path.clone_from(data);
        }
        if let Some(out) = &self.out {
            config.output.dir.clone_from(out);
        }
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use covidash_common::test_utils::date;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_widget_flags() {
        let cli = Cli::try_parse_from([
            "covidash",
            "--start",
            "2020-03-01",
            "--top-n",
            "15",
            "--country1",
            "Italy",
            "--daily-top-metric",
            "deaths",
        ])
        .unwrap();
        let input = cli.widget_input();

        assert_eq!(input.start, Some(date(2020, 3, 1)));
        assert_eq!(input.end, None);
        assert_eq!(input.top_n, Some(15));
        assert_eq!(input.country1.as_deref(), Some("Italy"));
        assert_eq!(input.daily_top_metric.as_deref(), Some("deaths"));
    }

    #[test]
    fn test_bad_date_is_rejected() {
        assert!(Cli::try_parse_from(["covidash", "--end", "March 4"]).is_err());
    }

    #[test]
    fn test_apply_to_config() {
        let cli = Cli::try_parse_from([
            "covidash",
            "--data",
            "/tmp/jhu.json",
            "--out",
            "/tmp/charts",
            "--log-level",
            "debug",
        ])
        .unwrap();
        let mut config = Config::default();
        cli.apply_to(&mut config);

        assert_eq!(config.data.path, PathBuf::from("/tmp/jhu.json"));
        assert_eq!(config.output.dir, PathBuf::from("/tmp/charts"));
        assert_eq!(config.logging.level, "debug");
    }
}
