//! Widget values and their validation.

use chrono::NaiveDate;
use covidash_common::Metric;
use covidash_config::WidgetsConfig;
use covidash_engine::Table;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Raw widget values as entered by the user. `None` means "use the default".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetInput {
    /// Trend start date.
    pub start: Option<NaiveDate>,
    /// Trend end date.
    pub end: Option<NaiveDate>,
    /// Metric of the global trend.
    pub case_type: Option<String>,
    /// First compared country.
    pub country1: Option<String>,
    /// Second compared country.
    pub country2: Option<String>,
    /// Size of the top-countries ranking.
    pub top_n: Option<usize>,
    /// Metric of the top-countries ranking.
    pub top_metric: Option<String>,
    /// Metric of the daily global chart.
    pub daily_metric: Option<String>,
    /// Metric of the daily top-countries chart.
    pub daily_top_metric: Option<String>,
    /// Size of the daily top-countries ranking.
    pub daily_top_n: Option<usize>,
    /// Country of the single-country trend.
    pub country: Option<String>,
    /// Metric of the single-country trend.
    pub country_metric: Option<String>,
}

/// A widget value the dashboard cannot use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Widget field name.
    pub field: &'static str,
    /// What is wrong with it.
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Resolved widget values, one per dashboard control.
///
/// Fields named in a [`ValidationIssue`] hold a fallback and must not be
/// used to build charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardParams {
    /// Trend start date.
    pub start: NaiveDate,
    /// Trend end date.
    pub end: NaiveDate,
    /// Metric of the global trend.
    pub case_type: Metric,
    /// First compared country.
    pub country1: String,
    /// Second compared country.
    pub country2: String,
    /// Size of the top-countries ranking.
    pub top_n: usize,
    /// Metric of the top-countries ranking.
    pub top_metric: Metric,
    /// Metric of the daily global chart.
    pub daily_metric: Metric,
    /// Metric of the daily top-countries chart.
    pub daily_top_metric: Metric,
    /// Size of the daily top-countries ranking.
    pub daily_top_n: usize,
    /// Country of the single-country trend.
    pub country: String,
    /// Metric of the single-country trend.
    pub country_metric: Metric,
}

/// Parameters together with everything wrong with the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// Usable values, with fallbacks where input was invalid.
    pub params: DashboardParams,
    /// Input violations in field order.
    pub issues: Vec<ValidationIssue>,
}

impl Resolved {
    /// Issues touching any of `fields`.
    #[must_use]
    pub fn issues_for(&self, fields: &[&str]) -> Vec<&ValidationIssue> {
        self.issues
            .iter()
            .filter(|issue| fields.contains(&issue.field))
            .collect()
    }
}

impl DashboardParams {
    /// Fills defaults from the table and widget config, then validates.
    ///
    /// Dates default to the table's bounds, countries to the first distinct
    /// entities, metrics to the configured default and slider values to
    /// the configured default.
    #[must_use]
    pub fn resolve(input: &WidgetInput, table: &Table, widgets: &WidgetsConfig) -> Resolved {
        let entities = table.entities();
        let (first_date, last_date) = table.date_bounds().unwrap_or_default();
        let mut check = Checker {
            issues: Vec::new(),
            entities: &entities,
            widgets,
        };

        let start = input.start.unwrap_or(first_date);
        let end = input.end.unwrap_or(last_date);
        if start > end {
            check.issue("start", "Start date must be before end date.".to_string());
        }

        let first_entity = entities.first().copied().unwrap_or_default();
        let second_entity = entities.get(1).copied().unwrap_or(first_entity);
        let ranking_default = match widgets.default_metric {
            Metric::Recovered => Metric::Cases,
            metric => metric,
        };

        let params = Self {
            start,
            end,
            case_type: check.metric("case_type", input.case_type.as_deref()),
            country1: check.country("country1", input.country1.as_deref(), first_entity),
            country2: check.country("country2", input.country2.as_deref(), second_entity),
            top_n: check.top_n("top_n", input.top_n),
            top_metric: check.ranking_metric(
                "top_metric",
                input.top_metric.as_deref(),
                ranking_default,
            ),
            daily_metric: check.metric("daily_metric", input.daily_metric.as_deref()),
            daily_top_metric: check.metric("daily_top_metric", input.daily_top_metric.as_deref()),
            daily_top_n: check.top_n("daily_top_n", input.daily_top_n),
            country: check.country("country", input.country.as_deref(), first_entity),
            country_metric: check.metric("country_metric", input.country_metric.as_deref()),
        };

        debug!(issues = check.issues.len(), "Resolved dashboard parameters");
        Resolved {
            params,
            issues: check.issues,
        }
    }
}

struct Checker<'a> {
    issues: Vec<ValidationIssue>,
    entities: &'a [&'a str],
    widgets: &'a WidgetsConfig,
}

impl Checker<'_> {
    fn issue(&mut self, field: &'static str, message: String) {
        self.issues.push(ValidationIssue { field, message });
    }

    fn metric(&mut self, field: &'static str, value: Option<&str>) -> Metric {
        match value.map(str::parse::<Metric>) {
            None => self.widgets.default_metric,
            Some(Ok(metric)) => metric,
            Some(Err(err)) => {
                self.issue(field, err.to_string());
                self.widgets.default_metric
            }
        }
    }

    fn ranking_metric(&mut self, field: &'static str, value: Option<&str>, default: Metric) -> Metric {
        let Some(raw) = value else {
            return default;
        };
        match raw.parse::<Metric>() {
            Ok(metric @ (Metric::Cases | Metric::Deaths)) => metric,
            Ok(other) => {
                self.issue(field, format!("{other} cannot be ranked; choose cases or deaths"));
                default
            }
            Err(err) => {
                self.issue(field, err.to_string());
                default
            }
        }
    }

    fn top_n(&mut self, field: &'static str, value: Option<usize>) -> usize {
        let (min, max) = (self.widgets.top_n_min, self.widgets.top_n_max);
        let n = value.unwrap_or(self.widgets.top_n_default);
        if !(min..=max).contains(&n) {
            self.issue(field, format!("{n} is outside {min}..={max}"));
        }
        n
    }

    fn country(&mut self, field: &'static str, value: Option<&str>, default: &str) -> String {
        let name = value.map_or(default, str::trim);
        if self.entities.is_empty() {
            self.issue(field, "the dataset has no countries".to_string());
        } else if !self.entities.contains(&name) {
            self.issue(field, format!("unknown country '{name}'"));
        }
        name.to_string()
    }
}
