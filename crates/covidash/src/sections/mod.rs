//! Dashboard sections. Each turns the table and parameters into charts.

use crate::params::{DashboardParams, ValidationIssue};
use chrono::NaiveDate;
use covidash_charts::{Cell, ChartKind, ChartSpec, Frame, COUNT_COLUMN, DATE_COLUMN};
use covidash_engine::Table;

mod country_comparison;
mod country_trend;
mod daily_global;
mod daily_top_countries;
mod global_trend;
mod top_countries;
mod world_map;

pub use country_comparison::CountryComparison;
pub use country_trend::CountryTrend;
pub use daily_global::DailyGlobal;
pub use daily_top_countries::DailyTopCountries;
pub use global_trend::GlobalTrend;
pub use top_countries::TopCountries;
pub use world_map::WorldMap;

/// One dashboard panel.
pub trait Section: Send + Sync {
    /// Stable name, used in output file names.
    fn name(&self) -> &'static str;

    /// Heading shown above the panel.
    fn description(&self) -> &'static str;

    /// Widget fields this section reads. An issue on any of them replaces
    /// the section's charts with a placeholder.
    fn depends_on(&self) -> &'static [&'static str];

    /// Builds the section's charts.
    fn build(&self, table: &Table, params: &DashboardParams) -> Vec<ChartSpec>;
}

/// Every section in dashboard order.
#[must_use]
pub fn all() -> Vec<Box<dyn Section>> {
    vec![
        Box::new(GlobalTrend),
        Box::new(CountryComparison),
        Box::new(TopCountries),
        Box::new(DailyGlobal),
        Box::new(DailyTopCountries),
        Box::new(CountryTrend),
        Box::new(WorldMap),
    ]
}

/// Empty chart standing in for a section blocked by invalid input. Its
/// title carries the issues; the renderer draws it as "No data".
#[must_use]
pub fn placeholder(section: &dyn Section, issues: &[&ValidationIssue]) -> ChartSpec {
    let reasons: Vec<String> = issues.iter().map(ToString::to_string).collect();
    ChartSpec::new(
        ChartKind::Line,
        format!("{} unavailable ({})", section.description(), reasons.join("; ")),
        DATE_COLUMN,
        COUNT_COLUMN,
        Frame::new([DATE_COLUMN, COUNT_COLUMN]),
    )
}

/// Two-column frame of a date series.
fn date_series_frame(value_column: &str, series: &[(NaiveDate, i64)]) -> Frame {
    let mut frame = Frame::new([DATE_COLUMN, value_column]);
    for &(date, value) in series {
        frame.push_row(vec![Cell::Date(date), Cell::Int(value)]);
    }
    frame
}
