use super::{date_series_frame, Section};
use crate::params::DashboardParams;
use covidash_charts::{ChartKind, ChartSpec, DATE_COLUMN};
use covidash_engine::{daily_delta, sum_by_date, Measure, Table};

/// Worldwide daily new counts over the whole dataset.
pub struct DailyGlobal;

impl Section for DailyGlobal {
    fn name(&self) -> &'static str {
        "daily_global"
    }

    fn description(&self) -> &'static str {
        "Daily New COVID-19 Cases, Deaths, and Recoveries"
    }

    fn depends_on(&self) -> &'static [&'static str] {
        &["daily_metric"]
    }

    fn build(&self, table: &Table, params: &DashboardParams) -> Vec<ChartSpec> {
        let metric = params.daily_metric;
        let column = metric.daily_column();
        let with_daily = daily_delta(table, metric);
        let totals = sum_by_date(&with_daily, Measure::Daily(metric));

        let spec = ChartSpec::new(
            ChartKind::Line,
            format!("Daily {} Over Time", metric.label()),
            DATE_COLUMN,
            column.as_str(),
            date_series_frame(&column, &totals),
        )
        .with_label(DATE_COLUMN, "Date")
        .with_label(column.as_str(), format!("Daily {}", metric.label()));
        vec![spec]
    }
}
