use super::{date_series_frame, Section};
use crate::params::DashboardParams;
use covidash_charts::{ChartKind, ChartSpec, DATE_COLUMN};
use covidash_engine::{filter_by_date_range, sum_by_date, Table};

/// Worldwide cumulative trend of one metric over the chosen date range.
pub struct GlobalTrend;

impl Section for GlobalTrend {
    fn name(&self) -> &'static str {
        "global_trend"
    }

    fn description(&self) -> &'static str {
        "Global COVID-19 Trend"
    }

    fn depends_on(&self) -> &'static [&'static str] {
        &["start", "end", "case_type"]
    }

    fn build(&self, table: &Table, params: &DashboardParams) -> Vec<ChartSpec> {
        let metric = params.case_type;
        let in_range = filter_by_date_range(table, params.start, params.end);
        let totals = sum_by_date(&in_range, metric);

        let spec = ChartSpec::new(
            ChartKind::Line,
            format!("Global {} Trends", metric.label()),
            DATE_COLUMN,
            metric.as_str(),
            date_series_frame(metric.as_str(), &totals),
        )
        .with_label(DATE_COLUMN, "Date")
        .with_label(metric.as_str(), format!("Number of {}", metric.label()));
        vec![spec]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::WidgetInput;
    use covidash_charts::Cell;
    use covidash_common::test_utils::{dataset_fixtures::sample_observations, date};
    use covidash_config::WidgetsConfig;

    #[test]
    fn test_sums_all_countries_within_range() {
        let table = Table::new(sample_observations());
        let input = WidgetInput {
            start: Some(date(2020, 3, 2)),
            end: Some(date(2020, 3, 3)),
            ..WidgetInput::default()
        };
        let resolved = DashboardParams::resolve(&input, &table, &WidgetsConfig::default());

        let specs = GlobalTrend.build(&table, &resolved.params);
        assert_eq!(specs.len(), 1);
        let spec = &specs[0];
        assert_eq!(spec.title, "Global Cases Trends");
        assert_eq!(spec.label_for("cases"), "Number of Cases");
        assert_eq!(
            spec.frame.rows(),
            &[
                vec![Cell::Date(date(2020, 3, 2)), Cell::Int(2315)],
                vec![Cell::Date(date(2020, 3, 3)), Cell::Int(2698)],
            ]
        );
    }
}
