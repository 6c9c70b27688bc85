use super::Section;
use crate::params::DashboardParams;
use covidash_charts::{Cell, ChartKind, ChartSpec, Frame, DATE_COLUMN, ENTITY_COLUMN};
use covidash_engine::{daily_delta, filter_by_entities, top_n, Measure, Table};

/// Daily new counts of the countries with the largest cumulative count on
/// the latest date, one line per country.
pub struct DailyTopCountries;

impl Section for DailyTopCountries {
    fn name(&self) -> &'static str {
        "daily_top_countries"
    }

    fn description(&self) -> &'static str {
        "Daily New COVID-19 Cases, Deaths, and Recoveries for Top N Countries"
    }

    fn depends_on(&self) -> &'static [&'static str] {
        &["daily_top_metric", "daily_top_n"]
    }

    fn build(&self, table: &Table, params: &DashboardParams) -> Vec<ChartSpec> {
        let metric = params.daily_top_metric;
        let measure = Measure::Daily(metric);
        let column = metric.daily_column();
        let with_daily = daily_delta(table, metric);

        let leaders: Vec<String> = with_daily
            .latest_date()
            .map(|latest| {
                top_n(
                    &with_daily,
                    latest,
                    Measure::Cumulative(metric),
                    params.daily_top_n,
                )
            })
            .unwrap_or_default()
            .into_iter()
            .map(|ranked| ranked.entity)
            .collect();
        let selected = filter_by_entities(&with_daily, &leaders);

        let mut frame = Frame::new([DATE_COLUMN, ENTITY_COLUMN, column.as_str()]);
        for (i, row) in selected.rows().iter().enumerate() {
            if let Some(value) = selected.value(i, measure) {
                frame.push_row(vec![
                    Cell::Date(row.date),
                    Cell::from(row.entity.as_str()),
                    Cell::Int(value),
                ]);
            }
        }

        let spec = ChartSpec::new(
            ChartKind::Line,
            format!("Daily {} in Top {} Countries", metric.label(), params.daily_top_n),
            DATE_COLUMN,
            column.as_str(),
            frame,
        )
        .with_color(ENTITY_COLUMN)
        .with_label(DATE_COLUMN, "Date")
        .with_label(column.as_str(), format!("Daily {}", metric.label()))
        .with_label(ENTITY_COLUMN, "Country");
        vec![spec]
    }
}
