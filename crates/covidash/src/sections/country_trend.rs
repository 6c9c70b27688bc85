use super::Section;
use crate::params::DashboardParams;
use covidash_charts::{Cell, ChartKind, ChartSpec, Frame, COUNT_COLUMN, COUNT_TYPE_COLUMN, DATE_COLUMN};
use covidash_engine::{entity_trend, Table};

/// One country's cumulative series next to its daily new counts.
pub struct CountryTrend;

impl Section for CountryTrend {
    fn name(&self) -> &'static str {
        "country_trend"
    }

    fn description(&self) -> &'static str {
        "COVID-19 Trends for a Selected Country"
    }

    fn depends_on(&self) -> &'static [&'static str] {
        &["country", "country_metric"]
    }

    fn build(&self, table: &Table, params: &DashboardParams) -> Vec<ChartSpec> {
        let metric = params.country_metric;
        let trend = entity_trend(table, &params.country, metric);

        let mut frame = Frame::new([DATE_COLUMN, COUNT_TYPE_COLUMN, COUNT_COLUMN]);
        for row in trend.melt() {
            frame.push_row(vec![Cell::Date(row.date), Cell::Text(row.series), Cell::Int(row.count)]);
        }

        let spec = ChartSpec::new(
            ChartKind::Line,
            format!("COVID-19 {} Trends in {}", metric.label(), params.country),
            DATE_COLUMN,
            COUNT_COLUMN,
            frame,
        )
        .with_color(COUNT_TYPE_COLUMN)
        .with_label(DATE_COLUMN, "Date")
        .with_label(COUNT_COLUMN, "Number of Cases")
        .with_label(COUNT_TYPE_COLUMN, "Type");
        vec![spec]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::WidgetInput;
    use covidash_common::test_utils::{dataset_fixtures::sample_observations, date};
    use covidash_config::WidgetsConfig;

    #[test]
    fn test_melted_frame() {
        let table = Table::new(sample_observations());
        let input = WidgetInput {
            country: Some("Germany".to_string()),
            country_metric: Some("recovered".to_string()),
            ..WidgetInput::default()
        };
        let params = DashboardParams::resolve(&input, &table, &WidgetsConfig::default()).params;

        let spec = &CountryTrend.build(&table, &params)[0];
        assert_eq!(spec.title, "COVID-19 Recovered Trends in Germany");
        assert_eq!(spec.frame.len(), 8);
        assert_eq!(
            spec.frame.rows()[7],
            vec![
                Cell::Date(date(2020, 3, 4)),
                Cell::from("new_recovered"),
                Cell::Int(2),
            ]
        );
        assert_eq!(spec.frame.rows()[0][1], Cell::from("recovered"));
    }
}
