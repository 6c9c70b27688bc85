use super::Section;
use crate::params::DashboardParams;
use covidash_charts::{Cell, ChartKind, ChartSpec, Frame, ENTITY_COLUMN};
use covidash_common::Metric;
use covidash_engine::{filter_by_entities, sum_by_entity, Table};

/// Two countries side by side: one pie per metric.
///
/// Totals add up every row of each country over the whole dataset; the
/// date range does not apply here.
pub struct CountryComparison;

impl Section for CountryComparison {
    fn name(&self) -> &'static str {
        "country_comparison"
    }

    fn description(&self) -> &'static str {
        "Comparative Analysis of COVID-19 Cases Between Countries"
    }

    fn depends_on(&self) -> &'static [&'static str] {
        &["country1", "country2"]
    }

    fn build(&self, table: &Table, params: &DashboardParams) -> Vec<ChartSpec> {
        let selected = filter_by_entities(table, &[&params.country1, &params.country2]);
        let totals = sum_by_entity(&selected, &Metric::ALL);

        Metric::ALL
            .into_iter()
            .map(|metric| {
                let mut frame = Frame::new([ENTITY_COLUMN, metric.as_str()]);
                for (entity, sums) in &totals {
                    let value = sums.get(&metric).copied().unwrap_or(0);
                    frame.push_row(vec![Cell::from(entity.as_str()), Cell::Int(value)]);
                }
                ChartSpec::new(
                    ChartKind::Pie,
                    format!("Total {} Comparison", metric.label()),
                    ENTITY_COLUMN,
                    metric.as_str(),
                    frame,
                )
            })
            .collect()
    }
}
