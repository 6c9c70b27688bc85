use super::Section;
use crate::params::DashboardParams;
use covidash_charts::{Cell, ChartKind, ChartSpec, Frame, ENTITY_COLUMN};
use covidash_engine::{top_n, Table};
use tracing::debug;

/// Most affected countries on the latest date.
pub struct TopCountries;

impl Section for TopCountries {
    fn name(&self) -> &'static str {
        "top_countries"
    }

    fn description(&self) -> &'static str {
        "Top N Countries by COVID-19 Cases or Deaths"
    }

    fn depends_on(&self) -> &'static [&'static str] {
        &["top_n", "top_metric"]
    }

    fn build(&self, table: &Table, params: &DashboardParams) -> Vec<ChartSpec> {
        let metric = params.top_metric;
        let mut frame = Frame::new([ENTITY_COLUMN, metric.as_str()]);
        let mut title = format!("Top {} Countries by {}", params.top_n, metric.label());

        if let Some(latest) = table.latest_date() {
            for ranked in top_n(table, latest, metric, params.top_n) {
                frame.push_row(vec![Cell::Text(ranked.entity), Cell::Int(ranked.value)]);
            }
            title = format!("{title} (Latest Available Data: {latest})");
        } else {
            debug!("No latest date in an empty table");
        }

        let spec = ChartSpec::new(ChartKind::Bar, title, ENTITY_COLUMN, metric.as_str(), frame)
            .with_color(metric.as_str())
            .with_label(ENTITY_COLUMN, "Country")
            .with_label(metric.as_str(), format!("Total {}", metric.label()));
        vec![spec]
    }
}
