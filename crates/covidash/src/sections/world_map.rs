use super::Section;
use crate::params::DashboardParams;
use covidash_charts::{Cell, ChartKind, ChartSpec, Frame, ENTITY_COLUMN};
use covidash_common::Metric;
use covidash_engine::{rows_on_date, sum_by_entity, Table};

/// Latest cumulative cases per country, shaded on a world map.
pub struct WorldMap;

impl Section for WorldMap {
    fn name(&self) -> &'static str {
        "world_map"
    }

    fn description(&self) -> &'static str {
        "World Map of COVID-19 Cases, Deaths, and Recoveries"
    }

    fn depends_on(&self) -> &'static [&'static str] {
        &[]
    }

    fn build(&self, table: &Table, _params: &DashboardParams) -> Vec<ChartSpec> {
        let metric = Metric::Cases;
        let mut frame = Frame::new([ENTITY_COLUMN, metric.as_str()]);

        if let Some(latest) = table.latest_date() {
            let totals = sum_by_entity(&rows_on_date(table, latest), &[metric]);
            for (entity, sums) in totals {
                let value = sums.get(&metric).copied().unwrap_or(0);
                frame.push_row(vec![Cell::Text(entity), Cell::Int(value)]);
            }
        }

        let spec = ChartSpec::new(
            ChartKind::Choropleth,
            "COVID-19 Cases Heatmap",
            ENTITY_COLUMN,
            metric.as_str(),
            frame,
        )
        .with_label(ENTITY_COLUMN, "Country");
        vec![spec]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::WidgetInput;
    use covidash_common::test_utils::{dataset_fixtures::sample_observations, obs};
    use covidash_config::WidgetsConfig;

    #[test]
    fn test_latest_cases_by_country_name() {
        let mut rows = sample_observations();
        rows.push(obs("Canada", 3, 30, 0, 0));
        let table = Table::new(rows);
        let params =
            DashboardParams::resolve(&WidgetInput::default(), &table, &WidgetsConfig::default())
                .params;

        let spec = &WorldMap.build(&table, &params)[0];
        assert_eq!(spec.kind, ChartKind::Choropleth);
        assert_eq!(
            spec.frame.rows(),
            &[
                vec![Cell::from("Germany"), Cell::Int(262)],
                vec![Cell::from("Italy"), Cell::Int(3089)],
                vec![Cell::from("Spain"), Cell::Int(261)],
            ]
        );
    }
}
