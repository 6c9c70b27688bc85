//! Sums grouped by date or by entity.

use crate::table::{saturate_i128, saturate_u64, Measure, Table};
use chrono::NaiveDate;
use covidash_common::Metric;
use std::collections::BTreeMap;
use tracing::debug;

/// Per-metric totals of one entity.
pub type MetricTotals = BTreeMap<Metric, i64>;

/// Sums `measure` over all rows of each date, ascending by date.
///
/// Dates without rows do not appear; nothing is zero-filled. Rows without a
/// value for the measure (a daily column that was never computed) are
/// skipped.
#[must_use]
pub fn sum_by_date(table: &Table, measure: impl Into<Measure>) -> Vec<(NaiveDate, i64)> {
    let measure = measure.into();
    let mut totals: BTreeMap<NaiveDate, i128> = BTreeMap::new();

    for (i, row) in table.rows().iter().enumerate() {
        if let Some(value) = table.value(i, measure) {
            *totals.entry(row.date).or_insert(0) += i128::from(value);
        }
    }

    debug!(%measure, dates = totals.len(), rows = table.len(), "Summed by date");
    totals
        .into_iter()
        .map(|(date, total)| (date, saturate_i128(total)))
        .collect()
}

/// Sums each of `metrics` over all rows of each entity, keyed by entity name.
///
/// Restrict the table to the entities of interest before calling.
#[must_use]
pub fn sum_by_entity(table: &Table, metrics: &[Metric]) -> BTreeMap<String, MetricTotals> {
    let mut totals: BTreeMap<&str, BTreeMap<Metric, i128>> = BTreeMap::new();

    for row in table.rows() {
        let entry = totals.entry(row.entity.as_str()).or_default();
        for &metric in metrics {
            *entry.entry(metric).or_insert(0) += i128::from(saturate_u64(row.value(metric)));
        }
    }

    debug!(entities = totals.len(), metrics = metrics.len(), "Summed by entity");
    totals
        .into_iter()
        .map(|(entity, sums)| {
            let sums = sums
                .into_iter()
                .map(|(metric, total)| (metric, saturate_i128(total)))
                .collect();
            (entity.to_string(), sums)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delta::daily_delta;
    use crate::filter::filter_by_entities;
    use covidash_common::test_utils::{dataset_fixtures::sample_observations, date};

    #[test]
    fn test_sum_by_date() {
        let table = Table::new(sample_observations());
        let sums = sum_by_date(&table, Metric::Cases);
        assert_eq!(
            sums,
            vec![
                (date(2020, 3, 1), 1694 + 84 + 130),
                (date(2020, 3, 2), 2036 + 120 + 159),
                (date(2020, 3, 3), 2502 + 196),
                (date(2020, 3, 4), 3089 + 261 + 262),
            ]
        );
    }

    #[test]
    fn test_sum_by_date_of_daily_column() {
        let table = daily_delta(&Table::new(sample_observations()), Metric::Cases);
        let sums = sum_by_date(&table, Measure::Daily(Metric::Cases));
        assert_eq!(sums[0], (date(2020, 3, 1), 0));
        // Spain has no row on day 3, so its day-4 delta spans two days.
        assert_eq!(sums[3], (date(2020, 3, 4), 587 + 141 + 66));
    }

    #[test]
    fn test_sum_by_date_without_daily_column_is_empty() {
        let table = Table::new(sample_observations());
        assert!(sum_by_date(&table, Measure::Daily(Metric::Deaths)).is_empty());
    }

    #[test]
    fn test_sum_by_entity() {
        let table = filter_by_entities(&Table::new(sample_observations()), &["Italy", "Spain"]);
        let totals = sum_by_entity(&table, &Metric::ALL);

        assert_eq!(totals.keys().collect::<Vec<_>>(), vec!["Italy", "Spain"]);
        assert_eq!(totals["Italy"][&Metric::Cases], 1694 + 2036 + 2502 + 3089);
        assert_eq!(totals["Spain"][&Metric::Deaths], 3);
        assert_eq!(totals["Spain"][&Metric::Recovered], 6);
    }

    #[test]
    fn test_sum_by_entity_only_requested_metrics() {
        let table = Table::new(sample_observations());
        let totals = sum_by_entity(&table, &[Metric::Deaths]);
        assert!(totals.values().all(|sums| sums.len() == 1));
    }

    #[test]
    fn test_sums_of_empty_table() {
        assert!(sum_by_date(&Table::default(), Metric::Cases).is_empty());
        assert!(sum_by_entity(&Table::default(), &Metric::ALL).is_empty());
    }
}
