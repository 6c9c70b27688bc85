//! Property tests for the aggregation engine.

use chrono::Duration;
use covidash_common::test_utils::date;
use covidash_common::test_utils::property_testing::{day_offset_strategy, observations_strategy};
use covidash_common::Metric;
use covidash_engine::{
    daily_delta, filter_by_date_range, sum_by_date, sum_by_entity, top_n, Measure, Table,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn sum_by_date_ignores_row_order(
        (rows, shuffled) in observations_strategy()
            .prop_flat_map(|rows| (Just(rows.clone()), Just(rows).prop_shuffle()))
    ) {
        let ordered = Table::new(rows);
        let shuffled = Table::new(shuffled);
        for metric in Metric::ALL {
            prop_assert_eq!(sum_by_date(&ordered, metric), sum_by_date(&shuffled, metric));
        }
    }

    #[test]
    fn sum_by_entity_ignores_row_order(
        (rows, shuffled) in observations_strategy()
            .prop_flat_map(|rows| (Just(rows.clone()), Just(rows).prop_shuffle()))
    ) {
        prop_assert_eq!(
            sum_by_entity(&Table::new(rows), &Metric::ALL),
            sum_by_entity(&Table::new(shuffled), &Metric::ALL)
        );
    }

    #[test]
    fn date_filter_is_subset_and_idempotent(
        rows in observations_strategy(),
        a in day_offset_strategy(),
        b in day_offset_strategy(),
    ) {
        let start = date(2020, 1, 22) + Duration::days(a.min(b));
        let end = date(2020, 1, 22) + Duration::days(a.max(b));
        let table = Table::new(rows);

        let once = filter_by_date_range(&table, start, end);
        prop_assert!(once.len() <= table.len());
        prop_assert!(once.rows().iter().all(|row| start <= row.date && row.date <= end));
        prop_assert!(once.rows().iter().all(|row| table.rows().contains(row)));

        let twice = filter_by_date_range(&once, start, end);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn daily_delta_keeps_rows_and_zeroes_first_dates(rows in observations_strategy()) {
        let table = Table::new(rows);
        let out = daily_delta(&table, Metric::Cases);

        prop_assert_eq!(out.rows(), table.rows());
        let deltas = out.derived_column("daily_cases").unwrap();
        prop_assert_eq!(deltas.len(), table.len());

        for (i, row) in table.rows().iter().enumerate() {
            let earliest = table
                .rows()
                .iter()
                .filter(|other| other.entity == row.entity)
                .all(|other| other.date >= row.date);
            if earliest {
                prop_assert_eq!(deltas[i], 0);
            }
        }
    }

    #[test]
    fn daily_deltas_sum_to_last_minus_first(rows in observations_strategy()) {
        let table = Table::new(rows);
        let out = daily_delta(&table, Metric::Deaths);

        for entity in table.entities() {
            let mut own: Vec<_> = out
                .rows()
                .iter()
                .enumerate()
                .filter(|(_, row)| row.entity == entity)
                .collect();
            own.sort_by_key(|(_, row)| row.date);
            let first = i64::try_from(own[0].1.deaths).unwrap();
            let last = i64::try_from(own[own.len() - 1].1.deaths).unwrap();
            let total: i64 = own
                .iter()
                .map(|(i, _)| out.value(*i, Measure::Daily(Metric::Deaths)).unwrap())
                .sum();
            prop_assert_eq!(total, last - first);
        }
    }

    #[test]
    fn top_n_is_bounded_and_descending(
        rows in observations_strategy(),
        day in day_offset_strategy(),
        n in 0usize..8,
    ) {
        let table = Table::new(rows);
        let ranking = top_n(&table, date(2020, 1, 22) + Duration::days(day), Metric::Cases, n);
        prop_assert!(ranking.len() <= n);
        prop_assert!(ranking.windows(2).all(|pair| pair[0].value >= pair[1].value));
    }
}
