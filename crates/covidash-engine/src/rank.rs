//! Top-N entity ranking at a single date.

use crate::table::{saturate_i128, Measure, Table};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::debug;

/// One entry of a ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntity {
    /// Entity name.
    pub entity: String,
    /// Summed measure at the ranked date.
    pub value: i64,
}

/// The `n` entities with the largest `measure` on exactly `date`.
///
/// Values are summed per entity among the rows of that date. The order is
/// descending by value; ties keep the order in which the entities first
/// appear in the table. A date with no rows gives an empty ranking, as
/// does `n == 0`.
#[must_use]
pub fn top_n(
    table: &Table,
    date: NaiveDate,
    measure: impl Into<Measure>,
    n: usize,
) -> Vec<RankedEntity> {
    if n == 0 {
        return Vec::new();
    }

    let measure = measure.into();
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut sums: Vec<(&str, i128)> = Vec::new();

    for (i, row) in table.rows().iter().enumerate() {
        if row.date != date {
            continue;
        }
        let Some(value) = table.value(i, measure) else {
            continue;
        };
        match slots.entry(row.entity.as_str()) {
            Entry::Occupied(slot) => sums[*slot.get()].1 += i128::from(value),
            Entry::Vacant(slot) => {
                slot.insert(sums.len());
                sums.push((row.entity.as_str(), i128::from(value)));
            }
        }
    }

    // `sort_by` is stable, which gives the first-seen tie-break.
    sums.sort_by(|a, b| b.1.cmp(&a.1));
    sums.truncate(n);

    debug!(%date, %measure, n, ranked = sums.len(), "Ranked entities");
    sums.into_iter()
        .map(|(entity, value)| RankedEntity {
            entity: entity.to_string(),
            value: saturate_i128(value),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delta::daily_delta;
    use covidash_common::test_utils::{dataset_fixtures::sample_observations, date, obs};
    use covidash_common::Metric;

    fn names(ranking: &[RankedEntity]) -> Vec<&str> {
        ranking.iter().map(|r| r.entity.as_str()).collect()
    }

    #[test]
    fn test_top_n_ties_keep_input_order() {
        let table = Table::new(vec![
            obs("A", 5, 50, 0, 0),
            obs("B", 5, 80, 0, 0),
            obs("C", 5, 80, 0, 0),
            obs("D", 5, 10, 0, 0),
        ]);
        let ranking = top_n(&table, date(2020, 3, 5), Metric::Cases, 3);
        assert_eq!(names(&ranking), vec!["B", "C", "A"]);
        assert_eq!(ranking[0].value, 80);
    }

    #[test]
    fn test_top_n_zero_is_empty() {
        let table = Table::new(sample_observations());
        assert!(top_n(&table, date(2020, 3, 4), Metric::Cases, 0).is_empty());
    }

    #[test]
    fn test_top_n_exact_date_only() {
        let table = Table::new(sample_observations());
        assert!(top_n(&table, date(2020, 3, 5), Metric::Cases, 10).is_empty());

        // Spain has no row on day 3 and must not be ranked there.
        let ranking = top_n(&table, date(2020, 3, 3), Metric::Cases, 10);
        assert_eq!(names(&ranking), vec!["Italy", "Germany"]);
    }

    #[test]
    fn test_top_n_sums_duplicate_rows() {
        let mut hubei = obs("China", 1, 100, 0, 0);
        hubei.province = Some("Hubei".to_string());
        let mut beijing = obs("China", 1, 30, 0, 0);
        beijing.province = Some("Beijing".to_string());
        let table = Table::new(vec![hubei, obs("Iran", 1, 120, 0, 0), beijing]);

        let ranking = top_n(&table, date(2020, 3, 1), Metric::Cases, 5);
        assert_eq!(
            ranking,
            vec![
                RankedEntity { entity: "China".to_string(), value: 130 },
                RankedEntity { entity: "Iran".to_string(), value: 120 },
            ]
        );
    }

    #[test]
    fn test_top_n_by_daily_column() {
        let table = daily_delta(&Table::new(sample_observations()), Metric::Cases);
        let ranking = top_n(&table, date(2020, 3, 4), Measure::Daily(Metric::Cases), 2);
        assert_eq!(names(&ranking), vec!["Italy", "Spain"]);
        assert_eq!(ranking[1].value, 141);
    }

    #[test]
    fn test_top_n_n_larger_than_entities() {
        let table = Table::new(sample_observations());
        let ranking = top_n(&table, date(2020, 3, 4), Metric::Deaths, 20);
        assert_eq!(names(&ranking), vec!["Italy", "Spain", "Germany"]);
    }
}
