//! First differences of cumulative counters.

use crate::table::{saturate_u64, Table};
use covidash_common::Metric;
use tracing::{debug, instrument};

/// First differences of a single series.
///
/// `delta[0]` is 0 (no prior baseline) and `delta[i] = value[i] - value[i-1]`.
/// Negative deltas are kept as they are: they record data corrections.
/// An empty series yields an empty result.
#[must_use]
pub fn diff_series(values: &[i64]) -> Vec<i64> {
    if values.is_empty() {
        return Vec::new();
    }

    std::iter::once(0)
        .chain(values.windows(2).map(|pair| pair[1].saturating_sub(pair[0])))
        .collect()
}

/// Adds the `daily_<metric>` column: per entity, the difference to the same
/// entity's previous observed date.
///
/// Rows are ordered by date within each entity before differencing, so the
/// input may come in any order. The first row of every entity gets 0. The
/// returned table keeps the input row order; only the derived column is new.
/// An existing column of the same name is replaced.
#[must_use]
#[instrument(skip(table), fields(rows = table.len()))]
pub fn daily_delta(table: &Table, metric: Metric) -> Table {
    let rows = table.rows();
    let mut deltas = vec![0_i64; rows.len()];

    let index = table.entity_index();
    for (_, entity_rows) in index.groups() {
        let mut by_date = entity_rows.to_vec();
        by_date.sort_by_key(|&i| rows[i].date);

        let values: Vec<i64> = by_date
            .iter()
            .map(|&i| saturate_u64(rows[i].value(metric)))
            .collect();

        for (&row, delta) in by_date.iter().zip(diff_series(&values)) {
            deltas[row] = delta;
        }
    }

    let column = metric.daily_column();
    debug!(column = %column, entities = index.groups().count(), "Computed daily deltas");
    table.clone().with_derived_column(column, deltas)
}
