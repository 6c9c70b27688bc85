//! Row filters. Each keeps input order and carries derived columns along.

use crate::table::Table;
use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::debug;

/// Rows with `start <= date <= end`, both ends inclusive.
///
/// The caller guarantees `start <= end`; an inverted range matches nothing.
#[must_use]
pub fn filter_by_date_range(table: &Table, start: NaiveDate, end: NaiveDate) -> Table {
    let filtered = table.select(|row| start <= row.date && row.date <= end);
    debug!(%start, %end, kept = filtered.len(), of = table.len(), "Filtered by date range");
    filtered
}

/// Rows whose entity is one of `entities`.
#[must_use]
pub fn filter_by_entities<S: AsRef<str>>(table: &Table, entities: &[S]) -> Table {
    let wanted: HashSet<&str> = entities.iter().map(AsRef::as_ref).collect();
    let filtered = table.select(|row| wanted.contains(row.entity.as_str()));
    debug!(entities = wanted.len(), kept = filtered.len(), "Filtered by entity");
    filtered
}

/// Rows observed exactly on `date`. No nearest-date fallback.
#[must_use]
pub fn rows_on_date(table: &Table, date: NaiveDate) -> Table {
    table.select(|row| row.date == date)
}
