//! The in-memory observation table and its per-entity index.

use chrono::NaiveDate;
use covidash_common::{Metric, Observation};
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// What to read from a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measure {
    /// The cumulative counter itself, column `<metric>`.
    Cumulative(Metric),
    /// The derived difference column `daily_<metric>` added by
    /// [`daily_delta`](crate::daily_delta).
    Daily(Metric),
}

impl Measure {
    /// Column name this measure reads.
    #[must_use]
    pub fn column_name(self) -> String {
        match self {
            Self::Cumulative(metric) => metric.as_str().to_string(),
            Self::Daily(metric) => metric.daily_column(),
        }
    }

    /// The underlying metric.
    #[must_use]
    pub const fn metric(self) -> Metric {
        match self {
            Self::Cumulative(metric) | Self::Daily(metric) => metric,
        }
    }
}

impl From<Metric> for Measure {
    fn from(metric: Metric) -> Self {
        Self::Cumulative(metric)
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.column_name())
    }
}

/// An ordered sequence of observations plus derived integer columns.
///
/// Every derived column holds exactly one value per row. Tables are values:
/// operations borrow a table and return a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Observation>,
    derived: BTreeMap<String, Vec<i64>>,
}

impl Table {
    /// Wraps rows in their given order.
    #[must_use]
    pub fn new(rows: Vec<Observation>) -> Self {
        Self {
            rows,
            derived: BTreeMap::new(),
        }
    }

    /// The rows, in table order.
    #[must_use]
    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of a derived column, aligned with [`rows`](Self::rows).
    #[must_use]
    pub fn derived_column(&self, name: &str) -> Option<&[i64]> {
        self.derived.get(name).map(Vec::as_slice)
    }

    /// Names of the derived columns, sorted.
    pub fn derived_columns(&self) -> impl Iterator<Item = &str> {
        self.derived.keys().map(String::as_str)
    }

    /// Sets a derived column, replacing any column of the same name.
    pub(crate) fn with_derived_column(mut self, name: String, values: Vec<i64>) -> Self {
        debug_assert_eq!(values.len(), self.rows.len());
        self.derived.insert(name, values);
        self
    }

    /// Reads `measure` at row `index`. `None` when the row does not exist or
    /// the measure's derived column has not been computed.
    #[must_use]
    pub fn value(&self, index: usize, measure: Measure) -> Option<i64> {
        match measure {
            Measure::Cumulative(metric) => self
                .rows
                .get(index)
                .map(|row| saturate_u64(row.value(metric))),
            Measure::Daily(metric) => self
                .derived
                .get(&metric.daily_column())
                .and_then(|column| column.get(index).copied()),
        }
    }

    /// Keeps the rows matching `predicate`, in order, together with their
    /// derived values.
    #[must_use]
    pub fn select<F>(&self, predicate: F) -> Self
    where
        F: Fn(&Observation) -> bool,
    {
        let kept: Vec<usize> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| predicate(row))
            .map(|(i, _)| i)
            .collect();

        let rows = kept.iter().map(|&i| self.rows[i].clone()).collect();
        let derived = self
            .derived
            .iter()
            .map(|(name, values)| (name.clone(), kept.iter().map(|&i| values[i]).collect()))
            .collect();

        Self { rows, derived }
    }

    /// Distinct entity names in first-seen order.
    #[must_use]
    pub fn entities(&self) -> Vec<&str> {
        self.entity_index().names().collect()
    }

    /// Earliest and latest date, or `None` for an empty table.
    #[must_use]
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.rows.first()?.date;
        Some(self.rows.iter().fold((first, first), |(lo, hi), row| {
            (lo.min(row.date), hi.max(row.date))
        }))
    }

    /// Latest date present in the table.
    #[must_use]
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.rows.iter().map(|row| row.date).max()
    }

    /// Groups row indices by entity.
    pub(crate) fn entity_index(&self) -> EntityIndex<'_> {
        EntityIndex::build(&self.rows)
    }
}

impl From<Vec<Observation>> for Table {
    fn from(rows: Vec<Observation>) -> Self {
        Self::new(rows)
    }
}

impl FromIterator<Observation> for Table {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Entity name to the ascending list of its row indices, groups kept in
/// first-seen order.
pub(crate) struct EntityIndex<'a> {
    groups: Vec<(&'a str, Vec<usize>)>,
}

impl<'a> EntityIndex<'a> {
    fn build(rows: &'a [Observation]) -> Self {
        let mut slots: HashMap<&'a str, usize> = HashMap::new();
        let mut groups: Vec<(&'a str, Vec<usize>)> = Vec::new();

        for (i, row) in rows.iter().enumerate() {
            match slots.entry(row.entity.as_str()) {
                Entry::Occupied(slot) => groups[*slot.get()].1.push(i),
                Entry::Vacant(slot) => {
                    slot.insert(groups.len());
                    groups.push((row.entity.as_str(), vec![i]));
                }
            }
        }

        Self { groups }
    }

    pub(crate) fn names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.groups.iter().map(|(name, _)| *name)
    }

    pub(crate) fn groups(&self) -> impl Iterator<Item = (&'a str, &[usize])> {
        self.groups.iter().map(|(name, rows)| (*name, rows.as_slice()))
    }

    pub(crate) fn rows_of(&self, entity: &str) -> &[usize] {
        self.groups
            .iter()
            .find(|(name, _)| *name == entity)
            .map_or(&[][..], |(_, rows)| rows.as_slice())
    }
}

/// Counters above `i64::MAX` cannot occur in real data; clamp instead of wrapping.
pub(crate) fn saturate_u64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Narrows a wide accumulator back to the output width.
pub(crate) fn saturate_i128(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}
