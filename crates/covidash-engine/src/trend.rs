//! Single-country trend: cumulative series next to its daily new counts.

use crate::delta::diff_series;
use crate::table::{saturate_u64, Table};
use chrono::NaiveDate;
use covidash_common::Metric;
use serde::Serialize;
use tracing::debug;

/// One date of an [`EntityTrend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    /// Observation date.
    pub date: NaiveDate,
    /// Cumulative value on that date.
    pub cumulative: i64,
    /// Difference to the previous observed date (0 on the first).
    pub new: i64,
}

/// Long-format row produced by [`EntityTrend::melt`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendRow {
    /// Observation date.
    pub date: NaiveDate,
    /// Series name: `<metric>` or `new_<metric>`.
    pub series: String,
    /// Value of that series on that date.
    pub count: i64,
}

/// Date-ordered trend of one metric for one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityTrend {
    /// Entity name.
    pub entity: String,
    /// Tracked metric.
    pub metric: Metric,
    /// Points ascending by date.
    pub points: Vec<TrendPoint>,
}

impl EntityTrend {
    /// Reshapes into long format: every cumulative row first, then every
    /// `new_<metric>` row, each block ascending by date.
    #[must_use]
    pub fn melt(&self) -> Vec<TrendRow> {
        let cumulative = self.metric.as_str().to_string();
        let new = self.metric.new_column();

        let cumulative_rows = self.points.iter().map(|point| TrendRow {
            date: point.date,
            series: cumulative.clone(),
            count: point.cumulative,
        });
        let new_rows = self.points.iter().map(|point| TrendRow {
            date: point.date,
            series: new.clone(),
            count: point.new,
        });

        cumulative_rows.chain(new_rows).collect()
    }

    /// Whether the entity had no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Builds the trend of `metric` for `entity`. An unknown entity yields an
/// empty trend.
#[must_use]
pub fn entity_trend(table: &Table, entity: &str, metric: Metric) -> EntityTrend {
    let rows = table.rows();
    let index = table.entity_index();

    let mut by_date = index.rows_of(entity).to_vec();
    by_date.sort_by_key(|&i| rows[i].date);

    let cumulative: Vec<i64> = by_date
        .iter()
        .map(|&i| saturate_u64(rows[i].value(metric)))
        .collect();
    let new = diff_series(&cumulative);

    let points: Vec<TrendPoint> = by_date
        .iter()
        .zip(cumulative.iter().zip(new))
        .map(|(&i, (&cumulative, new))| TrendPoint {
            date: rows[i].date,
            cumulative,
            new,
        })
        .collect();

    debug!(entity, %metric, points = points.len(), "Built entity trend");
    EntityTrend {
        entity: entity.to_string(),
        metric,
        points,
    }
}
