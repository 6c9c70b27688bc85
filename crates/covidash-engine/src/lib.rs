//! # covidash engine
//!
//! The aggregation engine behind the dashboard: date and country filters,
//! sums grouped by date or country, per-country daily deltas, and top-N
//! rankings.
//!
//! Every operation is a pure, synchronous function of an immutable
//! [`Table`]. None of them fail: an empty or non-matching input yields an
//! empty output. Validating caller input (inverted date ranges, unknown
//! metric names) is the caller's job.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregate;
pub mod delta;
pub mod filter;
pub mod rank;
pub mod table;
pub mod trend;

pub use aggregate::{sum_by_date, sum_by_entity, MetricTotals};
pub use delta::{daily_delta, diff_series};
pub use filter::{filter_by_date_range, filter_by_entities, rows_on_date};
pub use rank::{top_n, RankedEntity};
pub use table::{Measure, Table};
pub use trend::{entity_trend, EntityTrend, TrendPoint, TrendRow};
