//! Test utilities and shared fixtures for the covidash workspace.
//!
//! Enabled for other crates through the `testing` feature.

use crate::types::Observation;
use chrono::NaiveDate;
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests. Safe to call from every test.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Shorthand for a calendar date; panics on an invalid date.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Shorthand for an observation dated in March 2020.
pub fn obs(entity: &str, day: u32, cases: u64, deaths: u64, recovered: u64) -> Observation {
    Observation::new(entity, date(2020, 3, day), cases, deaths, recovered)
}

/// Dataset fixtures.
pub mod dataset_fixtures {
    use super::obs;
    use crate::types::Observation;

    /// Three countries over four days, rows interleaved by date the way the
    /// upstream dataset ships them. Spain has no row on day 3.
    pub fn sample_observations() -> Vec<Observation> {
        vec![
            obs("Italy", 1, 1694, 34, 83),
            obs("Spain", 1, 84, 0, 2),
            obs("Germany", 1, 130, 0, 16),
            obs("Italy", 2, 2036, 52, 149),
            obs("Spain", 2, 120, 0, 2),
            obs("Germany", 2, 159, 0, 16),
            obs("Italy", 3, 2502, 79, 160),
            obs("Germany", 3, 196, 0, 16),
            obs("Italy", 4, 3089, 107, 276),
            obs("Spain", 4, 261, 3, 2),
            obs("Germany", 4, 262, 0, 18),
        ]
    }

    /// The sample dataset as the JSON array the file provider reads.
    pub fn sample_dataset_json() -> String {
        serde_json::to_string_pretty(&sample_observations()).expect("fixture serializes")
    }
}

/// Property-based testing utilities using proptest.
#[cfg(feature = "proptest")]
pub mod property_testing {
    use super::date;
    use crate::types::Observation;
    use chrono::Duration;
    use proptest::prelude::*;

    /// Country names drawn by the generated tables.
    pub const ENTITY_NAMES: [&str; 5] = ["Brazil", "Chile", "India", "Peru", "Qatar"];

    /// Strategy for tables with unique (entity, date) rows in key order.
    /// Combine with `prop_shuffle` for arbitrary row orders.
    pub fn observations_strategy() -> impl Strategy<Value = Vec<Observation>> {
        prop::collection::btree_map(
            (0..ENTITY_NAMES.len(), 0i64..60),
            (0u64..100_000, 0u64..5_000, 0u64..50_000),
            0..48,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .map(|((entity, day), (cases, deaths, recovered))| {
                    Observation::new(
                        ENTITY_NAMES[entity],
                        date(2020, 1, 22) + Duration::days(day),
                        cases,
                        deaths,
                        recovered,
                    )
                })
                .collect()
        })
    }

    /// Strategy for a day offset inside the generated tables' date span.
    pub fn day_offset_strategy() -> impl Strategy<Value = i64> {
        0i64..60
    }
}
