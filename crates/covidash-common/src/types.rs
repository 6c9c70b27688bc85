//! Domain types shared by the engine, the renderer and the dashboard.

use crate::error::DashError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three cumulative counters tracked per country and date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Confirmed cases.
    Cases,
    /// Deaths.
    Deaths,
    /// Recoveries.
    Recovered,
}

impl Metric {
    /// Every metric, in dataset column order.
    pub const ALL: [Self; 3] = [Self::Cases, Self::Deaths, Self::Recovered];

    /// Column name of the cumulative counter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cases => "cases",
            Self::Deaths => "deaths",
            Self::Recovered => "recovered",
        }
    }

    /// Capitalized name for chart titles and axis labels.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cases => "Cases",
            Self::Deaths => "Deaths",
            Self::Recovered => "Recovered",
        }
    }

    /// Name of the derived per-entity difference column, e.g. `daily_cases`.
    #[must_use]
    pub fn daily_column(self) -> String {
        format!("daily_{}", self.as_str())
    }

    /// Name of the single-entity difference series, e.g. `new_cases`.
    #[must_use]
    pub fn new_column(self) -> String {
        format!("new_{}", self.as_str())
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cases" => Ok(Self::Cases),
            "deaths" => Ok(Self::Deaths),
            "recovered" => Ok(Self::Recovered),
            other => Err(DashError::UnknownMetric(other.to_string())),
        }
    }
}

/// One dataset record: cumulative counters for a country on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Country name; the grouping key.
    #[serde(rename = "Country/Region", alias = "entity", alias = "country")]
    pub entity: String,
    /// Optional province or state. Carried through, never grouped on.
    #[serde(
        rename = "Province/State",
        alias = "province",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub province: Option<String>,
    /// Observation date.
    pub date: NaiveDate,
    /// Cumulative confirmed cases.
    #[serde(default)]
    pub cases: u64,
    /// Cumulative deaths.
    #[serde(default)]
    pub deaths: u64,
    /// Cumulative recoveries.
    #[serde(default)]
    pub recovered: u64,
}

impl Observation {
    /// Creates an observation without a province.
    pub fn new(
        entity: impl Into<String>,
        date: NaiveDate,
        cases: u64,
        deaths: u64,
        recovered: u64,
    ) -> Self {
        Self {
            entity: entity.into(),
            province: None,
            date,
            cases,
            deaths,
            recovered,
        }
    }

    /// Reads the cumulative counter for `metric`.
    #[must_use]
    pub const fn value(&self, metric: Metric) -> u64 {
        match metric {
            Metric::Cases => self.cases,
            Metric::Deaths => self.deaths,
            Metric::Recovered => self.recovered,
        }
    }
}
