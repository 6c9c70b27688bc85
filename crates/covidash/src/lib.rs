//! # covidash
//!
//! Interactive COVID-19 dashboard pipeline. Loads the observation table,
//! validates widget values, runs each dashboard section through the
//! aggregation engine and writes chart specs and images.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod error;
pub mod params;
pub mod pipeline;
pub mod provider;
pub mod sections;

pub use cli::Cli;
pub use error::*;
pub use params::{DashboardParams, Resolved, ValidationIssue, WidgetInput};
pub use pipeline::{Dashboard, RunSummary};
pub use provider::{DataProvider, JsonFileProvider};
