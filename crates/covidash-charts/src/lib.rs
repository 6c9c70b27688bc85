//! # covidash charts
//!
//! The renderer contract ([`ChartSpec`]: a [`Frame`] plus the field names a
//! chart reads) and a plotters-based PNG renderer for line, bar and pie
//! charts.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod bar;
pub mod error;
pub mod frame;
pub mod line;
pub mod palette;
pub mod pie;
pub mod renderer;
pub mod spec;

pub use error::ChartError;
pub use frame::{Cell, Frame};
pub use palette::Palette;
pub use renderer::{ChartRenderer, PlottersRenderer};
pub use spec::*;
