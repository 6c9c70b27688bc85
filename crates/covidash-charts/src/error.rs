//! Chart rendering errors.

use crate::spec::ChartKind;
use thiserror::Error;

/// Errors raised while validating or drawing a chart.
#[derive(Error, Debug)]
pub enum ChartError {
    /// The renderer cannot draw this kind of chart.
    #[error("Chart kind '{kind}' is not supported by the {renderer} renderer")]
    Unsupported {
        /// Requested kind.
        kind: ChartKind,
        /// Renderer name.
        renderer: &'static str,
    },

    /// A field named by a `ChartSpec` is not a column of its frame.
    #[error("Column '{0}' is missing from the chart frame")]
    MissingColumn(String),

    /// A cell has the wrong type for the role its column plays.
    #[error("Column '{column}' row {row}: expected {expected}")]
    InvalidCell {
        /// Column name.
        column: String,
        /// Row index in the frame.
        row: usize,
        /// Expected cell type.
        expected: &'static str,
    },

    /// The drawing backend failed.
    #[error("Drawing failed: {0}")]
    Drawing(String),
}

/// Adapts plotters' backend-generic errors.
pub(crate) fn drawing<E: std::fmt::Display>(err: E) -> ChartError {
    ChartError::Drawing(err.to_string())
}
