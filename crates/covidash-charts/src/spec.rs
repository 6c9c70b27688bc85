//! Declarative chart descriptions.

use crate::error::ChartError;
use crate::frame::Frame;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Date column of every time-series frame.
pub const DATE_COLUMN: &str = "date";
/// Entity column of per-country frames.
pub const ENTITY_COLUMN: &str = "Country";
/// Series-name column of melted trend frames.
pub const COUNT_TYPE_COLUMN: &str = "count_type";
/// Value column of melted trend frames.
pub const COUNT_COLUMN: &str = "count";

/// Supported chart kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Lines over dates, one per color group.
    Line,
    /// One bar per category.
    Bar,
    /// Share of a whole per category.
    Pie,
    /// Values shaded on a world map by country name.
    Choropleth,
}

impl ChartKind {
    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Bar => "bar",
            Self::Pie => "pie",
            Self::Choropleth => "choropleth",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A chart request: the frame plus which columns play which role.
///
/// For line and bar charts `x` and `y` are the axes. For pie charts `x`
/// names the slice labels and `y` their values. For choropleths `x` holds
/// country names and `y` the shaded value. `color` groups line series;
/// on a bar chart it names the field shading the bars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Chart kind.
    pub kind: ChartKind,
    /// Title drawn above the chart.
    pub title: String,
    /// Category / x-axis field.
    pub x: String,
    /// Value / y-axis field.
    pub y: String,
    /// Optional grouping field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Display labels for fields.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    /// Data to plot.
    pub frame: Frame,
}

impl ChartSpec {
    /// Creates a spec without grouping or labels.
    pub fn new(
        kind: ChartKind,
        title: impl Into<String>,
        x: impl Into<String>,
        y: impl Into<String>,
        frame: Frame,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            x: x.into(),
            y: y.into(),
            color: None,
            labels: BTreeMap::new(),
            frame,
        }
    }

    /// Groups series by `field`.
    #[must_use]
    pub fn with_color(mut self, field: impl Into<String>) -> Self {
        self.color = Some(field.into());
        self
    }

    /// Sets the display label of `field`.
    #[must_use]
    pub fn with_label(mut self, field: impl Into<String>, label: impl Into<String>) -> Self {
        self.labels.insert(field.into(), label.into());
        self
    }

    /// Display label of `field`, falling back to the field name.
    #[must_use]
    pub fn label_for<'a>(&'a self, field: &'a str) -> &'a str {
        self.labels.get(field).map_or(field, String::as_str)
    }

    /// Checks that every referenced field is a column of the frame.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::MissingColumn`] for the first absent field.
    pub fn validate(&self) -> Result<(), ChartError> {
        let fields = [Some(&self.x), Some(&self.y), self.color.as_ref()];
        for field in fields.into_iter().flatten() {
            if self.frame.column_index(field).is_none() {
                return Err(ChartError::MissingColumn(field.clone()));
            }
        }
        Ok(())
    }
}
