//! Column-named output tables handed to the renderer.

use crate::error::ChartError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Integer count.
    Int(i64),
    /// Calendar date, serialized as `YYYY-MM-DD`.
    Date(NaiveDate),
    /// Free text such as a country name.
    Text(String),
}

impl Cell {
    /// The integer, if this is an integer cell.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// The date, if this is a date cell.
    #[must_use]
    pub const fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<NaiveDate> for Cell {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// A table with named columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Frame {
    /// Creates an empty frame with the given column names.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row; it must have one cell per column.
    pub fn push_row(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.columns.len(), "row width must match columns");
        self.rows.push(row);
    }

    /// Column names in order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in order.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the frame has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Position of a column the caller cannot do without.
    pub(crate) fn require_column(&self, name: &str) -> Result<usize, ChartError> {
        self.column_index(name)
            .ok_or_else(|| ChartError::MissingColumn(name.to_string()))
    }

    /// Cells of one column, top to bottom.
    pub fn column<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a Cell> + 'a> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[index]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use covidash_common::test_utils::date;

    fn sample() -> Frame {
        let mut frame = Frame::new(["date", "cases"]);
        frame.push_row(vec![date(2020, 3, 1).into(), 1908.into()]);
        frame.push_row(vec![date(2020, 3, 2).into(), 2315.into()]);
        frame
    }

    #[test]
    fn test_column_access() {
        let frame = sample();
        assert_eq!(frame.column_index("cases"), Some(1));
        let cases: Vec<i64> = frame.column("cases").unwrap().filter_map(Cell::as_int).collect();
        assert_eq!(cases, vec![1908, 2315]);
        assert!(frame.column("deaths").is_none());
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::from(date(2020, 3, 1)).to_string(), "2020-03-01");
        assert_eq!(Cell::from("Italy").to_string(), "Italy");
        assert_eq!(Cell::from(-4).to_string(), "-4");
    }

    #[test]
    fn test_serialization_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["columns"], serde_json::json!(["date", "cases"]));
        assert_eq!(json["rows"][0], serde_json::json!(["2020-03-01", 1908]));
    }

    #[test]
    fn test_untagged_cells_deserialize() {
        let frame: Frame = serde_json::from_str(
            r#"{"columns": ["date", "Country", "cases"], "rows": [["2020-03-01", "Italy", 5]]}"#,
        )
        .unwrap();
        assert_eq!(frame.rows()[0][0], Cell::Date(date(2020, 3, 1)));
        assert_eq!(frame.rows()[0][1], Cell::Text("Italy".to_string()));
        assert_eq!(frame.rows()[0][2], Cell::Int(5));
    }
}
