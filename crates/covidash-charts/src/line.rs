//! Line charts over dates.

use crate::error::{drawing, ChartError};
use crate::palette::Palette;
use crate::renderer::value_range;
use crate::spec::ChartSpec;
use chrono::{Duration, NaiveDate};
use covidash_common::{format_count, format_date};
use plotters::coord::Shift;
use plotters::prelude::*;

/// One line: a named, date-ordered series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    /// Legend name (the color-group value, or the y label).
    pub name: String,
    /// Points ascending by date.
    pub points: Vec<(NaiveDate, i64)>,
}

/// Splits a line spec's frame into series.
///
/// Rows are grouped by the `color` column in first-seen order; without a
/// `color` field the whole frame is one series named after the y label.
///
/// # Errors
///
/// Fails when a field is missing, an x cell is not a date or a y cell is
/// not an integer.
pub fn line_series(spec: &ChartSpec) -> Result<Vec<Series>, ChartError> {
    let frame = &spec.frame;
    let x = frame.require_column(&spec.x)?;
    let y = frame.require_column(&spec.y)?;
    let group = spec
        .color
        .as_deref()
        .map(|field| frame.require_column(field))
        .transpose()?;

    let mut series: Vec<Series> = Vec::new();
    for (row_index, row) in frame.rows().iter().enumerate() {
        let date = row[x].as_date().ok_or_else(|| ChartError::InvalidCell {
            column: spec.x.clone(),
            row: row_index,
            expected: "a date",
        })?;
        let value = row[y].as_int().ok_or_else(|| ChartError::InvalidCell {
            column: spec.y.clone(),
            row: row_index,
            expected: "an integer",
        })?;
        let name = group.map_or_else(|| spec.label_for(&spec.y).to_string(), |g| row[g].to_string());

        match series.iter_mut().find(|s| s.name == name) {
            Some(existing) => existing.points.push((date, value)),
            None => series.push(Series {
                name,
                points: vec![(date, value)],
            }),
        }
    }

    for s in &mut series {
        s.points.sort_by_key(|&(date, _)| date);
    }
    Ok(series)
}

/// First and last date over all series.
#[must_use]
pub fn date_span(series: &[Series]) -> Option<(NaiveDate, NaiveDate)> {
    let dates = series.iter().flat_map(|s| s.points.iter().map(|&(date, _)| date));
    let first = dates.clone().min()?;
    let last = dates.max()?;
    Some((first, last))
}

pub(crate) fn draw(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    spec: &ChartSpec,
    palette: &Palette,
) -> Result<(), ChartError> {
    let series = line_series(spec)?;
    let (first, last) = date_span(&series)
        .ok_or_else(|| ChartError::Drawing("line chart has no points".to_string()))?;
    let span = (last - first).num_days().max(1);
    let y_range = value_range(series.iter().flat_map(|s| s.points.iter().map(|&(_, v)| v)));

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, ("sans-serif", 24).into_font().color(&palette.foreground))
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(80)
        .build_cartesian_2d(0i64..span, y_range)
        .map_err(drawing)?;

    chart
        .configure_mesh()
        .x_desc(spec.label_for(&spec.x))
        .y_desc(spec.label_for(&spec.y))
        .x_labels(8)
        .x_label_formatter(&|offset| format_date(first + Duration::days(*offset)))
        .y_label_formatter(&|value| format_count(*value))
        .axis_style(&palette.foreground)
        .bold_line_style(&palette.grid)
        .light_line_style(&palette.grid.mix(0.3))
        .label_style(("sans-serif", 13).into_font().color(&palette.foreground))
        .axis_desc_style(("sans-serif", 15).into_font().color(&palette.foreground))
        .draw()
        .map_err(drawing)?;

    for (i, s) in series.iter().enumerate() {
        let color = palette.series_color(i);
        let points = s
            .points
            .iter()
            .map(|&(date, value)| ((date - first).num_days(), value));
        chart
            .draw_series(LineSeries::new(points, color.stroke_width(2)))
            .map_err(drawing)?
            .label(s.name.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    if series.len() > 1 {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(&palette.background.mix(0.8))
            .border_style(&palette.foreground)
            .label_font(("sans-serif", 13).into_font().color(&palette.foreground))
            .draw()
            .map_err(drawing)?;
    }
    Ok(())
}
