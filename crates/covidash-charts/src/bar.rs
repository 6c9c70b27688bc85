//! Vertical bar charts, one bar per category.

use crate::error::{drawing, ChartError};
use crate::palette::{reds, Palette};
use crate::renderer::value_range;
use crate::spec::ChartSpec;
use covidash_common::{format_count, truncate_string};
use plotters::coord::Shift;
use plotters::prelude::*;

const MAX_LABEL_CHARS: usize = 14;

/// One bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    /// Category label.
    pub label: String,
    /// Bar height.
    pub value: i64,
}

/// Reads the bars of a bar spec in frame order.
///
/// # Errors
///
/// Fails when a field is missing or a y cell is not an integer.
pub fn bars(spec: &ChartSpec) -> Result<Vec<Bar>, ChartError> {
    let frame = &spec.frame;
    let x = frame.require_column(&spec.x)?;
    let y = frame.require_column(&spec.y)?;

    frame
        .rows()
        .iter()
        .enumerate()
        .map(|(row_index, row)| {
            let value = row[y].as_int().ok_or_else(|| ChartError::InvalidCell {
                column: spec.y.clone(),
                row: row_index,
                expected: "an integer",
            })?;
            Ok(Bar {
                label: row[x].to_string(),
                value,
            })
        })
        .collect()
}

/// Position of `value` on the sequential scale: its share of the largest
/// bar, clamped at zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn intensity(value: i64, max: i64) -> f64 {
    if max <= 0 {
        return 0.0;
    }
    (value.max(0) as f64 / max as f64).min(1.0)
}

pub(crate) fn draw(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    spec: &ChartSpec,
    palette: &Palette,
) -> Result<(), ChartError> {
    let bars = bars(spec)?;
    let max = bars.iter().map(|bar| bar.value).max().unwrap_or(0);
    let y_range = value_range(bars.iter().map(|bar| bar.value));

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, ("sans-serif", 24).into_font().color(&palette.foreground))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d((0..bars.len()).into_segmented(), y_range)
        .map_err(drawing)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(spec.label_for(&spec.x))
        .y_desc(spec.label_for(&spec.y))
        .x_labels(bars.len())
        .x_label_formatter(&|segment| match segment {
            SegmentValue::CenterOf(i) => bars
                .get(*i)
                .map(|bar| truncate_string(&bar.label, MAX_LABEL_CHARS))
                .unwrap_or_default(),
            _ => String::new(),
        })
        .y_label_formatter(&|value| format_count(*value))
        .axis_style(&palette.foreground)
        .bold_line_style(&palette.grid)
        .light_line_style(&palette.grid.mix(0.3))
        .label_style(("sans-serif", 12).into_font().color(&palette.foreground))
        .axis_desc_style(("sans-serif", 15).into_font().color(&palette.foreground))
        .draw()
        .map_err(drawing)?;

    chart
        .draw_series(bars.iter().enumerate().map(|(i, bar)| {
            let color = reds(intensity(bar.value, max));
            let mut rect = Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0),
                    (SegmentValue::Exact(i + 1), bar.value),
                ],
                color.filled(),
            );
            rect.set_margin(0, 0, 6, 6);
            rect
        }))
        .map_err(drawing)?;

    chart
        .draw_series(bars.iter().enumerate().map(|(i, bar)| {
            Text::new(
                format_count(bar.value),
                (SegmentValue::CenterOf(i), bar.value),
                ("sans-serif", 11).into_font().color(&palette.foreground),
            )
        }))
        .map_err(drawing)?;

    Ok(())
}
