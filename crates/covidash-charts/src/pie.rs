//! Pie charts drawn as filled polygons.

use crate::error::{drawing, ChartError};
use crate::palette::Palette;
use crate::renderer::{draw_no_data, to_px};
use crate::spec::ChartSpec;
use covidash_common::{format_count, truncate_string};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::f64::consts::TAU;

/// Arc resolution in radians between polygon vertices.
const ARC_STEP: f64 = 0.03;
/// Slices smaller than this share get no percentage label.
const MIN_LABELED_SHARE: f64 = 0.03;

/// One wedge; angles are radians clockwise from twelve o'clock.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    /// Category label.
    pub label: String,
    /// Raw value.
    pub value: i64,
    /// Fraction of the total.
    pub share: f64,
    /// Start angle.
    pub start: f64,
    /// End angle.
    pub end: f64,
}

impl Slice {
    /// Angle through the middle of the wedge.
    #[must_use]
    pub fn mid_angle(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// Lays out the wedges of a pie spec in frame order.
///
/// Rows with a non-positive value cannot be drawn and are left out; when
/// nothing positive remains the result is empty.
///
/// # Errors
///
/// Fails when a field is missing or a value cell is not an integer.
#[allow(clippy::cast_precision_loss)]
pub fn pie_slices(spec: &ChartSpec) -> Result<Vec<Slice>, ChartError> {
    let frame = &spec.frame;
    let names = frame.require_column(&spec.x)?;
    let values = frame.require_column(&spec.y)?;

    let mut parts = Vec::new();
    for (row_index, row) in frame.rows().iter().enumerate() {
        let value = row[values].as_int().ok_or_else(|| ChartError::InvalidCell {
            column: spec.y.clone(),
            row: row_index,
            expected: "an integer",
        })?;
        if value > 0 {
            parts.push((row[names].to_string(), value));
        }
    }

    let total: f64 = parts.iter().map(|&(_, value)| value as f64).sum();
    let mut angle = 0.0;
    Ok(parts
        .into_iter()
        .map(|(label, value)| {
            let share = value as f64 / total;
            let start = angle;
            angle += share * TAU;
            Slice {
                label,
                value,
                share,
                start,
                end: angle,
            }
        })
        .collect())
}

/// Pixel position at `radius` and `angle` around `center`.
#[must_use]
pub fn polar(center: (i32, i32), radius: f64, angle: f64) -> (i32, i32) {
    let (sin, cos) = angle.sin_cos();
    (
        center.0 + to_px(radius * sin),
        center.1 - to_px(radius * cos),
    )
}

/// Closed outline of a wedge: the center followed by points along the arc.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn wedge(center: (i32, i32), radius: f64, slice: &Slice) -> Vec<(i32, i32)> {
    let sweep = slice.end - slice.start;
    let steps = ((sweep / ARC_STEP).ceil() as usize).max(2);
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for k in 0..=steps {
        #[allow(clippy::cast_precision_loss)]
        let angle = sweep.mul_add(k as f64 / steps as f64, slice.start);
        points.push(polar(center, radius, angle));
    }
    points
}

pub(crate) fn draw(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    spec: &ChartSpec,
    palette: &Palette,
) -> Result<(), ChartError> {
    let slices = pie_slices(spec)?;
    if slices.is_empty() {
        return draw_no_data(root, &spec.title, palette);
    }

    let area = root
        .titled(&spec.title, ("sans-serif", 24).into_font().color(&palette.foreground))
        .map_err(drawing)?;
    let (width, height) = area.dim_in_pixel();
    let (legend, plot) = area.split_horizontally(to_px(f64::from(width) / 3.0));

    let (plot_width, _) = plot.dim_in_pixel();
    let center = (to_px(f64::from(plot_width) / 2.0), to_px(f64::from(height) / 2.0));
    let radius = f64::from(plot_width.min(height)) * 0.4;

    for (i, slice) in slices.iter().enumerate() {
        let color = palette.series_color(i);
        plot.draw(&Polygon::new(wedge(center, radius, slice), color.filled()))
            .map_err(drawing)?;
    }

    let percent_style = ("sans-serif", 14).into_font().color(&palette.background);
    for slice in slices.iter().filter(|s| s.share >= MIN_LABELED_SHARE) {
        let at = polar(center, radius * 0.65, slice.mid_angle());
        plot.draw(&Text::new(
            format!("{:.1}%", slice.share * 100.0),
            (at.0 - 16, at.1 - 7),
            percent_style.clone(),
        ))
        .map_err(drawing)?;
    }

    let label_style = ("sans-serif", 14).into_font().color(&palette.foreground);
    for (i, slice) in slices.iter().enumerate() {
        let y = 30 + to_px(24.0 * f64::from(u32::try_from(i).unwrap_or(u32::MAX)));
        let color = palette.series_color(i);
        legend
            .draw(&Rectangle::new([(20, y), (34, y + 14)], color.filled()))
            .map_err(drawing)?;
        legend
            .draw(&Text::new(
                format!(
                    "{} ({})",
                    truncate_string(&slice.label, 18),
                    format_count(slice.value)
                ),
                (42, y),
                label_style.clone(),
            ))
            .map_err(drawing)?;
    }
    Ok(())
}
