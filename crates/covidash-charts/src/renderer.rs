//! Renderer trait and the plotters PNG implementation.

use crate::error::{drawing, ChartError};
use crate::palette::Palette;
use crate::spec::{ChartKind, ChartSpec};
use crate::{bar, line, pie};
use async_trait::async_trait;
use covidash_config::ChartsConfig;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Text shown instead of a chart whose frame is empty.
pub const NO_DATA: &str = "No data";

/// Draws a [`ChartSpec`] to an image file.
#[async_trait]
pub trait ChartRenderer: Send + Sync {
    /// Renders `spec` to `path`.
    async fn render(&self, spec: &ChartSpec, path: &Path) -> Result<(), ChartError>;

    /// Whether this renderer can draw `kind`.
    fn supports(&self, kind: ChartKind) -> bool;

    /// Renderer name for logs and errors.
    fn name(&self) -> &'static str;
}

/// PNG renderer backed by plotters' bitmap backend.
///
/// Line, bar and pie charts are supported. Choropleths need world
/// geometry this renderer does not carry.
#[derive(Debug, Clone)]
pub struct PlottersRenderer {
    size: (u32, u32),
    palette: Palette,
}

impl PlottersRenderer {
    /// Creates a renderer with the configured size and theme.
    #[must_use]
    pub fn new(config: &ChartsConfig) -> Self {
        Self {
            size: (config.width, config.height),
            palette: Palette::from_theme(config.theme),
        }
    }

    /// Output size in pixels.
    #[must_use]
    pub const fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Active palette.
    #[must_use]
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }
}

#[async_trait]
impl ChartRenderer for PlottersRenderer {
    #[instrument(skip(self, spec), fields(kind = %spec.kind, path = %path.display()))]
    async fn render(&self, spec: &ChartSpec, path: &Path) -> Result<(), ChartError> {
        if !self.supports(spec.kind) {
            return Err(ChartError::Unsupported {
                kind: spec.kind,
                renderer: self.name(),
            });
        }
        spec.validate()?;

        let owned_spec = spec.clone();
        let owned_path = path.to_path_buf();
        let size = self.size;
        let palette = self.palette.clone();

        // The bitmap backend is synchronous and not Send.
        tokio::task::spawn_blocking(move || draw_to_file(&owned_spec, &owned_path, size, &palette))
            .await
            .map_err(drawing)??;

        info!(title = %spec.title, "Rendered chart");
        Ok(())
    }

    fn supports(&self, kind: ChartKind) -> bool {
        matches!(kind, ChartKind::Line | ChartKind::Bar | ChartKind::Pie)
    }

    fn name(&self) -> &'static str {
        "plotters"
    }
}

fn draw_to_file(
    spec: &ChartSpec,
    path: &Path,
    size: (u32, u32),
    palette: &Palette,
) -> Result<(), ChartError> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&palette.background).map_err(drawing)?;

    if spec.frame.is_empty() {
        debug!(title = %spec.title, "Empty frame, drawing placeholder");
        draw_no_data(&root, &spec.title, palette)?;
    } else {
        match spec.kind {
            ChartKind::Line => line::draw(&root, spec, palette)?,
            ChartKind::Bar => bar::draw(&root, spec, palette)?,
            ChartKind::Pie => pie::draw(&root, spec, palette)?,
            ChartKind::Choropleth => {
                return Err(ChartError::Unsupported {
                    kind: spec.kind,
                    renderer: "plotters",
                })
            }
        }
    }

    root.present().map_err(drawing)?;
    Ok(())
}

/// Title plus a centered [`NO_DATA`] notice.
pub(crate) fn draw_no_data(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    title: &str,
    palette: &Palette,
) -> Result<(), ChartError> {
    let area = root
        .titled(title, ("sans-serif", 24).into_font().color(&palette.foreground))
        .map_err(drawing)?;
    let (width, height) = area.dim_in_pixel();
    let style = ("sans-serif", 28)
        .into_font()
        .color(&palette.foreground)
        .pos(Pos::new(HPos::Center, VPos::Center));
    area.draw(&Text::new(
        NO_DATA,
        (to_px(f64::from(width) / 2.0), to_px(f64::from(height) / 2.0)),
        style,
    ))
    .map_err(drawing)?;
    Ok(())
}

/// Y-axis range for a set of values.
///
/// The range always contains zero, gets 5% headroom above the largest
/// value and is never empty.
pub fn value_range(values: impl IntoIterator<Item = i64>) -> Range<i64> {
    let (lo, hi) = values
        .into_iter()
        .fold((0i64, 0i64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let headroom = (hi.saturating_sub(lo) / 20).max(1);
    lo..hi.saturating_add(headroom)
}

/// Rounds a pixel coordinate, saturating at the `i32` bounds.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn to_px(value: f64) -> i32 {
    value.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}
