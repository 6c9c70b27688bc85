//! Theme colors.

use covidash_config::ChartTheme;
use plotters::style::RGBColor;

/// Colors used by every chart of one theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    /// Canvas fill.
    pub background: RGBColor,
    /// Text, axes and borders.
    pub foreground: RGBColor,
    /// Mesh lines.
    pub grid: RGBColor,
    /// Categorical series colors, cycled.
    pub series: Vec<RGBColor>,
}

impl Palette {
    /// Palette for a configured theme.
    #[must_use]
    pub fn from_theme(theme: ChartTheme) -> Self {
        match theme {
            ChartTheme::Dark => Self {
                background: parse_hex("#0e1117").unwrap_or(RGBColor(14, 17, 23)),
                foreground: parse_hex("#fafafa").unwrap_or(RGBColor(250, 250, 250)),
                grid: RGBColor(60, 64, 72),
                series: vec![
                    RGBColor(99, 110, 250),
                    RGBColor(239, 85, 59),
                    RGBColor(0, 204, 150),
                    RGBColor(171, 99, 250),
                    RGBColor(255, 161, 90),
                    RGBColor(25, 211, 243),
                    RGBColor(255, 102, 146),
                    RGBColor(182, 232, 128),
                    RGBColor(255, 151, 255),
                    RGBColor(254, 203, 82),
                ],
            },
            ChartTheme::Light => Self {
                background: RGBColor(255, 255, 255),
                foreground: RGBColor(33, 33, 33),
                grid: RGBColor(224, 224, 224),
                series: vec![
                    RGBColor(31, 119, 180),
                    RGBColor(255, 127, 14),
                    RGBColor(44, 160, 44),
                    RGBColor(214, 39, 40),
                    RGBColor(148, 103, 189),
                    RGBColor(140, 86, 75),
                    RGBColor(227, 119, 194),
                    RGBColor(127, 127, 127),
                    RGBColor(188, 189, 34),
                    RGBColor(23, 190, 207),
                ],
            },
        }
    }

    /// Series color for the `index`-th group.
    #[must_use]
    pub fn series_color(&self, index: usize) -> RGBColor {
        self.series
            .get(index % self.series.len().max(1))
            .copied()
            .unwrap_or(self.foreground)
    }
}

/// Parses `#rrggbb`.
#[must_use]
pub fn parse_hex(color: &str) -> Option<RGBColor> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(RGBColor(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Sequential red scale; `t` is clamped to `[0, 1]`.
#[must_use]
pub fn reds(t: f64) -> RGBColor {
    const LOW: (f64, f64, f64) = (254.0, 224.0, 210.0);
    const HIGH: (f64, f64, f64) = (103.0, 0.0, 13.0);

    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let lerp = |a: f64, b: f64| (b - a).mul_add(t, a).round() as u8;
    RGBColor(lerp(LOW.0, HIGH.0), lerp(LOW.1, HIGH.1), lerp(LOW.2, HIGH.2))
}
