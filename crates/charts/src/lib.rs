//! Bar charts of per-actor gross margin and value share, rendered to PNG.

use core_types::ActorMetrics;
use plotters::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use std::ops::Range;
use std::path::{Path, PathBuf};

pub mod error;

pub use error::ChartError;

/// Qualitative "Bold" palette. Bars cycle through it in actor order.
pub const BOLD_PALETTE: [RGBColor; 11] = [
    RGBColor(127, 60, 141),
    RGBColor(17, 165, 121),
    RGBColor(57, 105, 172),
    RGBColor(242, 183, 1),
    RGBColor(231, 63, 116),
    RGBColor(128, 186, 90),
    RGBColor(230, 131, 16),
    RGBColor(0, 134, 149),
    RGBColor(207, 28, 144),
    RGBColor(249, 123, 114),
    RGBColor(165, 170, 153),
];

/// Which percentage a chart plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartMetric {
    GrossMargin,
    ValueShare,
}

impl ChartMetric {
    pub fn title(&self) -> &'static str {
        match self {
            ChartMetric::GrossMargin => "Gross Margin by Actor",
            ChartMetric::ValueShare => "Value Share by Actor",
        }
    }

    pub fn axis_label(&self) -> &'static str {
        match self {
            ChartMetric::GrossMargin => "Gross Margin (%)",
            ChartMetric::ValueShare => "Value Share (%)",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            ChartMetric::GrossMargin => "margin.png",
            ChartMetric::ValueShare => "share.png",
        }
    }

    pub fn value(&self, metrics: &ActorMetrics) -> f64 {
        let value = match self {
            ChartMetric::GrossMargin => metrics.gross_margin_pct,
            ChartMetric::ValueShare => metrics.value_share_pct,
        };
        value.to_f64().unwrap_or(0.0)
    }
}

/// Pixel size of a rendered chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSize {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartSize {
    fn default() -> Self {
        Self {
            width: 900,
            height: 500,
        }
    }
}

/// Paths of the two charts written by `render_charts`.
#[derive(Debug, Clone)]
pub struct ChartFiles {
    pub gross_margin: PathBuf,
    pub value_share: PathBuf,
}

/// Color of the bar at position `index`.
pub fn actor_color(index: usize) -> RGBColor {
    BOLD_PALETTE[index % BOLD_PALETTE.len()]
}

/// Y axis range for a set of bar heights.
///
/// The range always contains zero so bars grow from the baseline, and it is
/// padded by 10% of the data span on the side(s) holding data.
pub fn y_range(values: &[f64]) -> Range<f64> {
    let lo = values.iter().copied().fold(0.0_f64, f64::min);
    let hi = values.iter().copied().fold(0.0_f64, f64::max);

    let span = hi - lo;
    if span <= f64::EPSILON {
        return 0.0..1.0;
    }
    let padding = span * 0.1;

    let y_min = if lo < 0.0 { lo - padding } else { 0.0 };
    let y_max = if hi > 0.0 { hi + padding } else { 0.0 };
    y_min..y_max
}

/// Draws one bar chart, one bar per actor, to a PNG file at `path`.
pub fn render_bar_chart(
    metrics: &[ActorMetrics],
    metric: ChartMetric,
    path: &Path,
    size: ChartSize,
) -> Result<(), ChartError> {
    if metrics.is_empty() {
        return Err(ChartError::NotEnoughData(format!(
            "'{}' needs at least one actor",
            metric.title()
        )));
    }

    let names: Vec<String> = metrics.iter().map(|m| m.name.clone()).collect();
    let values: Vec<f64> = metrics.iter().map(|m| metric.value(m)).collect();
    let bar_count = values.len() as u32;

    {
        let backend = BitMapBackend::new(path, (size.width, size.height));
        let root = backend.into_drawing_area();
        root.fill(&WHITE).map_err(drawing_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(metric.title(), ("sans-serif", 28.0).into_font())
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d((0u32..bar_count).into_segmented(), y_range(&values))
            .map_err(drawing_error)?;

        let label_for = |v: &SegmentValue<u32>| match v {
            SegmentValue::CenterOf(i) => names.get(*i as usize).cloned().unwrap_or_default(),
            _ => String::new(),
        };

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(names.len())
            .x_label_formatter(&label_for)
            .x_desc("Actor")
            .y_desc(metric.axis_label())
            .draw()
            .map_err(drawing_error)?;

        chart
            .draw_series(values.iter().enumerate().map(|(i, &value)| {
                let i = i as u32;
                let mut bar = Rectangle::new(
                    [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), value)],
                    actor_color(i as usize).filled(),
                );
                bar.set_margin(0, 0, 12, 12);
                bar
            }))
            .map_err(drawing_error)?;

        root.present().map_err(drawing_error)?;
    }

    tracing::debug!(chart = metric.title(), path = %path.display(), "Rendered chart.");
    Ok(())
}

/// Renders both the gross margin and value share charts into `dir`.
pub fn render_charts(metrics: &[ActorMetrics], dir: &Path, size: ChartSize) -> Result<ChartFiles, ChartError> {
    let gross_margin = dir.join(ChartMetric::GrossMargin.file_name());
    let value_share = dir.join(ChartMetric::ValueShare.file_name());

    render_bar_chart(metrics, ChartMetric::GrossMargin, &gross_margin, size)?;
    render_bar_chart(metrics, ChartMetric::ValueShare, &value_share, size)?;

    Ok(ChartFiles {
        gross_margin,
        value_share,
    })
}

fn drawing_error<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Drawing(e.to_string())
}
