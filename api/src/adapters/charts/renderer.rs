//! Plotters-powered bar chart renderer.
//!
//! Each series becomes one PNG: a bar per category over a segmented x axis,
//! largest first, with title and axis descriptions when a font is available.

use std::error::Error;
use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use uuid::Uuid;

use super::fonts::{ensure_font, FONT_FAMILY};
use crate::domain::entities::{CategorySeries, ChartKind};
use crate::domain::ports::ChartRenderer;
use crate::error::ChartError;

/// Figure size in pixels (12x7 inches at 100 dpi)
const CHART_SIZE: (u32, u32) = (1200, 700);

/// Label area kept around the plot when there is no font, so the axes show
const AXIS_ONLY_AREA: u32 = 12;

/// Longest category label drawn under a bar
const MAX_LABEL_CHARS: usize = 24;

pub struct PlottersBarRenderer {
    size: (u32, u32),
    text: bool,
}

impl PlottersBarRenderer {
    /// Create a renderer, registering `font_path` (or a system font) for text
    pub fn new(font_path: Option<&Path>) -> Self {
        Self {
            size: CHART_SIZE,
            text: ensure_font(font_path),
        }
    }

    pub fn text_enabled(&self) -> bool {
        self.text
    }

    fn draw<DB>(
        &self,
        root: DrawingArea<DB, Shift>,
        kind: ChartKind,
        series: &CategorySeries,
    ) -> Result<(), Box<dyn Error>>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        root.fill(&WHITE)?;

        let (y0, y1) = y_range(series);
        let bar_count = series.len() as u32;
        let color = kind.color();
        let bar_color = RGBColor(color.0, color.1, color.2);

        let mut builder = ChartBuilder::on(&root);
        builder.margin(20);
        if self.text {
            builder
                .caption(kind.title(), (FONT_FAMILY, 28))
                .x_label_area_size(70)
                .y_label_area_size(90);
        } else {
            builder
                .x_label_area_size(AXIS_ONLY_AREA)
                .y_label_area_size(AXIS_ONLY_AREA);
        }
        let mut chart = builder.build_cartesian_2d((0u32..bar_count).into_segmented(), y0..y1)?;

        let labels: Vec<String> = series.labels().map(truncate_label).collect();
        let label_size = if series.len() > 8 { 11 } else { 14 };
        let x_formatter = |v: &SegmentValue<u32>| match v {
            SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
            _ => String::new(),
        };

        let mut mesh = chart.configure_mesh();
        mesh.disable_x_mesh()
            .bold_line_style(BLACK.mix(0.15))
            .light_line_style(WHITE)
            .axis_style(BLACK);
        if self.text {
            mesh.x_labels(series.len())
                .x_label_formatter(&x_formatter)
                .x_desc(kind.x_label())
                .y_desc(kind.y_label())
                .label_style((FONT_FAMILY, label_size))
                .axis_desc_style((FONT_FAMILY, 16));
        } else {
            // no font: axis lines only, nothing that needs glyphs
            mesh.disable_mesh().x_labels(0).y_labels(0);
        }
        mesh.draw()?;

        chart.draw_series(
            Histogram::vertical(&chart)
                .style(bar_color.filled())
                .margin(12)
                .data(
                    series
                        .bars()
                        .iter()
                        .enumerate()
                        .map(|(i, bar)| (i as u32, bar.value)),
                ),
        )?;

        root.present()?;
        Ok(())
    }

    /// Draw into a sibling file first so readers never see a partial image
    fn draw_to_file(
        &self,
        kind: ChartKind,
        series: &CategorySeries,
        path: &Path,
    ) -> Result<(), Box<dyn Error>> {
        let staging = staging_path(path);
        let drawn = self.draw(
            BitMapBackend::new(&staging, self.size).into_drawing_area(),
            kind,
            series,
        );

        match drawn.and_then(|()| std::fs::rename(&staging, path).map_err(Into::into)) {
            Ok(()) => Ok(()),
            Err(e) => {
                let _ = std::fs::remove_file(&staging);
                Err(e)
            }
        }
    }
}

impl ChartRenderer for PlottersBarRenderer {
    fn render(
        &self,
        kind: ChartKind,
        series: &CategorySeries,
        path: &Path,
    ) -> Result<(), ChartError> {
        if series.is_empty() {
            return Err(ChartError::EmptySeries(kind.to_string()));
        }

        self.draw_to_file(kind, series, path)
            .map_err(|e| ChartError::Render {
                file: path.display().to_string(),
                message: e.to_string(),
            })?;

        tracing::debug!("Rendered {} bar(s) to {}", series.len(), path.display());
        Ok(())
    }
}

/// Hidden sibling of `path`, keeping the extension the encoder is picked by
fn staging_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "png".to_string());
    path.with_file_name(format!(".{}.{}.{}", stem, Uuid::new_v4().simple(), ext))
}

/// Y axis span covering every bar and zero, with headroom on the open side
fn y_range(series: &CategorySeries) -> (f64, f64) {
    let (lo, hi) = series.value_bounds();
    let span = hi - lo;
    if span <= 0.0 || !span.is_finite() {
        return (0.0, 1.0);
    }

    let pad = span * 0.1;
    let lo = if lo < 0.0 { lo - pad } else { lo };
    let hi = if hi > 0.0 { hi + pad } else { hi };
    (lo, hi)
}

fn truncate_label(label: &str) -> String {
    if label.chars().count() <= MAX_LABEL_CHARS {
        label.to_string()
    } else {
        let mut short: String = label.chars().take(MAX_LABEL_CHARS - 1).collect();
        short.push('…');
        short
    }
}
