//! Static Chart Renderer
//! Draws histograms and the mean/median comparison as PNG files with plotters,
//! then hands each file to the system image viewer.
//!
//! All drawing goes through an explicit [`ChartContext`]; nothing is kept in
//! process-wide plotting state.

use crate::charts::plotter::{ChartPlotter, DEFAULT_BINS};
use crate::error::{AnalysisError, Result};
use crate::stats::StatsCalculator;
use plotters::prelude::*;
use polars::prelude::DataFrame;
use std::path::{Path, PathBuf};

// Colors
const BAR_COLOR: RGBColor = RGBColor(52, 152, 219); // Blue
const KDE_COLOR: RGBColor = RGBColor(231, 76, 60); // Red
const MEAN_COLOR: RGBColor = RGBColor(52, 152, 219); // Blue
const MEDIAN_COLOR: RGBColor = RGBColor(243, 156, 18); // Orange
const GRID_COLOR: RGBColor = RGBColor(200, 200, 200);

const FONT: &str = "sans-serif";

/// Where and how charts are drawn.
#[derive(Debug, Clone)]
pub struct ChartContext {
    pub output_dir: PathBuf,
    pub width: u32,
    pub height: u32,
    pub bins: usize,
    /// Open each finished chart in the system viewer.
    pub open_charts: bool,
}

impl ChartContext {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            width: 1000,
            height: 600,
            bins: DEFAULT_BINS,
            open_charts: false,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_bins(mut self, bins: usize) -> Self {
        self.bins = bins;
        self
    }

    pub fn with_viewer(mut self, open_charts: bool) -> Self {
        self.open_charts = open_charts;
        self
    }

    fn chart_path(&self, stem: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir).map_err(|source| {
            AnalysisError::FileAccess {
                path: self.output_dir.clone(),
                source,
            }
        })?;
        Ok(self.output_dir.join(format!("{stem}.png")))
    }

    /// Show a finished chart. A viewer that fails to start is not fatal;
    /// the PNG is already on disk.
    fn present(&self, path: &Path) {
        log::info!("Chart written to {}", path.display());
        if !self.open_charts {
            return;
        }
        if let Err(err) = open::that(path) {
            log::warn!("Could not open {} in a viewer: {err}", path.display());
        }
    }
}

fn chart_err<E: std::fmt::Display>(err: E) -> AnalysisError {
    AnalysisError::Chart(err.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Histogram of one numeric column with a density curve on top.
    pub fn render_histogram(ctx: &ChartContext, df: &DataFrame, column: &str) -> Result<PathBuf> {
        let values = StatsCalculator::numeric_values(df, column)?;
        let path = ctx.chart_path(&format!("histograma_{column}"))?;

        Self::draw_histogram(ctx, &path, column, &values)?;
        ctx.present(&path);
        Ok(path)
    }

    /// Grouped bars comparing mean and median of each column.
    pub fn render_mean_median_bars(
        ctx: &ChartContext,
        df: &DataFrame,
        columns: &[&str],
    ) -> Result<PathBuf> {
        let mut summaries = Vec::with_capacity(columns.len());
        for column in columns {
            let stats = StatsCalculator::describe_column(df, column)?;
            summaries.push((column.to_string(), stats.mean, stats.median));
        }

        let path = ctx.chart_path("media_mediana")?;
        Self::draw_mean_median_bars(ctx, &path, &summaries)?;
        ctx.present(&path);
        Ok(path)
    }

    fn draw_histogram(ctx: &ChartContext, path: &Path, column: &str, values: &[f64]) -> Result<()> {
        let bins = ChartPlotter::histogram_bins(values, ctx.bins);
        let (x_min, x_max) = match (bins.first(), bins.last()) {
            (Some(first), Some(last)) => (first.start, last.end),
            _ => (0.0, 1.0),
        };
        let bin_width = bins.first().map(|b| b.end - b.start).unwrap_or(1.0);
        let curve = ChartPlotter::kde_curve(values, x_min, x_max, bin_width);

        let peak = bins
            .iter()
            .map(|b| b.count as f64)
            .chain(curve.iter().map(|&(_, y)| y))
            .fold(0.0, f64::max);
        let y_max = if peak > 0.0 { peak * 1.1 } else { 1.0 };

        let root = BitMapBackend::new(path, (ctx.width, ctx.height)).into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(format!("Histograma de {column}"), (FONT, 24))
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, 0f64..y_max)
            .map_err(chart_err)?;

        chart
            .configure_mesh()
            .x_desc(column)
            .y_desc("Frecuencia")
            .light_line_style(GRID_COLOR.mix(0.4).stroke_width(1))
            .draw()
            .map_err(chart_err)?;

        chart
            .draw_series(bins.iter().map(|bin| {
                Rectangle::new(
                    [(bin.start, 0.0), (bin.end, bin.count as f64)],
                    BAR_COLOR.mix(0.6).filled(),
                )
            }))
            .map_err(chart_err)?;
        chart
            .draw_series(bins.iter().map(|bin| {
                Rectangle::new(
                    [(bin.start, 0.0), (bin.end, bin.count as f64)],
                    BAR_COLOR.stroke_width(1),
                )
            }))
            .map_err(chart_err)?;

        if !curve.is_empty() {
            chart
                .draw_series(LineSeries::new(curve, KDE_COLOR.stroke_width(2)))
                .map_err(chart_err)?;
        }

        root.present().map_err(chart_err)?;
        Ok(())
    }

    fn draw_mean_median_bars(
        ctx: &ChartContext,
        path: &Path,
        summaries: &[(String, f64, f64)],
    ) -> Result<()> {
        let n = summaries.len().max(1);
        let peak = summaries
            .iter()
            .flat_map(|(_, mean, median)| [*mean, *median])
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max);
        let y_max = if peak > 0.0 { peak * 1.15 } else { 1.0 };

        let root = BitMapBackend::new(path, (ctx.width, ctx.height)).into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Media y Mediana de la Población por Año", (FONT, 24))
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(80)
            .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..y_max)
            .map_err(chart_err)?;

        let label_for = |x: &f64| {
            let idx = x.round();
            if (x - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            summaries
                .get(idx as usize)
                .map(|(name, _, _)| name.clone())
                .unwrap_or_default()
        };

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n)
            .x_label_formatter(&label_for)
            .x_desc("Año")
            .y_desc("Población")
            .light_line_style(GRID_COLOR.mix(0.4).stroke_width(1))
            .draw()
            .map_err(chart_err)?;

        chart
            .draw_series(
                summaries
                    .iter()
                    .enumerate()
                    .filter(|(_, (_, mean, _))| mean.is_finite())
                    .map(|(i, (_, mean, _))| {
                        let ((x0, x1), _) = ChartPlotter::bar_offsets(i);
                        Rectangle::new([(x0, 0.0), (x1, *mean)], MEAN_COLOR.mix(0.7).filled())
                    }),
            )
            .map_err(chart_err)?
            .label("Media")
            .legend(|(x, y)| {
                Rectangle::new([(x, y - 5), (x + 12, y + 5)], MEAN_COLOR.mix(0.7).filled())
            });

        chart
            .draw_series(
                summaries
                    .iter()
                    .enumerate()
                    .filter(|(_, (_, _, median))| median.is_finite())
                    .map(|(i, (_, _, median))| {
                        let (_, (x0, x1)) = ChartPlotter::bar_offsets(i);
                        Rectangle::new([(x0, 0.0), (x1, *median)], MEDIAN_COLOR.mix(0.7).filled())
                    }),
            )
            .map_err(chart_err)?
            .label("Mediana")
            .legend(|(x, y)| {
                Rectangle::new([(x, y - 5), (x + 12, y + 5)], MEDIAN_COLOR.mix(0.7).filled())
            });

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8).filled())
            .border_style(BLACK.stroke_width(1))
            .draw()
            .map_err(chart_err)?;

        root.present().map_err(chart_err)?;
        Ok(())
    }
}
