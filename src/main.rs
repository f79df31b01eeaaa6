//! Censo Report - Census CSV Statistics & Chart Report
//!
//! Loads the semicolon-delimited census file, coerces the population columns
//! to numbers, prints grouping counts and descriptive statistics, and renders
//! a histogram per population year plus a mean/median comparison chart.

mod charts;
mod config;
mod data;
mod error;
mod report;
mod stats;

use anyhow::{Context, Result};
use charts::{ChartContext, StaticChartRenderer};
use config::ReportConfig;
use data::{DataLoader, DataProcessor};
use polars::prelude::DataFrame;
use std::path::PathBuf;
use stats::{value_counts, StatsCalculator};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ReportConfig::resolve(std::env::args().skip(1))?;
    let charts = run(&config)?;
    log::info!("Report finished, {} charts written", charts.len());
    Ok(())
}

/// Run the full report: load, clean, group, describe, plot.
fn run(config: &ReportConfig) -> Result<Vec<PathBuf>> {
    let df = load_and_clean(config)?;

    let counts = value_counts(&df, &config.group_column)
        .with_context(|| format!("grouping by {}", config.group_column))?;
    log::debug!("{} rows in {} groups", counts.total(), counts.entries.len());
    println!("{}", report::format_group_counts(&counts));

    let ctx = ChartContext::new(config.output_dir.clone())
        .with_size(config.chart_width, config.chart_height)
        .with_bins(config.histogram_bins)
        .with_viewer(config.open_charts);

    let columns = config.report_columns();
    let mut written = Vec::with_capacity(columns.len() + 1);
    for column in &columns {
        let stats = StatsCalculator::describe_column(&df, column)
            .with_context(|| format!("computing statistics for {column}"))?;
        println!("{}", report::format_stats(&stats));

        let path = StaticChartRenderer::render_histogram(&ctx, &df, column)
            .with_context(|| format!("rendering histogram for {column}"))?;
        written.push(path);
    }

    let path = StaticChartRenderer::render_mean_median_bars(&ctx, &df, &columns)
        .context("rendering mean/median comparison")?;
    written.push(path);

    Ok(written)
}

fn load_and_clean(config: &ReportConfig) -> Result<DataFrame> {
    let mut df = DataLoader::load_csv(&config.input_path)
        .with_context(|| format!("loading {}", config.input_path.display()))?;
    DataProcessor::clean_numeric_columns(&mut df, &config.numeric_columns())
        .context("cleaning numeric columns")?;
    Ok(df)
}
