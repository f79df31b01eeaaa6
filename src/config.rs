//! Report configuration.
//!
//! Built-in defaults reproduce the census report. A JSON file named by
//! `CENSO_REPORT_CONFIG` may override any field, and a single positional
//! command-line argument overrides the input path.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::data::NUMERIC_COLUMNS;

pub const CONFIG_ENV: &str = "CENSO_REPORT_CONFIG";
pub const NO_VIEWER_ENV: &str = "CENSO_NO_VIEWER";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub input_path: PathBuf,
    pub group_column: String,
    pub report_columns: Vec<String>,
    pub numeric_columns: Vec<String>,
    pub output_dir: PathBuf,
    pub chart_width: u32,
    pub chart_height: u32,
    pub histogram_bins: usize,
    pub open_charts: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("censo_datos.csv"),
            group_column: "Departamento".to_string(),
            report_columns: vec![
                "Poblacion_1994".to_string(),
                "Poblacion_2002".to_string(),
                "Poblacion_2018".to_string(),
            ],
            numeric_columns: NUMERIC_COLUMNS.iter().map(|c| c.to_string()).collect(),
            output_dir: PathBuf::from("charts"),
            chart_width: 1000,
            chart_height: 600,
            histogram_bins: 10,
            open_charts: true,
        }
    }
}

impl ReportConfig {
    /// Read a JSON config file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Resolve the configuration for this run from the environment and CLI arguments
    /// (program name already stripped).
    pub fn resolve<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };

        if std::env::var_os(NO_VIEWER_ENV).is_some_and(|v| v != "0") {
            config.open_charts = false;
        }

        config.apply_args(args)?;
        Ok(config)
    }

    fn apply_args<I>(&mut self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        if let Some(path) = args.next() {
            self.input_path = PathBuf::from(path);
        }
        if let Some(extra) = args.next() {
            anyhow::bail!("unexpected argument '{extra}'; usage: censo_report [CSV_PATH]");
        }
        Ok(())
    }

    pub fn numeric_columns(&self) -> Vec<&str> {
        self.numeric_columns.iter().map(String::as_str).collect()
    }

    pub fn report_columns(&self) -> Vec<&str> {
        self.report_columns.iter().map(String::as_str).collect()
    }
}
