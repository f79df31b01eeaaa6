//! CSV Data Loader Module
//! Reads semicolon-delimited census files into a Polars DataFrame of text columns.

use crate::error::{AnalysisError, Result};
use csv::{ErrorKind, ReaderBuilder, StringRecord};
use polars::prelude::*;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Field separator used by the census exports.
pub const DELIMITER: u8 = b';';

/// Field contents that load as null, matching the usual spreadsheet/pandas markers.
pub const NA_VALUES: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Loads delimited files into a DataFrame where every column is a nullable string.
///
/// Typing is left to [`DataProcessor`](super::DataProcessor); empty fields and
/// [`NA_VALUES`] markers load as null.
pub struct DataLoader;

impl DataLoader {
    /// Load a census CSV file from disk.
    pub fn load_csv(path: impl AsRef<Path>) -> Result<DataFrame> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| AnalysisError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;

        let df = Self::read_table(file, path)?;
        log::info!(
            "Loaded {} rows x {} columns from {}",
            df.height(),
            df.width(),
            path.display()
        );
        log::debug!("Columns: {}", Self::get_columns(&df).join(", "));
        Ok(df)
    }

    /// Load census data from an in-memory reader.
    #[cfg(test)]
    pub fn load_csv_from_reader<R: Read>(reader: R) -> Result<DataFrame> {
        Self::read_table(reader, Path::new("<reader>"))
    }

    fn read_table<R: Read>(reader: R, source: &Path) -> Result<DataFrame> {
        // Strict field counts: a ragged row is an error, never padded or truncated.
        let mut rdr = ReaderBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        let headers = Self::read_headers(&mut rdr, source)?;
        let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];

        let mut record = StringRecord::new();
        loop {
            match rdr.read_record(&mut record) {
                Ok(true) => {
                    for (values, field) in columns.iter_mut().zip(record.iter()) {
                        values.push(if NA_VALUES.contains(&field) {
                            None
                        } else {
                            Some(field.to_string())
                        });
                    }
                }
                Ok(false) => break,
                Err(err) => return Err(Self::map_csv_error(err, source)),
            }
        }

        let columns: Vec<Column> = headers
            .into_iter()
            .zip(columns)
            .map(|(name, values)| Column::new(name.into(), values))
            .collect();

        Ok(DataFrame::new(columns)?)
    }

    fn read_headers<R: Read>(rdr: &mut csv::Reader<R>, source: &Path) -> Result<Vec<String>> {
        let record = rdr
            .headers()
            .map_err(|err| Self::map_csv_error(err, source))?;

        let headers: Vec<String> = record
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        if headers.is_empty() {
            return Err(AnalysisError::Parse {
                line: 1,
                message: "missing header row".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for name in &headers {
            if name.is_empty() {
                return Err(AnalysisError::Parse {
                    line: 1,
                    message: "empty column name in header".to_string(),
                });
            }
            if !seen.insert(name.as_str()) {
                return Err(AnalysisError::Parse {
                    line: 1,
                    message: format!("duplicate column name '{name}'"),
                });
            }
        }

        Ok(headers)
    }

    fn map_csv_error(err: csv::Error, source: &Path) -> AnalysisError {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        match err.into_kind() {
            ErrorKind::Io(source_err) => AnalysisError::FileAccess {
                path: PathBuf::from(source),
                source: source_err,
            },
            ErrorKind::UnequalLengths {
                pos,
                expected_len,
                len,
            } => AnalysisError::Parse {
                line: pos.map(|p| p.line()).unwrap_or(line),
                message: format!("expected {expected_len} fields, found {len}"),
            },
            ErrorKind::Utf8 { err, .. } => AnalysisError::Parse {
                line,
                message: format!("invalid UTF-8 in field {}", err.field()),
            },
            other => AnalysisError::Parse {
                line,
                message: format!("{other:?}"),
            },
        }
    }

    /// Column names in header order.
    pub fn get_columns(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}
