//! Data Processor Module
//! Handles numeric coercion of the census columns.

use crate::error::{AnalysisError, Result};
use polars::prelude::*;

/// Census columns that carry numbers once cleaned.
pub const NUMERIC_COLUMNS: [&str; 7] = [
    "Poblacion_1994",
    "Poblacion_2002",
    "Poblacion_2018",
    "Distribucion_1994",
    "Distribucion_2002",
    "Distribucion_2018",
    "Tasa_de_Crecimiento",
];

/// Outcome of coercing a single field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue {
    Number(f64),
    Missing,
}

impl CellValue {
    /// Parse a raw field. Empty, null, non-numeric and `NaN` text all become `Missing`.
    pub fn parse(raw: Option<&str>) -> Self {
        let parsed = raw
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .and_then(|text| text.parse::<f64>().ok());

        match parsed {
            Some(v) if !v.is_nan() => CellValue::Number(v),
            _ => CellValue::Missing,
        }
    }

    pub fn as_option(self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(v),
            CellValue::Missing => None,
        }
    }
}

/// Whether a dtype holds numbers the statistics stage can read.
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Handles data cleaning operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Coerce each named column to `Float64` in place.
    ///
    /// Every column is checked for existence before any is touched, so a
    /// missing column leaves the DataFrame unchanged. Columns already typed
    /// `Float64` are skipped, which makes the operation idempotent.
    pub fn clean_numeric_columns(df: &mut DataFrame, columns: &[&str]) -> Result<()> {
        for name in columns {
            if df.column(name).is_err() {
                return Err(AnalysisError::column_not_found(name));
            }
        }

        for name in columns {
            let column = df.column(name)?;
            let cleaned = match column.dtype() {
                DataType::Float64 => continue,
                dtype if is_numeric_dtype(dtype) => column.cast(&DataType::Float64)?,
                DataType::String => Self::coerce_text(name, column.str()?),
                _ => {
                    let as_text = column.cast(&DataType::String)?;
                    Self::coerce_text(name, as_text.str()?)
                }
            };

            log::debug!(
                "Column {name}: {} of {} values missing after coercion",
                cleaned.null_count(),
                cleaned.len()
            );
            df.with_column(cleaned)?;
        }

        Ok(())
    }

    fn coerce_text(name: &str, text: &StringChunked) -> Column {
        let values: Vec<Option<f64>> = text
            .into_iter()
            .map(|raw| CellValue::parse(raw).as_option())
            .collect();
        Column::new(name.into(), values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn census_frame() -> DataFrame {
        DataFrame::new(vec![
            Column::new(
                "Departamento".into(),
                vec![Some("A"), Some("A"), Some("B")],
            ),
            Column::new(
                "Poblacion_1994".into(),
                vec![Some("100"), Some(" 200 "), None],
            ),
            Column::new(
                "Tasa_de_Crecimiento".into(),
                vec![Some("1.5"), Some("n/d"), Some("NaN")],
            ),
        ])
        .unwrap()
    }

    fn f64_values(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
        df.column(name).unwrap().f64().unwrap().into_iter().collect()
    }

    #[test]
    fn parse_numbers_and_missing() {
        assert_eq!(CellValue::parse(Some("42")), CellValue::Number(42.0));
        assert_eq!(CellValue::parse(Some(" -3.25 ")), CellValue::Number(-3.25));
        assert_eq!(CellValue::parse(Some("1e3")), CellValue::Number(1000.0));
        assert_eq!(CellValue::parse(Some("")), CellValue::Missing);
        assert_eq!(CellValue::parse(Some("   ")), CellValue::Missing);
        assert_eq!(CellValue::parse(Some("abc")), CellValue::Missing);
        assert_eq!(CellValue::parse(Some("NaN")), CellValue::Missing);
        assert_eq!(CellValue::parse(None), CellValue::Missing);
    }

    #[test]
    fn parsed_values_round_trip_through_text() {
        for raw in ["0.1", "123456789", "-0.000123", "2.5e10", "3.141592653589793"] {
            let CellValue::Number(v) = CellValue::parse(Some(raw)) else {
                panic!("{raw} should parse");
            };
            assert_eq!(CellValue::parse(Some(v.to_string().as_str())), CellValue::Number(v));
        }
    }

    #[test]
    fn cleans_listed_columns_only() {
        let mut df = census_frame();
        DataProcessor::clean_numeric_columns(&mut df, &["Poblacion_1994", "Tasa_de_Crecimiento"])
            .unwrap();

        assert_eq!(
            f64_values(&df, "Poblacion_1994"),
            vec![Some(100.0), Some(200.0), None]
        );
        assert_eq!(
            f64_values(&df, "Tasa_de_Crecimiento"),
            vec![Some(1.5), None, None]
        );
        assert_eq!(df.column("Departamento").unwrap().dtype(), &DataType::String);
        assert_eq!(df.height(), 3);
    }

    #[test]
    fn cleaning_is_idempotent() {
        let mut df = census_frame();
        let cols = ["Poblacion_1994", "Tasa_de_Crecimiento"];
        DataProcessor::clean_numeric_columns(&mut df, &cols).unwrap();
        let once = df.clone();
        DataProcessor::clean_numeric_columns(&mut df, &cols).unwrap();
        assert!(df.equals_missing(&once));
    }

    #[test]
    fn integer_columns_are_widened() {
        let mut df = DataFrame::new(vec![Column::new(
            "Poblacion_2002".into(),
            vec![Some(5i64), None, Some(7)],
        )])
        .unwrap();
        DataProcessor::clean_numeric_columns(&mut df, &["Poblacion_2002"]).unwrap();
        assert_eq!(
            f64_values(&df, "Poblacion_2002"),
            vec![Some(5.0), None, Some(7.0)]
        );
    }

    #[test]
    fn absent_column_fails_without_mutating() {
        let mut df = census_frame();
        let before = df.clone();
        let err = DataProcessor::clean_numeric_columns(&mut df, &["Poblacion_1994", "Poblacion_2018"])
            .unwrap_err();

        match err {
            AnalysisError::ColumnNotFound { column } => assert_eq!(column, "Poblacion_2018"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(df.equals_missing(&before));
    }
}
