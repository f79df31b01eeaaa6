//! Statistics Calculator Module
//! Descriptive statistics over the non-missing values of a numeric column.

use crate::data::is_numeric_dtype;
use crate::error::{AnalysisError, Result};
use polars::prelude::*;
use statrs::statistics::Statistics;

/// Descriptive statistics for one column.
#[derive(Debug, Clone)]
pub struct ColumnStats {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// `None` when the column is empty or no value repeats.
    pub mode: Option<f64>,
    /// Population standard deviation (divisor N).
    pub std_dev: f64,
}

impl Default for ColumnStats {
    fn default() -> Self {
        Self {
            column: String::new(),
            count: 0,
            mean: f64::NAN,
            median: f64::NAN,
            mode: None,
            std_dev: f64::NAN,
        }
    }
}

/// Handles statistical calculations.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Non-missing values of a numeric column, in row order.
    pub fn numeric_values(df: &DataFrame, column: &str) -> Result<Vec<f64>> {
        let series = df
            .column(column)
            .map_err(|_| AnalysisError::column_not_found(column))?;

        if !is_numeric_dtype(series.dtype()) {
            return Err(AnalysisError::NonNumericColumn {
                column: column.to_string(),
                dtype: series.dtype().to_string(),
            });
        }

        let as_f64 = series.cast(&DataType::Float64)?;
        let values = as_f64
            .f64()?
            .into_iter()
            .filter_map(|v| v)
            .filter(|v| !v.is_nan())
            .collect();
        Ok(values)
    }

    /// Compute the statistics report for a column of the DataFrame.
    pub fn describe_column(df: &DataFrame, column: &str) -> Result<ColumnStats> {
        let values = Self::numeric_values(df, column)?;
        let mut stats = Self::compute_descriptive_stats(&values);
        stats.column = column.to_string();
        Ok(stats)
    }

    /// Compute descriptive statistics for an array of values.
    ///
    /// An empty slice yields NaN for mean, median and std-dev and no mode.
    pub fn compute_descriptive_stats(values: &[f64]) -> ColumnStats {
        if values.is_empty() {
            return ColumnStats::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        ColumnStats {
            column: String::new(),
            count: values.len(),
            mean: values.iter().mean(),
            median: Self::median(&sorted),
            mode: Self::mode(&sorted),
            std_dev: values.iter().population_std_dev(),
        }
    }

    fn median(sorted: &[f64]) -> f64 {
        let n = sorted.len();
        if n == 0 {
            return f64::NAN;
        }
        if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        }
    }

    /// Most frequent value of an ascending slice. Ties go to the smallest value.
    fn mode(sorted: &[f64]) -> Option<f64> {
        let mut best: Option<(f64, usize)> = None;
        let mut i = 0;
        while i < sorted.len() {
            let value = sorted[i];
            let run = sorted[i..].iter().take_while(|&&v| v == value).count();
            if best.map_or(true, |(_, count)| run > count) {
                best = Some((value, run));
            }
            i += run;
        }

        best.filter(|&(_, count)| count > 1).map(|(value, _)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn frame(values: Vec<Option<f64>>) -> DataFrame {
        DataFrame::new(vec![Column::new("Poblacion_1994".into(), values)]).unwrap()
    }

    #[test]
    fn census_scenario() {
        let df = frame(vec![Some(100.0), Some(200.0), None]);
        let stats = StatsCalculator::describe_column(&df, "Poblacion_1994").unwrap();
        assert_eq!(stats.column, "Poblacion_1994");
        assert_eq!(stats.count, 2);
        assert!((stats.mean - 150.0).abs() < EPS);
        assert!((stats.median - 150.0).abs() < EPS);
        assert!((stats.std_dev - 50.0).abs() < EPS);
        assert_eq!(stats.mode, None);
    }

    #[test]
    fn all_missing_column_yields_nan() {
        let df = frame(vec![None, None, None]);
        let stats = StatsCalculator::describe_column(&df, "Poblacion_1994").unwrap();
        assert_eq!(stats.count, 0);
        assert!(stats.mean.is_nan());
        assert!(stats.median.is_nan());
        assert!(stats.std_dev.is_nan());
        assert_eq!(stats.mode, None);
    }

    #[test]
    fn single_value_mean_is_the_value() {
        let stats = StatsCalculator::compute_descriptive_stats(&[42.5]);
        assert_eq!(stats.mean, 42.5);
        assert_eq!(stats.median, 42.5);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn identical_values_have_zero_std() {
        let stats = StatsCalculator::compute_descriptive_stats(&[7.25; 9]);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.mode, Some(7.25));
    }

    #[test]
    fn median_odd_and_even() {
        let odd = StatsCalculator::compute_descriptive_stats(&[9.0, 1.0, 5.0, 3.0, 7.0]);
        assert_eq!(odd.median, 5.0);

        let even = StatsCalculator::compute_descriptive_stats(&[4.0, 1.0, 3.0, 10.0]);
        assert_eq!(even.median, 3.5);
    }

    #[test]
    fn std_dev_uses_population_divisor() {
        let stats = StatsCalculator::compute_descriptive_stats(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((stats.mean - 5.0).abs() < EPS);
        assert!((stats.std_dev - 2.0).abs() < EPS);
    }

    #[test]
    fn mode_prefers_most_frequent() {
        let stats = StatsCalculator::compute_descriptive_stats(&[3.0, 1.0, 3.0, 2.0, 3.0, 1.0]);
        assert_eq!(stats.mode, Some(3.0));
    }

    #[test]
    fn mode_ties_go_to_smallest_value() {
        let values = [8.0, 2.0, 8.0, 5.0, 2.0, 5.0];
        let first = StatsCalculator::compute_descriptive_stats(&values);
        assert_eq!(first.mode, Some(2.0));

        let mut reversed = values;
        reversed.reverse();
        let second = StatsCalculator::compute_descriptive_stats(&reversed);
        assert_eq!(second.mode, first.mode);
    }

    #[test]
    fn missing_values_are_ignored_not_zero() {
        let df = frame(vec![Some(10.0), None, Some(20.0), None, Some(30.0)]);
        let stats = StatsCalculator::describe_column(&df, "Poblacion_1994").unwrap();
        assert_eq!(stats.count, 3);
        assert!((stats.mean - 20.0).abs() < EPS);
        assert_eq!(stats.median, 20.0);
    }

    #[test]
    fn unknown_column_is_reported() {
        let df = frame(vec![Some(1.0)]);
        let err = StatsCalculator::describe_column(&df, "Poblacion_2018").unwrap_err();
        assert!(matches!(err, AnalysisError::ColumnNotFound { column } if column == "Poblacion_2018"));
    }

    #[test]
    fn text_column_is_a_type_error() {
        let df = DataFrame::new(vec![Column::new(
            "Poblacion_1994".into(),
            vec![Some("100"), Some("200")],
        )])
        .unwrap();
        let err = StatsCalculator::describe_column(&df, "Poblacion_1994").unwrap_err();
        assert!(matches!(err, AnalysisError::NonNumericColumn { .. }));
    }

    #[test]
    fn numeric_values_skip_missing() {
        let df = frame(vec![None, Some(3.0), None, Some(1.0)]);
        let values = StatsCalculator::numeric_values(&df, "Poblacion_1994").unwrap();
        assert_eq!(values, vec![3.0, 1.0]);
    }
}
