//! Chart Plotter Module
//! Geometry behind the static charts: histogram bins, density curve, bar offsets.

use statrs::distribution::{Continuous, Normal};
use statrs::statistics::Statistics;

/// Bin count used for histograms unless the chart context overrides it.
pub const DEFAULT_BINS: usize = 10;

/// Width of each bar in the mean/median comparison, in category units.
pub const BAR_WIDTH: f64 = 0.35;

/// Number of samples taken along the density curve.
pub const KDE_POINTS: usize = 200;

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Computes the data behind each chart independently of the drawing backend.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Range covered by the values, widened by 0.5 on each side when all values are equal.
    pub fn value_range(values: &[f64]) -> Option<(f64, f64)> {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if !min.is_finite() || !max.is_finite() {
            return None;
        }
        if min == max {
            Some((min - 0.5, max + 0.5))
        } else {
            Some((min, max))
        }
    }

    /// Split values into `bins` equal-width bins. The last bin includes its upper edge.
    pub fn histogram_bins(values: &[f64], bins: usize) -> Vec<HistogramBin> {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        let Some((min, max)) = Self::value_range(&finite) else {
            return Vec::new();
        };

        let bins = bins.max(1);
        let width = (max - min) / bins as f64;
        let mut result: Vec<HistogramBin> = (0..bins)
            .map(|i| HistogramBin {
                start: min + i as f64 * width,
                end: if i + 1 == bins {
                    max
                } else {
                    min + (i + 1) as f64 * width
                },
                count: 0,
            })
            .collect();

        for v in finite {
            let idx = (((v - min) / width) as usize).min(bins - 1);
            result[idx].count += 1;
        }

        result
    }

    /// Scott's rule bandwidth: sample std-dev times n^(-1/5).
    ///
    /// `None` when there are fewer than two values or no spread.
    pub fn scott_bandwidth(values: &[f64]) -> Option<f64> {
        if values.len() < 2 {
            return None;
        }
        let std = values.iter().std_dev();
        let bw = std * (values.len() as f64).powf(-0.2);
        (bw.is_finite() && bw > 0.0).then_some(bw)
    }

    /// Gaussian kernel density estimate sampled over `[start, end]`.
    ///
    /// The curve is scaled by `n * bin_width` so it sits on the same axis as the
    /// histogram counts.
    pub fn kde_curve(values: &[f64], start: f64, end: f64, bin_width: f64) -> Vec<(f64, f64)> {
        let Some(bw) = Self::scott_bandwidth(values) else {
            return Vec::new();
        };
        let kernel = Normal::standard();
        let n = values.len() as f64;
        let scale = n * bin_width;
        let step = (end - start) / (KDE_POINTS - 1) as f64;

        (0..KDE_POINTS)
            .map(|i| {
                let x = start + i as f64 * step;
                let density = values
                    .iter()
                    .map(|xi| kernel.pdf((x - xi) / bw))
                    .sum::<f64>()
                    / (n * bw);
                (x, density * scale)
            })
            .collect()
    }

    /// Horizontal extents of the mean and median bars for category `index`.
    ///
    /// The mean bar sits left of the tick and the median bar right of it, so the
    /// two never overlap.
    pub fn bar_offsets(index: usize) -> ((f64, f64), (f64, f64)) {
        let center = index as f64;
        ((center - BAR_WIDTH, center), (center, center + BAR_WIDTH))
    }
}
