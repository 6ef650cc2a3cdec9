//! Descriptive statistics over numeric samples
//!
//! Percentiles use linear interpolation between closest ranks
//! (`position = p × (n − 1)`). Spread is the population standard deviation.
//! Distribution shape is reported as an equal-width histogram and a Gaussian
//! kernel density estimate with Silverman's bandwidth.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::constants::{DENSITY_MAX_POINTS, DENSITY_MIN_POINTS, HISTOGRAM_MAX_BINS, HISTOGRAM_MIN_BINS};

/// One histogram bin; the last bin is closed at both ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// One sample of the density estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityPoint {
    pub x: f64,
    pub density: f64,
}

/// Summary of a numeric sample
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    /// Number of values summarized
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub histogram: Vec<HistogramBin>,
    pub density: Vec<DensityPoint>,
}

impl NumericSummary {
    /// Summarize `values`; an empty sample yields an all-zero summary
    pub fn from_values(mut values: Vec<f64>) -> Self {
        values.retain(|v| v.is_finite());
        if values.is_empty() {
            return Self::default();
        }
        values.sort_by(f64::total_cmp);

        let min = values[0];
        let max = values[values.len() - 1];
        let mean = mean(&values);
        let std_dev = population_std_dev(&values, mean);
        let q1 = percentile_sorted(&values, 0.25);
        let median = percentile_sorted(&values, 0.5);
        let q3 = percentile_sorted(&values, 0.75);

        Self {
            count: values.len(),
            min,
            max,
            mean,
            std_dev,
            q1,
            median,
            q3,
            histogram: histogram(&values, min, max),
            density: density(&values, min, max, std_dev, q3 - q1),
        }
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

/// Arithmetic mean; 0 for an empty sample
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Standard deviation dividing by the sample size, not `n - 1`
pub fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (sum_sq / values.len() as f64).sqrt()
}

/// Percentile of an unsorted sample; `p` in `[0, 1]`
pub fn percentile(values: &[f64], p: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    percentile_sorted(&sorted, p)
}

/// Percentile of an ascending sample by linear interpolation
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let position = p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

/// Number of histogram bins for a sample of `n` values
pub fn histogram_bin_count(n: usize) -> usize {
    ((n as f64).sqrt().round() as usize).clamp(HISTOGRAM_MIN_BINS, HISTOGRAM_MAX_BINS)
}

/// Equal-width histogram over `[min, max]`; empty when the range is degenerate
pub fn histogram(values: &[f64], min: f64, max: f64) -> Vec<HistogramBin> {
    if values.is_empty() || !(max > min) {
        return Vec::new();
    }
    let bins = histogram_bin_count(values.len());
    let width = (max - min) / bins as f64;

    let mut counts = vec![0usize; bins];
    for &v in values {
        if v < min || v > max {
            continue;
        }
        let index = (((v - min) / width).floor() as usize).min(bins - 1);
        counts[index] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: min + width * i as f64,
            upper: if i + 1 == bins {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count,
        })
        .collect()
}

/// Silverman's rule-of-thumb bandwidth, falling back to 1
pub fn silverman_bandwidth(n: usize, std_dev: f64, iqr: f64) -> f64 {
    let scale = std_dev.min(iqr / 1.34);
    if n <= 1 || !(scale > 0.0) {
        return 1.0;
    }
    0.9 * scale * (n as f64).powf(-0.2)
}

/// Number of points at which the density is sampled
pub fn density_point_count(n: usize) -> usize {
    (2 * n).clamp(DENSITY_MIN_POINTS, DENSITY_MAX_POINTS)
}

/// Gaussian kernel density estimate sampled evenly across `[min, max]`
pub fn density(values: &[f64], min: f64, max: f64, std_dev: f64, iqr: f64) -> Vec<DensityPoint> {
    if values.is_empty() || !(max > min) {
        return Vec::new();
    }
    let n = values.len();
    let h = silverman_bandwidth(n, std_dev, iqr);
    let points = density_point_count(n);
    let step = (max - min) / (points - 1) as f64;
    let norm = 1.0 / (n as f64 * h * (2.0 * PI).sqrt());

    (0..points)
        .map(|i| {
            let x = if i + 1 == points {
                max
            } else {
                min + step * i as f64
            };
            let sum: f64 = values
                .iter()
                .map(|v| {
                    let u = (x - v) / h;
                    (-0.5 * u * u).exp()
                })
                .sum();
            DensityPoint {
                x,
                density: sum * norm,
            }
        })
        .collect()
}
