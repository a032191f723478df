//! Order statistics and moments over trial results

use crate::error::CalculationError;
use crate::model::DistributionStatistics;

/// Linear interpolation between order statistics of an already sorted slice.
///
/// `p` is in percent. The rank is `p/100 * (n - 1)`, so `p = 0` is the
/// minimum and `p = 100` the maximum.
#[must_use]
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let rank = (p.clamp(0.0, 100.0) / 100.0) * (n as f64 - 1.0);
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;

    if lower == upper {
        sorted[lower]
    } else {
        let w = rank - lower as f64;
        let (a, b) = (sorted[lower], sorted[upper]);
        // Clamp keeps rounding from stepping outside the bracketing pair
        (a + (b - a) * w).clamp(a, b)
    }
}

/// Sort `values` in place and compute the full distribution summary.
pub fn summarize(values: &mut [f64]) -> Result<DistributionStatistics, CalculationError> {
    if values.is_empty() {
        return Err(CalculationError::EmptySample);
    }
    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(CalculationError::NonFinite {
            quantity: "trial corpus",
            inputs: format!("value={bad}, trials={}", values.len()),
        });
    }

    values.sort_by(f64::total_cmp);

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    Ok(DistributionStatistics {
        num_trials: values.len(),
        mean,
        std_deviation: variance.sqrt(),
        percentile_10: percentile_sorted(values, 10.0),
        percentile_25: percentile_sorted(values, 25.0),
        percentile_50: percentile_sorted(values, 50.0),
        percentile_75: percentile_sorted(values, 75.0),
        percentile_90: percentile_sorted(values, 90.0),
        min: values[0],
        max: values[values.len() - 1],
    })
}
