//! Coefficient-of-variation banding

use serde::{Deserialize, Serialize};

/// Upper bound of the Low band (exclusive)
pub const LOW_BELOW_PCT: f64 = 15.0;
/// Upper bound of the Medium band (inclusive)
pub const MEDIUM_UP_TO_PCT: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolatilityLevel {
    Low,
    Medium,
    High,
    /// Mean was zero or negative
    Undefined,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityIndex {
    /// `std_deviation / mean * 100`, rounded to 2 decimals
    pub percentage: f64,
    pub level: VolatilityLevel,
}

/// Classify outcome dispersion as Low (< 15%), Medium (15% to 30%
/// inclusive) or High (> 30%). Bands apply to the exact ratio; only the
/// reported percentage is rounded.
#[must_use]
pub fn classify_volatility(std_deviation: f64, mean: f64) -> VolatilityIndex {
    if mean.is_nan() || mean <= 0.0 || !std_deviation.is_finite() {
        return VolatilityIndex {
            percentage: 0.0,
            level: VolatilityLevel::Undefined,
        };
    }

    let cv_pct = std_deviation * 100.0 / mean;
    let level = if cv_pct < LOW_BELOW_PCT {
        VolatilityLevel::Low
    } else if cv_pct <= MEDIUM_UP_TO_PCT {
        VolatilityLevel::Medium
    } else {
        VolatilityLevel::High
    };

    VolatilityIndex {
        percentage: round2(cv_pct),
        level,
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_lands_in_medium() {
        let index = classify_volatility(7_500_000.0, 50_000_000.0);
        assert_eq!(index.percentage, 15.0);
        assert_eq!(index.level, VolatilityLevel::Medium);
    }

    #[test]
    fn test_band_uses_unrounded_ratio() {
        let just_below = classify_volatility(14.996, 100.0);
        assert_eq!(just_below.percentage, 15.0);
        assert_eq!(just_below.level, VolatilityLevel::Low);

        let just_above = classify_volatility(30.004, 100.0);
        assert_eq!(just_above.percentage, 30.0);
        assert_eq!(just_above.level, VolatilityLevel::High);
    }

    #[test]
    fn test_bands() {
        assert_eq!(classify_volatility(10.0, 100.0).level, VolatilityLevel::Low);
        assert_eq!(classify_volatility(30.0, 100.0).level, VolatilityLevel::Medium);
        assert_eq!(classify_volatility(31.0, 100.0).level, VolatilityLevel::High);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(classify_volatility(1.0, 3.0).percentage, 33.33);
    }

    #[test]
    fn test_non_positive_mean_is_undefined() {
        for mean in [0.0, -5.0, f64::NAN] {
            let index = classify_volatility(1.0, mean);
            assert_eq!(index.level, VolatilityLevel::Undefined);
            assert_eq!(index.percentage, 0.0);
        }
    }
}
