//! Differences between a scenario and its base run

use serde::{Deserialize, Serialize};

use crate::annuity::PensionRange;
use crate::model::DistributionStatistics;

/// `(value - base) / base * 100`, or 0 when the base is not positive
#[must_use]
pub fn percent_change(base: f64, value: f64) -> f64 {
    if base > 0.0 {
        (value - base) / base * 100.0
    } else {
        0.0
    }
}

/// Extra gain from a retirement delay beyond what the extra years alone
/// would add in proportion: `(p50 gain ratio - delay / base_years) * 100`.
#[must_use]
pub fn compounding_benefit_pct(base_p50: f64, delayed_p50: f64, delay_years: u32, base_years: u32) -> f64 {
    if base_p50 <= 0.0 || base_years == 0 {
        return 0.0;
    }
    let gain_ratio = (delayed_p50 - base_p50) / base_p50;
    (gain_ratio - f64::from(delay_years) / f64::from(base_years)) * 100.0
}

/// Absolute and percentage change of a scenario against the base run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDiff {
    pub p10_difference: f64,
    pub p50_difference: f64,
    pub p90_difference: f64,
    pub p10_pct_change: f64,
    pub p50_pct_change: f64,
    pub p90_pct_change: f64,
    /// Change in the monthly pension derived from the median corpus
    pub monthly_pension_difference: f64,
    pub monthly_pension_pct_change: f64,
}

impl ScenarioDiff {
    #[must_use]
    pub fn between(
        base: &DistributionStatistics,
        base_pension: &PensionRange,
        scenario: &DistributionStatistics,
        scenario_pension: &PensionRange,
    ) -> Self {
        Self {
            p10_difference: scenario.percentile_10 - base.percentile_10,
            p50_difference: scenario.percentile_50 - base.percentile_50,
            p90_difference: scenario.percentile_90 - base.percentile_90,
            p10_pct_change: percent_change(base.percentile_10, scenario.percentile_10),
            p50_pct_change: percent_change(base.percentile_50, scenario.percentile_50),
            p90_pct_change: percent_change(base.percentile_90, scenario.percentile_90),
            monthly_pension_difference: scenario_pension.expected - base_pension.expected,
            monthly_pension_pct_change: percent_change(
                base_pension.expected,
                scenario_pension.expected,
            ),
        }
    }
}
