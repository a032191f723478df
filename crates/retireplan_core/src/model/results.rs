//! Simulation outputs
//!
//! Callers only ever see aggregated statistics; raw trial values stay inside
//! the engine.

use serde::{Deserialize, Serialize};

use super::request::SimulationRequest;
use crate::error::ResourceLimit;

/// Summary statistics over the final corpus of every trial
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionStatistics {
    pub num_trials: usize,
    pub mean: f64,
    /// Population standard deviation
    pub std_deviation: f64,
    pub percentile_10: f64,
    pub percentile_25: f64,
    pub percentile_50: f64,
    pub percentile_75: f64,
    pub percentile_90: f64,
    pub min: f64,
    pub max: f64,
}

impl DistributionStatistics {
    #[must_use]
    pub fn median(&self) -> f64 {
        self.percentile_50
    }

    /// 50% interval is `[p25, p75]`, 80% interval is `[p10, p90]`
    #[must_use]
    pub fn confidence_intervals(&self) -> ConfidenceIntervals {
        ConfidenceInterval::pair(self)
    }

    /// Ordering invariant `min <= p10 <= p25 <= p50 <= p75 <= p90 <= max`
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        let chain = [
            self.min,
            self.percentile_10,
            self.percentile_25,
            self.percentile_50,
            self.percentile_75,
            self.percentile_90,
            self.max,
        ];
        chain.windows(2).all(|w| w[0] <= w[1])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub confidence_pct: u8,
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceInterval {
    fn pair(stats: &DistributionStatistics) -> ConfidenceIntervals {
        ConfidenceIntervals {
            confidence_50: ConfidenceInterval {
                confidence_pct: 50,
                lower: stats.percentile_25,
                upper: stats.percentile_75,
            },
            confidence_80: ConfidenceInterval {
                confidence_pct: 80,
                lower: stats.percentile_10,
                upper: stats.percentile_90,
            },
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceIntervals {
    pub confidence_50: ConfidenceInterval,
    pub confidence_80: ConfidenceInterval,
}

/// Result of one Monte Carlo invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloSummary {
    /// The request as executed (after any iteration clamp)
    pub request: SimulationRequest,
    /// Seed trial streams were derived from
    pub base_seed: u64,
    pub stats: DistributionStatistics,
    /// Present when the requested iteration count was clamped
    pub resource_limit: Option<ResourceLimit>,
}
