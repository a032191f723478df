//! Splitting a corpus between an income annuity and a lump sum

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::model::DistributionStatistics;

/// Fraction of the corpus that buys an annuity, and the annuity's annual rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnuityTerms {
    /// Fraction in `[0, 1]`
    pub allocation: f64,
    /// Annual annuity rate in percent
    pub rate_pct: f64,
}

impl Default for AnnuityTerms {
    fn default() -> Self {
        Self {
            allocation: 0.40,
            rate_pct: 6.0,
        }
    }
}

impl AnnuityTerms {
    #[must_use]
    pub const fn new(allocation: f64, rate_pct: f64) -> Self {
        Self {
            allocation,
            rate_pct,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=1.0).contains(&self.allocation) {
            return Err(ValidationError::new(
                "annuity.allocation",
                format!("{} is outside [0, 1]", self.allocation),
            ));
        }
        if !self.rate_pct.is_finite() || self.rate_pct < 0.0 {
            return Err(ValidationError::new(
                "annuity.rate_pct",
                format!("must be non-negative, got {}", self.rate_pct),
            ));
        }
        Ok(())
    }

    /// Monthly income from annuitising `allocation` of `corpus`
    #[must_use]
    pub fn monthly_pension(&self, corpus: f64) -> f64 {
        corpus * self.allocation * self.rate_pct / 100.0 / 12.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnuityAllocation {
    pub total_corpus: f64,
    pub annuity_allocation_pct: f64,
    pub lump_sum_allocation_pct: f64,
    pub annuity_corpus: f64,
    pub lump_sum_amount: f64,
    pub annuity_rate_pct: f64,
    pub monthly_pension: f64,
}

pub fn allocate_corpus(
    corpus: f64,
    terms: &AnnuityTerms,
) -> Result<AnnuityAllocation, ValidationError> {
    terms.validate()?;
    if !corpus.is_finite() {
        return Err(ValidationError::new("corpus", "must be finite"));
    }

    let annuity_corpus = corpus * terms.allocation;
    let annuity_allocation_pct = terms.allocation * 100.0;

    Ok(AnnuityAllocation {
        total_corpus: corpus,
        annuity_allocation_pct,
        lump_sum_allocation_pct: 100.0 - annuity_allocation_pct,
        annuity_corpus,
        // Remainder, so the two parts always sum to the total
        lump_sum_amount: corpus - annuity_corpus,
        annuity_rate_pct: terms.rate_pct,
        monthly_pension: annuity_corpus * terms.rate_pct / 100.0 / 12.0,
    })
}

/// Monthly pension at the pessimistic, median and optimistic corpus
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PensionRange {
    /// From the 10th percentile corpus
    pub pessimistic: f64,
    /// From the median corpus
    pub expected: f64,
    /// From the 90th percentile corpus
    pub optimistic: f64,
}

pub fn pension_range(
    stats: &DistributionStatistics,
    terms: &AnnuityTerms,
) -> Result<PensionRange, ValidationError> {
    terms.validate()?;
    Ok(PensionRange {
        pessimistic: terms.monthly_pension(stats.percentile_10),
        expected: terms.monthly_pension(stats.percentile_50),
        optimistic: terms.monthly_pension(stats.percentile_90),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_default_terms() {
        let allocation = allocate_corpus(1_000_000.0, &AnnuityTerms::default()).unwrap();
        assert_approx(allocation.annuity_corpus, 400_000.0);
        assert_approx(allocation.lump_sum_amount, 600_000.0);
        assert_approx(allocation.monthly_pension, 2_000.0);
        assert_approx(allocation.annuity_allocation_pct, 40.0);
        assert_approx(allocation.lump_sum_allocation_pct, 60.0);
    }

    #[test]
    fn test_custom_terms() {
        let allocation = allocate_corpus(1_200_000.0, &AnnuityTerms::new(0.5, 8.0)).unwrap();
        assert_approx(allocation.monthly_pension, 4_000.0);
        assert_approx(allocation.lump_sum_amount, 600_000.0);
    }

    #[test]
    fn test_parts_sum_to_total() {
        for corpus in [0.0, 1.0, 12_345.67, 98_765_432.1] {
            for allocation in [0.0, 0.13, 0.4, 0.77, 1.0] {
                let a = allocate_corpus(corpus, &AnnuityTerms::new(allocation, 6.0)).unwrap();
                assert_approx(a.annuity_corpus + a.lump_sum_amount, corpus);
            }
        }
    }

    #[test]
    fn test_invalid_terms() {
        let err = allocate_corpus(1.0, &AnnuityTerms::new(1.5, 6.0)).unwrap_err();
        assert_eq!(err.field, "annuity.allocation");

        let err = allocate_corpus(1.0, &AnnuityTerms::new(0.4, -1.0)).unwrap_err();
        assert_eq!(err.field, "annuity.rate_pct");
    }

    #[test]
    fn test_pension_range_uses_percentiles() {
        let stats = DistributionStatistics {
            num_trials: 3,
            mean: 1_000_000.0,
            std_deviation: 1.0,
            percentile_10: 500_000.0,
            percentile_25: 750_000.0,
            percentile_50: 1_000_000.0,
            percentile_75: 1_250_000.0,
            percentile_90: 1_500_000.0,
            min: 400_000.0,
            max: 1_600_000.0,
        };
        let range = pension_range(&stats, &AnnuityTerms::default()).unwrap();
        assert_approx(range.pessimistic, 1_000.0);
        assert_approx(range.expected, 2_000.0);
        assert_approx(range.optimistic, 3_000.0);
    }
}
