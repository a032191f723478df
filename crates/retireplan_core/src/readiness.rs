//! Composite retirement readiness score
//!
//! Three banded components, each in `[0, 100]`, weighted 50/30/20:
//! corpus adequacy (median against required corpus), downside protection
//! (width of the p10..p90 spread relative to the median) and time horizon.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::model::{DistributionStatistics, RiskProfile};

/// Component weights in percent
pub const ADEQUACY_WEIGHT: u32 = 50;
pub const DOWNSIDE_WEIGHT: u32 = 30;
pub const TIME_WEIGHT: u32 = 20;

pub const STRONG_OUTLOOK_MIN: u8 = 75;
pub const MODERATE_CONFIDENCE_MIN: u8 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadinessLabel {
    HighRisk,
    ModerateConfidence,
    StrongOutlook,
}

impl ReadinessLabel {
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        if score >= STRONG_OUTLOOK_MIN {
            Self::StrongOutlook
        } else if score >= MODERATE_CONFIDENCE_MIN {
            Self::ModerateConfidence
        } else {
            Self::HighRisk
        }
    }
}

/// Outcome spread used for the downside component
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorpusSpread {
    pub percentile_10: f64,
    pub percentile_90: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReadinessInputs {
    pub median_corpus: f64,
    pub required_corpus: f64,
    pub years_to_retirement: u32,
    pub risk_profile: RiskProfile,
    /// Without a spread, downside protection falls back to the risk profile
    pub spread: Option<CorpusSpread>,
}

/// What the downside component was derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DownsideBasis {
    PercentileSpread,
    RiskProfile,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub corpus_adequacy: u8,
    pub downside_protection: u8,
    pub downside_basis: DownsideBasis,
    pub time_horizon: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReadinessScore {
    pub score: u8,
    pub label: ReadinessLabel,
    pub breakdown: ScoreBreakdown,
    /// `median / required`, reported as 1.0 when no requirement is set
    pub adequacy_ratio: f64,
}

pub fn score_readiness(inputs: &ReadinessInputs) -> Result<ReadinessScore, ValidationError> {
    check_finite("median_corpus", inputs.median_corpus)?;
    check_finite("required_corpus", inputs.required_corpus)?;
    if let Some(spread) = inputs.spread {
        check_finite("spread.percentile_10", spread.percentile_10)?;
        check_finite("spread.percentile_90", spread.percentile_90)?;
    }

    let (adequacy_ratio, corpus_adequacy) = if inputs.required_corpus <= 0.0 {
        (1.0, 100)
    } else {
        let ratio = inputs.median_corpus / inputs.required_corpus;
        (ratio, adequacy_band(ratio))
    };

    let (downside_protection, downside_basis) = match inputs.spread {
        Some(spread) => (
            downside_band(inputs.median_corpus, spread),
            DownsideBasis::PercentileSpread,
        ),
        None => (
            profile_stability(inputs.risk_profile),
            DownsideBasis::RiskProfile,
        ),
    };

    let time_horizon = time_band(inputs.years_to_retirement);

    // Integer weighting keeps exact halves rounding up
    let weighted = u32::from(corpus_adequacy) * ADEQUACY_WEIGHT
        + u32::from(downside_protection) * DOWNSIDE_WEIGHT
        + u32::from(time_horizon) * TIME_WEIGHT;
    let score = ((weighted + 50) / 100).min(100) as u8;

    Ok(ReadinessScore {
        score,
        label: ReadinessLabel::from_score(score),
        breakdown: ScoreBreakdown {
            corpus_adequacy,
            downside_protection,
            downside_basis,
            time_horizon,
        },
        adequacy_ratio,
    })
}

/// Score a simulated distribution against a required corpus
pub fn score_from_distribution(
    stats: &DistributionStatistics,
    required_corpus: f64,
    years_to_retirement: u32,
    risk_profile: RiskProfile,
) -> Result<ReadinessScore, ValidationError> {
    score_readiness(&ReadinessInputs {
        median_corpus: stats.percentile_50,
        required_corpus,
        years_to_retirement,
        risk_profile,
        spread: Some(CorpusSpread {
            percentile_10: stats.percentile_10,
            percentile_90: stats.percentile_90,
        }),
    })
}

fn check_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new(field, format!("must be finite, got {value}")))
    }
}

fn adequacy_band(ratio: f64) -> u8 {
    match ratio {
        r if r >= 1.2 => 100,
        r if r >= 1.0 => 90,
        r if r >= 0.8 => 70,
        r if r >= 0.6 => 50,
        r if r >= 0.4 => 30,
        _ => 10,
    }
}

fn downside_band(median: f64, spread: CorpusSpread) -> u8 {
    if median <= 0.0 {
        return 50;
    }
    let width = (spread.percentile_90 - spread.percentile_10) / (2.0 * median);
    match width {
        w if w < 0.3 => 95,
        w if w < 0.5 => 80,
        w if w < 0.7 => 65,
        w if w < 0.9 => 50,
        _ => 35,
    }
}

fn profile_stability(profile: RiskProfile) -> u8 {
    match profile {
        RiskProfile::Conservative => 100,
        RiskProfile::Moderate => 75,
        RiskProfile::Aggressive => 50,
    }
}

fn time_band(years: u32) -> u8 {
    match years {
        25.. => 100,
        20..=24 => 90,
        15..=19 => 75,
        10..=14 => 60,
        5..=9 => 40,
        _ => 20,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(median: f64, required: f64, years: u32) -> ReadinessInputs {
        ReadinessInputs {
            median_corpus: median,
            required_corpus: required,
            years_to_retirement: years,
            risk_profile: RiskProfile::Conservative,
            spread: None,
        }
    }

    #[test]
    fn test_strong_outlook_vector() {
        let score = score_readiness(&inputs(1_200_000.0, 1_000_000.0, 25)).unwrap();
        assert!(score.score >= 75, "score {}", score.score);
        assert_eq!(score.label, ReadinessLabel::StrongOutlook);
        assert_eq!(score.breakdown.corpus_adequacy, 100);
        assert_eq!(score.breakdown.downside_basis, DownsideBasis::RiskProfile);
    }

    #[test]
    fn test_strong_outlook_holds_for_any_spread() {
        // Adequacy and time alone contribute 70, and the weakest downside band adds 10.5
        for p90 in [1_300_000.0, 1_700_000.0, 2_000_000.0, 2_500_000.0, 5_000_000.0] {
            let mut i = inputs(1_200_000.0, 1_000_000.0, 25);
            i.spread = Some(CorpusSpread {
                percentile_10: 900_000.0,
                percentile_90: p90,
            });
            let score = score_readiness(&i).unwrap();
            assert_eq!(score.label, ReadinessLabel::StrongOutlook, "p90 {p90}");
        }
    }

    #[test]
    fn test_no_requirement_is_adequate() {
        let score = score_readiness(&inputs(10.0, 0.0, 5)).unwrap();
        assert_eq!(score.adequacy_ratio, 1.0);
        assert_eq!(score.breakdown.corpus_adequacy, 100);
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(adequacy_band(1.0), 90);
        assert_eq!(adequacy_band(0.39), 10);
        assert_eq!(time_band(24), 90);
        assert_eq!(time_band(4), 20);
        assert_eq!(time_band(40), 100);

        let spread = CorpusSpread {
            percentile_10: 0.0,
            percentile_90: 100.0,
        };
        assert_eq!(downside_band(0.0, spread), 50);
        // width = 100 / 200 = 0.5
        assert_eq!(downside_band(100.0, spread), 65);
    }

    #[test]
    fn test_weighted_score_and_label() {
        // 30 * 0.5 + 65 * 0.3 + 40 * 0.2 = 42.5 -> 43
        let mut i = inputs(450.0, 1_000.0, 5);
        i.spread = Some(CorpusSpread {
            percentile_10: 300.0,
            percentile_90: 800.0,
        });
        let score = score_readiness(&i).unwrap();
        assert_eq!(score.breakdown.corpus_adequacy, 30);
        assert_eq!(score.breakdown.downside_protection, 65);
        assert_eq!(score.score, 43);
        assert_eq!(score.label, ReadinessLabel::HighRisk);
    }

    #[test]
    fn test_labels() {
        assert_eq!(ReadinessLabel::from_score(75), ReadinessLabel::StrongOutlook);
        assert_eq!(ReadinessLabel::from_score(74), ReadinessLabel::ModerateConfidence);
        assert_eq!(ReadinessLabel::from_score(50), ReadinessLabel::ModerateConfidence);
        assert_eq!(ReadinessLabel::from_score(49), ReadinessLabel::HighRisk);
    }

    #[test]
    fn test_rejects_non_finite() {
        let err = score_readiness(&inputs(f64::NAN, 1.0, 10)).unwrap_err();
        assert_eq!(err.field, "median_corpus");
    }
}
