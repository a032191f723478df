//! Reverse-solve result types

use serde::{Deserialize, Serialize};

/// Reason the solver stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationReason {
    /// Projected corpus within tolerance of the target
    Converged,

    /// Iteration budget exhausted; the last midpoint is reported
    MaxIterationsReached,
}

/// How demanding a required monthly contribution is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FeasibilityRating {
    HighlyFeasible,
    Feasible,
    ModeratelyChallenging,
    Challenging,
    HighlyChallenging,
}

impl FeasibilityRating {
    #[must_use]
    pub fn from_contribution(monthly_contribution: f64) -> Self {
        match monthly_contribution {
            c if c < 5_000.0 => Self::HighlyFeasible,
            c if c < 15_000.0 => Self::Feasible,
            c if c < 30_000.0 => Self::ModeratelyChallenging,
            c if c < 50_000.0 => Self::Challenging,
            _ => Self::HighlyChallenging,
        }
    }
}

/// Outcome of solving for the contribution that funds a target pension
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContributionSolution {
    /// Whether the projected corpus came within tolerance of the target
    pub converged: bool,

    /// Required (or best-effort) starting monthly contribution
    pub monthly_contribution: f64,

    /// Bisection steps performed
    pub iterations: usize,

    pub termination_reason: TerminationReason,

    /// Total corpus needed at retirement
    pub required_corpus: f64,

    /// Share of `required_corpus` that is annuitised
    pub required_annuity_corpus: f64,

    /// Sum of all contributions at the solved rate
    pub total_contributions: f64,

    /// `required_corpus / total_contributions`
    pub investment_multiple: f64,

    pub feasibility: FeasibilityRating,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feasibility_bands() {
        use FeasibilityRating::*;
        let cases = [
            (4_999.0, HighlyFeasible),
            (5_000.0, Feasible),
            (14_999.0, Feasible),
            (15_000.0, ModeratelyChallenging),
            (30_000.0, Challenging),
            (49_999.99, Challenging),
            (50_000.0, HighlyChallenging),
        ];
        for (contribution, expected) in cases {
            assert_eq!(
                FeasibilityRating::from_contribution(contribution),
                expected,
                "contribution {contribution}"
            );
        }
    }
}
