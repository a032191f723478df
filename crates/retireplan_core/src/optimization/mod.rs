//! Reverse solving: the contribution needed for a target pension
//!
//! The target monthly pension is converted into the corpus that would fund
//! it under the annuity terms, then the starting monthly contribution is
//! found by bisection over the deterministic projection at the risk
//! profile's expected return.
//!
//! # Example
//!
//! ```ignore
//! use retireplan_core::{EngineConfig, RiskProfile};
//! use retireplan_core::optimization::{PensionTarget, solve_required_contribution};
//!
//! let target = PensionTarget::new(50_000.0, 30, RiskProfile::Moderate)
//!     .with_income_growth(5.0);
//! let solution = solve_required_contribution(&EngineConfig::default(), &target)?;
//! println!("Contribute {:.0}/month", solution.monthly_contribution);
//! ```

mod binary_search;
mod result;

pub use binary_search::{Bisection, ProgressCallback, bisect_increasing};
pub use result::{ContributionSolution, FeasibilityRating, TerminationReason};

use serde::{Deserialize, Serialize};

use crate::annuity::AnnuityTerms;
use crate::config::EngineConfig;
use crate::error::{CalculationError, SimulationError, ValidationError, ensure_finite};
use crate::model::RiskProfile;
use crate::projection::{corpus_deterministic, total_contributions};

/// Desired retirement income and the plan that must fund it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PensionTarget {
    pub desired_monthly_pension: f64,
    pub years: u32,
    #[serde(default)]
    pub risk_profile: RiskProfile,
    #[serde(default)]
    pub annual_income_growth_pct: f64,
    /// Overrides the configured annuity terms
    #[serde(default)]
    pub annuity: Option<AnnuityTerms>,
}

impl PensionTarget {
    #[must_use]
    pub fn new(desired_monthly_pension: f64, years: u32, risk_profile: RiskProfile) -> Self {
        Self {
            desired_monthly_pension,
            years,
            risk_profile,
            annual_income_growth_pct: 0.0,
            annuity: None,
        }
    }

    #[must_use]
    pub fn with_income_growth(mut self, annual_income_growth_pct: f64) -> Self {
        self.annual_income_growth_pct = annual_income_growth_pct;
        self
    }

    #[must_use]
    pub fn with_annuity(mut self, terms: AnnuityTerms) -> Self {
        self.annuity = Some(terms);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.desired_monthly_pension.is_finite() || self.desired_monthly_pension <= 0.0 {
            return Err(ValidationError::new(
                "desired_monthly_pension",
                format!("must be positive, got {}", self.desired_monthly_pension),
            ));
        }
        if self.years == 0 {
            return Err(ValidationError::new("years", "must be at least 1"));
        }
        if !self.annual_income_growth_pct.is_finite() || self.annual_income_growth_pct < 0.0 {
            return Err(ValidationError::new(
                "annual_income_growth_pct",
                format!("must be non-negative, got {}", self.annual_income_growth_pct),
            ));
        }
        if let Some(terms) = &self.annuity {
            terms.validate()?;
        }
        Ok(())
    }
}

/// Corpus needed at retirement to fund a monthly pension
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RequiredCorpus {
    pub annuity_corpus: f64,
    pub total_corpus: f64,
}

pub fn required_corpus_for_pension(
    monthly_pension: f64,
    terms: &AnnuityTerms,
) -> Result<RequiredCorpus, CalculationError> {
    if terms.rate_pct <= 0.0 {
        return Err(CalculationError::ZeroDenominator {
            quantity: "required annuity corpus",
            inputs: format!("annuity rate_pct={}", terms.rate_pct),
        });
    }
    if terms.allocation <= 0.0 {
        return Err(CalculationError::ZeroDenominator {
            quantity: "required total corpus",
            inputs: format!("annuity allocation={}", terms.allocation),
        });
    }

    let annuity_corpus = monthly_pension * 12.0 * 100.0 / terms.rate_pct;
    Ok(RequiredCorpus {
        annuity_corpus,
        total_corpus: annuity_corpus / terms.allocation,
    })
}

pub fn solve_required_contribution(
    config: &EngineConfig,
    target: &PensionTarget,
) -> Result<ContributionSolution, SimulationError> {
    solve_required_contribution_with_progress(config, target, None)
}

/// Find the starting monthly contribution that funds `target`.
///
/// Non-convergence is not an error: the last midpoint is returned with
/// `converged == false`.
pub fn solve_required_contribution_with_progress(
    config: &EngineConfig,
    target: &PensionTarget,
    progress_callback: Option<&ProgressCallback>,
) -> Result<ContributionSolution, SimulationError> {
    config.validate()?;
    target.validate()?;

    let terms = target.annuity.unwrap_or(config.annuity);
    let required = required_corpus_for_pension(target.desired_monthly_pension, &terms)?;
    let expected_return = config
        .return_ranges
        .range(target.risk_profile)
        .expected_pct();
    let solver = &config.solver;

    tracing::debug!(
        pension = target.desired_monthly_pension,
        required_corpus = required.total_corpus,
        expected_return,
        years = target.years,
        "Solving for required contribution"
    );

    let search = bisect_increasing(
        |contribution| {
            corpus_deterministic(
                contribution,
                target.years,
                expected_return,
                target.annual_income_growth_pct,
            )
        },
        (solver.min_contribution, solver.max_contribution),
        required.total_corpus,
        solver.tolerance,
        solver.max_iterations,
        progress_callback,
    );

    let monthly_contribution = search.value;
    let termination_reason = if search.converged {
        TerminationReason::Converged
    } else {
        tracing::warn!(
            iterations = search.iterations,
            contribution = monthly_contribution,
            projected = search.objective_value,
            target = required.total_corpus,
            "Contribution solver did not converge"
        );
        TerminationReason::MaxIterationsReached
    };

    let total = total_contributions(
        monthly_contribution,
        target.years,
        target.annual_income_growth_pct,
    );
    let investment_multiple = ensure_finite(
        required.total_corpus / total,
        "investment multiple",
        || format!("required_corpus={}, total_contributions={total}", required.total_corpus),
    )?;

    Ok(ContributionSolution {
        converged: search.converged,
        monthly_contribution,
        iterations: search.iterations,
        termination_reason,
        required_corpus: required.total_corpus,
        required_annuity_corpus: required.annuity_corpus,
        total_contributions: total,
        investment_multiple,
        feasibility: FeasibilityRating::from_contribution(monthly_contribution),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_corpus() {
        // 2000/month at 6% from a 40% allocation
        let required = required_corpus_for_pension(2_000.0, &AnnuityTerms::default()).unwrap();
        assert!((required.annuity_corpus - 400_000.0).abs() < 1e-6);
        assert!((required.total_corpus - 1_000_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_rate_is_calculation_error() {
        let err = required_corpus_for_pension(2_000.0, &AnnuityTerms::new(0.4, 0.0)).unwrap_err();
        assert!(matches!(err, CalculationError::ZeroDenominator { .. }));
    }

    #[test]
    fn test_round_trip_reproduces_pension() {
        let config = EngineConfig::default();
        let target = PensionTarget::new(50_000.0, 30, RiskProfile::Moderate).with_income_growth(5.0);
        let solution = solve_required_contribution(&config, &target).unwrap();

        assert!(solution.converged);
        assert_eq!(solution.termination_reason, TerminationReason::Converged);

        let corpus = corpus_deterministic(solution.monthly_contribution, 30, 7.0, 5.0);
        assert!((corpus - solution.required_corpus).abs() < config.solver.tolerance);

        let pension = config.annuity.monthly_pension(corpus);
        assert!(
            (pension - 50_000.0).abs() < 1.0,
            "round trip pension {pension}"
        );
        assert!(solution.investment_multiple > 1.0);
    }

    #[test]
    fn test_unreachable_target_reports_best_effort() {
        let config = EngineConfig::default();
        let target = PensionTarget::new(10_000_000.0, 1, RiskProfile::Conservative);
        let solution = solve_required_contribution(&config, &target).unwrap();

        assert!(!solution.converged);
        assert_eq!(
            solution.termination_reason,
            TerminationReason::MaxIterationsReached
        );
        assert_eq!(solution.iterations, config.solver.max_iterations);
        assert!(solution.monthly_contribution > 499_000.0);
        assert_eq!(solution.feasibility, FeasibilityRating::HighlyChallenging);
    }

    #[test]
    fn test_invalid_target() {
        let config = EngineConfig::default();
        let err = solve_required_contribution(
            &config,
            &PensionTarget::new(0.0, 10, RiskProfile::Moderate),
        )
        .unwrap_err();
        assert!(matches!(err, SimulationError::Validation(e) if e.field == "desired_monthly_pension"));
    }
}
