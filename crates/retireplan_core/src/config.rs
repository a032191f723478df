//! Engine configuration
//!
//! `EngineConfig` holds every tunable assumption the engine uses: iteration
//! bounds, return ranges per risk tier, default annuity terms, reverse-solver
//! bounds and the default scenario lists. All fields have defaults, so a
//! partial YAML/JSON document deserializes into a complete configuration.

use serde::{Deserialize, Serialize};

use crate::annuity::AnnuityTerms;
use crate::error::ValidationError;
use crate::model::ReturnRanges;

/// Bounds for the reverse contribution solver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub min_contribution: f64,
    pub max_contribution: f64,
    /// Absolute corpus tolerance in currency units
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            min_contribution: 100.0,
            max_contribution: 500_000.0,
            tolerance: 100.0,
            max_iterations: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub default_iterations: usize,
    pub min_iterations: usize,
    /// Hard cap; larger requests are clamped before any trial runs
    pub max_iterations: usize,
    pub return_ranges: ReturnRanges,
    pub annuity: AnnuityTerms,
    pub solver: SolverConfig,
    /// Contribution increases (percent) for sensitivity analysis
    pub sensitivity_increases_pct: Vec<f64>,
    /// Retirement delays (years) for delay analysis
    pub delay_years: Vec<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_iterations: 10_000,
            min_iterations: 1_000,
            max_iterations: 50_000,
            return_ranges: ReturnRanges::default(),
            annuity: AnnuityTerms::default(),
            solver: SolverConfig::default(),
            sensitivity_increases_pct: vec![5.0, 10.0, 20.0],
            delay_years: vec![1, 2, 5],
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.min_iterations == 0 {
            return Err(ValidationError::new("min_iterations", "must be at least 1"));
        }
        if self.min_iterations > self.max_iterations {
            return Err(ValidationError::new(
                "min_iterations",
                format!(
                    "{} exceeds max_iterations ({})",
                    self.min_iterations, self.max_iterations
                ),
            ));
        }
        if !(self.min_iterations..=self.max_iterations).contains(&self.default_iterations) {
            return Err(ValidationError::new(
                "default_iterations",
                format!(
                    "{} is outside [{}, {}]",
                    self.default_iterations, self.min_iterations, self.max_iterations
                ),
            ));
        }
        self.return_ranges.validate()?;
        self.annuity.validate()?;

        let solver = &self.solver;
        if !(solver.min_contribution.is_finite()
            && solver.max_contribution.is_finite()
            && solver.min_contribution < solver.max_contribution)
        {
            return Err(ValidationError::new(
                "solver",
                "min_contribution must be below max_contribution",
            ));
        }
        if !(solver.tolerance.is_finite() && solver.tolerance > 0.0) {
            return Err(ValidationError::new("solver.tolerance", "must be positive"));
        }
        if solver.max_iterations == 0 {
            return Err(ValidationError::new(
                "solver.max_iterations",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}
