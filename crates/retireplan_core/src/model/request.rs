//! Engine inputs
//!
//! `SimulationRequest` is what the Monte Carlo engine consumes. `PlanInputs`
//! models the subscriber-facing inputs (ages rather than a horizon) with the
//! bounds an outer layer enforces before anything reaches the engine.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::risk::RiskProfile;
use crate::error::ValidationError;

pub const CURRENT_AGE_BOUNDS: RangeInclusive<u32> = 18..=65;
pub const RETIREMENT_AGE_BOUNDS: RangeInclusive<u32> = 40..=70;
pub const MONTHLY_CONTRIBUTION_BOUNDS: RangeInclusive<f64> = 500.0..=200_000.0;
pub const INCOME_GROWTH_BOUNDS: RangeInclusive<f64> = 0.0..=20.0;
pub const ITERATION_BOUNDS: RangeInclusive<usize> = 1_000..=50_000;

/// One Monte Carlo projection request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub monthly_contribution: f64,
    pub years: u32,
    pub risk_profile: RiskProfile,
    #[serde(default)]
    pub annual_income_growth_pct: f64,
    pub iterations: usize,
    /// Base seed; `None` draws one from process entropy
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SimulationRequest {
    #[must_use]
    pub fn new(monthly_contribution: f64, years: u32, risk_profile: RiskProfile) -> Self {
        Self {
            monthly_contribution,
            years,
            risk_profile,
            annual_income_growth_pct: 0.0,
            iterations: 10_000,
            seed: None,
        }
    }

    #[must_use]
    pub fn with_income_growth(mut self, annual_income_growth_pct: f64) -> Self {
        self.annual_income_growth_pct = annual_income_growth_pct;
        self
    }

    #[must_use]
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn months(&self) -> usize {
        self.years as usize * 12
    }

    /// Monthly contribution growth rate as a fraction
    #[must_use]
    pub fn monthly_growth_rate(&self) -> f64 {
        self.annual_income_growth_pct / 100.0 / 12.0
    }

    /// Check the shape of the request. Iteration bounds depend on engine
    /// configuration and are checked by the engine itself.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.monthly_contribution.is_finite() || self.monthly_contribution <= 0.0 {
            return Err(ValidationError::new(
                "monthly_contribution",
                format!("must be positive, got {}", self.monthly_contribution),
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
        Ok(())
    }
}

/// Subscriber-level planning inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanInputs {
    pub current_age: u32,
    pub retirement_age: u32,
    pub monthly_contribution: f64,
    #[serde(default = "default_income_growth")]
    pub annual_income_growth_pct: f64,
    #[serde(default)]
    pub risk_profile: RiskProfile,
    #[serde(default)]
    pub iterations: Option<usize>,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_income_growth() -> f64 {
    5.0
}

impl PlanInputs {
    #[must_use]
    pub fn years_to_retirement(&self) -> u32 {
        self.retirement_age.saturating_sub(self.current_age)
    }

    /// Validate every field against its documented bounds, reporting the
    /// first offender.
    pub fn validate(&self) -> Result<(), ValidationError> {
        years_between_ages(self.current_age, self.retirement_age)?;
        if !MONTHLY_CONTRIBUTION_BOUNDS.contains(&self.monthly_contribution) {
            return Err(out_of_bounds(
                "monthly_contribution",
                self.monthly_contribution,
                &MONTHLY_CONTRIBUTION_BOUNDS,
            ));
        }
        if !INCOME_GROWTH_BOUNDS.contains(&self.annual_income_growth_pct) {
            return Err(out_of_bounds(
                "annual_income_growth_pct",
                self.annual_income_growth_pct,
                &INCOME_GROWTH_BOUNDS,
            ));
        }
        if let Some(iterations) = self.iterations
            && !ITERATION_BOUNDS.contains(&iterations)
        {
            return Err(out_of_bounds("iterations", iterations, &ITERATION_BOUNDS));
        }
        Ok(())
    }

    /// Validate and convert into an engine request
    pub fn to_request(&self, default_iterations: usize) -> Result<SimulationRequest, ValidationError> {
        self.validate()?;
        Ok(SimulationRequest {
            monthly_contribution: self.monthly_contribution,
            years: self.years_to_retirement(),
            risk_profile: self.risk_profile,
            annual_income_growth_pct: self.annual_income_growth_pct,
            iterations: self.iterations.unwrap_or(default_iterations),
            seed: self.seed,
        })
    }
}

/// Check both ages against their bounds and return the accumulation
/// horizon in years.
pub fn years_between_ages(current_age: u32, retirement_age: u32) -> Result<u32, ValidationError> {
    if !CURRENT_AGE_BOUNDS.contains(&current_age) {
        return Err(out_of_bounds("current_age", current_age, &CURRENT_AGE_BOUNDS));
    }
    if !RETIREMENT_AGE_BOUNDS.contains(&retirement_age) {
        return Err(out_of_bounds("retirement_age", retirement_age, &RETIREMENT_AGE_BOUNDS));
    }
    if retirement_age <= current_age {
        return Err(ValidationError::new(
            "retirement_age",
            format!("must be greater than current_age ({retirement_age} <= {current_age})"),
        ));
    }
    Ok(retirement_age - current_age)
}

fn out_of_bounds<T: std::fmt::Display>(
    field: &'static str,
    value: T,
    bounds: &RangeInclusive<T>,
) -> ValidationError {
    ValidationError::new(
        field,
        format!(
            "{value} is outside [{}, {}]",
            bounds.start(),
            bounds.end()
        ),
    )
}
