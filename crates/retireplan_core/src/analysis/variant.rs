//! Scenario variants: how a base request is perturbed

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::model::SimulationRequest;

/// A perturbation of a base simulation request.
///
/// Implementations only reshape the request; seeding and iteration counts
/// are fixed by the pipeline so every variant sees the same random paths.
pub trait ScenarioVariant: Sync {
    /// Build the variant request from the base request
    fn apply(&self, base: &SimulationRequest) -> Result<SimulationRequest, ValidationError>;

    /// Describe the variant as applied to `base`. Only called once `apply`
    /// has accepted the same base.
    fn describe(&self, base: &SimulationRequest) -> VariantDescriptor;
}

/// Serializable description of an applied variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VariantDescriptor {
    ContributionIncrease {
        increase_pct: f64,
        monthly_contribution: f64,
    },
    RetirementDelay {
        delay_years: u32,
        new_retirement_age: u32,
        horizon_years: u32,
    },
}

/// Scale the starting monthly contribution by `1 + percent/100`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContributionIncrease {
    pub percent: f64,
}

impl ContributionIncrease {
    fn scaled(&self, base: &SimulationRequest) -> f64 {
        base.monthly_contribution * (1.0 + self.percent / 100.0)
    }
}

impl ScenarioVariant for ContributionIncrease {
    fn apply(&self, base: &SimulationRequest) -> Result<SimulationRequest, ValidationError> {
        if !self.percent.is_finite() || self.percent <= -100.0 {
            return Err(ValidationError::new(
                "contribution_increase_pct",
                format!("must be finite and above -100, got {}", self.percent),
            ));
        }
        Ok(SimulationRequest {
            monthly_contribution: self.scaled(base),
            ..base.clone()
        })
    }

    fn describe(&self, base: &SimulationRequest) -> VariantDescriptor {
        VariantDescriptor::ContributionIncrease {
            increase_pct: self.percent,
            monthly_contribution: self.scaled(base),
        }
    }
}

/// Retire `years` later, extending the accumulation horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetirementDelay {
    pub years: u32,
    pub base_retirement_age: u32,
}

impl ScenarioVariant for RetirementDelay {
    fn apply(&self, base: &SimulationRequest) -> Result<SimulationRequest, ValidationError> {
        let overflow =
            || ValidationError::new("delay_years", format!("{} overflows the horizon", self.years));
        let years = base.years.checked_add(self.years).ok_or_else(overflow)?;
        self.base_retirement_age.checked_add(self.years).ok_or_else(overflow)?;
        Ok(SimulationRequest {
            years,
            ..base.clone()
        })
    }

    fn describe(&self, base: &SimulationRequest) -> VariantDescriptor {
        VariantDescriptor::RetirementDelay {
            delay_years: self.years,
            new_retirement_age: self.base_retirement_age.saturating_add(self.years),
            horizon_years: base.years.saturating_add(self.years),
        }
    }
}
