//! Retirement corpus projection library
//!
//! This crate provides a Monte Carlo engine that projects the distribution of
//! a retirement corpus built from monthly contributions, and the analytics
//! derived from that distribution:
//! - Uniform annual returns per risk tier (conservative, moderate, aggressive)
//! - Contributions that grow monthly with income
//! - Percentile statistics over tens of thousands of trials, run in parallel
//! - Annuity/lump-sum split of the corpus and the resulting monthly pension
//! - Reverse solving for the contribution needed to fund a target pension
//! - Readiness scoring, volatility classification, sensitivity and delay
//!   comparisons
//!
//! # Example
//!
//! ```ignore
//! use retireplan_core::{EngineConfig, RiskProfile, SimulationRequest};
//! use retireplan_core::simulation::monte_carlo_simulate;
//!
//! let config = EngineConfig::default();
//! let request = SimulationRequest::new(5_000.0, 30, RiskProfile::Moderate)
//!     .with_income_growth(5.0)
//!     .with_seed(42);
//! let summary = monte_carlo_simulate(&config, &request)?;
//! println!("Median corpus: {:.0}", summary.stats.percentile_50);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod accumulate;
pub mod analysis;
pub mod annuity;
pub mod error;
pub mod market;
pub mod optimization;
pub mod projection;
pub mod readiness;
pub mod simulation;
pub mod stats;
pub mod volatility;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use annuity::AnnuityTerms;
pub use config::{EngineConfig, SolverConfig};
pub use error::{CalculationError, ResourceLimit, SimulationError, ValidationError};
pub use model::{
    DistributionStatistics, MonteCarloSummary, PlanInputs, ReturnRange, ReturnRanges,
    RiskProfile, SimulationRequest,
};
