//! Scenario analysis: a base run compared against perturbed variants.
//!
//! Contribution sensitivity and retirement delay are both expressed as
//! `ScenarioVariant`s fed through one pipeline:
//!
//! ```ignore
//! use retireplan_core::analysis::{ContributionIncrease, run_variants};
//!
//! let variants = [5.0, 10.0, 20.0].map(|percent| ContributionIncrease { percent });
//! let comparison = run_variants(&config, &request, &variants, &config.annuity, None)?;
//! for v in &comparison.variants {
//!     println!("{:?}: p50 {:+.1}%", v.variant, v.diff.p50_pct_change);
//! }
//! ```
//!
//! All runs in one evaluation share the base seed (common random numbers).

mod evaluator;
mod metrics;
mod variant;

pub use evaluator::*;
pub use metrics::*;
pub use variant::*;
