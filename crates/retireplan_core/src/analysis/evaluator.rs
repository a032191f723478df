//! Scenario evaluator - runs a base request and its variants.
//!
//! Every run in one evaluation shares the base seed, so trial `i` of each
//! variant sees the same return draws as trial `i` of the base run. Scaling
//! the contribution therefore scales each trial's corpus, and extending the
//! horizon extends each trial's path, which keeps comparisons monotone.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::annuity::{AnnuityTerms, PensionRange, pension_range};
use crate::config::EngineConfig;
use crate::error::{ResourceLimit, SimulationError};
use crate::model::{DistributionStatistics, PlanInputs, RiskProfile, SimulationRequest};
use crate::simulation::{MonteCarloProgress, monte_carlo_simulate_with_progress};
use crate::volatility::{VolatilityIndex, classify_volatility};

use super::metrics::{ScenarioDiff, compounding_benefit_pct, percent_change};
use super::variant::{ContributionIncrease, RetirementDelay, ScenarioVariant, VariantDescriptor};

/// One simulated scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    /// Request as executed
    pub request: SimulationRequest,
    pub stats: DistributionStatistics,
    pub pension: PensionRange,
    pub resource_limit: Option<ResourceLimit>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantResult {
    pub variant: VariantDescriptor,
    pub outcome: ScenarioOutcome,
    pub diff: ScenarioDiff,
}

/// A base run and each variant compared against it, in input order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantComparison {
    pub base_seed: u64,
    pub base: ScenarioOutcome,
    pub variants: Vec<VariantResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DelayBenefit {
    pub delay_years: u32,
    pub new_retirement_age: u32,
    pub horizon_years: u32,
    pub compounding_benefit_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelayReport {
    pub base_retirement_age: u32,
    pub base_horizon_years: u32,
    pub comparison: VariantComparison,
    /// Aligned with `comparison.variants`
    pub benefits: Vec<DelayBenefit>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileOutcome {
    pub risk_profile: RiskProfile,
    pub outcome: ScenarioOutcome,
    pub volatility: VolatilityIndex,
}

/// Spread from the conservative p10 to the aggressive p90
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorpusRange {
    pub minimum: f64,
    pub maximum: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileComparison {
    pub base_seed: u64,
    /// Conservative, moderate, aggressive
    pub profiles: Vec<ProfileOutcome>,
    pub corpus_range: CorpusRange,
    /// Median gain from stepping up one risk tier
    pub conservative_to_moderate_upside_pct: f64,
    pub moderate_to_aggressive_upside_pct: f64,
}

fn simulate_outcome(
    config: &EngineConfig,
    request: &SimulationRequest,
    terms: &AnnuityTerms,
    progress: Option<&MonteCarloProgress>,
) -> Result<ScenarioOutcome, SimulationError> {
    let summary = monte_carlo_simulate_with_progress(config, request, progress)?;
    let pension = pension_range(&summary.stats, terms)?;
    Ok(ScenarioOutcome {
        request: summary.request,
        stats: summary.stats,
        pension,
        resource_limit: summary.resource_limit,
    })
}

/// Pin the seed so every run in an evaluation uses common random numbers
fn pinned(request: &SimulationRequest) -> (SimulationRequest, u64) {
    let seed = request.seed.unwrap_or_else(|| rand::rng().random());
    (
        SimulationRequest {
            seed: Some(seed),
            ..request.clone()
        },
        seed,
    )
}

/// Run `base_request` once, then every variant in order, diffing each
/// against the same base run.
///
/// `progress` is shared by every run and never reset, so it counts trials
/// across the whole evaluation: `iterations * (1 + variants.len())` on
/// completion.
pub fn run_variants<V: ScenarioVariant>(
    config: &EngineConfig,
    base_request: &SimulationRequest,
    variants: &[V],
    terms: &AnnuityTerms,
    progress: Option<&MonteCarloProgress>,
) -> Result<VariantComparison, SimulationError> {
    terms.validate()?;
    let (base_request, base_seed) = pinned(base_request);

    // Build every variant request up front so a bad variant fails before
    // any simulation work
    let planned = variants
        .iter()
        .map(|v| -> Result<_, SimulationError> {
            let request = v.apply(&base_request)?;
            Ok((v.describe(&base_request), request))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let base = simulate_outcome(config, &base_request, terms, progress)?;

    let mut results = Vec::with_capacity(planned.len());
    for (index, (variant, request)) in planned.into_iter().enumerate() {
        tracing::debug!(index, ?variant, "Running scenario variant");
        let request = SimulationRequest {
            seed: Some(base_seed),
            ..request
        };
        let outcome = simulate_outcome(config, &request, terms, progress)?;
        let diff = ScenarioDiff::between(&base.stats, &base.pension, &outcome.stats, &outcome.pension);
        results.push(VariantResult {
            variant,
            outcome,
            diff,
        });
    }

    tracing::info!(
        variants = results.len(),
        base_seed,
        "Scenario comparison completed"
    );

    Ok(VariantComparison {
        base_seed,
        base,
        variants: results,
    })
}

/// Contribution sensitivity: the base request against each percentage
/// increase of its monthly contribution
pub fn run_sensitivity(
    config: &EngineConfig,
    base_request: &SimulationRequest,
    increases_pct: &[f64],
    terms: &AnnuityTerms,
    progress: Option<&MonteCarloProgress>,
) -> Result<VariantComparison, SimulationError> {
    let variants: Vec<ContributionIncrease> = increases_pct
        .iter()
        .map(|&percent| ContributionIncrease { percent })
        .collect();
    run_variants(config, base_request, &variants, terms, progress)
}

/// Retirement delay: the plan as given against retiring each number of
/// years later
pub fn run_delay(
    config: &EngineConfig,
    plan: &PlanInputs,
    delays: &[u32],
    terms: &AnnuityTerms,
    progress: Option<&MonteCarloProgress>,
) -> Result<DelayReport, SimulationError> {
    let base_request = plan.to_request(config.default_iterations)?;
    let variants: Vec<RetirementDelay> = delays
        .iter()
        .map(|&years| RetirementDelay {
            years,
            base_retirement_age: plan.retirement_age,
        })
        .collect();

    let comparison = run_variants(config, &base_request, &variants, terms, progress)?;

    let base_years = comparison.base.request.years;
    let base_p50 = comparison.base.stats.percentile_50;
    let benefits = variants
        .iter()
        .zip(&comparison.variants)
        .map(|(delay, result)| DelayBenefit {
            delay_years: delay.years,
            new_retirement_age: delay.base_retirement_age.saturating_add(delay.years),
            horizon_years: result.outcome.request.years,
            compounding_benefit_pct: compounding_benefit_pct(
                base_p50,
                result.outcome.stats.percentile_50,
                delay.years,
                base_years,
            ),
        })
        .collect();

    Ok(DelayReport {
        base_retirement_age: plan.retirement_age,
        base_horizon_years: base_years,
        comparison,
        benefits,
    })
}

/// Run the same request under every risk profile with a shared seed.
///
/// As with [`run_variants`], `progress` accumulates over all three runs.
pub fn compare_risk_profiles(
    config: &EngineConfig,
    request: &SimulationRequest,
    terms: &AnnuityTerms,
    progress: Option<&MonteCarloProgress>,
) -> Result<ProfileComparison, SimulationError> {
    terms.validate()?;
    let (request, base_seed) = pinned(request);

    let run = |risk_profile: RiskProfile| -> Result<ProfileOutcome, SimulationError> {
        let request = SimulationRequest {
            risk_profile,
            ..request.clone()
        };
        let outcome = simulate_outcome(config, &request, terms, progress)?;
        let volatility = classify_volatility(outcome.stats.std_deviation, outcome.stats.mean);
        Ok(ProfileOutcome {
            risk_profile,
            outcome,
            volatility,
        })
    };
    let conservative = run(RiskProfile::Conservative)?;
    let moderate = run(RiskProfile::Moderate)?;
    let aggressive = run(RiskProfile::Aggressive)?;

    let median = |p: &ProfileOutcome| p.outcome.stats.percentile_50;
    let corpus_range = CorpusRange {
        minimum: conservative.outcome.stats.percentile_10,
        maximum: aggressive.outcome.stats.percentile_90,
    };
    let conservative_to_moderate_upside_pct = percent_change(median(&conservative), median(&moderate));
    let moderate_to_aggressive_upside_pct = percent_change(median(&moderate), median(&aggressive));

    tracing::info!(
        base_seed,
        conservative_to_moderate_upside_pct,
        moderate_to_aggressive_upside_pct,
        "Risk profile comparison completed"
    );

    Ok(ProfileComparison {
        base_seed,
        profiles: vec![conservative, moderate, aggressive],
        corpus_range,
        conservative_to_moderate_upside_pct,
        moderate_to_aggressive_upside_pct,
    })
}
