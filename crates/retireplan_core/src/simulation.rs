//! Monte Carlo corpus simulation
//!
//! Every trial draws its own return path and accumulates its own corpus; the
//! only shared step is the final reduction into `DistributionStatistics`.
//!
//! Trial `i` is seeded with `derive_trial_seed(base_seed, i)`, so a seeded
//! run produces identical statistics regardless of how trials are scheduled
//! across threads.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::accumulate::accumulate_corpus;
use crate::config::EngineConfig;
use crate::error::{ResourceLimit, SimulationError, ValidationError};
use crate::market::ReturnPathSampler;
use crate::model::{MonteCarloSummary, SimulationRequest};
use crate::stats::summarize;

/// Progress and cancellation shared with a running simulation.
///
/// Cancellation is observed between trials, never mid-trial.
#[derive(Debug, Clone, Default)]
pub struct MonteCarloProgress {
    completed: Arc<AtomicUsize>,
    cancelled: Arc<AtomicBool>,
}

impl MonteCarloProgress {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Share existing atomics, e.g. with a front end polling progress
    pub fn from_atomics(completed: Arc<AtomicUsize>, cancelled: Arc<AtomicBool>) -> Self {
        Self {
            completed,
            cancelled,
        }
    }

    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }

    pub fn increment(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.completed.store(0, Ordering::Relaxed);
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Mix a base seed with a trial index into an independent stream seed
#[must_use]
pub fn derive_trial_seed(base_seed: u64, trial: u64) -> u64 {
    splitmix64(base_seed ^ splitmix64(trial))
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

/// Apply the hard iteration cap. Returns the effective count and, when
/// clamped, the notice to attach to the summary.
#[must_use]
pub fn clamp_iterations(requested: usize, cap: usize) -> (usize, Option<ResourceLimit>) {
    if requested > cap {
        (cap, Some(ResourceLimit { requested, cap }))
    } else {
        (requested, None)
    }
}

pub fn monte_carlo_simulate(
    config: &EngineConfig,
    request: &SimulationRequest,
) -> Result<MonteCarloSummary, SimulationError> {
    monte_carlo_simulate_with_progress(config, request, None)
}

/// Run `request.iterations` independent trials and summarise their final
/// corpus values.
///
/// Validation and the iteration cap are applied before any trial runs.
pub fn monte_carlo_simulate_with_progress(
    config: &EngineConfig,
    request: &SimulationRequest,
    progress: Option<&MonteCarloProgress>,
) -> Result<MonteCarloSummary, SimulationError> {
    config.validate()?;
    request.validate()?;
    if request.iterations < config.min_iterations {
        return Err(ValidationError::new(
            "iterations",
            format!(
                "{} is below the minimum of {}",
                request.iterations, config.min_iterations
            ),
        )
        .into());
    }

    let (iterations, resource_limit) = clamp_iterations(request.iterations, config.max_iterations);
    if let Some(limit) = resource_limit {
        tracing::warn!(
            requested = limit.requested,
            cap = limit.cap,
            "Iteration count capped"
        );
    }

    let sampler = ReturnPathSampler::new(config.return_ranges.range(request.risk_profile))?;
    let base_seed = request.seed.unwrap_or_else(|| rand::rng().random());
    let years = request.years;
    let contribution = request.monthly_contribution;
    let growth = request.monthly_growth_rate();

    tracing::debug!(
        iterations,
        years,
        risk_profile = %request.risk_profile,
        base_seed,
        "Starting Monte Carlo simulation"
    );

    let run_trial = |trial: usize, path: &mut Vec<f64>| -> Option<f64> {
        if progress.is_some_and(MonteCarloProgress::is_cancelled) {
            return None;
        }
        let mut rng = SmallRng::seed_from_u64(derive_trial_seed(base_seed, trial as u64));
        sampler.fill_path(&mut rng, years, path);
        let corpus = accumulate_corpus(contribution, growth, path);
        if let Some(p) = progress {
            p.increment();
        }
        Some(corpus)
    };

    #[cfg(feature = "parallel")]
    let results: Option<Vec<f64>> = (0..iterations)
        .into_par_iter()
        .map_init(
            || Vec::with_capacity(years as usize),
            |path, trial| run_trial(trial, path),
        )
        .collect();

    #[cfg(not(feature = "parallel"))]
    let results: Option<Vec<f64>> = {
        let mut path = Vec::with_capacity(years as usize);
        (0..iterations)
            .map(|trial| run_trial(trial, &mut path))
            .collect()
    };

    let Some(mut values) = results else {
        tracing::info!(iterations, "Monte Carlo simulation cancelled");
        return Err(SimulationError::Cancelled);
    };

    let stats = summarize(&mut values)?;

    tracing::info!(
        iterations,
        mean = stats.mean,
        median = stats.percentile_50,
        "Monte Carlo simulation completed"
    );

    Ok(MonteCarloSummary {
        request: SimulationRequest {
            iterations,
            seed: Some(base_seed),
            ..request.clone()
        },
        base_seed,
        stats,
        resource_limit,
    })
}
