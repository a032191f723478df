//! Subcommand execution; every command yields a JSON document

use color_eyre::Result;
use retireplan_core::analysis::{compare_risk_profiles, run_delay, run_sensitivity};
use retireplan_core::annuity::{AnnuityAllocation, PensionRange, allocate_corpus, pension_range};
use retireplan_core::model::{ConfidenceIntervals, years_between_ages};
use retireplan_core::optimization::{PensionTarget, required_corpus_for_pension, solve_required_contribution};
use retireplan_core::readiness::{ReadinessScore, score_from_distribution};
use retireplan_core::simulation::monte_carlo_simulate;
use retireplan_core::volatility::{VolatilityIndex, classify_volatility};
use retireplan_core::{EngineConfig, MonteCarloSummary, PlanInputs};
use serde::Serialize;
use serde_json::Value;

use crate::cli::Command;

#[derive(Debug, Serialize)]
pub struct ForecastReport {
    pub years_to_retirement: u32,
    pub summary: MonteCarloSummary,
    pub confidence_intervals: ConfidenceIntervals,
    /// Annuity split of the median corpus
    pub allocation: AnnuityAllocation,
    pub pension_range: PensionRange,
    pub volatility: VolatilityIndex,
}

#[derive(Debug, Serialize)]
pub struct ReadinessReport {
    pub desired_monthly_pension: f64,
    pub required_corpus: f64,
    pub median_corpus: f64,
    pub readiness: ReadinessScore,
}

fn forecast(config: &EngineConfig, plan: &PlanInputs) -> Result<ForecastReport> {
    let request = plan.to_request(config.default_iterations)?;
    let summary = monte_carlo_simulate(config, &request)?;
    let allocation = allocate_corpus(summary.stats.percentile_50, &config.annuity)?;
    let pension_range = pension_range(&summary.stats, &config.annuity)?;
    let volatility = classify_volatility(summary.stats.std_deviation, summary.stats.mean);

    Ok(ForecastReport {
        years_to_retirement: request.years,
        confidence_intervals: summary.stats.confidence_intervals(),
        summary,
        allocation,
        pension_range,
        volatility,
    })
}

fn readiness(config: &EngineConfig, plan: &PlanInputs, desired_pension: f64) -> Result<ReadinessReport> {
    let request = plan.to_request(config.default_iterations)?;
    let summary = monte_carlo_simulate(config, &request)?;
    let required = required_corpus_for_pension(desired_pension, &config.annuity)?;
    let readiness = score_from_distribution(
        &summary.stats,
        required.total_corpus,
        request.years,
        request.risk_profile,
    )?;

    Ok(ReadinessReport {
        desired_monthly_pension: desired_pension,
        required_corpus: required.total_corpus,
        median_corpus: summary.stats.percentile_50,
        readiness,
    })
}

/// Run one subcommand against `config`
pub fn run(command: &Command, config: &EngineConfig) -> Result<Value> {
    tracing::debug!(?command, "Running command");

    let value = match command {
        Command::Forecast(plan) => serde_json::to_value(forecast(config, &plan.into())?)?,
        Command::Compare(plan) => {
            let request = PlanInputs::from(plan).to_request(config.default_iterations)?;
            serde_json::to_value(compare_risk_profiles(config, &request, &config.annuity, None)?)?
        }
        Command::Solve(args) => {
            let years = years_between_ages(args.current_age, args.retirement_age)?;
            let target = PensionTarget::new(args.desired_pension, years, args.risk_profile.into())
                .with_income_growth(args.income_growth);
            serde_json::to_value(solve_required_contribution(config, &target)?)?
        }
        Command::Readiness {
            plan,
            desired_pension,
        } => serde_json::to_value(readiness(config, &plan.into(), *desired_pension)?)?,
        Command::Volatility {
            std_deviation,
            mean,
        } => serde_json::to_value(classify_volatility(*std_deviation, *mean))?,
        Command::Sensitivity {
            plan,
            increases_pct,
        } => {
            let increases = if increases_pct.is_empty() {
                &config.sensitivity_increases_pct
            } else {
                increases_pct
            };
            let request = PlanInputs::from(plan).to_request(config.default_iterations)?;
            serde_json::to_value(run_sensitivity(
                config,
                &request,
                increases,
                &config.annuity,
                None,
            )?)?
        }
        Command::Delay { plan, delay_years } => {
            let delays = if delay_years.is_empty() {
                &config.delay_years
            } else {
                delay_years
            };
            serde_json::to_value(run_delay(
                config,
                &plan.into(),
                delays,
                &config.annuity,
                None,
            )?)?
        }
    };

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{PlanArgs, RiskArg, SolveArgs};

    fn plan() -> PlanArgs {
        PlanArgs {
            current_age: 30,
            retirement_age: 60,
            monthly_contribution: 5_000.0,
            income_growth: 5.0,
            risk_profile: RiskArg::Moderate,
            iterations: Some(1_000),
            seed: Some(42),
        }
    }

    #[test]
    fn test_forecast_document() {
        let value = run(&Command::Forecast(plan()), &EngineConfig::default()).unwrap();

        assert_eq!(value["years_to_retirement"], 30);
        assert_eq!(value["summary"]["base_seed"], 42);
        assert_eq!(value["summary"]["stats"]["num_trials"], 1_000);
        assert_eq!(value["volatility"]["level"], "Low");
        assert!(value["pension_range"]["expected"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn test_forecast_is_reproducible() {
        let config = EngineConfig::default();
        let a = run(&Command::Forecast(plan()), &config).unwrap();
        let b = run(&Command::Forecast(plan()), &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_solve_document() {
        let command = Command::Solve(SolveArgs {
            desired_pension: 50_000.0,
            current_age: 30,
            retirement_age: 60,
            income_growth: 5.0,
            risk_profile: RiskArg::Moderate,
        });
        let value = run(&command, &EngineConfig::default()).unwrap();
        assert_eq!(value["converged"], true);
        assert_eq!(value["termination_reason"], "Converged");
    }

    #[test]
    fn test_solve_checks_ages() {
        let solve = |current_age, retirement_age| {
            Command::Solve(SolveArgs {
                desired_pension: 50_000.0,
                current_age,
                retirement_age,
                income_growth: 5.0,
                risk_profile: RiskArg::Moderate,
            })
        };
        let config = EngineConfig::default();

        let err = run(&solve(10, 60), &config).unwrap_err();
        assert!(err.to_string().contains("current_age"), "{err}");

        let err = run(&solve(60, 60), &config).unwrap_err();
        assert!(err.to_string().contains("retirement_age"), "{err}");
    }

    #[test]
    fn test_sensitivity_uses_configured_defaults() {
        let command = Command::Sensitivity {
            plan: plan(),
            increases_pct: vec![],
        };
        let value = run(&command, &EngineConfig::default()).unwrap();
        assert_eq!(value["variants"].as_array().unwrap().len(), 3);
        assert_eq!(value["variants"][0]["variant"]["kind"], "contribution_increase");
    }

    #[test]
    fn test_volatility_document() {
        let command = Command::Volatility {
            std_deviation: 7_500_000.0,
            mean: 50_000_000.0,
        };
        let value = run(&command, &EngineConfig::default()).unwrap();
        assert_eq!(value["percentage"], 15.0);
        assert_eq!(value["level"], "Medium");
    }

    #[test]
    fn test_invalid_plan_is_reported() {
        let mut bad = plan();
        bad.monthly_contribution = 100.0;
        let err = run(&Command::Forecast(bad), &EngineConfig::default()).unwrap_err();
        assert!(err.to_string().contains("monthly_contribution"));
    }
}
