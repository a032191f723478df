//! Command-line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use retireplan_core::{PlanInputs, RiskProfile};

#[derive(Parser, Debug)]
#[command(name = "retireplan")]
#[command(about = "Monte Carlo retirement corpus projections")]
pub struct Cli {
    /// YAML engine configuration (defaults apply when omitted)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    pub log_level: String,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Project the corpus distribution and the pension it buys
    Forecast(PlanArgs),

    /// Run the same plan under every risk profile
    Compare(PlanArgs),

    /// Solve for the monthly contribution that funds a target pension
    Solve(SolveArgs),

    /// Score retirement readiness against a target pension
    Readiness {
        #[command(flatten)]
        plan: PlanArgs,

        /// Target monthly pension
        #[arg(long)]
        desired_pension: f64,
    },

    /// Classify outcome volatility from a standard deviation and mean
    Volatility {
        #[arg(long)]
        std_deviation: f64,

        #[arg(long)]
        mean: f64,
    },

    /// Compare the plan against higher monthly contributions
    Sensitivity {
        #[command(flatten)]
        plan: PlanArgs,

        /// Contribution increase in percent (repeatable)
        #[arg(long = "increase")]
        increases_pct: Vec<f64>,
    },

    /// Compare the plan against retiring later
    Delay {
        #[command(flatten)]
        plan: PlanArgs,

        /// Years of delay (repeatable)
        #[arg(long = "delay")]
        delay_years: Vec<u32>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskArg {
    Conservative,
    Moderate,
    Aggressive,
}

impl From<RiskArg> for RiskProfile {
    fn from(arg: RiskArg) -> Self {
        match arg {
            RiskArg::Conservative => RiskProfile::Conservative,
            RiskArg::Moderate => RiskProfile::Moderate,
            RiskArg::Aggressive => RiskProfile::Aggressive,
        }
    }
}

/// Subscriber plan inputs shared by most subcommands
#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    #[arg(long)]
    pub current_age: u32,

    #[arg(long)]
    pub retirement_age: u32,

    #[arg(long)]
    pub monthly_contribution: f64,

    /// Annual contribution growth in percent
    #[arg(long, default_value_t = 5.0)]
    pub income_growth: f64,

    #[arg(long, value_enum, default_value_t = RiskArg::Moderate)]
    pub risk_profile: RiskArg,

    /// Monte Carlo trials (configured default when omitted)
    #[arg(long)]
    pub iterations: Option<usize>,

    /// Seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,
}

impl From<&PlanArgs> for PlanInputs {
    fn from(args: &PlanArgs) -> Self {
        PlanInputs {
            current_age: args.current_age,
            retirement_age: args.retirement_age,
            monthly_contribution: args.monthly_contribution,
            annual_income_growth_pct: args.income_growth,
            risk_profile: args.risk_profile.into(),
            iterations: args.iterations,
            seed: args.seed,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct SolveArgs {
    /// Target monthly pension
    #[arg(long)]
    pub desired_pension: f64,

    #[arg(long)]
    pub current_age: u32,

    #[arg(long)]
    pub retirement_age: u32,

    #[arg(long, default_value_t = 5.0)]
    pub income_growth: f64,

    #[arg(long, value_enum, default_value_t = RiskArg::Moderate)]
    pub risk_profile: RiskArg,
}
