//! Command-line front end for the retireplan projection engine
//!
//! Parses subcommands, loads the optional YAML engine configuration,
//! initialises logging and renders every result as JSON.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;

pub use cli::{Cli, Command};
pub use commands::run;
pub use config::{ConfigError, load_config};
pub use logging::init_logging;
