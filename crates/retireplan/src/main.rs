use clap::Parser;
use retireplan::{Cli, init_logging, load_config, run};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_file.as_deref())?;

    let config = load_config(cli.config.as_deref())?;
    let output = run(&cli.command, &config)?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
