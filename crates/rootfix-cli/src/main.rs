use anyhow::Result;
use clap::Parser;
use tracing_subscriber::filter::LevelFilter;

use rootfix_cli::{
    cli::{Cli, Commands, LogLevel},
    commands,
    config::CliConfig,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        cli.log_level.unwrap_or(LogLevel::Warn)
    };
    let filter: LevelFilter = log_level.into();
    let env_filter = format!("rootfix_cli={0},rootfix_core={0}", filter);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Apply {
            paths,
            check,
            stdin,
            root,
        } => {
            let config = CliConfig::load(cli.config, root)?;
            commands::apply::execute(config, paths, check, stdin, cli.format)
        }
        Commands::Rules => {
            let config = CliConfig::load(cli.config, None)?;
            commands::rules::execute(config, cli.format)
        }
    }
}
