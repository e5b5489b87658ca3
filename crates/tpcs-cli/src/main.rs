//! `tpcs`: Toronto Pediatric Cancer Staging CLI.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use eyre::{Result, WrapErr};

use tpcs_cli::cli::{Cli, Command, LogFormatArg};
use tpcs_cli::logging::{LogConfig, LogFormat, init_logging};

mod commands;
mod summary;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    // A missing .env is fine; variables may already be in the environment.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(&log_config_from_cli(&cli)).wrap_err("failed to initialize logging")?;

    let failed = match &cli.command {
        Command::Stage(args) => commands::run_stage(args, &cli.staging_data).await?,
        Command::Categories => {
            commands::run_categories(&cli.staging_data)?;
            false
        }
        Command::Synonyms => {
            commands::run_synonyms();
            false
        }
    };

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn log_config_from_cli(cli: &Cli) -> LogConfig {
    LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        use_env_filter: !cli.verbosity.is_present(),
        format: match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        },
        log_file: cli.log_file.clone(),
        with_ansi: cli.log_file.is_none() && io::stderr().is_terminal(),
    }
}
