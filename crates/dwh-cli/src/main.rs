//! Warehouse loader CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use dwh_cli::commands::{run_bronze, run_check, run_load, run_silver, run_tables};
use dwh_cli::logging::{LogConfig, LogFormat, init_logging};
use dwh_cli::settings::{Overrides, Settings};
use dwh_model::LayerLoadReport;
use tracing::level_filters::LevelFilter;

mod cli;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, RunArgs};
use crate::summary::{print_check_summary, print_load_summary, print_tables};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(cli.command) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(command: Command) -> anyhow::Result<i32> {
    match command {
        Command::Bronze(args) => Ok(load_exit_code(&run_bronze(&settings(&args)?)?)),
        Command::Silver(args) => Ok(load_exit_code(&run_silver(&settings(&args)?)?)),
        Command::Load(args) => Ok(load_exit_code(&run_load(&settings(&args)?)?)),
        Command::Check(args) => {
            let outcome = run_check(&settings(&args)?)?;
            print_check_summary(&outcome);
            Ok(i32::from(outcome.has_errors()))
        }
        Command::Tables(args) => {
            print_tables(&run_tables(&settings(&args)?)?);
            Ok(0)
        }
    }
}

fn settings(args: &RunArgs) -> anyhow::Result<Settings> {
    let overrides = Overrides {
        source_root: args.source_root.clone(),
        warehouse_dir: args.warehouse_dir.clone(),
        reference_date: args.reference_date,
        atomic_swap: args.atomic_swap,
    };
    Settings::resolve(args.config.as_deref(), overrides, args.dry_run)
}

fn load_exit_code(reports: &[LayerLoadReport]) -> i32 {
    print_load_summary(reports);
    i32::from(reports.iter().any(|report| !report.is_success()))
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
