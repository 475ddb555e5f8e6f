//! CLI argument definitions for the warehouse loader.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "dwh",
    version,
    about = "Load CRM and ERP extracts into bronze and silver warehouse tables",
    long_about = "Load CRM and ERP extracts into bronze and silver warehouse tables.\n\n\
                  Bronze holds the staged files as delivered; silver holds the \
                  cleaned, standardized and deduplicated records derived from bronze."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Reload every bronze table from the staged source files.
    Bronze(RunArgs),

    /// Rebuild every silver table from bronze.
    Silver(RunArgs),

    /// Bronze, then silver.
    Load(RunArgs),

    /// Run quality checks against the silver tables.
    Check(RunArgs),

    /// List tables with their source files and last load.
    Tables(RunArgs),
}

#[derive(Args, Clone)]
pub struct RunArgs {
    /// JSON config file.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding source_crm/ and source_erp/.
    #[arg(long = "source-root", value_name = "DIR")]
    pub source_root: Option<PathBuf>,

    /// Directory the warehouse tables are written to.
    #[arg(long = "warehouse-dir", value_name = "DIR")]
    pub warehouse_dir: Option<PathBuf>,

    /// Day treated as today for future-date rules (YYYY-MM-DD).
    #[arg(long = "reference-date", value_name = "DATE")]
    pub reference_date: Option<NaiveDate>,

    /// Make each table's new contents visible in one step.
    ///
    /// Without this flag a table is truncated before its rows are inserted,
    /// so a failed insert leaves it empty.
    #[arg(long = "atomic-swap")]
    pub atomic_swap: bool,

    /// Load into memory only and leave the warehouse directory untouched.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
