// carex - sales execution-versus-budget report

mod exit_codes;
mod render;
mod report;
mod settings;
mod util;

use std::path::PathBuf;
use std::process::ExitCode;

use carex_io::IoError;
use carex_metrics::{Dimension, Period};
use clap::{Args, Parser, Subcommand, ValueEnum};

use exit_codes::{io_exit_code, EXIT_CONFIG, EXIT_EXPORT, EXIT_SUCCESS};

#[derive(Parser)]
#[command(name = "carex")]
#[command(about = "Sales execution versus budget, by salesperson, operating center, client and country")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Settings file (default: <config dir>/carex/report.toml)
    #[arg(long, global = true, env = "CAREX_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Where the snapshot comes from and which month it is judged against.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Workbook with the BD and budget sheets, or the transactions CSV
    #[arg(long, short = 'i', value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Budget CSV (only with a CSV --input)
    #[arg(long, value_name = "FILE")]
    pub budget: Option<PathBuf>,

    /// Reference month (default: current month)
    #[arg(long, value_name = "YYYY-MM")]
    pub as_of: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Full report: overview, salesperson tables, ranked tables, exports
    #[command(after_help = "\
Examples:
  carex report --input ventas.xlsx --as-of 2024-06
  carex report --input bd.csv --budget budget.csv --no-export
  carex report --json --no-export | jq '.dashboard.overview'")]
    Report {
        #[command(flatten)]
        input: InputArgs,

        /// Directory for the summary workbook and JSON dump
        #[arg(long, short = 'o', value_name = "DIR")]
        out_dir: Option<PathBuf>,

        /// Print the dashboard as one JSON document on stdout
        #[arg(long)]
        json: bool,

        /// Skip writing the summary workbook and JSON dump
        #[arg(long)]
        no_export: bool,
    },

    /// Salesperson execution table for one period
    #[command(after_help = "\
Examples:
  carex execution --input ventas.xlsx --period monthly
  carex execution --input ventas.xlsx --period annual --as-of 2024-12 --json")]
    Execution {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long, value_enum, default_value = "monthly")]
        period: PeriodArg,

        #[arg(long)]
        json: bool,
    },

    /// Ranked totals along one dimension
    #[command(after_help = "\
Examples:
  carex rank --dimension client --period annual
  carex rank --dimension operating-center --json")]
    Rank {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long, value_enum)]
        dimension: DimensionArg,

        #[arg(long, value_enum, default_value = "monthly")]
        period: PeriodArg,

        #[arg(long)]
        json: bool,
    },

    /// Inspect the settings file
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective settings as TOML
    Show,
    /// Parse and validate a settings file
    Check {
        /// File to check (default: --config, then the default location)
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PeriodArg {
    Annual,
    Monthly,
}

impl From<PeriodArg> for Period {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::Annual => Period::Annual,
            PeriodArg::Monthly => Period::Monthly,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DimensionArg {
    OperatingCenter,
    Client,
    Country,
}

impl From<DimensionArg> for Dimension {
    fn from(arg: DimensionArg) -> Self {
        match arg {
            DimensionArg::OperatingCenter => Dimension::OperatingCenter,
            DimensionArg::Client => Dimension::Client,
            DimensionArg::Country => Dimension::Country,
        }
    }
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nengine:  carex-metrics ", env!("CARGO_PKG_VERSION"),
        "\ntarget:  ", env!("TARGET"),
    )
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.config;
    let result = match cli.command {
        Commands::Report { input, out_dir, json, no_export } => {
            report::cmd_report(config, input, out_dir, json, no_export)
        }
        Commands::Execution { input, period, json } => {
            report::cmd_execution(config, input, period.into(), json)
        }
        Commands::Rank { input, dimension, period, json } => {
            report::cmd_rank(config, input, dimension.into(), period.into(), json)
        }
        Commands::Config(ConfigCommands::Show) => report::cmd_config_show(config),
        Commands::Config(ConfigCommands::Check { path }) => report::cmd_config_check(config, path),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self { code: EXIT_CONFIG, message: msg.into(), hint: None }
    }

    pub fn export(msg: impl Into<String>) -> Self {
        Self { code: EXIT_EXPORT, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<IoError> for CliError {
    fn from(err: IoError) -> Self {
        let hint = match &err {
            IoError::MissingColumn { .. } | IoError::SheetNotFound { .. } => {
                Some("check [input.layout] in report.toml against the file's headers".to_string())
            }
            IoError::Open { .. } => Some("check the --input path and file format".to_string()),
            _ => None,
        };
        Self { code: io_exit_code(&err), message: err.to_string(), hint }
    }
}
