use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use trva_io::ReportFormat;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a TRV/BRK export pair into test-duty buckets and report
    /// the worst-case voltage stress per bucket
    Analyze {
        /// Path to the TRV export file
        #[arg(long)]
        trv: PathBuf,
        /// Path to the BRK export file
        #[arg(long)]
        brk: PathBuf,
        /// Breaker rated interrupting current (kA)
        #[arg(long)]
        rating: f64,
        /// IEEE breaker TRV voltage class (kV rms, e.g. 145)
        #[arg(long)]
        voltage_class: String,
        /// Local station name
        #[arg(long)]
        local_station: String,
        /// Remote station name
        #[arg(long)]
        remote_station: String,
        /// Breaker name label for the report
        #[arg(long)]
        breaker_names: String,
        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Report format
        #[arg(long, value_enum, default_value_t = ReportFormatArg::Plain)]
        format: ReportFormatArg,
    },
    /// List the supported TRV voltage classes
    Classes,
    /// Generate shell completion scripts
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
        /// Write output to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormatArg {
    Plain,
    Json,
}

impl From<ReportFormatArg> for ReportFormat {
    fn from(arg: ReportFormatArg) -> Self {
        match arg {
            ReportFormatArg::Plain => ReportFormat::Plain,
            ReportFormatArg::Json => ReportFormat::Json,
        }
    }
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}
