//! CLI argument definitions for the report store.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "esg-report",
    version,
    about = "Inspect and maintain sustainability disclosure report data",
    long_about = "Inspect and maintain the locally stored data of sustainability disclosure reports.\n\n\
                  Lists reports, reads and writes questionnaire answers, and exports or imports\n\
                  whole reports as JSON backups."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

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

    /// Settings file (default: platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding stored report data (overrides the settings file).
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List all registered reports.
    List {
        /// Also list stored reports that are missing from the registry.
        #[arg(long = "orphans")]
        orphans: bool,
    },

    /// Print the full stored data of a report as JSON.
    Show {
        #[arg(value_name = "REPORT")]
        report: String,
    },

    /// Print the answers of one questionnaire.
    Answers {
        #[arg(value_name = "REPORT")]
        report: String,
        #[arg(value_name = "QUESTIONNAIRE")]
        questionnaire: String,
    },

    /// Replace the answers of one questionnaire with a JSON object.
    SaveAnswers {
        #[arg(value_name = "REPORT")]
        report: String,
        #[arg(value_name = "QUESTIONNAIRE")]
        questionnaire: String,
        /// JSON file with the answer object, or `-` for stdin.
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Update report metadata.
    Update(UpdateArgs),

    /// Delete the stored data of a report, reverting it to its default.
    Reset {
        #[arg(value_name = "REPORT")]
        report: String,
    },

    /// Export a report as a JSON backup.
    Export {
        #[arg(value_name = "REPORT")]
        report: String,
        /// Output file (default: stdout).
        #[arg(long = "output", short = 'o', value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Import a report from a JSON backup.
    Import {
        #[arg(value_name = "REPORT")]
        report: String,
        #[arg(value_name = "PATH")]
        input: PathBuf,
    },
}

#[derive(Args)]
pub struct UpdateArgs {
    #[arg(value_name = "REPORT")]
    pub report: String,

    /// New display name.
    #[arg(long = "name")]
    pub name: Option<String>,

    /// New reporting period.
    #[arg(long = "period")]
    pub period: Option<String>,

    /// New status (draft, in-progress, completed).
    #[arg(long = "status")]
    pub status: Option<String>,

    /// New creation date.
    #[arg(long = "date-created")]
    pub date_created: Option<String>,
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
