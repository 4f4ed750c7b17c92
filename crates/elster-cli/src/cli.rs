//! CLI argument definitions for the Elster naming toolkit.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "elster-names",
    version,
    about = "Friendly-name generator for the Elster heat pump signal table",
    long_about = "Generate, repair, and maintain human-readable friendly names\n\
                  for the Elster/CAN signal register table.\n\n\
                  Signal names are segmented against a German abbreviation\n\
                  dictionary and the results are cleaned up by deterministic\n\
                  refinement passes, with optional AI-assisted review."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Expand one or more signal names and print the friendly names.
    Expand(ExpandArgs),

    /// Write expanded friendly names into a table file.
    Annotate(TableArgs),

    /// Run the deterministic refinement passes over a table file.
    Refine(TableArgs),

    /// Review friendly names in batches via the OpenAI API.
    AiRefine(AiRefineArgs),

    /// Align entry columns in a table file for readability.
    Format(TableArgs),

    /// Upgrade legacy 3-field entries to the full metadata format.
    Migrate(TableArgs),
}

#[derive(Parser)]
pub struct ExpandArgs {
    /// Signal names to expand (e.g. WPVORLAUFIST).
    #[arg(value_name = "SIGNAL", required = true)]
    pub signals: Vec<String>,

    /// Print the raw expansion without the refinement passes.
    #[arg(long = "raw")]
    pub raw: bool,
}

/// Arguments shared by the table-rewriting commands.
#[derive(Args)]
pub struct TableArgs {
    /// Path to the table source file.
    #[arg(value_name = "TABLE_FILE")]
    pub file: PathBuf,

    /// Write the result here instead of rewriting the input in place.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Report what would change without writing anything.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct AiRefineArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// Entries per API request.
    #[arg(long = "batch-size", value_name = "N", default_value_t = elster_ai::DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Chat model to use.
    #[arg(long = "model", value_name = "MODEL")]
    pub model: Option<String>,

    /// Review at most this many entries.
    #[arg(long = "max-entries", value_name = "N")]
    pub max_entries: Option<usize>,

    /// Skip this many eligible entries before reviewing.
    #[arg(long = "start-from", value_name = "N", default_value_t = 0)]
    pub start_from: usize,
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
