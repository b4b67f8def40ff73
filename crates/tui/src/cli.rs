use std::path::PathBuf;

use clap::{value_parser, Args, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "tasktimer",
    version,
    about = "Track tasks and time them with a per-task stopwatch.",
    after_help = "Examples:\n  tasktimer             Launch the TUI (same as `tasktimer tui`)\n  tasktimer --tick-ms 250 --empty\n  tasktimer tasks --json\n  tasktimer format 61 3661"
)]
pub struct Cli {
    /// Override the data directory used for the log file (defaults to platform-specific app dir)
    #[arg(long, value_name = "PATH", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Timer tick interval in milliseconds (defaults to 1000)
    #[arg(long = "tick-ms", value_name = "MILLIS", global = true, value_parser = value_parser!(u64).range(1..))]
    pub tick_ms: Option<u64>,

    /// Start without the two sample tasks
    #[arg(long, global = true)]
    pub empty: bool,

    /// Tracing filter directive (e.g. "info", "tasktimer_core=debug")
    #[arg(long = "log", value_name = "DIRECTIVE", global = true)]
    pub log_filter: Option<String>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// Launch the keyboard-first terminal UI (default command)
    Tui,
    /// Print the tasks a new board starts with
    Tasks(TasksArgs),
    /// Format one or more second counts as HH:MM:SS
    Format(FormatArgs),
}

#[derive(Args, Debug, Clone)]
pub struct TasksArgs {
    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct FormatArgs {
    /// Whole seconds to format
    #[arg(value_name = "SECONDS", required = true, value_parser = value_parser!(u64))]
    pub seconds: Vec<u64>,
}
