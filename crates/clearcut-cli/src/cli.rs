//! Argument parsing and command dispatch.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::commands::probe::handle_probe;
use crate::commands::replay::handle_replay;
use crate::error::CliResult;

/// Parses CLI arguments and executes the requested command. Returns the
/// process exit code.
#[must_use]
pub fn run() -> i32 {
    let cli = Cli::parse();
    match dispatch(cli) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

fn dispatch(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::Replay(args) => handle_replay(&args, cli.output),
        Command::Probe(args) => handle_probe(&args, cli.output),
    }
}

#[derive(Parser)]
#[command(
    name = "clearcut",
    about = "Replay output call scripts through Clearcut channels"
)]
struct Cli {
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    output: OutputFormat,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a JSON-lines call script against a fresh registry.
    Replay(ReplayArgs),
    /// Report the detected runtime target and its `%c` support.
    Probe(ProbeArgs),
}

#[derive(Args)]
pub(crate) struct ReplayArgs {
    #[arg(long, help = "Path to a JSON-lines call script")]
    pub(crate) script: PathBuf,
    #[arg(long, help = "Optional registry configuration document")]
    pub(crate) config: Option<PathBuf>,
    #[arg(long, help = "Override the detected runtime target identity")]
    pub(crate) target: Option<String>,
    #[arg(long, help = "Print every channel's recorded history when done")]
    pub(crate) dump_history: bool,
}

#[derive(Args)]
pub(crate) struct ProbeArgs {
    #[arg(long, help = "Classify this identity instead of the detected one")]
    pub(crate) target: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Json,
}
