/// SNS moments exporter: read a user's timeline posts out of an
/// unencrypted SNS cache database and print them as JSON.
///
/// # Command overview
///
/// ```text
/// sns <COMMAND> [OPTIONS]
///
/// Commands:
///   export     Decode a user's timeline and print it as JSON
///   inspect    Dump the raw protobuf fields of a user's timeline rows
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Debug-level logging on stderr
///   -q, --quiet      Only log warnings and errors
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// Logs go to stderr (`RUST_LOG` overrides the level), so stdout can be
/// piped straight into `jq`.
///
/// # Exit codes
///
/// | Code | Meaning                                        |
/// |------|------------------------------------------------|
/// | 0    | Success                                        |
/// | 1    | Error (unreadable cache, strict decode failure) |
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd_export;
mod cmd_inspect;
mod schema;

// ── CLI root ──────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "sns", version, about = "SNS moments exporter")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors.
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a user's timeline and print it as JSON.
    Export(ExportArgs),
    /// Dump the raw protobuf fields of a user's timeline rows.
    Inspect(InspectArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `sns export`.
///
/// ```text
/// ┌──────────────┬──────────────────────────────────────────────────────┐
/// │ Flag         │ Effect                                               │
/// ├──────────────┼──────────────────────────────────────────────────────┤
/// │ -o / --output│ Write JSON to a file instead of stdout               │
/// │ --pretty     │ Indent the JSON                                      │
/// │ --strict     │ Fail on the first undecodable row instead of skipping│
/// │ --schema F   │ Load SnsTimeline field numbers from a JSON file      │
/// └──────────────┴──────────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct ExportArgs {
    /// SNS cache database file (decrypted).
    pub sns_cache: PathBuf,

    /// The user to export, i.e. `SNS_Timeline.FromUser`.
    pub wxid: String,

    /// Write the JSON to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON.
    #[arg(long)]
    pub pretty: bool,

    /// Abort on the first row that fails to decode.
    #[arg(long)]
    pub strict: bool,

    /// JSON file overriding the `SnsTimeline` field numbers.
    #[arg(long)]
    pub schema: Option<PathBuf>,
}

/// Arguments for `sns inspect`.
///
/// Prints every protobuf field of each matching row with its number and
/// wire type. Meant for working out `--schema` overrides when a client
/// version lays the message out differently.
#[derive(clap::Args)]
pub struct InspectArgs {
    /// SNS cache database file (decrypted).
    pub sns_cache: PathBuf,

    /// The user whose rows to inspect.
    pub wxid: String,

    /// Only show the row with this `LocalId`.
    #[arg(long)]
    pub local_id: Option<i64>,

    /// Print full hex dumps of length-delimited fields.
    #[arg(long)]
    pub show_hex: bool,

    /// JSON file overriding the `SnsTimeline` field numbers.
    #[arg(long)]
    pub schema: Option<PathBuf>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Export(args) => cmd_export::run(&args),
        Commands::Inspect(args) => cmd_inspect::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

/// Install a stderr `fmt` subscriber. `RUST_LOG` wins over the flags.
fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}
