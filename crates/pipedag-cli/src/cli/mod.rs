//! Clap CLI definition: root struct, subcommands, and shared argument types.
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// A CLI argument that is either a filesystem path or the stdin sentinel `"-"`.
///
/// Parsing `"-"` yields [`PathOrStdin::Stdin`]; anything else yields
/// [`PathOrStdin::Path`].
#[derive(Clone, Debug)]
pub enum PathOrStdin {
    /// Read from standard input.
    Stdin,
    /// Read from the given filesystem path.
    Path(PathBuf),
}

impl std::str::FromStr for PathOrStdin {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(PathOrStdin::Stdin)
        } else {
            Ok(PathOrStdin::Path(PathBuf::from(s)))
        }
    }
}

/// Output format for CLI commands.
#[derive(Clone, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Aligned key/value lines (default).
    Human,
    /// A single JSON object.
    Json,
}

/// All top-level subcommands exposed by the `pipedag` binary.
#[derive(Subcommand)]
pub enum Command {
    /// Serve the pipeline parsing endpoint over HTTP.
    Serve {
        /// Address to bind.
        #[arg(long, env = "PIPEDAG_HOST", default_value = "127.0.0.1")]
        host: String,
        /// Port to listen on.
        #[arg(long, short = 'p', env = "PIPEDAG_PORT", default_value = "8000")]
        port: u16,
        /// Origin allowed to call the API cross-origin (repeatable).
        ///
        /// The environment variable takes a comma-separated list.
        #[arg(
            long = "allow-origin",
            value_name = "ORIGIN",
            env = "PIPEDAG_ALLOW_ORIGINS",
            value_delimiter = ',',
            default_value = "http://localhost:3000"
        )]
        allow_origins: Vec<String>,
        /// Maximum request body size in bytes.
        #[arg(long, env = "PIPEDAG_MAX_BODY_SIZE", default_value = "16777216")]
        max_body_size: usize,
    },

    /// Report node count, edge count and DAG status of a pipeline file.
    Check {
        /// Path to a pipeline JSON file, or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
        /// Exit with code 1 if the pipeline contains a cycle.
        #[arg(long)]
        require_dag: bool,
    },

    /// Print the pipedag-core library version.
    Version,
}

/// Root CLI struct for the `pipedag` binary.
///
/// All global flags are defined here and marked `global = true` so that clap
/// propagates them to every subcommand.
#[derive(Parser)]
#[command(
    name = "pipedag",
    version,
    about = "Pipeline graph DAG checker",
    long_about = "Counts the nodes and edges of a pipeline graph drawn in an editor\n\
                  and reports whether it is a directed acyclic graph, either over\n\
                  HTTP (serve) or for a file on disk (check)."
)]
pub struct Cli {
    /// Active subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// Output format: human (default) or json.
    #[arg(long, short = 'f', default_value = "human", global = true)]
    pub format: OutputFormat,

    /// Only log errors (incompatible with `--verbose`).
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log at debug level and print normalization diagnostics
    /// (incompatible with `--quiet`).
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Maximum input file size in bytes for `check`.
    ///
    /// Can also be set via the `PIPEDAG_MAX_FILE_SIZE` environment variable.
    /// Default: 67108864 (64 MB).
    #[arg(
        long,
        global = true,
        env = "PIPEDAG_MAX_FILE_SIZE",
        default_value = "67108864"
    )]
    pub max_file_size: u64,
}
