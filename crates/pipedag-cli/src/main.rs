//! `pipedag`: pipeline DAG checker.
//!
//! `pipedag serve` exposes `POST /pipelines/parse` for the editor;
//! `pipedag check` runs the same analysis on a file.
use clap::Parser as _;

mod cli;
mod cmd;
mod error;
mod io;
mod logging;
mod server;

pub use cli::{Cli, Command, OutputFormat, PathOrStdin};

use error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.quiet, cli.verbose);

    if let Err(e) = dispatch(cli).await {
        eprintln!("{}", e.message());
        std::process::exit(e.exit_code());
    }
}

async fn dispatch(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Serve {
            host,
            port,
            allow_origins,
            max_body_size,
        } => cmd::serve::run(host, port, allow_origins, max_body_size).await,
        Command::Check { file, require_dag } => {
            let content = io::read_input(&file, cli.max_file_size)?;
            cmd::check::run(&content, &cli.format, cli.verbose, require_dag)
        }
        Command::Version => print_version(),
    }
}

fn print_version() -> Result<(), CliError> {
    use std::io::Write as _;

    let stdout = std::io::stdout();
    writeln!(stdout.lock(), "{}", pipedag_core::version()).map_err(|e| CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    })
}
