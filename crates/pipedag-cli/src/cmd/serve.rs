//! Implementation of `pipedag serve`.
//!
//! Builds a [`ServerConfig`] from the parsed flags and runs the HTTP server
//! on a multi-threaded Tokio runtime until Ctrl-C.
use crate::error::CliError;
use crate::server::{self, ServerConfig};

/// Runs the `serve` command.
///
/// # Errors
///
/// Returns [`CliError`] (exit code 2) if an origin is invalid, the address
/// cannot be bound, or the server fails while running.
pub async fn run(
    host: String,
    port: u16,
    allow_origins: Vec<String>,
    max_body_size: usize,
) -> Result<(), CliError> {
    let allow_origins: Vec<String> = allow_origins
        .into_iter()
        .map(|o| o.trim().to_owned())
        .filter(|o| !o.is_empty())
        .collect();

    server::serve(ServerConfig {
        host,
        port,
        allow_origins,
        max_body_size,
    })
    .await
}
