//! Tracing subscriber setup.
//!
//! Logs go to stderr so that `check` output on stdout stays machine
//! readable. `RUST_LOG` directives override the level chosen from the
//! `--quiet` / `--verbose` flags.
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Default log level for the given verbosity flags.
pub fn default_level(quiet: bool, verbose: bool) -> LevelFilter {
    if quiet {
        LevelFilter::ERROR
    } else if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    }
}

/// Installs the global `fmt` subscriber. Call once, from `main`.
pub fn init(quiet: bool, verbose: bool) {
    let filter = EnvFilter::builder()
        .with_default_directive(default_level(quiet, verbose).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
