/// CLI error types with associated exit codes.
///
/// [`CliError`] is the top-level error type for the `pipedag` binary. Every
/// variant maps to a stable exit code (1 or 2) via [`CliError::exit_code`]:
///
/// - Exit code **2** — input or startup failure: the input could not be
///   read or parsed, or the server could not start.
/// - Exit code **1** — logical failure: the tool ran to completion but the
///   result is a well-defined failure (`check --require-dag` on a cyclic
///   pipeline).
use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// CliError
// ---------------------------------------------------------------------------

/// All error conditions that the `pipedag` CLI can produce.
///
/// [`CliError::message`] returns the human-readable error string that `main`
/// prints to stderr before exiting.
#[derive(Debug)]
pub enum CliError {
    // --- Exit code 2: input failures ---
    /// A file argument could not be found on the filesystem.
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The process lacks permission to read a file.
    PermissionDenied {
        /// The path that could not be read.
        path: PathBuf,
    },

    /// The input exceeds the configured `--max-file-size` limit.
    FileTooLarge {
        /// `"-"` for stdin, or the filesystem path.
        source: String,
        /// The configured size limit in bytes.
        limit: u64,
        /// The actual size in bytes, if known (disk files only).
        actual: Option<u64>,
    },

    /// The input bytes are not valid UTF-8.
    InvalidUtf8 {
        /// A human-readable label for the source.
        source: String,
        /// The byte offset of the first invalid byte sequence.
        byte_offset: usize,
    },

    /// An I/O error occurred while reading from stdin.
    StdinReadError {
        /// The underlying I/O error message.
        detail: String,
    },

    /// A generic I/O error not covered by the more specific variants above.
    IoError {
        /// A human-readable label for the source.
        source: String,
        /// The underlying I/O error message.
        detail: String,
    },

    /// The input is not a structurally valid pipeline submission.
    ParseFailed {
        /// Parser message including line and column.
        detail: String,
    },

    // --- Exit code 2: server startup failures ---
    /// An `--allow-origin` value is not a valid header value.
    InvalidOrigin {
        /// The rejected origin.
        origin: String,
    },

    /// The listener could not be bound.
    BindFailed {
        /// The `host:port` that was requested.
        addr: String,
        /// The underlying I/O error message.
        detail: String,
    },

    /// The server stopped with an I/O error.
    ServerFailed {
        /// The underlying I/O error message.
        detail: String,
    },

    // --- Exit code 1: logical failures ---
    /// `check --require-dag` found a cycle.
    ///
    /// The summary has already been printed; this variant exists so `main`
    /// can exit with code 1 cleanly.
    NotADag,
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::FileTooLarge { .. }
            | Self::InvalidUtf8 { .. }
            | Self::StdinReadError { .. }
            | Self::IoError { .. }
            | Self::ParseFailed { .. }
            | Self::InvalidOrigin { .. }
            | Self::BindFailed { .. }
            | Self::ServerFailed { .. } => 2,

            Self::NotADag => 1,
        }
    }

    /// Returns a human-readable error message suitable for printing to stderr.
    pub fn message(&self) -> String {
        match self {
            Self::FileNotFound { path } => {
                format!("error: file not found: {}", path.display())
            }
            Self::PermissionDenied { path } => {
                format!("error: permission denied: {}", path.display())
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: Some(actual),
            } => {
                format!("error: file too large: {source} is {actual} bytes, limit is {limit} bytes")
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: None,
            } => {
                format!("error: file too large: {source} exceeded limit of {limit} bytes")
            }
            Self::InvalidUtf8 {
                source,
                byte_offset,
            } => {
                format!(
                    "error: invalid UTF-8 in {source}: first invalid byte at offset {byte_offset}"
                )
            }
            Self::StdinReadError { detail } => {
                format!("error: failed to read stdin: {detail}")
            }
            Self::IoError { source, detail } => {
                format!("error: I/O error reading {source}: {detail}")
            }
            Self::ParseFailed { detail } => {
                format!("error: {detail}")
            }
            Self::InvalidOrigin { origin } => {
                format!("error: invalid --allow-origin value: {origin:?}")
            }
            Self::BindFailed { addr, detail } => {
                format!("error: cannot listen on {addr}: {detail}")
            }
            Self::ServerFailed { detail } => {
                format!("error: server stopped: {detail}")
            }
            Self::NotADag => "error: pipeline contains a cycle".to_owned(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for CliError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
