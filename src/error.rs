//! Error types for the cvrender library.

use std::io;
use thiserror::Error;

/// Result type alias for cvrender operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while rendering a resume.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading content or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The requested output format has no registered renderer.
    #[error("no renderer registered for format '{format}' (available: {available})")]
    UnknownFormat {
        /// The format name that was requested.
        format: String,
        /// Comma-separated list of registered format names.
        available: String,
    },

    /// The resume content could not be parsed.
    #[error("invalid resume content: {0}")]
    Content(String),

    /// A template failed to compile or render.
    #[error("template error: {0}")]
    Template(String),

    /// The native PDF backend was found but the conversion failed.
    ///
    /// Backend *absence* is not an error; the fallback serializer takes
    /// over. A failing conversion must surface instead.
    #[error("PDF backend '{backend}' failed: {message}")]
    Backend {
        /// Name or path of the backend executable.
        backend: String,
        /// Failure detail (exit status, stderr excerpt).
        message: String,
    },

    /// The external toolchain renderer could not produce output.
    #[error("toolchain error: {0}")]
    Toolchain(String),
}

impl From<minijinja::Error> for Error {
    fn from(err: minijinja::Error) -> Self {
        Error::Template(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Content(err.to_string())
    }
}
