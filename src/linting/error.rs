#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Typed failures of the lint pipeline.

use std::time::Duration;

use thiserror::Error;

use super::problem::Linter;

/// Errors the lint pipeline can surface to callers.
#[derive(Error, Debug)]
pub enum LintError {
    /// The file to lint could not be read.
    #[error("Could not read {path}: {source}")]
    UnreadableFile {
        /// Path that failed to read.
        path:   String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An external linter exited with a fatal code.
    #[error("{linter} exited with code {code}")]
    LinterFailed {
        /// Which linter failed.
        linter: Linter,
        /// The fatal exit code.
        code:   i32,
    },

    /// An external linter ran past its deadline and was killed.
    #[error("{linter} timed out after {timeout:?}")]
    LinterTimeout {
        /// Which linter timed out.
        linter:  Linter,
        /// The enforced deadline.
        timeout: Duration,
    },

    /// An external linter produced output we could not parse.
    #[error("Could not parse {linter} output: {message}")]
    MalformedOutput {
        /// Which linter produced the output.
        linter:  Linter,
        /// Parser error description.
        message: String,
    },

    /// Unknown error.
    #[error("Unknown error: {0}")]
    Unknown(#[from] anyhow::Error),
}
