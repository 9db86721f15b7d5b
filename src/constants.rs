#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::time::Duration;

use lazy_static::lazy_static;
use tokio::runtime::Runtime;

lazy_static! {
    /// Shared tokio runtime used to drive external linter subprocesses from
    /// the synchronous lint pipeline.
    pub static ref RUNTIME: Runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to initialize tokio runtime");
}

/// How long an external linter may run before it is killed.
pub const LINTER_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variable controlling the log level of the CLI.
pub const LOG_ENV_VAR: &str = "EDULINT_LOG";
