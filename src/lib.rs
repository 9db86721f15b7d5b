//! # edulint
//!
//! A Python linter aimed at programming novices: it runs its own checks
//! over a tree-sitter parse of the file, folds in flake8 and pylint when
//! they are installed, and post-processes everything into friendlier
//! diagnostics.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Shared globals: the tokio runtime and pipeline-wide limits.
pub mod constants;
/// Configuration of a lint run, including message translations.
pub mod config;
/// The lint pipeline, checkers, and the diagnostic model.
pub mod linting;
/// Subprocess plumbing for external linters.
pub mod process;
/// Parsing of Python source via tree-sitter.
pub mod python;
/// Filesystem helpers.
pub mod util;

pub use config::Config;
pub use linting::{LintError, Linter, Problem, lint_file, lint_files, lint_source};

/// Defined for convenience
pub type Dict = std::collections::HashMap<String, String>;
