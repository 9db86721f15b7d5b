#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! The lint pipeline: native checkers, external linters, tweaks,
//! translations, and the final ordering of problems.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::debug;

/// Native checkers running over the parse tree.
pub mod checkers;
/// Typed pipeline failures.
pub mod error;
/// flake8/pylint subprocess adapters.
pub mod external;
/// Rendering of problems for the terminal.
pub mod output;
/// The diagnostic data model.
pub mod problem;
/// Per-message post-processing.
pub mod tweaks;

pub use error::LintError;
pub use problem::{Linter, Problem};

use crate::{config::Config, python::Parser};
use checkers::{CheckContext, builtin_checkers};

/// Runs the native checkers over one source text.
fn native_problems(path: &str, source: String) -> Result<Vec<Problem>> {
    let parser = Parser::new(source)?;
    let ctx = CheckContext {
        parser: &parser,
        path,
    };

    let mut problems = Vec::new();
    for checker in builtin_checkers() {
        let found = checker.check(&ctx)?;
        debug!(checker = checker.name(), count = found.len(), "checker ran");
        problems.extend(found);
    }
    Ok(problems)
}

/// Applies the post-linting pipeline: enabled-set filtering, tweaks,
/// translations, and the stable `(line, column)` ordering.
fn post_process(problems: Vec<Problem>, config: &Config) -> Vec<Problem> {
    let problems: Vec<Problem> = problems
        .into_iter()
        .filter(|p| config.is_enabled(p.code()))
        .collect();

    let mut problems = tweaks::apply_tweaks(problems, &tweaks::builtin_tweaks());

    if let Some(translator) = &config.translations {
        for problem in &mut problems {
            translator.translate(problem);
        }
    }

    problems.sort_by_key(|p| (p.line(), p.column()));
    problems
}

/// Lints source text with the native checkers only.
///
/// This is the path tests and embedders use; `path` is only a label for the
/// reported problems.
pub fn lint_source(path: &str, source: String, config: &Config) -> Result<Vec<Problem>> {
    let problems = native_problems(path, source)?;
    Ok(post_process(problems, config))
}

/// Lints one file: native checkers plus the configured external linters.
pub fn lint_file(path: &Path, config: &Config) -> Result<Vec<Problem>> {
    let label = path.to_string_lossy().to_string();
    let source = std::fs::read_to_string(path).map_err(|source| LintError::UnreadableFile {
        path: label.clone(),
        source,
    })?;

    let mut problems = native_problems(&label, source)?;
    if config.flake8.run {
        problems.extend(external::lint_flake8(&label, &config.flake8.args)?);
    }
    if config.pylint.run {
        problems.extend(external::lint_pylint(&label, &config.pylint.args)?);
    }

    Ok(post_process(problems, config))
}

/// Lints several files, concatenating their problems in input order.
pub fn lint_files(paths: &[PathBuf], config: &Config) -> Result<Vec<Problem>> {
    let mut problems = Vec::new();
    for path in paths {
        problems.extend(lint_file(path, config)?);
    }
    Ok(problems)
}
