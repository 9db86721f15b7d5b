#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::glob;
use which::which;

/// Finds and returns the path to an external linter binary, if installed.
///
/// * `name`: the binary to look for (`flake8`, `pylint`)
pub fn linter_path(name: &str) -> Option<PathBuf> {
    which(name).ok()
}

/// A glob utility function to find paths to Python files under a directory.
///
/// * `root_dir`: the root directory where search starts
pub fn find_python_files(root_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut pattern = root_dir.to_path_buf();
    pattern.push("**");
    pattern.push("*.py");

    let pattern = pattern
        .to_str()
        .context("Could not convert root_dir to string")?
        .to_string();

    let mut files: Vec<PathBuf> = glob(&pattern)
        .context("Could not create glob")?
        .filter_map(Result::ok)
        .collect();
    files.sort();
    Ok(files)
}

/// Expands a mix of files and directories into the list of Python files to
/// lint, preserving the order paths were given in.
pub fn expand_paths(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut result = Vec::new();
    for path in paths {
        if path.is_dir() {
            result.extend(find_python_files(path)?);
        } else {
            result.push(path.clone());
        }
    }
    Ok(result)
}
