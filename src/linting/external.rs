#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Adapters that run flake8 and pylint as subprocesses and fold their JSON
//! output into the shared diagnostic model.

use std::{collections::HashMap, ffi::OsString, io::Write};

use anyhow::Result;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{
    error::LintError,
    problem::{Linter, Problem},
};
use crate::{
    constants::{LINTER_TIMEOUT, RUNTIME},
    process::{Collected, run_collect},
    util::linter_path,
};

/// One diagnostic as flake8's JSON formatter emits it.
#[derive(Debug, Deserialize)]
struct Flake8Entry {
    /// Path of the linted file.
    filename:      String,
    /// 1-based line of the diagnostic.
    line_number:   usize,
    /// 1-based column of the diagnostic.
    column_number: usize,
    /// Message code, e.g. `E501`.
    code:          String,
    /// Message text.
    text:          String,
}

/// One diagnostic as pylint's JSON reporter emits it.
#[derive(Debug, Deserialize)]
struct PylintEntry {
    /// Path of the linted file.
    path:       String,
    /// 1-based line of the diagnostic.
    line:       usize,
    /// 0-based column of the diagnostic.
    column:     usize,
    /// Message id, e.g. `C0104`.
    #[serde(rename = "message-id")]
    message_id: String,
    /// Message text.
    message:    String,
    /// Last line of the diagnostic, when pylint knows it.
    #[serde(rename = "endLine", default)]
    end_line:   Option<usize>,
    /// Last column of the diagnostic, when pylint knows it.
    #[serde(rename = "endColumn", default)]
    end_column: Option<usize>,
}

/// Runs one external linter against a file, collecting its output.
fn run_linter(linter: Linter, args: Vec<OsString>) -> Result<Option<Collected>> {
    let Some(exe) = linter_path(linter.as_str()) else {
        return Ok(None);
    };
    debug!(linter = %linter, ?args, "running external linter");

    let collected = RUNTIME.block_on(run_collect(&exe, &args, None, Some(LINTER_TIMEOUT)))?;
    match collected {
        Some(collected) => {
            // the original tool forwards linter stderr to its own stderr
            let _ = std::io::stderr().write_all(&collected.stderr);
            Ok(Some(collected))
        }
        None => Err(LintError::LinterTimeout {
            linter,
            timeout: LINTER_TIMEOUT,
        }
        .into()),
    }
}

/// Lints a file with flake8, when it is installed.
///
/// flake8 exits 0 for a clean file and 1 when it found problems; anything
/// else is a fatal failure.
pub fn lint_flake8(path: &str, extra_args: &[String]) -> Result<Vec<Problem>> {
    let mut args: Vec<OsString> = vec!["--format=json".into()];
    args.extend(extra_args.iter().map(OsString::from));
    args.push(path.into());

    let Some(collected) = run_linter(Linter::Flake8, args)? else {
        warn!("flake8 is not installed, skipping");
        return Ok(vec![]);
    };

    let code = collected.exit_code();
    if !(code == 0 || code == 1) {
        return Err(LintError::LinterFailed {
            linter: Linter::Flake8,
            code,
        }
        .into());
    }
    if collected.stdout.is_empty() {
        return Ok(vec![]);
    }

    let by_file: HashMap<String, Vec<Flake8Entry>> = serde_json::from_slice(&collected.stdout)
        .map_err(|e| LintError::MalformedOutput {
            linter:  Linter::Flake8,
            message: e.to_string(),
        })?;

    let entries: Vec<Flake8Entry> = match by_file.len() {
        1 => by_file.into_values().next().unwrap_or_default(),
        _ => by_file
            .into_iter()
            .flat_map(|(name, entries)| if name == path { entries } else { vec![] })
            .collect(),
    };

    Ok(entries
        .into_iter()
        .map(|e| {
            Problem::new(
                Linter::Flake8,
                e.filename,
                e.line_number,
                e.column_number,
                e.code,
                e.text,
            )
        })
        .collect())
}

/// Lints a file with pylint, when it is installed.
///
/// pylint's exit code is a bitmask of message severities; only 32 (usage
/// error) is fatal.
pub fn lint_pylint(path: &str, extra_args: &[String]) -> Result<Vec<Problem>> {
    let mut args: Vec<OsString> = vec!["--output-format=json".into()];
    args.extend(extra_args.iter().map(OsString::from));
    args.push(path.into());

    let Some(collected) = run_linter(Linter::Pylint, args)? else {
        warn!("pylint is not installed, skipping");
        return Ok(vec![]);
    };

    let code = collected.exit_code();
    if code == 32 {
        return Err(LintError::LinterFailed {
            linter: Linter::Pylint,
            code,
        }
        .into());
    }
    if collected.stdout.is_empty() {
        return Ok(vec![]);
    }

    let entries: Vec<PylintEntry> = serde_json::from_slice(&collected.stdout).map_err(|e| {
        LintError::MalformedOutput {
            linter:  Linter::Pylint,
            message: e.to_string(),
        }
    })?;

    Ok(entries.into_iter().map(pylint_to_problem).collect())
}

/// Converts one pylint JSON entry into a [`Problem`].
fn pylint_to_problem(entry: PylintEntry) -> Problem {
    let problem = Problem::new(
        Linter::Pylint,
        entry.path,
        entry.line,
        entry.column,
        entry.message_id,
        entry.message,
    );
    match (entry.end_line, entry.end_column) {
        (Some(line), Some(column)) => problem.with_end(line, column),
        _ => problem,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pylint_entries_parse_with_null_ends() {
        let raw = r#"[{
            "type": "convention",
            "path": "student.py",
            "line": 3,
            "column": 0,
            "endLine": null,
            "endColumn": null,
            "message-id": "C0304",
            "message": "Final newline missing",
            "symbol": "missing-final-newline"
        }]"#;
        let entries: Vec<PylintEntry> = serde_json::from_str(raw).expect("parse");
        let problem = pylint_to_problem(entries.into_iter().next().expect("one entry"));
        assert_eq!(problem.code(), "C0304");
        assert_eq!(problem.line(), 3);
        assert_eq!(problem.end_line(), None);
    }

    #[test]
    fn flake8_entries_parse() {
        let raw = r#"{"student.py": [{
            "code": "E501",
            "filename": "student.py",
            "line_number": 5,
            "column_number": 80,
            "text": "line too long (88 > 79 characters)",
            "physical_line": "x = 1"
        }]}"#;
        let by_file: HashMap<String, Vec<Flake8Entry>> =
            serde_json::from_str(raw).expect("parse");
        assert_eq!(by_file["student.py"].len(), 1);
        assert_eq!(by_file["student.py"][0].code, "E501");
    }
}
