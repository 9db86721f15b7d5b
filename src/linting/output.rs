#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Rendering of collected problems for the terminal.

use anyhow::{Context, Result};
use colored::Colorize;
use tabled::{Table, settings::Style};

use super::problem::Problem;

/// How to print the collected problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// One `path:line:col: code message` line per problem.
    #[default]
    Plain,
    /// A table with one row per problem.
    Table,
    /// A JSON array of problem objects.
    Json,
}

/// Renders problems in the requested format.
pub fn render(problems: &[Problem], format: Format) -> Result<String> {
    match format {
        Format::Plain => Ok(problems
            .iter()
            .map(|p| {
                format!(
                    "{}:{}:{}: {} {}",
                    p.path(),
                    p.line(),
                    p.column(),
                    p.code().yellow(),
                    p.text()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")),
        Format::Table => {
            let mut table = Table::new(problems);
            table.with(Style::modern());
            Ok(table.to_string())
        }
        Format::Json => {
            serde_json::to_string_pretty(problems).context("Could not serialize problems")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linting::problem::Linter;

    /// A problem for rendering tests.
    fn sample() -> Problem {
        Problem::new(
            Linter::Edulint,
            "student.py",
            2,
            4,
            "R6201",
            "The if statement can be replaced with 'return x'",
        )
    }

    #[test]
    fn plain_format_is_one_line_per_problem() {
        colored::control::set_override(false);
        let rendered = render(&[sample()], Format::Plain).expect("render");
        assert_eq!(
            rendered,
            "student.py:2:4: R6201 The if statement can be replaced with 'return x'"
        );
    }

    #[test]
    fn json_round_trips() {
        let rendered = render(&[sample()], Format::Json).expect("render");
        let parsed: Vec<Problem> = serde_json::from_str(&rendered).expect("parse");
        assert_eq!(parsed, vec![sample()]);
    }
}
