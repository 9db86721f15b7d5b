#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! The diagnostic data model shared by native checkers and external linters.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Which linter produced a problem.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Linter {
    /// The flake8 external linter.
    Flake8,
    /// The pylint external linter.
    Pylint,
    /// A native edulint checker.
    Edulint,
}

impl Linter {
    /// Returns the command/module name of the linter.
    pub fn as_str(self) -> &'static str {
        match self {
            Linter::Flake8 => "flake8",
            Linter::Pylint => "pylint",
            Linter::Edulint => "edulint",
        }
    }
}

impl Display for Linter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single diagnostic reported to the user.
#[derive(Tabled, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Problem {
    /// Which linter reported the problem.
    #[tabled(skip)]
    source:     Linter,
    /// Path of the offending file.
    #[tabled(rename = "File")]
    path:       String,
    /// 1-based line the problem starts on.
    #[tabled(rename = "Line")]
    line:       usize,
    /// Column the problem starts on.
    #[tabled(rename = "Col")]
    column:     usize,
    /// Line the problem ends on, when known.
    #[tabled(skip)]
    end_line:   Option<usize>,
    /// Column the problem ends on, when known.
    #[tabled(skip)]
    end_column: Option<usize>,
    /// Message code, e.g. `R6201` or `E501`.
    #[tabled(rename = "Code")]
    code:       String,
    /// Human-readable message text.
    #[tabled(rename = "Message")]
    text:       String,
}

impl Problem {
    /// Creates a new problem without end positions.
    pub fn new(
        source: Linter,
        path: impl Into<String>,
        line: usize,
        column: usize,
        code: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            source,
            path: path.into(),
            line,
            column,
            end_line: None,
            end_column: None,
            code: code.into(),
            text: text.into(),
        }
    }

    /// Sets the end position of the problem.
    pub fn with_end(mut self, end_line: usize, end_column: usize) -> Self {
        self.end_line = Some(end_line);
        self.end_column = Some(end_column);
        self
    }

    /// Which linter reported the problem.
    pub fn source(&self) -> Linter {
        self.source
    }

    /// Path of the offending file.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// 1-based line the problem starts on.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Column the problem starts on.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Line the problem ends on, when known.
    pub fn end_line(&self) -> Option<usize> {
        self.end_line
    }

    /// Column the problem ends on, when known.
    pub fn end_column(&self) -> Option<usize> {
        self.end_column
    }

    /// Message code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Message text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the message text; used by tweaks and translations.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} {}",
            self.path, self.line, self.column, self.code, self.text
        )
    }
}
