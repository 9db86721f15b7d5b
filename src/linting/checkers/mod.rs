#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Native checkers that run over the tree-sitter parse of a file.

use anyhow::Result;
use tree_sitter::Node;

use super::problem::{Linter, Problem};
use crate::python::Parser;

/// Duplication checks (`R6502`–`R6506`).
pub mod duplication;
/// The simplifiable-if family (`R6201`–`R6210`).
pub mod simplifiable_if;
/// Shared tree inspection helpers.
pub mod utils;

pub use duplication::NoDuplicateCode;
pub use simplifiable_if::SimplifiableIf;

/// Metadata describing one message a checker can emit.
#[derive(Debug, Clone, Copy)]
pub struct MessageSpec {
    /// Message code, e.g. `R6201`.
    pub code:        &'static str,
    /// Human-readable symbol, e.g. `simplifiable-if-return`.
    pub symbol:      &'static str,
    /// Message template with `{}` slots.
    pub template:    &'static str,
    /// What the message means and why it is worth fixing.
    pub description: &'static str,
}

/// Everything a checker needs to inspect one file.
pub struct CheckContext<'a> {
    /// The parsed file.
    pub parser: &'a Parser,
    /// Path of the file, used in reported problems.
    pub path:   &'a str,
}

impl CheckContext<'_> {
    /// The source code of the file under check.
    pub fn code(&self) -> &str {
        self.parser.code()
    }

    /// Builds a problem anchored at `node`, spanning to its end.
    pub fn problem(&self, code: &str, node: Node<'_>, text: impl Into<String>) -> Problem {
        Problem::new(
            Linter::Edulint,
            self.path,
            node.start_position().row + 1,
            node.start_position().column,
            code,
            text,
        )
        .with_end(node.end_position().row + 1, node.end_position().column)
    }

    /// Builds a problem spanning from `first` to `last`.
    pub fn problem_spanning(
        &self,
        code: &str,
        first: Node<'_>,
        last: Node<'_>,
        text: impl Into<String>,
    ) -> Problem {
        Problem::new(
            Linter::Edulint,
            self.path,
            first.start_position().row + 1,
            first.start_position().column,
            code,
            text,
        )
        .with_end(last.end_position().row + 1, last.end_position().column)
    }
}

/// A native static check producing problems for one file.
pub trait Checker {
    /// Checker name, used in logs.
    fn name(&self) -> &'static str;

    /// The messages this checker can emit.
    fn messages(&self) -> &'static [MessageSpec];

    /// Runs the checker over the file.
    fn check(&self, ctx: &CheckContext<'_>) -> Result<Vec<Problem>>;
}

/// Returns all built-in checkers.
pub fn builtin_checkers() -> Vec<Box<dyn Checker>> {
    vec![Box::new(SimplifiableIf), Box::new(NoDuplicateCode)]
}

/// Returns the message metadata of every built-in checker.
pub fn all_messages() -> Vec<&'static MessageSpec> {
    builtin_checkers()
        .iter()
        .flat_map(|c| c.messages().iter())
        .collect()
}

/// Looks up a message by code or symbol.
pub fn find_message(code_or_symbol: &str) -> Option<&'static MessageSpec> {
    all_messages()
        .into_iter()
        .find(|m| m.code == code_or_symbol || m.symbol == code_or_symbol)
}
