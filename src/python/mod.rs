#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Parsing of Python source code via tree-sitter.

/// Tree-sitter parser wrapper.
pub mod parser;
/// Query strings for the Python grammar.
pub mod queries;

pub use parser::Parser;
