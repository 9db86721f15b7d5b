//! Tree-sitter query strings used by the native checkers.

/// Tree-sitter query that returns every `if` statement.
/// * `stmt`: the if statement node
pub const IF_STATEMENT_QUERY: &str = include_str!("if_statement.scm");

/// Tree-sitter query that returns every conditional (ternary) expression.
/// * `expr`: the conditional expression node
pub const CONDITIONAL_EXPR_QUERY: &str = include_str!("conditional_expression.scm");

/// Tree-sitter query that returns function definitions.
/// * `def`: the whole definition
/// * `name`: function name
/// * `body`: function body
pub const FUNCTION_DEF_QUERY: &str = include_str!("function_def.scm");
