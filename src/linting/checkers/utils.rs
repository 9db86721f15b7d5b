#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Shared tree inspection helpers for the native checkers.
//!
//! The checkers work directly on tree-sitter nodes. Everything here that
//! renders source back to text normalizes formatting, so two statements that
//! differ only in whitespace or line breaks compare equal.

use tree_sitter::Node;

/// Returns the raw source text covered by `node`.
pub fn node_text<'a>(node: Node<'_>, code: &'a str) -> &'a str {
    node.utf8_text(code.as_bytes()).unwrap_or("")
}

/// Returns the 1-based line `node` starts on.
pub fn start_line(node: Node<'_>) -> usize {
    node.start_position().row + 1
}

/// Returns the 1-based line `node` ends on.
pub fn end_line(node: Node<'_>) -> usize {
    node.end_position().row + 1
}

/// Number of source lines between two nodes, per the classic counting rule:
/// with `including_last` the span covers the last node's final line.
pub fn lines_between(first: Node<'_>, last: Node<'_>, including_last: bool) -> usize {
    if including_last {
        end_line(last) - start_line(first) + 1
    } else {
        start_line(last).saturating_sub(start_line(first))
    }
}

/// Collects the leaf tokens of `node`, skipping comments and explicit line
/// continuations.
fn collect_tokens<'a>(node: Node<'_>, code: &'a str, out: &mut Vec<&'a str>) {
    if matches!(node.kind(), "comment" | "line_continuation") {
        return;
    }
    if node.child_count() == 0 {
        let text = node_text(node, code);
        if !text.is_empty() {
            out.push(text);
        }
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_tokens(child, code, out);
    }
}

/// Whitespace-normalized rendition of `node`: leaf tokens joined by single
/// spaces, comments dropped. Used for statement equality.
pub fn norm_text(node: Node<'_>, code: &str) -> String {
    let mut parts = Vec::new();
    collect_tokens(node, code, &mut parts);
    parts.join(" ")
}

/// Whether two statements are the same code, ignoring formatting.
pub fn stmts_equal(a: Node<'_>, b: Node<'_>, code: &str) -> bool {
    a.kind() == b.kind() && norm_text(a, code) == norm_text(b, code)
}

/// Whether two statement lists are the same code, ignoring formatting.
pub fn stmt_lists_equal(a: &[Node<'_>], b: &[Node<'_>], code: &str) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b.iter())
            .all(|(x, y)| stmts_equal(*x, *y, code))
}

/// Named children of `node`, comments excluded.
pub fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| c.kind() != "comment")
        .collect()
}

/// The statements of a block node, comments excluded.
pub fn stmt_list<'t>(block: Node<'t>) -> Vec<Node<'t>> {
    named_children(block)
}

/// The condition of an `if` statement or `elif` clause.
pub fn condition<'t>(node: Node<'t>) -> Option<Node<'t>> {
    node.child_by_field_name("condition")
}

/// The body block of an `if` statement or `elif` clause.
pub fn consequence<'t>(node: Node<'t>) -> Option<Node<'t>> {
    node.child_by_field_name("consequence")
}

/// The `elif` clauses of an `if` statement, in order.
pub fn elif_clauses<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    named_children(node)
        .into_iter()
        .filter(|c| c.kind() == "elif_clause")
        .collect()
}

/// The `else` clause of an `if`/`for`/`while`/`try` statement.
pub fn else_clause<'t>(node: Node<'t>) -> Option<Node<'t>> {
    named_children(node)
        .into_iter()
        .find(|c| c.kind() == "else_clause")
}

/// The body block of an `else` clause.
pub fn else_body<'t>(clause: Node<'t>) -> Option<Node<'t>> {
    clause.child_by_field_name("body")
}

/// Whether the `if` statement has at least one `elif` arm.
pub fn has_elif(node: Node<'_>) -> bool {
    !elif_clauses(node).is_empty()
}

/// Whether the statement carries an `else` clause.
pub fn has_else(node: Node<'_>) -> bool {
    else_clause(node).is_some()
}

/// The value of a `return` statement, if any.
pub fn return_value<'t>(node: Node<'t>) -> Option<Node<'t>> {
    if node.kind() != "return_statement" {
        return None;
    }
    named_children(node).into_iter().next()
}

/// Interprets a node as the boolean constant it denotes, if it is one.
pub fn bool_const(node: Node<'_>) -> Option<bool> {
    match node.kind() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// The operator (`and`/`or`) of a boolean operator node.
pub fn boolean_op<'a>(node: Node<'_>, code: &'a str) -> Option<&'a str> {
    if node.kind() != "boolean_operator" {
        return None;
    }
    node.child_by_field_name("operator")
        .map(|op| node_text(op, code))
}

/// Whether `stmt` is a docstring-style expression statement.
pub fn is_block_comment(stmt: Node<'_>) -> bool {
    stmt.kind() == "expression_statement"
        && named_children(stmt)
            .first()
            .is_some_and(|c| c.kind() == "string" || c.kind() == "concatenated_string")
}

/// Whether `stmt` is the `if __name__ == "__main__":` block.
pub fn is_main_block(stmt: Node<'_>, code: &str) -> bool {
    if stmt.kind() != "if_statement" {
        return false;
    }
    let Some(cond) = condition(stmt) else {
        return false;
    };
    if cond.kind() != "comparison_operator" {
        return false;
    }
    let operands = named_children(cond);
    if operands.len() != 2 {
        return false;
    }
    let ops: Vec<&str> = {
        let mut cursor = cond.walk();
        cond.children(&mut cursor)
            .filter(|c| !c.is_named() && c.kind() != "line_continuation")
            .map(|c| node_text(c, code))
            .collect::<Vec<_>>()
    };
    operands[0].kind() == "identifier"
        && node_text(operands[0], code) == "__name__"
        && ops == ["=="]
        && operands[1].kind() == "string"
        && matches!(
            node_text(operands[1], code),
            "\"__main__\"" | "'__main__'"
        )
}

/// Recursive statement count used by the duplication heuristics.
///
/// * `include_defs`: whether definitions and imports count
/// * `include_name_main`: whether the `__main__` block counts
pub fn statements_count(
    node: Node<'_>,
    code: &str,
    include_defs: bool,
    include_name_main: bool,
) -> usize {
    /// Counts all statements of a block field, zero when absent.
    fn block_count(
        node: Node<'_>,
        field: &str,
        code: &str,
        include_defs: bool,
        include_name_main: bool,
    ) -> usize {
        node.child_by_field_name(field)
            .map(|b| statements_count_list(&stmt_list(b), code, include_defs, include_name_main))
            .unwrap_or(0)
    }

    match node.kind() {
        "function_definition" | "class_definition" | "decorated_definition" => {
            if include_defs {
                1 + block_count(node, "body", code, include_defs, include_name_main)
            } else {
                0
            }
        }
        "import_statement" | "import_from_statement" | "future_import_statement" => {
            usize::from(include_defs)
        }
        "for_statement" | "while_statement" => {
            let else_part = else_clause(node)
                .and_then(else_body)
                .map(|b| {
                    1 + statements_count_list(&stmt_list(b), code, include_defs, include_name_main)
                })
                .unwrap_or(0);
            1 + block_count(node, "body", code, include_defs, include_name_main) + else_part
        }
        "if_statement" => {
            if is_main_block(node, code) && !include_name_main {
                return 0;
            }
            let mut total = 1 + block_count(node, "consequence", code, include_defs, include_name_main);
            for elif in elif_clauses(node) {
                total += 1 + block_count(elif, "consequence", code, include_defs, include_name_main);
            }
            if let Some(body) = else_clause(node).and_then(else_body) {
                total +=
                    1 + statements_count_list(&stmt_list(body), code, include_defs, include_name_main);
            }
            total
        }
        "module" | "block" => {
            statements_count_list(&named_children(node), code, include_defs, include_name_main)
        }
        "try_statement" => {
            let mut total = 2 + block_count(node, "body", code, include_defs, include_name_main);
            for child in named_children(node) {
                match child.kind() {
                    "except_clause" | "finally_clause" => {
                        if let Some(body) = named_children(child)
                            .into_iter()
                            .find(|c| c.kind() == "block")
                        {
                            total += statements_count_list(
                                &stmt_list(body),
                                code,
                                include_defs,
                                include_name_main,
                            );
                        }
                    }
                    "else_clause" => {
                        if let Some(body) = else_body(child) {
                            total += statements_count_list(
                                &stmt_list(body),
                                code,
                                include_defs,
                                include_name_main,
                            );
                        }
                    }
                    _ => {}
                }
            }
            total
        }
        "with_statement" => 1 + block_count(node, "body", code, include_defs, include_name_main),
        _ => 1,
    }
}

/// Statement count over a list of nodes.
pub fn statements_count_list(
    nodes: &[Node<'_>],
    code: &str,
    include_defs: bool,
    include_name_main: bool,
) -> usize {
    nodes
        .iter()
        .map(|n| statements_count(*n, code, include_defs, include_name_main))
        .sum()
}

/// Renders an expression the way messages quote code: single spaces between
/// tokens, no spaces around `**`, normalized call and subscript brackets.
pub fn expr_text(node: Node<'_>, code: &str) -> String {
    /// Renders the named children joined by a separator.
    fn join_children(node: Node<'_>, code: &str, sep: &str) -> String {
        named_children(node)
            .into_iter()
            .map(|c| expr_text(c, code))
            .collect::<Vec<_>>()
            .join(sep)
    }

    match node.kind() {
        "identifier" | "integer" | "float" | "true" | "false" | "none" | "ellipsis" => {
            node_text(node, code).to_string()
        }
        "string" | "concatenated_string" => node_text(node, code).to_string(),
        "binary_operator" => {
            let left = node.child_by_field_name("left");
            let op = node.child_by_field_name("operator");
            let right = node.child_by_field_name("right");
            match (left, op, right) {
                (Some(l), Some(o), Some(r)) => {
                    let op_text = node_text(o, code);
                    if op_text == "**" {
                        format!("{}**{}", expr_text(l, code), expr_text(r, code))
                    } else {
                        format!("{} {} {}", expr_text(l, code), op_text, expr_text(r, code))
                    }
                }
                _ => norm_text(node, code),
            }
        }
        "boolean_operator" => {
            let left = node.child_by_field_name("left");
            let op = node.child_by_field_name("operator");
            let right = node.child_by_field_name("right");
            match (left, op, right) {
                (Some(l), Some(o), Some(r)) => format!(
                    "{} {} {}",
                    expr_text(l, code),
                    node_text(o, code),
                    expr_text(r, code)
                ),
                _ => norm_text(node, code),
            }
        }
        "comparison_operator" => {
            let mut cursor = node.walk();
            let parts: Vec<String> = node
                .children(&mut cursor)
                .filter(|c| !matches!(c.kind(), "comment" | "line_continuation"))
                .map(|c| {
                    if c.is_named() {
                        expr_text(c, code)
                    } else {
                        node_text(c, code).to_string()
                    }
                })
                .collect();
            parts.join(" ")
        }
        "not_operator" => node
            .child_by_field_name("argument")
            .map(|a| format!("not {}", expr_text(a, code)))
            .unwrap_or_else(|| norm_text(node, code)),
        "unary_operator" => {
            let op = node.child_by_field_name("operator");
            let arg = node.child_by_field_name("argument");
            match (op, arg) {
                (Some(o), Some(a)) => format!("{}{}", node_text(o, code), expr_text(a, code)),
                _ => norm_text(node, code),
            }
        }
        "parenthesized_expression" => named_children(node)
            .first()
            .map(|inner| format!("({})", expr_text(*inner, code)))
            .unwrap_or_else(|| norm_text(node, code)),
        "call" => {
            let func = node.child_by_field_name("function");
            let args = node.child_by_field_name("arguments");
            match (func, args) {
                (Some(f), Some(a)) => format!("{}{}", expr_text(f, code), expr_text(a, code)),
                _ => norm_text(node, code),
            }
        }
        "argument_list" => format!("({})", join_children(node, code, ", ")),
        "attribute" => {
            let obj = node.child_by_field_name("object");
            let attr = node.child_by_field_name("attribute");
            match (obj, attr) {
                (Some(o), Some(a)) => {
                    format!("{}.{}", expr_text(o, code), node_text(a, code))
                }
                _ => norm_text(node, code),
            }
        }
        "subscript" => {
            let value = node.child_by_field_name("value");
            match value {
                Some(v) => {
                    let subs: Vec<String> = named_children(node)
                        .into_iter()
                        .filter(|c| c.id() != v.id())
                        .map(|c| expr_text(c, code))
                        .collect();
                    format!("{}[{}]", expr_text(v, code), subs.join(", "))
                }
                None => norm_text(node, code),
            }
        }
        "conditional_expression" => {
            let children = named_children(node);
            if children.len() == 3 {
                format!(
                    "{} if {} else {}",
                    expr_text(children[0], code),
                    expr_text(children[1], code),
                    expr_text(children[2], code)
                )
            } else {
                norm_text(node, code)
            }
        }
        "tuple" | "expression_list" | "pattern_list" => join_children(node, code, ", "),
        "list" => format!("[{}]", join_children(node, code, ", ")),
        "set" => format!("{{{}}}", join_children(node, code, ", ")),
        "dictionary" => format!("{{{}}}", join_children(node, code, ", ")),
        "pair" => {
            let key = node.child_by_field_name("key");
            let value = node.child_by_field_name("value");
            match (key, value) {
                (Some(k), Some(v)) => {
                    format!("{}: {}", expr_text(k, code), expr_text(v, code))
                }
                _ => norm_text(node, code),
            }
        }
        "keyword_argument" => {
            let name = node.child_by_field_name("name");
            let value = node.child_by_field_name("value");
            match (name, value) {
                (Some(n), Some(v)) => format!("{}={}", node_text(n, code), expr_text(v, code)),
                _ => norm_text(node, code),
            }
        }
        _ => norm_text(node, code),
    }
}

/// Renders an expression as an operand of `join_op` (`and`/`or`),
/// parenthesizing boolean operations with the other operator.
pub fn join_operand(node: Node<'_>, code: &str, join_op: &str) -> String {
    match boolean_op(node, code) {
        Some(op) if op != join_op => format!("({})", expr_text(node, code)),
        _ => expr_text(node, code),
    }
}

/// Renders the negation of an expression with the `<negated …>` placeholder;
/// boolean operations are parenthesized inside the placeholder.
pub fn negated(node: Node<'_>, code: &str) -> String {
    if node.kind() == "boolean_operator" {
        format!("<negated ({})>", expr_text(node, code))
    } else {
        format!("<negated {}>", expr_text(node, code))
    }
}
