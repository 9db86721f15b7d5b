#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Checks for `if` statements and expressions that boil down to a single
//! boolean expression, which novices write expanded surprisingly often.

use anyhow::Result;
use tree_sitter::Node;

use super::{
    CheckContext, Checker, MessageSpec,
    utils::{
        bool_const, condition, consequence, else_body, else_clause, expr_text, has_elif, has_else,
        is_main_block, join_operand, negated, return_value, stmt_list, stmt_lists_equal,
    },
};
use crate::{
    linting::problem::Problem,
    python::queries::{CONDITIONAL_EXPR_QUERY, IF_STATEMENT_QUERY},
};

/// Checker for the simplifiable-if message family.
pub struct SimplifiableIf;

/// Messages emitted by [`SimplifiableIf`].
static MESSAGES: [MessageSpec; 10] = [
    MessageSpec {
        code:        "R6201",
        symbol:      "simplifiable-if-return",
        template:    "The if statement can be replaced with '{}'",
        description: "Emitted when both branches of an if statement just return a boolean \
                      constant, so the statement can return the condition directly.",
    },
    MessageSpec {
        code:        "R6202",
        symbol:      "simplifiable-if-return-conj",
        template:    "The if statement can be replaced with '{}'",
        description: "Emitted when one branch of an if statement returns a boolean constant and \
                      the other returns an expression, so the statement can return a conjunction \
                      or disjunction.",
    },
    MessageSpec {
        code:        "R6203",
        symbol:      "simplifiable-if-assignment",
        template:    "The conditional assignment can be replaced with '{}'",
        description: "Emitted when both branches of an if statement assign a boolean constant to \
                      the same variable.",
    },
    MessageSpec {
        code:        "R6204",
        symbol:      "simplifiable-if-expr",
        template:    "The if expression can be replaced with '{}'",
        description: "Emitted when a conditional expression evaluates to a boolean constant in \
                      both branches.",
    },
    MessageSpec {
        code:        "R6205",
        symbol:      "simplifiable-if-pass",
        template:    "Use 'if <negated {}>: <else body>' instead of 'pass'",
        description: "Emitted when the body of an if statement is just 'pass' while the else \
                      branch does the work.",
    },
    MessageSpec {
        code:        "R6206",
        symbol:      "no-value-in-one-branch-return",
        template:    "Both branches should return a value explicitly (one returns implicit None)",
        description: "Emitted when one branch of an if statement returns a value and the other \
                      returns without one.",
    },
    MessageSpec {
        code:        "R6207",
        symbol:      "simplifiable-if-nested",
        template:    "The if statement can be merged with the nested one to 'if {}:'",
        description: "Emitted when an if statement's body is just another if statement, so the \
                      conditions can be joined with 'and'.",
    },
    MessageSpec {
        code:        "R6208",
        symbol:      "simplifiable-if-seq",
        template:    "The if statement can be merged with the following one to 'if {}:'",
        description: "Emitted when two consecutive if statements have identical bodies, so the \
                      conditions can be joined with 'or'.",
    },
    MessageSpec {
        code:        "R6209",
        symbol:      "simplifiable-if-expr-conj",
        template:    "The if expression can be replaced with '{}'",
        description: "Emitted when one branch of a conditional expression is a boolean constant, \
                      so it can become a conjunction or disjunction.",
    },
    MessageSpec {
        code:        "R6210",
        symbol:      "simplifiable-if-assignment-conj",
        template:    "The conditional assignment can be replaced with '{}'",
        description: "Emitted when one branch of a conditional assignment assigns a boolean \
                      constant, so it can assign a conjunction or disjunction.",
    },
];

/// The simplified expression a pair of branch values reduces to, if any.
///
/// `x` is the value of the if branch, `y` the value of the else branch (or
/// the statement following the if). Returns the replacement expression plus
/// whether both values were boolean constants.
fn simplified(cond: Node<'_>, x: Node<'_>, y: Node<'_>, code: &str) -> Option<(String, bool)> {
    match (bool_const(x), bool_const(y)) {
        (Some(a), Some(b)) => {
            if a == b {
                return None;
            }
            let text = if a {
                expr_text(cond, code)
            } else {
                negated(cond, code)
            };
            Some((text, true))
        }
        (Some(true), None) => Some((
            format!(
                "{} or {}",
                join_operand(cond, code, "or"),
                join_operand(y, code, "or")
            ),
            false,
        )),
        (Some(false), None) => Some((
            format!("{} and {}", negated(cond, code), join_operand(y, code, "and")),
            false,
        )),
        (None, Some(false)) => Some((
            format!(
                "{} and {}",
                join_operand(cond, code, "and"),
                join_operand(x, code, "and")
            ),
            false,
        )),
        (None, Some(true)) => Some((
            format!("{} or {}", negated(cond, code), join_operand(x, code, "or")),
            false,
        )),
        (None, None) => None,
    }
}

/// The single `return` statement of a one-statement block, if that is what
/// the block is.
fn single_return<'t>(stmts: &[Node<'t>]) -> Option<Node<'t>> {
    match stmts {
        [only] if only.kind() == "return_statement" => Some(*only),
        _ => None,
    }
}

/// The `(target, value)` of a one-statement block consisting of a plain
/// assignment, if that is what the block is.
fn single_assignment<'t>(stmts: &[Node<'t>], code: &str) -> Option<(String, Node<'t>)> {
    let [only] = stmts else { return None };
    if only.kind() != "expression_statement" {
        return None;
    }
    let children = super::utils::named_children(*only);
    let [assign] = children.as_slice() else {
        return None;
    };
    if assign.kind() != "assignment" || assign.child_by_field_name("type").is_some() {
        return None;
    }
    let left = assign.child_by_field_name("left")?;
    let right = assign.child_by_field_name("right")?;
    Some((super::utils::norm_text(left, code), right))
}

impl SimplifiableIf {
    /// Checks one `if` statement for the whole family of messages.
    fn check_if(&self, ctx: &CheckContext<'_>, node: Node<'_>, problems: &mut Vec<Problem>) {
        let code = ctx.code();
        if is_main_block(node, code) || has_elif(node) {
            return;
        }
        let Some(cond) = condition(node) else { return };
        let Some(body_block) = consequence(node) else {
            return;
        };
        let body = stmt_list(body_block);
        if body.is_empty() {
            return;
        }

        if let Some(else_stmts) = else_clause(node).and_then(else_body).map(|b| stmt_list(b)) {
            self.check_if_else(ctx, node, cond, &body, &else_stmts, problems);
        } else {
            self.check_if_following(ctx, node, cond, &body, problems);
        }
    }

    /// Handles `if`/`else` statements.
    fn check_if_else(
        &self,
        ctx: &CheckContext<'_>,
        node: Node<'_>,
        cond: Node<'_>,
        body: &[Node<'_>],
        else_stmts: &[Node<'_>],
        problems: &mut Vec<Problem>,
    ) {
        let code = ctx.code();

        // if c: pass / else: work
        if body.len() == 1 && body[0].kind() == "pass_statement" && !else_stmts.is_empty() {
            problems.push(ctx.problem(
                "R6205",
                node,
                format!(
                    "Use 'if {}: <else body>' instead of 'pass'",
                    negated(cond, code)
                ),
            ));
            return;
        }

        if let (Some(ret1), Some(ret2)) = (single_return(body), single_return(else_stmts)) {
            self.check_return_pair(ctx, node, cond, ret1, ret2, problems);
            return;
        }

        if let (Some((target1, value1)), Some((target2, value2))) = (
            single_assignment(body, code),
            single_assignment(else_stmts, code),
        ) && target1 == target2
            && let Some((expr, both_const)) = simplified(cond, value1, value2, code)
        {
            let msg_code = if both_const { "R6203" } else { "R6210" };
            problems.push(ctx.problem(
                msg_code,
                node,
                format!(
                    "The conditional assignment can be replaced with '{target1} = {expr}'"
                ),
            ));
        }
    }

    /// Handles a bare `if` followed by another statement.
    fn check_if_following(
        &self,
        ctx: &CheckContext<'_>,
        node: Node<'_>,
        cond: Node<'_>,
        body: &[Node<'_>],
        problems: &mut Vec<Problem>,
    ) {
        let code = ctx.code();

        // if c: { if d: … } with no else anywhere
        if let [only] = body
            && only.kind() == "if_statement"
            && !has_elif(*only)
            && !has_else(*only)
            && let Some(inner_cond) = condition(*only)
        {
            problems.push(ctx.problem(
                "R6207",
                node,
                format!(
                    "The if statement can be merged with the nested one to 'if {} and {}:'",
                    join_operand(cond, code, "and"),
                    join_operand(inner_cond, code, "and")
                ),
            ));
            return;
        }

        let mut sibling = node.next_named_sibling();
        while let Some(n) = sibling
            && n.kind() == "comment"
        {
            sibling = n.next_named_sibling();
        }
        let Some(next) = sibling else {
            return;
        };

        // if c: B / if d: B
        if next.kind() == "if_statement"
            && !has_elif(next)
            && !has_else(next)
            && let (Some(next_cond), Some(next_body)) = (condition(next), consequence(next))
            && stmt_lists_equal(body, &stmt_list(next_body), code)
        {
            problems.push(ctx.problem(
                "R6208",
                node,
                format!(
                    "The if statement can be merged with the following one to 'if {} or {}:'",
                    join_operand(cond, code, "or"),
                    join_operand(next_cond, code, "or")
                ),
            ));
            return;
        }

        // if c: return X / return Y
        if next.kind() == "return_statement"
            && let Some(ret1) = single_return(body)
        {
            self.check_return_pair(ctx, node, cond, ret1, next, problems);
        }
    }

    /// Handles a pair of returns covering both outcomes of the condition.
    fn check_return_pair(
        &self,
        ctx: &CheckContext<'_>,
        node: Node<'_>,
        cond: Node<'_>,
        ret1: Node<'_>,
        ret2: Node<'_>,
        problems: &mut Vec<Problem>,
    ) {
        let code = ctx.code();
        match (return_value(ret1), return_value(ret2)) {
            (Some(x), Some(y)) => {
                if let Some((expr, both_const)) = simplified(cond, x, y, code) {
                    let msg_code = if both_const { "R6201" } else { "R6202" };
                    problems.push(ctx.problem(
                        msg_code,
                        node,
                        format!("The if statement can be replaced with 'return {expr}'"),
                    ));
                }
            }
            (Some(_), None) | (None, Some(_)) => {
                problems.push(ctx.problem(
                    "R6206",
                    node,
                    "Both branches should return a value explicitly (one returns implicit None)",
                ));
            }
            (None, None) => {}
        }
    }

    /// Checks one conditional expression (`X if c else Y`).
    fn check_if_expr(&self, ctx: &CheckContext<'_>, node: Node<'_>, problems: &mut Vec<Problem>) {
        let code = ctx.code();
        let children = super::utils::named_children(node);
        let [x, cond, y] = children.as_slice() else {
            return;
        };
        if let Some((expr, both_const)) = simplified(*cond, *x, *y, code) {
            let msg_code = if both_const { "R6204" } else { "R6209" };
            problems.push(ctx.problem(
                msg_code,
                node,
                format!("The if expression can be replaced with '{expr}'"),
            ));
        }
    }
}

impl Checker for SimplifiableIf {
    fn name(&self) -> &'static str {
        "simplifiable-if"
    }

    fn messages(&self) -> &'static [MessageSpec] {
        &MESSAGES
    }

    fn check(&self, ctx: &CheckContext<'_>) -> Result<Vec<Problem>> {
        let mut problems = Vec::new();

        for node in ctx.parser.query_nodes(IF_STATEMENT_QUERY, "stmt")? {
            self.check_if(ctx, node, &mut problems);
        }
        for node in ctx.parser.query_nodes(CONDITIONAL_EXPR_QUERY, "expr")? {
            self.check_if_expr(ctx, node, &mut problems);
        }

        Ok(problems)
    }
}
