#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Checks for code that was copy-pasted instead of factored out.

use std::collections::{HashMap, HashSet};

use anyhow::Result;
use itertools::Itertools;
use tree_sitter::Node;

use super::{
    CheckContext, Checker, MessageSpec,
    utils::{
        consequence, elif_clauses, else_body, else_clause, expr_text, has_else, is_block_comment,
        is_main_block, lines_between, named_children, node_text, norm_text, start_line,
        statements_count_list, stmt_list, stmt_lists_equal, stmts_equal,
    },
};
use crate::linting::problem::Problem;

/// Checker for the no-duplicate-code message family.
pub struct NoDuplicateCode;

/// Minimum number of source lines a block must span to be a duplication
/// candidate.
const MIN_BLOCK_LINES: usize = 3;

/// Maximum number of distinct renamings two blocks may differ by and still
/// count as duplicates.
const MAX_BLOCK_DIFF: usize = 3;

/// Repetitions needed for a duplicate sequence when the varying constants
/// form an arithmetic progression.
const DUPL_SEQ_LEN: usize = 4;

/// Repetitions needed for a duplicate sequence without the progression
/// requirement.
const DUPL_SEQ_LEN_NO_RANGE: usize = 5;

/// Complexity threshold above which a repeated expression is reported.
const EXPR_COMPLEXITY_THRESHOLD: usize = 8;

/// Calls to these functions keep an expression a valid extraction candidate.
const EXPR_FUNCTIONS: [&str; 18] = [
    "abs", "max", "min", "round", "sqrt", "len", "all", "any", "sum", "map", "filter", "sorted",
    "reversed", "int", "str", "ord", "chr", "float",
];

/// Messages emitted by [`NoDuplicateCode`].
static MESSAGES: [MessageSpec; 5] = [
    MessageSpec {
        code:        "R6502",
        symbol:      "duplicate-if-branches",
        template:    "Identical code inside all if's branches, move {} lines {} the if.",
        description: "Emitted when identical code starts or ends all branches of an if statement.",
    },
    MessageSpec {
        code:        "R6503",
        symbol:      "duplicate-seq-ifs",
        template:    "Identical code inside {} consecutive ifs, join their conditions using 'or'.",
        description: "Emitted when several consecutive if statements have identical bodies and \
                      thus can be joined by or in their conditions.",
    },
    MessageSpec {
        code:        "R6504",
        symbol:      "duplicate-exprs",
        template:    "A complex expression '{}' used repeatedly (on lines {}). Extract it to a \
                      local variable or create a helper function.",
        description: "Emitted when an overly complex expression is used multiple times.",
    },
    MessageSpec {
        code:        "R6505",
        symbol:      "duplicate-blocks",
        template:    "Duplicate blocks starting on lines {}. Extract the code to a helper \
                      function.",
        description: "Emitted when there are duplicate blocks of code as a body of an \
                      if/elif/else/for/while/with/try-except block.",
    },
    MessageSpec {
        code:        "R6506",
        symbol:      "duplicate-sequence",
        template:    "Duplicate sequence of {} repetitions of {} lines of code. Use a loop to \
                      avoid this.",
        description: "Emitted when there is a sequence of similar sub-blocks inside a block that \
                      can be replaced by a loop.",
    },
];

/// A statement block together with the kind of construct that owns it.
struct OwnedBlock<'t> {
    /// The statements of the block, comments excluded.
    stmts: Vec<Node<'t>>,
    /// Normalized kind of the owning construct (`if_statement`,
    /// `for_statement`, `except_clause`, `function_definition`, `module`, …).
    owner: &'static str,
}

/// Collects every statement block in the file, the way the duplication
/// checks group them: each if/elif/else arm, loop body and loop else,
/// with/try/except bodies, function bodies, and the module top level with
/// definitions and the `__main__` block removed.
fn collect_blocks<'t>(root: Node<'t>, code: &str) -> Vec<OwnedBlock<'t>> {
    /// Interns the owner kind so blocks can be labelled without allocation.
    fn owner_kind(kind: &str) -> &'static str {
        match kind {
            "if_statement" => "if_statement",
            "for_statement" => "for_statement",
            "while_statement" => "while_statement",
            "with_statement" => "with_statement",
            "try_statement" => "try_statement",
            "except_clause" => "except_clause",
            "function_definition" => "function_definition",
            _ => "module",
        }
    }

    /// Pushes a block body owned by `owner` when it is non-empty.
    fn push_block<'t>(blocks: &mut Vec<OwnedBlock<'t>>, owner: &'static str, block: Node<'t>) {
        let stmts = stmt_list(block);
        if !stmts.is_empty() {
            blocks.push(OwnedBlock { stmts, owner });
        }
    }

    /// Recursive walk collecting blocks.
    fn walk<'t>(node: Node<'t>, code: &str, blocks: &mut Vec<OwnedBlock<'t>>) {
        match node.kind() {
            "module" => {
                let top: Vec<Node<'t>> = named_children(node)
                    .into_iter()
                    .filter(|s| {
                        !matches!(
                            s.kind(),
                            "function_definition" | "class_definition" | "decorated_definition"
                        ) && !is_main_block(*s, code)
                    })
                    .collect();
                if !top.is_empty() {
                    blocks.push(OwnedBlock {
                        stmts: top,
                        owner: "module",
                    });
                }
            }
            "if_statement" => {
                if let Some(body) = consequence(node) {
                    push_block(blocks, "if_statement", body);
                }
                for elif in elif_clauses(node) {
                    if let Some(body) = consequence(elif) {
                        push_block(blocks, "if_statement", body);
                    }
                }
                if let Some(body) = else_clause(node).and_then(else_body) {
                    push_block(blocks, "if_statement", body);
                }
            }
            "for_statement" | "while_statement" | "with_statement" => {
                if let Some(body) = node.child_by_field_name("body") {
                    push_block(blocks, owner_kind(node.kind()), body);
                }
                if let Some(body) = else_clause(node).and_then(else_body) {
                    push_block(blocks, owner_kind(node.kind()), body);
                }
            }
            "try_statement" => {
                if let Some(body) = node.child_by_field_name("body") {
                    push_block(blocks, "try_statement", body);
                }
                for child in named_children(node) {
                    match child.kind() {
                        "except_clause" => {
                            if let Some(body) = named_children(child)
                                .into_iter()
                                .find(|c| c.kind() == "block")
                            {
                                push_block(blocks, "except_clause", body);
                            }
                        }
                        "else_clause" => {
                            if let Some(body) = else_body(child) {
                                push_block(blocks, "try_statement", body);
                            }
                        }
                        _ => {}
                    }
                }
            }
            "function_definition" => {
                if let Some(body) = node.child_by_field_name("body") {
                    push_block(blocks, "function_definition", body);
                }
            }
            _ => {}
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            walk(child, code, blocks);
        }
    }

    let mut blocks = Vec::new();
    walk(root, code, &mut blocks);
    blocks
}

/// One `if`/`elif` arm participating in a consecutive-ifs sequence.
struct IfArm<'t> {
    /// The `if_statement` or `elif_clause` node.
    node:       Node<'t>,
    /// Body statements of the arm.
    body:       Vec<Node<'t>>,
    /// Id of the `if_statement` this arm belongs to.
    chain_root: usize,
    /// Whether this arm is the head of its chain.
    is_head:    bool,
}

impl NoDuplicateCode {
    /// `R6502`: identical statement prefix or suffix across all branches of
    /// an if/elif/else chain.
    fn duplicate_if_branches(
        &self,
        ctx: &CheckContext<'_>,
        node: Node<'_>,
        problems: &mut Vec<Problem>,
    ) {
        let code = ctx.code();
        if !has_else(node) {
            return;
        }

        let mut branches: Vec<Vec<Node<'_>>> = Vec::new();
        if let Some(body) = consequence(node) {
            branches.push(stmt_list(body));
        }
        for elif in elif_clauses(node) {
            if let Some(body) = consequence(elif) {
                branches.push(stmt_list(body));
            }
        }
        if let Some(body) = else_clause(node).and_then(else_body) {
            branches.push(stmt_list(body));
        }
        if branches.len() < 2 || branches.iter().any(Vec::is_empty) {
            return;
        }

        /// Length of the common statement prefix (or suffix) of all branches.
        fn stmts_difference(branches: &[Vec<Node<'_>>], code: &str, forward: bool) -> usize {
            let min_len = branches.iter().map(Vec::len).min().unwrap_or(0);
            let reference = &branches[0];
            for i in 0..min_len {
                for branch in &branches[1..] {
                    let (a, b) = if forward {
                        (reference[i], branch[i])
                    } else {
                        (reference[reference.len() - 1 - i], branch[branch.len() - 1 - i])
                    };
                    if !stmts_equal(a, b, code) {
                        return i;
                    }
                }
            }
            min_len
        }

        let same_prefix_len = stmts_difference(&branches, code, true);
        if same_prefix_len >= 1 {
            let first = branches[0][0];
            let last = branches[0][same_prefix_len - 1];
            problems.push(ctx.problem(
                "R6502",
                node,
                format!(
                    "Identical code inside all if's branches, move {} lines before the if.",
                    lines_between(first, last, true)
                ),
            ));
            if branches.iter().any(|b| b.len() == same_prefix_len) {
                return;
            }
        }

        let same_suffix_len = stmts_difference(&branches, code, false);
        if same_suffix_len >= 1 {
            let mut branches = branches;
            // allow early returns
            if same_suffix_len == 1
                && branches[0].last().is_some_and(|s| s.kind() == "return_statement")
            {
                let mut i = 0;
                while i < branches.len() && branches[i].len() == 1 {
                    i += 1;
                }
                branches.drain(..i);
                if branches.len() < 2 {
                    return;
                }
            }

            // disallow breaking up coherent segments
            let same_part = &branches[0][branches[0].len() - same_suffix_len..];
            let same_count = statements_count_list(same_part, code, true, true) as f64;
            let min_branch_count = branches
                .iter()
                .map(|b| statements_count_list(b, code, true, true))
                .min()
                .unwrap_or(0) as f64;
            let denominator = min_branch_count - same_prefix_len as f64;
            if denominator <= 0.0 || same_count / denominator < 0.5 {
                return;
            }

            let first = branches[0][branches[0].len() - same_suffix_len];
            let last = branches[0][branches[0].len() - 1];
            problems.push(ctx.problem(
                "R6502",
                node,
                format!(
                    "Identical code inside all if's branches, move {} lines after the if.",
                    lines_between(first, last, true)
                ),
            ));
        }
    }

    /// `R6503`: consecutive ifs (or elif arms) with identical bodies.
    fn duplicate_seq_ifs(
        &self,
        ctx: &CheckContext<'_>,
        blocks: &[OwnedBlock<'_>],
        problems: &mut Vec<Problem>,
    ) {
        let code = ctx.code();

        /// Expands an if statement into sequence arms; `None` when its chain
        /// ends with an else and thus cannot participate.
        fn chain_arms<'t>(node: Node<'t>) -> Option<Vec<IfArm<'t>>> {
            if has_else(node) {
                return None;
            }
            let mut arms = Vec::new();
            arms.push(IfArm {
                node,
                body: consequence(node).map(|b| stmt_list(b)).unwrap_or_default(),
                chain_root: node.id(),
                is_head: true,
            });
            for elif in elif_clauses(node) {
                arms.push(IfArm {
                    node: elif,
                    body: consequence(elif).map(|b| stmt_list(b)).unwrap_or_default(),
                    chain_root: node.id(),
                    is_head: false,
                });
            }
            Some(arms)
        }

        /// Whether `next` directly follows `prev` in the source, with only
        /// comments in between.
        fn adjacent(prev: Node<'_>, next: Node<'_>) -> bool {
            let mut sibling = prev.next_named_sibling();
            while let Some(n) = sibling
                && n.kind() == "comment"
            {
                sibling = n.next_named_sibling();
            }
            sibling.is_some_and(|n| n.id() == next.id())
        }

        /// How many arms starting at `start` share the same body.
        fn same_ifs_count(arms: &[IfArm<'_>], start: usize, code: &str) -> usize {
            for i in start + 1..arms.len() {
                // do not suggest join of elif and sibling
                if !arms[start].is_head && arms[i].chain_root != arms[start].chain_root {
                    return i - start;
                }
                if !stmt_lists_equal(&arms[start].body, &arms[i].body, code) {
                    return i - start;
                }
            }
            arms.len() - start
        }

        for block in blocks {
            let mut idx = 0;
            while idx < block.stmts.len() {
                let stmt = block.stmts[idx];
                if stmt.kind() != "if_statement" {
                    idx += 1;
                    continue;
                }

                // gather the maximal run of consecutive if siblings, stopping
                // before any chain that ends with an else
                let mut arms: Vec<IfArm<'_>> = Vec::new();
                let mut run_end = idx;
                while run_end < block.stmts.len() {
                    let candidate = block.stmts[run_end];
                    if candidate.kind() != "if_statement" {
                        break;
                    }
                    if run_end > idx && !adjacent(block.stmts[run_end - 1], candidate) {
                        break;
                    }
                    match chain_arms(candidate) {
                        Some(new_arms) => arms.extend(new_arms),
                        None => break,
                    }
                    run_end += 1;
                }
                if run_end == idx {
                    // the first chain ends with an else; skip past it
                    idx += 1;
                    continue;
                }

                let mut i = 0;
                while i + 1 < arms.len() {
                    let count = same_ifs_count(&arms, i, code);
                    if count > 1 {
                        let first = arms[i].node;
                        let last_body = &arms[i + count - 1].body;
                        let last = last_body.last().copied().unwrap_or(arms[i + count - 1].node);
                        problems.push(ctx.problem_spanning(
                            "R6503",
                            first,
                            last,
                            format!(
                                "Identical code inside {count} consecutive ifs, join their \
                                 conditions using 'or'."
                            ),
                        ));
                    }
                    i += count;
                }

                idx = run_end.max(idx + 1);
            }
        }
    }

    /// `R6504`: complex expressions repeated verbatim.
    fn duplicate_exprs(
        &self,
        ctx: &CheckContext<'_>,
        root: Node<'_>,
        problems: &mut Vec<Problem>,
    ) {
        let code = ctx.code();

        /// Expression kinds the walk considers extraction candidates.
        fn is_candidate_kind(kind: &str) -> bool {
            matches!(
                kind,
                "attribute"
                    | "binary_operator"
                    | "boolean_operator"
                    | "call"
                    | "comparison_operator"
                    | "dictionary"
                    | "dictionary_comprehension"
                    | "conditional_expression"
                    | "lambda"
                    | "list"
                    | "list_comprehension"
                    | "set"
                    | "set_comprehension"
                    | "subscript"
                    | "tuple"
                    | "unary_operator"
                    | "not_operator"
            )
        }

        /// Expression complexity; `None` marks expressions that must not be
        /// extracted (attribute/subscript targets of assignments, calls to
        /// anything but simple value functions).
        fn complexity(node: Node<'_>, code: &str) -> Option<usize> {
            let kind = node.kind();

            if matches!(kind, "attribute" | "subscript")
                && node
                    .parent()
                    .is_some_and(|p| matches!(p.kind(), "assignment" | "augmented_assignment"))
            {
                return None;
            }
            if kind == "call" {
                let callee = node
                    .child_by_field_name("function")
                    .map(|f| expr_text(f, code))
                    .unwrap_or_default();
                if !EXPR_FUNCTIONS.contains(&callee.as_str()) {
                    return None;
                }
            }

            let children_sum = |node: Node<'_>| -> Option<usize> {
                named_children(node)
                    .into_iter()
                    .map(|c| complexity(c, code))
                    .sum()
            };

            match kind {
                "binary_operator" => {
                    let left = complexity(node.child_by_field_name("left")?, code)?;
                    let right = complexity(node.child_by_field_name("right")?, code)?;
                    Some(2 + left + right)
                }
                "boolean_operator" => {
                    let left = complexity(node.child_by_field_name("left")?, code)?;
                    let right = complexity(node.child_by_field_name("right")?, code)?;
                    Some(1 + left + right)
                }
                "comparison_operator" => {
                    let operands = named_children(node);
                    let ops = operands.len().saturating_sub(1);
                    Some(ops + children_sum(node)?)
                }
                "identifier" | "integer" | "float" | "string" | "true" | "false" | "none" => {
                    Some(1)
                }
                "attribute" => {
                    let object = complexity(node.child_by_field_name("object")?, code)?;
                    Some(1 + object)
                }
                _ => children_sum(node),
            }
        }

        /// Walk collecting candidate expressions by their rendered text.
        fn walk<'t>(
            node: Node<'t>,
            code: &str,
            found: &mut HashMap<String, Vec<Node<'t>>>,
        ) {
            if node.kind() == "assert_statement" {
                return;
            }
            if is_candidate_kind(node.kind()) {
                match complexity(node, code) {
                    None => {
                        for child in named_children(node) {
                            walk(child, code, found);
                        }
                    }
                    Some(value) if value >= EXPR_COMPLEXITY_THRESHOLD => {
                        found.entry(expr_text(node, code)).or_default().push(node);
                        for child in named_children(node) {
                            walk(child, code, found);
                        }
                    }
                    Some(_) => {}
                }
                return;
            }
            for child in named_children(node) {
                walk(child, code, found);
            }
        }

        let mut found: HashMap<String, Vec<Node<'_>>> = HashMap::new();
        walk(root, code, &mut found);

        let mut emitted: HashSet<usize> = HashSet::new();
        let groups = found
            .into_iter()
            .filter(|(_, nodes)| nodes.len() >= 2)
            .sorted_by_key(|(name, nodes)| {
                (
                    usize::MAX - name.len(),
                    nodes.iter().map(|n| n.start_byte()).min().unwrap_or(0),
                )
            });

        for (name, mut nodes) in groups {
            nodes.sort_by_key(|n| (start_line(*n), n.end_position().row));
            let first = nodes[0];
            let parent_emitted = first
                .parent()
                .is_some_and(|p| emitted.contains(&p.id()));
            if !parent_emitted {
                let lines = nodes.iter().map(|n| start_line(*n).to_string()).join(", ");
                problems.push(ctx.problem(
                    "R6504",
                    first,
                    format!(
                        "A complex expression '{name}' used repeatedly (on lines {lines}). \
                         Extract it to a local variable or create a helper function."
                    ),
                ));
            }
            emitted.extend(nodes.iter().map(|n| n.id()));
        }
    }

    /// `R6505`: structurally equal blocks up to a few renamings.
    fn duplicate_blocks(
        &self,
        ctx: &CheckContext<'_>,
        blocks: &[OwnedBlock<'_>],
        problems: &mut Vec<Problem>,
    ) {
        let code = ctx.code();

        /// Records renamings between two matching nodes; `false` kills the
        /// comparison outright.
        fn update_diffs(
            a: Node<'_>,
            b: Node<'_>,
            code: &str,
            diffs: &mut HashSet<(String, String)>,
        ) -> bool {
            /// Operator tokens of a node, in order.
            fn op_tokens<'a>(node: Node<'_>, code: &'a str) -> Vec<&'a str> {
                let mut cursor = node.walk();
                node.children(&mut cursor)
                    .filter(|c| !c.is_named() && c.kind() != "line_continuation")
                    .map(|c| node_text(c, code))
                    .collect::<Vec<_>>()
            }

            match a.kind() {
                "comparison_operator" => {
                    for (op_a, op_b) in op_tokens(a, code).into_iter().zip(op_tokens(b, code)) {
                        if op_a != op_b {
                            diffs.insert((op_a.to_string(), op_b.to_string()));
                        }
                    }
                }
                "binary_operator" | "augmented_assignment" | "unary_operator" => {
                    let op_a = a.child_by_field_name("operator").map(|o| node_text(o, code));
                    let op_b = b.child_by_field_name("operator").map(|o| node_text(o, code));
                    if let (Some(op_a), Some(op_b)) = (op_a, op_b)
                        && op_a != op_b
                    {
                        diffs.insert((op_a.to_string(), op_b.to_string()));
                    }
                }
                "boolean_operator" => {
                    let op_a = a.child_by_field_name("operator").map(|o| node_text(o, code));
                    let op_b = b.child_by_field_name("operator").map(|o| node_text(o, code));
                    if op_a != op_b {
                        return false;
                    }
                }
                "identifier" | "integer" | "float" | "string" => {
                    let text_a = node_text(a, code);
                    let text_b = node_text(b, code);
                    if text_a != text_b {
                        diffs.insert((text_a.to_string(), text_b.to_string()));
                    }
                }
                _ => {}
            }
            true
        }

        /// Structural comparison of two statement lists.
        fn blocks_dup(
            a: &[Node<'_>],
            b: &[Node<'_>],
            code: &str,
            diffs: &mut HashSet<(String, String)>,
        ) -> bool {
            if a.len() != b.len() {
                return false;
            }
            for (stmt_a, stmt_b) in a.iter().zip(b.iter()) {
                if stmt_a.kind() != stmt_b.kind() {
                    return false;
                }
                let children_a = named_children(*stmt_a);
                let children_b = named_children(*stmt_b);
                if children_a.len() != children_b.len() {
                    return false;
                }
                if !update_diffs(*stmt_a, *stmt_b, code, diffs) || diffs.len() > MAX_BLOCK_DIFF {
                    return false;
                }
                if !blocks_dup(&children_a, &children_b, code, diffs) {
                    return false;
                }
            }
            true
        }

        let mut candidates: Vec<&OwnedBlock<'_>> = blocks
            .iter()
            .filter(|b| {
                !b.stmts.is_empty()
                    && lines_between(b.stmts[0], *b.stmts.last().unwrap_or(&b.stmts[0]), true)
                        >= MIN_BLOCK_LINES
            })
            .collect();
        if candidates.len() < 2 {
            return;
        }
        candidates.sort_by_key(|b| {
            (
                start_line(b.stmts[0]),
                b.stmts.last().map(|s| s.end_position().row).unwrap_or(0),
            )
        });

        let mut max_closed_line = 0;
        for i in 0..candidates.len() {
            for j in i + 1..candidates.len() {
                let block1 = candidates[i];
                let block2 = candidates[j];
                let last1 = *block1.stmts.last().unwrap_or(&block1.stmts[0]);

                if block1.owner != block2.owner
                    || last1.end_position().row + 1 <= max_closed_line
                {
                    continue;
                }

                let mut diffs = HashSet::new();
                if blocks_dup(&block1.stmts, &block2.stmts, code, &mut diffs) {
                    problems.push(ctx.problem_spanning(
                        "R6505",
                        block1.stmts[0],
                        last1,
                        format!(
                            "Duplicate blocks starting on lines {} and {}. Extract the code to a \
                             helper function.",
                            start_line(block1.stmts[0]),
                            start_line(block2.stmts[0])
                        ),
                    ));
                    max_closed_line = last1.end_position().row + 1;
                    break;
                }
            }
        }
    }

    /// `R6506`: consecutive near-identical sub-blocks replaceable by a loop.
    fn duplicate_sequence(
        &self,
        ctx: &CheckContext<'_>,
        blocks: &[OwnedBlock<'_>],
        problems: &mut Vec<Problem>,
    ) {
        let code = ctx.code();

        /// Result of a single-statement structural diff: at most one varying
        /// literal, located by its path of child indices.
        type SingleDiff = (Option<(String, String)>, Vec<usize>);

        /// Structural diff of two statements; `None` when they differ in
        /// anything but a single literal.
        fn single_diff(a: Node<'_>, b: Node<'_>, code: &str) -> Option<SingleDiff> {
            if a.kind() != b.kind() {
                return None;
            }
            let kind = a.kind();

            match kind {
                "integer" | "float" | "string" => {
                    let text_a = node_text(a, code);
                    let text_b = node_text(b, code);
                    if text_a == text_b {
                        return Some((None, vec![]));
                    }
                    return Some((Some((text_a.to_string(), text_b.to_string())), vec![]));
                }
                "identifier" => {
                    if node_text(a, code) != node_text(b, code) {
                        return None;
                    }
                    return Some((None, vec![]));
                }
                "binary_operator" | "boolean_operator" | "unary_operator"
                | "augmented_assignment" => {
                    let op_a = a.child_by_field_name("operator").map(|o| node_text(o, code));
                    let op_b = b.child_by_field_name("operator").map(|o| node_text(o, code));
                    if op_a != op_b {
                        return None;
                    }
                }
                "comparison_operator" => {
                    let ops = |node: Node<'_>| {
                        let mut cursor = node.walk();
                        node.children(&mut cursor)
                            .filter(|c| !c.is_named() && c.kind() != "line_continuation")
                            .map(|c| node_text(c, code).to_string())
                            .collect::<Vec<_>>()
                    };
                    if ops(a) != ops(b) {
                        return None;
                    }
                }
                "assert_statement" | "import_statement" | "import_from_statement"
                | "future_import_statement" => return None,
                "call" => {
                    let callee = a
                        .child_by_field_name("function")
                        .map(|f| expr_text(f, code))
                        .unwrap_or_default();
                    if callee == "print" {
                        return None;
                    }
                }
                _ => {}
            }

            if matches!(kind, "assignment" | "augmented_assignment") {
                let left_a = a.child_by_field_name("left").map(|l| norm_text(l, code));
                let left_b = b.child_by_field_name("left").map(|l| norm_text(l, code));
                if left_a != left_b {
                    return None;
                }
            }
            if is_block_comment(a) {
                return None;
            }

            single_diff_list(&named_children(a), &named_children(b), code)
        }

        /// Structural diff of two statement lists, allowing one varying
        /// literal across all of them.
        fn single_diff_list(
            a: &[Node<'_>],
            b: &[Node<'_>],
            code: &str,
        ) -> Option<SingleDiff> {
            if a.len() != b.len() {
                return None;
            }
            let mut result: Option<SingleDiff> = None;
            for (i, (stmt_a, stmt_b)) in a.iter().zip(b.iter()).enumerate() {
                let (diff, mut path) = single_diff(*stmt_a, *stmt_b, code)?;
                if let Some(pair) = diff {
                    if result.is_some() {
                        return None;
                    }
                    path.push(i);
                    result = Some((Some(pair), path));
                }
            }
            Some(result.unwrap_or((None, vec![])))
        }

        /// Whether the varying values form a usable `range`.
        fn can_use_range(diffs: &[Option<String>]) -> bool {
            if diffs.iter().all(Option::is_none) {
                return true;
            }
            let values: Option<Vec<i64>> = diffs
                .iter()
                .map(|d| d.as_ref().and_then(|v| v.parse::<i64>().ok()))
                .collect();
            let Some(values) = values else { return false };
            if values.len() < 2 {
                return false;
            }
            let step = values[1] - values[0];
            values.windows(2).all(|w| w[0] + step == w[1])
        }

        /// Collects the per-repetition varying values of consecutive
        /// sub-blocks of `sub_len` statements starting at `start`.
        fn seq_diffs(
            block: &[Node<'_>],
            sub_len: usize,
            start: usize,
            code: &str,
        ) -> Vec<Option<String>> {
            let mut path: Option<Vec<usize>> = None;
            let mut diffs: Vec<Option<String>> = Vec::new();
            let mut i = start;

            while i + 2 * sub_len <= block.len() {
                let sub1 = &block[i..i + sub_len];
                let sub2 = &block[i + sub_len..i + 2 * sub_len];

                let Some((diff, subpath)) = single_diff_list(sub1, sub2, code) else {
                    return diffs;
                };

                if let Some(prev) = &path {
                    if !prev.is_empty() && !subpath.is_empty() && *prev != subpath {
                        return diffs;
                    }
                    if prev.is_empty() && !subpath.is_empty() && diffs.len() >= DUPL_SEQ_LEN {
                        return diffs;
                    }
                }
                if path.is_none() || (path.as_ref().is_some_and(Vec::is_empty) && !subpath.is_empty())
                {
                    path = Some(subpath);
                }

                let second = diff.as_ref().map(|(_, b)| b.clone());
                if diffs.is_empty() {
                    diffs.push(diff.as_ref().map(|(a, _)| a.clone()));
                }
                diffs.push(second);

                i += sub_len;
            }
            diffs
        }

        for block in blocks {
            let stmts = &block.stmts;
            if stmts.len() < 2 {
                continue;
            }
            let max_sub_len = stmts.len() / DUPL_SEQ_LEN;
            if max_sub_len == 0 {
                continue;
            }

            let mut start = 0;
            'scan: while start + 1 < stmts.len() {
                for sub_len in 1..=max_sub_len {
                    let diffs = seq_diffs(stmts, sub_len, start, code);
                    let reps = diffs.len();
                    if (reps >= DUPL_SEQ_LEN && can_use_range(&diffs))
                        || reps >= DUPL_SEQ_LEN_NO_RANGE
                    {
                        let first_sub = &stmts[start..start + sub_len];
                        let last_sub = &stmts[start + (reps - 1) * sub_len..start + reps * sub_len];
                        problems.push(ctx.problem_spanning(
                            "R6506",
                            first_sub[0],
                            *last_sub.last().unwrap_or(&first_sub[0]),
                            format!(
                                "Duplicate sequence of {} repetitions of {} lines of code. Use a \
                                 loop to avoid this.",
                                reps,
                                lines_between(
                                    first_sub[0],
                                    *first_sub.last().unwrap_or(&first_sub[0]),
                                    true
                                )
                            ),
                        ));
                        start += reps * sub_len;
                        continue 'scan;
                    }
                }
                start += 1;
            }
        }
    }
}

impl Checker for NoDuplicateCode {
    fn name(&self) -> &'static str {
        "no-duplicate-code"
    }

    fn messages(&self) -> &'static [MessageSpec] {
        &MESSAGES
    }

    fn check(&self, ctx: &CheckContext<'_>) -> Result<Vec<Problem>> {
        let root = ctx.parser.root_node()?;
        let code = ctx.code();
        let mut problems = Vec::new();

        for node in ctx
            .parser
            .query_nodes(crate::python::queries::IF_STATEMENT_QUERY, "stmt")?
        {
            self.duplicate_if_branches(ctx, node, &mut problems);
        }

        let blocks = collect_blocks(root, code);
        self.duplicate_seq_ifs(ctx, &blocks, &mut problems);
        self.duplicate_exprs(ctx, root, &mut problems);
        self.duplicate_blocks(ctx, &blocks, &mut problems);
        self.duplicate_sequence(ctx, &blocks, &mut problems);

        Ok(problems)
    }
}
