//! Tests for the simplifiable-if checker family.

use edulint::{Problem, config::lint_config, lint_source};

fn lint_with(lines: &[&str], code: &str) -> Vec<Problem> {
    let source = format!("{}\n", lines.join("\n"));
    let config = lint_config().enable(vec![code.to_string()]).build();
    lint_source("student.py", source, &config).expect("lint should succeed")
}

fn lines_and_texts(problems: &[Problem]) -> Vec<(usize, String)> {
    problems
        .iter()
        .map(|p| (p.line(), p.text().to_string()))
        .collect()
}

fn assert_lint(lines: &[&str], code: &str, expected: &[(usize, &str)]) {
    let problems = lint_with(lines, code);
    let got = lines_and_texts(&problems);
    let want: Vec<(usize, String)> = expected
        .iter()
        .map(|(line, text)| (*line, text.to_string()))
        .collect();
    assert_eq!(got, want, "for source:\n{}", lines.join("\n"));
}

#[test]
fn if_return_of_bool_constants_with_else() {
    assert_lint(
        &[
            "def yyy(x):",
            "    if x:",
            "        return True",
            "    else:",
            "        return False",
        ],
        "R6201",
        &[(2, "The if statement can be replaced with 'return x'")],
    );
    assert_lint(
        &[
            "def xxx(x):",
            "    if x:",
            "        return False",
            "    else:",
            "        return True",
        ],
        "R6201",
        &[(2, "The if statement can be replaced with 'return <negated x>'")],
    );
}

#[test]
fn if_return_of_bool_constants_with_following_return() {
    assert_lint(
        &[
            "def xxx(x):",
            "    if x:",
            "        return True",
            "    return False",
        ],
        "R6201",
        &[(2, "The if statement can be replaced with 'return x'")],
    );
    assert_lint(
        &[
            "def xxx(x):",
            "    if x:",
            "        return False",
            "    return True",
        ],
        "R6201",
        &[(2, "The if statement can be replaced with 'return <negated x>'")],
    );
}

#[test]
fn if_return_with_same_constants_is_left_alone() {
    assert_lint(
        &[
            "def xxx(x):",
            "    if x:",
            "        return True",
            "    return True",
        ],
        "R6201",
        &[],
    );
}

#[test]
fn if_return_conjunctions_two_vars() {
    assert_lint(
        &["def xxx(x, y):", "    if x:", "        return True", "    return y"],
        "R6202",
        &[(2, "The if statement can be replaced with 'return x or y'")],
    );
    assert_lint(
        &["def xxx(x, y):", "    if x:", "        return False", "    return y"],
        "R6202",
        &[(2, "The if statement can be replaced with 'return <negated x> and y'")],
    );
    assert_lint(
        &["def xxx(x, y):", "    if x:", "        return y", "    return False"],
        "R6202",
        &[(2, "The if statement can be replaced with 'return x and y'")],
    );
    assert_lint(
        &["def xxx(x, y):", "    if x:", "        return y", "    return True"],
        "R6202",
        &[(2, "The if statement can be replaced with 'return <negated x> or y'")],
    );
    assert_lint(
        &[
            "def xxx(x, y):",
            "    if x:",
            "        return True",
            "    else:",
            "        return y",
        ],
        "R6202",
        &[(2, "The if statement can be replaced with 'return x or y'")],
    );
}

#[test]
fn if_return_conjunctions_parenthesize_mixed_operators() {
    assert_lint(
        &[
            "def xxx(x, y, z):",
            "    if x and z:",
            "        return y",
            "    return False",
        ],
        "R6202",
        &[(2, "The if statement can be replaced with 'return x and z and y'")],
    );
    assert_lint(
        &[
            "def xxx(x, y, z):",
            "    if x or z:",
            "        return y",
            "    return False",
        ],
        "R6202",
        &[(2, "The if statement can be replaced with 'return (x or z) and y'")],
    );
    assert_lint(
        &[
            "def xxx(x, y, z):",
            "    if x:",
            "        return y or z",
            "    return False",
        ],
        "R6202",
        &[(2, "The if statement can be replaced with 'return x and (y or z)'")],
    );
    assert_lint(
        &[
            "def xxx(x, y, z):",
            "    if x and z:",
            "        return True",
            "    return y",
        ],
        "R6202",
        &[(2, "The if statement can be replaced with 'return (x and z) or y'")],
    );
    assert_lint(
        &[
            "def xxx(x, y, z):",
            "    if x and z:",
            "        return False",
            "    return y",
        ],
        "R6202",
        &[(2, "The if statement can be replaced with 'return <negated (x and z)> and y'")],
    );
    assert_lint(
        &[
            "def xxx(x, y, z):",
            "    if x:",
            "        return False",
            "    return y or z",
        ],
        "R6202",
        &[(2, "The if statement can be replaced with 'return <negated x> and (y or z)'")],
    );
    assert_lint(
        &[
            "def xxx(x, y, z):",
            "    if x or z:",
            "        return True",
            "    else:",
            "        return y",
        ],
        "R6202",
        &[(2, "The if statement can be replaced with 'return x or z or y'")],
    );
}

#[test]
fn conditional_assignment_of_bool_constants() {
    assert_lint(
        &[
            "def is_right(a, b, c):",
            "    if c ** 2 == a ** 2 + b ** 2 or a ** 2 == c ** 2 + b ** 2 or \\",
            "       b ** 2 == a ** 2 + c ** 2:",
            "        triangle_is_righ = True",
            "    else:",
            "        triangle_is_righ = False",
            "    return triangle_is_righ",
        ],
        "R6203",
        &[(
            2,
            "The conditional assignment can be replaced with 'triangle_is_righ = c**2 == a**2 \
             + b**2 or a**2 == c**2 + b**2 or b**2 == a**2 + c**2'",
        )],
    );
}

#[test]
fn conditional_assignment_conjunctions() {
    assert_lint(
        &[
            "def xxx(x, y):",
            "    if x:",
            "        a = True",
            "    else:",
            "        a = y",
        ],
        "R6210",
        &[(2, "The conditional assignment can be replaced with 'a = x or y'")],
    );
    assert_lint(
        &[
            "def xxx(x, y):",
            "    if x:",
            "        a = False",
            "    else:",
            "        a = y",
        ],
        "R6210",
        &[(2, "The conditional assignment can be replaced with 'a = <negated x> and y'")],
    );
    assert_lint(
        &[
            "def xxx(x, y):",
            "    if x:",
            "        a = y",
            "    else:",
            "        a = False",
        ],
        "R6210",
        &[(2, "The conditional assignment can be replaced with 'a = x and y'")],
    );
    assert_lint(
        &[
            "def xxx(x, y):",
            "    if x:",
            "        a = y",
            "    else:",
            "        a = True",
        ],
        "R6210",
        &[(2, "The conditional assignment can be replaced with 'a = <negated x> or y'")],
    );
    assert_lint(
        &[
            "def xxx(x, y, z):",
            "    if x:",
            "        a = y and z",
            "    else:",
            "        a = True",
        ],
        "R6210",
        &[(
            2,
            "The conditional assignment can be replaced with 'a = <negated x> or (y and z)'",
        )],
    );
    assert_lint(
        &[
            "def xxx(x, y, z):",
            "    if x:",
            "        a = y or z",
            "    else:",
            "        a = True",
        ],
        "R6210",
        &[(
            2,
            "The conditional assignment can be replaced with 'a = <negated x> or y or z'",
        )],
    );
}

#[test]
fn conditional_assignment_to_different_targets_is_left_alone() {
    assert_lint(
        &[
            "def xxx(x, y):",
            "    if x:",
            "        a = True",
            "    else:",
            "        b = False",
        ],
        "R6203",
        &[],
    );
}

#[test]
fn if_expression_of_bool_constants() {
    assert_lint(
        &[
            "report = []",
            "which = 0",
            "report[which] = True if report[which] > \\",
            "    report[which] else False",
        ],
        "R6204",
        &[(3, "The if expression can be replaced with 'report[which] > report[which]'")],
    );
    assert_lint(
        &[
            "report = []",
            "which = 0",
            "report[which], x = True if report[which] > report[which] else False, 0",
        ],
        "R6204",
        &[(3, "The if expression can be replaced with 'report[which] > report[which]'")],
    );
    assert_lint(
        &[
            "report = []",
            "which = 0",
            "report[which], x = True if report[which] > report[which] else False, \\",
            "    False if report[which] <= report[which] else True",
        ],
        "R6204",
        &[
            (3, "The if expression can be replaced with 'report[which] > report[which]'"),
            (
                4,
                "The if expression can be replaced with '<negated report[which] <= \
                 report[which]>'",
            ),
        ],
    );
}

#[test]
fn if_expression_conjunctions() {
    assert_lint(
        &["def xxx(x, y):", "    r = True if x else y"],
        "R6209",
        &[(2, "The if expression can be replaced with 'x or y'")],
    );
    assert_lint(
        &["def xxx(x, y):", "    r = False if x else y"],
        "R6209",
        &[(2, "The if expression can be replaced with '<negated x> and y'")],
    );
    assert_lint(
        &["def xxx(x, y):", "    r = y if x else False"],
        "R6209",
        &[(2, "The if expression can be replaced with 'x and y'")],
    );
    assert_lint(
        &["def xxx(x, y):", "    r = y if x else True"],
        "R6209",
        &[(2, "The if expression can be replaced with '<negated x> or y'")],
    );
}

#[test]
fn if_with_pass_body() {
    assert_lint(
        &[
            "def xxx(x, y):",
            "    if x:",
            "        pass",
            "    else:",
            "        return y",
        ],
        "R6205",
        &[(2, "Use 'if <negated x>: <else body>' instead of 'pass'")],
    );
}

#[test]
fn one_branch_returns_implicit_none() {
    assert_lint(
        &[
            "def xxx(x):",
            "    if x:",
            "        return 0",
            "    else:",
            "        return",
        ],
        "R6206",
        &[(
            2,
            "Both branches should return a value explicitly (one returns implicit None)",
        )],
    );
    assert_lint(
        &["def xxx(x):", "    if x:", "        return", "    return 1"],
        "R6206",
        &[(
            2,
            "Both branches should return a value explicitly (one returns implicit None)",
        )],
    );
}

#[test]
fn nested_if_can_be_merged() {
    assert_lint(
        &[
            "def xxx(x, y):",
            "    if x:",
            "        if y:",
            "            return 0",
            "    return 1",
        ],
        "R6207",
        &[(2, "The if statement can be merged with the nested one to 'if x and y:'")],
    );
}

#[test]
fn following_if_with_same_body_can_be_merged() {
    assert_lint(
        &[
            "def xxx(x, y):",
            "    if x:",
            "        return 0",
            "    if y:",
            "        return 0",
            "    return 1",
        ],
        "R6208",
        &[(2, "The if statement can be merged with the following one to 'if x or y:'")],
    );
    assert_lint(
        &[
            "def xxx(x, y):",
            "    if x:",
            "        return True",
            "    if y:",
            "        return False",
            "    return True",
        ],
        "R6208",
        &[],
    );
    assert_lint(
        &[
            "def xxx(x, y, z):",
            "    if x and y:",
            "        return True",
            "        return True",
            "    if z:",
            "        return True",
            "    return True",
        ],
        "R6208",
        &[],
    );
}

#[test]
fn elif_chains_are_left_alone() {
    assert_lint(
        &[
            "def xxx(x, y):",
            "    if x:",
            "        return True",
            "    elif y:",
            "        return False",
            "    else:",
            "        return True",
        ],
        "R6201",
        &[],
    );
}
