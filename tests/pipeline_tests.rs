//! Tests for the lint pipeline: filtering, ordering, translations, and the
//! message registry behind `edulint explain`.

use edulint::{
    Problem,
    config::{Config, lint_config, translations::Translator},
    lint_source,
    linting::checkers::{all_messages, find_message},
};
use serde_json::json;

const SOURCE: &str = r#"def decide(x, y):
    if x:
        return True
    return False

def pick(x, y):
    r = True if x else y
    return r
"#;

#[test]
fn problems_come_back_sorted_by_line_and_column() {
    let problems = lint_source("student.py", SOURCE.to_string(), &Config::default())
        .expect("lint should succeed");

    let positions: Vec<(usize, usize)> = problems.iter().map(|p| (p.line(), p.column())).collect();
    let mut sorted = positions.clone();
    sorted.sort();
    assert_eq!(positions, sorted);
    assert!(problems.iter().any(|p| p.code() == "R6201"));
    assert!(problems.iter().any(|p| p.code() == "R6209"));
}

#[test]
fn enable_set_filters_native_problems() {
    let config = lint_config().enable(vec!["R6209".to_string()]).build();
    let problems =
        lint_source("student.py", SOURCE.to_string(), &config).expect("lint should succeed");

    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].code(), "R6209");
    assert_eq!(problems[0].line(), 7);
}

#[test]
fn disable_set_suppresses_by_symbol() {
    let config = lint_config()
        .disable(vec!["simplifiable-if-return".to_string()])
        .build();
    let problems =
        lint_source("student.py", SOURCE.to_string(), &config).expect("lint should succeed");

    assert!(problems.iter().all(|p| p.code() != "R6201"));
    assert!(problems.iter().any(|p| p.code() == "R6209"));
}

#[test]
fn translations_apply_at_the_end_of_the_pipeline() {
    let translator = Translator::from_value(json!({
        "R6201": "Příkaz if lze nahradit '{}'"
    }));
    let config = lint_config()
        .enable(vec!["R6201".to_string()])
        .translations(translator)
        .build();
    let problems =
        lint_source("student.py", SOURCE.to_string(), &config).expect("lint should succeed");

    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].text(), "Příkaz if lze nahradit 'return x'");
}

#[test]
fn problem_paths_carry_the_label() {
    let problems = lint_source("exercises/e1.py", SOURCE.to_string(), &Config::default())
        .expect("lint should succeed");
    assert!(problems.iter().all(|p| p.path() == "exercises/e1.py"));
}

#[test]
fn message_registry_has_unique_codes() {
    let messages = all_messages();
    let mut codes: Vec<&str> = messages.iter().map(|m| m.code).collect();
    codes.sort();
    let before = codes.len();
    codes.dedup();
    assert_eq!(codes.len(), before);
}

#[test]
fn messages_resolve_by_code_and_symbol() {
    let by_code = find_message("R6502").expect("known code");
    assert_eq!(by_code.symbol, "duplicate-if-branches");

    let by_symbol = find_message("duplicate-sequence").expect("known symbol");
    assert_eq!(by_symbol.code, "R6506");

    assert!(find_message("E9999").is_none());
}

#[test]
fn problems_serialize_with_lowercase_linter_names() {
    let problems = lint_source(
        "student.py",
        SOURCE.to_string(),
        &lint_config().enable(vec!["R6201".to_string()]).build(),
    )
    .expect("lint should succeed");

    let value = serde_json::to_value(&problems).expect("serialize");
    assert_eq!(value[0]["source"], "edulint");

    let round_tripped: Vec<Problem> = serde_json::from_value(value).expect("deserialize");
    assert_eq!(round_tripped, problems);
}
