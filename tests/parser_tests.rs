//! Tests for the Python parser wrapper.

use edulint::python::{Parser, queries::FUNCTION_DEF_QUERY};

fn parse(code: &str) -> Parser {
    Parser::new(code.to_string()).expect("parse")
}

#[test]
fn parser_creates_successfully() {
    let code = r#"
def hello():
    print("Hello, World!")
"#;
    let parser = Parser::new(code.to_string());
    assert!(parser.is_ok());
}

#[test]
fn empty_source_parses_to_an_empty_module() {
    let parser = parse("");
    let root = parser.root_node().expect("root");
    assert_eq!(root.kind(), "module");
    assert_eq!(root.named_child_count(), 0);
}

#[test]
fn parser_extracts_functions() {
    let parser = parse(
        r#"
def add(a, b):
    return a + b

def sub(a, b):
    return a - b
"#,
    );
    let matches = parser.query(FUNCTION_DEF_QUERY).expect("run query");
    let names: Vec<_> = matches.iter().filter_map(|m| m.get("name")).collect();

    assert_eq!(names.len(), 2);
    assert!(names.iter().any(|n| *n == "add"));
    assert!(names.iter().any(|n| *n == "sub"));
}

#[test]
fn capture_positions_are_one_based() {
    let parser = parse("x = 1\n\ndef f():\n    return x\n");
    let positions = parser
        .query_capture_positions(FUNCTION_DEF_QUERY, "name")
        .expect("run query");

    assert_eq!(positions, vec![("f".to_string(), 3)]);
}

#[test]
fn query_nodes_come_back_in_source_order() {
    let parser = parse(
        r#"
if a:
    pass
if b:
    pass
"#,
    );
    let nodes = parser
        .query_nodes("(if_statement) @stmt", "stmt")
        .expect("run query");

    assert_eq!(nodes.len(), 2);
    assert!(nodes[0].start_position().row < nodes[1].start_position().row);
}

#[test]
fn malformed_source_still_parses() {
    // tree-sitter produces a tree with error nodes instead of failing
    let parser = Parser::new("def broken(:\n    pass\n".to_string());
    assert!(parser.is_ok());
}

#[test]
fn line_count_counts_lines() {
    let parser = parse("a = 1\nb = 2\nc = 3\n");
    assert_eq!(parser.line_count(), 3);
}
