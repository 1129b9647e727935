// tests/parser_tests.rs

use verdict_lang::ast::Node;
use verdict_lang::parser::ParseError;
use verdict_lang::{Context, parse};

fn parse_err(text: &str) -> ParseError {
    match parse(text, Context::new()) {
        Err(ParseError::InExpression { text: seen, cause }) => {
            assert_eq!(seen, text, "wrapper must carry the full source text");
            *cause
        }
        Err(other) => panic!("parse error was not wrapped: {:?}", other),
        Ok(_) => panic!("expected {:?} to fail", text),
    }
}

// ============================================================================
// Well-formed input
// ============================================================================

#[test]
fn test_single_literal() {
    assert!(parse("42", Context::new()).is_ok());
    assert!(parse("'text'", Context::new()).is_ok());
}

#[test]
fn test_every_operator_parses() {
    for text in [
        "a + b - c",
        "a * b / c",
        "a < b && c >= d",
        "a == b || a != c",
        "a === b && a !== c",
        "cond ? x : y",
        "!flag",
        "-n + +m",
        "f(a, b)(c)",
        "xs[0][1]",
        "[1, 'two', [3]]",
        "(a + b) * c",
    ] {
        assert!(parse(text, Context::new()).is_ok(), "failed on {:?}", text);
    }
}

#[test]
fn test_trailing_comma_in_array_literal() {
    assert!(parse("[1, 2,]", Context::new()).is_ok());
    assert!(parse("[]", Context::new()).is_ok());
}

#[test]
fn test_empty_argument_list() {
    assert!(parse("f()", Context::new()).is_ok());
}

#[test]
fn test_parsed_expression_keeps_text() {
    let parsed = parse("1 + 2", Context::new()).unwrap();
    assert_eq!(parsed.text(), "1 + 2");
}

// ============================================================================
// Malformed input
// ============================================================================

#[test]
fn test_unbalanced_paren() {
    assert_eq!(
        parse_err("(1 + 2"),
        ParseError::Expected {
            expected: ")",
            found: "(end)".to_string()
        }
    );
}

#[test]
fn test_unbalanced_bracket() {
    assert_eq!(
        parse_err("[1, 2"),
        ParseError::Expected {
            expected: "]",
            found: "(end)".to_string()
        }
    );
}

#[test]
fn test_index_requires_closing_bracket() {
    assert_eq!(
        parse_err("xs[0)"),
        ParseError::Expected {
            expected: "]",
            found: ")".to_string()
        }
    );
}

#[test]
fn test_ternary_requires_colon() {
    assert_eq!(
        parse_err("a ? 1, 2"),
        ParseError::Expected {
            expected: ":",
            found: ",".to_string()
        }
    );
}

#[test]
fn test_unrecognized_character() {
    assert!(matches!(
        parse_err("1 @ 2"),
        ParseError::UnmatchedInput { .. }
    ));
}

#[test]
fn test_operator_in_prefix_position() {
    assert_eq!(
        parse_err("* 2"),
        ParseError::InvalidPrefix {
            token: "*".to_string()
        }
    );
    assert_eq!(
        parse_err("1 + / 2"),
        ParseError::InvalidPrefix {
            token: "/".to_string()
        }
    );
}

#[test]
fn test_trailing_input_rejected() {
    assert_eq!(
        parse_err("1 2"),
        ParseError::Expected {
            expected: "(end)",
            found: "2".to_string()
        }
    );
}

#[test]
fn test_empty_expression() {
    assert_eq!(
        parse_err(""),
        ParseError::InvalidPrefix {
            token: "(end)".to_string()
        }
    );
}

#[test]
fn test_error_message_names_the_expression() {
    let err = parse("(1 + 2", Context::new()).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("(1 + 2"), "message was {:?}", message);
    assert!(message.contains("expected )"), "message was {:?}", message);
}

// ============================================================================
// Tree shape
// ============================================================================

#[test]
fn test_precedence_shapes_the_tree() {
    // 1 + 2 * 3 must parse as 1 + (2 * 3)
    let parsed = parse("1 + 2 * 3", Context::new()).unwrap();
    match parsed.node() {
        Node::Binary { left, right, .. } => {
            assert!(matches!(**left, Node::Literal(_)));
            assert!(matches!(**right, Node::Binary { .. }));
        }
        other => panic!("expected binary root, got {:?}", other),
    }
}

#[test]
fn test_unary_minus_becomes_coercion() {
    let parsed = parse("-x", Context::new()).unwrap();
    match parsed.node() {
        Node::CoerceNumber { multiplier, .. } => assert_eq!(*multiplier, -1),
        other => panic!("expected coercion node, got {:?}", other),
    }
}

#[test]
fn test_and_is_right_associative() {
    // a && b && c must parse as a && (b && c)
    let parsed = parse("a && b && c", Context::new()).unwrap();
    match parsed.node() {
        Node::And { left, right } => {
            assert!(matches!(**left, Node::Variable(_)));
            assert!(matches!(**right, Node::And { .. }));
        }
        other => panic!("expected and root, got {:?}", other),
    }
}

#[test]
fn test_subtraction_is_left_associative() {
    // a - b - c must parse as (a - b) - c
    let parsed = parse("a - b - c", Context::new()).unwrap();
    match parsed.node() {
        Node::Binary { left, right, .. } => {
            assert!(matches!(**left, Node::Binary { .. }));
            assert!(matches!(**right, Node::Variable(_)));
        }
        other => panic!("expected binary root, got {:?}", other),
    }
}
