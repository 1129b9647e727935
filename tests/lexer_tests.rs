// tests/lexer_tests.rs

use verdict_lang::Lexer;
use verdict_lang::ast::Token;
use verdict_lang::parser::ParseError;

fn all_tokens(text: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(text);
    let mut tokens = vec![];
    loop {
        let token = lexer.next_token().unwrap();
        if token == Token::Eof {
            return tokens;
        }
        tokens.push(token);
    }
}

fn token_texts(text: &str) -> Vec<String> {
    all_tokens(text).iter().map(|t| t.text().to_string()).collect()
}

// ============================================================================
// Names and literals
// ============================================================================

#[test]
fn test_identifier_characters() {
    assert_eq!(
        all_tokens("foo _bar $baz q1_$"),
        vec![
            Token::Name("foo".to_string()),
            Token::Name("_bar".to_string()),
            Token::Name("$baz".to_string()),
            Token::Name("q1_$".to_string()),
        ]
    );
}

#[test]
fn test_number_literals_keep_source_text() {
    assert_eq!(
        all_tokens("42 3.14"),
        vec![
            Token::Literal("42".to_string()),
            Token::Literal("3.14".to_string()),
        ]
    );
}

#[test]
fn test_string_literals_both_quote_styles() {
    assert_eq!(
        all_tokens(r#""double" 'single'"#),
        vec![
            Token::Literal(r#""double""#.to_string()),
            Token::Literal("'single'".to_string()),
        ]
    );
}

#[test]
fn test_escaped_quote_stays_inside_literal() {
    assert_eq!(
        all_tokens(r#""a\"b""#),
        vec![Token::Literal(r#""a\"b""#.to_string())]
    );
}

// ============================================================================
// Operators
// ============================================================================

#[test]
fn test_longest_operator_match() {
    assert_eq!(token_texts("a === b"), vec!["a", "===", "b"]);
    assert_eq!(token_texts("a == b"), vec!["a", "==", "b"]);
    assert_eq!(token_texts("a !== b != c"), vec!["a", "!==", "b", "!=", "c"]);
    assert_eq!(token_texts("a <= b < c"), vec!["a", "<=", "b", "<", "c"]);
}

#[test]
fn test_bang_vs_not_equal() {
    assert_eq!(token_texts("!a != b"), vec!["!", "a", "!=", "b"]);
}

#[test]
fn test_all_punctuation() {
    assert_eq!(
        token_texts("? : , ( ) [ ] && || + - * / !"),
        vec!["?", ":", ",", "(", ")", "[", "]", "&&", "||", "+", "-", "*", "/", "!"]
    );
}

// ============================================================================
// Whitespace and failure
// ============================================================================

#[test]
fn test_whitespace_is_skipped() {
    assert_eq!(token_texts("  1\t+\n2  "), vec!["1", "+", "2"]);
}

#[test]
fn test_eof_is_sticky() {
    let mut lexer = Lexer::new("x");
    assert_eq!(lexer.next_token().unwrap(), Token::Name("x".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}

#[test]
fn test_unrecognized_input_reports_remainder() {
    let mut lexer = Lexer::new("1 @ 2");
    assert_eq!(lexer.next_token().unwrap(), Token::Literal("1".to_string()));
    match lexer.next_token() {
        Err(ParseError::UnmatchedInput { remainder }) => assert_eq!(remainder, "@ 2"),
        other => panic!("expected UnmatchedInput, got {:?}", other),
    }
}

#[test]
fn test_single_equals_is_not_an_operator() {
    let mut lexer = Lexer::new("a = b");
    assert_eq!(lexer.next_token().unwrap(), Token::Name("a".to_string()));
    assert!(matches!(
        lexer.next_token(),
        Err(ParseError::UnmatchedInput { .. })
    ));
}
