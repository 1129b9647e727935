//! The tokenizer.
//!
//! A lazy, single-pass scan over the expression text driven by one master
//! regular expression: identifier names, string/number literals, whitespace,
//! and the operator alternation taken from the symbol table (sorted longest
//! first, so `===` wins over `==`). Input that matches none of the patterns
//! is a tokenization error naming the unmatched remainder.

use std::sync::OnceLock;

use regex::Regex;

use crate::ast::Token;
use crate::parser::ParseError;
use crate::symbols::symbol_table;

fn master_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        let operators = symbol_table().operator_pattern();
        let pattern = format!(
            concat!(
                r#"^(?:(?P<name>[A-Za-z_$][A-Za-z0-9_$]*)"#,
                r#"|(?P<literal>"(?:\\.|[^"])*"|'(?:\\.|[^'])*'|[0-9]+\.[0-9]+|[0-9]+)"#,
                r#"|(?P<ws>\s+)"#,
                r#"|(?P<operator>{}))"#
            ),
            operators
        );
        Regex::new(&pattern).expect("token pattern is valid")
    })
}

pub struct Lexer<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str) -> Self {
        Lexer { text, pos: 0 }
    }

    /// Produce the next token. After the input is exhausted this keeps
    /// returning `Token::Eof`.
    pub fn next_token(&mut self) -> Result<Token, ParseError> {
        loop {
            let rest = &self.text[self.pos..];
            if rest.is_empty() {
                return Ok(Token::Eof);
            }
            let Some(caps) = master_pattern().captures(rest) else {
                return Err(ParseError::UnmatchedInput {
                    remainder: rest.to_string(),
                });
            };
            let matched = caps.get(0).expect("whole-pattern group always present");
            self.pos += matched.end();

            if caps.name("ws").is_some() {
                continue;
            }
            if let Some(name) = caps.name("name") {
                return Ok(Token::Name(name.as_str().to_string()));
            }
            if let Some(literal) = caps.name("literal") {
                return Ok(Token::Literal(literal.as_str().to_string()));
            }
            let operator = caps.name("operator").expect("one group must have matched");
            return Ok(symbol_table()
                .lookup(operator.as_str())
                .expect("operator text came from the table"));
        }
    }
}
