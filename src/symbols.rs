//! The operator symbol table.
//!
//! Maps each operator's literal text to its token template. Built once
//! behind a `OnceLock` and read-only afterwards, so concurrent parses share
//! it without locking.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::ast::{Token, bp};
use crate::ops;

pub struct SymbolTable {
    entries: HashMap<&'static str, Token>,
}

impl SymbolTable {
    fn new() -> Self {
        SymbolTable {
            entries: HashMap::new(),
        }
    }

    fn register(&mut self, text: &'static str, token: Token) {
        self.entries.insert(text, token);
    }

    fn register_binary(&mut self, text: &'static str, lbp: u8, op: ops::BinaryFn) {
        self.register(text, Token::Binary { text, lbp, op });
    }

    /// Look up an operator by its exact text.
    pub fn lookup(&self, text: &str) -> Option<Token> {
        self.entries.get(text).cloned()
    }

    /// Regex alternation over all registered operators, longest first, so
    /// the tokenizer prefers `===` over `==` over `=`.
    pub fn operator_pattern(&self) -> String {
        let mut texts: Vec<&str> = self.entries.keys().copied().collect();
        texts.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        let escaped: Vec<String> = texts.iter().map(|t| regex::escape(t)).collect();
        escaped.join("|")
    }
}

/// The process-wide table, built on first use.
pub fn symbol_table() -> &'static SymbolTable {
    static TABLE: OnceLock<SymbolTable> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = SymbolTable::new();

        // Non-binding delimiters
        table.register(":", Token::Delimiter(":"));
        table.register(",", Token::Delimiter(","));
        table.register(")", Token::Delimiter(")"));
        table.register("]", Token::Delimiter("]"));

        // Ternary operator
        table.register("?", Token::Question);

        // Logical short-circuit operators
        table.register("&&", Token::AndAnd);
        table.register("||", Token::OrOr);

        // Equality and relational operators
        table.register_binary("===", bp::COMPARISON, ops::strict_equal);
        table.register_binary("!==", bp::COMPARISON, ops::strict_not_equal);
        table.register_binary("==", bp::COMPARISON, ops::loose_equal);
        table.register_binary("!=", bp::COMPARISON, ops::loose_not_equal);
        table.register_binary("<", bp::COMPARISON, ops::less_than);
        table.register_binary("<=", bp::COMPARISON, ops::less_equal);
        table.register_binary(">", bp::COMPARISON, ops::greater_than);
        table.register_binary(">=", bp::COMPARISON, ops::greater_equal);

        // Additive operators, which double as unary coercions
        table.register("+", Token::Plus);
        table.register("-", Token::Minus);

        // Multiplicative operators
        table.register_binary("*", bp::MULTIPLICATIVE, ops::mul);
        table.register_binary("/", bp::MULTIPLICATIVE, ops::div);

        // Unary negation
        table.register("!", Token::Bang);

        // Invocation/grouping and accessor/array brackets
        table.register("(", Token::LParen);
        table.register("[", Token::LBracket);

        table
    })
}
