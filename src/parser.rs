//! The precedence-climbing (Pratt) parser.
//!
//! `expression(rbp)` consumes one token in prefix position, then keeps
//! consuming infix continuations while the upcoming token binds tighter
//! than `rbp`. Prefix and infix behavior per token kind is an exhaustive
//! match; delimiters and end-of-input have binding power zero and simply
//! terminate the loop.

use std::error::Error;
use std::fmt;
use std::mem;

use crate::ast::{Node, Token, bp};
use crate::evaluator::ParsedExpression;
use crate::lexer::Lexer;
use crate::ops;
use crate::value::Context;

/// A parse failure. Surfaces before any tree exists; no partially built
/// expression is ever returned.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The tokenizer found input matching no pattern
    UnmatchedInput { remainder: String },

    /// A token that cannot begin an expression appeared in prefix position
    InvalidPrefix { token: String },

    /// A token that cannot continue an expression appeared in infix position
    InvalidInfix { token: String },

    /// A required token was missing
    Expected {
        expected: &'static str,
        found: String,
    },

    /// Top-level wrapper carrying the full expression text
    InExpression {
        text: String,
        cause: Box<ParseError>,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnmatchedInput { remainder } => {
                write!(f, "cannot tokenize remaining input: {}", remainder)
            }
            ParseError::InvalidPrefix { token } => {
                write!(f, "token {} cannot begin an expression", token)
            }
            ParseError::InvalidInfix { token } => {
                write!(f, "token {} cannot continue an expression", token)
            }
            ParseError::Expected { expected, found } => {
                write!(f, "expected {}, found {}", expected, found)
            }
            ParseError::InExpression { text, cause } => {
                write!(f, "error parsing {}: {}", text, cause)
            }
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseError::InExpression { cause, .. } => Some(cause),
            _ => None,
        }
    }
}

/// Parse an expression into a reusable, repeatedly evaluable tree.
///
/// `global_context` is captured by the tree and overlaid on every
/// per-evaluation context, globals winning over same-named entries. Any
/// failure comes back annotated with the full expression text.
pub fn parse(expression: &str, global_context: Context) -> Result<ParsedExpression, ParseError> {
    match parse_tree(expression) {
        Ok(node) => Ok(ParsedExpression::new(
            expression.to_string(),
            global_context,
            node,
        )),
        Err(cause) => Err(ParseError::InExpression {
            text: expression.to_string(),
            cause: Box::new(cause),
        }),
    }
}

fn parse_tree(expression: &str) -> Result<Node, ParseError> {
    let mut parser = Parser::new(expression)?;
    let node = parser.expression(bp::NONE)?;
    parser.expect_end()?;
    Ok(node)
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    pub fn new(text: &'a str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(text);
        let current = lexer.next_token()?;
        Ok(Parser { lexer, current })
    }

    /// Take the current token, pulling the next one from the lexer.
    fn advance(&mut self) -> Result<Token, ParseError> {
        let next = self.lexer.next_token()?;
        Ok(mem::replace(&mut self.current, next))
    }

    /// Consume the current token, failing unless its text matches.
    fn expect(&mut self, expected: &'static str) -> Result<(), ParseError> {
        let token = self.advance()?;
        if token.text() != expected {
            return Err(ParseError::Expected {
                expected,
                found: token.text().to_string(),
            });
        }
        Ok(())
    }

    fn expect_end(&mut self) -> Result<(), ParseError> {
        match self.current {
            Token::Eof => Ok(()),
            ref other => Err(ParseError::Expected {
                expected: "(end)",
                found: other.text().to_string(),
            }),
        }
    }

    fn current_is(&self, text: &str) -> bool {
        self.current.text() == text
    }

    /// The core recursion: one prefix operand, then infix continuations
    /// while the next token binds tighter than `rbp`.
    pub fn expression(&mut self, rbp: u8) -> Result<Node, ParseError> {
        let token = self.advance()?;
        let mut left = self.prefix(token)?;
        while rbp < self.current.lbp() {
            let token = self.advance()?;
            left = self.infix(token, left)?;
        }
        Ok(left)
    }

    /// Prefix (nud) behavior.
    fn prefix(&mut self, token: Token) -> Result<Node, ParseError> {
        match token {
            Token::Literal(text) => Ok(Node::Literal(text)),
            Token::Name(name) => Ok(Node::Variable(name)),
            Token::Plus => Ok(Node::CoerceNumber {
                operand: Box::new(self.expression(bp::UNARY)?),
                multiplier: 1,
            }),
            Token::Minus => Ok(Node::CoerceNumber {
                operand: Box::new(self.expression(bp::UNARY)?),
                multiplier: -1,
            }),
            Token::Bang => Ok(Node::Negate(Box::new(self.expression(bp::UNARY)?))),
            Token::LParen => {
                // Grouping
                let inner = self.expression(bp::NONE)?;
                self.expect(")")?;
                Ok(inner)
            }
            Token::LBracket => {
                // Array literal; a trailing comma before ] is legal
                let mut members = vec![];
                if !self.current_is("]") {
                    loop {
                        members.push(self.expression(bp::NONE)?);
                        if !self.current_is(",") {
                            break;
                        }
                        self.expect(",")?;
                        if self.current_is("]") {
                            break;
                        }
                    }
                }
                self.expect("]")?;
                Ok(Node::Array(members))
            }
            other => Err(ParseError::InvalidPrefix {
                token: other.text().to_string(),
            }),
        }
    }

    /// Infix (led) behavior against the already-parsed left operand.
    fn infix(&mut self, token: Token, left: Node) -> Result<Node, ParseError> {
        match token {
            Token::Question => {
                let truthy = self.expression(bp::NONE)?;
                self.expect(":")?;
                let falsy = self.expression(bp::NONE)?;
                Ok(Node::Ternary {
                    condition: Box::new(left),
                    truthy: Box::new(truthy),
                    falsy: Box::new(falsy),
                })
            }
            // && and || are right-associative: recurse at lbp - 1
            Token::AndAnd => Ok(Node::And {
                left: Box::new(left),
                right: Box::new(self.expression(bp::LOGICAL - 1)?),
            }),
            Token::OrOr => Ok(Node::Or {
                left: Box::new(left),
                right: Box::new(self.expression(bp::LOGICAL - 1)?),
            }),
            Token::Binary { lbp, op, .. } => Ok(Node::Binary {
                op,
                left: Box::new(left),
                right: Box::new(self.expression(lbp)?),
            }),
            Token::Plus => Ok(Node::Binary {
                op: ops::add,
                left: Box::new(left),
                right: Box::new(self.expression(bp::ADDITIVE)?),
            }),
            Token::Minus => Ok(Node::Binary {
                op: ops::sub,
                left: Box::new(left),
                right: Box::new(self.expression(bp::ADDITIVE)?),
            }),
            Token::LParen => {
                // Invocation
                let mut args = vec![];
                if !self.current_is(")") {
                    loop {
                        args.push(self.expression(bp::NONE)?);
                        if !self.current_is(",") {
                            break;
                        }
                        self.expect(",")?;
                    }
                }
                self.expect(")")?;
                Ok(Node::Call {
                    callee: Box::new(left),
                    args,
                })
            }
            Token::LBracket => {
                // Computed accessor
                let key = self.expression(bp::NONE)?;
                self.expect("]")?;
                Ok(Node::Index {
                    object: Box::new(left),
                    key: Box::new(key),
                })
            }
            other => Err(ParseError::InvalidInfix {
                token: other.text().to_string(),
            }),
        }
    }
}
