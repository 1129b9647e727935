//! An embeddable, sandboxed expression language for rule evaluation.
//!
//! Expressions use a small JavaScript-like syntax — arithmetic, comparisons,
//! logical operators, the ternary, array literals, computed accessors and
//! calls into host-supplied functions — and evaluate against a caller-owned
//! variable context. There is no assignment, no loop and no way to reach
//! host code the context does not expose, which makes the language suitable
//! for feature-flag conditions and validation rules.
//!
//! Parsing and evaluation are separate steps: a parsed expression is
//! immutable and can be evaluated any number of times, concurrently,
//! against different contexts.
//!
//! ```
//! use verdict_lang::{parse, Context, Value};
//!
//! let rule = parse("var == 4", Context::new()).unwrap();
//!
//! let mut ctx = Context::new();
//! ctx.insert("var".to_string(), Value::Integer(4));
//! assert_eq!(rule.evaluate(&ctx).unwrap(), Value::Boolean(true));
//!
//! ctx.insert("var".to_string(), Value::Integer(5));
//! assert_eq!(rule.evaluate(&ctx).unwrap(), Value::Boolean(false));
//! ```
//!
//! Both parsing and evaluation recurse over the expression structure, so
//! nesting depth is bounded by the call stack; hosts accepting untrusted
//! input should bound expression size themselves.

pub mod ast;
pub mod convert;
pub mod evaluator;
pub mod lexer;
pub mod ops;
pub mod parser;
pub mod symbols;
pub mod value;

pub use convert::{context_from_json, from_json, to_json};
pub use evaluator::{EvalError, EvaluationError, ParsedExpression};
pub use lexer::Lexer;
pub use parser::{ParseError, Parser, parse};
pub use value::{Context, NativeFunction, Value};
