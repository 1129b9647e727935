//! Tree evaluation.
//!
//! Every node evaluates to a value against a merged, read-only context.
//! Inner failures are `EvalError`s; the root wrapper catches them once and
//! re-raises a single `EvaluationError` annotated with the expression text
//! and the caller's original context.

use std::error::Error;
use std::fmt;

use crate::ast::Node;
use crate::ops;
use crate::value::{Context, Value};

/// An inner evaluation failure. Host-supplied functions return these too.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// A variable name with no binding in the merged context
    UndefinedVariable(String),

    /// Invalid operand kinds for an operator
    TypeError(String),

    /// Missing key or out-of-bounds index
    AccessError(String),

    /// A kind that cannot be converted to a number (dates, notably)
    UnsupportedCoercion(String),

    /// Literal text outside the string/integer/float grammar
    InvalidLiteral(String),

    /// Invoking a value that is not a function
    NotCallable(&'static str),

    /// Division with a zero divisor
    DivisionByZero,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::UndefinedVariable(name) => write!(f, "undefined variable: {}", name),
            EvalError::TypeError(msg) => write!(f, "type error: {}", msg),
            EvalError::AccessError(msg) => write!(f, "access error: {}", msg),
            EvalError::UnsupportedCoercion(msg) => write!(f, "unsupported coercion: {}", msg),
            EvalError::InvalidLiteral(text) => write!(f, "invalid literal: {}", text),
            EvalError::NotCallable(kind) => write!(f, "cannot call a value of type {}", kind),
            EvalError::DivisionByZero => write!(f, "division by zero"),
        }
    }
}

impl Error for EvalError {}

/// The single error kind raised by [`ParsedExpression::evaluate`]: the
/// underlying cause plus the expression text and a snapshot of the caller's
/// context as it was passed in (before merging).
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationError {
    pub expression: String,
    pub context: String,
    pub cause: EvalError,
}

impl fmt::Display for EvaluationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error evaluating expression {} with context {}: {}",
            self.expression, self.context, self.cause
        )
    }
}

impl Error for EvaluationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.cause)
    }
}

/// A parsed expression: the root of the tree plus the source text and the
/// global context captured at parse time.
///
/// Immutable; evaluating never changes the tree or any context, so one
/// parsed expression may be evaluated concurrently against any number of
/// different contexts.
#[derive(Debug, Clone)]
pub struct ParsedExpression {
    text: String,
    global: Context,
    node: Node,
}

impl ParsedExpression {
    pub(crate) fn new(text: String, global: Context, node: Node) -> Self {
        ParsedExpression { text, global, node }
    }

    /// The original expression text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The root of the syntax tree.
    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Evaluate against a per-call context.
    ///
    /// The merged view is: the caller's context, overlaid by the global
    /// context (globals win), overlaid by the reserved bindings `true`,
    /// `false` and `null`, which always win.
    pub fn evaluate(&self, context: &Context) -> Result<Value, EvaluationError> {
        let mut merged = context.clone();
        merged.extend(self.global.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged.insert("true".to_string(), Value::Boolean(true));
        merged.insert("false".to_string(), Value::Boolean(false));
        merged.insert("null".to_string(), Value::Null);

        eval(&self.node, &merged).map_err(|cause| EvaluationError {
            expression: self.text.clone(),
            context: format!("{:?}", context),
            cause,
        })
    }
}

fn eval(node: &Node, context: &Context) -> Result<Value, EvalError> {
    match node {
        // Literal text is re-parsed on each evaluation, with the
        // literal-only grammar
        Node::Literal(text) => ops::literal_value(text),
        Node::Variable(name) => context
            .get(name)
            .cloned()
            .ok_or_else(|| EvalError::UndefinedVariable(name.clone())),
        Node::Binary { op, left, right } => {
            let left = eval(left, context)?;
            let right = eval(right, context)?;
            op(&left, &right)
        }
        Node::And { left, right } => {
            let left = eval(left, context)?;
            if !left.is_truthy() {
                Ok(left)
            } else {
                eval(right, context)
            }
        }
        Node::Or { left, right } => {
            let left = eval(left, context)?;
            if left.is_truthy() {
                Ok(left)
            } else {
                eval(right, context)
            }
        }
        Node::Ternary {
            condition,
            truthy,
            falsy,
        } => {
            if eval(condition, context)?.is_truthy() {
                eval(truthy, context)
            } else {
                eval(falsy, context)
            }
        }
        Node::CoerceNumber {
            operand,
            multiplier,
        } => coerce_number(eval(operand, context)?, *multiplier),
        Node::Negate(operand) => Ok(Value::Boolean(!eval(operand, context)?.is_truthy())),
        Node::Call { callee, args } => {
            let callee = eval(callee, context)?;
            let mut values = Vec::with_capacity(args.len());
            for arg in args {
                values.push(eval(arg, context)?);
            }
            match callee {
                Value::Function(f) => f(&values),
                other => Err(EvalError::NotCallable(other.type_name())),
            }
        }
        Node::Array(members) => members
            .iter()
            .map(|member| eval(member, context))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Node::Index { object, key } => {
            let object = eval(object, context)?;
            let key = eval(key, context)?;
            index(&object, &key)
        }
    }
}

/// Unary `+` / `-`.
///
/// More tolerant than the arithmetic-site conversion: containers and
/// functions yield NaN instead of failing. Dates still fail, and null maps
/// to 0 regardless of sign.
fn coerce_number(value: Value, multiplier: i64) -> Result<Value, EvalError> {
    match value {
        Value::Null | Value::Boolean(false) => Ok(Value::Integer(0)),
        Value::Boolean(true) => Ok(Value::Integer(multiplier)),
        Value::Integer(n) => Ok(n
            .checked_mul(multiplier)
            .map(Value::Integer)
            .unwrap_or_else(|| Value::Float(n as f64 * multiplier as f64))),
        Value::Float(x) => Ok(Value::Float(x * multiplier as f64)),
        Value::Date(_) => Err(EvalError::UnsupportedCoercion(
            "conversion of date to number is unsupported".to_string(),
        )),
        Value::String(s) => {
            if let Ok(n) = s.parse::<i64>() {
                Ok(n.checked_mul(multiplier)
                    .map(Value::Integer)
                    .unwrap_or_else(|| Value::Float(n as f64 * multiplier as f64)))
            } else if let Ok(x) = s.parse::<f64>() {
                Ok(Value::Float(x * multiplier as f64))
            } else {
                Ok(Value::Float(f64::NAN))
            }
        }
        _ => Ok(Value::Float(f64::NAN)),
    }
}

/// Computed accessor lookup: arrays take integer indices (negative counts
/// from the end), objects take string keys. Anything else is unsupported.
fn index(object: &Value, key: &Value) -> Result<Value, EvalError> {
    match (object, key) {
        (Value::Array(items), Value::Integer(i)) => {
            let idx = if *i < 0 { items.len() as i64 + i } else { *i };
            if idx < 0 || idx as usize >= items.len() {
                return Err(EvalError::AccessError(format!(
                    "index {} out of bounds for array of length {}",
                    i,
                    items.len()
                )));
            }
            Ok(items[idx as usize].clone())
        }
        (Value::Object(map), Value::String(k)) => map
            .get(k)
            .cloned()
            .ok_or_else(|| EvalError::AccessError(format!("key '{}' not found", k))),
        (Value::Array(_), k) => Err(EvalError::TypeError(format!(
            "array indices must be integers, got {}",
            k.type_name()
        ))),
        (Value::Object(_), k) => Err(EvalError::TypeError(format!(
            "object keys must be strings, got {}",
            k.type_name()
        ))),
        (other, _) => Err(EvalError::TypeError(format!(
            "cannot index into {}",
            other.type_name()
        ))),
    }
}
