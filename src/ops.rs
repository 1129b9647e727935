//! Coercion and operator rules.
//!
//! Pure functions implementing the boolean/numeric/string coercions and the
//! equality, arithmetic and relational operators of the emulated language.
//! Binary operators all share one signature so the parser can resolve an
//! operator token straight to its implementation.

use std::cmp::Ordering;
use std::mem;

use crate::evaluator::EvalError;
use crate::value::Value;

/// A resolved two-argument operator, carried by binary tokens and nodes.
pub type BinaryFn = fn(&Value, &Value) -> Result<Value, EvalError>;

/// A numeric coercion result; only these two kinds come out of [`to_number`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(x) => x,
        }
    }

    fn into_value(self) -> Value {
        match self {
            Number::Int(n) => Value::Integer(n),
            Number::Float(x) => Value::Float(x),
        }
    }
}

/// Numeric conversion as performed at arithmetic sites.
///
/// Null and false become 0, true becomes 1, digit-only strings parse as
/// integers, other strings parse as floats and fall back to NaN when
/// unparsable. Numbers pass through. Every remaining kind (dates, arrays,
/// objects, functions) is an error.
pub fn to_number(value: &Value) -> Result<Number, EvalError> {
    match value {
        Value::Null | Value::Boolean(false) => Ok(Number::Int(0)),
        Value::Boolean(true) => Ok(Number::Int(1)),
        Value::Integer(n) => Ok(Number::Int(*n)),
        Value::Float(x) => Ok(Number::Float(*x)),
        Value::String(s) => Ok(parse_number(s)),
        Value::Date(_) => Err(EvalError::UnsupportedCoercion(
            "conversion of date to number is unsupported".to_string(),
        )),
        other => Err(EvalError::UnsupportedCoercion(format!(
            "cannot convert {} to number",
            other.type_name()
        ))),
    }
}

/// Parse a string as a number: digit-only strings become integers, anything
/// else goes through float parsing, and unparsable text yields NaN.
fn parse_number(text: &str) -> Number {
    if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(n) = text.parse::<i64>() {
            return Number::Int(n);
        }
    }
    match text.parse::<f64>() {
        Ok(x) => Number::Float(x),
        Err(_) => Number::Float(f64::NAN),
    }
}

/// String conversion: null prints as "null", booleans as "true"/"false",
/// NaN as "NaN", everything else in its natural form.
pub fn to_display_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Integer(n) => n.to_string(),
        Value::Float(x) if x.is_nan() => "NaN".to_string(),
        Value::Float(x) => x.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(to_display_string).collect();
            format!("[{}]", parts.join(", "))
        }
        Value::Object(map) => {
            // Sorted for deterministic output
            let mut keys: Vec<_> = map.keys().collect();
            keys.sort();
            let parts: Vec<String> = keys
                .iter()
                .map(|k| format!("{}: {}", k, to_display_string(&map[*k])))
                .collect();
            format!("{{{}}}", parts.join(", "))
        }
        Value::Date(d) => d.to_string(),
        Value::Function(_) => "<function>".to_string(),
    }
}

/// Parse literal source text into a value.
///
/// Deliberately narrow grammar: a single- or double-quoted string with
/// backslash escapes, an integer, or a float. No nested container syntax.
/// Shared between literal nodes and the loose-equality string rule.
pub fn literal_value(text: &str) -> Result<Value, EvalError> {
    let text = text.trim();
    if let Some(inner) = quoted(text) {
        return Ok(Value::String(unescape(inner)));
    }
    if let Ok(n) = text.parse::<i64>() {
        return Ok(Value::Integer(n));
    }
    if let Ok(x) = text.parse::<f64>() {
        return Ok(Value::Float(x));
    }
    Err(EvalError::InvalidLiteral(text.to_string()))
}

fn quoted(text: &str) -> Option<&str> {
    for quote in ['"', '\''] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return Some(&text[1..text.len() - 1]);
        }
    }
    None
}

fn unescape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            // Unknown escapes keep the escaped character itself
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }
    result
}

/// `+`: string concatenation when either side is a string, numeric addition
/// otherwise. Integer addition that overflows widens to float.
pub fn add(left: &Value, right: &Value) -> Result<Value, EvalError> {
    if matches!(left, Value::String(_)) || matches!(right, Value::String(_)) {
        return Ok(Value::String(format!(
            "{}{}",
            to_display_string(left),
            to_display_string(right)
        )));
    }
    numeric_binop(left, right, i64::checked_add, |a, b| a + b)
}

/// `-`: numeric subtraction.
pub fn sub(left: &Value, right: &Value) -> Result<Value, EvalError> {
    numeric_binop(left, right, i64::checked_sub, |a, b| a - b)
}

/// `*`: numeric multiplication.
pub fn mul(left: &Value, right: &Value) -> Result<Value, EvalError> {
    numeric_binop(left, right, i64::checked_mul, |a, b| a * b)
}

/// `/`: floating-point division, even for two integers.
pub fn div(left: &Value, right: &Value) -> Result<Value, EvalError> {
    let a = to_number(left)?;
    let b = to_number(right)?;
    if b.as_f64() == 0.0 {
        return Err(EvalError::DivisionByZero);
    }
    Ok(Value::Float(a.as_f64() / b.as_f64()))
}

fn numeric_binop(
    left: &Value,
    right: &Value,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Result<Value, EvalError> {
    let a = to_number(left)?;
    let b = to_number(right)?;
    match (a, b) {
        (Number::Int(a), Number::Int(b)) => Ok(int_op(a, b)
            .map(Value::Integer)
            .unwrap_or_else(|| Value::Float(float_op(a as f64, b as f64)))),
        _ => Ok(Value::Float(float_op(a.as_f64(), b.as_f64()))),
    }
}

/// Loose equality (`==`).
///
/// Only one cross-kind case is special: a string on one side and a
/// non-boolean number on the other. The string is parsed with the literal
/// grammar and compared to the number; a parse failure means not-equal.
/// Every other pairing falls back to direct value equality. Deliberately a
/// partial emulation of general cross-type equality.
pub fn loose_equal(left: &Value, right: &Value) -> Result<Value, EvalError> {
    Ok(Value::Boolean(loose_eq(left, right)))
}

pub fn loose_not_equal(left: &Value, right: &Value) -> Result<Value, EvalError> {
    Ok(Value::Boolean(!loose_eq(left, right)))
}

fn loose_eq(left: &Value, right: &Value) -> bool {
    for (a, b) in [(left, right), (right, left)] {
        if let (Value::String(s), Value::Integer(_) | Value::Float(_)) = (a, b) {
            return match literal_value(s) {
                Ok(parsed) => parsed == *b,
                Err(_) => false,
            };
        }
    }
    left == right
}

/// Strict equality (`===`): equal iff both sides are strings, or both are
/// non-boolean numbers, or they share a runtime kind — and the values
/// compare equal. A number and a boolean are never strictly equal.
pub fn strict_equal(left: &Value, right: &Value) -> Result<Value, EvalError> {
    Ok(Value::Boolean(strict_eq(left, right)))
}

pub fn strict_not_equal(left: &Value, right: &Value) -> Result<Value, EvalError> {
    Ok(Value::Boolean(!strict_eq(left, right)))
}

fn strict_eq(left: &Value, right: &Value) -> bool {
    let both_strings = matches!((left, right), (Value::String(_), Value::String(_)));
    let both_numbers = matches!(left, Value::Integer(_) | Value::Float(_))
        && matches!(right, Value::Integer(_) | Value::Float(_));
    let same_kind = mem::discriminant(left) == mem::discriminant(right);
    (same_kind || both_numbers || both_strings) && left == right
}

/// Ordering used by the relational operators: numbers (booleans counting as
/// 0/1) compare numerically, strings lexicographically, dates
/// chronologically, and arrays element-wise with length as the tiebreak.
/// Any other pairing is an error; NaN orders against nothing, so every
/// relation on it is false.
fn order(left: &Value, right: &Value) -> Result<Option<Ordering>, EvalError> {
    fn numeric(value: &Value) -> Option<f64> {
        match value {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(x) => Some(*x),
            Value::Boolean(b) => Some(*b as i64 as f64),
            _ => None,
        }
    }

    match (left, right) {
        (Value::String(a), Value::String(b)) => Ok(Some(a.cmp(b))),
        (Value::Date(a), Value::Date(b)) => Ok(Some(a.cmp(b))),
        (Value::Array(a), Value::Array(b)) => {
            for (x, y) in a.iter().zip(b) {
                match order(x, y)? {
                    Some(Ordering::Equal) => continue,
                    decided => return Ok(decided),
                }
            }
            Ok(Some(a.len().cmp(&b.len())))
        }
        _ => match (numeric(left), numeric(right)) {
            (Some(a), Some(b)) => Ok(a.partial_cmp(&b)),
            _ => Err(EvalError::TypeError(format!(
                "cannot order {} and {}",
                left.type_name(),
                right.type_name()
            ))),
        },
    }
}

pub fn less_than(left: &Value, right: &Value) -> Result<Value, EvalError> {
    Ok(Value::Boolean(matches!(order(left, right)?, Some(Ordering::Less))))
}

pub fn less_equal(left: &Value, right: &Value) -> Result<Value, EvalError> {
    Ok(Value::Boolean(matches!(
        order(left, right)?,
        Some(Ordering::Less | Ordering::Equal)
    )))
}

pub fn greater_than(left: &Value, right: &Value) -> Result<Value, EvalError> {
    Ok(Value::Boolean(matches!(
        order(left, right)?,
        Some(Ordering::Greater)
    )))
}

pub fn greater_equal(left: &Value, right: &Value) -> Result<Value, EvalError> {
    Ok(Value::Boolean(matches!(
        order(left, right)?,
        Some(Ordering::Greater | Ordering::Equal)
    )))
}
