use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::evaluator::EvalError;
use crate::ops;

/// Variable bindings supplied by the host for one evaluation.
///
/// The evaluator never mutates a context; it works on a merged copy.
pub type Context = HashMap<String, Value>;

/// A host-supplied callable, invocable from expressions.
///
/// Functions receive their arguments already evaluated, in order. They must
/// be `Send + Sync` so a parsed expression can be evaluated from multiple
/// threads at once.
pub type NativeFunction = Arc<dyn Fn(&[Value]) -> Result<Value, EvalError> + Send + Sync>;

/// A runtime value in the expression language.
///
/// Covers the JSON kinds (with integers kept separate from floats), plus
/// calendar dates and host-supplied functions.
#[derive(Clone)]
pub enum Value {
    /// Null, also the value of the reserved word `null`
    Null,

    /// Boolean (reserved words `true` / `false`)
    Boolean(bool),

    /// Integer number
    Integer(i64),

    /// Floating-point number (NaN is a legal value, produced by failed
    /// numeric coercion)
    Float(f64),

    /// UTF-8 string
    String(String),

    /// Ordered sequence of values
    Array(Vec<Value>),

    /// String-keyed mapping
    Object(HashMap<String, Value>),

    /// Calendar date; cannot be coerced to a number
    Date(NaiveDate),

    /// Host-supplied callable
    Function(NativeFunction),
}

impl Value {
    /// Wrap a closure as an invocable value.
    pub fn function<F>(f: F) -> Value
    where
        F: Fn(&[Value]) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        Value::Function(Arc::new(f))
    }

    /// Boolean coercion.
    ///
    /// Falsy: null, false, 0, 0.0, the empty string, the empty array and
    /// the empty object. Everything else, NaN and dates included, is truthy.
    /// Empty containers being falsy is a confirmed divergence from
    /// JavaScript and applies uniformly to `!`, `&&`, `||` and `?:`.
    pub fn is_truthy(&self) -> bool {
        use Value::*;
        match self {
            Null => false,
            Boolean(b) => *b,
            Integer(n) => *n != 0,
            Float(x) => *x != 0.0,
            String(s) => !s.is_empty(),
            Array(items) => !items.is_empty(),
            Object(map) => !map.is_empty(),
            Date(_) => true,
            Function(_) => true,
        }
    }

    /// Human-readable kind name, used in error messages.
    pub fn type_name(&self) -> &'static str {
        use Value::*;
        match self {
            Null => "null",
            Boolean(_) => "boolean",
            Integer(_) => "integer",
            Float(_) => "float",
            String(_) => "string",
            Array(_) => "array",
            Object(_) => "object",
            Date(_) => "date",
            Function(_) => "function",
        }
    }
}

/// Direct value equality: same-kind structural comparison, except that
/// integers and floats compare numerically across the two kinds. Booleans
/// never equal numbers. Functions compare by allocation identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::*;
        match (self, other) {
            (Null, Null) => true,
            (Boolean(a), Boolean(b)) => a == b,
            (Integer(a), Integer(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Integer(a), Float(b)) | (Float(b), Integer(a)) => *a as f64 == *b,
            (String(a), String(b)) => a == b,
            (Array(a), Array(b)) => a == b,
            (Object(a), Object(b)) => a == b,
            (Date(a), Date(b)) => a == b,
            (Function(a), Function(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Value::*;
        match self {
            Null => write!(f, "Null"),
            Boolean(b) => f.debug_tuple("Boolean").field(b).finish(),
            Integer(n) => f.debug_tuple("Integer").field(n).finish(),
            Float(x) => f.debug_tuple("Float").field(x).finish(),
            String(s) => f.debug_tuple("String").field(s).finish(),
            Array(items) => f.debug_tuple("Array").field(items).finish(),
            Object(map) => f.debug_tuple("Object").field(map).finish(),
            Date(d) => f.debug_tuple("Date").field(d).finish(),
            Function(_) => write!(f, "Function(<native>)"),
        }
    }
}

/// The string-conversion form used by `+` concatenation: null prints as
/// "null", booleans as "true"/"false".
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", ops::to_display_string(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_containers_are_falsy() {
        assert!(!Value::Array(vec![]).is_truthy());
        assert!(!Value::Object(HashMap::new()).is_truthy());
        assert!(Value::Array(vec![Value::Null]).is_truthy());
    }

    #[test]
    fn numeric_cross_kind_equality() {
        assert_eq!(Value::Integer(1), Value::Float(1.0));
        assert_ne!(Value::Boolean(true), Value::Integer(1));
        assert_ne!(Value::Float(f64::NAN), Value::Float(f64::NAN));
    }

    #[test]
    fn functions_compare_by_identity() {
        let f = Value::function(|_| Ok(Value::Null));
        let g = Value::function(|_| Ok(Value::Null));
        assert_eq!(f, f.clone());
        assert_ne!(f, g);
    }
}
