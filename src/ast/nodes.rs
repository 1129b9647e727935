use crate::ops::BinaryFn;

/// A syntax-tree node.
///
/// Built once by the parser and immutable afterwards; the same tree can be
/// evaluated repeatedly and concurrently. Each child is owned by exactly one
/// parent.
#[derive(Debug, Clone)]
pub enum Node {
    /// A literal, kept as source text and re-parsed per evaluation with the
    /// literal-only grammar
    Literal(String),

    /// A variable reference, looked up in the merged context
    Variable(String),

    /// A binary operator with its resolved rule function
    Binary {
        op: BinaryFn,
        left: Box<Node>,
        right: Box<Node>,
    },

    /// Short-circuit `&&`; yields the raw left value when it is falsy
    And { left: Box<Node>, right: Box<Node> },

    /// Short-circuit `||`; yields the raw left value when it is truthy
    Or { left: Box<Node>, right: Box<Node> },

    /// `condition ? truthy : falsy`; exactly one branch is evaluated
    Ternary {
        condition: Box<Node>,
        truthy: Box<Node>,
        falsy: Box<Node>,
    },

    /// Unary `+` / `-`: numeric coercion with a ±1 multiplier
    CoerceNumber { operand: Box<Node>, multiplier: i64 },

    /// Boolean negation `!`
    Negate(Box<Node>),

    /// Function invocation with arguments evaluated left to right
    Call { callee: Box<Node>, args: Vec<Node> },

    /// Array literal
    Array(Vec<Node>),

    /// Computed accessor `object[key]`
    Index { object: Box<Node>, key: Box<Node> },
}
