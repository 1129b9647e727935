use crate::ops::BinaryFn;

/// Binding-power tiers. Higher binds tighter.
pub mod bp {
    /// Delimiters and end-of-input never bind
    pub const NONE: u8 = 0;
    /// Ternary `?`
    pub const TERNARY: u8 = 20;
    /// `&&` / `||` (right-associative: the right side recurses at `lbp - 1`)
    pub const LOGICAL: u8 = 30;
    /// Equality and relational operators
    pub const COMPARISON: u8 = 40;
    /// `+` / `-`
    pub const ADDITIVE: u8 = 50;
    /// `*` / `/`
    pub const MULTIPLICATIVE: u8 = 60;
    /// Unary `+` `-` `!` operands
    pub const UNARY: u8 = 70;
    /// Call `(` and index `[` in postfix position
    pub const POSTFIX: u8 = 80;
}

/// A lexical token.
///
/// The token set is closed and known at startup, so prefix (nud) and infix
/// (led) behavior is dispatched by exhaustive match in the parser rather
/// than through anything polymorphic. Generic binary operators carry their
/// resolved operator function straight from the symbol table.
#[derive(Debug, Clone)]
pub enum Token {
    /// End of input
    Eof,

    /// Non-binding punctuation: `:` `,` `)` `]`
    Delimiter(&'static str),

    /// String or number literal, kept as source text
    Literal(String),

    /// Identifier, resolved against the context at evaluation time
    Name(String),

    /// Ternary `?`
    Question,

    /// Short-circuit `&&`
    AndAnd,

    /// Short-circuit `||`
    OrOr,

    /// A binary operator with no prefix role, resolved to its rule function
    Binary {
        text: &'static str,
        lbp: u8,
        op: BinaryFn,
    },

    /// `+`: addition in infix position, numeric coercion in prefix position
    Plus,

    /// `-`: subtraction in infix position, negating coercion in prefix position
    Minus,

    /// Boolean negation `!`
    Bang,

    /// `(`: grouping in prefix position, invocation in infix position
    LParen,

    /// `[`: array literal in prefix position, computed accessor in infix position
    LBracket,
}

impl Token {
    /// Left binding power. Zero terminates the parser's infix loop.
    pub fn lbp(&self) -> u8 {
        use Token::*;
        match self {
            Eof | Delimiter(_) | Literal(_) | Name(_) | Bang => bp::NONE,
            Question => bp::TERNARY,
            AndAnd | OrOr => bp::LOGICAL,
            Binary { lbp, .. } => *lbp,
            Plus | Minus => bp::ADDITIVE,
            LParen | LBracket => bp::POSTFIX,
        }
    }

    /// The token's source text, used for delimiter matching and errors.
    pub fn text(&self) -> &str {
        use Token::*;
        match self {
            Eof => "(end)",
            Delimiter(d) => d,
            Literal(s) | Name(s) => s,
            Question => "?",
            AndAnd => "&&",
            OrOr => "||",
            Binary { text, .. } => text,
            Plus => "+",
            Minus => "-",
            Bang => "!",
            LParen => "(",
            LBracket => "[",
        }
    }
}

/// Tokens compare by kind and text; the operator function of a binary token
/// is determined by its text, so comparing it separately adds nothing.
impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        use Token::*;
        match (self, other) {
            (Eof, Eof)
            | (Question, Question)
            | (AndAnd, AndAnd)
            | (OrOr, OrOr)
            | (Plus, Plus)
            | (Minus, Minus)
            | (Bang, Bang)
            | (LParen, LParen)
            | (LBracket, LBracket) => true,
            (Delimiter(a), Delimiter(b)) => a == b,
            (Literal(a), Literal(b)) | (Name(a), Name(b)) => a == b,
            (Binary { text: a, .. }, Binary { text: b, .. }) => a == b,
            _ => false,
        }
    }
}
