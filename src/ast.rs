//! Token and syntax-tree definitions.
//!
//! Both sets are closed: the lexer only ever produces the tokens registered
//! in the symbol table, and the parser only ever builds the node forms
//! defined here. Dispatch over either is an exhaustive match.

pub mod nodes;
pub mod tokens;

pub use nodes::Node;
pub use tokens::{Token, bp};
