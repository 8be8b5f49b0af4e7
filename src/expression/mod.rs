//! Expression text: tokens, call nodes and rewriting.
//!
//! Expressions are stored as raw text in instruction parameters. Only the
//! identifier chains that name functions, behavior methods and objects are
//! structured; everything else is carried through as literal text, so a
//! rewrite reproduces untouched text byte for byte.

mod lexer;
mod parser;
mod rewrite;

pub use lexer::{Lexer, Token, TokenKind, tokenize};
pub use parser::{
    AccessorKind, Argument, ArgumentList, CallNode, CallShape, Expression, NamePart, Segment,
    parse,
};
pub use rewrite::{Transform, moved_order, rewrite_expression};
