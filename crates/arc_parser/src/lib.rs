//! arc_parser: recursive-descent parser from lexer tokens to `arc_ir` nodes.
mod expr;
mod parser;
mod stmt;

pub use arc_ir::*;
pub use parser::{ParseResult, Parser};
