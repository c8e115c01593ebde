//! arc_ir: the statement/expression tree shared by the parser, the liveness
//! pass and the interpreter.
mod ast;
mod print;
mod program;

pub use ast::*;
pub use program::*;
