//! arc_driver: front end glue.
//!
//! Normalize, lex, parse, then run the liveness pass so the program is ready
//! for the interpreter.
mod frontend;
pub mod liveness;

pub use frontend::{CompiledFile, Driver, LexedFile};
