//! Shared syntax definitions for arc-lang.
//!
//! Spans, source text with line/column lookup, tokens, diagnostics and their
//! rendering. Every front-end crate depends on this one; the runtime does not.
mod diagnostic;
mod error;
mod kind;
mod render;
mod source;
mod span;
mod token;
mod util;

pub use diagnostic::{Diagnostic, Label, Severity, codes};
pub use error::SyntaxError;
pub use kind::{DiagnosticKind, DiagnosticsFormatter};
pub use render::{render_diagnostic, render_diagnostics};
pub use source::{SourceFile, SourceId, SourceText};
pub use span::{ByteIndex, Span};
pub use token::{Token, TokenKind};
pub use util::{is_ident_char, is_keyword};
