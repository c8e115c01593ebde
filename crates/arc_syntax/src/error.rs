use std::fmt;

use crate::{Diagnostic, SourceText};

/// A malformed-source error reduced to a position and a message.
///
/// Lines and columns are one-based.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxError {
    pub line: u32,
    pub column: u32,
    pub message: String,
}

impl SyntaxError {
    pub fn new(line: u32, column: u32, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }

    pub fn from_diagnostic(source: &SourceText, diag: &Diagnostic) -> Self {
        let (line, column) = match diag.span {
            Some(span) => {
                let (l, c) = source.line_col(span.start.0);
                (l + 1, c + 1)
            }
            None => (1, 1),
        };
        Self::new(line, column, diag.message.clone())
    }

    /// The first error-severity diagnostic, if any.
    pub fn first_of(source: &SourceText, diagnostics: &[Diagnostic]) -> Option<Self> {
        diagnostics
            .iter()
            .find(|d| d.is_error())
            .map(|d| Self::from_diagnostic(source, d))
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Syntax error at {}:{} {}",
            self.line, self.column, self.message
        )
    }
}

impl std::error::Error for SyntaxError {}
