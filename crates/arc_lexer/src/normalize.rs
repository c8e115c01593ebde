use arc_syntax::{Diagnostic, DiagnosticKind, Span};

pub struct NormalizedSource {
    pub text: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Strips a leading BOM, folds `\r\n` and lone `\r` into `\n`, and reports
/// NUL bytes (they are replaced by spaces so spans stay aligned).
pub fn normalize_source(input: &str) -> NormalizedSource {
    let mut diagnostics = Vec::new();
    let input = input.strip_prefix('\u{FEFF}').unwrap_or(input);

    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
            }
            '\0' => {
                let start = out.len() as u32;
                diagnostics.push(Diagnostic::error_kind(
                    DiagnosticKind::UnexpectedChar('\0'),
                    Some(Span::new(start, start.saturating_add(1))),
                ));
                out.push(' ');
            }
            _ => out.push(c),
        }
    }

    NormalizedSource {
        text: out,
        diagnostics,
    }
}
