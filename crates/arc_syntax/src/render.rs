use crate::{Diagnostic, SourceFile, Span};

fn floor_char_boundary(text: &str, mut idx: usize) -> usize {
    idx = idx.min(text.len());
    while idx > 0 && !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

/// Pushes `| line` and a caret under the span start, indented by `gutter`.
fn push_excerpt(out: &mut String, source: &SourceFile, span: Span, gutter: &str) -> (u32, u32) {
    let text = source.text.as_str();
    let start = floor_char_boundary(text, span.start.0 as usize) as u32;
    let (line, col) = source.text.line_col(start);
    out.push('\n');
    out.push_str(gutter);
    out.push_str("| ");
    out.push_str(source.text.line_text(start));
    out.push('\n');
    out.push_str(gutter);
    out.push_str("| ");
    out.extend(std::iter::repeat_n(' ', col as usize));
    let width = span.len().max(1) as usize;
    out.extend(std::iter::repeat_n('^', width.min(80)));
    (line, col)
}

pub fn render_diagnostic(source: &SourceFile, diag: &Diagnostic) -> String {
    let code_str = diag.code.map(|c| format!(" [{c}]")).unwrap_or_default();
    let mut out = match diag.span {
        Some(span) => {
            let start = floor_char_boundary(source.text.as_str(), span.start.0 as usize);
            let (line, col) = source.text.line_col(start as u32);
            let mut out = format!(
                "{:?}{}: {}:{}:{}: {}",
                diag.severity,
                code_str,
                source.name,
                line + 1,
                col + 1,
                diag.message
            );
            push_excerpt(&mut out, source, span, "  ");
            out
        }
        None => format!(
            "{:?}{}: {}: {}",
            diag.severity, code_str, source.name, diag.message
        ),
    };
    for label in &diag.labels {
        out.push('\n');
        out.push_str("  = note: ");
        out.push_str(&label.message);
        let (ll, lc) = push_excerpt(&mut out, source, label.span, "    ");
        out.push_str(&format!("  ({}:{}:{})", source.name, ll + 1, lc + 1));
    }
    if let Some(h) = &diag.help {
        out.push('\n');
        out.push_str("  = help: ");
        out.push_str(h);
    }
    out
}

pub fn render_diagnostics(source: &SourceFile, diagnostics: &[Diagnostic]) -> String {
    let mut out = String::new();
    for (idx, d) in diagnostics.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        out.push_str(&render_diagnostic(source, d));
    }
    out
}
