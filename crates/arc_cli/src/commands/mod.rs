use arc_syntax::{Diagnostic, Severity, SourceFile, render_diagnostic};
use serde_json::json;

pub(crate) mod ast;
pub(crate) mod check;
pub(crate) mod run;
pub(crate) mod tokens;

pub(crate) fn emit_diagnostics(source: &SourceFile, diagnostics: &[Diagnostic], json_out: bool) {
    for d in diagnostics {
        if json_out {
            let span = d.span.map(|s| json!({ "start": s.start.0, "end": s.end.0 }));
            let obj = json!({
                "severity": match d.severity { Severity::Error => "error", Severity::Warning => "warning" },
                "code": d.code,
                "message": d.message,
                "span": span,
                "file": source.name,
            });
            println!("{}", obj);
        } else {
            eprintln!("{}", render_diagnostic(source, d));
        }
    }
}

/// The single `<file>` argument, or exit 2.
pub(crate) fn single_path(positional: &[String]) -> &str {
    match positional {
        [path] => path.as_str(),
        _ => {
            eprintln!("Missing <file>");
            std::process::exit(2);
        }
    }
}

pub(crate) fn exit_on_stdout_error(e: std::io::Error) {
    if e.kind() == std::io::ErrorKind::BrokenPipe {
        std::process::exit(0);
    }
    eprintln!("stdout error: {e}");
    std::process::exit(2);
}
