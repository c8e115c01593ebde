pub enum DiagnosticKind {
    // Lexer
    UnexpectedChar(char),
    UnmatchedDelimiter(char),
    UnclosedDelimiter(char),
    LoneTilde,

    // Parser
    ExpectedFound {
        expected: Vec<&'static str>,
        found: String,
    },
    KeywordAsIdentifier(String),

    // Warnings
    EmptyThreadBody,
}

pub struct DiagnosticsFormatter;

impl DiagnosticsFormatter {
    pub fn format(kind: &DiagnosticKind) -> String {
        match kind {
            DiagnosticKind::UnexpectedChar(c) => format!("unexpected character {:?}", c),
            DiagnosticKind::UnmatchedDelimiter(c) => format!("unmatched '{}'", c),
            DiagnosticKind::UnclosedDelimiter(c) => format!("unclosed '{}'", c),
            DiagnosticKind::LoneTilde => "expected `~=`, found a lone `~`".into(),

            DiagnosticKind::ExpectedFound { expected, found } => {
                format!("expected {}, found {}", expected.join(" or "), found)
            }
            DiagnosticKind::KeywordAsIdentifier(kw) => {
                format!("keyword `{}` cannot be used as an identifier", kw)
            }

            DiagnosticKind::EmptyThreadBody => "thread body is empty".into(),
        }
    }
}
