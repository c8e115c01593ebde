//! Lexer implementation.
//!
//! Scans source text into keywords, identifiers, punctuators and newlines,
//! and collects diagnostics instead of stopping at the first bad character.
//!
//! Design: single linear pass with a delimiter stack so unbalanced braces and
//! parentheses are reported at the lexing stage.
use crate::keywords::KEYWORDS;
use arc_syntax::{Diagnostic, DiagnosticKind, Span, Token, TokenKind, codes, is_ident_char};

/// Lexing result.
pub struct LexResult {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
}

/// arc-lang lexer.
pub struct Lexer<'a> {
    input: &'a str,
    i: usize,
    diagnostics: Vec<Diagnostic>,
    tokens: Vec<Token>,
    delim_stack: Vec<(char, usize)>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            i: 0,
            diagnostics: Vec::new(),
            tokens: Vec::new(),
            delim_stack: Vec::new(),
        }
    }

    /// Run the lexer and return tokens + diagnostics. The token list always
    /// ends with exactly one `Eof`.
    pub fn lex(mut self) -> LexResult {
        self.tokens
            .reserve(self.input.len().saturating_div(3).max(16));
        while let Some(c) = self.peek_char() {
            let start = self.i;
            match c {
                '\n' => {
                    self.i += 1;
                    // Runs of blank lines collapse into one token.
                    if !matches!(
                        self.tokens.last().map(|t| t.kind),
                        Some(TokenKind::Newline) | None
                    ) {
                        self.push(TokenKind::Newline, start, self.i);
                    }
                }
                c if c.is_whitespace() => {
                    self.i += c.len_utf8();
                }
                '/' => {
                    if self.peek_str("//") {
                        self.skip_line_comment();
                    } else {
                        self.unexpected(c);
                    }
                }
                '.' => self.single(TokenKind::Dot),
                '=' => self.single(TokenKind::Eq),
                '~' => {
                    if self.peek_str("~=") {
                        self.i += 2;
                        self.push(TokenKind::TildeEq, start, self.i);
                    } else {
                        self.i += 1;
                        self.diagnostics.push(
                            Diagnostic::error_kind(
                                DiagnosticKind::LoneTilde,
                                Some(Span::new(start as u32, self.i as u32)),
                            )
                            .with_code(codes::UNEXPECTED_CHAR)
                            .with_help("a weak assignment is written `w ~= x`"),
                        );
                    }
                }
                '{' | '(' => {
                    self.delim_stack.push((c, start));
                    let kind = if c == '{' {
                        TokenKind::LBrace
                    } else {
                        TokenKind::LParen
                    };
                    self.single(kind);
                }
                '}' | ')' => {
                    let open = if c == '}' { '{' } else { '(' };
                    match self.delim_stack.last() {
                        Some((top, _)) if *top == open => {
                            self.delim_stack.pop();
                        }
                        top => {
                            let mut diag = Diagnostic::error_kind(
                                DiagnosticKind::UnmatchedDelimiter(c),
                                Some(Span::new(start as u32, start as u32 + 1)),
                            )
                            .with_code(codes::UNBALANCED_DELIMITER);
                            if let Some(&(other, at)) = top {
                                diag = diag.with_label(
                                    format!("'{other}' still open"),
                                    Span::new(at as u32, at as u32 + 1),
                                );
                            }
                            self.diagnostics.push(diag);
                        }
                    }
                    let kind = if c == '}' {
                        TokenKind::RBrace
                    } else {
                        TokenKind::RParen
                    };
                    self.single(kind);
                }
                c if is_ident_char(c) => self.lex_ident_or_keyword(),
                other => self.unexpected(other),
            }
        }

        let end = self.i as u32;
        self.tokens.push(Token {
            kind: TokenKind::Eof,
            span: Span::point(end),
        });
        for (ch, at) in std::mem::take(&mut self.delim_stack).into_iter().rev() {
            self.diagnostics.push(
                Diagnostic::error_kind(
                    DiagnosticKind::UnclosedDelimiter(ch),
                    Some(Span::new(at as u32, at as u32 + 1)),
                )
                .with_code(codes::UNBALANCED_DELIMITER),
            );
        }

        LexResult {
            tokens: self.tokens,
            diagnostics: self.diagnostics,
        }
    }

    fn single(&mut self, kind: TokenKind) {
        let start = self.i;
        self.i += 1;
        self.push(kind, start, self.i);
    }

    fn unexpected(&mut self, c: char) {
        let start = self.i;
        self.i += c.len_utf8();
        self.diagnostics.push(
            Diagnostic::error_kind(
                DiagnosticKind::UnexpectedChar(c),
                Some(Span::new(start as u32, self.i as u32)),
            )
            .with_code(codes::UNEXPECTED_CHAR),
        );
    }

    fn skip_line_comment(&mut self) {
        self.i += 2;
        while let Some(ch) = self.peek_char() {
            if ch == '\n' {
                break;
            }
            self.i += ch.len_utf8();
        }
    }

    fn lex_ident_or_keyword(&mut self) {
        let start = self.i;
        while let Some(ch) = self.peek_char() {
            if !is_ident_char(ch) {
                break;
            }
            self.i += ch.len_utf8();
        }
        let word = &self.input[start..self.i];
        let kind = KEYWORDS.get(word).copied().unwrap_or(TokenKind::Ident);
        self.push(kind, start, self.i);
    }

    fn push(&mut self, kind: TokenKind, start: usize, end: usize) {
        self.tokens.push(Token {
            kind,
            span: Span::new(start as u32, end as u32),
        });
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.i..].chars().next()
    }

    fn peek_str(&self, s: &str) -> bool {
        self.input[self.i..].starts_with(s)
    }
}
