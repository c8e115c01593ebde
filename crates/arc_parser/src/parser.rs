//! Parser.
//!
//! Converts lexer tokens into a `Program` and collects diagnostics. Newlines
//! are trivia except during error recovery, where they mark the point to
//! resume at.
use arc_syntax::{Diagnostic, DiagnosticKind, Span, Token, TokenKind, codes};

use crate::{Program, Stmt};

/// Parse result.
pub struct ParseResult {
    pub program: Program,
    pub diagnostics: Vec<Diagnostic>,
}

/// arc-lang parser.
pub struct Parser<'a> {
    pub input: &'a str,
    pub tokens: &'a [Token],
    pub i: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    /// Create a new parser.
    pub fn new(input: &'a str, tokens: &'a [Token]) -> Self {
        Self {
            input,
            tokens,
            i: 0,
            diagnostics: Vec::with_capacity(8),
        }
    }

    /// Parse the full input and return a program plus diagnostics.
    pub fn parse(mut self) -> ParseResult {
        let mut stmts: Vec<Stmt> = Vec::with_capacity(8);
        loop {
            self.skip_trivia();
            match self.peek_kind() {
                TokenKind::Eof => break,
                TokenKind::RBrace => {
                    // Stray closer; the lexer already reported it.
                    self.bump();
                }
                _ => {
                    if let Some(stmt) = self.parse_stmt() {
                        stmts.push(stmt);
                    } else {
                        self.recover_stmt();
                    }
                }
            }
        }

        ParseResult {
            program: Program::new(stmts),
            diagnostics: self.diagnostics,
        }
    }

    /// Parse `{ stmt* }`. The opening brace has not been consumed yet.
    pub fn parse_block(&mut self) -> Option<Vec<Stmt>> {
        let open = self.expect(TokenKind::LBrace)?;
        let mut stmts: Vec<Stmt> = Vec::with_capacity(4);
        loop {
            self.skip_trivia();
            match self.peek_kind() {
                TokenKind::RBrace => {
                    self.bump();
                    break;
                }
                TokenKind::Eof => {
                    self.error_expected(&[TokenKind::RBrace.describe(), "statement"]);
                    return None;
                }
                _ => {
                    if let Some(stmt) = self.parse_stmt() {
                        stmts.push(stmt);
                    } else {
                        self.recover_stmt();
                    }
                }
            }
        }
        if stmts.is_empty() {
            let end = self.prev_span().end.0;
            self.diagnostics.push(
                Diagnostic::warning_kind(
                    DiagnosticKind::EmptyThreadBody,
                    Some(Span::new(open.span.start.0, end)),
                )
                .with_code(codes::EMPTY_THREAD),
            );
        }
        Some(stmts)
    }

    /// Skip to the end of the current line without crossing an unmatched `}`.
    pub fn recover_stmt(&mut self) {
        let mut brace_depth = 0usize;
        while !self.at(TokenKind::Eof) {
            match self.peek_kind() {
                TokenKind::LBrace => brace_depth += 1,
                TokenKind::RBrace => {
                    if brace_depth == 0 {
                        return;
                    }
                    brace_depth -= 1;
                }
                TokenKind::Newline if brace_depth == 0 => {
                    self.bump();
                    return;
                }
                _ => {}
            }
            self.bump();
        }
    }

    pub fn expect(&mut self, kind: TokenKind) -> Option<Token> {
        self.skip_trivia();
        if self.at(kind) {
            return Some(self.bumped());
        }
        self.error_expected(&[kind.describe()]);
        None
    }

    pub fn expect_ident(&mut self) -> Option<String> {
        self.skip_trivia();
        if self.at(TokenKind::Ident) {
            let t = self.bumped();
            return Some(self.token_text(&t).to_string());
        }
        if arc_syntax::is_keyword(self.token_text(&self.cur_token())) {
            let t = self.bumped();
            let kw = self.token_text(&t).to_string();
            self.diagnostics.push(
                Diagnostic::error_kind(
                    DiagnosticKind::KeywordAsIdentifier(kw.clone()),
                    Some(t.span),
                )
                .with_code(codes::UNEXPECTED_TOKEN)
                .with_help(format!("pick another name, e.g. `{kw}_`")),
            );
            return None;
        }
        self.error_expected(&[TokenKind::Ident.describe()]);
        None
    }

    /// Report `expected A or B, found <current token>` at the current token.
    pub fn error_expected(&mut self, expected: &[&'static str]) {
        let t = self.cur_token();
        let found = match t.kind {
            TokenKind::Ident => format!("identifier `{}`", self.token_text(&t)),
            other => other.describe().to_string(),
        };
        self.diagnostics.push(
            Diagnostic::error_kind(
                DiagnosticKind::ExpectedFound {
                    expected: expected.to_vec(),
                    found,
                },
                Some(t.span),
            )
            .with_code(codes::UNEXPECTED_TOKEN),
        );
    }

    pub fn at(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    pub fn peek_kind(&self) -> TokenKind {
        self.tokens
            .get(self.i)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    /// Kind of the first non-newline token at or after `j`.
    pub fn peek_kind_skipping_newlines(&self, mut j: usize) -> TokenKind {
        while let Some(t) = self.tokens.get(j) {
            if t.kind != TokenKind::Newline {
                return t.kind;
            }
            j += 1;
        }
        TokenKind::Eof
    }

    pub fn bumped(&mut self) -> Token {
        let t = self.cur_token();
        if self.i < self.tokens.len() {
            self.i += 1;
        }
        t
    }

    pub fn bump(&mut self) {
        if self.i < self.tokens.len() {
            self.i += 1;
        }
    }

    pub fn skip_trivia(&mut self) {
        while self.at(TokenKind::Newline) {
            self.i += 1;
        }
    }

    pub fn cur_token(&self) -> Token {
        self.tokens.get(self.i).cloned().unwrap_or_else(|| Token {
            kind: TokenKind::Eof,
            span: Span::point(self.input.len() as u32),
        })
    }

    pub fn cur_span(&self) -> Span {
        self.cur_token().span
    }

    fn prev_span(&self) -> Span {
        self.i
            .checked_sub(1)
            .and_then(|j| self.tokens.get(j))
            .map(|t| t.span)
            .unwrap_or_else(|| self.cur_span())
    }

    pub fn token_text(&self, t: &Token) -> &str {
        let start = (t.span.start.0 as usize).min(self.input.len());
        let end = (t.span.end.0 as usize).clamp(start, self.input.len());
        &self.input[start..end]
    }
}
