use std::fs;

use arc_ir::Program;
use arc_lexer::{Lexer, normalize_source};
use arc_parser::Parser;
use arc_syntax::{Diagnostic, SourceFile, SourceId, SyntaxError, Token};

use crate::liveness;

pub struct Driver;

pub struct LexedFile {
    pub path: String,
    pub source: SourceFile,
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Clone, Debug)]
pub struct CompiledFile {
    pub path: String,
    pub source: SourceFile,
    pub tokens: Vec<Token>,
    /// Parsed and prepared. Only meaningful when `has_errors()` is false.
    pub program: Program,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompiledFile {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn first_error(&self) -> Option<SyntaxError> {
        SyntaxError::first_of(&self.source.text, &self.diagnostics)
    }
}

impl Driver {
    pub fn new() -> Self {
        Self
    }

    pub fn lex_file(&self, path: &str) -> Result<LexedFile, String> {
        let input = read_source(path)?;
        Ok(self.lex_text(path, &input))
    }

    pub fn lex_text(&self, path: &str, input: &str) -> LexedFile {
        let normalized = normalize_source(input);
        let source = SourceFile::new(SourceId(0), path, normalized.text);
        let lex = Lexer::new(source.text.as_str()).lex();
        let mut diagnostics = normalized.diagnostics;
        diagnostics.extend(lex.diagnostics);

        LexedFile {
            path: path.to_string(),
            source,
            tokens: lex.tokens,
            diagnostics,
        }
    }

    pub fn compile_file(&self, path: &str) -> Result<CompiledFile, String> {
        let input = read_source(path)?;
        Ok(self.compile_text(path, &input))
    }

    /// Lex, parse and prepare `input`. Diagnostics are collected, never
    /// thrown; the liveness pass runs even on a partial tree so `ast` output
    /// stays useful while editing.
    pub fn compile_text(&self, path: &str, input: &str) -> CompiledFile {
        let LexedFile {
            path,
            source,
            tokens,
            mut diagnostics,
        } = self.lex_text(path, input);
        let parse = Parser::new(source.text.as_str(), &tokens).parse();
        diagnostics.extend(parse.diagnostics);

        let mut program = parse.program;
        liveness::prepare(&mut program);

        CompiledFile {
            path,
            source,
            tokens,
            program,
            diagnostics,
        }
    }

    /// The prepared program, or the first syntax error.
    pub fn build(&self, path: &str, input: &str) -> Result<Program, SyntaxError> {
        let compiled = self.compile_text(path, input);
        match compiled.first_error() {
            Some(err) => Err(err),
            None => Ok(compiled.program),
        }
    }
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}

fn read_source(path: &str) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("Failed to read file {path}: {e}"))
}
