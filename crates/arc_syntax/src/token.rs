//! Token definitions.
//!
//! arc-lang has a tiny surface: five keywords, six punctuators, identifiers,
//! and newlines (which the parser treats as trivia but uses to resynchronize
//! after an error).
use crate::Span;

/// Token kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Newline.
    Newline,

    /// Identifier. May start with a digit.
    Ident,

    /// `object`
    KwObject,
    /// `thread`
    KwThread,
    /// `sleep`
    KwSleep,
    /// `sleepr`
    KwSleepr,
    /// `dump`
    KwDump,

    /// `.`
    Dot,
    /// `=`
    Eq,
    /// `~=`
    TildeEq,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `(`
    LParen,
    /// `)`
    RParen,

    /// End of file.
    Eof,
}

impl TokenKind {
    /// Human-readable name used in `expected ..., found ...` messages.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Newline => "newline",
            TokenKind::Ident => "identifier",
            TokenKind::KwObject => "`object`",
            TokenKind::KwThread => "`thread`",
            TokenKind::KwSleep => "`sleep`",
            TokenKind::KwSleepr => "`sleepr`",
            TokenKind::KwDump => "`dump`",
            TokenKind::Dot => "`.`",
            TokenKind::Eq => "`=`",
            TokenKind::TildeEq => "`~=`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::Eof => "end of file",
        }
    }

    /// Whether a token of this kind can begin a statement.
    pub fn starts_stmt(self) -> bool {
        matches!(
            self,
            TokenKind::Ident
                | TokenKind::KwThread
                | TokenKind::KwSleep
                | TokenKind::KwSleepr
                | TokenKind::KwDump
        )
    }
}

/// Token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// Token kind.
    pub kind: TokenKind,
    /// Span in source text.
    pub span: Span,
}
