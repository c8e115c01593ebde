use arc_syntax::TokenKind;

use super::Parser;
use crate::{Expr, Stmt};

impl Parser<'_> {
    /// Parse a single statement.
    pub(super) fn parse_stmt(&mut self) -> Option<Stmt> {
        self.skip_trivia();
        match self.peek_kind() {
            TokenKind::KwThread => {
                self.bump();
                let body = self.parse_block()?;
                Some(Stmt::thread(body))
            }
            TokenKind::KwSleep => {
                self.bump();
                Some(Stmt::Sleep)
            }
            TokenKind::KwSleepr => {
                self.bump();
                Some(Stmt::Sleepr)
            }
            TokenKind::KwDump => {
                self.bump();
                Some(Stmt::Dump(self.parse_expr()?))
            }
            TokenKind::Ident => self.parse_assign(),
            _ => {
                self.error_expected(&[
                    "identifier",
                    TokenKind::KwThread.describe(),
                    TokenKind::KwSleep.describe(),
                    TokenKind::KwSleepr.describe(),
                    TokenKind::KwDump.describe(),
                ]);
                None
            }
        }
    }

    fn parse_assign(&mut self) -> Option<Stmt> {
        let to = self.parse_target()?;
        self.skip_trivia();
        let weak = match self.peek_kind() {
            TokenKind::Eq => false,
            TokenKind::TildeEq => true,
            _ => {
                self.error_expected(&[
                    TokenKind::Dot.describe(),
                    TokenKind::Eq.describe(),
                    TokenKind::TildeEq.describe(),
                ]);
                return None;
            }
        };
        self.bump();
        let from: Expr = self.parse_expr()?;
        Some(Stmt::assign(to, from, weak))
    }
}
