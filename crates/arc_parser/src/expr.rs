use arc_syntax::TokenKind;

use super::Parser;
use crate::{Expr, Target};

impl Parser<'_> {
    /// `object`, `object(name)` or a target path.
    pub fn parse_expr(&mut self) -> Option<Expr> {
        self.skip_trivia();
        match self.peek_kind() {
            TokenKind::KwObject => {
                self.bump();
                if self.peek_kind_skipping_newlines(self.i) == TokenKind::LParen {
                    self.expect(TokenKind::LParen)?;
                    let name = self.expect_ident()?;
                    self.expect(TokenKind::RParen)?;
                    return Some(Expr::NewObject(Some(name)));
                }
                Some(Expr::NewObject(None))
            }
            TokenKind::Ident => Some(Expr::Target(self.parse_target()?)),
            _ => {
                self.error_expected(&[TokenKind::KwObject.describe(), "identifier"]);
                None
            }
        }
    }

    /// `IDENT ( "." IDENT )*`
    pub fn parse_target(&mut self) -> Option<Target> {
        let mut target = Target::Var(self.expect_ident()?);
        while self.peek_kind_skipping_newlines(self.i) == TokenKind::Dot {
            self.skip_trivia();
            self.bump();
            let field = self.expect_ident()?;
            target = target.field(field);
        }
        Some(target)
    }
}
