use crate::Stmt;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    pub stmts: Vec<Stmt>,
    /// Every global name used anywhere, sorted. Empty until the liveness
    /// pass has run.
    pub globals: Vec<String>,
}

impl Program {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Self {
            stmts,
            globals: Vec::new(),
        }
    }
}
