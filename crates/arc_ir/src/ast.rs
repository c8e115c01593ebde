//! Statement and expression nodes.
//!
//! The tree is closed: every consumer matches exhaustively instead of
//! dispatching through visitors.
use smallvec::SmallVec;

/// Names captured by a thread body. Most bodies touch a handful of globals.
pub type CaptureSet = SmallVec<[String; 4]>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stmt {
    /// `to = from` or `to ~= from`.
    Assign(Box<AssignStmt>),
    /// `thread { ... }`.
    NewThread(Box<ThreadStmt>),
    /// Fixed-length pause.
    Sleep,
    /// Pause of random length.
    Sleepr,
    /// `dump expr`.
    Dump(Expr),
    /// Inserted by the liveness pass after the last use of a global.
    EndOfLife(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssignStmt {
    pub to: Target,
    pub from: Expr,
    pub weak: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThreadStmt {
    pub body: Vec<Stmt>,
    /// Filled in by the liveness pass; empty straight out of the parser.
    pub captures: CaptureSet,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    /// `object` or `object(name)`.
    NewObject(Option<String>),
    Target(Target),
}

/// Something a reference can be stored into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    Var(String),
    SelectField(Box<Target>, String),
}

impl Target {
    pub fn var(name: impl Into<String>) -> Self {
        Target::Var(name.into())
    }

    pub fn field(self, name: impl Into<String>) -> Self {
        Target::SelectField(Box::new(self), name.into())
    }

    /// The global a field path starts from.
    pub fn root(&self) -> &str {
        let mut cur = self;
        loop {
            match cur {
                Target::Var(name) => return name,
                Target::SelectField(obj, _) => cur = obj,
            }
        }
    }
}

impl Expr {
    /// The global this expression reads, if any.
    pub fn root(&self) -> Option<&str> {
        match self {
            Expr::NewObject(_) => None,
            Expr::Target(t) => Some(t.root()),
        }
    }
}

impl Stmt {
    pub fn assign(to: Target, from: Expr, weak: bool) -> Self {
        Stmt::Assign(Box::new(AssignStmt { to, from, weak }))
    }

    pub fn thread(body: Vec<Stmt>) -> Self {
        Stmt::NewThread(Box::new(ThreadStmt {
            body,
            captures: CaptureSet::new(),
        }))
    }
}
