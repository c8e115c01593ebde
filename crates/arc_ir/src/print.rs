//! Source-like rendering of the tree. Synthetic nodes are printed in a form
//! the parser does not accept (`EndOfLife(x)`, `thread [x, y] { .. }`).
use std::fmt::{self, Display, Formatter, Write};

use crate::{AssignStmt, Expr, Program, Stmt, Target, ThreadStmt};

const INDENT: &str = "    ";

impl Display for Target {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Target::Var(name) => f.write_str(name),
            Target::SelectField(obj, name) => write!(f, "{obj}.{name}"),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::NewObject(None) => f.write_str("object"),
            Expr::NewObject(Some(name)) => write!(f, "object({name})"),
            Expr::Target(t) => t.fmt(f),
        }
    }
}

impl Display for AssignStmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let op = if self.weak { "~=" } else { "=" };
        write!(f, "{} {op} {}", self.to, self.from)
    }
}

fn write_stmt(out: &mut String, stmt: &Stmt, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    match stmt {
        Stmt::Assign(a) => writeln!(out, "{a}"),
        Stmt::NewThread(t) => write_thread(out, t, depth),
        Stmt::Sleep => writeln!(out, "sleep"),
        Stmt::Sleepr => writeln!(out, "sleepr"),
        Stmt::Dump(e) => writeln!(out, "dump {e}"),
        Stmt::EndOfLife(name) => writeln!(out, "EndOfLife({name})"),
    }
}

fn write_thread(out: &mut String, t: &ThreadStmt, depth: usize) -> fmt::Result {
    out.push_str("thread ");
    if !t.captures.is_empty() {
        write!(out, "[{}] ", t.captures.join(", "))?;
    }
    out.push_str("{\n");
    for s in &t.body {
        write_stmt(out, s, depth + 1)?;
    }
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push_str("}\n");
    Ok(())
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        write_stmt(&mut out, self, 0)?;
        f.write_str(out.trim_end_matches('\n'))
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        for s in &self.stmts {
            write_stmt(&mut out, s, 0)?;
        }
        f.write_str(&out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prints_nested_threads_with_captures() {
        let mut inner = Stmt::thread(vec![Stmt::Sleep, Stmt::EndOfLife("a".into())]);
        if let Stmt::NewThread(t) = &mut inner {
            t.captures.push("a".into());
        }
        let prog = Program::new(vec![
            Stmt::assign(
                Target::var("a").field("next"),
                Expr::NewObject(Some("n".into())),
                false,
            ),
            Stmt::thread(vec![inner, Stmt::Dump(Expr::Target(Target::var("a")))]),
        ]);
        assert_eq!(
            prog.to_string(),
            "a.next = object(n)\n\
             thread {\n\
             \x20   thread [a] {\n\
             \x20       sleep\n\
             \x20       EndOfLife(a)\n\
             \x20   }\n\
             \x20   dump a\n\
             }\n"
        );
    }

    #[test]
    fn weak_assign_uses_tilde() {
        let s = Stmt::assign(
            Target::var("w"),
            Expr::Target(Target::var("x").field("f")),
            true,
        );
        assert_eq!(s.to_string(), "w ~= x.f");
    }
}
