//! Liveness pre-pass.
//!
//! Walks each statement list backwards and inserts `EndOfLife(name)` right
//! after the last statement of that list using `name`. A `thread` statement
//! uses every name its body uses, nested threads included, and that set
//! becomes the thread's capture set.
use arc_ir::{CaptureSet, Program, Stmt};

type FastHashSet<T> = hashbrown::HashSet<T, ahash::RandomState>;

/// Prepare `program` in place and record the sorted set of every global it
/// names in `program.globals`. Running it twice gives the same result.
pub fn prepare(program: &mut Program) {
    let used = prepare_block(&mut program.stmts);
    program.globals = sorted(used);
}

fn sorted(names: FastHashSet<String>) -> Vec<String> {
    let mut out: Vec<String> = names.into_iter().collect();
    out.sort_unstable();
    out
}

/// Returns every name used in `stmts`, transitively.
fn prepare_block(stmts: &mut Vec<Stmt>) -> FastHashSet<String> {
    stmts.retain(|s| !matches!(s, Stmt::EndOfLife(_)));

    let mut alive: FastHashSet<String> = FastHashSet::default();
    let mut out: Vec<Stmt> = Vec::with_capacity(stmts.len() * 2);
    for mut stmt in std::mem::take(stmts).into_iter().rev() {
        let mut used = names_used(&mut stmt);
        used.sort_unstable();
        used.dedup();
        // `out` is built in reverse, so markers go in before their statement.
        for name in used.into_iter().rev() {
            if !alive.contains(&name) {
                alive.insert(name.clone());
                out.push(Stmt::EndOfLife(name));
            }
        }
        out.push(stmt);
    }
    out.reverse();
    *stmts = out;
    alive
}

fn names_used(stmt: &mut Stmt) -> Vec<String> {
    match stmt {
        Stmt::Assign(a) => {
            let mut names = vec![a.to.root().to_string()];
            names.extend(a.from.root().map(str::to_string));
            names
        }
        Stmt::Dump(e) => e.root().map(str::to_string).into_iter().collect(),
        Stmt::NewThread(t) => {
            let captured = sorted(prepare_block(&mut t.body));
            t.captures = captured.iter().cloned().collect::<CaptureSet>();
            captured
        }
        Stmt::Sleep | Stmt::Sleepr | Stmt::EndOfLife(_) => Vec::new(),
    }
}
