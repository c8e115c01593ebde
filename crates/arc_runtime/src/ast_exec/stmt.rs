use std::thread;
use std::time::Duration;

use arc_ir::{AssignStmt, Stmt};
use rand::Rng;

use super::Interpreter;
use crate::core::Reference;
use crate::errors::RuntimeError;

impl<'scope, 'env> Interpreter<'scope, 'env> {
    pub(super) fn exec_stmt(&mut self, stmt: &'env Stmt) -> Result<(), RuntimeError> {
        match stmt {
            Stmt::Assign(a) => self.exec_assign(a),
            Stmt::NewThread(t) => self.spawn(t),
            Stmt::Sleep => {
                thread::sleep(self.shared.config.sleep);
                Ok(())
            }
            Stmt::Sleepr => {
                let max = self.shared.config.sleepr_max;
                let pause = rand::thread_rng().gen_range(Duration::ZERO..=max);
                thread::sleep(pause);
                Ok(())
            }
            Stmt::Dump(expr) => self.exec_dump(expr),
            Stmt::EndOfLife(name) => {
                self.globals.end_of_life(name);
                Ok(())
            }
        }
    }

    fn exec_assign(&self, a: &AssignStmt) -> Result<(), RuntimeError> {
        let from = self.eval(&a.from)?;
        let value = if a.weak {
            Reference::make_weak(&from)?
        } else {
            Reference::make_strong(&from)?
        };
        drop(from);
        self.resolve(&a.to, |scope, name| scope.put(name, value))
    }
}
