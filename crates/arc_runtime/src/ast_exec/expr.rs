use arc_ir::{Expr, Target};

use super::Interpreter;
use crate::core::{Object, Reference, Scope};
use crate::errors::RuntimeError;

impl Interpreter<'_, '_> {
    /// Evaluate to an owned copy of the stored reference, variant preserved.
    pub(super) fn eval(&self, expr: &Expr) -> Result<Reference, RuntimeError> {
        match expr {
            Expr::NewObject(name) => Ok(Reference::new_strong(Object::alloc(name.clone()))),
            Expr::Target(t) => self.read(t),
        }
    }

    /// Copy out whatever `target` currently holds.
    fn read(&self, target: &Target) -> Result<Reference, RuntimeError> {
        match target {
            Target::Var(name) => self.globals.get(name),
            Target::SelectField(obj, field) => self.read(obj)?.get()?.fields().get(field),
        }
    }

    /// Find the scope `target` lives in and run `f` on it. For a field the
    /// owning object is held strongly until `f` returns.
    pub(super) fn resolve<R>(
        &self,
        target: &Target,
        f: impl FnOnce(&dyn Scope, &str) -> Result<R, RuntimeError>,
    ) -> Result<R, RuntimeError> {
        match target {
            Target::Var(name) => f(&self.globals, name.as_str()),
            Target::SelectField(obj, field) => {
                let holder = self.read(obj)?.get()?;
                f(holder.fields(), field.as_str())
            }
        }
    }
}
