//! `dump` rendering.
//!
//! Counts leave out the handles the dump itself holds while printing.
use std::fmt::Write;

use arc_ir::Expr;

use super::Interpreter;
use crate::core::{ObjectHandle, Reference};
use crate::errors::RuntimeError;

impl Interpreter<'_, '_> {
    pub(super) fn exec_dump(&self, expr: &Expr) -> Result<(), RuntimeError> {
        let value = self.eval(expr)?;
        let mut line = String::with_capacity(96);
        let _ = write!(line, "dump {expr}: ");
        render_reference(&mut line, &value);
        drop(value);
        self.shared.write_line(&line);
        Ok(())
    }
}

fn render_reference(out: &mut String, value: &Reference) {
    let mut num = itoa::Buffer::new();
    match value {
        Reference::Empty => out.push_str("empty"),
        Reference::Strong(obj) => {
            out.push_str("strong(");
            push_identity(out, obj);
            out.push_str("), obj refCounter = ");
            out.push_str(num.format(obj.counter().saturating_sub(1)));
            push_fields(out, obj);
        }
        Reference::Weak(proxy) => {
            let weak = proxy.counter().saturating_sub(1);
            out.push_str("weak(");
            push_addr(out, proxy.addr());
            out.push_str(" -> ");
            match proxy.upgrade() {
                Some(obj) => {
                    push_identity(out, &obj);
                    out.push_str("), weak refCounter = ");
                    out.push_str(num.format(weak));
                    out.push_str(", obj refCounter = ");
                    out.push_str(num.format(obj.counter().saturating_sub(1)));
                    push_fields(out, &obj);
                }
                None => {
                    out.push_str("0), weak refCounter = ");
                    out.push_str(num.format(weak));
                    out.push_str(", obj collected");
                }
            }
        }
    }
}

fn push_addr(out: &mut String, addr: usize) {
    let _ = write!(out, "{addr:#x}");
}

fn push_identity(out: &mut String, obj: &ObjectHandle) {
    if let Some(name) = obj.name() {
        out.push_str(name);
        out.push('@');
    }
    push_addr(out, obj.addr());
}

fn push_fields(out: &mut String, obj: &ObjectHandle) {
    out.push_str(", fields = {");
    let entries = obj.fields().snapshot();
    for (i, (name, field)) in entries.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(name);
        out.push_str(": ");
        match field {
            Reference::Empty => out.push_str("empty"),
            Reference::Strong(target) => {
                out.push_str("strong(");
                push_identity(out, target);
                out.push(')');
            }
            Reference::Weak(proxy) => {
                out.push_str("weak(");
                push_addr(out, proxy.addr());
                out.push_str(" -> ");
                match proxy.upgrade() {
                    Some(target) => push_identity(out, &target),
                    None => out.push('0'),
                }
                out.push(')');
            }
        }
    }
    out.push('}');
}
