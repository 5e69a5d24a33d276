//! Textual forms: `repr` (unambiguous) and `str` (human-facing).

use rustc_hash::FxHashSet;
use std::fmt::Write as _;

use bake_stack::ensure_sufficient_stack;

use crate::value::Value;

impl Value {
    /// Unambiguous textual form.
    ///
    /// ```text
    /// nil  true  42  2.5  "hi"  [1, "a"]  {1, 2}  set()  {"k": 1}  <func print>
    /// ```
    ///
    /// A container reached again while it is being rendered prints as
    /// `[...]` or `{...}`.
    pub fn repr(&self) -> String {
        let mut out = String::new();
        let mut active = FxHashSet::default();
        write_repr(self, &mut out, &mut active);
        out
    }

    /// Human-facing textual form: a `Str`'s raw content, `repr` otherwise.
    pub fn str(&self) -> String {
        match self {
            Value::Str(s) => s.to_string(),
            _ => self.repr(),
        }
    }
}

fn write_repr(value: &Value, out: &mut String, active: &mut FxHashSet<usize>) {
    ensure_sufficient_stack(|| match value {
        Value::Nil => out.push_str("nil"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Int(n) => {
            let _ = write!(out, "{}", &**n);
        }
        Value::Float(f) => {
            let _ = write!(out, "{f:?}");
        }
        Value::Str(s) => {
            let _ = write!(out, "{:?}", s.as_str());
        }
        Value::List(items) => {
            if !active.insert(items.addr()) {
                out.push_str("[...]");
                return;
            }
            out.push('[');
            for (i, item) in items.borrow().iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_repr(item, out, active);
            }
            out.push(']');
            active.remove(&items.addr());
        }
        Value::Set(table) => {
            if !active.insert(table.addr()) {
                out.push_str("{...}");
                return;
            }
            let entries = table.borrow();
            if entries.is_empty() {
                out.push_str("set()");
            } else {
                out.push('{');
                for (i, key) in entries.keys().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_repr(key, out, active);
                }
                out.push('}');
            }
            active.remove(&table.addr());
        }
        Value::Dict(table) => {
            if !active.insert(table.addr()) {
                out.push_str("{...}");
                return;
            }
            out.push('{');
            for (i, (key, item)) in table.borrow().iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_repr(key, out, active);
                out.push_str(": ");
                write_repr(item, out, active);
            }
            out.push('}');
            active.remove(&table.addr());
        }
        Value::Func(func) => {
            let _ = write!(out, "<func {}>", func.name());
        }
    });
}
