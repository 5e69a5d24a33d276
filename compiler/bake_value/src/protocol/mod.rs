//! The value protocol.
//!
//! Every operation the machine performs on a value goes through one of the
//! methods defined here or in [`crate::operators`]. An operation with no rule
//! for its operand kinds fails with `UnsupportedOperation` naming the
//! operation and the kinds involved; nothing is coerced silently.
//!
//! - `compare`: `equal`, `not_equal`, `less_than`, `hash_code`
//! - `render`: `repr`, `str`
//! - this module: truthiness, copying, size, calls, subscripts and
//!   container mutation

mod compare;
mod render;

use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};

use crate::errors::{
    index_out_of_range, key_not_found, unsupported_binary, unsupported_operation,
    unsupported_unary, EvalError, EvalResult,
};
use crate::value::{Shared, Value, ValueTable};

impl Value {
    /// Truthiness.
    ///
    /// `nil`, `false`, zero, the empty string and empty containers are false;
    /// everything else (functions included) is true.
    pub fn truth(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            Value::Int(n) => !n.is_zero(),
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.borrow().is_empty(),
            Value::Set(table) => !table.borrow().is_empty(),
            Value::Dict(table) => !table.borrow().is_empty(),
            Value::Func(_) => true,
        }
    }

    /// Shallow copy: a new container holding the same elements.
    ///
    /// Immutable payloads are shared, which is indistinguishable from copying.
    pub fn copy(&self) -> Value {
        match self {
            Value::List(items) => Value::list(items.borrow().clone()),
            Value::Set(table) => Value::from_set_table(table.borrow().clone()),
            Value::Dict(table) => Value::from_dict_table(table.borrow().clone()),
            _ => self.clone(),
        }
    }

    /// Number of elements; a `Str` counts characters.
    pub fn size(&self) -> Result<usize, EvalError> {
        match self {
            Value::Str(s) => Ok(s.chars().count()),
            Value::List(items) => Ok(items.borrow().len()),
            Value::Set(table) => Ok(table.borrow().len()),
            Value::Dict(table) => Ok(table.borrow().len()),
            _ => Err(unsupported_unary("size", self)),
        }
    }

    /// Invoke the value with positional arguments.
    ///
    /// A `Func` runs its closure. A `List` called with a single `Int` returns
    /// the element at that index.
    pub fn call(&self, args: &[Value]) -> EvalResult {
        match (self, args) {
            (Value::Func(func), _) => func.invoke(args),
            (Value::List(items), [Value::Int(index)]) => list_index(&items.borrow(), index),
            _ => Err(unsupported_operation("call", self, args)),
        }
    }

    /// `receiver[key]`: list and string indexing, dict lookup.
    pub fn subscript(&self, key: &Value) -> EvalResult {
        match (self, key) {
            (Value::List(items), Value::Int(index)) => list_index(&items.borrow(), index),
            (Value::Str(s), Value::Int(index)) => index
                .to_usize()
                .and_then(|i| s.chars().nth(i))
                .map(|c| Value::string(c.to_string()))
                .ok_or_else(|| index_out_of_range(&**index, s.chars().count())),
            (Value::Dict(table), _) => table
                .borrow()
                .get(key)
                .cloned()
                .ok_or_else(|| key_not_found(key)),
            _ => Err(unsupported_binary("subscript", self, key)),
        }
    }

    /// `receiver[key] = value` on a list (existing index) or a dict.
    pub fn set_item(&self, key: &Value, value: Value) -> Result<(), EvalError> {
        match (self, key) {
            (Value::List(items), Value::Int(index)) => {
                let len = items.borrow().len();
                match index.to_usize().filter(|&i| i < len) {
                    Some(i) => {
                        items.borrow_mut()[i] = value;
                        Ok(())
                    }
                    None => Err(index_out_of_range(&**index, len)),
                }
            }
            (Value::Dict(table), _) => {
                store_entry(table, key.clone(), value);
                Ok(())
            }
            _ => Err(unsupported_binary("set_item", self, key)),
        }
    }

    /// Push `item` onto the end of a list.
    pub fn append(&self, item: Value) -> Result<(), EvalError> {
        match self {
            Value::List(items) => {
                items.borrow_mut().push(item);
                Ok(())
            }
            _ => Err(unsupported_binary("append", self, &item)),
        }
    }

    /// Add `item` to a set; an element equal to an existing one is ignored.
    pub fn insert(&self, item: Value) -> Result<(), EvalError> {
        match self {
            Value::Set(table) => {
                store_entry(table, item, ());
                Ok(())
            }
            _ => Err(unsupported_binary("insert", self, &item)),
        }
    }

    /// Membership: list element, set element, dict key or substring.
    pub fn contains(&self, item: &Value) -> Result<bool, EvalError> {
        match (self, item) {
            (Value::List(items), _) => Ok(items.borrow().iter().any(|x| x.equal(item))),
            (Value::Set(table), _) => Ok(table.borrow().contains_key(item)),
            (Value::Dict(table), _) => Ok(table.borrow().contains_key(item)),
            (Value::Str(haystack), Value::Str(needle)) => Ok(haystack.contains(needle.as_str())),
            _ => Err(unsupported_binary("contains", self, item)),
        }
    }

    /// The receiver if it is truthy, otherwise `other`.
    pub fn logical_or(&self, other: &Value) -> Value {
        if self.truth() {
            self.clone()
        } else {
            other.clone()
        }
    }

    /// The receiver if it is falsy, otherwise `other`.
    pub fn logical_and(&self, other: &Value) -> Value {
        if self.truth() {
            other.clone()
        } else {
            self.clone()
        }
    }
}

fn list_index(items: &[Value], index: &BigInt) -> EvalResult {
    index
        .to_usize()
        .and_then(|i| items.get(i))
        .cloned()
        .ok_or_else(|| index_out_of_range(index, items.len()))
}

/// Insert or overwrite an entry of a shared table.
///
/// The slot is found under a shared borrow: hashing and comparing `key` may
/// read the table's own container when it contains itself.
pub(crate) fn store_entry<V>(table: &Shared<ValueTable<V>>, key: Value, value: V) {
    let hash = key.hash_code();
    let slot = table.borrow().find_by(hash, |candidate| candidate.equal(&key));
    table.borrow_mut().store(slot, hash, key, value);
}
