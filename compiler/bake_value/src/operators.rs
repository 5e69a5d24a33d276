//! Arithmetic and comparison operators.
//!
//! Numbers follow the promotion rules in [`crate::numeric`]. Beyond numbers:
//!
//! | operation  | rule                                  |
//! |------------|---------------------------------------|
//! | `add`      | `Str + Str`, `List + List` (new value)|
//! | `subtract` | `Set - Set` (new set, difference)     |
//! | `iadd`     | `List`/`Set` receivers grow in place  |
//! | `isub`     | `Set` receiver shrinks in place       |
//!
//! `iadd`/`isub` on any other receiver compute `add`/`subtract` and return a
//! new value; the caller rebinds the name.

use crate::errors::{
    division_by_zero, modulo_by_zero, unsupported_binary, unsupported_unary, EvalResult,
};
use crate::numeric::{self, Promoted};
use crate::protocol::store_entry;
use crate::value::{SetTable, Value};

/// Binary operator as dispatched by the machine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    InPlaceAdd,
    InPlaceSubtract,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl BinaryOp {
    /// Protocol operation name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Subtract => "subtract",
            BinaryOp::Multiply => "multiply",
            BinaryOp::Divide => "divide",
            BinaryOp::Modulo => "modulo",
            BinaryOp::InPlaceAdd => "iadd",
            BinaryOp::InPlaceSubtract => "isub",
            BinaryOp::Equal => "equal",
            BinaryOp::NotEqual => "not_equal",
            BinaryOp::Less | BinaryOp::LessEqual | BinaryOp::Greater | BinaryOp::GreaterEqual => {
                "less_than"
            }
        }
    }
}

/// Evaluate `left op right`.
///
/// The derived comparisons are built from `less_than` and `equal`:
/// `a <= b` is `a < b || a == b` and `a > b` is `b < a`, so a NaN operand
/// makes every ordering false.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => left.add(right),
        BinaryOp::Subtract => left.subtract(right),
        BinaryOp::Multiply => left.multiply(right),
        BinaryOp::Divide => left.divide(right),
        BinaryOp::Modulo => left.modulo(right),
        BinaryOp::InPlaceAdd => left.iadd(right),
        BinaryOp::InPlaceSubtract => left.isub(right),
        BinaryOp::Equal => Ok(Value::bool(left.equal(right))),
        BinaryOp::NotEqual => Ok(Value::bool(left.not_equal(right))),
        BinaryOp::Less => left.less_than(right).map(Value::bool),
        BinaryOp::LessEqual => Ok(Value::bool(left.less_than(right)? || left.equal(right))),
        BinaryOp::Greater => right.less_than(left).map(Value::bool),
        BinaryOp::GreaterEqual => Ok(Value::bool(right.less_than(left)? || left.equal(right))),
    }
}

impl Value {
    pub fn add(&self, other: &Value) -> EvalResult {
        if let Some(promoted) = numeric::promote(self, other) {
            return Ok(match promoted {
                Promoted::Ints(a, b) => Value::bigint(a + b),
                Promoted::Floats(a, b) => Value::Float(a + b),
            });
        }
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => {
                let mut joined = String::with_capacity(a.len() + b.len());
                joined.push_str(a);
                joined.push_str(b);
                Ok(Value::string(joined))
            }
            (Value::List(a), Value::List(b)) => {
                let mut items = a.borrow().clone();
                items.extend(b.borrow().iter().cloned());
                Ok(Value::list(items))
            }
            _ => Err(unsupported_binary("add", self, other)),
        }
    }

    pub fn subtract(&self, other: &Value) -> EvalResult {
        if let Some(promoted) = numeric::promote(self, other) {
            return Ok(match promoted {
                Promoted::Ints(a, b) => Value::bigint(a - b),
                Promoted::Floats(a, b) => Value::Float(a - b),
            });
        }
        match (self, other) {
            (Value::Set(a), Value::Set(b)) => {
                let (a, b) = (a.borrow(), b.borrow());
                let mut difference = SetTable::new();
                for key in a.keys().filter(|key| !b.contains_key(key)) {
                    difference.insert(key.clone(), ());
                }
                Ok(Value::from_set_table(difference))
            }
            _ => Err(unsupported_binary("subtract", self, other)),
        }
    }

    pub fn multiply(&self, other: &Value) -> EvalResult {
        match numeric::promote(self, other) {
            Some(Promoted::Ints(a, b)) => Ok(Value::bigint(a * b)),
            Some(Promoted::Floats(a, b)) => Ok(Value::Float(a * b)),
            None => Err(unsupported_binary("multiply", self, other)),
        }
    }

    /// Integer division truncates toward zero; float division follows IEEE 754.
    pub fn divide(&self, other: &Value) -> EvalResult {
        match numeric::promote(self, other) {
            Some(Promoted::Ints(a, b)) => numeric::int_div(a, b)
                .map(Value::bigint)
                .ok_or_else(division_by_zero),
            Some(Promoted::Floats(a, b)) => Ok(Value::Float(a / b)),
            None => Err(unsupported_binary("divide", self, other)),
        }
    }

    /// Remainder with the dividend's sign.
    pub fn modulo(&self, other: &Value) -> EvalResult {
        match numeric::promote(self, other) {
            Some(Promoted::Ints(a, b)) => numeric::int_rem(a, b)
                .map(Value::bigint)
                .ok_or_else(modulo_by_zero),
            Some(Promoted::Floats(a, b)) => Ok(Value::Float(a % b)),
            None => Err(unsupported_binary("modulo", self, other)),
        }
    }

    /// In-place add. Returns the receiver itself when it was mutated.
    pub fn iadd(&self, other: &Value) -> EvalResult {
        match (self, other) {
            (Value::List(items), Value::List(extra)) => {
                // Snapshot first: `other` may be the receiver.
                let extra = extra.borrow().clone();
                items.borrow_mut().extend(extra);
                Ok(self.clone())
            }
            (Value::Set(table), Value::Set(extra)) => {
                let extra: Vec<Value> = extra.borrow().keys().cloned().collect();
                for key in extra {
                    store_entry(table, key, ());
                }
                Ok(self.clone())
            }
            _ => self
                .add(other)
                .map_err(|_| unsupported_binary("iadd", self, other)),
        }
    }

    /// In-place subtract. Returns the receiver itself when it was mutated.
    pub fn isub(&self, other: &Value) -> EvalResult {
        match (self, other) {
            (Value::Set(table), Value::Set(removed)) => {
                let keep: Vec<bool> = {
                    let (current, removed) = (table.borrow(), removed.borrow());
                    current.keys().map(|key| !removed.contains_key(key)).collect()
                };
                table.borrow_mut().keep_only(&keep);
                Ok(self.clone())
            }
            _ => self
                .subtract(other)
                .map_err(|_| unsupported_binary("isub", self, other)),
        }
    }

    pub fn negate(&self) -> EvalResult {
        match self {
            Value::Int(n) => Ok(Value::bigint(-&**n)),
            Value::Float(f) => Ok(Value::Float(-f)),
            _ => Err(unsupported_unary("negate", self)),
        }
    }

    pub fn logical_not(&self) -> Value {
        Value::bool(!self.truth())
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
