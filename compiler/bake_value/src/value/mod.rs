//! Runtime values for the bake runtime.
//!
//! # Handle Architecture
//!
//! `Value` is a closed tagged union. Scalars (`Nil`, `Bool`, `Float`) are
//! stored inline; every other kind holds a reference-counted handle:
//!
//! - `Heap<T>` for immutable payloads (`Int`, `Str`, `Func`)
//! - `Shared<T>` for containers whose content can change in place
//!   (`List`, `Set`, `Dict`)
//!
//! Both handles have `pub(super)` constructors, so payloads can only be
//! created through the factory methods on `Value`:
//!
//! ```text
//! let s = Value::string("hello");                    // OK
//! let xs = Value::list(vec![Value::int(1)]);         // OK
//! let s = Value::Str(Heap::new("hello".into()));     // ERROR: Heap::new is private
//! ```
//!
//! Cloning a `Value` clones the handle: two clones of a list observe each
//! other's appends. Use [`Value::copy`] for an independent container.
//!
//! # Constants
//!
//! `Value::NIL`, `Value::TRUE` and `Value::FALSE` are plain enum constants;
//! nil and booleans never allocate.

mod function;
mod heap;
mod table;

use num_bigint::BigInt;
use num_traits::ToPrimitive;
use std::fmt;

pub use function::{FuncValue, NativeFn};
pub use heap::{Heap, Shared};
pub use table::ValueTable;

use crate::errors::EvalResult;

/// Storage of a `Set`.
pub type SetTable = ValueTable<()>;

/// Storage of a `Dict`.
pub type DictTable = ValueTable<Value>;

/// Discriminant of a [`Value`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Nil,
    Bool,
    Int,
    Float,
    Str,
    List,
    Set,
    Dict,
    Func,
}

impl Kind {
    pub fn name(self) -> &'static str {
        match self {
            Kind::Nil => "Nil",
            Kind::Bool => "Bool",
            Kind::Int => "Int",
            Kind::Float => "Float",
            Kind::Str => "Str",
            Kind::List => "List",
            Kind::Set => "Set",
            Kind::Dict => "Dict",
            Kind::Func => "Func",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    /// The absent value.
    Nil,
    Bool(bool),
    /// Arbitrary-precision signed integer.
    Int(Heap<BigInt>),
    /// Double-precision float.
    Float(f64),
    /// UTF-8 text.
    Str(Heap<String>),
    /// Ordered sequence.
    List(Shared<Vec<Value>>),
    /// Unique values, uniqueness by the equality protocol.
    Set(Shared<SetTable>),
    /// Mapping with keys unique by the equality protocol.
    Dict(Shared<DictTable>),
    /// Callable closure.
    Func(Heap<FuncValue>),
}

// Factory Methods (ONLY way to construct heap values)

impl Value {
    pub const NIL: Value = Value::Nil;
    pub const TRUE: Value = Value::Bool(true);
    pub const FALSE: Value = Value::Bool(false);

    #[inline]
    pub fn bool(b: bool) -> Self {
        if b {
            Value::TRUE
        } else {
            Value::FALSE
        }
    }

    /// Create an integer value from a machine integer.
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(Heap::new(BigInt::from(n)))
    }

    /// Create an integer value of any magnitude.
    #[inline]
    pub fn bigint(n: BigInt) -> Self {
        Value::Int(Heap::new(n))
    }

    #[inline]
    pub fn float(f: f64) -> Self {
        Value::Float(f)
    }

    /// Create a string value.
    ///
    /// ```text
    /// let s = Value::string("hello");
    /// let s2 = Value::string(format!("value: {x}"));
    /// ```
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    /// Create a list value.
    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Shared::new(items))
    }

    /// Create a set value; later duplicates of an equal element are dropped.
    pub fn set(items: impl IntoIterator<Item = Value>) -> Self {
        let mut table = SetTable::new();
        for item in items {
            table.insert(item, ());
        }
        Value::Set(Shared::new(table))
    }

    /// Create a dict value; a later pair with an equal key replaces the value.
    pub fn dict(pairs: impl IntoIterator<Item = (Value, Value)>) -> Self {
        let mut table = DictTable::new();
        for (key, value) in pairs {
            table.insert(key, value);
        }
        Value::Dict(Shared::new(table))
    }

    /// Wrap a native closure as a `Func`.
    ///
    /// ```text
    /// let double = Value::native("double", |args| args[0].add(&args[0]));
    /// ```
    pub fn native(
        name: impl Into<String>,
        callable: impl Fn(&[Value]) -> EvalResult + 'static,
    ) -> Self {
        Value::Func(Heap::new(FuncValue::new(name, callable)))
    }

    pub(crate) fn from_set_table(table: SetTable) -> Self {
        Value::Set(Shared::new(table))
    }

    pub(crate) fn from_dict_table(table: DictTable) -> Self {
        Value::Dict(Shared::new(table))
    }
}

// Accessors

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Nil => Kind::Nil,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Str(_) => Kind::Str,
            Value::List(_) => Kind::List,
            Value::Set(_) => Kind::Set,
            Value::Dict(_) => Kind::Dict,
            Value::Func(_) => Kind::Func,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<&BigInt> {
        match self {
            Value::Int(n) => Some(n),
            _ => None,
        }
    }

    /// The integer payload, if it fits in an `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_int().and_then(ToPrimitive::to_i64)
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// A snapshot of a list's items.
    pub fn to_vec(&self) -> Option<Vec<Value>> {
        match self {
            Value::List(items) => Some(items.borrow().clone()),
            _ => None,
        }
    }

    pub fn as_func(&self) -> Option<&FuncValue> {
        match self {
            Value::Func(func) => Some(func),
            _ => None,
        }
    }
}

// Native conversions

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::int(i64::from(n))
    }
}

impl From<BigInt> for Value {
    fn from(n: BigInt) -> Self {
        Value::bigint(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}

// Trait Implementations

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "Nil"),
            Value::Func(func) => write!(f, "Func({})", func.name()),
            _ => write!(f, "{}({})", self.kind(), self.repr()),
        }
    }
}

/// Renders the human-facing form (`str()`).
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            _ => f.write_str(&self.repr()),
        }
    }
}

/// Equality protocol; see [`Value::equal`].
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
