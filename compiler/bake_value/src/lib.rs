//! Bake Value - tagged runtime values for the bake runtime.
//!
//! This crate provides:
//! - The closed `Value` union (`Nil`, `Bool`, `Int`, `Float`, `Str`, `List`,
//!   `Set`, `Dict`, `Func`) and its factory methods
//! - The value protocol: equality, ordering, hashing, truthiness, textual
//!   forms, calls, subscripts and container mutation
//! - Arithmetic operators with `Int`/`Float` promotion
//! - Evaluation error types (`EvalError`, `EvalResult`)
//!
//! # Sharing
//!
//! Containers are shared by handle. Two values holding the same list observe
//! each other's in-place mutation; `Value::copy` makes an independent shallow
//! copy. Containers may form cycles, and every traversal (`equal`,
//! `hash_code`, `repr`) terminates on them.

mod errors;
pub mod numeric;
mod operators;
mod protocol;
mod value;

pub use errors::{
    arity_mismatch, call_depth_exceeded, constant_out_of_range, division_by_zero, index_out_of_range,
    invalid_jump, key_not_found, modulo_by_zero, scope_underflow, stack_overflow, stack_underflow,
    type_mismatch, undefined_name, unsupported_binary, unsupported_operation, unsupported_unary,
    EvalError, EvalErrorKind, EvalResult,
};
pub use operators::{evaluate_binary, BinaryOp};
pub use value::{DictTable, FuncValue, Heap, Kind, NativeFn, SetTable, Shared, Value, ValueTable};
