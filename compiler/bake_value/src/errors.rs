//! Failure signaling for the value protocol and the machine.
//!
//! Every failure is an [`EvalError`] carrying a structured [`EvalErrorKind`]
//! plus the rendered message. Factory functions (`unsupported_operation`,
//! `undefined_name`, ...) are the public construction API; they keep `kind`
//! and `message` in sync.
//!
//! Errors are never caught inside the runtime. They propagate with `?` to the
//! embedder, which decides whether to print and stop or to continue.

use crate::value::{Kind, Value};
use std::fmt;

/// Result of a protocol operation or an instruction.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
///
/// Tests and embedders match on the kind; the `Display` impl renders the
/// message stored on [`EvalError`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Protocol
    /// A protocol operation received operand kinds it has no rule for.
    UnsupportedOperation {
        operation: &'static str,
        operands: Vec<Kind>,
    },
    DivisionByZero,
    ModuloByZero,
    IndexOutOfRange {
        index: String,
        len: usize,
    },
    KeyNotFound {
        key: String,
    },

    // Names
    UndefinedName {
        name: String,
    },

    // Calls
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    TypeMismatch {
        expected: String,
        got: String,
    },
    CallDepthExceeded {
        limit: usize,
    },

    // Machine integrity
    StackUnderflow {
        instruction: String,
    },
    StackOverflow {
        limit: usize,
    },
    ConstantOutOfRange {
        pool: &'static str,
        index: usize,
    },
    InvalidJump {
        target: usize,
    },
    ScopeUnderflow,
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedOperation {
                operation,
                operands,
            } => {
                write!(f, "unsupported operation: {operation}(")?;
                for (i, kind) in operands.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{kind}")?;
                }
                write!(f, ")")
            }
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::ModuloByZero => write!(f, "modulo by zero"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
            Self::KeyNotFound { key } => write!(f, "key not found: {key}"),

            Self::UndefinedName { name } => write!(f, "undefined name: {name}"),

            Self::ArityMismatch {
                name,
                expected,
                got,
            } => {
                let arg_word = if *expected == 1 {
                    "argument"
                } else {
                    "arguments"
                };
                write!(f, "{name} expects {expected} {arg_word}, got {got}")
            }
            Self::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {expected}, got {got}")
            }
            Self::CallDepthExceeded { limit } => {
                write!(f, "maximum call depth exceeded (limit: {limit})")
            }

            Self::StackUnderflow { instruction } => {
                write!(f, "operand stack underflow in {instruction}")
            }
            Self::StackOverflow { limit } => {
                write!(f, "operand stack overflow (limit: {limit})")
            }
            Self::ConstantOutOfRange { pool, index } => {
                write!(f, "{pool} constant {index} out of range")
            }
            Self::InvalidJump { target } => write!(f, "jump target {target} out of range"),
            Self::ScopeUnderflow => write!(f, "cannot leave the root scope"),
        }
    }
}

/// Runtime failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    /// Structured category for programmatic matching.
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()`.
    pub message: String,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError { kind, message }
    }

    /// `true` if this is an [`EvalErrorKind::UnsupportedOperation`] for `operation`.
    pub fn is_unsupported(&self, operation: &str) -> bool {
        matches!(
            &self.kind,
            EvalErrorKind::UnsupportedOperation { operation: op, .. } if *op == operation
        )
    }

    /// Operand kinds named by an unsupported-operation error.
    pub fn operand_kinds(&self) -> &[Kind] {
        match &self.kind {
            EvalErrorKind::UnsupportedOperation { operands, .. } => operands,
            _ => &[],
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

// Protocol errors

/// A unary protocol operation is undefined for the receiver's kind.
#[cold]
pub fn unsupported_unary(operation: &'static str, receiver: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnsupportedOperation {
        operation,
        operands: vec![receiver.kind()],
    })
}

/// A binary protocol operation is undefined for the `(left, right)` kinds.
#[cold]
pub fn unsupported_binary(operation: &'static str, left: &Value, right: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnsupportedOperation {
        operation,
        operands: vec![left.kind(), right.kind()],
    })
}

/// A protocol operation is undefined for the receiver plus argument list.
#[cold]
pub fn unsupported_operation(
    operation: &'static str,
    receiver: &Value,
    args: &[Value],
) -> EvalError {
    let mut operands = Vec::with_capacity(args.len() + 1);
    operands.push(receiver.kind());
    operands.extend(args.iter().map(Value::kind));
    EvalError::from_kind(EvalErrorKind::UnsupportedOperation {
        operation,
        operands,
    })
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ModuloByZero)
}

/// Index outside `0..len`. The index is kept as text because it may not fit
/// in a machine word.
#[cold]
pub fn index_out_of_range(index: impl fmt::Display, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfRange {
        index: index.to_string(),
        len,
    })
}

#[cold]
pub fn key_not_found(key: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::KeyNotFound { key: key.repr() })
}

// Name errors

#[cold]
pub fn undefined_name(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedName {
        name: name.to_string(),
    })
}

// Call errors

#[cold]
pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

#[cold]
pub fn call_depth_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CallDepthExceeded { limit })
}

// Machine errors

#[cold]
pub fn stack_underflow(instruction: impl fmt::Debug) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackUnderflow {
        instruction: format!("{instruction:?}"),
    })
}

#[cold]
pub fn stack_overflow(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { limit })
}

#[cold]
pub fn constant_out_of_range(pool: &'static str, index: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ConstantOutOfRange { pool, index })
}

#[cold]
pub fn invalid_jump(target: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidJump { target })
}

#[cold]
pub fn scope_underflow() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ScopeUnderflow)
}

#[cfg(test)]
mod tests;
