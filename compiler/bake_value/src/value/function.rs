//! Callable payload of `Value::Func`.

use std::fmt;

use crate::errors::EvalResult;
use crate::value::Value;

/// Signature of the closure behind a `Func`.
pub type NativeFn = dyn Fn(&[Value]) -> EvalResult;

/// A named closure taking positional arguments and returning one value.
///
/// Builtins and machine-compiled function literals are both represented this
/// way; the value model never sees the machine.
pub struct FuncValue {
    name: String,
    callable: Box<NativeFn>,
}

impl FuncValue {
    pub fn new(name: impl Into<String>, callable: impl Fn(&[Value]) -> EvalResult + 'static) -> Self {
        FuncValue {
            name: name.into(),
            callable: Box::new(callable),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn invoke(&self, args: &[Value]) -> EvalResult {
        (self.callable)(args)
    }
}

impl fmt::Debug for FuncValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FuncValue")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
