//! Instruction stream plus constant pools, as produced by a front end.

use num_bigint::BigInt;

use bake_value::{constant_out_of_range, EvalError};

use super::Instruction;

/// A compiled function literal.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionProto {
    pub name: String,
    pub params: Vec<String>,
    pub code: Vec<Instruction>,
}

impl FunctionProto {
    pub fn new(name: impl Into<String>, params: &[&str], code: Vec<Instruction>) -> Self {
        FunctionProto {
            name: name.into(),
            params: params.iter().map(|p| (*p).to_string()).collect(),
            code,
        }
    }
}

/// Top-level code and the pools it indexes. Immutable once handed to a
/// machine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Program {
    pub code: Vec<Instruction>,
    pub functions: Vec<FunctionProto>,
    /// String literals and identifier names.
    pub strings: Vec<String>,
    pub integers: Vec<BigInt>,
    pub floats: Vec<f64>,
}

impl Program {
    pub fn new(code: Vec<Instruction>) -> Self {
        Program {
            code,
            ..Program::default()
        }
    }

    #[must_use]
    pub fn with_strings<S: Into<String>>(mut self, strings: impl IntoIterator<Item = S>) -> Self {
        self.strings = strings.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_integers(mut self, integers: impl IntoIterator<Item = BigInt>) -> Self {
        self.integers = integers.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_floats(mut self, floats: Vec<f64>) -> Self {
        self.floats = floats;
        self
    }

    #[must_use]
    pub fn with_functions(mut self, functions: Vec<FunctionProto>) -> Self {
        self.functions = functions;
        self
    }

    pub(crate) fn string(&self, index: usize) -> Result<&str, EvalError> {
        self.strings
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| constant_out_of_range("string", index))
    }

    pub(crate) fn integer(&self, index: usize) -> Result<&BigInt, EvalError> {
        self.integers
            .get(index)
            .ok_or_else(|| constant_out_of_range("integer", index))
    }

    pub(crate) fn float(&self, index: usize) -> Result<f64, EvalError> {
        self.floats
            .get(index)
            .copied()
            .ok_or_else(|| constant_out_of_range("float", index))
    }

    pub(crate) fn function(&self, index: usize) -> Result<&FunctionProto, EvalError> {
        self.functions
            .get(index)
            .ok_or_else(|| constant_out_of_range("function", index))
    }
}
