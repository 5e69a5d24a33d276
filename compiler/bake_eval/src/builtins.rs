//! Builtins declared into the root scope before user code runs.
//!
//! Conversion functions (`str`, `repr`, `int`, `float`, `len`) take exactly one
//! positional argument. `print` takes any number.

use num_bigint::BigInt;

use bake_value::numeric::{f64_to_int, int_to_f64};
use bake_value::{arity_mismatch, type_mismatch, EvalError, EvalResult, Value};

use crate::environment::Environment;
use crate::print_handler::SharedPrintHandler;

/// Declare `nil`, `true`, `false` and the builtin functions into the current
/// scope of `env`.
pub fn register_prelude(env: &mut Environment, print_handler: SharedPrintHandler) {
    env.declare("nil", Value::NIL);
    env.declare("true", Value::TRUE);
    env.declare("false", Value::FALSE);

    env.declare(
        "print",
        Value::native("print", move |args| {
            print_handler.print_values(args);
            Ok(Value::Nil)
        }),
    );

    env.declare("str", Value::native("str", function_val_str));
    env.declare("repr", Value::native("repr", function_val_repr));
    env.declare("len", Value::native("len", function_val_len));
    env.declare("int", Value::native("int", function_val_int));
    env.declare("float", Value::native("float", function_val_float));
}

fn single_arg<'a>(name: &str, args: &'a [Value]) -> Result<&'a Value, EvalError> {
    match args {
        [arg] => Ok(arg),
        _ => Err(arity_mismatch(name, 1, args.len())),
    }
}

pub fn function_val_str(args: &[Value]) -> EvalResult {
    Ok(Value::string(single_arg("str", args)?.str()))
}

pub fn function_val_repr(args: &[Value]) -> EvalResult {
    Ok(Value::string(single_arg("repr", args)?.repr()))
}

/// Element count of a container, characters of a Str.
pub fn function_val_len(args: &[Value]) -> EvalResult {
    let size = single_arg("len", args)?.size()?;
    Ok(Value::bigint(BigInt::from(size)))
}

/// Convert to Int. Floats truncate toward zero; Str parses as decimal.
pub fn function_val_int(args: &[Value]) -> EvalResult {
    match single_arg("int", args)? {
        arg @ Value::Int(_) => Ok(arg.clone()),
        Value::Float(f) => f64_to_int(*f)
            .map(Value::bigint)
            .ok_or_else(|| type_mismatch("finite float", &f.to_string())),
        Value::Str(s) => s
            .trim()
            .parse::<BigInt>()
            .map(Value::bigint)
            .map_err(|_| type_mismatch("decimal integer", &format!("{:?}", s.as_str()))),
        other => Err(type_mismatch("Int, Float or Str", other.kind().name())),
    }
}

/// Convert to Float.
pub fn function_val_float(args: &[Value]) -> EvalResult {
    match single_arg("float", args)? {
        Value::Float(f) => Ok(Value::Float(*f)),
        Value::Int(n) => Ok(Value::Float(int_to_f64(n))),
        Value::Str(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| type_mismatch("decimal number", &format!("{:?}", s.as_str()))),
        other => Err(type_mismatch("Int, Float or Str", other.kind().name())),
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
