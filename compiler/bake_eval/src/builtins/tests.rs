use super::*;
use crate::print_handler::buffer_handler;
use bake_value::EvalErrorKind;
use pretty_assertions::assert_eq;

fn prelude() -> (Environment, SharedPrintHandler) {
    let handler = buffer_handler();
    let mut env = Environment::new();
    register_prelude(&mut env, handler.clone());
    (env, handler)
}

#[test]
fn constants_are_declared() {
    let (env, _) = prelude();
    assert!(env.get("nil").unwrap().is_nil());
    assert_eq!(env.get("true").unwrap().as_bool(), Some(true));
    assert_eq!(env.get("false").unwrap().as_bool(), Some(false));
}

#[test]
fn print_renders_str_and_returns_nil() {
    let (env, handler) = prelude();
    let print = env.get("print").unwrap();
    let result = print
        .call(&[Value::string("x ="), Value::int(3), Value::string("!")])
        .unwrap();
    assert!(result.is_nil());
    assert_eq!(handler.output(), "x = 3 !\n");
}

#[test]
fn print_uses_repr_inside_containers() {
    let (env, handler) = prelude();
    let print = env.get("print").unwrap();
    print
        .call(&[Value::list(vec![Value::string("a"), Value::Nil])])
        .unwrap();
    assert_eq!(handler.output(), "[\"a\", nil]\n");
}

#[test]
fn str_and_repr_differ_on_strings() {
    let s = Value::string("hi");
    assert_eq!(function_val_str(&[s.clone()]).unwrap().as_str(), Some("hi"));
    assert_eq!(function_val_repr(&[s]).unwrap().as_str(), Some("\"hi\""));
}

#[test]
fn len_counts_elements_and_characters() {
    let list = Value::list(vec![Value::int(1), Value::int(2), Value::int(3)]);
    assert_eq!(function_val_len(&[list]).unwrap().as_i64(), Some(3));
    assert_eq!(
        function_val_len(&[Value::string("héllo")]).unwrap().as_i64(),
        Some(5)
    );
}

#[test]
fn len_of_int_is_unsupported() {
    let err = function_val_len(&[Value::int(1)]).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::UnsupportedOperation { .. }));
}

#[test]
fn int_truncates_floats_toward_zero() {
    assert_eq!(function_val_int(&[Value::Float(2.9)]).unwrap().as_i64(), Some(2));
    assert_eq!(function_val_int(&[Value::Float(-2.9)]).unwrap().as_i64(), Some(-2));
}

#[test]
fn int_parses_big_decimal_strings() {
    let digits = "123456789012345678901234567890";
    let value = function_val_int(&[Value::string(digits)]).unwrap();
    assert_eq!(value.repr(), digits);
}

#[test]
fn int_rejects_non_finite_and_garbage() {
    let err = function_val_int(&[Value::Float(f64::NAN)]).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::TypeMismatch { .. }));

    let err = function_val_int(&[Value::string("12abc")]).unwrap_err();
    assert_eq!(
        err.message,
        "type mismatch: expected decimal integer, got \"12abc\""
    );

    let err = function_val_int(&[Value::Nil]).unwrap_err();
    assert_eq!(err.message, "type mismatch: expected Int, Float or Str, got Nil");
}

#[test]
fn float_converts_ints_and_strings() {
    assert_eq!(function_val_float(&[Value::int(2)]).unwrap().as_float(), Some(2.0));
    assert_eq!(
        function_val_float(&[Value::string(" 1.5 ")]).unwrap().as_float(),
        Some(1.5)
    );
}

#[test]
fn conversions_check_arity() {
    let err = function_val_str(&[]).unwrap_err();
    assert_eq!(err.message, "str expects 1 argument, got 0");

    let err = function_val_int(&[Value::int(1), Value::int(2)]).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::ArityMismatch {
            name: "int".to_string(),
            expected: 1,
            got: 2,
        }
    );
}
