use super::*;
use pretty_assertions::assert_eq;

// Kind → message

#[test]
fn unsupported_binary_names_operation_and_kinds() {
    let err = unsupported_binary("add", &Value::string("a"), &Value::int(1));
    assert_eq!(
        err.kind,
        EvalErrorKind::UnsupportedOperation {
            operation: "add",
            operands: vec![Kind::Str, Kind::Int],
        }
    );
    assert_eq!(err.message, "unsupported operation: add(Str, Int)");
    assert!(err.is_unsupported("add"));
    assert!(!err.is_unsupported("subtract"));
    assert_eq!(err.operand_kinds(), &[Kind::Str, Kind::Int]);
}

#[test]
fn unsupported_unary_has_single_operand() {
    let err = unsupported_unary("negate", &Value::Nil);
    assert_eq!(err.message, "unsupported operation: negate(Nil)");
    assert_eq!(err.operand_kinds(), &[Kind::Nil]);
}

#[test]
fn unsupported_operation_lists_receiver_then_args() {
    let err = unsupported_operation(
        "call",
        &Value::int(3),
        &[Value::string("x"), Value::float(1.5)],
    );
    assert_eq!(err.message, "unsupported operation: call(Int, Str, Float)");
}

#[test]
fn division_by_zero_has_correct_kind() {
    let err = division_by_zero();
    assert_eq!(err.kind, EvalErrorKind::DivisionByZero);
    assert_eq!(err.message, "division by zero");
}

#[test]
fn modulo_by_zero_has_correct_kind() {
    let err = modulo_by_zero();
    assert_eq!(err.kind, EvalErrorKind::ModuloByZero);
    assert_eq!(err.message, "modulo by zero");
}

#[test]
fn index_out_of_range_keeps_index_text() {
    let err = index_out_of_range(-1, 3);
    assert_eq!(
        err.kind,
        EvalErrorKind::IndexOutOfRange {
            index: "-1".to_string(),
            len: 3
        }
    );
    assert_eq!(err.message, "index -1 out of range for length 3");
}

#[test]
fn key_not_found_uses_repr() {
    let err = key_not_found(&Value::string("k"));
    assert_eq!(err.message, "key not found: \"k\"");
}

#[test]
fn undefined_name_has_correct_kind() {
    let err = undefined_name("x");
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedName {
            name: "x".to_string()
        }
    );
    assert_eq!(err.message, "undefined name: x");
}

#[test]
fn arity_mismatch_pluralizes() {
    assert_eq!(arity_mismatch("f", 1, 2).message, "f expects 1 argument, got 2");
    assert_eq!(arity_mismatch("g", 2, 0).message, "g expects 2 arguments, got 0");
}

#[test]
fn type_mismatch_message() {
    let err = type_mismatch("Int", "Str");
    assert_eq!(err.message, "type mismatch: expected Int, got Str");
}

#[test]
fn machine_errors_render() {
    assert_eq!(
        call_depth_exceeded(8).message,
        "maximum call depth exceeded (limit: 8)"
    );
    assert_eq!(stack_underflow("Add").message, "operand stack underflow in \"Add\"");
    assert_eq!(stack_overflow(4).message, "operand stack overflow (limit: 4)");
    assert_eq!(
        constant_out_of_range("string", 7).message,
        "string constant 7 out of range"
    );
    assert_eq!(invalid_jump(99).message, "jump target 99 out of range");
    assert_eq!(scope_underflow().message, "cannot leave the root scope");
}

#[test]
fn display_matches_message() {
    let err = undefined_name("y");
    assert_eq!(err.to_string(), err.message);
    assert_eq!(err.kind.to_string(), err.message);
}

#[test]
fn non_unsupported_errors_have_no_operands() {
    assert!(division_by_zero().operand_kinds().is_empty());
    assert!(!division_by_zero().is_unsupported("divide"));
}
