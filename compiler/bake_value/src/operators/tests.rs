use super::*;
use crate::errors::EvalErrorKind;
use crate::value::Kind;
use num_bigint::BigInt;
use pretty_assertions::assert_eq;

fn big(text: &str) -> Value {
    Value::bigint(text.parse::<BigInt>().unwrap())
}

// Numeric promotion

#[test]
fn int_plus_float_is_float() {
    assert_eq!(Value::int(3).add(&Value::float(0.5)), Ok(Value::float(3.5)));
    assert!(matches!(Value::int(3).add(&Value::float(0.5)), Ok(Value::Float(_))));
}

#[test]
fn int_plus_int_is_exact() {
    let sum = Value::int(3).add(&Value::int(4)).unwrap();
    assert!(matches!(sum, Value::Int(_)));
    assert_eq!(sum.repr(), "7");
}

#[test]
fn forty_digit_addition_is_exact() {
    let a = big("1234567890123456789012345678901234567890");
    let b = big("9876543210987654321098765432109876543210");
    assert_eq!(
        a.add(&b).unwrap().repr(),
        "11111111101111111110111111111011111111100"
    );
    assert_eq!(
        a.multiply(&Value::int(10)).unwrap().repr(),
        "12345678901234567890123456789012345678900"
    );
}

#[test]
fn integer_division_truncates() {
    assert_eq!(Value::int(7).divide(&Value::int(2)), Ok(Value::int(3)));
    assert_eq!(Value::int(-7).divide(&Value::int(2)), Ok(Value::int(-3)));
    assert_eq!(Value::int(-7).modulo(&Value::int(2)), Ok(Value::int(-1)));
    assert_eq!(Value::int(7).divide(&Value::float(2.0)), Ok(Value::float(3.5)));
}

#[test]
fn zero_divisor_errors() {
    let err = Value::int(1).divide(&Value::int(0)).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::DivisionByZero);
    let err = Value::int(1).modulo(&Value::int(0)).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::ModuloByZero);
    assert_eq!(
        Value::float(1.0).divide(&Value::int(0)),
        Ok(Value::float(f64::INFINITY))
    );
}

#[test]
fn negate_numbers() {
    assert_eq!(Value::int(5).negate(), Ok(Value::int(-5)));
    assert_eq!(Value::float(-1.5).negate(), Ok(Value::float(1.5)));
    assert!(Value::string("x").negate().unwrap_err().is_unsupported("negate"));
}

// Non-numeric rules

#[test]
fn string_concatenation() {
    assert_eq!(
        Value::string("foo").add(&Value::string("bar")),
        Ok(Value::string("foobar"))
    );
}

#[test]
fn list_add_builds_new_list() {
    let a = Value::list(vec![Value::int(1)]);
    let b = Value::list(vec![Value::int(2)]);
    let c = a.add(&b).unwrap();
    assert_eq!(c.repr(), "[1, 2]");
    assert_eq!(a.repr(), "[1]");
}

#[test]
fn set_difference() {
    let a = Value::set([Value::int(1), Value::int(2), Value::int(3)]);
    let b = Value::set([Value::float(2.0)]);
    assert_eq!(a.subtract(&b).unwrap().repr(), "{1, 3}");
    assert_eq!(a.size(), Ok(3));
}

#[test]
fn string_plus_int_is_unsupported() {
    let err = Value::string("a").add(&Value::int(1)).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::UnsupportedOperation {
            operation: "add",
            operands: vec![Kind::Str, Kind::Int],
        }
    );
    assert_eq!(err.message, "unsupported operation: add(Str, Int)");
}

#[test]
fn multiply_requires_numbers() {
    let err = Value::string("a").multiply(&Value::int(3)).unwrap_err();
    assert!(err.is_unsupported("multiply"));
}

// In-place

#[test]
fn list_iadd_mutates_receiver() {
    let acc = Value::list(vec![Value::int(1)]);
    let alias = acc.clone();
    let result = acc.iadd(&Value::list(vec![Value::int(2)])).unwrap();
    assert_eq!(alias.repr(), "[1, 2]");
    let (Value::List(a), Value::List(r)) = (&acc, &result) else {
        panic!("expected lists");
    };
    assert!(a.ptr_eq(r));
}

#[test]
fn list_iadd_with_itself() {
    let acc = Value::list(vec![Value::int(1), Value::int(2)]);
    acc.iadd(&acc.clone()).unwrap();
    assert_eq!(acc.repr(), "[1, 2, 1, 2]");
}

#[test]
fn set_iadd_unions_and_isub_removes() {
    let s = Value::set([Value::int(1)]);
    s.iadd(&Value::set([Value::int(1), Value::int(2)])).unwrap();
    assert_eq!(s.repr(), "{1, 2}");
    s.isub(&Value::set([Value::int(1)])).unwrap();
    assert_eq!(s.repr(), "{2}");
    s.isub(&s.clone()).unwrap();
    assert_eq!(s.repr(), "set()");
}

#[test]
fn iadd_on_immutable_falls_back_to_add() {
    let n = Value::int(1);
    assert_eq!(n.iadd(&Value::int(2)), Ok(Value::int(3)));
    assert_eq!(n, Value::int(1));
    assert_eq!(
        Value::string("a").iadd(&Value::string("b")),
        Ok(Value::string("ab"))
    );
}

#[test]
fn failed_iadd_names_iadd_and_leaves_receiver() {
    let acc = Value::list(vec![Value::int(1)]);
    let err = acc.iadd(&Value::int(2)).unwrap_err();
    assert!(err.is_unsupported("iadd"));
    assert_eq!(err.operand_kinds(), &[Kind::List, Kind::Int]);
    assert_eq!(acc.repr(), "[1]");
    assert!(Value::int(1).isub(&Value::Nil).unwrap_err().is_unsupported("isub"));
}

// Dispatch

#[test]
fn evaluate_binary_comparisons() {
    let (one, two) = (Value::int(1), Value::float(2.0));
    let eval = |l: &Value, r: &Value, op| evaluate_binary(l, r, op).unwrap();
    assert_eq!(eval(&one, &two, BinaryOp::Less), Value::TRUE);
    assert_eq!(eval(&one, &two, BinaryOp::Greater), Value::FALSE);
    assert_eq!(eval(&one, &one, BinaryOp::LessEqual), Value::TRUE);
    assert_eq!(eval(&two, &one, BinaryOp::GreaterEqual), Value::TRUE);
    assert_eq!(eval(&one, &two, BinaryOp::NotEqual), Value::TRUE);
    assert_eq!(eval(&one, &Value::float(1.0), BinaryOp::Equal), Value::TRUE);
}

#[test]
fn evaluate_binary_nan_orderings_are_false() {
    let nan = Value::float(f64::NAN);
    let one = Value::int(1);
    for op in [BinaryOp::Less, BinaryOp::LessEqual, BinaryOp::Greater, BinaryOp::GreaterEqual] {
        assert_eq!(evaluate_binary(&nan, &one, op), Ok(Value::FALSE));
    }
}

#[test]
fn evaluate_binary_arithmetic() {
    let r = evaluate_binary(&Value::int(9), &Value::int(4), BinaryOp::Modulo);
    assert_eq!(r, Ok(Value::int(1)));
    let err = evaluate_binary(&Value::Nil, &Value::int(4), BinaryOp::Greater).unwrap_err();
    assert!(err.is_unsupported("less_than"));
    assert_eq!(BinaryOp::InPlaceSubtract.name(), "isub");
}

#[test]
fn logical_not_uses_truth() {
    assert_eq!(Value::int(0).logical_not(), Value::TRUE);
    assert_eq!(Value::string("x").logical_not(), Value::FALSE);
}

mod properties {
    use crate::value::Value;
    use num_bigint::BigInt;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn int_add_matches_bigint(a in any::<i128>(), b in any::<i128>()) {
            let sum = Value::bigint(BigInt::from(a)).add(&Value::bigint(BigInt::from(b))).unwrap();
            prop_assert_eq!(sum.repr(), (BigInt::from(a) + BigInt::from(b)).to_string());
        }

        #[test]
        fn int_add_is_commutative(a in any::<i64>(), b in -1e6f64..1e6) {
            let (x, y) = (Value::int(a), Value::float(b));
            prop_assert_eq!(x.add(&y).unwrap(), y.add(&x).unwrap());
        }

        #[test]
        fn division_identity(a in any::<i64>(), b in any::<i64>().prop_filter("nonzero", |b| *b != 0)) {
            let (x, y) = (Value::int(a), Value::int(b));
            let q = x.divide(&y).unwrap();
            let r = x.modulo(&y).unwrap();
            prop_assert_eq!(q.multiply(&y).unwrap().add(&r).unwrap(), x);
        }
    }
}
