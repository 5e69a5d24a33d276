use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_kind_of_each_variant() {
    let cases = [
        (Value::Nil, Kind::Nil),
        (Value::TRUE, Kind::Bool),
        (Value::int(1), Kind::Int),
        (Value::float(1.0), Kind::Float),
        (Value::string("s"), Kind::Str),
        (Value::list(vec![]), Kind::List),
        (Value::set([]), Kind::Set),
        (Value::dict([]), Kind::Dict),
        (Value::native("f", |_| Ok(Value::Nil)), Kind::Func),
    ];
    for (value, kind) in cases {
        assert_eq!(value.kind(), kind);
    }
}

#[test]
fn test_kind_display() {
    assert_eq!(Kind::Dict.to_string(), "Dict");
    assert_eq!(Kind::Nil.name(), "Nil");
}

#[test]
fn test_factory_methods() {
    let s = Value::string("hello");
    assert_eq!(s.as_str(), Some("hello"));

    let list = Value::list(vec![Value::int(1), Value::int(2)]);
    assert_eq!(list.to_vec().map(|items| items.len()), Some(2));

    assert_eq!(Value::bool(true).as_bool(), Some(true));
    assert_eq!(Value::int(7).as_i64(), Some(7));
    assert_eq!(Value::float(2.5).as_float(), Some(2.5));
    assert!(Value::NIL.is_nil());
}

#[test]
fn test_set_factory_drops_equal_duplicates() {
    let set = Value::set([Value::int(1), Value::float(1.0), Value::int(2)]);
    assert_eq!(set.size(), Ok(2));
    assert_eq!(set.repr(), "{1, 2}");
}

#[test]
fn test_dict_factory_later_pair_wins() {
    let dict = Value::dict([
        (Value::string("a"), Value::int(1)),
        (Value::string("a"), Value::int(2)),
    ]);
    assert_eq!(dict.repr(), "{\"a\": 2}");
}

#[test]
fn test_big_int_does_not_fit_i64() {
    let big = Value::bigint(BigInt::from(i64::MAX) + 1);
    assert_eq!(big.as_i64(), None);
    assert!(big.as_int().is_some());
}

#[test]
fn test_from_conversions() {
    assert_eq!(Value::from(true), Value::TRUE);
    assert_eq!(Value::from(3i32), Value::int(3));
    assert_eq!(Value::from(3i64), Value::int(3));
    assert_eq!(Value::from(0.5), Value::float(0.5));
    assert_eq!(Value::from("x"), Value::string("x"));
    assert_eq!(Value::from(String::from("x")), Value::string("x"));
    assert_eq!(Value::from(BigInt::from(9)), Value::int(9));
    assert_eq!(Value::from(vec![Value::Nil]).repr(), "[nil]");
}

#[test]
fn test_clone_shares_container() {
    let a = Value::list(vec![]);
    let b = a.clone();
    a.append(Value::int(1)).unwrap();
    assert_eq!(b.repr(), "[1]");
}

#[test]
fn test_debug_and_display() {
    assert_eq!(format!("{:?}", Value::Nil), "Nil");
    assert_eq!(format!("{:?}", Value::string("s")), "Str(\"s\")");
    assert_eq!(
        format!("{:?}", Value::native("print", |_| Ok(Value::Nil))),
        "Func(print)"
    );
    assert_eq!(format!("{}", Value::string("s")), "s");
    assert_eq!(format!("{}", Value::list(vec![Value::string("s")])), "[\"s\"]");
}

#[test]
fn test_func_accessor_invokes() {
    let f = Value::native("twice", |args| args[0].add(&args[0]));
    let func = f.as_func().unwrap();
    assert_eq!(func.name(), "twice");
    assert_eq!(func.invoke(&[Value::int(4)]), Ok(Value::int(8)));
}
