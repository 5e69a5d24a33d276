use super::*;
use bake_value::EvalErrorKind;
use pretty_assertions::assert_eq;

#[test]
fn declare_and_get() {
    let mut env = Environment::new();
    env.declare("x", Value::int(1));
    assert_eq!(env.get("x").unwrap(), Value::int(1));
}

#[test]
fn redeclare_in_same_scope_overwrites() {
    let mut env = Environment::new();
    env.declare("x", Value::int(1));
    env.declare("x", Value::string("two"));
    assert_eq!(env.get("x").unwrap(), Value::string("two"));
}

#[test]
fn child_scope_shadows_parent() {
    let mut env = Environment::new();
    env.declare("x", Value::int(1));

    env.enter_scope();
    env.declare("x", Value::int(2));
    assert_eq!(env.get("x").unwrap(), Value::int(2));

    env.leave_scope().unwrap();
    assert_eq!(env.get("x").unwrap(), Value::int(1));
}

#[test]
fn set_targets_outer_declaration() {
    let mut env = Environment::new();
    env.declare("x", Value::int(1));

    env.enter_scope();
    env.set("x", Value::int(5)).unwrap();
    env.leave_scope().unwrap();

    assert_eq!(env.get("x").unwrap(), Value::int(5));
}

#[test]
fn set_targets_nearest_declaration() {
    let mut env = Environment::new();
    env.declare("x", Value::int(1));
    env.enter_scope();
    env.declare("x", Value::int(2));
    env.enter_scope();
    env.set("x", Value::int(3)).unwrap();
    assert_eq!(env.get("x").unwrap(), Value::int(3));
    env.leave_scope().unwrap();
    env.leave_scope().unwrap();
    assert_eq!(env.get("x").unwrap(), Value::int(1));
}

#[test]
fn undefined_name_on_get_and_set() {
    let mut env = Environment::new();
    env.enter_scope();
    let err = env.get("missing").unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedName {
            name: "missing".to_string()
        }
    );
    let err = env.set("missing", Value::Nil).unwrap_err();
    assert_eq!(err.message, "undefined name: missing");
    assert!(!env.contains("missing"));
}

#[test]
fn set_never_creates_binding() {
    let mut env = Environment::new();
    assert!(env.set("y", Value::int(1)).is_err());
    assert!(!env.contains("y"));
}

#[test]
fn leaving_root_is_an_error() {
    let mut env = Environment::new();
    assert!(env.is_root());
    let err = env.leave_scope().unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::ScopeUnderflow);
    assert_eq!(env.depth(), 1);
}

#[test]
fn depth_tracks_entered_scopes() {
    let mut env = Environment::new();
    env.enter_scope();
    env.enter_scope();
    assert_eq!(env.depth(), 3);
    assert!(!env.is_root());
    env.leave_scope().unwrap();
    assert_eq!(env.depth(), 2);
}

#[test]
fn from_scope_sees_defining_chain() {
    let mut outer = Environment::new();
    outer.declare("g", Value::int(10));
    outer.enter_scope();
    outer.declare("local", Value::int(1));
    let captured = outer.current_scope();

    let mut call = Environment::from_scope(LocalScope::new(Scope::with_parent(captured)));
    call.declare("arg", Value::int(2));
    assert_eq!(call.get("g").unwrap(), Value::int(10));
    assert_eq!(call.get("local").unwrap(), Value::int(1));

    call.set("local", Value::int(7)).unwrap();
    assert_eq!(outer.get("local").unwrap(), Value::int(7));
    assert!(!outer.contains("arg"));
    assert!(call.leave_scope().is_err());
}

#[test]
fn current_scope_is_shared_handle() {
    let mut env = Environment::new();
    let scope = env.current_scope();
    env.declare("x", Value::Nil);
    assert!(scope.borrow().local("x").is_some());
    assert!(scope.ptr_eq(&env.current_scope()));
    assert_eq!(scope.borrow().len(), 1);
    assert!(scope.borrow().parent().is_none());
}

#[test]
fn lookup_through_long_chain() {
    let mut env = Environment::new();
    env.declare("deep", Value::TRUE);
    for _ in 0..1_000 {
        env.enter_scope();
    }
    assert_eq!(env.get("deep").unwrap(), Value::TRUE);
}
