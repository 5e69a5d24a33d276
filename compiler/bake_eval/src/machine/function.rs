//! Compiled function literals.
//!
//! `MakeFunction` turns a [`FunctionProto`] into an ordinary `Func` value: a
//! native closure over the program, the defining scope and the shared call
//! counter. The value model never sees the machine.
//!
//! A closure stored in its own defining scope forms an `Rc` cycle and is not
//! reclaimed.
//!
//! [`FunctionProto`]: super::FunctionProto

use std::cell::Cell;
use std::rc::Rc;

use bake_stack::ensure_sufficient_stack;
use bake_value::{arity_mismatch, call_depth_exceeded, EvalError, EvalResult, Value};
use tracing::debug;

use super::exec::{run, Activation};
use super::Program;
use crate::config::MachineConfig;
use crate::environment::{Environment, LocalScope, Scope};

/// Limits and call depth shared by a machine and every function it creates.
pub(crate) struct CallContext {
    pub(crate) config: MachineConfig,
    depth: Cell<usize>,
}

impl CallContext {
    pub(crate) fn new(config: MachineConfig) -> Self {
        CallContext {
            config,
            depth: Cell::new(0),
        }
    }

    /// Compiled calls currently active.
    pub(crate) fn depth(&self) -> usize {
        self.depth.get()
    }

    fn enter(&self) -> Result<DepthGuard<'_>, EvalError> {
        let depth = self.depth.get();
        if depth >= self.config.max_call_depth {
            return Err(call_depth_exceeded(self.config.max_call_depth));
        }
        self.depth.set(depth + 1);
        Ok(DepthGuard { depth: &self.depth })
    }
}

/// Decrements the call depth when a call ends, on error paths too.
struct DepthGuard<'a> {
    depth: &'a Cell<usize>,
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}

pub(super) fn make_function(
    program: &Rc<Program>,
    index: usize,
    scope: LocalScope<Scope>,
    calls: &Rc<CallContext>,
) -> EvalResult {
    let name = program.function(index)?.name.clone();
    let program = Rc::clone(program);
    let calls = Rc::clone(calls);
    Ok(Value::native(name, move |args| {
        call_function(&program, index, &scope, &calls, args)
    }))
}

#[tracing::instrument(level = "debug", skip(program, scope, calls, args))]
fn call_function(
    program: &Rc<Program>,
    index: usize,
    scope: &LocalScope<Scope>,
    calls: &Rc<CallContext>,
    args: &[Value],
) -> EvalResult {
    let proto = program.function(index)?;
    if args.len() != proto.params.len() {
        return Err(arity_mismatch(&proto.name, proto.params.len(), args.len()));
    }
    let _depth = calls.enter()?;
    debug!(function = %proto.name, argc = args.len(), depth = calls.depth(), "call");

    let mut env = Environment::from_scope(LocalScope::new(Scope::with_parent(scope.clone())));
    for (param, arg) in proto.params.iter().zip(args) {
        env.declare(param.as_str(), arg.clone());
    }

    let mut stack = Vec::new();
    let mut activation = Activation {
        program,
        env: &mut env,
        stack: &mut stack,
        calls,
    };
    let result = ensure_sufficient_stack(|| run(&proto.code, &mut activation))?;
    Ok(result.unwrap_or(Value::Nil))
}
