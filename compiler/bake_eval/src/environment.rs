//! Lexical environment chain.
//!
//! A [`Scope`] maps names to values and points at its parent. An
//! [`Environment`] is the stack of scopes entered by one activation: the
//! machine's top level, or a single function call. Lookup and assignment walk
//! the parent links outward from the innermost scope.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use bake_value::{scope_underflow, undefined_name, EvalError, EvalResult, Value};
use tracing::debug;

/// A single-threaded scope handle for reference-counted interior mutability.
///
/// Scopes outlive the activation that created them when a function literal
/// captures them, so frames are shared by handle rather than owned by the
/// environment.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// One frame of bindings.
#[derive(Debug, Default)]
pub struct Scope {
    bindings: FxHashMap<String, Value>,
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    /// A root frame.
    pub fn new() -> Self {
        Scope::default()
    }

    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Bind `name` in this frame, overwriting a binding of the same frame.
    #[inline]
    pub fn declare(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    /// Binding of `name` in this frame only.
    #[inline]
    pub fn local(&self, name: &str) -> Option<Value> {
        self.bindings.get(name).cloned()
    }

    pub fn parent(&self) -> Option<&LocalScope<Scope>> {
        self.parent.as_ref()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Scope stack of one activation.
pub struct Environment {
    /// Entered scopes, innermost last. Never empty.
    scopes: Vec<LocalScope<Scope>>,
}

impl Environment {
    /// An environment with a fresh root scope.
    pub fn new() -> Self {
        Self::from_scope(LocalScope::new(Scope::new()))
    }

    /// An environment whose base frame is `scope`.
    ///
    /// Used for calls: the base frame is a child of the function's defining
    /// scope, so the whole defining chain stays visible.
    pub fn from_scope(scope: LocalScope<Scope>) -> Self {
        Environment {
            scopes: vec![scope],
        }
    }

    /// Number of scopes entered in this environment, the base frame included.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Whether the current frame is a root (has no parent).
    pub fn is_root(&self) -> bool {
        self.current().borrow().parent.is_none()
    }

    /// The innermost scope, for closure capture.
    pub fn current_scope(&self) -> LocalScope<Scope> {
        self.current().clone()
    }

    fn current(&self) -> &LocalScope<Scope> {
        // `scopes` is never empty: `leave_scope` refuses to pop the base frame.
        &self.scopes[self.scopes.len() - 1]
    }

    /// Enter a child of the current scope.
    pub fn enter_scope(&mut self) {
        let child = LocalScope::new(Scope::with_parent(self.current_scope()));
        self.scopes.push(child);
        debug!(depth = self.scopes.len(), "enter scope");
    }

    /// Leave the current scope, restoring its parent.
    pub fn leave_scope(&mut self) -> Result<(), EvalError> {
        if self.scopes.len() == 1 {
            return Err(scope_underflow());
        }
        self.scopes.pop();
        debug!(depth = self.scopes.len(), "leave scope");
        Ok(())
    }

    /// Bind `name` in the current scope, shadowing outer bindings.
    pub fn declare(&mut self, name: impl Into<String>, value: Value) {
        self.current().borrow_mut().declare(name, value);
    }

    /// Nearest binding of `name`, searching outward to the root.
    pub fn get(&self, name: &str) -> EvalResult {
        let mut scope = self.current_scope();
        loop {
            let parent = {
                let frame = scope.borrow();
                if let Some(value) = frame.bindings.get(name) {
                    return Ok(value.clone());
                }
                frame.parent.clone()
            };
            match parent {
                Some(parent) => scope = parent,
                None => return Err(undefined_name(name)),
            }
        }
    }

    /// Overwrite the nearest binding of `name`. Never creates a binding.
    pub fn set(&mut self, name: &str, value: Value) -> Result<(), EvalError> {
        let mut scope = self.current_scope();
        loop {
            let parent = {
                let mut frame = scope.borrow_mut();
                if let Some(slot) = frame.bindings.get_mut(name) {
                    *slot = value;
                    return Ok(());
                }
                frame.parent.clone()
            };
            match parent {
                Some(parent) => scope = parent,
                None => return Err(undefined_name(name)),
            }
        }
    }

    /// Whether any scope in the chain binds `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_ok()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
