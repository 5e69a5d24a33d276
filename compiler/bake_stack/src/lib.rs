//! Stack growth for recursive value traversals and nested calls.
//!
//! `repr`, `equal` and `less_than` recurse into nested containers, and every
//! call of a compiled function re-enters the dispatch loop. A list nested a few
//! hundred thousand levels deep would overflow the default thread stack, so
//! every recursive step goes through [`ensure_sufficient_stack`], which
//! switches to a freshly allocated segment when the remaining stack runs low.
//!
//! On `wasm32` the closure is called directly.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, growing the native stack first if less than the red zone remains.
///
/// ```text
/// fn depth(value: &Value) -> usize {
///     ensure_sufficient_stack(|| match value {
///         Value::List(items) => 1 + items.borrow().iter().map(depth).max().unwrap_or(0),
///         _ => 0,
///     })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
