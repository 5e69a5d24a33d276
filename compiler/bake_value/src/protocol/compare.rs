//! Equality, ordering and hashing.
//!
//! # Cycles
//!
//! Containers may contain themselves. `equal` tracks the container pairs it
//! is currently comparing and treats a re-entered pair as equal, so two
//! cyclic structures of the same shape compare equal instead of looping.
//! `less_than` tracks list pairs the same way but has no answer for a
//! re-entered pair and fails with `UnsupportedOperation`.
//!
//! `hash_code` never recurses more than [`HASH_DEPTH`] levels; below that a
//! container contributes only its kind and length. Equal values agree on kind
//! and length at every depth, so the bounded hash stays consistent with
//! `equal` for cyclic values too. The bound also keeps a list holding itself
//! many times from costing `len^depth`.
//!
//! # Sets and dicts
//!
//! `Int`/`Float` equality is not transitive: `2^53` and `2^53 + 1` are
//! distinct ints that both equal the float `2^53`. Two sets are equal only
//! when their keys pair off one to one, so a single key on one side can
//! never stand in for two on the other.

use rustc_hash::{FxHashSet, FxHasher};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use bake_stack::ensure_sufficient_stack;

use smallvec::SmallVec;

use crate::errors::{unsupported_binary, EvalError};
use crate::numeric::{self, Promoted};
use crate::value::{Value, ValueTable};

/// Container nesting explored by `hash_code`.
const HASH_DEPTH: usize = 2;

const TAG_NIL: u8 = 0;
const TAG_BOOL: u8 = 1;
const TAG_NUMBER: u8 = 2;
const TAG_STR: u8 = 3;
const TAG_LIST: u8 = 4;
const TAG_SET: u8 = 5;
const TAG_DICT: u8 = 6;
const TAG_FUNC: u8 = 7;

/// Container pairs currently being compared.
type ActivePairs = FxHashSet<(usize, usize)>;

impl Value {
    /// Deterministic content hash. Values that are `equal` hash alike.
    pub fn hash_code(&self) -> u64 {
        hash_at(self, 0)
    }

    /// Equality protocol. Never fails.
    ///
    /// - `Nil` equals only `Nil`, `Bool` only a `Bool` of the same value.
    /// - `Int` and `Float` compare through the `Int`'s closest double.
    /// - `Str`/`List`/`Set`/`Dict` compare content with the same kind
    ///   (lists positionally, sets and dicts as unordered collections).
    /// - `Func` equals only itself.
    pub fn equal(&self, other: &Value) -> bool {
        let mut active = ActivePairs::default();
        equal_in(self, other, &mut active)
    }

    pub fn not_equal(&self, other: &Value) -> bool {
        !self.equal(other)
    }

    /// Ordering protocol.
    ///
    /// Defined for numbers (mixed `Int`/`Float` allowed), strings and lists
    /// (lexicographic). Any other pair is an `UnsupportedOperation`, never
    /// a silent `false`, and so is a list pair that the comparison re-enters
    /// through a cycle.
    pub fn less_than(&self, other: &Value) -> Result<bool, EvalError> {
        let mut active = ActivePairs::default();
        less_than_in(self, other, &mut active)
    }
}

fn equal_in(a: &Value, b: &Value, active: &mut ActivePairs) -> bool {
    ensure_sufficient_stack(|| match (a, b) {
        (Value::Nil, Value::Nil) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            match numeric::promote(a, b) {
                Some(Promoted::Ints(x, y)) => x == y,
                Some(Promoted::Floats(x, y)) => x == y,
                None => false,
            }
        }
        (Value::Str(x), Value::Str(y)) => x.as_str() == y.as_str(),
        (Value::List(x), Value::List(y)) => with_pair(active, x.addr(), y.addr(), |active| {
            let (x, y) = (x.borrow(), y.borrow());
            x.len() == y.len()
                && x
                    .iter()
                    .zip(y.iter())
                    .all(|(left, right)| equal_in(left, right, active))
        }),
        (Value::Set(x), Value::Set(y)) => with_pair(active, x.addr(), y.addr(), |active| {
            let (x, y) = (x.borrow(), y.borrow());
            pair_off(&x, &y, |i, j| equal_in(x.entry_at(i).0, y.entry_at(j).0, active))
        }),
        (Value::Dict(x), Value::Dict(y)) => with_pair(active, x.addr(), y.addr(), |active| {
            let (x, y) = (x.borrow(), y.borrow());
            pair_off(&x, &y, |i, j| {
                let ((key_x, value_x), (key_y, value_y)) = (x.entry_at(i), y.entry_at(j));
                equal_in(key_x, key_y, active) && equal_in(value_x, value_y, active)
            })
        }),
        (Value::Func(x), Value::Func(y)) => x.ptr_eq(y),
        _ => false,
    })
}

/// Compare a container pair once; a pair already on the path counts as equal.
fn with_pair(
    active: &mut ActivePairs,
    a: usize,
    b: usize,
    compare: impl FnOnce(&mut ActivePairs) -> bool,
) -> bool {
    if a == b || !active.insert((a, b)) {
        return true;
    }
    let result = compare(active);
    active.remove(&(a, b));
    result
}

fn less_than_in(a: &Value, b: &Value, active: &mut ActivePairs) -> Result<bool, EvalError> {
    ensure_sufficient_stack(|| {
        if let Some(promoted) = numeric::promote(a, b) {
            return Ok(numeric::compare(&promoted) == Some(Ordering::Less));
        }
        match (a, b) {
            (Value::Str(x), Value::Str(y)) => Ok(x.as_str() < y.as_str()),
            (Value::List(x), Value::List(y)) => {
                let pair = (x.addr(), y.addr());
                if !active.insert(pair) {
                    return Err(unsupported_binary("less_than", a, b));
                }
                let result = {
                    let (x, y) = (x.borrow(), y.borrow());
                    less_than_items(&x, &y, active)
                };
                active.remove(&pair);
                result
            }
            _ => Err(unsupported_binary("less_than", a, b)),
        }
    })
}

/// Lexicographic order: the first unequal pair decides, then length.
fn less_than_items(
    x: &[Value],
    y: &[Value],
    active: &mut ActivePairs,
) -> Result<bool, EvalError> {
    for (left, right) in x.iter().zip(y) {
        if !left.equal(right) {
            return less_than_in(left, right, active);
        }
    }
    Ok(x.len() < y.len())
}

/// Whether every key of `x` pairs with a distinct key of `y` under `matches`.
///
/// `matches(i, j)` compares slot `i` of `x` with slot `j` of `y`; only slots
/// sharing a hash are tried. Keys take the first free candidate and fall back
/// to re-routing earlier pairs along an augmenting path.
fn pair_off<V>(
    x: &ValueTable<V>,
    y: &ValueTable<V>,
    mut matches: impl FnMut(usize, usize) -> bool,
) -> bool {
    if x.len() != y.len() {
        return false;
    }
    let mut candidates: Vec<SmallVec<[usize; 2]>> = Vec::with_capacity(x.len());
    for (i, key) in x.keys().enumerate() {
        let found: SmallVec<[usize; 2]> = y
            .slots(key.hash_code())
            .iter()
            .copied()
            .filter(|&j| matches(i, j))
            .collect();
        if found.is_empty() {
            return false;
        }
        candidates.push(found);
    }

    // owner[j]: the slot of `x` currently paired with slot `j` of `y`.
    let mut owner: Vec<Option<usize>> = vec![None; y.len()];
    // seen[j] == round marks slot `j` as visited by the current search.
    let mut seen = vec![0usize; y.len()];
    for (i, options) in candidates.iter().enumerate() {
        match options.iter().copied().find(|&j| owner[j].is_none()) {
            Some(j) => owner[j] = Some(i),
            None => {
                if !augment(i, i + 1, &candidates, &mut owner, &mut seen) {
                    return false;
                }
            }
        }
    }
    true
}

fn augment(
    i: usize,
    round: usize,
    candidates: &[SmallVec<[usize; 2]>],
    owner: &mut [Option<usize>],
    seen: &mut [usize],
) -> bool {
    ensure_sufficient_stack(|| {
        for &j in &candidates[i] {
            if seen[j] == round {
                continue;
            }
            seen[j] = round;
            let free = match owner[j] {
                None => true,
                Some(k) => augment(k, round, candidates, owner, seen),
            };
            if free {
                owner[j] = Some(i);
                return true;
            }
        }
        false
    })
}

fn hash_at(value: &Value, depth: usize) -> u64 {
    let mut state = FxHasher::default();
    match value {
        Value::Nil => TAG_NIL.hash(&mut state),
        Value::Bool(b) => {
            TAG_BOOL.hash(&mut state);
            b.hash(&mut state);
        }
        Value::Int(n) => {
            TAG_NUMBER.hash(&mut state);
            numeric::hash_bits(numeric::int_to_f64(n)).hash(&mut state);
        }
        Value::Float(f) => {
            TAG_NUMBER.hash(&mut state);
            numeric::hash_bits(*f).hash(&mut state);
        }
        Value::Str(s) => {
            TAG_STR.hash(&mut state);
            s.as_str().hash(&mut state);
        }
        Value::List(items) => {
            let items = items.borrow();
            TAG_LIST.hash(&mut state);
            items.len().hash(&mut state);
            if depth < HASH_DEPTH {
                for item in items.iter() {
                    hash_at(item, depth + 1).hash(&mut state);
                }
            }
        }
        Value::Set(table) => {
            let table = table.borrow();
            TAG_SET.hash(&mut state);
            table.len().hash(&mut state);
            if depth < HASH_DEPTH {
                // Order-independent: sets compare as unordered collections.
                table
                    .keys()
                    .fold(0u64, |sum, key| sum.wrapping_add(hash_at(key, depth + 1)))
                    .hash(&mut state);
            }
        }
        Value::Dict(table) => {
            let table = table.borrow();
            TAG_DICT.hash(&mut state);
            table.len().hash(&mut state);
            if depth < HASH_DEPTH {
                table
                    .iter()
                    .fold(0u64, |sum, (key, value)| {
                        let mut entry = FxHasher::default();
                        hash_at(key, depth + 1).hash(&mut entry);
                        hash_at(value, depth + 1).hash(&mut entry);
                        sum.wrapping_add(entry.finish())
                    })
                    .hash(&mut state);
            }
        }
        Value::Func(func) => {
            TAG_FUNC.hash(&mut state);
            func.addr().hash(&mut state);
        }
    }
    state.finish()
}
