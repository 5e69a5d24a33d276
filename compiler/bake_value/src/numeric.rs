//! Numeric promotion rules.
//!
//! `Int ⊕ Int` stays exact on `BigInt`. As soon as a `Float` is involved the
//! `Int` side is replaced by its closest double and the operation runs on
//! `f64`. Comparison and hashing use the same double approximation so that
//! `Int(3) == Float(3.0)` and both hash alike.
//!
//! Integer division truncates toward zero and the remainder takes the sign of
//! the dividend (`-7 / 2 == -3`, `-7 % 2 == -1`).

use num_bigint::{BigInt, Sign};
use num_traits::{FromPrimitive, ToPrimitive, Zero};
use std::cmp::Ordering;

use crate::value::Value;

/// Operand pair after promotion.
pub(crate) enum Promoted<'a> {
    Ints(&'a BigInt, &'a BigInt),
    Floats(f64, f64),
}

/// Promote two numeric operands, or `None` if either is not numeric.
pub(crate) fn promote<'a>(left: &'a Value, right: &'a Value) -> Option<Promoted<'a>> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(Promoted::Ints(a, b)),
        (Value::Int(a), Value::Float(b)) => Some(Promoted::Floats(int_to_f64(a), *b)),
        (Value::Float(a), Value::Int(b)) => Some(Promoted::Floats(*a, int_to_f64(b))),
        (Value::Float(a), Value::Float(b)) => Some(Promoted::Floats(*a, *b)),
        _ => None,
    }
}

/// Closest double to `n`; magnitudes beyond `f64::MAX` become infinite.
pub fn int_to_f64(n: &BigInt) -> f64 {
    n.to_f64().unwrap_or(match n.sign() {
        Sign::Minus => f64::NEG_INFINITY,
        Sign::NoSign | Sign::Plus => f64::INFINITY,
    })
}

/// Truncate a finite float toward zero; `None` for NaN and infinities.
pub fn f64_to_int(f: f64) -> Option<BigInt> {
    if f.is_finite() {
        BigInt::from_f64(f.trunc())
    } else {
        None
    }
}

/// Truncating quotient, `None` for a zero divisor.
pub(crate) fn int_div(a: &BigInt, b: &BigInt) -> Option<BigInt> {
    if b.is_zero() {
        None
    } else {
        Some(a / b)
    }
}

/// Remainder with the dividend's sign, `None` for a zero divisor.
pub(crate) fn int_rem(a: &BigInt, b: &BigInt) -> Option<BigInt> {
    if b.is_zero() {
        None
    } else {
        Some(a % b)
    }
}

/// Order two promoted operands; `None` when a NaN is involved.
pub(crate) fn compare(promoted: &Promoted<'_>) -> Option<Ordering> {
    match promoted {
        Promoted::Ints(a, b) => Some(a.cmp(b)),
        Promoted::Floats(a, b) => a.partial_cmp(b),
    }
}

/// Bits used to hash a number. `-0.0` folds onto `0.0`.
pub(crate) fn hash_bits(f: f64) -> u64 {
    if f == 0.0 {
        0.0f64.to_bits()
    } else {
        f.to_bits()
    }
}
