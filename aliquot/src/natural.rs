use num_bigint::BigUint;
use num_traits::One;

use crate::{
    observer::Operation,
    utils::error::{AliquotError, AliquotResult},
};

/// An arbitrary-size non-negative integer.
///
/// Arithmetic on [`Natural`] never wraps, so no operation of this crate can
/// silently overflow.
pub type Natural = BigUint;

/// Shorthand for building a [`Natural`] from a machine integer.
#[inline]
pub fn nat(value: u64) -> Natural {
    Natural::from(value)
}

/// Fails with [`AliquotError::InvalidInput`] when `n` is 0 or 1.
///
/// The proper-divisor sum of 0 and 1 is degenerate, so every operation built on
/// it rejects those values instead of returning a meaningless number.
pub fn require_at_least_two(operation: Operation, n: &Natural) -> AliquotResult<()> {
    if *n <= Natural::one() {
        Err(AliquotError::InvalidInput {
            operation,
            value: n.clone(),
        })
    } else {
        Ok(())
    }
}
