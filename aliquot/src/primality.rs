use num_traits::One;

use crate::{
    modpow::modpow,
    natural::{Natural, nat},
};

/// Miller-Rabin witnesses tried by [`is_prime`].
pub const WITNESSES: [u64; 4] = [2, 3, 5, 7];

/// Smallest strong pseudoprime to every base in [`WITNESSES`].
///
/// [`is_prime`] is only exact for `n < DETERMINISTIC_BOUND`. At and above the bound a
/// composite may be reported as prime (`3_215_031_751 = 151 · 751 · 28351` is the
/// first such number).
pub const DETERMINISTIC_BOUND: u64 = 3_215_031_751;

/// Returns `true` when [`is_prime`] is guaranteed to be exact for `n`.
#[inline]
pub fn is_within_deterministic_bound(n: &Natural) -> bool {
    *n < nat(DETERMINISTIC_BOUND)
}

/// Deterministic Miller-Rabin primality test over the witnesses `{2, 3, 5, 7}`.
///
/// Values below 2 are not prime. The answer is exact below [`DETERMINISTIC_BOUND`],
/// which covers every range this crate is meant to scan; above it the result is
/// only probable.
pub fn is_prime(n: &Natural) -> bool {
    is_prime_with(n, modpow)
}

/// Same as [`is_prime`] with a custom modular exponentiation step, called as
/// `modpow(base, exponent, modulus)` once per witness tried.
pub fn is_prime_with<F>(n: &Natural, mut modpow: F) -> bool
where
    F: FnMut(&Natural, &Natural, &Natural) -> Natural,
{
    if *n < nat(2) {
        return false;
    }

    // n - 1 = d * 2^r with d odd
    let n_minus_one = n - 1u32;
    let r = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> r;

    for witness in WITNESSES {
        let a = nat(witness);
        if *n == a {
            return true;
        }
        if is_composite_witness_from(n, modpow(&a, &d, n), r) {
            return false;
        }
    }

    true
}

/// Returns `true` if `a` proves `n` composite, given `n - 1 = d * 2^r` with `d` odd.
///
/// Requires `a < n`.
pub fn is_composite_witness(n: &Natural, a: &Natural, d: &Natural, r: u64) -> bool {
    is_composite_witness_from(n, modpow(a, d, n), r)
}

/// Squaring phase of the witness test, starting from `x = a^d mod n`.
fn is_composite_witness_from(n: &Natural, mut x: Natural, r: u64) -> bool {
    let n_minus_one = n - 1u32;

    if x.is_one() || x == n_minus_one {
        return false;
    }

    for _ in 1..r {
        x = &x * &x % n;
        if x == n_minus_one {
            return false;
        }
    }

    true
}
