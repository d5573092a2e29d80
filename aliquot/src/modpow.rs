use num_traits::{One, Zero};

use crate::natural::Natural;

/// Computes `base^exponent mod modulus` by binary exponentiation.
///
/// The bits of `exponent` are scanned from least to most significant: the running
/// base is squared at every step and multiplied into the accumulator whenever the
/// current bit is set. Every product is reduced modulo `modulus`, so intermediate
/// values stay below `modulus²`. This takes `O(log exponent)` multiplications.
///
/// A modulus of 1 yields 0.
///
/// # Panics
///
/// Panics if `modulus` is zero.
pub fn modpow(base: &Natural, exponent: &Natural, modulus: &Natural) -> Natural {
    assert!(!modulus.is_zero(), "modpow requires a non-zero modulus");

    let mut result = Natural::one() % modulus;
    let mut base = base % modulus;
    for bit in 0..exponent.bits() {
        if exponent.bit(bit) {
            result = result * &base % modulus;
        }
        base = &base * &base % modulus;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::natural::nat;

    #[test]
    fn small_powers() {
        assert_eq!(modpow(&nat(2), &nat(10), &nat(1000)), nat(24));
        assert_eq!(modpow(&nat(3), &nat(0), &nat(7)), nat(1));
        assert_eq!(modpow(&nat(0), &nat(5), &nat(7)), nat(0));
        assert_eq!(modpow(&nat(10), &nat(3), &nat(7)), nat(6));
    }

    #[test]
    fn unit_modulus_is_zero() {
        assert_eq!(modpow(&nat(5), &nat(0), &nat(1)), nat(0));
        assert_eq!(modpow(&nat(5), &nat(3), &nat(1)), nat(0));
    }

    #[test]
    fn agrees_with_bigint_modpow() {
        let modulus = nat(1_000_000_007);
        for (base, exponent) in [(2u64, 1_000_000_006u64), (123_456_789, 987_654), (7, 65)] {
            assert_eq!(
                modpow(&nat(base), &nat(exponent), &modulus),
                nat(base).modpow(&nat(exponent), &modulus)
            );
        }
    }

    #[test]
    #[should_panic]
    fn zero_modulus_panics() {
        modpow(&nat(2), &nat(3), &nat(0));
    }
}
