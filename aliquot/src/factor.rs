use std::{collections::BTreeMap, fmt};

use num_traits::{One, Zero};

use crate::{
    natural::{Natural, nat},
    observer::Operation,
    utils::error::{AliquotError, AliquotResult},
};

/// Factors `n` by trial division.
///
/// Returns the prime factors of `n` with repetition, in ascending order. Candidate
/// divisors are tried until their square exceeds what remains of `n`; any leftover
/// greater than one is then itself prime and closes the sequence. The worst case is
/// `O(√n)` divisions, which makes this the bottleneck of the whole crate.
///
/// `factorize(1)` is empty and `factorize(0)` fails with
/// [`AliquotError::InvalidInput`].
pub fn factorize(n: &Natural) -> AliquotResult<Vec<Natural>> {
    if n.is_zero() {
        return Err(AliquotError::InvalidInput {
            operation: Operation::Factorize,
            value: n.clone(),
        });
    }

    let mut factors = Vec::new();
    let mut remaining = n.clone();
    let mut candidate = nat(2);

    while &candidate * &candidate <= remaining {
        while (&remaining % &candidate).is_zero() {
            remaining /= &candidate;
            factors.push(candidate.clone());
        }
        // 2, then odd candidates only
        candidate += if candidate == nat(2) { 1u32 } else { 2u32 };
    }

    if remaining > Natural::one() {
        factors.push(remaining);
    }

    Ok(factors)
}

/// Prime factorization grouped as `prime -> exponent`.
///
/// Primes are distinct and kept in ascending order, every exponent is at least one,
/// and the product of `prime^exponent` over all entries is the factored number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Factorization {
    factors: BTreeMap<Natural, u32>,
}

impl Factorization {
    /// Groups a flat sequence of primes (with repetition) by multiplicity.
    pub fn from_primes<I>(primes: I) -> Self
    where
        I: IntoIterator<Item = Natural>,
    {
        let mut factors = BTreeMap::new();
        for prime in primes {
            *factors.entry(prime).or_insert(0) += 1;
        }
        Self { factors }
    }

    /// Factors `n` and groups the result. See [`factorize`].
    pub fn of(n: &Natural) -> AliquotResult<Self> {
        factorize(n).map(Self::from_primes)
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    pub fn exponent(&self, prime: &Natural) -> Option<u32> {
        self.factors.get(prime).copied()
    }

    /// Iterates over `(prime, exponent)` pairs in ascending prime order.
    pub fn iter(&self) -> impl Iterator<Item = (&Natural, u32)> + '_ {
        self.factors.iter().map(|(prime, exponent)| (prime, *exponent))
    }

    /// The number this factorization describes.
    pub fn product(&self) -> Natural {
        self.iter()
            .map(|(prime, exponent)| prime.pow(exponent))
            .fold(Natural::one(), |acc, term| acc * term)
    }

    /// Sum of all divisors, the factored number included.
    ///
    /// Each prime power contributes the geometric series
    /// `1 + p + … + p^e = (p^(e+1) - 1) / (p - 1)`. The division is exact for every
    /// prime, so the whole computation stays in integer arithmetic.
    pub fn divisor_sum(&self) -> Natural {
        self.iter()
            .map(|(prime, exponent)| (prime.pow(exponent + 1) - 1u32) / (prime - 1u32))
            .fold(Natural::one(), |acc, term| acc * term)
    }
}

impl fmt::Display for Factorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "1");
        }

        for (i, (prime, exponent)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " · ")?;
            }
            match exponent {
                1 => write!(f, "{}", prime)?,
                _ => write!(f, "{}^{}", prime, exponent)?,
            }
        }
        Ok(())
    }
}
