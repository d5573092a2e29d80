use num_traits::{One, Zero};

use crate::{
    factor::{Factorization, factorize},
    natural::{Natural, require_at_least_two},
    observer::Operation,
    utils::error::AliquotResult,
};

/// Strategy used to compute the sum of proper divisors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum DivisorSumMethod {
    /// Closed form over the prime factorization, `O(√n)`.
    #[default]
    Factorized,
    /// Tests every candidate in `1..n`, `O(n)`.
    Naive,
}

impl DivisorSumMethod {
    pub fn proper_divisor_sum(self, n: &Natural) -> AliquotResult<Natural> {
        self.proper_divisor_sum_with(n, factorize)
    }

    /// Same as [`DivisorSumMethod::proper_divisor_sum`], obtaining the prime factors
    /// from `factorize` when the method needs them.
    pub fn proper_divisor_sum_with<F>(self, n: &Natural, factorize: F) -> AliquotResult<Natural>
    where
        F: FnOnce(&Natural) -> AliquotResult<Vec<Natural>>,
    {
        require_at_least_two(Operation::ProperDivisorSum, n)?;
        match self {
            Self::Factorized => {
                let factorization = Factorization::from_primes(factorize(n)?);
                Ok(proper_divisor_sum_from(n, &factorization))
            }
            Self::Naive => proper_divisor_sum_naive(n),
        }
    }
}

/// Sum of the proper divisors of `n` (every divisor except `n` itself).
///
/// Computed from the prime factorization as `σ(n) - n`, see
/// [`Factorization::divisor_sum`]. Fails with
/// [`AliquotError::InvalidInput`](crate::utils::error::AliquotError::InvalidInput)
/// for 0 and 1.
pub fn proper_divisor_sum(n: &Natural) -> AliquotResult<Natural> {
    DivisorSumMethod::Factorized.proper_divisor_sum(n)
}

/// Sum of the proper divisors of `n` given its factorization.
pub fn proper_divisor_sum_from(n: &Natural, factorization: &Factorization) -> Natural {
    debug_assert_eq!(&factorization.product(), n);
    // σ(n) ≥ n + 1 for n ≥ 2
    factorization.divisor_sum() - n
}

/// Brute-force sum of the proper divisors of `n`.
///
/// Much slower than [`proper_divisor_sum`]; useful to cross-check it.
pub fn proper_divisor_sum_naive(n: &Natural) -> AliquotResult<Natural> {
    require_at_least_two(Operation::ProperDivisorSum, n)?;

    let mut sum = Natural::zero();
    let mut candidate = Natural::one();
    while candidate < *n {
        if (n % &candidate).is_zero() {
            sum += &candidate;
        }
        candidate += 1u32;
    }

    Ok(sum)
}
