use log::{debug, warn};
use strum::{Display, EnumIs};

use crate::{
    divisor::DivisorSumMethod,
    factor, modpow,
    natural::{Natural, require_at_least_two},
    observer::{NoopObserver, Observer, Operation, timed},
    primality::{self, is_within_deterministic_bound},
    sequence::{self, AliquotSequence, Pruning},
    utils::error::AliquotResult,
};

/// How a number behaves under the proper-divisor-sum map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIs)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum Classification {
    /// Not part of a cycle (or pruned before one was found).
    NotCandidate,
    /// Equal to the sum of its own proper divisors.
    Perfect,
    /// Member of a cycle of two distinct numbers.
    Amicable,
    /// Member of a cycle of three or more numbers.
    Sociable,
}

impl Classification {
    fn from_sequence(sequence: &AliquotSequence) -> Self {
        match sequence.period() {
            None => Self::NotCandidate,
            Some(1) => Self::Perfect,
            Some(2) => Self::Amicable,
            Some(_) => Self::Sociable,
        }
    }
}

/// Classification of a number together with the cycle that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassificationResult {
    pub kind: Classification,
    /// The cycle starting at the classified number, empty for
    /// [`Classification::NotCandidate`].
    pub cycle: Vec<Natural>,
}

impl ClassificationResult {
    pub fn not_candidate() -> Self {
        Self {
            kind: Classification::NotCandidate,
            cycle: Vec::new(),
        }
    }

    fn from_sequence(sequence: AliquotSequence) -> Self {
        match Classification::from_sequence(&sequence) {
            Classification::NotCandidate => Self::not_candidate(),
            kind => Self {
                kind,
                cycle: sequence.terms,
            },
        }
    }
}

/// Classifies `n` as perfect, amicable, sociable, or none of them.
///
/// Primes are rejected without building their sequence. Every other number is
/// followed with [`Pruning::cycle_search`], so any cycle through `n` of up to
/// [`LONGEST_KNOWN_CYCLE`](crate::sequence::LONGEST_KNOWN_CYCLE) terms is found.
/// Fails with
/// [`AliquotError::InvalidInput`](crate::utils::error::AliquotError::InvalidInput)
/// for 0 and 1.
pub fn classify(n: &Natural) -> AliquotResult<ClassificationResult> {
    Classifier::new().classify(n)
}

/// Configurable entry point to the core operations.
///
/// Every method is timed through the configured [`Observer`], nested calls
/// included: [`Classifier::classify`] reports its own duration along with the
/// durations of the primality test, the sequence construction and every divisor
/// sum and factorization performed on the way.
#[derive(Clone, Copy)]
pub struct Classifier<'o> {
    observer: &'o dyn Observer,
    method: DivisorSumMethod,
    pruning: Pruning,
    max_terms: Option<usize>,
}

impl Default for Classifier<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier<'static> {
    /// Un-instrumented classifier using the factorized divisor sum, the exact cycle
    /// search and no term cap.
    pub fn new() -> Self {
        Self {
            observer: &NoopObserver,
            method: DivisorSumMethod::Factorized,
            pruning: Pruning::cycle_search(),
            max_terms: None,
        }
    }
}

impl<'o> Classifier<'o> {
    pub fn with_observer<'a>(self, observer: &'a dyn Observer) -> Classifier<'a> {
        Classifier {
            observer,
            method: self.method,
            pruning: self.pruning,
            max_terms: self.max_terms,
        }
    }

    pub fn with_method(mut self, method: DivisorSumMethod) -> Self {
        self.method = method;
        self
    }

    /// Selects when sequences that have not returned to their seed are abandoned.
    /// [`Pruning::Descent`] reproduces the historical heuristic search.
    pub fn with_pruning(mut self, pruning: Pruning) -> Self {
        self.pruning = pruning;
        self
    }

    /// Caps the number of terms an aliquot sequence may record.
    pub fn with_max_terms(mut self, max_terms: Option<usize>) -> Self {
        self.max_terms = max_terms;
        self
    }

    pub fn method(&self) -> DivisorSumMethod {
        self.method
    }

    pub fn pruning(&self) -> Pruning {
        self.pruning
    }

    pub fn max_terms(&self) -> Option<usize> {
        self.max_terms
    }

    pub fn modpow(&self, base: &Natural, exponent: &Natural, modulus: &Natural) -> Natural {
        timed(self.observer, Operation::ModPow, || {
            modpow::modpow(base, exponent, modulus)
        })
    }

    pub fn is_prime(&self, n: &Natural) -> bool {
        timed(self.observer, Operation::IsPrime, || {
            primality::is_prime_with(n, |base, exponent, modulus| {
                self.modpow(base, exponent, modulus)
            })
        })
    }

    pub fn factorize(&self, n: &Natural) -> AliquotResult<Vec<Natural>> {
        timed(self.observer, Operation::Factorize, || factor::factorize(n))
    }

    pub fn proper_divisor_sum(&self, n: &Natural) -> AliquotResult<Natural> {
        timed(self.observer, Operation::ProperDivisorSum, || {
            self.method.proper_divisor_sum_with(n, |n| self.factorize(n))
        })
    }

    pub fn build_sequence(&self, start: &Natural) -> AliquotResult<AliquotSequence> {
        timed(self.observer, Operation::BuildSequence, || {
            sequence::build_sequence_with(start, self.pruning, self.max_terms, |n| {
                self.proper_divisor_sum(n)
            })
        })
    }

    pub fn classify(&self, n: &Natural) -> AliquotResult<ClassificationResult> {
        timed(
            self.observer,
            Operation::Classify,
            || -> AliquotResult<ClassificationResult> {
                require_at_least_two(Operation::Classify, n)?;
                if !is_within_deterministic_bound(n) {
                    warn!(
                        "{} is beyond the deterministic primality bound, the prime check is only probable",
                        n
                    );
                }

                if self.is_prime(n) {
                    return Ok(ClassificationResult::not_candidate());
                }

                let result = ClassificationResult::from_sequence(self.build_sequence(n)?);
                if !result.kind.is_not_candidate() {
                    debug!("{} is {}: {:?}", n, result.kind, result.cycle);
                }
                Ok(result)
            },
        )
    }
}
