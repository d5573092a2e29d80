//! Number-theoretic engine for perfect, amicable and sociable numbers.
//!
//! The crate is layered bottom-up, and no layer calls into a layer above it:
//!  - [`modpow`]: square-and-multiply modular exponentiation.
//!  - [`primality`]: deterministic Miller-Rabin over the witnesses `{2, 3, 5, 7}`.
//!  - [`factor`]: trial-division factorization.
//!  - [`divisor`]: closed-form sum of proper divisors built on a factorization.
//!  - [`sequence`]: iterated divisor sums until the seed reappears or the heuristic
//!    pruning rule fires.
//!  - [`classify`]: the classification of a number as perfect, amicable or sociable.
//!
//! All free functions are pure. Timing instrumentation is opt-in: build a
//! [`classify::Classifier`] with an [`observer::Observer`] to record how long each
//! operation takes.
//!
//! Example
//! ```
//! use aliquot::prelude::*;
//!
//! let result = classify(&nat(220)).unwrap();
//! assert_eq!(result.kind, Classification::Amicable);
//! assert_eq!(result.cycle, vec![nat(220), nat(284)]);
//! ```

/// Classification of numbers and the configurable [`classify::Classifier`].
pub mod classify;
/// Sum of proper divisors.
pub mod divisor;
/// Trial-division factorization.
pub mod factor;
/// Square-and-multiply modular exponentiation.
pub mod modpow;
/// The arbitrary-size integer type used throughout the crate.
pub mod natural;
/// Injectable timing instrumentation.
pub mod observer;
/// Deterministic Miller-Rabin primality test.
pub mod primality;
/// Aliquot sequence construction.
pub mod sequence;
/// Error types.
pub mod utils;

pub mod prelude {
    //! Convenient re-exports for end users.
    pub use crate::classify::{Classification, ClassificationResult, Classifier, classify};
    pub use crate::divisor::{DivisorSumMethod, proper_divisor_sum, proper_divisor_sum_naive};
    pub use crate::factor::{Factorization, factorize};
    pub use crate::modpow::modpow;
    pub use crate::natural::{Natural, nat};
    pub use crate::observer::{NoopObserver, Observer, Operation, TimingObserver, TimingReport};
    pub use crate::primality::is_prime;
    pub use crate::sequence::{AliquotSequence, build_sequence};
    pub use crate::utils::error::{AliquotError, AliquotResult};
}
