use log::trace;

use crate::{
    divisor::proper_divisor_sum,
    natural::{Natural, require_at_least_two},
    observer::Operation,
    utils::error::{AliquotError, AliquotResult},
};

/// Length of the longest known aliquot cycle (the one through 14316).
pub const LONGEST_KNOWN_CYCLE: usize = 28;

/// Rule deciding when a sequence that has not returned to its seed is abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Pruning {
    /// Abandon the sequence as soon as a divisor sum is smaller than the term it was
    /// computed from.
    ///
    /// This is a heuristic, not a theorem. It reproduces the historical behaviour of
    /// the search, and it misses every cycle that does not rise monotonically from
    /// the seed (both 284 and 12496 are rejected by it).
    Descent,
    /// Follow the sequence for at most this many terms. A seed that belongs to a cycle
    /// of at most that length is always found. The sequence is also abandoned when it
    /// reaches 1 or revisits a term other than the seed.
    Period(usize),
}

impl Pruning {
    /// Exact search for every cycle up to the longest known one.
    pub const fn cycle_search() -> Self {
        Self::Period(LONGEST_KNOWN_CYCLE)
    }
}

/// Result of [`build_sequence`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AliquotSequence {
    /// Whether the divisor-sum map led back to the seed.
    pub closed: bool,
    /// Terms recorded before termination, the seed first. The term that equals the
    /// seed again (when `closed`) and the term that triggered termination (when not)
    /// are not recorded.
    pub terms: Vec<Natural>,
}

impl AliquotSequence {
    /// Number of terms of the cycle when `closed`.
    pub fn period(&self) -> Option<usize> {
        self.closed.then_some(self.terms.len())
    }
}

/// Outcome of a single step of the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    /// The divisor sum equals the seed.
    Closed,
    /// The sequence is abandoned without returning to the seed.
    Diverged,
    /// Record the divisor sum and keep going from it.
    Continue(Natural),
}

fn step(pruning: Pruning, start: &Natural, terms: &[Natural], sum: Natural) -> Step {
    if sum == *start {
        return Step::Closed;
    }

    match pruning {
        Pruning::Descent => {
            let current = terms.last().unwrap_or(start);
            // sum == current: the chain settled on a perfect number other than the seed
            if sum <= *current {
                Step::Diverged
            } else {
                Step::Continue(sum)
            }
        }
        Pruning::Period(max) => {
            if sum <= Natural::from(1u32) || terms.len() >= max || terms.contains(&sum) {
                Step::Diverged
            } else {
                Step::Continue(sum)
            }
        }
    }
}

/// Iterates the proper-divisor-sum map from `start` until it returns to `start` or
/// is pruned with [`Pruning::Descent`].
///
/// The sequence is abandoned (returned with `closed == false`) as soon as a divisor
/// sum is smaller than the term it was computed from, or equal to it.
///
/// Descent only bounds the walk while the sequence falls: a strictly rising chain
/// is followed until it turns, which for some seeds (966 is the first) takes well
/// over a hundred terms past `10^30`, where factorizing a term by trial division
/// no longer finishes. Use [`build_sequence_with`] with a `max_terms` cap to bound it.
///
/// Fails with [`AliquotError::InvalidInput`] when `start` is 0 or 1.
pub fn build_sequence(start: &Natural) -> AliquotResult<AliquotSequence> {
    build_sequence_with(start, Pruning::Descent, None, proper_divisor_sum)
}

/// Same as [`build_sequence`] with an explicit pruning rule, an optional cap on the
/// number of recorded terms and a custom divisor-sum step.
///
/// When `max_terms` is set and the sequence would record more terms than that, the
/// builder fails with [`AliquotError::TermLimitExceeded`].
pub fn build_sequence_with<F>(
    start: &Natural,
    pruning: Pruning,
    max_terms: Option<usize>,
    mut next: F,
) -> AliquotResult<AliquotSequence>
where
    F: FnMut(&Natural) -> AliquotResult<Natural>,
{
    require_at_least_two(Operation::BuildSequence, start)?;

    let mut terms = vec![start.clone()];
    loop {
        let current = terms.last().unwrap_or(start);
        let sum = next(current)?;
        trace!("aliquot step from {}: s({}) = {}", start, current, sum);

        match step(pruning, start, &terms, sum) {
            Step::Closed => {
                return Ok(AliquotSequence {
                    closed: true,
                    terms,
                });
            }
            Step::Diverged => {
                return Ok(AliquotSequence {
                    closed: false,
                    terms,
                });
            }
            Step::Continue(sum) => {
                if let Some(limit) = max_terms {
                    if terms.len() >= limit {
                        return Err(AliquotError::TermLimitExceeded {
                            start: start.clone(),
                            limit,
                        });
                    }
                }
                terms.push(sum);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::natural::nat;

    fn terms(values: &[u64]) -> Vec<Natural> {
        values.iter().copied().map(nat).collect()
    }

    fn cycle_search(start: u64) -> AliquotSequence {
        build_sequence_with(
            &nat(start),
            Pruning::cycle_search(),
            None,
            proper_divisor_sum,
        )
        .unwrap()
    }

    #[test]
    fn perfect_number_closes_immediately() {
        let sequence = build_sequence(&nat(28)).unwrap();
        assert!(sequence.closed);
        assert_eq!(sequence.terms, terms(&[28]));
        assert_eq!(sequence.period(), Some(1));
    }

    #[test]
    fn amicable_pair_closes_after_two_terms() {
        let sequence = build_sequence(&nat(1184)).unwrap();
        assert!(sequence.closed);
        assert_eq!(sequence.terms, terms(&[1184, 1210]));
    }

    #[test]
    fn decreasing_sum_diverges() {
        // s(10) = 8 < 10
        let sequence = build_sequence(&nat(10)).unwrap();
        assert!(!sequence.closed);
        assert_eq!(sequence.terms, terms(&[10]));
        assert_eq!(sequence.period(), None);
    }

    #[test]
    fn increasing_chain_records_terms_until_pruned() {
        // 12 -> 16 -> 15 (15 < 16)
        let sequence = build_sequence(&nat(12)).unwrap();
        assert!(!sequence.closed);
        assert_eq!(sequence.terms, terms(&[12, 16]));
    }

    #[test]
    fn descent_rejects_larger_amicable_member() {
        // s(284) = 220 < 284
        let sequence = build_sequence(&nat(284)).unwrap();
        assert!(!sequence.closed);
        assert_eq!(sequence.terms, terms(&[284]));
    }

    #[test]
    fn fixed_point_other_than_seed_terminates() {
        // 5 -> 6 -> 6 -> ...
        for pruning in [Pruning::Descent, Pruning::cycle_search()] {
            let sequence = build_sequence_with(&nat(5), pruning, None, |n| {
                Ok(if *n == nat(5) { nat(6) } else { n.clone() })
            })
            .unwrap();
            assert!(!sequence.closed);
            assert_eq!(sequence.terms, terms(&[5, 6]));
        }
    }

    #[test]
    fn cycle_search_finds_non_monotonic_cycles() {
        let sequence = cycle_search(284);
        assert!(sequence.closed);
        assert_eq!(sequence.terms, terms(&[284, 220]));

        let sequence = cycle_search(12496);
        assert!(sequence.closed);
        assert_eq!(
            sequence.terms,
            terms(&[12496, 14288, 15472, 14536, 14264])
        );
    }

    #[test]
    fn cycle_search_stops_at_one() {
        // 10 -> 8 -> 7 -> 1
        let sequence = cycle_search(10);
        assert!(!sequence.closed);
        assert_eq!(sequence.terms, terms(&[10, 8, 7]));
    }

    #[test]
    fn cycle_search_stops_when_entering_another_cycle() {
        // 562 -> 284 -> 220 -> 284
        let sequence = cycle_search(562);
        assert!(!sequence.closed);
        assert_eq!(sequence.terms, terms(&[562, 284, 220]));
    }

    #[test]
    fn cycle_search_respects_period_bound() {
        let sequence =
            build_sequence_with(&nat(12496), Pruning::Period(4), None, proper_divisor_sum)
                .unwrap();
        assert!(!sequence.closed);
        assert_eq!(sequence.terms.len(), 4);
    }

    #[test]
    fn term_limit_is_enforced() {
        // a strictly increasing map never closes nor diverges
        let err = build_sequence_with(&nat(2), Pruning::Descent, Some(8), |n| Ok(n + 1u32))
            .unwrap_err();
        assert_eq!(
            err,
            AliquotError::TermLimitExceeded {
                start: nat(2),
                limit: 8,
            }
        );
    }

    #[test]
    fn term_limit_allows_cycles_that_fit() {
        let sequence =
            build_sequence_with(&nat(220), Pruning::Descent, Some(2), proper_divisor_sum)
                .unwrap();
        assert!(sequence.closed);
        assert_eq!(sequence.terms, terms(&[220, 284]));
    }

    #[test]
    fn step_errors_are_propagated() {
        let err = build_sequence_with(&nat(4), Pruning::Descent, None, |_| {
            Err(AliquotError::InvalidInput {
                operation: Operation::ProperDivisorSum,
                value: nat(1),
            })
        })
        .unwrap_err();
        assert!(matches!(err, AliquotError::InvalidInput { .. }));
    }

    #[test]
    fn rejects_zero_and_one() {
        assert!(build_sequence(&nat(0)).is_err());
        assert!(build_sequence(&nat(1)).is_err());
    }
}
