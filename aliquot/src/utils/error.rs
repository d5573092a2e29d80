use thiserror::Error;

use crate::{natural::Natural, observer::Operation};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AliquotError {
    /// The operation is undefined for the given value (0 or 1 for most of the core).
    #[error("`{operation}` is undefined for {value}; the input must be at least 2")]
    InvalidInput { operation: Operation, value: Natural },

    /// The aliquot sequence reached the configured term cap before closing or diverging.
    #[error(
        "The aliquot sequence starting at {start} exceeded the limit of {limit} terms without closing or diverging"
    )]
    TermLimitExceeded { start: Natural, limit: usize },
}

pub type AliquotResult<T> = Result<T, AliquotError>;
