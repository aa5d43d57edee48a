//! Error types for argument patterns and arity checks.

use thiserror::Error;

/// A pattern string that cannot be turned into an [`ArgSlot`](crate::ArgSlot).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// The pattern was the empty string.
    #[error("argument pattern must not be empty")]
    Empty,
}

/// Outcome of a failed arity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArityError {
    /// A mandatory slot had no token left to consume.
    #[error("too few arguments")]
    TooFew,

    /// Tokens remained after every slot was visited.
    #[error("too many arguments")]
    TooMany,
}
