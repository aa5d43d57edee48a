//! Positional argument patterns and arity validation.
//!
//! A command declares the shape of its positional arguments as a list of
//! pattern strings. Each pattern becomes an [`ArgSlot`]:
//!
//! | Pattern  | Kind                   | Displayed as |
//! |----------|------------------------|--------------|
//! | `name`   | [`ArgKind::Mandatory`] | `<name>`     |
//! | `[name]` | [`ArgKind::Optional`]  | `[name]`     |
//! | `...`    | [`ArgKind::Variadic`]  | `...`        |
//!
//! An [`ArgSpec`] validates a list of supplied tokens against its slots,
//! left to right:
//!
//! - a mandatory slot consumes exactly one token and fails with
//!   [`ArityError::TooFew`] when none is left
//! - an optional slot consumes one token if any remain
//! - a variadic slot consumes everything that remains
//!
//! Tokens left over once every slot has been visited produce
//! [`ArityError::TooMany`].
//!
//! # Example
//!
//! ```rust
//! use cmdroute_args::{ArgSpec, ArityError};
//!
//! let spec = ArgSpec::parse(["branch", "..."])?;
//! assert_eq!(spec.to_string(), "<branch> ...");
//!
//! assert!(spec.validate(&["main", "a", "b", "c"]).is_ok());
//! assert_eq!(spec.validate::<&str>(&[]), Err(ArityError::TooFew));
//! # Ok::<(), cmdroute_args::PatternError>(())
//! ```
//!
//! # Greedy matching
//!
//! Matching never backtracks. A variadic slot placed before other slots
//! swallows their tokens, and an optional slot placed before a mandatory one
//! takes the token the mandatory slot would have needed. Such specs are
//! accepted; [`ArgSpec::unreachable_slots`] reports the slots that can never
//! receive a token so callers can warn about them.

mod error;
mod slot;
mod spec;

pub use error::{ArityError, PatternError};
pub use slot::{ArgKind, ArgSlot};
pub use spec::ArgSpec;
