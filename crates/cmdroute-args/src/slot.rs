//! A single positional argument slot.

use std::fmt;
use std::str::FromStr;

use crate::error::PatternError;

/// Pattern that marks a variadic slot.
const VARIADIC_PATTERN: &str = "...";

/// How many tokens a slot consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgKind {
    /// Consumes exactly one token; missing it is an error.
    Mandatory,
    /// Consumes one token when one is available.
    Optional,
    /// Consumes every remaining token.
    Variadic,
}

/// One positional argument rule, derived from a pattern string.
///
/// The kind is fixed when the slot is parsed. The display form is what
/// usage text shows for the slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArgSlot {
    display: String,
    kind: ArgKind,
}

impl ArgSlot {
    /// Classifies a pattern string.
    ///
    /// Rules, checked in order:
    ///
    /// 1. `...` is variadic
    /// 2. a pattern starting with `[` and ending with `]` is optional and
    ///    keeps its brackets for display
    /// 3. anything else is mandatory and is displayed as `<pattern>`
    ///
    /// ```rust
    /// use cmdroute_args::{ArgKind, ArgSlot};
    ///
    /// let slot = ArgSlot::parse("[tag]").unwrap();
    /// assert_eq!(slot.kind(), ArgKind::Optional);
    /// assert_eq!(slot.display(), "[tag]");
    /// ```
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::Empty);
        }

        let slot = if pattern == VARIADIC_PATTERN {
            Self {
                display: pattern.to_string(),
                kind: ArgKind::Variadic,
            }
        } else if pattern.len() >= 2 && pattern.starts_with('[') && pattern.ends_with(']') {
            Self {
                display: pattern.to_string(),
                kind: ArgKind::Optional,
            }
        } else {
            Self {
                display: format!("<{}>", pattern),
                kind: ArgKind::Mandatory,
            }
        };

        Ok(slot)
    }

    /// The slot as shown in usage text.
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn kind(&self) -> ArgKind {
        self.kind
    }

    pub fn is_mandatory(&self) -> bool {
        self.kind == ArgKind::Mandatory
    }

    pub fn is_variadic(&self) -> bool {
        self.kind == ArgKind::Variadic
    }
}

impl FromStr for ArgSlot {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ArgSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}
