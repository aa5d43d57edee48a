//! Ordered argument slots and arity validation.

use std::fmt;

use crate::error::{ArityError, PatternError};
use crate::slot::{ArgKind, ArgSlot};

/// The positional argument shape of a command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgSpec {
    slots: Vec<ArgSlot>,
}

impl ArgSpec {
    /// Creates an empty spec, which accepts only zero arguments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses every pattern in order.
    ///
    /// Fails on the first malformed pattern.
    pub fn parse<I, S>(patterns: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let slots = patterns
            .into_iter()
            .map(|p| ArgSlot::parse(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { slots })
    }

    /// Appends a slot.
    pub fn push(&mut self, slot: ArgSlot) {
        self.slots.push(slot);
    }

    pub fn slots(&self) -> &[ArgSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Checks the supplied tokens against the slots.
    ///
    /// Slots are visited left to right and consume tokens greedily; see the
    /// crate docs for the per-kind rules.
    pub fn validate<S: AsRef<str>>(&self, supplied: &[S]) -> Result<(), ArityError> {
        let mut remaining = supplied.len();

        for slot in &self.slots {
            match slot.kind() {
                ArgKind::Mandatory => {
                    if remaining == 0 {
                        return Err(ArityError::TooFew);
                    }
                    remaining -= 1;
                }
                ArgKind::Optional => {
                    remaining = remaining.saturating_sub(1);
                }
                ArgKind::Variadic => {
                    remaining = 0;
                }
            }
        }

        if remaining == 0 {
            Ok(())
        } else {
            Err(ArityError::TooMany)
        }
    }

    /// Smallest number of tokens that can pass validation.
    ///
    /// Mandatory slots after a variadic one are counted; such a spec rejects
    /// every input.
    pub fn min_args(&self) -> usize {
        self.slots.iter().filter(|s| s.is_mandatory()).count()
    }

    /// Largest number of tokens that can pass validation, or `None` when a
    /// variadic slot makes it unbounded.
    pub fn max_args(&self) -> Option<usize> {
        if self.slots.iter().any(ArgSlot::is_variadic) {
            None
        } else {
            Some(self.slots.len())
        }
    }

    /// Indices of slots that never receive a token.
    ///
    /// Everything after the first variadic slot is unreachable. Validation
    /// still runs these slots, so a mandatory slot in this position makes
    /// the command fail with [`ArityError::TooFew`] for any input.
    pub fn unreachable_slots(&self) -> Vec<usize> {
        match self.slots.iter().position(ArgSlot::is_variadic) {
            Some(first) => (first + 1..self.slots.len()).collect(),
            None => Vec::new(),
        }
    }
}

impl FromIterator<ArgSlot> for ArgSpec {
    fn from_iter<T: IntoIterator<Item = ArgSlot>>(iter: T) -> Self {
        Self {
            slots: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for ArgSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(slot.display())?;
        }
        Ok(())
    }
}
