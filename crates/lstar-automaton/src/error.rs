use thiserror::Error;

/// Errors raised while assembling a [`crate::Dfa`] from a [`crate::DfaBuilder`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DfaError {
    #[error("state {0} has no transition for symbol index {1}; the transition function must be total")]
    MissingTransition(usize, usize),
    #[error("transition references out-of-range state {0}, but only {1} states were declared")]
    InvalidState(usize, usize),
    #[error("initial state {0} is out of range for {1} declared states")]
    InvalidInitialState(usize, usize),
}
