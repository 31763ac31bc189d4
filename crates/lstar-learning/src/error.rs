use lstar_core::AlphabetError;
use thiserror::Error;

/// Errors the learner can report, per spec §7's taxonomy. Categories 1–2 are surfaced
/// before any oracle call; category 3 (an oracle failure) is not represented here at
/// all — a panicking membership predicate simply unwinds through `learn()`, propagated
/// verbatim with no `catch_unwind` anywhere in the call chain; category 4 (budget
/// exhaustion) is a normal `Ok` return, not an error.
#[derive(Debug, Error)]
pub enum LearnError {
    #[error("invalid alphabet: {0}")]
    InvalidAlphabet(#[from] AlphabetError),

    #[error("max_ce_len must be at least 2, got {0}")]
    InvalidMaxLen(usize),

    #[error("max_ce_searches must be at least 1, got {0}")]
    InvalidMaxSearches(usize),

    /// Category 5: should be unreachable. Surfaced rather than panicking so a caller
    /// embedding the learner can still recover gracefully, but its presence always
    /// indicates a bug in this crate.
    #[error("internal invariant violation: {0}")]
    Internal(String),
}
