//! The hypothesis DFA value type used by the L* learner. Deliberately minimal: a total
//! transition table, an initial state, an accepting set, and nothing else — no
//! minimization, no product construction, no rendering. Those are the concerns of the
//! learner crate and of external visualization tooling, respectively.

mod description;
mod dfa;
mod error;

pub use description::DfaDescription;
pub use dfa::{Dfa, DfaBuilder, index_word};
pub use error::DfaError;
