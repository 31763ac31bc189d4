//! Angluin's L* algorithm, adapted to run without a real equivalence oracle: equivalence
//! queries are simulated by bounded exhaustive enumeration (see [`search`]).
//!
//! The entry point is [`learn`]; [`learn_with_table`] additionally returns the final
//! [`ObservationTable`] for diagnostics, and [`learn_with_oracle`] accepts any custom
//! [`Oracle`] implementation (e.g. one backed by a reference DFA, used for the
//! round-trip property).

mod driver;
mod error;
mod oracle;
mod search;
mod table;

pub use driver::{learn, learn_with_oracle, learn_with_table, DEFAULT_MAX_CE_SEARCHES};
pub use error::LearnError;
pub use oracle::{FnOracle, Oracle, OracleAdapter};
pub use search::{effective_max_len, find_counterexample};
pub use table::ObservationTable;
