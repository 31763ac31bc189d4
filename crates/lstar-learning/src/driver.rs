use std::fmt;
use std::hash::Hash;

use lstar_automaton::Dfa;
use lstar_core::Alphabet;
use tracing::{debug, trace};

use crate::error::LearnError;
use crate::oracle::{FnOracle, Oracle, OracleAdapter};
use crate::search::{effective_max_len, find_counterexample};
use crate::table::ObservationTable;

/// Default budget on oracle invocations spent simulating an equivalence query, per
/// spec §4.5.
pub const DEFAULT_MAX_CE_SEARCHES: usize = 100_000;

/// Learns a DFA for the language recognized by `membership` over `symbols`, using the
/// default counterexample budget unless overridden. This is the spec's `learn(Σ, T,
/// max_ce_len?, max_ce_searches?)` entry point, specialized to a plain closure oracle.
pub fn learn<S, F>(
    symbols: Vec<S>,
    membership: F,
    max_ce_len: Option<usize>,
    max_ce_searches: Option<usize>,
) -> Result<Dfa<S>, LearnError>
where
    S: Clone + Eq + Hash + fmt::Debug,
    F: Fn(&[S]) -> bool,
{
    let (dfa, _table) = learn_with_table(symbols, membership, max_ce_len, max_ce_searches)?;
    Ok(dfa)
}

/// Same as [`learn`], but also returns the final observation table for diagnostic use
/// (spec §6's "plus optionally the final Observation Table").
pub fn learn_with_table<S, F>(
    symbols: Vec<S>,
    membership: F,
    max_ce_len: Option<usize>,
    max_ce_searches: Option<usize>,
) -> Result<(Dfa<S>, ObservationTable<S>), LearnError>
where
    S: Clone + Eq + Hash + fmt::Debug,
    F: Fn(&[S]) -> bool,
{
    let alphabet = Alphabet::new(symbols)?;
    let oracle = FnOracle::new(alphabet, membership);
    learn_with_oracle(oracle, max_ce_len, max_ce_searches)
}

/// Learns against any [`Oracle`] implementation directly, e.g. a `DFA`-backed oracle
/// used for the round-trip law (spec §8), bypassing the closure-specific convenience
/// wrapper.
pub fn learn_with_oracle<O>(
    oracle: O,
    max_ce_len: Option<usize>,
    max_ce_searches: Option<usize>,
) -> Result<(Dfa<O::Symbol>, ObservationTable<O::Symbol>), LearnError>
where
    O: Oracle,
    O::Symbol: Clone + Eq + Hash + fmt::Debug,
{
    if let Some(len) = max_ce_len {
        if len < 2 {
            return Err(LearnError::InvalidMaxLen(len));
        }
    }
    let max_searches = max_ce_searches.unwrap_or(DEFAULT_MAX_CE_SEARCHES);
    if max_searches == 0 {
        return Err(LearnError::InvalidMaxSearches(max_searches));
    }

    let mut adapter = OracleAdapter::new(oracle);
    let mut table = ObservationTable::new(&mut adapter);

    loop {
        refine(&mut table, &mut adapter);
        let hypothesis = table.to_dfa()?;

        let alphabet_len = adapter.alphabet().len();
        let max_len = effective_max_len(alphabet_len, max_ce_len, max_searches);
        trace!(max_len, max_searches, "searching for a counterexample");

        match find_counterexample(&hypothesis, &mut adapter, max_len, max_searches) {
            Some(counterexample) => {
                debug!(?counterexample, "absorbing counterexample into the table");
                table.absorb_counterexample(&counterexample, &mut adapter);
            }
            None => {
                debug!(
                    states = hypothesis.num_states(),
                    queries = adapter.queries_made(),
                    "search exhausted without a disagreement, returning hypothesis"
                );
                return Ok((hypothesis, table));
            }
        }
    }
}

/// Drives the table to simultaneous closedness and consistency (spec §4.3's refinement
/// algorithm, steps 2): alternately close on the least witness and append the least
/// distinguishing experiment until neither check finds a violation.
fn refine<S, O>(table: &mut ObservationTable<S>, adapter: &mut OracleAdapter<O>)
where
    S: Clone + Eq + Hash + fmt::Debug,
    O: Oracle<Symbol = S>,
{
    loop {
        let mut changed = false;
        if let Some(witness) = table.is_closed() {
            trace!(?witness, "closing table on witness");
            table.close(witness, adapter);
            changed = true;
        }
        if let Some(experiment) = table.is_consistent() {
            trace!(?experiment, "appending distinguishing experiment");
            table.make_consistent(experiment, adapter);
            changed = true;
        }
        if !changed {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lstar_automaton::index_word;

    fn accepts(dfa: &Dfa<char>, s: &str) -> bool {
        let alphabet = dfa.alphabet().clone();
        let word = index_word(&alphabet, &s.chars().collect::<Vec<_>>()).unwrap();
        dfa.accepts(&word)
    }

    #[test]
    fn learns_both_parities_even() {
        let dfa = learn(
            vec!['a', 'b'],
            |w: &[char]| w.iter().filter(|&&c| c == 'a').count() % 2 == 0
                && w.iter().filter(|&&c| c == 'b').count() % 2 == 0,
            None,
            None,
        )
        .unwrap();

        assert_eq!(dfa.num_states(), 4);
        assert!(accepts(&dfa, ""));
        assert!(accepts(&dfa, "aabb"));
        assert!(!accepts(&dfa, "a"));
        assert!(!accepts(&dfa, "abb"));
    }

    #[test]
    fn learns_ends_with_ab() {
        let dfa = learn(
            vec!['a', 'b'],
            |w: &[char]| w.len() >= 2 && w[w.len() - 2] == 'a' && w[w.len() - 1] == 'b',
            None,
            None,
        )
        .unwrap();

        assert_eq!(dfa.num_states(), 3);
        for word in ["ab", "aab", "bab"] {
            assert!(accepts(&dfa, word), "expected {word} to be accepted");
        }
        for word in ["", "a", "ba", "abb"] {
            assert!(!accepts(&dfa, word), "expected {word} to be rejected");
        }
    }

    #[test]
    fn learns_accept_all() {
        let dfa = learn(vec!['a'], |_: &[char]| true, None, None).unwrap();
        assert_eq!(dfa.num_states(), 1);
        assert!(dfa.is_accepting(dfa.initial_state()));
        assert_eq!(dfa.step(dfa.initial_state(), 0), dfa.initial_state());
    }

    #[test]
    fn learns_accept_none() {
        let dfa = learn(vec!['a', 'b'], |_: &[char]| false, None, None).unwrap();
        assert_eq!(dfa.num_states(), 1);
        assert!(!dfa.is_accepting(dfa.initial_state()));
        assert_eq!(dfa.step(dfa.initial_state(), 0), dfa.initial_state());
        assert_eq!(dfa.step(dfa.initial_state(), 1), dfa.initial_state());
    }

    #[test]
    fn rejects_empty_alphabet() {
        let err = learn(Vec::<char>::new(), |_: &[char]| true, None, None).unwrap_err();
        assert!(matches!(err, LearnError::InvalidAlphabet(_)));
    }

    #[test]
    fn rejects_too_short_max_ce_len() {
        let err = learn(vec!['a'], |_: &[char]| true, Some(1), None).unwrap_err();
        assert!(matches!(err, LearnError::InvalidMaxLen(1)));
    }

    #[test]
    fn rejects_zero_max_ce_searches() {
        let err = learn(vec!['a'], |_: &[char]| true, None, Some(0)).unwrap_err();
        assert!(matches!(err, LearnError::InvalidMaxSearches(0)));
    }

    #[test]
    fn third_symbol_from_end_is_one() {
        let dfa = learn(
            vec!['0', '1'],
            |w: &[char]| w.len() >= 3 && w[w.len() - 3] == '1',
            Some(6),
            None,
        )
        .unwrap();

        assert_eq!(dfa.num_states(), 8);
        for word in ["100", "0100", "1111"] {
            assert!(accepts(&dfa, word), "expected {word} to be accepted");
        }
        for word in ["", "0", "00", "010"] {
            assert!(!accepts(&dfa, word), "expected {word} to be rejected");
        }
    }

    #[test]
    fn learns_conjunction_of_two_substrings() {
        fn contains(haystack: &[char], needle: &str) -> bool {
            let needle: Vec<char> = needle.chars().collect();
            haystack
                .windows(needle.len().max(1))
                .any(|window| window == needle.as_slice())
        }

        let dfa = learn(
            vec!['a', 'b'],
            |w: &[char]| contains(w, "ababbaa") && contains(w, "bbbaaa"),
            None,
            Some(1_000_000),
        )
        .unwrap();

        assert!(accepts(&dfa, "ababbaabbbaaa"));
        assert!(accepts(&dfa, "bbbaaaababbaa"));
        assert!(!accepts(&dfa, "ababbaa"));
        assert!(!accepts(&dfa, "bbbaaa"));
    }

    #[test]
    fn round_trip_is_stable_under_its_own_dfa_as_oracle() {
        let first = learn(
            vec!['a', 'b'],
            |w: &[char]| w.len() >= 2 && w[w.len() - 2] == 'a' && w[w.len() - 1] == 'b',
            None,
            None,
        )
        .unwrap();

        let alphabet = first.alphabet().clone();
        let first_clone = first.clone();
        let second = learn(
            alphabet.symbols().to_vec(),
            move |w: &[char]| {
                let word = index_word(&alphabet, w).unwrap();
                first_clone.accepts(&word)
            },
            None,
            None,
        )
        .unwrap();

        assert_eq!(first.num_states(), second.num_states());
        assert_eq!(first.initial_state(), second.initial_state());
    }
}
