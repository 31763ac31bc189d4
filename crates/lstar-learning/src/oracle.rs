use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;
use lstar_core::{Alphabet, Word};

/// A minimally adequate membership oracle: the learner's only window onto the unknown
/// language. Modeled after the teacher's `Oracle` trait (`automata_learning::active::
/// oracle::Oracle`), collapsed to a boolean-output, membership-only variant since this
/// spec has no equivalence oracle to simulate via a trait method — equivalence is
/// simulated separately, by bounded enumeration (see [`crate::search`]).
pub trait Oracle {
    /// The alphabet's symbol type. Only needs `Clone + Eq + Hash + Debug`; no `Ord`
    /// bound, since tie-breaking uses the alphabet's position order, not the symbol
    /// type's own ordering.
    type Symbol: Clone + Eq + Hash + fmt::Debug;

    fn alphabet(&self) -> &Alphabet<Self::Symbol>;

    /// T(word): true iff `word` is in the target language.
    fn member(&self, word: &[Self::Symbol]) -> bool;
}

/// Wraps a plain predicate closure as an [`Oracle`], so ad-hoc membership tests need no
/// boilerplate trait impl.
pub struct FnOracle<S, F> {
    alphabet: Alphabet<S>,
    predicate: F,
}

impl<S, F> FnOracle<S, F> {
    pub fn new(alphabet: Alphabet<S>, predicate: F) -> Self {
        Self { alphabet, predicate }
    }
}

impl<S, F> Oracle for FnOracle<S, F>
where
    S: Clone + Eq + Hash + fmt::Debug,
    F: Fn(&[S]) -> bool,
{
    type Symbol = S;

    fn alphabet(&self) -> &Alphabet<S> {
        &self.alphabet
    }

    fn member(&self, word: &[S]) -> bool {
        (self.predicate)(word)
    }
}

/// Memoizes an [`Oracle`] so that no string is ever queried twice within a session
/// (spec §4.1, P4). The cache is an `IndexMap` so diagnostics can report queried words in
/// the order they were first asked, not hash order.
pub struct OracleAdapter<O: Oracle> {
    oracle: O,
    cache: IndexMap<Word, bool>,
}

impl<O: Oracle> OracleAdapter<O> {
    pub fn new(oracle: O) -> Self {
        Self {
            oracle,
            cache: IndexMap::new(),
        }
    }

    pub fn alphabet(&self) -> &Alphabet<O::Symbol> {
        self.oracle.alphabet()
    }

    /// Whether `word` has already been answered, without triggering a query.
    pub fn contains(&self, word: &Word) -> bool {
        self.cache.contains_key(word)
    }

    /// Answers `word`, querying the underlying oracle only on a cache miss.
    pub fn query(&mut self, word: &Word) -> bool {
        if let Some(&cached) = self.cache.get(word) {
            return cached;
        }
        let symbols: Vec<O::Symbol> = word
            .iter()
            .map(|&index| self.oracle.alphabet().symbol(index).clone())
            .collect();
        let answer = self.oracle.member(&symbols);
        self.cache.insert(word.clone(), answer);
        answer
    }

    /// Number of distinct strings queried so far (cache size).
    pub fn queries_made(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn memoizes_repeated_queries() {
        let alphabet = Alphabet::new(vec!['a', 'b']).unwrap();
        let calls = Cell::new(0usize);
        let oracle = FnOracle::new(alphabet, |w: &[char]| {
            calls.set(calls.get() + 1);
            w.len() % 2 == 0
        });
        let mut adapter = OracleAdapter::new(oracle);

        let word = vec![0, 1, 0];
        assert!(!adapter.query(&word));
        assert!(!adapter.query(&word));
        assert!(!adapter.query(&word));
        assert_eq!(calls.get(), 1);
        assert_eq!(adapter.queries_made(), 1);
    }
}
