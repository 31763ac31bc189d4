use std::fmt;
use std::hash::Hash;

use lstar_core::{Alphabet, Word};

use crate::description::DfaDescription;
use crate::error::DfaError;

/// A deterministic finite automaton over some alphabet Σ: a total transition function
/// δ: Q × Σ → Q, an initial state, and an accepting set. States are plain indices
/// `0..num_states`, so the transition graph (which may be cyclic) never needs any
/// ownership cycle — it is just a `|Q|×|Σ|` table of indices, per the re-architecture
/// guidance.
#[derive(Clone)]
pub struct Dfa<S> {
    alphabet: Alphabet<S>,
    transitions: Vec<Vec<usize>>,
    initial: usize,
    accepting: Vec<bool>,
}

impl<S> Dfa<S> {
    /// Number of states, |Q|.
    pub fn num_states(&self) -> usize {
        self.transitions.len()
    }

    pub fn initial_state(&self) -> usize {
        self.initial
    }

    pub fn is_accepting(&self, state: usize) -> bool {
        self.accepting[state]
    }

    pub fn alphabet(&self) -> &Alphabet<S> {
        &self.alphabet
    }

    /// δ(state, symbol).
    pub fn step(&self, state: usize, symbol: usize) -> usize {
        self.transitions[state][symbol]
    }

    /// Runs `word` from `state`, returning the end state. Time Θ(|word|).
    pub fn iterate(&self, state: usize, word: &[usize]) -> usize {
        word.iter().fold(state, |q, &a| self.step(q, a))
    }

    /// Whether `word` is accepted, i.e. `iterate(initial, word)` lands in F.
    pub fn accepts(&self, word: &[usize]) -> bool {
        self.is_accepting(self.iterate(self.initial, word))
    }

    /// A renderer-friendly snapshot of this automaton's states, transitions and
    /// accepting set, independent of the symbol type `S`.
    pub fn description(&self) -> DfaDescription
    where
        S: fmt::Debug,
    {
        DfaDescription {
            num_states: self.num_states(),
            initial_state: self.initial,
            accepting_states: (0..self.num_states())
                .filter(|&q| self.accepting[q])
                .collect(),
            transitions: self.transitions.clone(),
            symbol_labels: self
                .alphabet
                .symbols()
                .iter()
                .map(|s| format!("{s:?}"))
                .collect(),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for Dfa<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dfa")
            .field("num_states", &self.num_states())
            .field("initial", &self.initial)
            .field("accepting", &self.accepting)
            .finish()
    }
}

impl<S: fmt::Debug> fmt::Display for Dfa<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description().to_table_string())
    }
}

/// Collects transitions, an initial state and an accepting set for a [`Dfa`], the way
/// the teacher's `TSBuilder` collects edges before constructing a transition system.
/// Unlike `TSBuilder`, state colors are restricted to a single accepting bit, since this
/// spec only ever produces DFAs.
#[derive(Debug, Clone)]
pub struct DfaBuilder<S> {
    alphabet: Alphabet<S>,
    num_states: usize,
    transitions: Vec<Vec<Option<usize>>>,
    initial: usize,
    accepting: Vec<bool>,
}

impl<S: Clone + Eq + Hash> DfaBuilder<S> {
    /// Starts a builder for `num_states` states over `alphabet`, all non-accepting and
    /// with no transitions yet.
    pub fn new(alphabet: Alphabet<S>, num_states: usize, initial: usize) -> Self {
        let symbol_count = alphabet.len();
        Self {
            alphabet,
            num_states,
            transitions: vec![vec![None; symbol_count]; num_states],
            initial,
            accepting: vec![false; num_states],
        }
    }

    /// Adds a single transition `state --symbol--> target`.
    pub fn with_transition(mut self, state: usize, symbol: usize, target: usize) -> Self {
        self.transitions[state][symbol] = Some(target);
        self
    }

    /// Adds several transitions at once, as `(state, symbol, target)` triples.
    pub fn with_transitions(
        mut self,
        transitions: impl IntoIterator<Item = (usize, usize, usize)>,
    ) -> Self {
        for (state, symbol, target) in transitions {
            self = self.with_transition(state, symbol, target);
        }
        self
    }

    /// Marks `state` as accepting.
    pub fn with_accepting(mut self, state: usize) -> Self {
        self.accepting[state] = true;
        self
    }

    /// Marks several states as accepting.
    pub fn with_accepting_states(mut self, states: impl IntoIterator<Item = usize>) -> Self {
        for state in states {
            self = self.with_accepting(state);
        }
        self
    }

    /// Finalizes the builder into a [`Dfa`], failing if the transition function is not
    /// total or any index is out of range.
    pub fn build(self) -> Result<Dfa<S>, DfaError> {
        if self.initial >= self.num_states {
            return Err(DfaError::InvalidInitialState(self.initial, self.num_states));
        }

        let mut transitions = Vec::with_capacity(self.num_states);
        for (state, row) in self.transitions.into_iter().enumerate() {
            let mut resolved = Vec::with_capacity(row.len());
            for (symbol, target) in row.into_iter().enumerate() {
                let target = target.ok_or(DfaError::MissingTransition(state, symbol))?;
                if target >= self.num_states {
                    return Err(DfaError::InvalidState(target, self.num_states));
                }
                resolved.push(target);
            }
            transitions.push(resolved);
        }

        Ok(Dfa {
            alphabet: self.alphabet,
            transitions,
            initial: self.initial,
            accepting: self.accepting,
        })
    }
}

/// Convenience for tests and demos: interprets a word given as a slice of symbols
/// directly (not indices) against `alphabet`, returning the index word or `None` if a
/// symbol is not in the alphabet.
pub fn index_word<S: Clone + Eq + Hash>(alphabet: &Alphabet<S>, symbols: &[S]) -> Option<Word> {
    symbols.iter().map(|s| alphabet.index_of(s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parity_dfa() -> Dfa<char> {
        let alphabet = Alphabet::new(vec!['a', 'b']).unwrap();
        DfaBuilder::new(alphabet, 4, 0)
            .with_transitions([
                (0, 0, 1),
                (0, 1, 2),
                (1, 0, 0),
                (1, 1, 3),
                (2, 0, 3),
                (2, 1, 0),
                (3, 0, 2),
                (3, 1, 1),
            ])
            .with_accepting(0)
            .build()
            .unwrap()
    }

    #[test]
    fn accepts_both_even() {
        let dfa = parity_dfa();
        let alphabet = dfa.alphabet().clone();
        let accepts = |s: &str| {
            let word = index_word(&alphabet, &s.chars().collect::<Vec<_>>()).unwrap();
            dfa.accepts(&word)
        };
        assert!(accepts(""));
        assert!(accepts("aabb"));
        assert!(!accepts("a"));
        assert!(!accepts("abb"));
    }

    #[test]
    fn build_rejects_partial_transition_function() {
        let alphabet = Alphabet::new(vec!['a', 'b']).unwrap();
        let err = DfaBuilder::new(alphabet, 2, 0)
            .with_transition(0, 0, 1)
            .build()
            .unwrap_err();
        assert_eq!(err, DfaError::MissingTransition(0, 1));
    }
}
