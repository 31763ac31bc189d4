use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use bimap::BiHashMap;
use indexmap::{IndexMap, IndexSet};
use lstar_core::{Alphabet, Word, word};
use lstar_automaton::{Dfa, DfaBuilder};
use tabled::builder::Builder;

use crate::error::LearnError;
use crate::oracle::{Oracle, OracleAdapter};

/// The observation table (S, E, R) of spec §3/§4.3: a prefix-closed set of access
/// strings `upper` (S), a suffix-closed set of experiments `experiments` (E), and the
/// filled observation map `rows`, covering both S and its one-symbol border S·Σ.
///
/// Rows are stored as `Vec<bool>` keyed by word, in an `IndexMap` so the table's own
/// `Display` impl (built on `tabled`) renders rows in a stable, insertion-derived order
/// rather than hash order.
pub struct ObservationTable<S> {
    alphabet: Alphabet<S>,
    upper: IndexSet<Word>,
    experiments: IndexSet<Word>,
    rows: IndexMap<Word, Vec<bool>>,
}

impl<S: Clone + Eq + Hash + fmt::Debug> ObservationTable<S> {
    /// Initializes a fresh table: S = {ε}, E = {ε}, fully filled.
    pub fn new<O: Oracle<Symbol = S>>(adapter: &mut OracleAdapter<O>) -> Self {
        let mut table = Self {
            alphabet: adapter.alphabet().clone(),
            upper: IndexSet::new(),
            experiments: IndexSet::new(),
            rows: IndexMap::new(),
        };
        table.upper.insert(word::epsilon());
        table.experiments.insert(word::epsilon());
        table.fill(adapter);
        table
    }

    pub fn alphabet(&self) -> &Alphabet<S> {
        &self.alphabet
    }

    pub fn upper_set(&self) -> impl Iterator<Item = &Word> {
        self.upper.iter()
    }

    pub fn experiments(&self) -> impl Iterator<Item = &Word> {
        self.experiments.iter()
    }

    fn row(&self, word: &[usize]) -> &[bool] {
        self.rows
            .get(word)
            .expect("row must be filled before lookup (invariant 3: fully filled)")
    }

    /// S·Σ, every one-symbol extension of an access string (spec invariant 1's border).
    fn border_words(&self) -> Vec<Word> {
        let mut out = Vec::with_capacity(self.upper.len() * self.alphabet.len());
        for s in &self.upper {
            for a in self.alphabet.indices() {
                out.push(word::push(s, a));
            }
        }
        out
    }

    /// Extends every row in S ∪ S·Σ to cover all current experiments, querying the
    /// adapter only for cells not already filled.
    fn fill<O: Oracle<Symbol = S>>(&mut self, adapter: &mut OracleAdapter<O>) {
        let words: Vec<Word> = self.upper.iter().cloned().chain(self.border_words()).collect();
        for w in words {
            let mut row = self.rows.swap_remove(&w).unwrap_or_default();
            for e in self.experiments.iter().skip(row.len()) {
                let probe = word::concat(&w, e);
                row.push(adapter.query(&probe));
            }
            self.rows.insert(w, row);
        }
    }

    /// `Some(witness)` with `witness = s·a` if the table is not closed; `None` if
    /// closed. When several witnesses exist, the length-then-lexicographically least one
    /// is returned, per spec's tie-break rule.
    pub fn is_closed(&self) -> Option<Word> {
        let mut violations = Vec::new();
        for s in &self.upper {
            for a in self.alphabet.indices() {
                let sa = word::push(s, a);
                let sa_row = self.row(&sa);
                if !self.upper.iter().any(|s2| self.row(s2) == sa_row) {
                    violations.push(sa);
                }
            }
        }
        violations.into_iter().min_by(|a, b| word::len_lex_cmp(a, b))
    }

    /// Promotes `witness` (an `s·a` word) to the upper set S and re-fills.
    pub fn close<O: Oracle<Symbol = S>>(&mut self, witness: Word, adapter: &mut OracleAdapter<O>) {
        self.upper.insert(witness);
        self.fill(adapter);
    }

    /// `Some(a·e)` if the table is inconsistent: two rows with equal vectors whose
    /// one-symbol extensions differ under some experiment. `None` if consistent. Ties
    /// are broken the same way as [`Self::is_closed`].
    pub fn is_consistent(&self) -> Option<Word> {
        let mut violations = Vec::new();
        let upper: Vec<Word> = self.upper.iter().cloned().collect();
        for (i, s1) in upper.iter().enumerate() {
            for s2 in upper.iter().skip(i + 1) {
                if self.row(s1) != self.row(s2) {
                    continue;
                }
                for a in self.alphabet.indices() {
                    let row1 = self.row(&word::push(s1, a)).to_vec();
                    let row2 = self.row(&word::push(s2, a)).to_vec();
                    for (ei, e) in self.experiments.iter().enumerate() {
                        if row1[ei] != row2[ei] {
                            violations.push(word::concat(&[a], e));
                        }
                    }
                }
            }
        }
        violations.into_iter().min_by(|a, b| word::len_lex_cmp(a, b))
    }

    /// Appends `experiment` (an `a·e` word) to E and re-fills.
    pub fn make_consistent<O: Oracle<Symbol = S>>(
        &mut self,
        experiment: Word,
        adapter: &mut OracleAdapter<O>,
    ) {
        self.experiments.insert(experiment);
        self.fill(adapter);
    }

    /// Adds every non-empty prefix of `counterexample` that is not already in S, then
    /// re-fills. This is the classical "add all prefixes" absorption strategy (spec §9).
    pub fn absorb_counterexample<O: Oracle<Symbol = S>>(
        &mut self,
        counterexample: &[usize],
        adapter: &mut OracleAdapter<O>,
    ) {
        for prefix in word::nonempty_prefixes(counterexample) {
            if !self.upper.contains(prefix) {
                self.upper.insert(prefix.to_vec());
            }
        }
        self.fill(adapter);
    }

    /// Extracts the hypothesis DFA. Precondition: closed and consistent (callers should
    /// have driven `is_closed`/`is_consistent` to `None` first); violates that and this
    /// returns [`LearnError::Internal`] rather than panicking or silently misbehaving.
    pub fn to_dfa(&self) -> Result<Dfa<S>, LearnError> {
        if self.is_closed().is_some() {
            return Err(LearnError::Internal(
                "to_dfa called on a non-closed table".to_string(),
            ));
        }
        if self.is_consistent().is_some() {
            return Err(LearnError::Internal(
                "to_dfa called on an inconsistent table".to_string(),
            ));
        }

        let mut groups: IndexMap<Vec<bool>, Vec<Word>> = IndexMap::new();
        for s in &self.upper {
            groups.entry(self.row(s).to_vec()).or_default().push(s.clone());
        }

        let mut canonical: BiHashMap<Vec<bool>, Word> = BiHashMap::new();
        for (row_vec, mut words) in groups {
            words.sort_by(|a, b| word::len_lex_cmp(a, b));
            canonical.insert(row_vec, words[0].clone());
        }

        let mut representatives: Vec<Word> = canonical.right_values().cloned().collect();
        representatives.sort_by(|a, b| word::len_lex_cmp(a, b));

        let state_of: HashMap<Word, usize> = representatives
            .iter()
            .enumerate()
            .map(|(id, rep)| (rep.clone(), id))
            .collect();
        let state_of_row: HashMap<Vec<bool>, usize> = canonical
            .iter()
            .map(|(row_vec, rep)| (row_vec.clone(), state_of[rep]))
            .collect();

        let initial_row = self.row(&word::epsilon()).to_vec();
        let initial_state = *state_of_row.get(&initial_row).ok_or_else(|| {
            LearnError::Internal("row(ε) has no assigned state".to_string())
        })?;

        let mut builder = DfaBuilder::new(self.alphabet.clone(), representatives.len(), initial_state);
        for (id, rep) in representatives.iter().enumerate() {
            for a in self.alphabet.indices() {
                let successor_row = self.row(&word::push(rep, a)).to_vec();
                let target = *state_of_row.get(&successor_row).ok_or_else(|| {
                    LearnError::Internal(format!(
                        "no state found for successor row of representative {rep:?} on symbol {a}"
                    ))
                })?;
                builder = builder.with_transition(id, a, target);
            }
        }

        let accepting_experiment_index = 0; // ε is always inserted first and never removed.
        for rep in &representatives {
            let id = state_of[rep];
            if self.row(rep)[accepting_experiment_index] {
                builder = builder.with_accepting(id);
            }
        }

        builder.build().map_err(|e| {
            LearnError::Internal(format!("observation table produced an invalid DFA: {e}"))
        })
    }
}

impl<S: Clone + Eq + Hash + fmt::Debug> fmt::Display for ObservationTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = Builder::default();
        let mut header = vec!["row".to_string()];
        header.extend(self.experiments.iter().map(|e| word::render(e, &self.alphabet)));
        builder.push_record(header);

        for s in &self.upper {
            let mut record = vec![format!("{} (S)", word::render(s, &self.alphabet))];
            record.extend(self.row(s).iter().map(|b| (*b as u8).to_string()));
            builder.push_record(record);
        }
        for b in self.border_words() {
            if self.upper.contains(&b) {
                continue;
            }
            let mut record = vec![format!("{} (border)", word::render(&b, &self.alphabet))];
            record.extend(self.row(&b).iter().map(|v| (*v as u8).to_string()));
            builder.push_record(record);
        }

        write!(f, "{}", builder.build())
    }
}
