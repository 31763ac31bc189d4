use std::fmt;
use std::hash::Hash;

use lstar_core::Word;
use lstar_automaton::Dfa;

use crate::oracle::{Oracle, OracleAdapter};

/// Enumerates every word of a fixed length over `0..alphabet_len` in length-then-
/// lexicographic order (an odometer: the rightmost symbol index advances fastest,
/// exactly like counting in base `alphabet_len` with `length` digits). Restartable and
/// bounded, per spec §9's "Enumeration" guidance.
struct Odometer {
    alphabet_len: usize,
    next: Option<Word>,
}

impl Odometer {
    fn new(length: usize, alphabet_len: usize) -> Self {
        debug_assert!(alphabet_len > 0);
        Self {
            alphabet_len,
            next: Some(vec![0; length]),
        }
    }
}

impl Iterator for Odometer {
    type Item = Word;

    fn next(&mut self) -> Option<Word> {
        let current = self.next.take()?;
        let mut candidate = current.clone();
        let mut position = candidate.len();
        loop {
            if position == 0 {
                self.next = None;
                break;
            }
            position -= 1;
            candidate[position] += 1;
            if candidate[position] == self.alphabet_len {
                candidate[position] = 0;
                continue;
            }
            self.next = Some(candidate);
            break;
        }
        Some(current)
    }
}

/// Computes the largest search length L_eff such that the total number of words with
/// length 2..=L_eff does not exceed `max_searches`, capped by `max_len` if given.
///
/// Computed by direct iterative accumulation of the partial sums of `alphabet_len^l`
/// rather than the closed-form geometric-series logarithm, so that `alphabet_len == 1`
/// (where the closed form divides by zero) needs no special case, and the bound is exact
/// rather than approximate (spec §4.4 / §9's open question).
pub fn effective_max_len(alphabet_len: usize, max_len: Option<usize>, max_searches: usize) -> usize {
    let hard_cap = max_len.unwrap_or(usize::MAX);
    let mut last_fitting = 1usize;
    let mut total = 0usize;
    let mut length = 2usize;

    while length <= hard_cap {
        let Some(count) = checked_pow(alphabet_len, length) else {
            break;
        };
        match total.checked_add(count) {
            Some(new_total) if new_total <= max_searches => {
                total = new_total;
                last_fitting = length;
                length += 1;
            }
            _ => break,
        }
    }
    last_fitting
}

fn checked_pow(base: usize, exponent: usize) -> Option<usize> {
    let mut result: usize = 1;
    for _ in 0..exponent {
        result = result.checked_mul(base)?;
    }
    Some(result)
}

/// Bounded counterexample search standing in for an equivalence oracle (spec §4.4):
/// enumerates Σ^2, Σ^3, … up to `max_len`, comparing `hypothesis` against the memoized
/// oracle, and returns the first word where they disagree. Counts only actual oracle
/// invocations (Adapter cache misses) against `max_searches`, consistent with P4.
pub fn find_counterexample<O>(
    hypothesis: &Dfa<O::Symbol>,
    adapter: &mut OracleAdapter<O>,
    max_len: usize,
    max_searches: usize,
) -> Option<Word>
where
    O: Oracle,
    O::Symbol: Clone + Eq + Hash + fmt::Debug,
{
    let alphabet_len = adapter.alphabet().len();
    let mut searches = 0usize;

    for length in 2..=max_len {
        for word in Odometer::new(length, alphabet_len) {
            if searches >= max_searches {
                return None;
            }
            let is_new_query = !adapter.contains(&word);
            let expected = adapter.query(&word);
            if is_new_query {
                searches += 1;
            }
            if hypothesis.accepts(&word) != expected {
                return Some(word);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odometer_enumerates_length_lex_order() {
        let words: Vec<_> = Odometer::new(2, 2).collect();
        assert_eq!(words, vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]);
    }

    #[test]
    fn effective_max_len_respects_explicit_cap() {
        assert_eq!(effective_max_len(2, Some(3), 1_000_000), 3);
    }

    #[test]
    fn effective_max_len_caps_to_budget() {
        // |Sigma|=2: sum_{l=2}^{L} 2^l <= 6 -> L=2 (2^2=4<=6, 2^2+2^3=12>6)
        assert_eq!(effective_max_len(2, None, 6), 2);
    }

    #[test]
    fn effective_max_len_handles_unary_alphabet() {
        // |Sigma|=1: each length contributes exactly 1 to the sum.
        assert_eq!(effective_max_len(1, None, 3), 4);
    }
}
