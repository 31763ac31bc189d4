use std::cmp::Ordering;
use std::fmt;

use crate::alphabet::Alphabet;

/// A finite word over Σ, represented as symbol indices rather than the symbols
/// themselves. This makes row-vector equality and length-then-lexicographic comparisons
/// plain slice operations, independent of whatever type the caller's symbols are.
pub type Word = Vec<usize>;

/// The empty word ε.
pub fn epsilon() -> Word {
    Vec::new()
}

/// Appends a single symbol index to a word, returning a new word.
pub fn push(word: &[usize], symbol: usize) -> Word {
    let mut out = Vec::with_capacity(word.len() + 1);
    out.extend_from_slice(word);
    out.push(symbol);
    out
}

/// Concatenates two words.
pub fn concat(a: &[usize], b: &[usize]) -> Word {
    let mut out = Vec::with_capacity(a.len() + b.len());
    out.extend_from_slice(a);
    out.extend_from_slice(b);
    out
}

/// All non-empty prefixes of `word`, shortest first.
pub fn nonempty_prefixes(word: &[usize]) -> impl Iterator<Item = &[usize]> {
    (1..=word.len()).map(move |i| &word[..i])
}

/// Length-then-lexicographic order: shorter words first, ties broken by the numeric
/// (i.e. caller-alphabet-defined) order of symbol indices. This is the single ordering
/// used for every deterministic tie-break in the learner (§4.3's "Ordering and
/// tie-breaks").
pub fn len_lex_cmp(a: &[usize], b: &[usize]) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Renders a word back through its alphabet's symbols, for display/logging. `S` only
/// needs `Debug`, matching the relaxed symbol bound documented in spec §6.
pub fn render<S: fmt::Debug + Clone + Eq + std::hash::Hash>(
    word: &[usize],
    alphabet: &Alphabet<S>,
) -> String {
    if word.is_empty() {
        return "ε".to_string();
    }
    word.iter()
        .map(|&i| format!("{:?}", alphabet.symbol(i)))
        .collect::<Vec<_>>()
        .join("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_length_then_lex() {
        let mut words = vec![vec![1, 0], vec![0], vec![0, 0], vec![1]];
        words.sort_by(|a, b| len_lex_cmp(a, b));
        assert_eq!(words, vec![vec![0], vec![1], vec![0, 0], vec![1, 0]]);
    }

    #[test]
    fn prefixes_are_nonempty_and_ordered() {
        let word = vec![0, 1, 0];
        let prefixes: Vec<_> = nonempty_prefixes(&word).map(|p| p.to_vec()).collect();
        assert_eq!(prefixes, vec![vec![0], vec![0, 1], vec![0, 1, 0]]);
    }
}
