//! Reference-to-candidate token matching.
//!
//! Each reference token is classified independently as an exact match, a
//! partial (fuzzy) match, or unmatched. Candidate tokens are never consumed,
//! so one candidate word can satisfy several reference words.

use serde::{Deserialize, Serialize};

use crate::normalize::Token;

/// Largest edit distance at which two words still count as a partial match.
pub const MAX_PARTIAL_EDIT_DISTANCE: usize = 2;

/// Match counts for one reference/candidate pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchTally {
    /// Number of tokens in the reference text.
    pub reference_token_count: usize,
    /// Reference tokens found verbatim among the candidate tokens.
    pub exact_matches: usize,
    /// Reference tokens with an approximate counterpart in the candidate.
    pub partial_matches: usize,
}

impl MatchTally {
    /// Reference tokens with neither an exact nor a partial match.
    pub fn unmatched(&self) -> usize {
        self.reference_token_count
            .saturating_sub(self.exact_matches + self.partial_matches)
    }
}

/// Levenshtein distance between two words, counted in characters.
///
/// Builds the full `(len(a)+1) x (len(b)+1)` matrix. The matrix is allocated
/// per call.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut matrix = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in matrix[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let deletion = matrix[i - 1][j] + 1;
            let insertion = matrix[i][j - 1] + 1;
            let substitution = matrix[i - 1][j - 1] + cost;
            matrix[i][j] = deletion.min(insertion).min(substitution);
        }
    }

    matrix[a.len()][b.len()]
}

/// Whether `candidate` is an approximate match for `reference`.
///
/// True when either word contains the other, or when they are within
/// [`MAX_PARTIAL_EDIT_DISTANCE`] edits of each other.
pub fn is_partial_match(reference: &str, candidate: &str) -> bool {
    candidate.contains(reference)
        || reference.contains(candidate)
        || edit_distance(reference, candidate) <= MAX_PARTIAL_EDIT_DISTANCE
}

/// Count exact and partial matches of the reference tokens in the candidate.
///
/// Reference tokens are visited in order. Exact matches are checked against
/// the whole candidate sequence before any fuzzy comparison; the fuzzy scan
/// stops at the first candidate token that qualifies.
pub fn match_tokens(reference: &[Token], candidate: &[Token]) -> MatchTally {
    let mut tally = MatchTally {
        reference_token_count: reference.len(),
        ..MatchTally::default()
    };

    for r in reference {
        if candidate.iter().any(|c| c.text == r.text) {
            tally.exact_matches += 1;
            continue;
        }

        if candidate.iter().any(|c| is_partial_match(&r.text, &c.text)) {
            tally.partial_matches += 1;
        }
    }

    tally
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    fn tally(reference: &str, candidate: &str) -> MatchTally {
        match_tokens(&normalize(reference), &normalize(candidate))
    }

    #[test]
    fn edit_distance_classic_cases() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("flaw", "lawn"), 2);
        assert_eq!(edit_distance("quick", "quik"), 1);
        assert_eq!(edit_distance("same", "same"), 0);
    }

    #[test]
    fn edit_distance_against_empty() {
        assert_eq!(edit_distance("", ""), 0);
        assert_eq!(edit_distance("abc", ""), 3);
        assert_eq!(edit_distance("", "abcd"), 4);
    }

    #[test]
    fn edit_distance_is_symmetric() {
        for (a, b) in [("house", "horse"), ("read", "red"), ("a", "xyz")] {
            assert_eq!(edit_distance(a, b), edit_distance(b, a));
        }
    }

    #[test]
    fn edit_distance_counts_characters_not_bytes() {
        assert_eq!(edit_distance("café", "cafe"), 1);
    }

    #[test]
    fn identical_text_is_all_exact() {
        let t = tally("The cat sat on the mat", "the cat sat on the mat");
        assert_eq!(t.reference_token_count, 6);
        assert_eq!(t.exact_matches, 6);
        assert_eq!(t.partial_matches, 0);
        assert_eq!(t.unmatched(), 0);
    }

    #[test]
    fn misspelling_is_partial() {
        let t = tally("quick brown fox", "quik brown fox");
        assert_eq!(t.exact_matches, 2);
        assert_eq!(t.partial_matches, 1);
    }

    #[test]
    fn containment_is_partial_even_when_far_apart() {
        // "walk" is inside "walking" (distance 3)
        let t = tally("walk", "walking");
        assert_eq!(t.partial_matches, 1);
        let t = tally("walking", "walk");
        assert_eq!(t.partial_matches, 1);
    }

    #[test]
    fn distant_words_are_unmatched() {
        let t = tally("elephant", "mouse");
        assert_eq!(t.exact_matches, 0);
        assert_eq!(t.partial_matches, 0);
        assert_eq!(t.unmatched(), 1);
    }

    #[test]
    fn exact_match_anywhere_beats_earlier_partial() {
        // "cats" would partially match first, but the exact "cat" wins.
        let t = tally("cat", "cats cat");
        assert_eq!(t.exact_matches, 1);
        assert_eq!(t.partial_matches, 0);
    }

    #[test]
    fn order_does_not_matter_for_counts() {
        let t = tally("one two three", "three two one");
        assert_eq!(t.exact_matches, 3);
    }

    #[test]
    fn one_candidate_token_can_serve_many_reference_tokens() {
        let t = tally("the the the", "the");
        assert_eq!(t.exact_matches, 3);

        // Short words are within two edits of almost anything short.
        let t = tally("a an at", "as");
        assert_eq!(t.partial_matches, 3);
    }

    #[test]
    fn empty_candidate_matches_nothing() {
        let t = tally("some words here", "");
        assert_eq!(t.reference_token_count, 3);
        assert_eq!(t.exact_matches + t.partial_matches, 0);
    }

    #[test]
    fn empty_reference_has_zero_count() {
        let t = tally("", "anything at all");
        assert_eq!(t, MatchTally::default());
    }
}
