//! Fuzzy answer grading for write-mode sessions.
//!
//! Typed answers are normalized (lowercase, punctuation stripped, whitespace
//! collapsed) and accepted on exact match, substring containment in either
//! direction, or Levenshtein similarity strictly above a threshold.

use serde::{Deserialize, Serialize};

/// Similarity a non-matching answer must strictly exceed to be accepted.
pub const SIMILARITY_THRESHOLD: f64 = 0.8;

/// Outcome of grading one typed answer.
///
/// The verdict is advisory: a self-graded learning tool lets the learner
/// overrule it through [`mark_correct`](GradeResult::mark_correct).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeResult {
    pub normalized_user: String,
    pub normalized_reference: String,
    /// Levenshtein similarity between the normalized strings, 0.0 to 1.0.
    pub similarity: f64,
    pub is_correct: bool,
}

impl GradeResult {
    /// Accept the answer after the fact without re-grading. Idempotent.
    pub fn mark_correct(&mut self) {
        self.is_correct = true;
    }
}

/// Grade a typed answer against the reference using the default threshold.
pub fn grade(user: &str, reference: &str) -> GradeResult {
    grade_with_threshold(user, reference, SIMILARITY_THRESHOLD)
}

/// Grade a typed answer against the reference.
///
/// Correct iff the normalized strings match exactly, one contains the other,
/// or their similarity strictly exceeds `threshold`. Containment lets a
/// short reference inside a longer answer ("Paris" in "I think it's Paris")
/// pass even when the length difference drags the similarity score down.
pub fn grade_with_threshold(user: &str, reference: &str, threshold: f64) -> GradeResult {
    let normalized_user = normalize_answer(user);
    let normalized_reference = normalize_answer(reference);

    let similarity = similarity(&normalized_user, &normalized_reference);
    let is_correct = normalized_user == normalized_reference
        || normalized_reference.contains(&normalized_user)
        || normalized_user.contains(&normalized_reference)
        || similarity > threshold;

    GradeResult {
        normalized_user,
        normalized_reference,
        similarity,
        is_correct,
    }
}

/// Normalize free text for comparison: lowercase, strip everything that is
/// not a word character or whitespace, then trim and collapse whitespace
/// runs. Punctuation goes first so removed characters cannot leave doubled
/// spaces behind.
pub fn normalize_answer(s: &str) -> String {
    let stripped: String = s
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Classic Levenshtein edit distance (single-character insert, delete,
/// substitute at unit cost), computed over chars with a two-row buffer.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1)
                .min(curr[j] + 1)
                .min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Normalized similarity in [0.0, 1.0]. Two empty strings are identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    (max_len - levenshtein_distance(a, b)) as f64 / max_len as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn levenshtein_classics() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", "abc"), 0);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("saturday", "sunday"), 3);
    }

    #[test]
    fn similarity_bounds() {
        assert_eq!(similarity("abc", "abc"), 1.0);
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("abc", ""), 0.0);
        assert!(similarity("kitten", "sitting") > 0.5);
    }

    #[test]
    fn normalization_order() {
        assert_eq!(normalize_answer("  It's  Paris!! "), "its paris");
        assert_eq!(normalize_answer("HELLO, WORLD."), "hello world");
        // Punctuation stripped before collapsing, so "a - b" has one space.
        assert_eq!(normalize_answer("a - b"), "a b");
        assert_eq!(normalize_answer("snake_case stays"), "snake_case stays");
    }

    #[test]
    fn exact_match_is_case_insensitive() {
        assert!(grade("Paris", "paris").is_correct);
    }

    #[test]
    fn punctuation_is_ignored() {
        assert!(grade("it's Paris!", "Paris").is_correct);
    }

    #[test]
    fn containment_accepts_longer_answers() {
        assert!(grade("The capital is Paris", "Paris").is_correct);
        assert!(grade("Paris", "Paris, France").is_correct);
    }

    #[test]
    fn similarity_threshold_is_strict() {
        // "pariz" vs "paris": distance 1 over length 5 is exactly 0.8,
        // which does not strictly exceed the threshold.
        let result = grade("Pariz", "Paris");
        assert_eq!(result.similarity, 0.8);
        assert!(!result.is_correct);
    }

    #[test]
    fn near_miss_above_threshold_passes() {
        // Not a substring of the reference: accepted purely on similarity,
        // distance 1 over length 7.
        let result = grade("adress", "address");
        assert!(result.similarity > 0.8);
        assert!(result.is_correct);
    }

    #[test]
    fn unrelated_answer_fails() {
        assert!(!grade("banana", "Paris").is_correct);
    }

    #[test]
    fn whitespace_runs_collapse_before_comparison() {
        assert!(grade("hello   world", "Hello World").is_correct);
    }

    #[test]
    fn both_empty_is_correct() {
        let result = grade("", "");
        assert_eq!(result.similarity, 1.0);
        assert!(result.is_correct);
    }

    #[test]
    fn mark_correct_is_idempotent() {
        let mut result = grade("banana", "Paris");
        assert!(!result.is_correct);
        result.mark_correct();
        assert!(result.is_correct);
        result.mark_correct();
        assert!(result.is_correct);
    }

    #[test]
    fn custom_threshold_is_respected() {
        let result = grade_with_threshold("Pariz", "Paris", 0.7);
        assert!(result.is_correct);
    }
}
