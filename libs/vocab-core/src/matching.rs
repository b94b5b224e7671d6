//! Answer grading: edit distance, similarity, and spelling/sentence rules.

use serde::{Deserialize, Serialize};

/// Levenshtein distance between two strings, counted in Unicode scalar
/// values. Case sensitivity is the caller's responsibility.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let (long, short): (Vec<char>, Vec<char>) = if a.chars().count() >= b.chars().count() {
        (a.chars().collect(), b.chars().collect())
    } else {
        (b.chars().collect(), a.chars().collect())
    };

    if short.is_empty() {
        return long.len();
    }

    // Rolling row sized by the shorter operand.
    let mut prev: Vec<usize> = (0..=short.len()).collect();
    let mut curr = vec![0usize; short.len() + 1];

    for (i, &ca) in long.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in short.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}

/// Normalized similarity in `[0.0, 1.0]`: `1 - distance / max(len)`.
/// Two empty strings are identical.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / max_len as f64
}

/// Trim and collapse runs of whitespace to single spaces.
pub fn normalize_answer(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First letter of every alphanumeric token, lower-cased and concatenated.
/// A cheap fingerprint checked before full similarity grading.
pub fn first_letter_signature(s: &str) -> String {
    s.split_whitespace()
        .filter_map(|token| token.chars().find(|c| c.is_alphanumeric()))
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Outcome of grading a typed single-word answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpellingGrade {
    /// Exact match.
    Correct,
    /// One edit away. Scored as wrong, reported distinctly.
    Almost,
    Wrong,
}

/// Grade a typed word against the target, case-insensitively.
pub fn grade_spelling(answer: &str, target: &str) -> SpellingGrade {
    let distance = levenshtein(
        &answer.trim().to_lowercase(),
        &target.trim().to_lowercase(),
    );
    match distance {
        0 => SpellingGrade::Correct,
        1 => SpellingGrade::Almost,
        _ => SpellingGrade::Wrong,
    }
}

/// Grade a typed sentence. Correct when the whitespace-normalized,
/// case-insensitive forms are equal, or when the first-letter signatures
/// match and the similarity ratio meets `threshold`.
pub fn sentence_matches(answer: &str, target: &str, threshold: f64) -> bool {
    let answer_norm = normalize_answer(answer).to_lowercase();
    let target_norm = normalize_answer(target).to_lowercase();

    if answer_norm == target_norm {
        return true;
    }

    first_letter_signature(answer) == first_letter_signature(target)
        && similarity_ratio(&answer_norm, &target_norm) >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn distance_basics() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("abc", "abc"), 0);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("saturday", "sunday"), 3);
    }

    #[test]
    fn distance_is_symmetric_and_bounded() {
        let pairs = [("tensor", "sensor"), ("a", "xyz"), ("같다", "갔다"), ("", "word")];
        for (a, b) in pairs {
            assert_eq!(levenshtein(a, b), levenshtein(b, a));
            assert!(levenshtein(a, b) <= a.chars().count().max(b.chars().count()));
        }
    }

    #[test]
    fn similarity_of_empty_pair_is_one() {
        assert_eq!(similarity_ratio("", ""), 1.0);
        assert_eq!(similarity_ratio("abc", "abc"), 1.0);
        assert!(similarity_ratio("kitten", "sitting") > 0.5);
    }

    #[test]
    fn spelling_grades_by_distance() {
        assert_eq!(grade_spelling("attention", "attention"), SpellingGrade::Correct);
        assert_eq!(grade_spelling("Attention", "attention"), SpellingGrade::Correct);
        assert_eq!(grade_spelling("attantion", "attention"), SpellingGrade::Almost);
        assert_eq!(grade_spelling("xyz", "attention"), SpellingGrade::Wrong);
    }

    #[test]
    fn signature_takes_first_alphanumeric_of_each_token() {
        assert_eq!(first_letter_signature("The quick brown fox jumps."), "tqbfj");
        assert_eq!(first_letter_signature("  \"quoted\"  words "), "qw");
        assert_eq!(first_letter_signature(""), "");
    }

    #[test]
    fn sentence_exact_match_ignores_case_and_spacing() {
        assert!(sentence_matches(
            "  the QUICK brown   fox jumps. ",
            "The quick brown fox jumps.",
            0.90
        ));
    }

    #[test]
    fn sentence_accepts_close_answer_with_matching_signature() {
        // One letter dropped: signature still "tqbfj", ratio >= 0.9.
        assert!(sentence_matches(
            "The quik brown fox jumps.",
            "The quick brown fox jumps.",
            0.90
        ));
    }

    #[test]
    fn sentence_rejects_when_signature_differs() {
        assert!(!sentence_matches(
            "A quick brown fox jumps.",
            "The quick brown fox jumps.",
            0.50
        ));
    }

    #[test]
    fn sentence_rejects_low_similarity() {
        assert!(!sentence_matches(
            "The q b f j",
            "The quick brown fox jumps.",
            0.90
        ));
    }
}
