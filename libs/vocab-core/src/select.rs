//! Candidate selection for quiz sessions.
//!
//! Given the full collection, a strategy picks and orders the keys to quiz.
//! Selection is pure apart from the caller-supplied RNG, so orderings are
//! testable deterministically.

use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Reverse;

use crate::types::{QuizMode, WordCollection, WordRecord};

/// A word graduates out of the review queue once its correct count leads
/// the wrong count by this margin on the choice counter.
pub const GRADUATION_MARGIN: u32 = 2;

/// How candidate words are chosen and ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Uniform sample without replacement.
    Random,
    /// Fewest attempts first; most error-prone among those first.
    LeastPracticed,
    /// Review queue: not-yet-graduated words, most wrong first.
    MostWrong,
    /// Hardest spellings first: by wrong count, then error rate, then total.
    SpellingHard,
    /// Least-drilled spellings first.
    SpellingLeast,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::LeastPracticed => "least",
            Self::MostWrong => "wrong",
            Self::SpellingHard => "hard",
            Self::SpellingLeast => "fresh",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "random" => Some(Self::Random),
            "least" => Some(Self::LeastPracticed),
            "wrong" => Some(Self::MostWrong),
            "hard" => Some(Self::SpellingHard),
            "fresh" => Some(Self::SpellingLeast),
            _ => None,
        }
    }
}

/// Tag include/exclude filters. Include is applied first, then exclude.
#[derive(Debug, Clone, Default)]
pub struct TagFilter {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl TagFilter {
    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    fn admits(&self, record: &WordRecord) -> bool {
        if !self.include.is_empty()
            && !record.tags.iter().any(|t| self.include.contains(t))
        {
            return false;
        }
        !record.tags.iter().any(|t| self.exclude.contains(t))
    }
}

/// Pick up to `count` keys for a quiz in `mode`. Returns an empty vector
/// when nothing is eligible; callers treat that as "nothing to quiz".
pub fn select<R: Rng>(
    words: &WordCollection,
    count: usize,
    strategy: Strategy,
    mode: QuizMode,
    filter: &TagFilter,
    rng: &mut R,
) -> Vec<String> {
    let mut pool: Vec<(&String, &WordRecord)> = words
        .iter()
        .filter(|(_, rec)| filter.admits(rec))
        .collect();

    match strategy {
        Strategy::Random => {
            pool.shuffle(rng);
        }
        Strategy::LeastPracticed => {
            if needs_definition(mode) {
                pool.retain(|(_, rec)| !rec.definition.is_empty());
            }
            pool.sort_by_key(|(_, rec)| {
                let s = rec.stats_for(mode);
                (s.total(), Reverse(s.wrong))
            });
        }
        Strategy::MostWrong => {
            pool.retain(|(_, rec)| {
                let s = rec.stats_for(QuizMode::Choice);
                s.correct < s.wrong + GRADUATION_MARGIN
            });
            pool.sort_by_key(|(_, rec)| Reverse(rec.stats_for(QuizMode::Choice).wrong));
        }
        Strategy::SpellingHard => {
            pool.sort_by(|(_, a), (_, b)| {
                let (a, b) = (a.stats_for(mode), b.stats_for(mode));
                b.wrong
                    .cmp(&a.wrong)
                    .then(b.error_rate().total_cmp(&a.error_rate()))
                    .then(b.total().cmp(&a.total()))
            });
        }
        Strategy::SpellingLeast => {
            pool.sort_by_key(|(_, rec)| {
                let s = rec.stats_for(mode);
                (s.total(), Reverse(s.wrong))
            });
        }
    }

    pool.truncate(count);
    pool.into_iter().map(|(key, _)| key.clone()).collect()
}

/// Choice and recall prompts are built from the definition, so those modes
/// skip records without one.
fn needs_definition(mode: QuizMode) -> bool {
    matches!(mode, QuizMode::Choice | QuizMode::Recall)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ModeStats, WordRecord};
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record(definition: &str, tags: &[&str]) -> WordRecord {
        WordRecord::new(
            definition.to_string(),
            vec![],
            tags.iter().map(|t| t.to_string()).collect(),
            Utc::now(),
        )
    }

    fn with_stats(mut rec: WordRecord, mode: QuizMode, correct: u32, wrong: u32) -> WordRecord {
        *rec.stats_mut(mode) = ModeStats { correct, wrong };
        rec
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn empty_collection_selects_nothing() {
        let words = WordCollection::new();
        let picked = select(
            &words,
            5,
            Strategy::Random,
            QuizMode::Choice,
            &TagFilter::default(),
            &mut rng(),
        );
        assert!(picked.is_empty());
    }

    #[test]
    fn random_sample_is_without_replacement() {
        let mut words = WordCollection::new();
        for key in ["alpha", "beta", "gamma"] {
            words.insert(key.to_string(), record("d", &[]));
        }
        let mut picked = select(
            &words,
            10,
            Strategy::Random,
            QuizMode::Choice,
            &TagFilter::default(),
            &mut rng(),
        );
        picked.sort();
        assert_eq!(picked, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn least_practiced_orders_by_total_then_wrong() {
        let mut words = WordCollection::new();
        words.insert(
            "seen".into(),
            with_stats(record("d", &[]), QuizMode::Choice, 5, 0),
        );
        words.insert(
            "fresh".into(),
            with_stats(record("d", &[]), QuizMode::Choice, 0, 0),
        );
        words.insert(
            "shaky".into(),
            with_stats(record("d", &[]), QuizMode::Choice, 0, 2),
        );
        let picked = select(
            &words,
            3,
            Strategy::LeastPracticed,
            QuizMode::Choice,
            &TagFilter::default(),
            &mut rng(),
        );
        // "shaky" (2 attempts) sorts after "fresh" (0), "seen" last.
        assert_eq!(picked, vec!["fresh", "shaky", "seen"]);
    }

    #[test]
    fn least_practiced_skips_records_without_definition() {
        let mut words = WordCollection::new();
        words.insert("bare".into(), record("", &[]));
        words.insert("full".into(), record("d", &[]));
        let picked = select(
            &words,
            5,
            Strategy::LeastPracticed,
            QuizMode::Choice,
            &TagFilter::default(),
            &mut rng(),
        );
        assert_eq!(picked, vec!["full"]);
    }

    #[test]
    fn most_wrong_excludes_graduated_words() {
        let mut words = WordCollection::new();
        words.insert(
            "graduated".into(),
            with_stats(record("d", &[]), QuizMode::Choice, 5, 1),
        );
        words.insert(
            "struggling".into(),
            with_stats(record("d", &[]), QuizMode::Choice, 1, 4),
        );
        words.insert(
            "borderline".into(),
            with_stats(record("d", &[]), QuizMode::Choice, 2, 1),
        );
        let picked = select(
            &words,
            5,
            Strategy::MostWrong,
            QuizMode::Choice,
            &TagFilter::default(),
            &mut rng(),
        );
        // correct >= wrong + 2 never appears; most wrong first.
        assert_eq!(picked, vec!["struggling", "borderline"]);
    }

    #[test]
    fn spelling_hard_ranks_never_attempted_as_hard() {
        let mut words = WordCollection::new();
        words.insert(
            "mastered".into(),
            with_stats(record("d", &[]), QuizMode::Spelling, 9, 0),
        );
        words.insert(
            "untouched".into(),
            with_stats(record("d", &[]), QuizMode::Spelling, 0, 0),
        );
        words.insert(
            "failing".into(),
            with_stats(record("d", &[]), QuizMode::Spelling, 0, 3),
        );
        let picked = select(
            &words,
            3,
            Strategy::SpellingHard,
            QuizMode::Spelling,
            &TagFilter::default(),
            &mut rng(),
        );
        // "failing" leads on wrong count; "untouched" (error rate 1.0)
        // outranks the well-practiced word.
        assert_eq!(picked, vec!["failing", "untouched", "mastered"]);
    }

    #[test]
    fn include_filter_applies_before_exclude() {
        let mut words = WordCollection::new();
        words.insert("kept".into(), record("d", &["noun"]));
        words.insert("other".into(), record("d", &["verb"]));
        words.insert("dropped".into(), record("d", &["noun", "archaic"]));
        let filter = TagFilter {
            include: vec!["noun".into()],
            exclude: vec!["archaic".into()],
        };
        let picked = select(
            &words,
            5,
            Strategy::LeastPracticed,
            QuizMode::Choice,
            &filter,
            &mut rng(),
        );
        assert_eq!(picked, vec!["kept"]);
    }

    #[test]
    fn count_caps_the_selection() {
        let mut words = WordCollection::new();
        for key in ["a", "b", "c", "d"] {
            words.insert(key.to_string(), record("d", &[]));
        }
        let picked = select(
            &words,
            2,
            Strategy::LeastPracticed,
            QuizMode::Choice,
            &TagFilter::default(),
            &mut rng(),
        );
        assert_eq!(picked.len(), 2);
    }
}
