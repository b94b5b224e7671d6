//! Quiz engine decisions: prompt construction and grading.
//!
//! Everything here is pure; the interactive loop lives in the application
//! crate and calls in with an answer the user already typed.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeSet;

use crate::matching::{grade_spelling, sentence_matches, SpellingGrade};
use crate::types::{accuracy, WordCollection};

/// Similarity a sentence answer must reach when graded by signature + ratio.
pub const DEFAULT_SENTENCE_THRESHOLD: f64 = 0.90;

/// Distractors drawn for a multiple-choice prompt (fewer when the pool is
/// smaller).
pub const MAX_DISTRACTORS: usize = 3;

/// A multiple-choice question: shuffled definitions, one of them correct.
#[derive(Debug, Clone)]
pub struct ChoicePrompt {
    pub key: String,
    pub options: Vec<String>,
    /// Index of the correct definition in `options` (0-based).
    pub answer: usize,
}

/// Build a prompt for `key`: its definition plus up to [`MAX_DISTRACTORS`]
/// distinct non-empty definitions drawn from the other records. Returns
/// `None` when the record is missing or has no definition to ask about.
pub fn build_choice_prompt<R: Rng>(
    words: &WordCollection,
    key: &str,
    rng: &mut R,
) -> Option<ChoicePrompt> {
    let record = words.get(key)?;
    let correct = record.definition.clone();
    if correct.is_empty() {
        return None;
    }

    let pool: Vec<&String> = words
        .iter()
        .filter(|(other, _)| other.as_str() != key)
        .map(|(_, rec)| &rec.definition)
        .filter(|def| !def.is_empty() && **def != correct)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let k = MAX_DISTRACTORS.min(pool.len());
    let mut options: Vec<String> = pool
        .choose_multiple(rng, k)
        .map(|def| (*def).clone())
        .collect();
    options.push(correct.clone());
    options.shuffle(rng);

    let answer = options
        .iter()
        .position(|opt| *opt == correct)
        .expect("correct definition is always among the options");

    Some(ChoicePrompt {
        key: key.to_string(),
        options,
        answer,
    })
}

/// Grade a typed 1-based option index. Non-numeric or out-of-range input is
/// wrong, never an error.
pub fn grade_choice(prompt: &ChoicePrompt, input: &str) -> bool {
    match input.trim().parse::<usize>() {
        Ok(n) if (1..=prompt.options.len()).contains(&n) => n - 1 == prompt.answer,
        _ => false,
    }
}

/// Per-item grading outcome. `Almost` counts as wrong in stats and tallies
/// but is reported distinctly to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Almost,
    Wrong,
}

impl Outcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, Outcome::Correct)
    }
}

/// Grade a typed answer against the target text. Sentences are accepted by
/// exact (normalized) match or signature + similarity; single words by edit
/// distance, with distance 1 reported as [`Outcome::Almost`].
pub fn grade_typed(is_sentence: bool, answer: &str, target: &str, threshold: f64) -> Outcome {
    if is_sentence {
        if sentence_matches(answer, target, threshold) {
            Outcome::Correct
        } else {
            Outcome::Wrong
        }
    } else {
        match grade_spelling(answer, target) {
            SpellingGrade::Correct => Outcome::Correct,
            SpellingGrade::Almost => Outcome::Almost,
            SpellingGrade::Wrong => Outcome::Wrong,
        }
    }
}

/// Running totals for one session.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionTally {
    pub total: u32,
    pub correct: u32,
}

impl SessionTally {
    pub fn record(&mut self, outcome: Outcome) {
        self.total += 1;
        if outcome.is_correct() {
            self.correct += 1;
        }
    }

    pub fn accuracy(&self) -> f64 {
        accuracy(self.correct, self.total)
    }
}
