//! Core vocabulary-trainer library.
//!
//! Provides:
//! - Answer grading (Levenshtein distance, similarity, sentence signatures)
//! - Record schema migration for persisted word collections
//! - Quiz candidate selection policies
//! - Multiple-choice prompt construction and pure grading
//! - A spaced-repetition item scheduler with O/Δ/X marking
//!
//! All decisions are pure: storage, audio, and the interactive loops live in
//! the application crate.

pub mod error;
pub mod matching;
pub mod migrate;
pub mod quiz;
pub mod scheduler;
pub mod select;
pub mod types;

pub use error::{Result, SchedulerError};
pub use matching::{
    first_letter_signature, grade_spelling, levenshtein, normalize_answer, sentence_matches,
    similarity_ratio, SpellingGrade,
};
pub use migrate::{normalize, RawWordRecord};
pub use quiz::{
    build_choice_prompt, grade_choice, grade_typed, ChoicePrompt, Outcome, SessionTally,
    DEFAULT_SENTENCE_THRESHOLD, MAX_DISTRACTORS,
};
pub use scheduler::{
    ItemPools, ReviewMark, ReviewReceipt, ReviewStatus, SchedulerItem, INTERVALS, MAX_MEMORY,
};
pub use select::{select, Strategy, TagFilter, GRADUATION_MARGIN};
pub use types::{
    accuracy, ModeStats, QuizMode, SessionLogEntry, WordCollection, WordRecord, SENTENCE_TAG,
};
