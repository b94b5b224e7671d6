//! Core types for the vocabulary trainer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tag that marks a record as a sentence-learning item.
pub const SENTENCE_TAG: &str = "sentence";

/// Quiz mode. Every record carries one counter pair per mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizMode {
    Choice,
    Recall,
    Spelling,
    Sentence,
}

impl QuizMode {
    /// Modes whose counters must exist on every record after a load.
    pub const REQUIRED: [QuizMode; 4] = [
        QuizMode::Choice,
        QuizMode::Recall,
        QuizMode::Spelling,
        QuizMode::Sentence,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Choice => "choice",
            Self::Recall => "recall",
            Self::Spelling => "spelling",
            Self::Sentence => "sentence",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "choice" => Some(Self::Choice),
            "recall" => Some(Self::Recall),
            "spelling" => Some(Self::Spelling),
            "sentence" => Some(Self::Sentence),
            _ => None,
        }
    }
}

/// Correct/wrong counter pair for one quiz mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeStats {
    pub correct: u32,
    pub wrong: u32,
}

impl ModeStats {
    pub fn total(&self) -> u32 {
        self.correct + self.wrong
    }

    /// Fraction of attempts that were wrong; `1.0` for never-attempted items
    /// so they rank as maximally hard.
    pub fn error_rate(&self) -> f64 {
        if self.total() == 0 {
            1.0
        } else {
            f64::from(self.wrong) / f64::from(self.total())
        }
    }

    pub fn record(&mut self, correct: bool) {
        if correct {
            self.correct += 1;
        } else {
            self.wrong += 1;
        }
    }
}

/// A persisted entry for one word or sentence, keyed by its text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordRecord {
    pub definition: String,
    pub examples: Vec<String>,
    pub tags: Vec<String>,
    pub stats: BTreeMap<String, ModeStats>,
    pub added_at: String,
}

impl WordRecord {
    pub fn new(
        definition: String,
        examples: Vec<String>,
        tags: Vec<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let stats = QuizMode::REQUIRED
            .iter()
            .map(|m| (m.as_str().to_string(), ModeStats::default()))
            .collect();
        Self {
            definition,
            examples,
            tags,
            stats,
            added_at: now.to_rfc3339(),
        }
    }

    pub fn is_sentence(&self) -> bool {
        self.tags.iter().any(|t| t == SENTENCE_TAG)
    }

    /// Counter a typed-answer quiz should score against: sentence-tagged
    /// records use the `sentence` counter instead of `spelling`.
    pub fn scoring_mode(&self, mode: QuizMode) -> QuizMode {
        if mode == QuizMode::Spelling && self.is_sentence() {
            QuizMode::Sentence
        } else {
            mode
        }
    }

    pub fn stats_for(&self, mode: QuizMode) -> ModeStats {
        self.stats.get(mode.as_str()).copied().unwrap_or_default()
    }

    pub fn stats_mut(&mut self, mode: QuizMode) -> &mut ModeStats {
        self.stats.entry(mode.as_str().to_string()).or_default()
    }
}

/// The full word collection, keyed by normalized word/sentence text.
pub type WordCollection = BTreeMap<String, WordRecord>;

/// Session accuracy as a percentage, rounded to one decimal. Zero when no
/// items were attempted.
pub fn accuracy(correct: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        (f64::from(correct) / f64::from(total) * 1000.0).round() / 10.0
    }
}

/// One completed quiz run, appended to the session log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionLogEntry {
    pub mode: String,
    pub total: u32,
    pub correct: u32,
    pub accuracy: f64,
    pub started_at: String,
    pub duration: f64,
}

impl SessionLogEntry {
    pub fn new(
        mode: QuizMode,
        total: u32,
        correct: u32,
        started_at: DateTime<Utc>,
        duration_secs: f64,
    ) -> Self {
        Self {
            mode: mode.as_str().to_string(),
            total,
            correct,
            accuracy: accuracy(correct, total),
            started_at: started_at.to_rfc3339(),
            duration: (duration_secs * 10.0).round() / 10.0,
        }
    }
}
