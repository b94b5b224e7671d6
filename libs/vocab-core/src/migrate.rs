//! Schema migration for persisted word records.
//!
//! Older files may lack fields, store `tags` as a bare string, or carry
//! half-filled counter pairs. [`normalize`] fills every gap with documented
//! defaults and reports whether anything changed so the caller can persist
//! the migrated collection once.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::types::{ModeStats, QuizMode, WordRecord};

/// `tags` as found on disk: either a sequence or a legacy bare string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawTags {
    Many(Vec<String>),
    One(String),
}

/// Counter pair with possibly missing sub-keys.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawModeStats {
    #[serde(default)]
    pub correct: Option<u32>,
    #[serde(default)]
    pub wrong: Option<u32>,
}

/// A word record as deserialized from disk, before migration. Every field
/// is optional; [`normalize`] supplies the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawWordRecord {
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub examples: Option<Vec<String>>,
    #[serde(default)]
    pub tags: Option<RawTags>,
    #[serde(default)]
    pub stats: Option<BTreeMap<String, RawModeStats>>,
    #[serde(default)]
    pub added_at: Option<String>,
}

/// Fill missing fields with defaults. Returns the migrated record and
/// whether any rule had to change something. Never fails; records lacking
/// `added_at` are retroactively stamped with `now`.
pub fn normalize(raw: RawWordRecord, now: DateTime<Utc>) -> (WordRecord, bool) {
    let mut changed = false;

    let tags = match raw.tags {
        Some(RawTags::Many(tags)) => tags,
        Some(RawTags::One(tag)) => {
            changed = true;
            vec![tag]
        }
        None => {
            changed = true;
            Vec::new()
        }
    };

    let examples = raw.examples.unwrap_or_else(|| {
        changed = true;
        Vec::new()
    });

    let definition = raw.definition.unwrap_or_else(|| {
        changed = true;
        String::new()
    });

    let raw_stats = raw.stats.unwrap_or_else(|| {
        changed = true;
        BTreeMap::new()
    });

    let mut stats: BTreeMap<String, ModeStats> = BTreeMap::new();
    for (mode, counters) in raw_stats {
        if counters.correct.is_none() || counters.wrong.is_none() {
            changed = true;
        }
        stats.insert(
            mode,
            ModeStats {
                correct: counters.correct.unwrap_or(0),
                wrong: counters.wrong.unwrap_or(0),
            },
        );
    }
    for mode in QuizMode::REQUIRED {
        if !stats.contains_key(mode.as_str()) {
            stats.insert(mode.as_str().to_string(), ModeStats::default());
            changed = true;
        }
    }

    let added_at = raw.added_at.unwrap_or_else(|| {
        changed = true;
        now.to_rfc3339()
    });

    let record = WordRecord {
        definition,
        examples,
        tags,
        stats,
        added_at,
    };
    (record, changed)
}
