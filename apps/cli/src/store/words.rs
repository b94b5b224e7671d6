//! Word collection storage: load with migration, full-overwrite save.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use vocab_core::migrate::{normalize, RawWordRecord};
use vocab_core::types::WordCollection;

use super::error::Result;

/// Logical load/save of `words.json`.
///
/// Single-writer by design: a save rewrites the whole collection, so
/// external processes racing on the same file lose updates (last save
/// wins). No locking is attempted.
pub struct WordStore {
    path: PathBuf,
}

impl WordStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the collection, creating an empty file first when missing.
    /// Every record is migrated to the current schema; if anything changed
    /// the file is rewritten once, so callers always see migrated records.
    pub fn load(&self) -> Result<WordCollection> {
        if !self.path.exists() {
            fs::write(&self.path, "{}\n")?;
        }
        let text = fs::read_to_string(&self.path)?;
        let raw: BTreeMap<String, RawWordRecord> = serde_json::from_str(&text)?;

        let now = Utc::now();
        let mut changed = false;
        let mut words = WordCollection::new();
        for (key, record) in raw {
            let (record, migrated) = normalize(record, now);
            changed |= migrated;
            words.insert(key, record);
        }

        if changed {
            tracing::info!(path = %self.path.display(), "migrated word records to current schema");
            self.save(&words)?;
        }
        Ok(words)
    }

    /// Full-collection overwrite, pretty-printed with non-ASCII text kept
    /// literal for diffability.
    pub fn save(&self, words: &WordCollection) -> Result<()> {
        let mut text = serde_json::to_string_pretty(words)?;
        text.push('\n');
        fs::write(&self.path, text)?;
        Ok(())
    }
}
