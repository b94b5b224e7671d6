//! Append-only session log: one JSON object per line.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use vocab_core::types::SessionLogEntry;

use super::error::Result;

/// Audit-log semantics: entries are appended, never rewritten or deleted.
pub struct SessionLog {
    path: PathBuf,
}

impl SessionLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn append(&self, entry: &SessionLogEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let line = serde_json::to_string(entry)?;
        writeln!(file, "{line}")?;
        Ok(())
    }

    /// Entries most-recent-first, at most `limit`. Malformed lines are
    /// skipped with a warning, never fatal.
    pub fn recent(&self, limit: usize) -> Result<Vec<SessionLogEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(&self.path)?;
        let mut entries: Vec<SessionLogEntry> = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match serde_json::from_str(line) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!(%err, "skipping malformed session log line");
                    None
                }
            })
            .collect();
        entries.reverse();
        entries.truncate(limit);
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use vocab_core::types::QuizMode;

    fn entry(mode: QuizMode, total: u32, correct: u32) -> SessionLogEntry {
        SessionLogEntry::new(mode, total, correct, Utc::now(), 12.34)
    }

    #[test]
    fn missing_log_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = SessionLog::new(dir.path().join("quizzes.jsonl"));
        assert!(log.recent(10).unwrap().is_empty());
    }

    #[test]
    fn entries_come_back_most_recent_first() {
        let dir = tempfile::tempdir().unwrap();
        let log = SessionLog::new(dir.path().join("quizzes.jsonl"));
        log.append(&entry(QuizMode::Choice, 10, 7)).unwrap();
        log.append(&entry(QuizMode::Spelling, 5, 5)).unwrap();

        let recent = log.recent(10).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].mode, "spelling");
        assert_eq!(recent[1].mode, "choice");

        let capped = log.recent(1).unwrap();
        assert_eq!(capped.len(), 1);
        assert_eq!(capped[0].mode, "spelling");
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizzes.jsonl");
        let log = SessionLog::new(path.clone());
        log.append(&entry(QuizMode::Choice, 3, 2)).unwrap();
        fs::write(
            &path,
            format!("{}garbage line\n", fs::read_to_string(&path).unwrap()),
        )
        .unwrap();
        log.append(&entry(QuizMode::Recall, 4, 4)).unwrap();

        let recent = log.recent(10).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].mode, "recall");
    }

    #[test]
    fn append_never_rewrites_prior_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizzes.jsonl");
        let log = SessionLog::new(path.clone());
        log.append(&entry(QuizMode::Choice, 1, 1)).unwrap();
        let first = fs::read_to_string(&path).unwrap();
        log.append(&entry(QuizMode::Choice, 2, 0)).unwrap();
        let both = fs::read_to_string(&path).unwrap();
        assert!(both.starts_with(&first));
    }
}
