//! Best-effort pronunciation playback with an on-disk audio cache.
//!
//! Synthesis and playback run external commands from the user's config.
//! When neither is configured, or a command fails, [`SpeechEngine::speak`]
//! returns `false` and the caller falls back to showing the text. Audio is
//! never required for a session to proceed.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use sha2::{Digest, Sha256};

pub struct SpeechEngine {
    synth: Option<String>,
    play: Option<String>,
    word_dir: PathBuf,
    sentence_dir: PathBuf,
}

impl SpeechEngine {
    pub fn new(
        synth: Option<String>,
        play: Option<String>,
        word_dir: PathBuf,
        sentence_dir: PathBuf,
    ) -> Self {
        Self {
            synth,
            play,
            word_dir,
            sentence_dir,
        }
    }

    /// Speak `text`, synthesizing into the cache on first use. Returns
    /// whether audio was actually played; never errors.
    pub fn speak(&self, text: &str) -> bool {
        let Some(play) = &self.play else {
            tracing::debug!("no playback command configured");
            return false;
        };

        let cached = self.cache_path(text);
        if !cached.exists() {
            let Some(synth) = &self.synth else {
                tracing::debug!("no synthesis command configured");
                return false;
            };
            if !run_command(synth, text, &cached) || !cached.exists() {
                return false;
            }
        }

        run_command(play, text, &cached)
    }

    /// Drop any cached audio for `text`, e.g. when its record is deleted.
    pub fn evict(&self, text: &str) {
        let _ = std::fs::remove_file(self.cache_path(text));
    }

    /// Cache location for `text`: single words by their lower-cased form,
    /// multi-word text by content hash in a separate directory. The split
    /// only partitions the cache; grading never consults it.
    fn cache_path(&self, text: &str) -> PathBuf {
        let key = text.trim().to_lowercase();
        if key.split_whitespace().count() > 1 {
            let mut hasher = Sha256::new();
            hasher.update(key.as_bytes());
            let digest = format!("{:x}", hasher.finalize());
            self.sentence_dir.join(format!("{}.mp3", &digest[..16]))
        } else {
            let safe: String = key
                .chars()
                .map(|c| if c.is_alphanumeric() { c } else { '_' })
                .collect();
            self.word_dir.join(format!("{safe}.mp3"))
        }
    }
}

/// Run one command template with `{text}`, `{out}`, and `{file}`
/// placeholders substituted per token. Failures are logged and reported as
/// `false`, never raised.
fn run_command(template: &str, text: &str, file: &Path) -> bool {
    let tokens: Vec<String> = template
        .split_whitespace()
        .map(|token| match token {
            "{text}" => text.to_string(),
            "{out}" | "{file}" => file.display().to_string(),
            other => other.to_string(),
        })
        .collect();

    let Some((program, args)) = tokens.split_first() else {
        return false;
    };

    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match status {
        Ok(s) if s.success() => true,
        Ok(s) => {
            tracing::debug!(%program, code = ?s.code(), "speech command failed");
            false
        }
        Err(err) => {
            tracing::debug!(%program, %err, "speech command unavailable");
            false
        }
    }
}
