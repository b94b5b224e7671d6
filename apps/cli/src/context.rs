//! Application context: paths, configuration, and bootstrap.
//!
//! Every operation receives an explicit [`AppContext`] owning its storage
//! locations and settings; there is no process-wide state.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};

use crate::speech::SpeechEngine;
use crate::store::{SchedulerStore, SessionLog, WordStore};

/// File and directory layout under the base directory.
#[derive(Debug, Clone)]
pub struct Paths {
    pub base: PathBuf,
    pub data_dir: PathBuf,
    pub words_file: PathBuf,
    pub log_file: PathBuf,
    pub active_file: PathBuf,
    pub completed_file: PathBuf,
    pub word_audio_dir: PathBuf,
    pub sentence_audio_dir: PathBuf,
    pub config_file: PathBuf,
}

impl Paths {
    pub fn new(base: PathBuf) -> Self {
        let data_dir = base.join("data");
        let audio_cache = data_dir.join("audio_cache");
        Self {
            words_file: data_dir.join("words.json"),
            log_file: data_dir.join("quizzes.jsonl"),
            active_file: data_dir.join("learning_items.json"),
            completed_file: data_dir.join("completed_items.json"),
            word_audio_dir: audio_cache.join("words_audio"),
            sentence_audio_dir: audio_cache.join("examples_audio"),
            config_file: data_dir.join("config.json"),
            data_dir,
            base,
        }
    }
}

/// User configuration, loaded from `config.json`. Missing file or missing
/// fields fall back to defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Similarity a sentence answer must reach when graded by signature +
    /// ratio.
    pub sentence_threshold: f64,
    /// Synthesis command template; `{text}` and `{out}` are substituted.
    pub tts_synth: Option<String>,
    /// Playback command template; `{file}` is substituted.
    pub tts_play: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sentence_threshold: vocab_core::DEFAULT_SENTENCE_THRESHOLD,
            tts_synth: None,
            tts_play: None,
        }
    }
}

/// Handle passed to every command: storage locations, settings, speech.
pub struct AppContext {
    pub paths: Paths,
    pub config: Config,
    pub speech: SpeechEngine,
}

impl AppContext {
    /// Create directories and default files (idempotent), then load config.
    pub fn open(base: PathBuf) -> Result<Self> {
        let paths = Paths::new(base);

        for dir in [&paths.word_audio_dir, &paths.sentence_audio_dir] {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        if !paths.words_file.exists() {
            fs::write(&paths.words_file, "{}\n")
                .with_context(|| format!("creating {}", paths.words_file.display()))?;
        }

        let config = load_config(&paths.config_file)?;
        let speech = SpeechEngine::new(
            config.tts_synth.clone(),
            config.tts_play.clone(),
            paths.word_audio_dir.clone(),
            paths.sentence_audio_dir.clone(),
        );

        Ok(Self {
            paths,
            config,
            speech,
        })
    }

    pub fn words(&self) -> WordStore {
        WordStore::new(self.paths.words_file.clone())
    }

    pub fn log(&self) -> SessionLog {
        SessionLog::new(self.paths.log_file.clone())
    }

    pub fn items(&self) -> SchedulerStore {
        SchedulerStore::new(
            self.paths.active_file.clone(),
            self.paths.completed_file.clone(),
        )
    }
}

fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Resolve the base directory: `--base` flag, then `$VOCAB_HOME`, then the
/// platform data directory.
pub fn resolve_base(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| std::env::var_os("VOCAB_HOME").map(PathBuf::from))
        .unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("vocab")
        })
}
