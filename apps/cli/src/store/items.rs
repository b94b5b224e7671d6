//! Scheduler item pools on disk: parallel active and completed files.

use std::fs;
use std::path::{Path, PathBuf};

use vocab_core::scheduler::{ItemPools, SchedulerItem};

use super::error::Result;

pub struct SchedulerStore {
    active_path: PathBuf,
    completed_path: PathBuf,
}

impl SchedulerStore {
    pub fn new(active_path: PathBuf, completed_path: PathBuf) -> Self {
        Self {
            active_path,
            completed_path,
        }
    }

    /// Missing files read as empty pools; invalid JSON is fatal.
    pub fn load(&self) -> Result<ItemPools> {
        Ok(ItemPools {
            active: load_items(&self.active_path)?,
            completed: load_items(&self.completed_path)?,
        })
    }

    pub fn save(&self, pools: &ItemPools) -> Result<()> {
        save_items(&self.active_path, &pools.active)?;
        save_items(&self.completed_path, &pools.completed)
    }
}

fn load_items(path: &Path) -> Result<Vec<SchedulerItem>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn save_items(path: &Path, items: &[SchedulerItem]) -> Result<()> {
    let mut text = serde_json::to_string_pretty(items)?;
    text.push('\n');
    fs::write(path, text)?;
    Ok(())
}
