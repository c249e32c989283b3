//! Per-level best progress and play statistics
//!
//! Persisted as JSON next to the binary (or wherever the caller points it).
//! Progress is a high-water mark: a stored value only ever grows.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::{GameEvent, TickReport};

/// Failure reading or writing a JSON file
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which progress bar an attempt counts towards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayMode {
    Normal,
    Practice,
}

impl PlayMode {
    pub fn from_practice(practice: bool) -> Self {
        if practice {
            PlayMode::Practice
        } else {
            PlayMode::Normal
        }
    }
}

/// Stored results for one level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelRecord {
    pub normal_progress: f64,
    pub practice_progress: f64,
    /// Fewest attempts needed to beat the level in normal mode
    pub best_attempts: Option<u32>,
    pub total_jumps: u64,
}

impl LevelRecord {
    pub fn progress(&self, mode: PlayMode) -> f64 {
        match mode {
            PlayMode::Normal => self.normal_progress,
            PlayMode::Practice => self.practice_progress,
        }
    }

    /// Store `value` if it beats the current best. Returns whether it did.
    pub fn update_progress(&mut self, mode: PlayMode, value: f64) -> bool {
        let slot = match mode {
            PlayMode::Normal => &mut self.normal_progress,
            PlayMode::Practice => &mut self.practice_progress,
        };
        let value = value.clamp(0.0, 1.0);
        if value > *slot {
            *slot = value;
            true
        } else {
            false
        }
    }

    /// Record a completed normal run
    pub fn update_best_attempts(&mut self, attempts: u32) -> bool {
        match self.best_attempts {
            Some(best) if best <= attempts => false,
            _ => {
                self.best_attempts = Some(attempts);
                true
            }
        }
    }
}

/// All level records, keyed by level name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Records {
    pub levels: BTreeMap<String, LevelRecord>,
}

impl Records {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self, name: &str) -> Option<&LevelRecord> {
        self.levels.get(name)
    }

    pub fn level_mut(&mut self, name: &str) -> &mut LevelRecord {
        self.levels.entry(name.to_string()).or_default()
    }

    /// Fold one tick's events into the level's record. `mode` is the mode the
    /// tick was played in; an ended attempt counts towards the mode it was
    /// played in. Returns whether a progress record changed.
    pub fn apply(&mut self, level: &str, report: &TickReport, mode: PlayMode) -> bool {
        let record = self.level_mut(level);
        let mut improved = false;

        for event in &report.events {
            match *event {
                GameEvent::Jumped => record.total_jumps += 1,
                GameEvent::AttemptStarted {
                    previous_practice,
                    previous_progress,
                    ..
                } => {
                    let ended = PlayMode::from_practice(previous_practice);
                    improved |= record.update_progress(ended, previous_progress);
                }
                GameEvent::WonLevel => {
                    improved |= record.update_progress(mode, 1.0);
                    if mode == PlayMode::Normal {
                        record.update_best_attempts(report.attempt);
                    }
                }
                _ => {}
            }
        }

        if improved {
            log::info!(
                "New best on {}: normal {:.0}%, practice {:.0}%",
                level,
                record.normal_progress * 100.0,
                record.practice_progress * 100.0
            );
        }
        improved
    }

    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load records, starting fresh if the file is missing or corrupt
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(records) => {
                log::info!("Loaded records for {} levels", records.levels.len());
                records
            }
            Err(e) => {
                log::warn!("No records at {} ({}), starting fresh", path.display(), e);
                Self::new()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, self.to_json()?)?;
        log::info!("Records saved ({} levels)", self.levels.len());
        Ok(())
    }
}
