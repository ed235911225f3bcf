//! Player profile: high score, recent runs and sound preference
//!
//! Stored as three JSON values so each can be written on its own.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_HISTORY;
use crate::persistence::{StorageError, Store};

/// Storage keys
pub const HIGH_SCORE_KEY: &str = "highScore";
pub const HISTORY_KEY: &str = "scoresHistory";
pub const SOUNDS_KEY: &str = "soundsEnabled";

/// A finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: u32,
    /// Locale date string of when the run ended
    #[serde(alias = "timestamp")]
    pub date: String,
}

/// Recent runs, newest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreHistory {
    pub entries: Vec<ScoreEntry>,
}

impl ScoreHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a run and drop the oldest beyond the cap
    pub fn record(&mut self, score: u32, date: impl Into<String>) {
        self.entries.insert(
            0,
            ScoreEntry {
                score,
                date: date.into(),
            },
        );
        self.entries.truncate(MAX_HISTORY);
    }

    /// The `n` most recent runs
    pub fn recent(&self, n: usize) -> &[ScoreEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best score still in the history
    pub fn best(&self) -> Option<u32> {
        self.entries.iter().map(|e| e.score).max()
    }
}

/// Everything that survives between sessions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub high_score: u32,
    pub history: ScoreHistory,
    pub sounds_enabled: bool,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            high_score: 0,
            history: ScoreHistory::new(),
            sounds_enabled: true,
        }
    }
}

impl Profile {
    /// Load from `store`. Missing, unreadable or malformed keys keep their
    /// defaults.
    pub fn load(store: &impl Store) -> Self {
        let defaults = Self::default();
        let profile = Self {
            high_score: read_key(store, HIGH_SCORE_KEY).unwrap_or(defaults.high_score),
            history: read_key(store, HISTORY_KEY).unwrap_or(defaults.history),
            sounds_enabled: read_key(store, SOUNDS_KEY).unwrap_or(defaults.sounds_enabled),
        };
        log::info!(
            "Loaded profile: best {}, {} recent runs, sound {}",
            profile.high_score,
            profile.history.len(),
            if profile.sounds_enabled { "on" } else { "off" }
        );
        profile
    }

    /// Fold a finished run in. `high_score` is the simulation's best, which
    /// already includes this run.
    pub fn record_run(&mut self, score: u32, high_score: u32, date: impl Into<String>) {
        self.high_score = self.high_score.max(high_score).max(score);
        self.history.record(score, date);
    }

    /// Write high score and history
    pub fn save_scores(&self, store: &mut impl Store) -> Result<(), StorageError> {
        write_key(store, HIGH_SCORE_KEY, &self.high_score)?;
        write_key(store, HISTORY_KEY, &self.history)?;
        log::info!("Scores saved ({} recent runs)", self.history.len());
        Ok(())
    }

    /// Flip sound on/off and write the new preference
    pub fn toggle_sound(&mut self, store: &mut impl Store) -> Result<bool, StorageError> {
        self.sounds_enabled = !self.sounds_enabled;
        write_key(store, SOUNDS_KEY, &self.sounds_enabled)?;
        Ok(self.sounds_enabled)
    }
}

fn read_key<T: for<'de> Deserialize<'de>>(store: &impl Store, key: &str) -> Option<T> {
    let json = match store.get(key) {
        Ok(Some(json)) => json,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("{e}");
            return None;
        }
    };
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring malformed `{key}`: {e}");
            None
        }
    }
}

fn write_key<T: Serialize>(
    store: &mut impl Store,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(value).map_err(|_| StorageError::Write(key.to_owned()))?;
    store.set(key, &json)
}

/// Today's date for history entries
#[cfg(target_arch = "wasm32")]
pub fn today() -> String {
    js_sys::Date::new_0()
        .to_locale_date_string("default", &wasm_bindgen::JsValue::UNDEFINED)
        .into()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn today() -> String {
    "N/A".to_string()
}
