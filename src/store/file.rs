//! JSON-backed [`ScoreStore`] — the local-storage analogue.
//!
//! The whole record (high scores per variant, profile statistics, username)
//! lives in one pretty-printed JSON file under the platform config
//! directory, written through on every mutation so scores survive crashes.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use super::{ProfileStats, ScoreStore, StoreError};

// ---------------------------------------------------------------------------
// StoreData
// ---------------------------------------------------------------------------

/// On-disk shape of the store file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreData {
    #[serde(default)]
    high_scores: HashMap<String, u32>,
    #[serde(default)]
    profile: ProfileStats,
    #[serde(default)]
    username: Option<String>,
}

// ---------------------------------------------------------------------------
// JsonStore
// ---------------------------------------------------------------------------

/// File-backed store. Cheap to share behind an `Arc<dyn ScoreStore>`.
pub struct JsonStore {
    path: PathBuf,
    state: Mutex<StoreData>,
}

impl JsonStore {
    /// Open (or create on first write) the store at `path`.
    ///
    /// A missing file yields an empty store; a malformed file is an error so
    /// existing scores are never silently discarded.
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        let state = if path.exists() {
            let data = std::fs::read_to_string(&path)?;
            serde_json::from_str(&data)?
        } else {
            StoreData::default()
        };

        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    fn persist(&self, state: &StoreData) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(state)?;
        std::fs::write(&self.path, data)?;
        Ok(())
    }
}

impl ScoreStore for JsonStore {
    fn high_score(&self, key: &str) -> Result<u32, StoreError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .high_scores
            .get(key)
            .copied()
            .unwrap_or(0))
    }

    fn record_high_score(&self, key: &str, score: u32) -> Result<bool, StoreError> {
        let mut state = self.state.lock().unwrap();
        let current = state.high_scores.get(key).copied().unwrap_or(0);
        if score <= current {
            return Ok(false);
        }
        state.high_scores.insert(key.to_string(), score);
        self.persist(&state)?;
        Ok(true)
    }

    fn profile(&self) -> Result<ProfileStats, StoreError> {
        Ok(self.state.lock().unwrap().profile.clone())
    }

    fn save_profile(&self, stats: &ProfileStats) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        state.profile = stats.clone();
        self.persist(&state)
    }

    fn username(&self) -> Result<Option<String>, StoreError> {
        Ok(self.state.lock().unwrap().username.clone())
    }

    fn set_username(&self, name: Option<String>) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        state.username = name;
        self.persist(&state)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_in_temp() -> (JsonStore, tempfile::TempDir) {
        let dir = tempdir().expect("temp dir");
        let store = JsonStore::open(dir.path().join("scores.json")).expect("open");
        (store, dir)
    }

    #[test]
    fn missing_file_starts_empty() {
        let (store, _dir) = store_in_temp();
        assert_eq!(store.high_score("quiz-high-score").unwrap(), 0);
        assert_eq!(store.profile().unwrap(), ProfileStats::default());
    }

    #[test]
    fn scores_persist_across_reopen() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("scores.json");

        {
            let store = JsonStore::open(path.clone()).expect("open");
            store.record_high_score("quiz-high-score", 8).unwrap();
            store.set_username(Some("NumberNinja".into())).unwrap();
        }

        let reopened = JsonStore::open(path).expect("reopen");
        assert_eq!(reopened.high_score("quiz-high-score").unwrap(), 8);
        assert_eq!(reopened.username().unwrap(), Some("NumberNinja".into()));
    }

    #[test]
    fn monotonic_update_skips_the_write() {
        let (store, _dir) = store_in_temp();
        store.record_high_score("k", 9).unwrap();
        assert!(!store.record_high_score("k", 3).unwrap());
        assert_eq!(store.high_score("k").unwrap(), 9);
    }

    #[test]
    fn profile_persists_across_reopen() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("scores.json");

        {
            let store = JsonStore::open(path.clone()).expect("open");
            let mut stats = store.profile().unwrap();
            stats.record_session(7, 150);
            store.save_profile(&stats).unwrap();
        }

        let reopened = JsonStore::open(path).expect("reopen");
        let stats = reopened.profile().unwrap();
        assert_eq!(stats.quizzes_taken, 1);
        assert_eq!(stats.total_correct, 7);
        assert_eq!(stats.practice_time_secs, 150);
    }

    #[test]
    fn malformed_file_is_an_error_not_data_loss() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("scores.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            JsonStore::open(path),
            Err(StoreError::Malformed(_))
        ));
    }

    #[test]
    fn partial_file_fills_missing_fields_with_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("scores.json");
        std::fs::write(&path, r#"{"high_scores":{"quiz-high-score":5}}"#).unwrap();

        let store = JsonStore::open(path).expect("open");
        assert_eq!(store.high_score("quiz-high-score").unwrap(), 5);
        assert_eq!(store.profile().unwrap(), ProfileStats::default());
        assert_eq!(store.username().unwrap(), None);
    }
}
