//! Persisted key-value state — high scores, profile statistics, username.
//!
//! The quiz engine never owns ambient global state: the session runner
//! receives an `Arc<dyn ScoreStore>` and reads/writes through it, so hosts
//! decide where the data lives ([`JsonStore`] on disk, [`MemoryStore`] for
//! tests and degraded startup).
//!
//! High scores are keyed by quiz variant and only ever increase —
//! [`ScoreStore::record_high_score`] enforces the monotonic update, callers
//! cannot lower a score through this interface.

pub mod file;

use std::collections::HashMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use file::JsonStore;

// ---------------------------------------------------------------------------
// StoreError
// ---------------------------------------------------------------------------

/// Errors from the persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("Store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file held malformed JSON.
    #[error("Store data is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// ProfileStats
// ---------------------------------------------------------------------------

/// Aggregate statistics shown by the profile view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileStats {
    /// Completed quiz sessions.
    pub quizzes_taken: u32,
    /// Correct answers across all sessions.
    pub total_correct: u32,
    /// Best single-session score across all quiz variants.
    pub high_score: u32,
    /// Accumulated time spent in sessions, in whole seconds.
    pub practice_time_secs: u64,
}

impl ProfileStats {
    /// Fold one completed session into the aggregate.
    pub fn record_session(&mut self, score: u32, elapsed_secs: u64) {
        self.quizzes_taken += 1;
        self.total_correct += score;
        self.high_score = self.high_score.max(score);
        self.practice_time_secs += elapsed_secs;
    }
}

// ---------------------------------------------------------------------------
// ScoreStore trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe key-value store for quiz state.
pub trait ScoreStore: Send + Sync {
    /// High score for `key`, `0` when none has been recorded.
    fn high_score(&self, key: &str) -> Result<u32, StoreError>;

    /// Record `score` for `key` only if it improves on the stored value.
    /// Returns `true` when the stored score changed.
    fn record_high_score(&self, key: &str, score: u32) -> Result<bool, StoreError>;

    /// The persisted profile statistics.
    fn profile(&self) -> Result<ProfileStats, StoreError>;

    /// Replace the persisted profile statistics.
    fn save_profile(&self, stats: &ProfileStats) -> Result<(), StoreError>;

    /// The persisted username, if one has been set.
    fn username(&self) -> Result<Option<String>, StoreError>;

    /// Set or clear the persisted username.
    fn set_username(&self, name: Option<String>) -> Result<(), StoreError>;
}

const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn ScoreStore>) {}
};

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-memory store with no persistence.
///
/// Used by tests and as the graceful fallback when the on-disk store cannot
/// be opened — the quiz still works, scores just don't survive the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    high_scores: HashMap<String, u32>,
    profile: ProfileStats,
    username: Option<String>,
}

impl ScoreStore for MemoryStore {
    fn high_score(&self, key: &str) -> Result<u32, StoreError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .high_scores
            .get(key)
            .copied()
            .unwrap_or(0))
    }

    fn record_high_score(&self, key: &str, score: u32) -> Result<bool, StoreError> {
        let mut state = self.inner.lock().unwrap();
        let entry = state.high_scores.entry(key.to_string()).or_insert(0);
        if score > *entry {
            *entry = score;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn profile(&self) -> Result<ProfileStats, StoreError> {
        Ok(self.inner.lock().unwrap().profile.clone())
    }

    fn save_profile(&self, stats: &ProfileStats) -> Result<(), StoreError> {
        self.inner.lock().unwrap().profile = stats.clone();
        Ok(())
    }

    fn username(&self) -> Result<Option<String>, StoreError> {
        Ok(self.inner.lock().unwrap().username.clone())
    }

    fn set_username(&self, name: Option<String>) -> Result<(), StoreError> {
        self.inner.lock().unwrap().username = name;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_zero() {
        let store = MemoryStore::default();
        assert_eq!(store.high_score("quiz-high-score").unwrap(), 0);
    }

    #[test]
    fn record_improves_and_reports_change() {
        let store = MemoryStore::default();
        assert!(store.record_high_score("quiz-high-score", 7).unwrap());
        assert_eq!(store.high_score("quiz-high-score").unwrap(), 7);
    }

    #[test]
    fn high_score_is_monotonic() {
        let store = MemoryStore::default();
        store.record_high_score("k", 8).unwrap();

        // Neither a lower nor an equal score may overwrite.
        assert!(!store.record_high_score("k", 5).unwrap());
        assert!(!store.record_high_score("k", 8).unwrap());
        assert_eq!(store.high_score("k").unwrap(), 8);

        assert!(store.record_high_score("k", 9).unwrap());
        assert_eq!(store.high_score("k").unwrap(), 9);
    }

    #[test]
    fn variants_are_independent() {
        let store = MemoryStore::default();
        store.record_high_score("quiz-high-score", 4).unwrap();
        store.record_high_score("logical-high-score", 9).unwrap();

        assert_eq!(store.high_score("quiz-high-score").unwrap(), 4);
        assert_eq!(store.high_score("logical-high-score").unwrap(), 9);
    }

    #[test]
    fn profile_round_trip() {
        let store = MemoryStore::default();
        let mut stats = store.profile().unwrap();
        stats.record_session(6, 90);
        store.save_profile(&stats).unwrap();

        let loaded = store.profile().unwrap();
        assert_eq!(loaded.quizzes_taken, 1);
        assert_eq!(loaded.total_correct, 6);
        assert_eq!(loaded.high_score, 6);
        assert_eq!(loaded.practice_time_secs, 90);
    }

    #[test]
    fn record_session_accumulates() {
        let mut stats = ProfileStats::default();
        stats.record_session(6, 90);
        stats.record_session(4, 30);

        assert_eq!(stats.quizzes_taken, 2);
        assert_eq!(stats.total_correct, 10);
        assert_eq!(stats.high_score, 6);
        assert_eq!(stats.practice_time_secs, 120);
    }

    #[test]
    fn username_set_and_clear() {
        let store = MemoryStore::default();
        assert_eq!(store.username().unwrap(), None);

        store.set_username(Some("MathWhiz".into())).unwrap();
        assert_eq!(store.username().unwrap(), Some("MathWhiz".into()));

        store.set_username(None).unwrap();
        assert_eq!(store.username().unwrap(), None);
    }
}
