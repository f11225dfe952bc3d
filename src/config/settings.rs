//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::question::Difficulty;

use super::AppPaths;

// ---------------------------------------------------------------------------
// QuizConfig
// ---------------------------------------------------------------------------

/// Settings for quiz session behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Questions generated per session.
    pub question_count: usize,
    /// How long answer feedback stays on screen before the next question
    /// appears, in milliseconds.
    pub feedback_delay_ms: u64,
    /// Operand range / operation set for arithmetic questions.
    pub difficulty: Difficulty,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            question_count: 10,
            feedback_delay_ms: 2_000,
            difficulty: Difficulty::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// SpeechConfig
// ---------------------------------------------------------------------------

/// Settings for the voice input/output subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// BCP-47 language tag passed to the recognizer (e.g. `"en-US"`).
    pub language: String,
    /// Seconds a listening session may run before it auto-stops.
    pub listen_timeout_secs: u64,
    /// Master switch for voice features; `false` makes the session runner
    /// reject listen and speak commands, and front-ends hide those controls.
    pub enabled: bool,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            language: "en-US".into(),
            listen_timeout_secs: 5,
            enabled: true,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use voicemath::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Quiz session settings.
    pub quiz: QuizConfig,
    /// Voice input/output settings.
    pub speech: SpeechConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Verify that a default `AppConfig` can be serialised to TOML and
    /// deserialised back without any data loss.
    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(original.quiz.question_count, loaded.quiz.question_count);
        assert_eq!(original.quiz.feedback_delay_ms, loaded.quiz.feedback_delay_ms);
        assert_eq!(original.quiz.difficulty, loaded.quiz.difficulty);
        assert_eq!(original.speech.language, loaded.speech.language);
        assert_eq!(
            original.speech.listen_timeout_secs,
            loaded.speech.listen_timeout_secs
        );
        assert_eq!(original.speech.enabled, loaded.speech.enabled);
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        assert_eq!(config.quiz.question_count, 10);
        assert_eq!(config.speech.language, "en-US");
    }

    /// Verify the shipped defaults: 10 questions, 2 s feedback delay,
    /// 5 s listening timeout.
    #[test]
    fn shipped_defaults() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.quiz.question_count, 10);
        assert_eq!(cfg.quiz.feedback_delay_ms, 2_000);
        assert_eq!(cfg.quiz.difficulty, Difficulty::Easy);
        assert_eq!(cfg.speech.listen_timeout_secs, 5);
        assert!(cfg.speech.enabled);
    }

    /// Verify that modified non-default values survive a round trip.
    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.quiz.question_count = 20;
        cfg.quiz.feedback_delay_ms = 500;
        cfg.quiz.difficulty = Difficulty::Hard;
        cfg.speech.language = "en-GB".into();
        cfg.speech.listen_timeout_secs = 8;
        cfg.speech.enabled = false;

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.quiz.question_count, 20);
        assert_eq!(loaded.quiz.feedback_delay_ms, 500);
        assert_eq!(loaded.quiz.difficulty, Difficulty::Hard);
        assert_eq!(loaded.speech.language, "en-GB");
        assert_eq!(loaded.speech.listen_timeout_secs, 8);
        assert!(!loaded.speech.enabled);
    }
}
