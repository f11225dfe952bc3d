//! Configuration module for VoiceMath.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for the quiz and
//! speech subsystems, `AppPaths` for cross-platform data directories, and
//! TOML persistence via `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, QuizConfig, SpeechConfig};
