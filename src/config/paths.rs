//! Cross-platform application paths using the `dirs` crate.
//!
//! Config dir (settings + scores):
//!   Windows: %APPDATA%\voicemath\
//!   macOS:   ~/Library/Application Support/voicemath/
//!   Linux:   ~/.config/voicemath/

use std::path::PathBuf;

/// Holds all resolved application directory/file paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory for `settings.toml` and `scores.json`.
    pub config_dir: PathBuf,
    /// Full path to `settings.toml`.
    pub settings_file: PathBuf,
    /// Full path to `scores.json` (high scores, profile stats, username).
    pub scores_file: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "voicemath";

    /// Resolves all paths using the `dirs` crate.
    ///
    /// Falls back to the current directory if the platform cannot provide a
    /// standard path (should be extremely rare in practice).
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let settings_file = config_dir.join("settings.toml");
        let scores_file = config_dir.join("scores.json");

        Self {
            config_dir,
            settings_file,
            scores_file,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}
