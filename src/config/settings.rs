//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Settings for the speech-session controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Seconds shown by the cosmetic start countdown.
    pub countdown_secs: u32,
    /// When `true` the recognition engine is opened only after the countdown
    /// reaches zero.  Default is `false`: recognition starts immediately and
    /// the countdown runs alongside it.
    pub countdown_gates_start: bool,
    /// Network-error retries allowed before the session gives up and waits
    /// for an explicit retry command.
    pub max_attempts: u32,
    /// Fixed delay before reopening the engine after a non-network error or
    /// an unexpected close, in milliseconds.
    pub restart_delay_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            countdown_secs: 3,
            countdown_gates_start: false,
            max_attempts: 5,
            restart_delay_ms: 1_000,
        }
    }
}

// ---------------------------------------------------------------------------
// RecognitionConfig
// ---------------------------------------------------------------------------

/// Settings handed to the recognition-engine backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionConfig {
    /// Speech language as a BCP-47 tag (e.g. `"es-ES"`).
    pub language: String,
    /// Keep the session open across utterances instead of stopping after the
    /// first final result.
    pub continuous: bool,
    /// Deliver interim (non-final) hypotheses.  Off: only settled results
    /// reach the controller.
    pub interim_results: bool,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            language: "es-ES".into(),
            continuous: true,
            interim_results: false,
        }
    }
}

// ---------------------------------------------------------------------------
// TranslateConfig
// ---------------------------------------------------------------------------

/// Settings for the remote translation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateConfig {
    /// Base URL of the translation endpoint.
    pub base_url: String,
    /// Source language code sent with every request (fixed per session).
    pub source_lang: String,
    /// Initially selected target language code.
    pub target_lang: String,
    /// Maximum seconds to wait for a translation response.
    pub timeout_secs: u64,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            base_url: "https://translate.googleapis.com".into(),
            source_lang: "es".into(),
            target_lang: "en".into(),
            timeout_secs: 10,
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
/// use voice_translate::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Session controller settings (countdown, retry budget).
    pub session: SessionConfig,
    /// Recognition engine settings.
    pub recognition: RecognitionConfig,
    /// Translation client settings.
    pub translate: TranslateConfig,
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

        assert_eq!(original.session.countdown_secs, loaded.session.countdown_secs);
        assert_eq!(
            original.session.countdown_gates_start,
            loaded.session.countdown_gates_start
        );
        assert_eq!(original.session.max_attempts, loaded.session.max_attempts);
        assert_eq!(
            original.session.restart_delay_ms,
            loaded.session.restart_delay_ms
        );

        assert_eq!(original.recognition.language, loaded.recognition.language);
        assert_eq!(original.recognition.continuous, loaded.recognition.continuous);
        assert_eq!(
            original.recognition.interim_results,
            loaded.recognition.interim_results
        );

        assert_eq!(original.translate.base_url, loaded.translate.base_url);
        assert_eq!(original.translate.source_lang, loaded.translate.source_lang);
        assert_eq!(original.translate.target_lang, loaded.translate.target_lang);
        assert_eq!(original.translate.timeout_secs, loaded.translate.timeout_secs);
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        let default = AppConfig::default();

        assert_eq!(config.session.max_attempts, default.session.max_attempts);
        assert_eq!(config.recognition.language, default.recognition.language);
        assert_eq!(config.translate.target_lang, default.translate.target_lang);
    }

    /// Verify the shipped defaults.
    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.session.countdown_secs, 3);
        assert!(!cfg.session.countdown_gates_start);
        assert_eq!(cfg.session.max_attempts, 5);
        assert_eq!(cfg.session.restart_delay_ms, 1_000);
        assert_eq!(cfg.recognition.language, "es-ES");
        assert!(cfg.recognition.continuous);
        assert!(!cfg.recognition.interim_results);
        assert_eq!(cfg.translate.base_url, "https://translate.googleapis.com");
        assert_eq!(cfg.translate.source_lang, "es");
        assert_eq!(cfg.translate.target_lang, "en");
        assert_eq!(cfg.translate.timeout_secs, 10);
    }

    /// Verify that modified non-default values survive a round trip.
    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.session.countdown_secs = 5;
        cfg.session.countdown_gates_start = true;
        cfg.session.max_attempts = 3;
        cfg.recognition.language = "es-MX".into();
        cfg.translate.target_lang = "fr".into();
        cfg.translate.timeout_secs = 30;

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.session.countdown_secs, 5);
        assert!(loaded.session.countdown_gates_start);
        assert_eq!(loaded.session.max_attempts, 3);
        assert_eq!(loaded.recognition.language, "es-MX");
        assert_eq!(loaded.translate.target_lang, "fr");
        assert_eq!(loaded.translate.timeout_secs, 30);
    }
}
