//! Engine configuration
//!
//! Loaded from environment variables (optionally seeded from a `.env` file by
//! the binary) or from a JSON file.
//!
//! | Variable | Default |
//! |---|---|
//! | `BILINGUAL_SYNC_PROVIDER` | `google` |
//! | `GOOGLE_TRANSLATE_API_KEY` | unset |
//! | `BILINGUAL_SYNC_TIMEOUT_SECS` | `30` |
//! | `BILINGUAL_SYNC_PRIMARY_LANGUAGE` | `fr` |

use crate::error::{SyncError, SyncResult};
use crate::fields::LOCALIZED_SUFFIX;
use crate::google_translate::GoogleTranslateProvider;
use crate::language::{FRENCH, is_arabic, normalize_language, validate_language};
use crate::provider::TranslationProvider;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Which provider backs detection and translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Google Translate v2, degrading to offline when no key is configured
    #[default]
    Google,
    /// Script heuristic and fallback dictionary only
    Offline,
}

impl FromStr for ProviderKind {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" => Ok(ProviderKind::Google),
            "offline" | "none" => Ok(ProviderKind::Offline),
            other => Err(SyncError::ConfigError(format!(
                "unknown provider '{}' (expected 'google' or 'offline')",
                other
            ))),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub provider: ProviderKind,
    /// Never written out when the config is serialised
    #[serde(skip_serializing)]
    pub google_api_key: Option<String>,
    pub request_timeout_secs: u64,
    /// Language of the primary slot; the localized slot is always Arabic
    pub primary_language: String,
    pub localized_suffix: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Google,
            google_api_key: None,
            request_timeout_secs: GoogleTranslateProvider::DEFAULT_TIMEOUT_SECS,
            primary_language: FRENCH.to_string(),
            localized_suffix: LOCALIZED_SUFFIX.to_string(),
        }
    }
}

impl SyncConfig {
    /// Build a configuration from environment variables over the defaults
    pub fn from_env() -> SyncResult<Self> {
        let mut config = SyncConfig::default();

        if let Ok(provider) = std::env::var("BILINGUAL_SYNC_PROVIDER") {
            config.provider = provider.parse()?;
        }
        if let Ok(key) = std::env::var("GOOGLE_TRANSLATE_API_KEY") {
            if !key.trim().is_empty() {
                config.google_api_key = Some(key);
            }
        }
        if let Ok(timeout) = std::env::var("BILINGUAL_SYNC_TIMEOUT_SECS") {
            config.request_timeout_secs = timeout.trim().parse().map_err(|_| {
                SyncError::ConfigError(format!(
                    "BILINGUAL_SYNC_TIMEOUT_SECS must be a number of seconds, got '{}'",
                    timeout
                ))
            })?;
        }
        if let Ok(language) = std::env::var("BILINGUAL_SYNC_PRIMARY_LANGUAGE") {
            config.primary_language = language;
        }

        config.validate()?;
        Ok(config)
    }

    /// Read a configuration from a JSON file; missing keys take their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> SyncResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: SyncConfig = serde_json::from_str(&content)
            .map_err(|e| SyncError::ConfigError(format!("invalid config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SyncResult<()> {
        validate_language(&self.primary_language)?;
        if is_arabic(&self.primary_language) {
            return Err(SyncError::ConfigError(
                "primary language cannot be Arabic".to_string(),
            ));
        }
        if self.localized_suffix.is_empty() {
            return Err(SyncError::ConfigError(
                "localized suffix cannot be empty".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(SyncError::ConfigError(
                "request timeout must be at least one second".to_string(),
            ));
        }
        Ok(())
    }

    /// Normalised primary language code
    pub fn primary_language(&self) -> String {
        normalize_language(&self.primary_language)
    }

    /// Construct the configured provider
    ///
    /// Returns `None` for the offline provider, and also when the Google
    /// client cannot be initialised: the engine then keeps working on its
    /// fallbacks instead of refusing to start.
    pub fn build_provider(&self) -> Option<Arc<dyn TranslationProvider>> {
        match self.provider {
            ProviderKind::Offline => None,
            ProviderKind::Google => {
                let Some(key) = self.google_api_key.clone() else {
                    warn!("GOOGLE_TRANSLATE_API_KEY not set, running with offline fallbacks only");
                    return None;
                };
                let timeout = Duration::from_secs(self.request_timeout_secs);
                match GoogleTranslateProvider::with_timeout(key, timeout) {
                    Ok(provider) => Some(Arc::new(provider)),
                    Err(e) => {
                        warn!(error = %e, "could not initialise Google Translate, running offline");
                        None
                    }
                }
            }
        }
    }
}

impl std::fmt::Debug for SyncConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncConfig")
            .field("provider", &self.provider)
            .field("google_api_key", &self.google_api_key.as_ref().map(|_| "***"))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("primary_language", &self.primary_language)
            .field("localized_suffix", &self.localized_suffix)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SyncConfig::default();
        assert_eq!(config.provider, ProviderKind::Google);
        assert_eq!(config.primary_language, "fr");
        assert_eq!(config.localized_suffix, "_ar");
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_provider_kind_from_str() {
        assert_eq!("Google".parse::<ProviderKind>().unwrap(), ProviderKind::Google);
        assert_eq!("offline".parse::<ProviderKind>().unwrap(), ProviderKind::Offline);
        assert!("deepl".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: SyncConfig =
            serde_json::from_value(json!({ "provider": "offline", "primary_language": "en" }))
                .unwrap();
        assert_eq!(config.provider, ProviderKind::Offline);
        assert_eq!(config.primary_language, "en");
        assert_eq!(config.localized_suffix, "_ar");
    }

    #[test]
    fn test_api_key_is_not_serialized() {
        let config = SyncConfig {
            google_api_key: Some("secret".to_string()),
            ..SyncConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
        assert!(!format!("{:?}", config).contains("secret"));
    }

    #[test]
    fn test_validate_rejects_arabic_primary() {
        let config = SyncConfig {
            primary_language: "ar".to_string(),
            ..SyncConfig::default()
        };
        assert!(matches!(config.validate(), Err(SyncError::ConfigError(_))));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = SyncConfig {
            request_timeout_secs: 0,
            ..SyncConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_primary_language_is_normalized() {
        let config = SyncConfig {
            primary_language: "FR-ca".to_string(),
            ..SyncConfig::default()
        };
        assert_eq!(config.primary_language(), "fr");
    }

    #[test]
    fn test_build_provider_offline() {
        let config = SyncConfig {
            provider: ProviderKind::Offline,
            google_api_key: Some("key".to_string()),
            ..SyncConfig::default()
        };
        assert!(config.build_provider().is_none());
    }

    #[test]
    fn test_build_provider_without_key_degrades() {
        let config = SyncConfig::default();
        assert!(config.build_provider().is_none());
    }

    #[test]
    fn test_build_provider_google() {
        let config = SyncConfig {
            google_api_key: Some("key".to_string()),
            ..SyncConfig::default()
        };
        let provider = config.build_provider().unwrap();
        assert_eq!(provider.provider_name(), "Google Translate");
    }

    const ENV_VARS: [&str; 4] = [
        "BILINGUAL_SYNC_PROVIDER",
        "GOOGLE_TRANSLATE_API_KEY",
        "BILINGUAL_SYNC_TIMEOUT_SECS",
        "BILINGUAL_SYNC_PRIMARY_LANGUAGE",
    ];

    fn set_env(vars: &[(&str, &str)]) {
        for name in ENV_VARS {
            // SAFETY: only this test touches these variables
            unsafe { std::env::remove_var(name) };
        }
        for (name, value) in vars {
            unsafe { std::env::set_var(name, value) };
        }
    }

    // Every case lives in one test: the environment is process-wide and tests
    // run in parallel.
    #[test]
    fn test_from_env() {
        let saved: Vec<(&str, Option<String>)> = ENV_VARS
            .iter()
            .map(|name| (*name, std::env::var(name).ok()))
            .collect();

        set_env(&[]);
        let config = SyncConfig::from_env().unwrap();
        assert_eq!(config.provider, ProviderKind::Google);
        assert_eq!(config.google_api_key, None);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.primary_language, "fr");

        set_env(&[
            ("BILINGUAL_SYNC_PROVIDER", "Offline"),
            ("GOOGLE_TRANSLATE_API_KEY", "key-123"),
            ("BILINGUAL_SYNC_TIMEOUT_SECS", " 5 "),
            ("BILINGUAL_SYNC_PRIMARY_LANGUAGE", "en-GB"),
        ]);
        let config = SyncConfig::from_env().unwrap();
        assert_eq!(config.provider, ProviderKind::Offline);
        assert_eq!(config.google_api_key.as_deref(), Some("key-123"));
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.primary_language(), "en");
        assert!(config.build_provider().is_none());

        set_env(&[("GOOGLE_TRANSLATE_API_KEY", "   ")]);
        assert_eq!(SyncConfig::from_env().unwrap().google_api_key, None);

        set_env(&[("BILINGUAL_SYNC_TIMEOUT_SECS", "soon")]);
        assert!(matches!(
            SyncConfig::from_env(),
            Err(SyncError::ConfigError(_))
        ));

        set_env(&[("BILINGUAL_SYNC_PROVIDER", "deepl")]);
        assert!(matches!(
            SyncConfig::from_env(),
            Err(SyncError::ConfigError(_))
        ));

        set_env(&[("BILINGUAL_SYNC_PRIMARY_LANGUAGE", "ar")]);
        assert!(matches!(
            SyncConfig::from_env(),
            Err(SyncError::ConfigError(_))
        ));

        set_env(&[("BILINGUAL_SYNC_PRIMARY_LANGUAGE", "fr FR")]);
        assert!(matches!(
            SyncConfig::from_env(),
            Err(SyncError::InvalidLanguage(_))
        ));

        set_env(&[]);
        for (name, value) in saved {
            if let Some(value) = value {
                unsafe { std::env::set_var(name, value) };
            }
        }
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "{}",
            json!({
                "provider": "offline",
                "google_api_key": "from-file",
                "request_timeout_secs": 10,
                "localized_suffix": "_arabic"
            })
        )
        .unwrap();

        let config = SyncConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.provider, ProviderKind::Offline);
        assert_eq!(config.google_api_key.as_deref(), Some("from-file"));
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.localized_suffix, "_arabic");
        assert_eq!(config.primary_language, "fr");
    }

    #[test]
    fn test_from_json_file_rejects_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", json!({ "request_timeout_secs": 0 })).unwrap();
        assert!(matches!(
            SyncConfig::from_json_file(file.path()),
            Err(SyncError::ConfigError(_))
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            SyncConfig::from_json_file(file.path()),
            Err(SyncError::ConfigError(_))
        ));
    }

    #[test]
    fn test_from_json_file_missing() {
        let result = SyncConfig::from_json_file("/nonexistent/bilingual-sync.json");
        assert!(matches!(result, Err(SyncError::Io(_))));
    }
}
