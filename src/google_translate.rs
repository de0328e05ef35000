//! Google Translate API provider
//!
//! This module integrates with Google Translate API v2 for both language
//! detection and translation.
//!
//! # Authentication
//!
//! The provider loads the API key from the `GOOGLE_TRANSLATE_API_KEY`
//! environment variable. Obtain a key from:
//! https://console.cloud.google.com/
//!
//! # Example
//!
//! ```ignore
//! use bilingual_sync::{GoogleTranslateProvider, TranslationProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = GoogleTranslateProvider::from_env()?;
//!     let result = provider.translate("Hello, world!", "ar", Some("en")).await?;
//!     println!("{}", result);
//!     Ok(())
//! }
//! ```

use crate::error::{SyncError, SyncResult};
use crate::language::{normalize_language, validate_language};
use crate::provider::TranslationProvider;
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

/// Google Translate API v2 provider
///
/// Each call is a single request/response; there is no batching and no retry.
#[derive(Clone)]
pub struct GoogleTranslateProvider {
    /// API key for authentication
    api_key: String,
    /// HTTP client for async requests
    client: reqwest::Client,
    /// Base URL for Google Translate API
    base_url: String,
}

impl GoogleTranslateProvider {
    /// Maximum characters per string (30KB per Google Translate API limits)
    const MAX_CHARS_PER_STRING: usize = 30_000;

    /// Default client timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Create a new provider with an explicit API key and the default timeout
    pub fn new(api_key: String) -> SyncResult<Self> {
        Self::with_timeout(api_key, Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS))
    }

    /// Create a new provider with an explicit API key and client timeout
    ///
    /// A call that exceeds the timeout surfaces as `SyncError::NetworkError`,
    /// which the engine treats like any other provider failure.
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - New provider instance
    /// * `Err(SyncError)` - If API key is empty or HTTP client creation fails
    pub fn with_timeout(api_key: String, timeout: Duration) -> SyncResult<Self> {
        if api_key.trim().is_empty() {
            return Err(SyncError::ConfigError(
                "API key cannot be empty".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SyncError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            client,
            base_url: "https://translation.googleapis.com/language/translate/v2".to_string(),
        })
    }

    /// Create a provider from the `GOOGLE_TRANSLATE_API_KEY` environment variable
    pub fn from_env() -> SyncResult<Self> {
        let api_key = std::env::var("GOOGLE_TRANSLATE_API_KEY").map_err(|_| {
            SyncError::ConfigError(
                "GOOGLE_TRANSLATE_API_KEY environment variable not set".to_string(),
            )
        })?;

        Self::new(api_key)
    }

    /// Point the provider at a different endpoint (proxies, test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn check_length(text: &str) -> SyncResult<()> {
        if text.chars().count() > Self::MAX_CHARS_PER_STRING {
            return Err(SyncError::TranslationError(format!(
                "Text exceeds maximum length of {} characters",
                Self::MAX_CHARS_PER_STRING
            )));
        }
        Ok(())
    }

    /// POST a JSON body and return the decoded response, mapping HTTP failures
    async fn post(&self, url: &str, body: serde_json::Value) -> SyncResult<serde_json::Value> {
        let url = format!("{}?key={}", url, self.api_key);
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            return Err(if status.is_client_error() {
                SyncError::ConfigError(format!("API client error ({}): {}", status, error_text))
            } else {
                SyncError::TranslationError(format!(
                    "API server error ({}): {}",
                    status, error_text
                ))
            });
        }

        response.json().await.map_err(|e| {
            SyncError::TranslationError(format!("Failed to parse API response: {}", e))
        })
    }

    /// Extract `data.translations[0].translatedText`
    fn parse_translation(json: &serde_json::Value) -> SyncResult<String> {
        json["data"]["translations"][0]["translatedText"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| {
                SyncError::TranslationError(
                    "Invalid API response: missing 'data.translations[0].translatedText'"
                        .to_string(),
                )
            })
    }

    /// Extract `data.detections[0][0].language`
    fn parse_detection(json: &serde_json::Value) -> SyncResult<String> {
        json["data"]["detections"][0][0]["language"]
            .as_str()
            .map(normalize_language)
            .ok_or_else(|| {
                SyncError::DetectionError(
                    "Invalid API response: missing 'data.detections[0][0].language'".to_string(),
                )
            })
    }
}

impl std::fmt::Debug for GoogleTranslateProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleTranslateProvider")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl TranslationProvider for GoogleTranslateProvider {
    async fn detect_language(&self, text: &str) -> SyncResult<String> {
        if text.trim().is_empty() {
            return Err(SyncError::DetectionError(
                "Cannot detect the language of empty text".to_string(),
            ));
        }
        Self::check_length(text)?;

        let url = format!("{}/detect", self.base_url);
        let json = self.post(&url, json!({ "q": [text] })).await?;
        Self::parse_detection(&json)
    }

    async fn translate(
        &self,
        text: &str,
        target_language: &str,
        source_language: Option<&str>,
    ) -> SyncResult<String> {
        validate_language(target_language)?;
        if let Some(source) = source_language {
            validate_language(source)?;
        }

        if text.is_empty() {
            return Ok(String::new());
        }
        Self::check_length(text)?;

        let mut body = json!({
            "q": [text],
            "target": normalize_language(target_language),
            "format": "text"
        });
        if let Some(source) = source_language {
            body["source"] = json!(normalize_language(source));
        }

        let json = self.post(&self.base_url, body).await?;
        Self::parse_translation(&json)
    }

    fn provider_name(&self) -> &str {
        "Google Translate"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== Initialization Tests ==========

    #[test]
    fn test_new_with_valid_key() {
        let provider = GoogleTranslateProvider::new("test-api-key".to_string());
        assert!(provider.is_ok());
        assert_eq!(provider.unwrap().provider_name(), "Google Translate");
    }

    #[test]
    fn test_new_with_empty_key() {
        let result = GoogleTranslateProvider::new("".to_string());
        match result {
            Err(SyncError::ConfigError(msg)) => assert!(msg.contains("empty")),
            _ => panic!("Expected ConfigError"),
        }
    }

    #[test]
    fn test_new_with_whitespace_key() {
        assert!(GoogleTranslateProvider::new("   ".to_string()).is_err());
    }

    #[test]
    fn test_with_base_url_trims_trailing_slash() {
        let provider = GoogleTranslateProvider::new("k".to_string())
            .unwrap()
            .with_base_url("http://localhost:9999/v2/");
        assert!(format!("{:?}", provider).contains("http://localhost:9999/v2\""));
    }

    // ========== Response Parsing Tests ==========

    #[test]
    fn test_parse_translation() {
        let json = json!({
            "data": { "translations": [ { "translatedText": "مرحبا" } ] }
        });
        assert_eq!(
            GoogleTranslateProvider::parse_translation(&json).unwrap(),
            "مرحبا"
        );
    }

    #[test]
    fn test_parse_translation_missing_field() {
        let json = json!({ "data": { "translations": [] } });
        assert!(matches!(
            GoogleTranslateProvider::parse_translation(&json),
            Err(SyncError::TranslationError(_))
        ));
    }

    #[test]
    fn test_parse_detection_normalizes_code() {
        let json = json!({
            "data": { "detections": [ [ { "language": "fr-FR", "confidence": 0.9 } ] ] }
        });
        assert_eq!(GoogleTranslateProvider::parse_detection(&json).unwrap(), "fr");
    }

    #[test]
    fn test_parse_detection_missing_field() {
        let json = json!({ "error": { "code": 400 } });
        assert!(matches!(
            GoogleTranslateProvider::parse_detection(&json),
            Err(SyncError::DetectionError(_))
        ));
    }

    // ========== Validation Tests ==========

    #[tokio::test]
    async fn test_translate_empty_text() {
        let provider = GoogleTranslateProvider::new("test-key".to_string()).unwrap();
        let result = provider.translate("", "ar", Some("fr")).await.unwrap();
        assert_eq!(result, "");
    }

    #[tokio::test]
    async fn test_translate_invalid_target_language() {
        let provider = GoogleTranslateProvider::new("test-key".to_string()).unwrap();
        let result = provider.translate("hello", "invalid#code", None).await;
        assert!(matches!(result, Err(SyncError::InvalidLanguage(_))));
    }

    #[tokio::test]
    async fn test_translate_invalid_source_language() {
        let provider = GoogleTranslateProvider::new("test-key".to_string()).unwrap();
        let result = provider.translate("hello", "ar", Some("en@x")).await;
        assert!(matches!(result, Err(SyncError::InvalidLanguage(_))));
    }

    #[tokio::test]
    async fn test_translate_text_too_long() {
        let provider = GoogleTranslateProvider::new("test-key".to_string()).unwrap();
        let long_text = "x".repeat(GoogleTranslateProvider::MAX_CHARS_PER_STRING + 1);
        match provider.translate(&long_text, "ar", None).await {
            Err(SyncError::TranslationError(msg)) => assert!(msg.contains("exceeds maximum")),
            _ => panic!("Expected TranslationError"),
        }
    }

    #[tokio::test]
    async fn test_detect_empty_text() {
        let provider = GoogleTranslateProvider::new("test-key".to_string()).unwrap();
        let result = provider.detect_language("   ").await;
        assert!(matches!(result, Err(SyncError::DetectionError(_))));
    }

    // ========== Debug Implementation Test ==========

    #[test]
    fn test_debug_output() {
        let provider = GoogleTranslateProvider::new("test-key".to_string()).unwrap();
        let debug_str = format!("{:?}", provider);
        assert!(debug_str.contains("***"));
        assert!(!debug_str.contains("test-key"));
    }

    // ========== Integration Tests (require real API key) ==========

    #[tokio::test]
    #[ignore] // Run with: cargo test --ignored
    async fn test_real_api_translation() {
        if std::env::var("GOOGLE_TRANSLATE_API_KEY").is_err() {
            eprintln!("Skipping: GOOGLE_TRANSLATE_API_KEY not set");
            return;
        }

        let provider = GoogleTranslateProvider::from_env().unwrap();
        let result = provider.translate("Bonjour", "ar", Some("fr")).await.unwrap();
        println!("Translation: Bonjour → {}", result);
        assert!(!result.is_empty());
    }

    #[tokio::test]
    #[ignore] // Run with: cargo test --ignored
    async fn test_real_api_detection() {
        if std::env::var("GOOGLE_TRANSLATE_API_KEY").is_err() {
            eprintln!("Skipping: GOOGLE_TRANSLATE_API_KEY not set");
            return;
        }

        let provider = GoogleTranslateProvider::from_env().unwrap();
        let lang = provider.detect_language("مرحبا بكم").await.unwrap();
        assert_eq!(lang, "ar");
    }

    #[tokio::test]
    #[ignore] // Run with: cargo test --ignored
    async fn test_real_api_invalid_key() {
        let provider = GoogleTranslateProvider::new("invalid-key-xyz".to_string()).unwrap();
        let result = provider.translate("hello", "ar", None).await;
        match result {
            Err(SyncError::ConfigError(_)) | Err(SyncError::TranslationError(_)) => {}
            _ => panic!("Expected error from invalid API key"),
        }
    }
}
