//! Translation provider capability
//!
//! This module defines the `TranslationProvider` trait: the one seam between
//! the synchronisation engine and whatever service actually detects and
//! translates text (Google Translate, a mock, ...). The engine receives a
//! provider through its constructor and never builds one itself, so tests can
//! substitute a deterministic fake.
//!
//! # Example
//!
//! ```ignore
//! use bilingual_sync::{GoogleTranslateProvider, TranslationProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = GoogleTranslateProvider::from_env()?;
//!
//!     let lang = provider.detect_language("Bonjour tout le monde").await?;
//!     println!("{}", lang); // "fr"
//!
//!     let arabic = provider.translate("Bonjour", "ar", Some("fr")).await?;
//!     println!("{}", arabic);
//!     Ok(())
//! }
//! ```

use crate::error::SyncResult;
use async_trait::async_trait;

/// Detection and translation capability consumed by the engine
///
/// Implementations are free to fail; every error is caught by
/// [`LanguageDetector`](crate::LanguageDetector) or
/// [`TextTranslator`](crate::TextTranslator) and turned into a fallback.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Detect the language of a text
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - An ISO 639-1 code such as `ar`, `fr` or `en`
    /// * `Err(SyncError)` - If the provider is unreachable or refuses the text
    async fn detect_language(&self, text: &str) -> SyncResult<String>;

    /// Translate a text into `target_language`
    ///
    /// # Arguments
    ///
    /// * `text` - The text to translate
    /// * `target_language` - Target language code (e.g., "ar", "fr")
    /// * `source_language` - Source language code, or `None` to let the provider detect it
    async fn translate(
        &self,
        text: &str,
        target_language: &str,
        source_language: Option<&str>,
    ) -> SyncResult<String>;

    /// Name used in log lines to identify the provider
    fn provider_name(&self) -> &str;
}
