//! Language detection with an offline fallback

use crate::language::{UNDETERMINED, detect_by_script, normalize_language};
use crate::provider::TranslationProvider;
use std::sync::Arc;
use tracing::{debug, warn};

/// Classifies a text fragment's language
///
/// Asks the provider first and falls back to [`detect_by_script`] when there
/// is no provider, the call fails, or the provider cannot decide. Never fails:
/// the only "unknown" answer is for empty input.
#[derive(Clone)]
pub struct LanguageDetector {
    provider: Option<Arc<dyn TranslationProvider>>,
}

impl LanguageDetector {
    pub fn new(provider: Option<Arc<dyn TranslationProvider>>) -> Self {
        Self { provider }
    }

    /// A detector that only uses the script heuristic
    pub fn offline() -> Self {
        Self { provider: None }
    }

    /// Detect the language of `text`
    ///
    /// # Returns
    ///
    /// * `Some(code)` - Provider answer, or `ar`/`en` from the heuristic
    /// * `None` - If `text` is empty or whitespace-only
    pub async fn detect(&self, text: &str) -> Option<String> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        if let Some(provider) = &self.provider {
            match provider.detect_language(text).await {
                Ok(code) => {
                    let code = normalize_language(&code);
                    if !code.is_empty() && code != UNDETERMINED {
                        return Some(code);
                    }
                    debug!(
                        provider = provider.provider_name(),
                        "provider could not determine language, using script heuristic"
                    );
                }
                Err(e) => {
                    warn!(
                        provider = provider.provider_name(),
                        error = %e,
                        "language detection failed, using script heuristic"
                    );
                }
            }
        }

        Some(detect_by_script(text).to_string())
    }
}

impl std::fmt::Debug for LanguageDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageDetector")
            .field(
                "provider",
                &self.provider.as_ref().map(|p| p.provider_name().to_string()),
            )
            .finish()
    }
}
