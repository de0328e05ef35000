//! Text translation with an offline fallback

use crate::dictionary::FallbackDictionary;
use crate::provider::TranslationProvider;
use std::sync::Arc;
use tracing::{debug, warn};

/// Converts text between language codes
///
/// One best-effort provider call; if there is no provider or the call fails
/// (or comes back empty), the [`FallbackDictionary`] is used instead. Text
/// with no known term at all counts as untranslatable.
#[derive(Clone)]
pub struct TextTranslator {
    provider: Option<Arc<dyn TranslationProvider>>,
    dictionary: &'static FallbackDictionary,
}

impl TextTranslator {
    pub fn new(provider: Option<Arc<dyn TranslationProvider>>) -> Self {
        Self {
            provider,
            dictionary: FallbackDictionary::global(),
        }
    }

    /// A translator that only uses the fallback dictionary
    pub fn offline() -> Self {
        Self::new(None)
    }

    /// Use a different fallback table
    pub fn with_dictionary(mut self, dictionary: &'static FallbackDictionary) -> Self {
        self.dictionary = dictionary;
        self
    }

    /// Translate `text` into `target_language`
    ///
    /// # Returns
    ///
    /// * `Some(text)` - Provider result, or the dictionary rendering
    /// * `None` - If `text` is blank, or the provider failed and the
    ///   dictionary knows none of its terms
    pub async fn translate(
        &self,
        text: &str,
        target_language: &str,
        source_language: Option<&str>,
    ) -> Option<String> {
        if text.trim().is_empty() {
            return None;
        }

        if let Some(provider) = &self.provider {
            match provider
                .translate(text, target_language, source_language)
                .await
            {
                Ok(translated) if !translated.trim().is_empty() => return Some(translated),
                Ok(_) => {
                    warn!(
                        provider = provider.provider_name(),
                        target = target_language,
                        "provider returned an empty translation, using fallback dictionary"
                    );
                }
                Err(e) => {
                    warn!(
                        provider = provider.provider_name(),
                        target = target_language,
                        error = %e,
                        "translation failed, using fallback dictionary"
                    );
                }
            }
        }

        let translated = self.dictionary.try_translate(text, target_language);
        if translated.is_none() {
            warn!(
                target = target_language,
                "fallback dictionary knows none of the terms, leaving text untranslated"
            );
        } else {
            debug!(target = target_language, "translated with fallback dictionary");
        }
        translated
    }
}

impl std::fmt::Debug for TextTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextTranslator")
            .field(
                "provider",
                &self.provider.as_ref().map(|p| p.provider_name().to_string()),
            )
            .field("dictionary_terms", &self.dictionary.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockMode, MockProvider};

    fn translator_with(mock: &MockProvider) -> TextTranslator {
        TextTranslator::new(Some(Arc::new(mock.clone())))
    }

    #[tokio::test]
    async fn test_empty_text_is_none() {
        let mock = MockProvider::new(MockMode::Suffix);
        let translator = translator_with(&mock);
        assert_eq!(translator.translate("", "ar", None).await, None);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_provider_result_is_returned() {
        let mock = MockProvider::new(MockMode::Suffix);
        let translator = translator_with(&mock);
        assert_eq!(
            translator.translate("Bonjour", "ar", Some("fr")).await.as_deref(),
            Some("Bonjour_ar")
        );
    }

    #[tokio::test]
    async fn test_provider_error_uses_dictionary() {
        let mock = MockProvider::failing("quota exceeded");
        let translator = translator_with(&mock);
        assert_eq!(
            translator.translate("education", "ar", None).await.as_deref(),
            Some("التعليم")
        );
        assert_eq!(
            translator.translate("التعليم", "fr", Some("ar")).await.as_deref(),
            Some("education")
        );
    }

    #[tokio::test]
    async fn test_empty_provider_result_uses_dictionary() {
        let mut map = std::collections::HashMap::new();
        map.insert(("school".to_string(), "ar".to_string()), "  ".to_string());
        let mock = MockProvider::new(MockMode::Mappings(map));
        let translator = translator_with(&mock);
        assert_eq!(
            translator.translate("school", "ar", None).await.as_deref(),
            Some("مدرسة")
        );
    }

    #[tokio::test]
    async fn test_offline_translation() {
        let translator = TextTranslator::offline();
        assert_eq!(
            translator.translate("education", "ar", None).await.as_deref(),
            Some("التعليم")
        );
        assert_eq!(
            translator.translate("education unknown", "ar", None).await.as_deref(),
            Some("التعليم unknown")
        );
        assert_eq!(translator.translate("unknown words", "ar", None).await, None);
        assert_eq!(translator.translate("education", "es", None).await, None);
    }

    #[tokio::test]
    async fn test_provider_error_with_no_known_terms_is_none() {
        let mock = MockProvider::failing("quota exceeded");
        let translator = translator_with(&mock);
        assert_eq!(translator.translate("مرحبا بكم", "fr", Some("ar")).await, None);
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_blank_text_is_none_without_calls() {
        let mock = MockProvider::new(MockMode::Suffix);
        let translator = translator_with(&mock);
        assert_eq!(translator.translate("  \t\n ", "ar", None).await, None);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_custom_dictionary() {
        static TERMS: &[(&str, &str)] = &[("note", "ملاحظة")];
        static DICT: once_cell::sync::Lazy<FallbackDictionary> =
            once_cell::sync::Lazy::new(|| FallbackDictionary::new(TERMS));

        let translator = TextTranslator::offline().with_dictionary(&DICT);
        assert_eq!(
            translator.translate("note", "ar", None).await.as_deref(),
            Some("ملاحظة")
        );
    }
}
