//! Mock translation provider for testing
//!
//! A deterministic, network-free provider. It counts every call it receives,
//! which is how tests check that an untouched record costs zero provider
//! round trips.
//!
//! # Example
//!
//! ```ignore
//! use bilingual_sync::{MockMode, MockProvider, TranslationProvider};
//!
//! #[tokio::test]
//! async fn test_translation() {
//!     let mock = MockProvider::new(MockMode::Suffix);
//!     let result = mock.translate("hello", "ar", None).await.unwrap();
//!     assert_eq!(result, "hello_ar");
//! }
//! ```

use crate::error::{SyncError, SyncResult};
use crate::language::detect_by_script;
use crate::provider::TranslationProvider;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// How the mock translates
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Append the target code: "hello" → "hello_ar"
    Suffix,

    /// Use predefined mappings keyed by `(text, target_language)`,
    /// falling back to `Suffix` for unknown pairs
    Mappings(HashMap<(String, String), String>),

    /// Simulate provider errors
    Error(String),

    /// Return input unchanged
    NoOp,
}

/// How the mock detects languages
#[derive(Debug, Clone)]
pub enum MockDetection {
    /// Classify by script, like the offline heuristic
    Script,

    /// Always report the same code
    Fixed(String),

    /// Simulate detection errors
    Error(String),
}

/// Mock provider that simulates various provider behaviours
#[derive(Debug, Clone)]
pub struct MockProvider {
    mode: MockMode,
    detection: MockDetection,
    /// Shared between clones so a test can keep a handle after moving the provider
    calls: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Create a mock with the given translation mode and script-based detection
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            detection: MockDetection::Script,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Replace the detection behaviour
    pub fn with_detection(mut self, detection: MockDetection) -> Self {
        self.detection = detection;
        self
    }

    /// A mock that fails every call
    pub fn failing(message: &str) -> Self {
        Self::new(MockMode::Error(message.to_string()))
            .with_detection(MockDetection::Error(message.to_string()))
    }

    /// Total number of `detect_language` and `translate` calls received
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn apply_translation(&self, text: &str, target: &str) -> SyncResult<String> {
        match &self.mode {
            MockMode::Suffix => Ok(format!("{}_{}", text, target)),
            MockMode::Mappings(map) => {
                let key = (text.to_string(), target.to_string());
                Ok(map
                    .get(&key)
                    .cloned()
                    .unwrap_or_else(|| format!("{}_{}", text, target)))
            }
            MockMode::Error(msg) => Err(SyncError::TranslationError(msg.clone())),
            MockMode::NoOp => Ok(text.to_string()),
        }
    }
}

#[async_trait]
impl TranslationProvider for MockProvider {
    async fn detect_language(&self, text: &str) -> SyncResult<String> {
        self.record_call();

        match &self.detection {
            MockDetection::Script => Ok(detect_by_script(text).to_string()),
            MockDetection::Fixed(code) => Ok(code.clone()),
            MockDetection::Error(msg) => Err(SyncError::DetectionError(msg.clone())),
        }
    }

    async fn translate(
        &self,
        text: &str,
        target_language: &str,
        _source_language: Option<&str>,
    ) -> SyncResult<String> {
        self.record_call();
        self.apply_translation(text, target_language)
    }

    fn provider_name(&self) -> &str {
        "Mock Provider"
    }
}
