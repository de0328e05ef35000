//! Bilingual field synchronisation
//!
//! Keeps the primary (French by default) and localized (Arabic) slots of each
//! [`FieldPair`] consistent. Two entry points:
//!
//! - [`BilingualSynchronizer::auto_translate`] fills whichever slot is empty.
//!   Used on creation.
//! - [`BilingualSynchronizer::smart_translate`] follows the slots the caller
//!   actually edited. Used on update, so an unedited pair is never
//!   retranslated.
//!
//! Neither ever fails: a pair whose detection or translation fails is left as
//! it came in.
//!
//! # Example
//!
//! ```ignore
//! use bilingual_sync::{BilingualSynchronizer, Entity, SyncRequest};
//!
//! #[tokio::main]
//! async fn main() {
//!     let sync = BilingualSynchronizer::offline();
//!     let request = SyncRequest::new().with_field("title", "education plan");
//!     let synced = sync.auto_translate(request, &Entity::Goal.field_pairs()).await;
//!     assert_eq!(synced.get("title_ar"), "التعليم خطة");
//! }
//! ```

use crate::config::SyncConfig;
use crate::detector::LanguageDetector;
use crate::fields::{ChangeSet, FieldPair, SyncRequest};
use crate::language::{ARABIC, FRENCH, is_arabic, normalize_language};
use crate::provider::TranslationProvider;
use crate::translator::TextTranslator;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One of the two physical slots of a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Primary,
    Localized,
}

/// What happened to a single pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PairOutcome {
    /// Nothing to do: both slots filled, both empty, or nothing edited
    Unchanged,
    /// `slot` was written with a translation of the other slot
    Translated { slot: Slot },
    /// Arabic text found in the primary slot was moved to the localized slot
    /// and replaced by its translation
    Relocated,
    /// Both slots were edited and one or both had to be rewritten
    Reconciled { primary: bool, localized: bool },
    /// The localized slot holds text that is not Arabic; left as is
    Anomaly { detected: String },
    /// Detection or translation gave nothing usable; left as is
    Failed { reason: String },
}

impl PairOutcome {
    /// Whether the pair's values were modified
    pub fn is_change(&self) -> bool {
        match self {
            PairOutcome::Translated { .. } | PairOutcome::Relocated => true,
            PairOutcome::Reconciled { primary, localized } => *primary || *localized,
            _ => false,
        }
    }
}

/// Per-pair outcomes of one synchronisation call, in pair order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub entries: Vec<(String, PairOutcome)>,
}

impl SyncReport {
    fn push(&mut self, pair: &FieldPair, outcome: PairOutcome) {
        self.entries.push((pair.name().to_string(), outcome));
    }

    /// Outcome for a pair by base name
    pub fn outcome(&self, name: &str) -> Option<&PairOutcome> {
        self.entries
            .iter()
            .find(|(pair, _)| pair == name)
            .map(|(_, outcome)| outcome)
    }

    /// Pairs flagged as anomalous input
    pub fn anomalies(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, outcome)| matches!(outcome, PairOutcome::Anomaly { .. }))
            .map(|(pair, _)| pair.as_str())
    }

    pub fn changed_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, outcome)| outcome.is_change())
            .count()
    }
}

/// The synchronisation engine
///
/// Holds no per-record state: one instance can serve every request.
#[derive(Debug, Clone)]
pub struct BilingualSynchronizer {
    detector: LanguageDetector,
    translator: TextTranslator,
    primary_language: String,
}

impl BilingualSynchronizer {
    /// Engine backed by `provider`, or by the offline fallbacks when `None`
    pub fn new(provider: Option<Arc<dyn TranslationProvider>>) -> Self {
        Self {
            detector: LanguageDetector::new(provider.clone()),
            translator: TextTranslator::new(provider),
            primary_language: FRENCH.to_string(),
        }
    }

    /// Engine that never leaves the process
    pub fn offline() -> Self {
        Self::new(None)
    }

    pub fn from_config(config: &SyncConfig) -> Self {
        Self::new(config.build_provider()).with_primary_language(&config.primary_language())
    }

    /// Assemble from separately built parts
    pub fn with_parts(detector: LanguageDetector, translator: TextTranslator) -> Self {
        Self {
            detector,
            translator,
            primary_language: FRENCH.to_string(),
        }
    }

    pub fn with_primary_language(mut self, code: &str) -> Self {
        self.primary_language = normalize_language(code);
        self
    }

    pub fn primary_language(&self) -> &str {
        &self.primary_language
    }

    /// Fill empty slots from their counterpart
    pub async fn auto_translate(&self, request: SyncRequest, pairs: &[FieldPair]) -> SyncRequest {
        self.auto_translate_with_report(request, pairs).await.0
    }

    /// [`auto_translate`](Self::auto_translate), also returning per-pair outcomes
    pub async fn auto_translate_with_report(
        &self,
        mut request: SyncRequest,
        pairs: &[FieldPair],
    ) -> (SyncRequest, SyncReport) {
        let mut report = SyncReport::default();
        for pair in pairs {
            let outcome = self.auto_pair(&mut request, pair).await;
            debug!(field = %pair.name(), ?outcome, "auto sync");
            report.push(pair, outcome);
        }

        info!(
            mode = "auto",
            pairs = pairs.len(),
            changed = report.changed_count(),
            anomalies = report.anomalies().count(),
            "bilingual sync complete"
        );
        (request, report)
    }

    /// Propagate the edits named in `changes` to the other slot of each pair
    pub async fn smart_translate(
        &self,
        request: SyncRequest,
        pairs: &[FieldPair],
        changes: &ChangeSet,
    ) -> SyncRequest {
        self.smart_translate_with_report(request, pairs, changes)
            .await
            .0
    }

    /// [`smart_translate`](Self::smart_translate), also returning per-pair outcomes
    pub async fn smart_translate_with_report(
        &self,
        mut request: SyncRequest,
        pairs: &[FieldPair],
        changes: &ChangeSet,
    ) -> (SyncRequest, SyncReport) {
        let mut report = SyncReport::default();
        for pair in pairs {
            let outcome = self.smart_pair(&mut request, pair, changes).await;
            debug!(field = %pair.name(), ?outcome, "smart sync");
            report.push(pair, outcome);
        }

        info!(
            mode = "smart",
            pairs = pairs.len(),
            edited = changes.len(),
            changed = report.changed_count(),
            anomalies = report.anomalies().count(),
            "bilingual sync complete"
        );
        (request, report)
    }

    async fn auto_pair(&self, request: &mut SyncRequest, pair: &FieldPair) -> PairOutcome {
        let (primary, localized) = request.pair_values(pair);

        match (primary.is_empty(), localized.is_empty()) {
            (false, true) => self.sync_from_primary(request, pair, &primary).await,
            (true, false) => match self.sync_from_localized(request, pair, &localized).await {
                Ok(outcome) => outcome,
                Err(detected) => {
                    warn!(
                        field = %pair.localized,
                        detected = %detected,
                        value = %localized,
                        "localized field contains non-Arabic text"
                    );
                    PairOutcome::Anomaly { detected }
                }
            },
            // Values supplied in both languages are trusted as-is
            (false, false) => PairOutcome::Unchanged,
            (true, true) => PairOutcome::Unchanged,
        }
    }

    async fn smart_pair(
        &self,
        request: &mut SyncRequest,
        pair: &FieldPair,
        changes: &ChangeSet,
    ) -> PairOutcome {
        let primary_changed = changes.primary_changed(pair);
        let localized_changed = changes.localized_changed(pair);
        let (primary, localized) = request.pair_values(pair);

        match (primary_changed, localized_changed) {
            (true, false) => self.sync_from_primary(request, pair, &primary).await,
            (false, true) => match self.sync_from_localized(request, pair, &localized).await {
                Ok(outcome) => outcome,
                Err(detected) => {
                    // The "Arabic" edit was not Arabic: follow the primary slot instead
                    debug!(
                        field = %pair.localized,
                        detected = %detected,
                        "edited localized field is not Arabic, resyncing from primary"
                    );
                    match self.primary_to_localized(request, pair, &primary).await {
                        Some(outcome) => outcome,
                        None => PairOutcome::Anomaly { detected },
                    }
                }
            },
            (true, true) => self.reconcile(request, pair, &primary, &localized).await,
            (false, false) => PairOutcome::Unchanged,
        }
    }

    /// Primary slot drives: translate it to Arabic, or relocate it if it is Arabic
    async fn sync_from_primary(
        &self,
        request: &mut SyncRequest,
        pair: &FieldPair,
        primary: &str,
    ) -> PairOutcome {
        let Some(lang) = self.detector.detect(primary).await else {
            return PairOutcome::Unchanged;
        };

        if is_arabic(&lang) {
            match self
                .translator
                .translate(primary, &self.primary_language, Some(&lang))
                .await
            {
                Some(translated) => {
                    request.set(pair.primary.clone(), translated);
                    request.set(pair.localized.clone(), primary);
                    PairOutcome::Relocated
                }
                None => failed(pair, "translation of Arabic primary text failed"),
            }
        } else {
            match self.translator.translate(primary, ARABIC, Some(&lang)).await {
                Some(translated) => {
                    request.set(pair.localized.clone(), translated);
                    PairOutcome::Translated {
                        slot: Slot::Localized,
                    }
                }
                None => failed(pair, "translation to Arabic failed"),
            }
        }
    }

    /// Localized slot drives: translate it to the primary language if it is Arabic
    ///
    /// Returns `Err(detected_language)` when the localized text is not Arabic,
    /// leaving the caller to decide how to treat the anomaly.
    async fn sync_from_localized(
        &self,
        request: &mut SyncRequest,
        pair: &FieldPair,
        localized: &str,
    ) -> Result<PairOutcome, String> {
        let Some(lang) = self.detector.detect(localized).await else {
            return Err(String::new());
        };

        if !is_arabic(&lang) {
            return Err(lang);
        }

        match self
            .translator
            .translate(localized, &self.primary_language, Some(&lang))
            .await
        {
            Some(translated) => {
                request.set(pair.primary.clone(), translated);
                Ok(PairOutcome::Translated {
                    slot: Slot::Primary,
                })
            }
            None => Ok(failed(pair, "translation of localized text failed")),
        }
    }

    /// Regenerate the localized slot from a non-Arabic primary value
    ///
    /// `None` when the primary slot is empty or itself Arabic.
    async fn primary_to_localized(
        &self,
        request: &mut SyncRequest,
        pair: &FieldPair,
        primary: &str,
    ) -> Option<PairOutcome> {
        let lang = self.detector.detect(primary).await?;
        if is_arabic(&lang) {
            return None;
        }

        let translated = self.translator.translate(primary, ARABIC, Some(&lang)).await?;
        request.set(pair.localized.clone(), translated);
        Some(PairOutcome::Translated {
            slot: Slot::Localized,
        })
    }

    /// Both slots edited
    ///
    /// Both inputs are classified first. The primary slot is then corrected if
    /// it holds Arabic, and only after that is the localized slot regenerated
    /// (from the corrected primary value) if its own input was not Arabic.
    async fn reconcile(
        &self,
        request: &mut SyncRequest,
        pair: &FieldPair,
        primary: &str,
        localized: &str,
    ) -> PairOutcome {
        let primary_lang = self.detector.detect(primary).await;
        let localized_lang = self.detector.detect(localized).await;

        let mut corrected = primary.to_string();
        let mut corrected_lang = primary_lang.clone();
        let mut primary_rewritten = false;

        if let Some(lang) = primary_lang.as_deref().filter(|lang| is_arabic(lang)) {
            if let Some(translated) = self
                .translator
                .translate(primary, &self.primary_language, Some(lang))
                .await
            {
                request.set(pair.primary.clone(), translated.clone());
                corrected = translated;
                corrected_lang = Some(self.primary_language.clone());
                primary_rewritten = true;
            }
        }

        let localized_is_arabic = localized_lang.as_deref().is_some_and(is_arabic);
        let mut localized_rewritten = false;

        if !localized_is_arabic {
            if let Some(lang) = corrected_lang.as_deref().filter(|lang| !is_arabic(lang)) {
                if let Some(translated) = self
                    .translator
                    .translate(&corrected, ARABIC, Some(lang))
                    .await
                {
                    request.set(pair.localized.clone(), translated);
                    localized_rewritten = true;
                }
            }
        }

        if primary_rewritten || localized_rewritten {
            PairOutcome::Reconciled {
                primary: primary_rewritten,
                localized: localized_rewritten,
            }
        } else {
            PairOutcome::Unchanged
        }
    }
}

fn failed(pair: &FieldPair, reason: &str) -> PairOutcome {
    warn!(field = %pair.name(), reason, "leaving field pair unchanged");
    PairOutcome::Failed {
        reason: reason.to_string(),
    }
}
