//! Bilingual field synchronisation
//!
//! Keeps records that store every human-readable field twice, once in a
//! primary language (French by default) and once in Arabic, consistent with
//! each other.
//!
//! # Overview
//!
//! 1. **Language detection** - [`LanguageDetector`] asks the provider and
//!    falls back to an Arabic-script heuristic
//! 2. **Translation** - [`TextTranslator`] asks the provider and falls back to
//!    a fixed English/Arabic term table ([`FallbackDictionary`])
//! 3. **Providers** - [`TranslationProvider`] trait with a Google Translate v2
//!    implementation and a deterministic [`MockProvider`] for tests
//! 4. **Synchronisation** - [`BilingualSynchronizer`] decides per
//!    [`FieldPair`] which slot to fill, relocate or leave alone
//!
//! # Example
//!
//! ```ignore
//! use bilingual_sync::{BilingualSynchronizer, ChangeSet, Entity, SyncConfig, SyncRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let sync = BilingualSynchronizer::from_config(&SyncConfig::from_env()?);
//!     let pairs = Entity::Goal.field_pairs();
//!
//!     // Creation: fill whatever is missing
//!     let created = SyncRequest::new().with_field("title", "Améliorer la lecture");
//!     let created = sync.auto_translate(created, &pairs).await;
//!
//!     // Update: only follow what the user edited
//!     let submitted = SyncRequest::new().with_field("title", "Améliorer l'écriture");
//!     let changes = ChangeSet::between(&created, &submitted);
//!     let updated = sync
//!         .smart_translate(created.merge(&submitted), &pairs, &changes)
//!         .await;
//!
//!     println!("{}", updated.get("title_ar"));
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod detector;
pub mod dictionary;
pub mod entities;
pub mod error;
pub mod fields;
pub mod google_translate;
pub mod language;
pub mod mock;
pub mod provider;
pub mod sync;
pub mod translator;


pub use config::{ProviderKind, SyncConfig};
pub use detector::LanguageDetector;
pub use dictionary::FallbackDictionary;
pub use entities::Entity;
pub use error::{SyncError, SyncResult};
pub use fields::{ChangeSet, FieldPair, LOCALIZED_SUFFIX, SyncRequest, pairs_from_bases};
pub use google_translate::GoogleTranslateProvider;
pub use mock::{MockDetection, MockMode, MockProvider};
pub use provider::TranslationProvider;
pub use sync::{BilingualSynchronizer, PairOutcome, Slot, SyncReport};
pub use translator::TextTranslator;
