//! Field pairs, request records and change sets
//!
//! A record is handled as a flat map from physical field names to string
//! values. [`FieldPair`] says which two of those names hold the same value in
//! the primary language and in Arabic; [`ChangeSet`] says which physical names
//! the caller actually edited.

use crate::error::{SyncError, SyncResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Conventional suffix of the localized slot (`title` ↔ `title_ar`)
pub const LOCALIZED_SUFFIX: &str = "_ar";

/// One semantic field stored in two physical slots
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldPair {
    /// Name of the primary-language slot, also the pair's base name
    pub primary: String,
    /// Name of the Arabic slot
    pub localized: String,
}

impl FieldPair {
    /// Pair two explicitly named slots
    ///
    /// Use this when the localized name does not follow the suffix convention.
    pub fn new(primary: impl Into<String>, localized: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            localized: localized.into(),
        }
    }

    /// Pair `base` with `base + suffix`
    pub fn with_suffix(base: &str, suffix: &str) -> Self {
        Self::new(base, format!("{}{}", base, suffix))
    }

    /// Pair `base` with `base_ar`
    pub fn from_base(base: &str) -> Self {
        Self::with_suffix(base, LOCALIZED_SUFFIX)
    }

    /// Base name of the pair
    pub fn name(&self) -> &str {
        &self.primary
    }
}

/// Build suffix-convention pairs for a list of base names
pub fn pairs_from_bases<I, S>(bases: I, suffix: &str) -> Vec<FieldPair>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    bases
        .into_iter()
        .map(|base| FieldPair::with_suffix(base.as_ref(), suffix))
        .collect()
}

/// Field values of one record, passed into the engine and returned mutated
///
/// Missing fields read as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SyncRequest {
    fields: BTreeMap<String, String>,
}

impl SyncRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Raw value of a field, `""` when absent
    pub fn get(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn into_fields(self) -> BTreeMap<String, String> {
        self.fields
    }

    /// Trimmed `(primary, localized)` values of a pair
    pub fn pair_values(&self, pair: &FieldPair) -> (String, String) {
        (
            self.get(&pair.primary).trim().to_string(),
            self.get(&pair.localized).trim().to_string(),
        )
    }

    /// Overlay `submitted` on a copy of `self`
    ///
    /// This is the record an update would persist before synchronisation.
    pub fn merge(&self, submitted: &SyncRequest) -> SyncRequest {
        let mut merged = self.clone();
        for (name, value) in &submitted.fields {
            merged.set(name.clone(), value.clone());
        }
        merged
    }

    /// Pick the slots of `pairs` out of a JSON object
    ///
    /// `null` reads as an empty string; absent keys are left absent. Any other
    /// non-string value is rejected.
    pub fn from_json_record(record: &Map<String, Value>, pairs: &[FieldPair]) -> SyncResult<Self> {
        let mut request = SyncRequest::new();
        for pair in pairs {
            for name in [&pair.primary, &pair.localized] {
                match record.get(name) {
                    None => {}
                    Some(Value::Null) => request.set(name.clone(), ""),
                    Some(Value::String(s)) => request.set(name.clone(), s.clone()),
                    Some(other) => {
                        return Err(SyncError::InvalidRecord(format!(
                            "field '{}' must be a string or null, found {}",
                            name, other
                        )));
                    }
                }
            }
        }
        Ok(request)
    }

    /// Write the fields back into a JSON object
    ///
    /// Values equal to what the record already holds are not rewritten, so an
    /// untouched `null` stays `null`.
    pub fn apply_to_json_record(&self, record: &mut Map<String, Value>) {
        for (name, value) in &self.fields {
            let unchanged = match record.get(name) {
                Some(Value::String(existing)) => existing == value,
                None | Some(Value::Null) => value.is_empty(),
                Some(_) => false,
            };
            if !unchanged {
                record.insert(name.clone(), Value::String(value.clone()));
            }
        }
    }
}

impl<K, V> FromIterator<(K, V)> for SyncRequest
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut request = SyncRequest::new();
        for (name, value) in iter {
            request.set(name, value);
        }
        request
    }
}

/// Physical field names the caller edited in this operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeSet {
    names: BTreeSet<String>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn primary_changed(&self, pair: &FieldPair) -> bool {
        self.contains(&pair.primary)
    }

    pub fn localized_changed(&self, pair: &FieldPair) -> bool {
        self.contains(&pair.localized)
    }

    /// Fields `submitted` carries with a trimmed value different from `stored`
    pub fn between(stored: &SyncRequest, submitted: &SyncRequest) -> Self {
        submitted
            .fields()
            .iter()
            .filter(|(name, value)| stored.get(name).trim() != value.trim())
            .map(|(name, _)| name.clone())
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for ChangeSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}
