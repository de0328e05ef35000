//! Field-pair presets for the record types that carry bilingual content

use crate::error::SyncError;
use crate::fields::{FieldPair, LOCALIZED_SUFFIX, pairs_from_bases};
use std::fmt;
use std::str::FromStr;

/// Content-bearing record types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Category,
    Domain,
    Item,
    Goal,
    Note,
    Strategy,
}

impl Entity {
    pub const ALL: [Entity; 6] = [
        Entity::Category,
        Entity::Domain,
        Entity::Item,
        Entity::Goal,
        Entity::Note,
        Entity::Strategy,
    ];

    /// Base names of the bilingual fields, in synchronisation order
    pub fn base_fields(&self) -> &'static [&'static str] {
        match self {
            Entity::Category => &["title", "description"],
            Entity::Domain => &["name", "description"],
            Entity::Item => &["name", "description", "commentaire"],
            Entity::Goal => &["title", "description"],
            Entity::Note => &["content"],
            Entity::Strategy => &["title", "description"],
        }
    }

    pub fn field_pairs(&self) -> Vec<FieldPair> {
        self.field_pairs_with_suffix(LOCALIZED_SUFFIX)
    }

    /// Pairs using a non-default localized suffix
    pub fn field_pairs_with_suffix(&self, suffix: &str) -> Vec<FieldPair> {
        pairs_from_bases(self.base_fields(), suffix)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Category => "category",
            Entity::Domain => "domain",
            Entity::Item => "item",
            Entity::Goal => "goal",
            Entity::Note => "note",
            Entity::Strategy => "strategy",
        }
    }

    fn plural(&self) -> &'static str {
        match self {
            Entity::Category => "categories",
            Entity::Domain => "domains",
            Entity::Item => "items",
            Entity::Goal => "goals",
            Entity::Note => "notes",
            Entity::Strategy => "strategies",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Entity {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Entity::ALL
            .into_iter()
            .find(|entity| entity.as_str() == wanted || entity.plural() == wanted)
            .ok_or_else(|| {
                SyncError::ConfigError(format!(
                    "unknown entity '{}' (expected one of: category, domain, item, goal, note, strategy)",
                    s
                ))
            })
    }
}
