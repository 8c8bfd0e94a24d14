use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::{ColumnDescriptor, ColumnKind};
use crate::media::MediaTable;

/// Exact column names for the non-media kinds
///
/// Deserialized from the `[columns]` section of `autocrud.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExactNames {
    pub identifier: Vec<String>,
    pub created_timestamp: Vec<String>,
    pub updated_timestamp: Vec<String>,
    pub soft_delete_marker: Vec<String>,
    /// Secrets and verification state of an authentication subject
    pub sensitive: Vec<String>,
}

impl Default for ExactNames {
    fn default() -> Self {
        let names = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        ExactNames {
            identifier: names(&["id"]),
            created_timestamp: names(&["created_at"]),
            updated_timestamp: names(&["updated_at"]),
            soft_delete_marker: names(&["deleted_at"]),
            sensitive: names(&["password", "remember_token", "email_verified_at"]),
        }
    }
}

/// Table-driven column classifier
///
/// Matching order, first hit wins:
/// 1. exact names (identifier, timestamps, deletion marker, sensitive fields)
/// 2. media suffixes, in table order
/// 3. [`ColumnKind::PlainField`]
///
/// Classification never fails.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    exact: ExactNames,
    media: MediaTable,
}

static DEFAULT_CLASSIFIER: Lazy<Classifier> = Lazy::new(Classifier::default);

impl Classifier {
    /// Build a classifier from an exact-name table and a (validated) media table
    pub fn new(exact: ExactNames, media: MediaTable) -> Self {
        Classifier { exact, media }
    }

    pub fn media(&self) -> &MediaTable {
        &self.media
    }

    /// Classify one column name
    pub fn classify(&self, name: &str) -> ColumnDescriptor {
        ColumnDescriptor {
            name: name.to_string(),
            kind: self.kind_of(name),
        }
    }

    /// Classify every column, preserving order
    pub fn classify_all(&self, columns: &[String]) -> Vec<ColumnDescriptor> {
        columns.iter().map(|c| self.classify(c)).collect()
    }

    fn kind_of(&self, name: &str) -> ColumnKind {
        let is = |names: &[String]| names.iter().any(|n| n == name);
        if is(&self.exact.identifier) {
            ColumnKind::Identifier
        } else if is(&self.exact.created_timestamp) {
            ColumnKind::CreatedTimestamp
        } else if is(&self.exact.updated_timestamp) {
            ColumnKind::UpdatedTimestamp
        } else if is(&self.exact.soft_delete_marker) {
            ColumnKind::SoftDeleteMarker
        } else if is(&self.exact.sensitive) {
            ColumnKind::SensitiveAuthField
        } else if let Some(subtype) = self.media.subtype_for(name) {
            ColumnKind::MediaReference(subtype)
        } else {
            ColumnKind::PlainField
        }
    }
}

/// Classify with the built-in naming conventions
pub fn classify(name: &str) -> ColumnDescriptor {
    DEFAULT_CLASSIFIER.classify(name)
}
