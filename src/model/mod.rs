//! # Model Module
//!
//! Types describing the data model a generation run works on: the validated
//! model name, its ordered column inventory, and the semantic kind each column
//! is classified into.
//!
//! ## Classification
//!
//! Every downstream generator switches on [`ColumnKind`], never on the raw
//! column name. The naming convention lives in one place, the [`Classifier`]:
//!
//! ```text
//! "id"         → Identifier
//! "created_at" → CreatedTimestamp
//! "cover_img"  → MediaReference(Image)
//! "title"      → PlainField
//! ```
//!
//! ## Lifecycle
//!
//! A [`ModelSpec`] is built once per run from external schema data and is
//! immutable afterwards. Nothing here is persisted between runs.

mod classifier;
mod naming;

pub use classifier::*;
pub use naming::*;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Subtype of a column that stores a reference to an uploaded file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaSubtype {
    /// Pictures (`*_img`)
    Image,
    /// Video clips (`*_vid`)
    Video,
    /// Audio clips (`*_aud`)
    Audio,
    /// Office documents and PDFs (`*_doc`)
    Document,
}

impl MediaSubtype {
    /// All subtypes in classification priority order
    pub const ALL: [MediaSubtype; 4] = [
        MediaSubtype::Image,
        MediaSubtype::Video,
        MediaSubtype::Audio,
        MediaSubtype::Document,
    ];

    /// Allow-list selector passed to the storage collaborator
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaSubtype::Image => "image",
            MediaSubtype::Video => "video",
            MediaSubtype::Audio => "audio",
            MediaSubtype::Document => "document",
        }
    }
}

impl fmt::Display for MediaSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic kind of a column, derived from its name alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// Primary key
    Identifier,
    /// Creation timestamp maintained by the persistence layer
    CreatedTimestamp,
    /// Modification timestamp maintained by the persistence layer
    UpdatedTimestamp,
    /// Deletion marker; its presence enables soft delete
    SoftDeleteMarker,
    /// Secret or verification state of an authentication subject
    SensitiveAuthField,
    /// Path of a stored file
    MediaReference(MediaSubtype),
    /// Anything else
    PlainField,
}

impl ColumnKind {
    /// Payload-free tag used by the exclusion tables
    pub fn tag(&self) -> KindTag {
        match self {
            ColumnKind::Identifier => KindTag::Identifier,
            ColumnKind::CreatedTimestamp => KindTag::CreatedTimestamp,
            ColumnKind::UpdatedTimestamp => KindTag::UpdatedTimestamp,
            ColumnKind::SoftDeleteMarker => KindTag::SoftDeleteMarker,
            ColumnKind::SensitiveAuthField => KindTag::SensitiveAuthField,
            ColumnKind::MediaReference(_) => KindTag::MediaReference,
            ColumnKind::PlainField => KindTag::PlainField,
        }
    }

    /// Media subtype, if this is a media reference
    pub fn media(&self) -> Option<MediaSubtype> {
        match self {
            ColumnKind::MediaReference(subtype) => Some(*subtype),
            _ => None,
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::MediaReference(subtype) => write!(f, "media_reference({subtype})"),
            other => f.write_str(other.tag().as_str()),
        }
    }
}

/// [`ColumnKind`] without the media payload
///
/// Appears in configuration files (`snake_case`), e.g.
/// `create_rules = ["identifier", "created_timestamp"]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KindTag {
    Identifier,
    CreatedTimestamp,
    UpdatedTimestamp,
    SoftDeleteMarker,
    SensitiveAuthField,
    MediaReference,
    PlainField,
}

impl KindTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            KindTag::Identifier => "identifier",
            KindTag::CreatedTimestamp => "created_timestamp",
            KindTag::UpdatedTimestamp => "updated_timestamp",
            KindTag::SoftDeleteMarker => "soft_delete_marker",
            KindTag::SensitiveAuthField => "sensitive_auth_field",
            KindTag::MediaReference => "media_reference",
            KindTag::PlainField => "plain_field",
        }
    }
}

/// A column name paired with its classified kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// Raw column name from the schema
    pub name: String,
    /// Kind derived from `name`
    pub kind: ColumnKind,
}

/// Input to a generation run: one model and its backing table's columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSpec {
    name: ModelName,
    plural_name: String,
    columns: Vec<String>,
    supports_soft_delete: bool,
}

impl ModelSpec {
    /// Build a model with an explicit soft-delete capability
    pub fn new(name: ModelName, columns: Vec<String>, supports_soft_delete: bool) -> Self {
        let plural_name = name.plural();
        ModelSpec {
            name,
            plural_name,
            columns,
            supports_soft_delete,
        }
    }

    /// Build a model, detecting soft delete from the presence of a deletion marker column
    pub fn detect(name: ModelName, columns: Vec<String>, classifier: &Classifier) -> Self {
        let supports_soft_delete = columns
            .iter()
            .any(|c| classifier.classify(c).kind == ColumnKind::SoftDeleteMarker);
        ModelSpec::new(name, columns, supports_soft_delete)
    }

    pub fn name(&self) -> &ModelName {
        &self.name
    }

    /// Plural of the model name (e.g. `Categories`)
    pub fn plural_name(&self) -> &str {
        &self.plural_name
    }

    /// Column names in schema order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn supports_soft_delete(&self) -> bool {
        self.supports_soft_delete
    }
}
