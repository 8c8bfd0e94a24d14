//! # Media Module
//!
//! The media allow-list table: one [`MediaRule`] per [`MediaSubtype`], carrying the
//! column-name suffixes that select the subtype and the file constraints that go into
//! validation rules and the storage trait.
//!
//! The table is data, not logic. Adding a subtype means extending the table in
//! `autocrud.toml`:
//!
//! ```toml
//! [[media]]
//! subtype = "document"
//! suffixes = ["_doc", "_docs"]
//! extensions = ["pdf", "doc", "docx"]
//! mime_types = ["application/pdf", "application/msword"]
//! max_kilobytes = 20000
//! ```

use serde::{Deserialize, Serialize};

use crate::error::GenerateError;
use crate::model::MediaSubtype;

fn default_max_kilobytes() -> u32 {
    10_000
}

/// File constraints for one media subtype
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRule {
    /// Subtype this rule describes
    pub subtype: MediaSubtype,
    /// Column-name suffixes mapping to `subtype` (e.g. `_img`)
    pub suffixes: Vec<String>,
    /// Allowed file extensions
    pub extensions: Vec<String>,
    /// Allowed MIME types
    pub mime_types: Vec<String>,
    /// Upper bound on the upload size
    #[serde(default = "default_max_kilobytes")]
    pub max_kilobytes: u32,
    /// Rules inserted after `file` (e.g. `image`)
    #[serde(default)]
    pub extra_rules: Vec<String>,
}

impl MediaRule {
    fn new(
        subtype: MediaSubtype,
        suffix: &str,
        extensions: &[&str],
        mime_types: &[&str],
        extra_rules: &[&str],
    ) -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        MediaRule {
            subtype,
            suffixes: vec![suffix.to_string()],
            extensions: owned(extensions),
            mime_types: owned(mime_types),
            max_kilobytes: default_max_kilobytes(),
            extra_rules: owned(extra_rules),
        }
    }

    /// True when `column` ends with one of this rule's suffixes
    pub fn matches(&self, column: &str) -> bool {
        self.suffixes
            .iter()
            .any(|suffix| !suffix.is_empty() && column.ends_with(suffix.as_str()))
    }
}

/// Ordered suffix → subtype table
///
/// Rules are consulted in order; [`MediaTable::validate`] guarantees no column can
/// match two different subtypes, so the order only matters for performance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaTable {
    rules: Vec<MediaRule>,
}

impl Default for MediaTable {
    fn default() -> Self {
        MediaTable {
            rules: vec![
                MediaRule::new(
                    MediaSubtype::Image,
                    "_img",
                    &["png", "jpg", "jpeg", "gif"],
                    &["image/jpeg", "image/png", "image/jpg", "image/gif"],
                    &["image"],
                ),
                MediaRule::new(
                    MediaSubtype::Video,
                    "_vid",
                    &["mp4", "webm", "ogg", "mov", "wmv"],
                    &[
                        "video/mp4",
                        "video/webm",
                        "video/ogg",
                        "video/quicktime",
                        "video/x-ms-wmv",
                    ],
                    &[],
                ),
                MediaRule::new(
                    MediaSubtype::Audio,
                    "_aud",
                    &["mp3", "wav", "ogg", "aac"],
                    &["audio/mpeg", "audio/wav", "audio/ogg", "audio/aac"],
                    &[],
                ),
                MediaRule::new(
                    MediaSubtype::Document,
                    "_doc",
                    &["pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx"],
                    &[
                        "application/pdf",
                        "application/msword",
                        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
                        "application/vnd.ms-excel",
                        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
                        "application/vnd.ms-powerpoint",
                        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
                    ],
                    &[],
                ),
            ],
        }
    }
}

impl MediaTable {
    /// Build a table from explicit rules and validate it
    pub fn new(rules: Vec<MediaRule>) -> Result<Self, GenerateError> {
        let table = MediaTable { rules };
        table.validate()?;
        Ok(table)
    }

    /// Reject empty suffixes and suffixes shared (or nested) across subtypes
    ///
    /// `_img` and `cover_img` would overlap: a column `x_cover_img` ends with both.
    pub fn validate(&self) -> Result<(), GenerateError> {
        for rule in &self.rules {
            if rule.suffixes.iter().any(|s| s.is_empty()) {
                return Err(GenerateError::EmptyMediaSuffix {
                    subtype: rule.subtype,
                });
            }
        }
        for (i, a) in self.rules.iter().enumerate() {
            for b in self.rules.iter().skip(i + 1) {
                if a.subtype == b.subtype {
                    continue;
                }
                for first in &a.suffixes {
                    for second in &b.suffixes {
                        if first.ends_with(second.as_str()) || second.ends_with(first.as_str()) {
                            return Err(GenerateError::OverlappingMediaSuffix {
                                first: first.clone(),
                                second: second.clone(),
                            });
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Subtype selected by the column's suffix, if any
    pub fn subtype_for(&self, column: &str) -> Option<MediaSubtype> {
        self.rules
            .iter()
            .find(|rule| rule.matches(column))
            .map(|rule| rule.subtype)
    }

    /// Constraints for `subtype`, if the table defines it
    pub fn rule(&self, subtype: MediaSubtype) -> Option<&MediaRule> {
        self.rules.iter().find(|rule| rule.subtype == subtype)
    }

    pub fn rules(&self) -> &[MediaRule] {
        &self.rules
    }
}
