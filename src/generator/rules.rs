//! Validation rule synthesis
//!
//! Maps a classified column and a mode to the rule expression placed in a form
//! request's `rules()` array.
//!
//! ```text
//! plain, create   ['required']
//! plain, update   ['nullable']
//! image, create   'required|file|image|mimes:png,jpg,jpeg,gif|max:10000|mimetypes:...'
//! image, update   'nullable|file|image|mimes:png,jpg,jpeg,gif|max:10000|mimetypes:...'
//! ```
//!
//! Media constraints come from the [`MediaTable`]; nothing here knows a MIME type.

use std::fmt;

use crate::media::MediaTable;
use crate::model::{ColumnDescriptor, ColumnKind};

/// Which request object the rules are for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleMode {
    /// Store request: every field is mandatory
    Create,
    /// Update request: every field is optional
    Update,
}

impl RuleMode {
    fn presence(&self) -> &'static str {
        match self {
            RuleMode::Create => "required",
            RuleMode::Update => "nullable",
        }
    }
}

impl fmt::Display for RuleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RuleMode::Create => "create",
            RuleMode::Update => "update",
        })
    }
}

/// Rule expression for one column kind
///
/// Total: kinds without dedicated rules (including sensitive fields that survived
/// exclusion) get the plain-field rule, and a media subtype missing from the table
/// degrades to a bare file rule.
pub fn rule(kind: ColumnKind, mode: RuleMode, media: &MediaTable) -> String {
    let presence = mode.presence();
    let Some(subtype) = kind.media() else {
        return format!("['{presence}']");
    };
    let Some(spec) = media.rule(subtype) else {
        return format!("'{presence}|file'");
    };

    let mut parts = vec![presence.to_string(), "file".to_string()];
    parts.extend(spec.extra_rules.iter().cloned());
    if !spec.extensions.is_empty() {
        parts.push(format!("mimes:{}", spec.extensions.join(",")));
    }
    parts.push(format!("max:{}", spec.max_kilobytes));
    if !spec.mime_types.is_empty() {
        parts.push(format!("mimetypes:{}", spec.mime_types.join(",")));
    }
    format!("'{}'", parts.join("|"))
}

/// `(column, rule)` pairs for a filtered column list, in schema order
pub fn rule_set(
    columns: &[ColumnDescriptor],
    mode: RuleMode,
    media: &MediaTable,
) -> Vec<(String, String)> {
    columns
        .iter()
        .map(|c| (c.name.clone(), rule(c.kind, mode, media)))
        .collect()
}
