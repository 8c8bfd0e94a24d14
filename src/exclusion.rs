//! # Exclusion Module
//!
//! Decides, per generated artifact, which classified columns take part in it.
//!
//! Two tables drive the decision and neither lives in generator code:
//!
//! - [`BaselineExclusions`]: kind tags dropped from each artifact for every model
//!   (the identifier is never validated, timestamps are never assigned, ...)
//! - [`ModelExclusions`]: per-model overrides keyed by model name. A model marked
//!   `auth_subject` loses its [`ColumnKind::SensitiveAuthField`] columns everywhere;
//!   `exclude` drops named columns everywhere.
//!
//! ```toml
//! [models.User]
//! auth_subject = true
//!
//! [models.Invoice]
//! exclude = ["internal_notes"]
//!
//! [models.Person]
//! table = "people_archive"
//! ```
//!
//! Filtering keeps schema order and is idempotent.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::model::{ColumnDescriptor, ColumnKind, KindTag, ModelName};

/// Artifact a column list is filtered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactKind {
    /// Read-model projection
    Transformer,
    /// Store request rules
    CreateRules,
    /// Update request rules
    UpdateRules,
    /// Field assignments inside controller or service bodies
    HandlerBody,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::Transformer,
        ArtifactKind::CreateRules,
        ArtifactKind::UpdateRules,
        ArtifactKind::HandlerBody,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Transformer => "transformer",
            ArtifactKind::CreateRules => "create_rules",
            ArtifactKind::UpdateRules => "update_rules",
            ArtifactKind::HandlerBody => "handler_body",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind tags excluded from each artifact for every model (`[exclusions]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaselineExclusions {
    pub transformer: Vec<KindTag>,
    pub create_rules: Vec<KindTag>,
    pub update_rules: Vec<KindTag>,
    pub handler_body: Vec<KindTag>,
}

impl Default for BaselineExclusions {
    fn default() -> Self {
        let bookkeeping = vec![
            KindTag::CreatedTimestamp,
            KindTag::UpdatedTimestamp,
            KindTag::SoftDeleteMarker,
        ];
        let mut with_identifier = vec![KindTag::Identifier];
        with_identifier.extend(bookkeeping.iter().copied());
        BaselineExclusions {
            transformer: bookkeeping,
            create_rules: with_identifier.clone(),
            update_rules: with_identifier.clone(),
            handler_body: with_identifier,
        }
    }
}

impl BaselineExclusions {
    fn for_artifact(&self, artifact: ArtifactKind) -> &[KindTag] {
        match artifact {
            ArtifactKind::Transformer => &self.transformer,
            ArtifactKind::CreateRules => &self.create_rules,
            ArtifactKind::UpdateRules => &self.update_rules,
            ArtifactKind::HandlerBody => &self.handler_body,
        }
    }
}

/// Per-model overrides (`[models.<Name>]`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelExclusions {
    /// Model is the authentication subject; its sensitive fields never appear
    pub auth_subject: bool,
    /// Column names dropped from every artifact
    pub exclude: Vec<String>,
    /// Backing table, when it is not the inflected plural of the model name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
}

/// Default per-model table: `User` is the authentication subject
pub fn default_model_exclusions() -> BTreeMap<String, ModelExclusions> {
    let mut models = BTreeMap::new();
    models.insert(
        "User".to_string(),
        ModelExclusions {
            auth_subject: true,
            ..ModelExclusions::default()
        },
    );
    models
}

/// Combined baseline and per-model exclusion tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionPolicy {
    baseline: BaselineExclusions,
    models: BTreeMap<String, ModelExclusions>,
}

impl Default for ExclusionPolicy {
    fn default() -> Self {
        ExclusionPolicy::new(BaselineExclusions::default(), default_model_exclusions())
    }
}

impl ExclusionPolicy {
    pub fn new(baseline: BaselineExclusions, models: BTreeMap<String, ModelExclusions>) -> Self {
        ExclusionPolicy { baseline, models }
    }

    fn model(&self, model: &ModelName) -> Option<&ModelExclusions> {
        self.models.get(model.as_str())
    }

    /// Whether `model` is configured as the authentication subject
    pub fn is_auth_subject(&self, model: &ModelName) -> bool {
        self.model(model).is_some_and(|m| m.auth_subject)
    }

    /// Backing table of `model`: the configured `table`, else the inflected plural
    pub fn table_for(&self, model: &ModelName) -> String {
        self.model(model)
            .and_then(|m| m.table.clone())
            .unwrap_or_else(|| model.table_name())
    }

    /// Kind-level decision, ignoring per-column `exclude` lists
    pub fn is_included(&self, model: &ModelName, kind: ColumnKind, artifact: ArtifactKind) -> bool {
        if kind == ColumnKind::SensitiveAuthField && self.is_auth_subject(model) {
            return false;
        }
        !self.baseline.for_artifact(artifact).contains(&kind.tag())
    }

    /// Column-level decision: kind rules plus the model's `exclude` list
    pub fn includes_column(
        &self,
        model: &ModelName,
        column: &ColumnDescriptor,
        artifact: ArtifactKind,
    ) -> bool {
        let named_out = self
            .model(model)
            .is_some_and(|m| m.exclude.iter().any(|c| c == &column.name));
        !named_out && self.is_included(model, column.kind, artifact)
    }

    /// Columns that take part in `artifact`, in schema order
    pub fn filter(
        &self,
        model: &ModelName,
        columns: &[ColumnDescriptor],
        artifact: ArtifactKind,
    ) -> Vec<ColumnDescriptor> {
        columns
            .iter()
            .filter(|c| self.includes_column(model, c, artifact))
            .cloned()
            .collect()
    }
}
