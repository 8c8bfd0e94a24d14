//! Artifact planning
//!
//! Turns a classified model into an [`ArtifactPlan`]: every artifact's relative
//! path, full content and write policy. Planning is pure; nothing touches the file
//! system until the plan is emitted.

use std::fmt;
use std::path::PathBuf;

use super::handler::{generate_handler, CallSite, DirectCalls, HandlerContext, ServiceCalls};
use super::names::ArtifactNames;
use super::routes::route_statements;
use super::rules::{rule_set, RuleMode};
use super::templates::{
    render, ApiResponseTraitTemplateData, ClassTemplateData, FileStorageTraitTemplateData,
    FormRequestTemplateData, ResourceTemplateData, RoutesTemplateData, RuleLine,
};
use super::transformer::projections;
use crate::config::GeneratorConfig;
use crate::error::GenerateError;
use crate::exclusion::{ArtifactKind, ExclusionPolicy};
use crate::generator::code::quote;
use crate::model::{Classifier, ColumnDescriptor, ModelSpec};

/// Opening of a route file the generator creates itself
pub const ROUTE_FILE_HEADER: &str = "<?php\n\nuse Illuminate\\Support\\Facades\\Route;\n";

/// Per-run choices that are not part of the model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Route persistence through a per-model service
    pub use_service_layer: bool,
    /// Also emit the response and storage traits the generated code uses
    pub with_support_traits: bool,
}

/// What an artifact is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactTarget {
    Transformer,
    StoreRequest,
    UpdateRequest,
    Controller,
    Service,
    Routes,
    ResponseTrait,
    StorageTrait,
}

impl ArtifactTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactTarget::Transformer => "resource",
            ArtifactTarget::StoreRequest => "store request",
            ArtifactTarget::UpdateRequest => "update request",
            ArtifactTarget::Controller => "controller",
            ArtifactTarget::Service => "service",
            ArtifactTarget::Routes => "routes",
            ArtifactTarget::ResponseTrait => "response trait",
            ArtifactTarget::StorageTrait => "storage trait",
        }
    }
}

impl fmt::Display for ArtifactTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an artifact reaches the file system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePolicy {
    /// Write only if nothing exists at the path; never overwrite or merge
    CreateIfAbsent,
    /// Append to the shared file on every run
    AppendAlways,
    /// Append unless the identical block is already present
    AppendIfMissing,
}

/// One planned artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub target: ArtifactTarget,
    /// Path relative to the application root
    pub path: PathBuf,
    pub content: String,
    /// Written ahead of `content` when an appended-to file is missing or empty
    pub preamble: Option<String>,
    pub policy: WritePolicy,
}

/// Every artifact for one model, in emission order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPlan {
    pub model: String,
    pub artifacts: Vec<Artifact>,
}

impl ArtifactPlan {
    pub fn get(&self, target: ArtifactTarget) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.target == target)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter()
    }
}

/// A model whose columns have been classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedModel {
    pub spec: ModelSpec,
    pub columns: Vec<ColumnDescriptor>,
}

/// Classification, exclusion and rendering, configured once per run
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
    classifier: Classifier,
    policy: ExclusionPolicy,
}

impl Default for Generator {
    fn default() -> Self {
        Generator::new(GeneratorConfig::default())
    }
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Generator {
            classifier: config.classifier(),
            policy: config.exclusion_policy(),
            config,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn policy(&self) -> &ExclusionPolicy {
        &self.policy
    }

    /// Tag every column with its kind
    pub fn classify(&self, spec: &ModelSpec) -> ClassifiedModel {
        ClassifiedModel {
            columns: self.classifier.classify_all(spec.columns()),
            spec: spec.clone(),
        }
    }

    /// Columns of `model` that take part in `artifact`
    pub fn included(&self, model: &ClassifiedModel, artifact: ArtifactKind) -> Vec<ColumnDescriptor> {
        self.policy.filter(model.spec.name(), &model.columns, artifact)
    }

    /// Render every artifact for `model`
    pub fn plan(
        &self,
        model: &ClassifiedModel,
        options: GenerationOptions,
    ) -> Result<ArtifactPlan, GenerateError> {
        let spec = &model.spec;
        let names = ArtifactNames::new(spec.name(), &self.config);
        let mut artifacts = Vec::new();

        artifacts.push(self.transformer(model, &names)?);
        artifacts.push(self.form_request(model, &names, RuleMode::Create)?);
        artifacts.push(self.form_request(model, &names, RuleMode::Update)?);

        let fields = self.included(model, ArtifactKind::HandlerBody);
        let ctx = HandlerContext {
            names: &names,
            fields: &fields,
            supports_soft_delete: spec.supports_soft_delete(),
            per_page: self.config.generation.per_page,
            per_page_param: &self.config.generation.per_page_param,
        };
        let call_site: &dyn CallSite = if options.use_service_layer {
            &ServiceCalls
        } else {
            &DirectCalls
        };
        let handlers = generate_handler(&ctx, call_site);
        artifacts.push(Artifact {
            target: ArtifactTarget::Controller,
            path: names.controller_path.clone(),
            content: render(&ClassTemplateData::from(&handlers.controller), "controller")?,
            preamble: None,
            policy: WritePolicy::CreateIfAbsent,
        });
        if let Some(service) = &handlers.service {
            artifacts.push(Artifact {
                target: ArtifactTarget::Service,
                path: names.service_path.clone(),
                content: render(&ClassTemplateData::from(service), "service")?,
                preamble: None,
            policy: WritePolicy::CreateIfAbsent,
            });
        }

        artifacts.push(self.routes(model, &names)?);

        if options.with_support_traits {
            artifacts.extend(self.support_traits(&names)?);
        }

        tracing::debug!(
            model = %spec.name(),
            artifacts = artifacts.len(),
            call_site = call_site.name(),
            "planned artifacts"
        );
        Ok(ArtifactPlan {
            model: spec.name().to_string(),
            artifacts,
        })
    }

    fn transformer(
        &self,
        model: &ClassifiedModel,
        names: &ArtifactNames,
    ) -> Result<Artifact, GenerateError> {
        let fields = projections(&self.included(model, ArtifactKind::Transformer));
        let data = ResourceTemplateData {
            namespace: names.resource_ns.clone(),
            class_name: names.resource.clone(),
            fields,
        };
        Ok(Artifact {
            target: ArtifactTarget::Transformer,
            path: names.resource_path.clone(),
            content: render(&data, "resource")?,
            preamble: None,
            policy: WritePolicy::CreateIfAbsent,
        })
    }

    fn form_request(
        &self,
        model: &ClassifiedModel,
        names: &ArtifactNames,
        mode: RuleMode,
    ) -> Result<Artifact, GenerateError> {
        let (kind, target, class_name, path, purpose) = match mode {
            RuleMode::Create => (
                ArtifactKind::CreateRules,
                ArtifactTarget::StoreRequest,
                &names.store_request,
                &names.store_request_path,
                "store",
            ),
            RuleMode::Update => (
                ArtifactKind::UpdateRules,
                ArtifactTarget::UpdateRequest,
                &names.update_request,
                &names.update_request_path,
                "update",
            ),
        };
        let rules = rule_set(&self.included(model, kind), mode, &self.config.media)
            .into_iter()
            .map(|(column, rule)| RuleLine {
                key: quote(&column),
                rule,
            })
            .collect();
        let data = FormRequestTemplateData {
            namespace: names.request_ns.clone(),
            class_name: class_name.clone(),
            response_trait: names.support_trait("ApiResponseTrait"),
            purpose: purpose.to_string(),
            rules,
        };
        Ok(Artifact {
            target,
            path: path.clone(),
            content: render(&data, "form request")?,
            preamble: None,
            policy: WritePolicy::CreateIfAbsent,
        })
    }

    fn routes(&self, model: &ClassifiedModel, names: &ArtifactNames) -> Result<Artifact, GenerateError> {
        let data = RoutesTemplateData {
            model: names.model.clone(),
            lines: route_statements(names, model.spec.supports_soft_delete()),
        };
        let block = render(&data, "routes")?;
        Ok(Artifact {
            target: ArtifactTarget::Routes,
            path: names.routes_path.clone(),
            // a leading blank line keeps appended blocks apart
            content: format!("\n{block}"),
            preamble: Some(ROUTE_FILE_HEADER.to_string()),
            policy: if self.config.routes.dedupe {
                WritePolicy::AppendIfMissing
            } else {
                WritePolicy::AppendAlways
            },
        })
    }

    fn support_traits(&self, names: &ArtifactNames) -> Result<Vec<Artifact>, GenerateError> {
        let dir = &self.config.paths.support_dir;
        let response = ApiResponseTraitTemplateData {
            namespace: names.support_ns.clone(),
        };
        let storage = FileStorageTraitTemplateData::new(names.support_ns.clone(), &self.config.media);
        Ok(vec![
            Artifact {
                target: ArtifactTarget::ResponseTrait,
                path: dir.join("ApiResponseTrait.php"),
                content: render(&response, "response trait")?,
                preamble: None,
            policy: WritePolicy::CreateIfAbsent,
            },
            Artifact {
                target: ArtifactTarget::StorageTrait,
                path: dir.join("FileStorageTrait.php"),
                content: render(&storage, "storage trait")?,
                preamble: None,
            policy: WritePolicy::CreateIfAbsent,
            },
        ])
    }
}
