use std::fmt;
use std::path::{Path, PathBuf};

use super::emit::{emit_plan, EmitReport};
use crate::error::GenerateError;
use crate::generator::plan::{ArtifactPlan, ClassifiedModel, GenerationOptions, Generator};
use crate::model::ModelSpec;
use crate::schema::{load_model_spec, SchemaSource};

/// Where a generation run is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Start,
    Classified,
    Planned,
    Emitted,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Start => "start",
            Stage::Classified => "classified",
            Stage::Planned => "planned",
            Stage::Emitted => "emitted",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Drives one model from column list to files on disk
///
/// A run goes `Start → Classified → Planned → Emitted → Done`. A failure leaves
/// the stage where it happened; there is no rollback of files already written.
#[derive(Debug)]
pub struct Orchestrator<'g> {
    generator: &'g Generator,
    root: PathBuf,
    dry_run: bool,
    stage: Stage,
}

impl<'g> Orchestrator<'g> {
    pub fn new(generator: &'g Generator, root: impl Into<PathBuf>) -> Self {
        Orchestrator {
            generator,
            root: root.into(),
            dry_run: false,
            stage: Stage::Start,
        }
    }

    /// Plan and report without writing
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn advance(&mut self, next: Stage) {
        tracing::debug!(from = %self.stage, to = %next, "stage transition");
        self.stage = next;
    }

    pub fn classify(&mut self, spec: &ModelSpec) -> ClassifiedModel {
        let classified = self.generator.classify(spec);
        self.advance(Stage::Classified);
        classified
    }

    pub fn plan(
        &mut self,
        model: &ClassifiedModel,
        options: GenerationOptions,
    ) -> Result<ArtifactPlan, GenerateError> {
        let plan = self.generator.plan(model, options)?;
        self.advance(Stage::Planned);
        Ok(plan)
    }

    pub fn emit(&mut self, plan: &ArtifactPlan) -> Result<EmitReport, GenerateError> {
        let report = emit_plan(&self.root, plan, self.dry_run)?;
        self.advance(Stage::Emitted);
        Ok(report)
    }

    /// Run every stage for one model
    pub fn run(
        &mut self,
        spec: &ModelSpec,
        options: GenerationOptions,
    ) -> Result<EmitReport, GenerateError> {
        let span = tracing::info_span!(
            "generate",
            model = %spec.name(),
            service = options.use_service_layer,
            soft_delete = spec.supports_soft_delete(),
            dry_run = self.dry_run
        );
        let _enter = span.enter();

        self.stage = Stage::Start;
        let classified = self.classify(spec);
        let plan = self.plan(&classified, options)?;
        let report = self.emit(&plan)?;
        self.advance(Stage::Done);
        tracing::info!(
            written = report.written(),
            skipped = report.skipped(),
            "generation finished"
        );
        Ok(report)
    }
}

/// Resolve `model` against `source` and generate its artifacts under `root`
///
/// A missing table fails with [`GenerateError::SchemaNotFound`] before anything
/// is written.
pub fn generate_model(
    generator: &Generator,
    model: &str,
    source: &dyn SchemaSource,
    root: &Path,
    options: GenerationOptions,
    dry_run: bool,
) -> Result<EmitReport, GenerateError> {
    let spec = load_model_spec(model, source, generator.classifier(), generator.policy())?;
    Orchestrator::new(generator, root)
        .dry_run(dry_run)
        .run(&spec, options)
}
