use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::config::load_or_default;
use crate::exclusion::ArtifactKind;
use crate::generator::{generate_model, EmitReport, EmitStatus, GenerationOptions, Generator};
use crate::model::{ModelName, ModelSpec};
use crate::schema::{auto_detect_schema, load_model_spec, InlineColumns, SchemaFile, SchemaSource};

/// Command-line interface for the CRUD artifact generator
#[derive(Parser)]
#[command(name = "autocrud-gen")]
#[command(about = "Generate Laravel CRUD artifacts from a table's columns", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Where the model's column list comes from
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaArgs {
    /// Schema file mapping table names to column lists (YAML or JSON)
    ///
    /// Defaults to schema.yaml, schema.yml or schema.json in the root.
    #[arg(long, conflicts_with = "columns")]
    pub schema: Option<PathBuf>,

    /// Comma-separated column list of the model's table
    #[arg(long)]
    pub columns: Option<String>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate resource, form requests, controller, optional service and routes
    Generate {
        /// Model name in PascalCase (e.g. Product)
        model: String,

        #[command(flatten)]
        schema: SchemaArgs,

        /// Route persistence through a generated service class
        #[arg(long, conflicts_with = "direct", default_value_t = false)]
        service: bool,

        /// Call persistence directly from the controller
        #[arg(long, default_value_t = false)]
        direct: bool,

        /// Application root the artifact paths are relative to
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Configuration file (default: autocrud.toml in the root, if present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Also generate ApiResponseTrait and FileStorageTrait
        #[arg(long, default_value_t = false)]
        with_support_traits: bool,

        /// Show what would be written without touching the file system
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Show how each column is classified and which artifacts include it
    Inspect {
        /// Model name in PascalCase (e.g. Product)
        model: String,

        #[command(flatten)]
        schema: SchemaArgs,

        /// Application root used to auto-detect the schema and configuration
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Configuration file (default: autocrud.toml in the root, if present)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Parse the process arguments and run the selected command
///
/// # Errors
///
/// Returns an error if:
/// - The configuration or schema file cannot be read or parsed
/// - The model name is invalid or its table is missing
/// - An artifact cannot be written
pub fn run_cli() -> anyhow::Result<()> {
    run(Cli::parse())
}

/// Run an already parsed command line
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            model,
            schema,
            service,
            direct,
            root,
            config,
            with_support_traits,
            dry_run,
        } => {
            let config = load_or_default(config.as_deref(), &root)?;
            let generator = Generator::new(config);
            let source = schema_source(&schema, &root)?;
            let use_service_layer = resolve_layering(&model, service, direct)?;
            let options = GenerationOptions {
                use_service_layer,
                with_support_traits,
            };
            let report = generate_model(&generator, &model, source.as_ref(), &root, options, dry_run)
                .with_context(|| format!("Failed to generate artifacts for {model}"))?;
            for line in report_lines(&report) {
                println!("{line}");
            }
            Ok(())
        }
        Commands::Inspect {
            model,
            schema,
            root,
            config,
        } => {
            let config = load_or_default(config.as_deref(), &root)?;
            let generator = Generator::new(config);
            let source = schema_source(&schema, &root)?;
            let spec = load_model_spec(&model, source.as_ref(), generator.classifier(), generator.policy())?;
            for line in inspect_lines(&generator, &spec) {
                println!("{line}");
            }
            Ok(())
        }
    }
}

/// Pick the column source: inline list, explicit file, or a schema file in `root`
pub fn schema_source(args: &SchemaArgs, root: &Path) -> anyhow::Result<Box<dyn SchemaSource>> {
    if let Some(columns) = &args.columns {
        return Ok(Box::new(InlineColumns::parse(columns)));
    }
    let path = match &args.schema {
        Some(path) => path.clone(),
        None => auto_detect_schema(root).ok_or_else(|| {
            anyhow::anyhow!(
                "No schema source: pass --schema FILE or --columns a,b,c, or add schema.yaml to {}",
                root.display()
            )
        })?,
    };
    tracing::debug!(path = %path.display(), "loading schema file");
    Ok(Box::new(SchemaFile::load(&path)?))
}

/// Service layer when `--service`, direct when `--direct`, otherwise ask
///
/// Non-interactive runs default to direct.
fn resolve_layering(model: &str, service: bool, direct: bool) -> anyhow::Result<bool> {
    if service || direct {
        return Ok(service);
    }
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return Ok(false);
    }
    print!("Do you want to use a service layer for {model}? [y/N] ");
    io::stdout().flush().context("Failed to flush prompt")?;
    let mut answer = String::new();
    stdin
        .lock()
        .read_line(&mut answer)
        .context("Failed to read answer")?;
    Ok(parse_yes(&answer))
}

pub(crate) fn parse_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Console lines for an emit report
pub fn report_lines(report: &EmitReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .records
        .iter()
        .map(|record| {
            let path = record.path.display();
            match record.status {
                EmitStatus::Created => format!("✅ Generated {} → {path}", record.target),
                EmitStatus::AlreadyExists => {
                    format!("⚠️  Skipping existing {}: {path} already exists", record.target)
                }
                EmitStatus::Appended => format!("✅ Appended {} routes → {path}", report.model),
                EmitStatus::DuplicateRoutesSkipped => {
                    format!("ℹ️  {} routes already registered in {path}", report.model)
                }
                EmitStatus::Planned => format!("📝 Would write {} → {path}", record.target),
            }
        })
        .collect();
    lines.push(format!(
        "🎉 {}: {} written, {} skipped",
        report.model,
        report.written(),
        report.skipped()
    ));
    lines
}

/// Console lines describing classification and inclusion per column
pub fn inspect_lines(generator: &Generator, spec: &ModelSpec) -> Vec<String> {
    let name: &ModelName = spec.name();
    let classified = generator.classify(spec);
    let mut lines = vec![format!(
        "📋 {name} (table {}, soft delete: {})",
        generator.policy().table_for(name),
        if spec.supports_soft_delete() { "yes" } else { "no" }
    )];
    let width = classified
        .columns
        .iter()
        .map(|c| c.name.len())
        .max()
        .unwrap_or(0);
    for column in &classified.columns {
        let included: Vec<&str> = ArtifactKind::ALL
            .iter()
            .filter(|artifact| generator.policy().includes_column(name, column, **artifact))
            .map(|artifact| artifact.as_str())
            .collect();
        let included = if included.is_empty() {
            "-".to_string()
        } else {
            included.join(", ")
        };
        lines.push(format!(
            "  {:<width$}  {:<24}  {included}",
            column.name,
            column.kind.to_string()
        ));
    }
    lines
}
