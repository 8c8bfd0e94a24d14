use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::GenerateError;
use crate::generator::plan::{Artifact, ArtifactPlan, ArtifactTarget, WritePolicy};

/// Outcome of emitting one artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitStatus {
    /// New file written
    Created,
    /// A file was already at the path; left untouched
    AlreadyExists,
    /// Route block appended to the shared route file
    Appended,
    /// Route block already present and `routes.dedupe` is on
    DuplicateRoutesSkipped,
    /// Dry run: would be written
    Planned,
}

impl EmitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmitStatus::Created => "created",
            EmitStatus::AlreadyExists => "already exists",
            EmitStatus::Appended => "appended",
            EmitStatus::DuplicateRoutesSkipped => "already registered",
            EmitStatus::Planned => "planned",
        }
    }

    /// Whether the file system was changed
    pub fn is_write(&self) -> bool {
        matches!(self, EmitStatus::Created | EmitStatus::Appended)
    }
}

impl fmt::Display for EmitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of an [`EmitReport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitRecord {
    pub target: ArtifactTarget,
    /// Absolute path (root joined with the artifact's relative path)
    pub path: PathBuf,
    pub status: EmitStatus,
}

/// Per-artifact outcomes for one model, in emission order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitReport {
    pub model: String,
    pub records: Vec<EmitRecord>,
}

impl EmitReport {
    pub fn status_of(&self, target: ArtifactTarget) -> Option<EmitStatus> {
        self.records
            .iter()
            .find(|r| r.target == target)
            .map(|r| r.status)
    }

    /// Number of artifacts that changed the file system
    pub fn written(&self) -> usize {
        self.records.iter().filter(|r| r.status.is_write()).count()
    }

    /// Number of artifacts left as they were
    pub fn skipped(&self) -> usize {
        self.records
            .iter()
            .filter(|r| {
                matches!(
                    r.status,
                    EmitStatus::AlreadyExists | EmitStatus::DuplicateRoutesSkipped
                )
            })
            .count()
    }
}

/// Materialise `plan` under `root`
///
/// Aborts on the first I/O failure. Artifacts written before the failure stay on
/// disk. With `dry_run` nothing is written and each artifact is reported as
/// `Planned`, or `AlreadyExists` when create-if-absent would skip it.
pub fn emit_plan(root: &Path, plan: &ArtifactPlan, dry_run: bool) -> Result<EmitReport, GenerateError> {
    let mut report = EmitReport {
        model: plan.model.clone(),
        records: Vec::with_capacity(plan.artifacts.len()),
    };
    for artifact in plan.iter() {
        let path = root.join(&artifact.path);
        let status = if dry_run {
            preview(&path, artifact)
        } else {
            emit_artifact(&path, artifact)?
        };
        tracing::info!(
            model = %plan.model,
            artifact = %artifact.target,
            path = %path.display(),
            status = %status,
            "emitted artifact"
        );
        report.records.push(EmitRecord {
            target: artifact.target,
            path,
            status,
        });
    }
    Ok(report)
}

fn preview(path: &Path, artifact: &Artifact) -> EmitStatus {
    match artifact.policy {
        WritePolicy::CreateIfAbsent if path.exists() => EmitStatus::AlreadyExists,
        WritePolicy::AppendIfMissing if already_contains(path, &artifact.content) => {
            EmitStatus::DuplicateRoutesSkipped
        }
        _ => EmitStatus::Planned,
    }
}

/// Write a single artifact according to its policy
pub fn emit_artifact(path: &Path, artifact: &Artifact) -> Result<EmitStatus, GenerateError> {
    ensure_parent(path)?;
    match artifact.policy {
        WritePolicy::CreateIfAbsent => create_if_absent(path, &artifact.content),
        WritePolicy::AppendAlways => {
            append(path, artifact.preamble.as_deref(), &artifact.content)?;
            Ok(EmitStatus::Appended)
        }
        WritePolicy::AppendIfMissing => {
            if already_contains(path, &artifact.content) {
                return Ok(EmitStatus::DuplicateRoutesSkipped);
            }
            append(path, artifact.preamble.as_deref(), &artifact.content)?;
            Ok(EmitStatus::Appended)
        }
    }
}

fn ensure_parent(path: &Path) -> Result<(), GenerateError> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    fs::create_dir_all(parent).map_err(|source| GenerateError::DirectoryCreateFailure {
        path: parent.to_path_buf(),
        source,
    })
}

fn create_if_absent(path: &Path, content: &str) -> Result<EmitStatus, GenerateError> {
    // create_new fails instead of truncating when the file appeared in between
    let file = OpenOptions::new().write(true).create_new(true).open(path);
    let file = match file {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(EmitStatus::AlreadyExists),
        Err(source) => {
            return Err(GenerateError::FileWriteFailure {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    write_or_remove(path, file, content)?;
    Ok(EmitStatus::Created)
}

/// Write `content` to a freshly created file, deleting the file if the write fails
fn write_or_remove(path: &Path, mut file: impl Write, content: &str) -> Result<(), GenerateError> {
    let Err(source) = file.write_all(content.as_bytes()) else {
        return Ok(());
    };
    drop(file);
    // a truncated file would read as AlreadyExists on every later run
    if let Err(e) = fs::remove_file(path) {
        tracing::warn!(path = %path.display(), error = %e, "failed to remove partial file");
    }
    Err(GenerateError::FileWriteFailure {
        path: path.to_path_buf(),
        source,
    })
}

fn append(path: &Path, preamble: Option<&str>, content: &str) -> Result<(), GenerateError> {
    let write_failure = |source| GenerateError::FileWriteFailure {
        path: path.to_path_buf(),
        source,
    };
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(write_failure)?;
    if let Some(preamble) = preamble {
        let empty = file.metadata().map_err(write_failure)?.len() == 0;
        if empty {
            file.write_all(preamble.as_bytes()).map_err(write_failure)?;
        }
    }
    file.write_all(content.as_bytes()).map_err(write_failure)
}

fn already_contains(path: &Path, block: &str) -> bool {
    fs::read_to_string(path)
        .map(|existing| existing.contains(block.trim()))
        .unwrap_or(false)
}
