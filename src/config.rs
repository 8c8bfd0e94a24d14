//! Generator configuration
//!
//! Every table the engine consults (exact column names, media allow-lists,
//! exclusions, per-model overrides, output paths) can be overridden from an
//! `autocrud.toml` file in the application root. A missing file means defaults.
//!
//! ```toml
//! [generation]
//! per_page = 25
//!
//! [routes]
//! style = "kebab"
//! dedupe = true
//!
//! [models.Customer]
//! auth_subject = true
//! table = "customer_accounts"
//! ```
//!
//! Supplying `[models]` replaces the default table, which marks `User` as the
//! authentication subject.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::GenerateError;
use crate::exclusion::{default_model_exclusions, BaselineExclusions, ExclusionPolicy, ModelExclusions};
use crate::media::MediaTable;
use crate::model::{Classifier, ExactNames, RouteStyle};

/// File name looked up in the application root
pub const CONFIG_FILE_NAME: &str = "autocrud.toml";

/// Settings that shape generated code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Default page size of list endpoints
    pub per_page: u32,
    /// Query parameter overriding the page size
    pub per_page_param: String,
    /// Namespace holding the persistence models
    pub model_namespace: String,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        GenerationSettings {
            per_page: 10,
            per_page_param: "per_page".to_string(),
            model_namespace: "App\\Models".to_string(),
        }
    }
}

/// Output locations, relative to the application root
///
/// PHP namespaces are derived from these directories (`app/Http/Controllers` →
/// `App\Http\Controllers`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    pub resources_dir: PathBuf,
    pub requests_dir: PathBuf,
    pub controllers_dir: PathBuf,
    pub services_dir: PathBuf,
    pub support_dir: PathBuf,
    pub routes_file: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        PathSettings {
            resources_dir: PathBuf::from("app/Http/Resources"),
            requests_dir: PathBuf::from("app/Http/Requests"),
            controllers_dir: PathBuf::from("app/Http/Controllers"),
            services_dir: PathBuf::from("app/Services"),
            support_dir: PathBuf::from("app/Traits"),
            routes_file: PathBuf::from("routes/api.php"),
        }
    }
}

/// PSR-4 namespace for a directory under the application root
pub fn namespace_for(dir: &Path) -> String {
    dir.components()
        .filter_map(|c| c.as_os_str().to_str())
        .filter(|s| !s.is_empty() && *s != ".")
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("\\")
}

/// Route block settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteSettings {
    /// Casing of the collection path segment
    pub style: RouteStyle,
    /// Skip the append when the identical block is already in the route file
    pub dedupe: bool,
}

/// Full generator configuration (`autocrud.toml`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub generation: GenerationSettings,
    pub paths: PathSettings,
    pub routes: RouteSettings,
    /// Exact-name classification table
    pub columns: ExactNames,
    /// Media allow-list table (`[[media]]`)
    pub media: MediaTable,
    /// Baseline per-artifact exclusions
    pub exclusions: BaselineExclusions,
    /// Per-model overrides (`[models.<Name>]`)
    pub models: BTreeMap<String, ModelExclusions>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            generation: GenerationSettings::default(),
            paths: PathSettings::default(),
            routes: RouteSettings::default(),
            columns: ExactNames::default(),
            media: MediaTable::default(),
            exclusions: BaselineExclusions::default(),
            models: default_model_exclusions(),
        }
    }
}

impl GeneratorConfig {
    /// Check cross-field constraints that serde cannot express
    pub fn validate(&self, origin: &Path) -> Result<(), GenerateError> {
        self.media.validate()?;
        if self.generation.per_page == 0 {
            return Err(GenerateError::Config {
                path: origin.to_path_buf(),
                message: "generation.per_page must be greater than zero".to_string(),
            });
        }
        if self.generation.per_page_param.trim().is_empty() {
            return Err(GenerateError::Config {
                path: origin.to_path_buf(),
                message: "generation.per_page_param must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Classifier built from `[columns]` and `[[media]]`
    pub fn classifier(&self) -> Classifier {
        Classifier::new(self.columns.clone(), self.media.clone())
    }

    /// Exclusion policy built from `[exclusions]` and `[models]`
    pub fn exclusion_policy(&self) -> ExclusionPolicy {
        ExclusionPolicy::new(self.exclusions.clone(), self.models.clone())
    }
}

/// Load configuration from a TOML file
///
/// Returns `Ok(None)` if the file does not exist, `Err` if it exists but cannot be
/// read, parsed or validated.
pub fn load_config(config_path: &Path) -> anyhow::Result<Option<GeneratorConfig>> {
    if !config_path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

    let config: GeneratorConfig =
        toml::from_str(&contents).map_err(|e| GenerateError::Config {
            path: config_path.to_path_buf(),
            message: e.to_string(),
        })?;

    config
        .validate(config_path)
        .with_context(|| format!("Invalid config: {}", config_path.display()))?;

    Ok(Some(config))
}

/// Resolve the config file to use
///
/// Priority:
/// 1. Explicitly provided path (must exist)
/// 2. `autocrud.toml` in the application root
/// 3. None (defaults)
pub fn resolve_config_path(explicit: Option<&Path>, root: &Path) -> anyhow::Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        return Ok(Some(path.to_path_buf()));
    }
    let detected = root.join(CONFIG_FILE_NAME);
    Ok(detected.exists().then_some(detected))
}

/// Resolve and load, falling back to defaults
pub fn load_or_default(explicit: Option<&Path>, root: &Path) -> anyhow::Result<GeneratorConfig> {
    match resolve_config_path(explicit, root)? {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading generator config");
            Ok(load_config(&path)?.unwrap_or_default())
        }
        None => Ok(GeneratorConfig::default()),
    }
}
