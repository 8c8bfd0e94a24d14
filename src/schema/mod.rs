//! # Schema Module
//!
//! Supplies the column inventory of a model's backing table. The engine only needs
//! two facts from a schema source: whether the table exists, and its columns in
//! declaration order.
//!
//! A schema file maps table names to ordered column lists and may be YAML or JSON
//! (picked by extension):
//!
//! ```yaml
//! tables:
//!   products: [id, title, cover_img, created_at, updated_at]
//!   users: [id, name, email, password, email_verified_at, created_at, updated_at]
//! ```

use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::GenerateError;
use crate::exclusion::ExclusionPolicy;
use crate::model::{Classifier, ModelName, ModelSpec};

/// Schema file names looked up in the application root, in order
pub const SCHEMA_FILE_NAMES: [&str; 3] = ["schema.yaml", "schema.yml", "schema.json"];

/// Source of table column listings
pub trait SchemaSource {
    /// Ordered column names of `table`
    ///
    /// # Errors
    ///
    /// [`GenerateError::SchemaNotFound`] if the table does not exist.
    fn column_listing(&self, table: &str) -> Result<Vec<String>, GenerateError>;
}

#[derive(Debug, Deserialize)]
struct SchemaDocument {
    #[serde(default)]
    tables: BTreeMap<String, Vec<String>>,
}

/// Tables read from a YAML or JSON schema file
#[derive(Debug, Clone, Default)]
pub struct SchemaFile {
    tables: BTreeMap<String, Vec<String>>,
}

impl SchemaFile {
    /// Read and parse a schema file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read schema file: {}", path.display()))?;
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        let document: SchemaDocument = if ext == "yaml" || ext == "yml" {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse schema file: {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse schema file: {}", path.display()))?
        };
        tracing::debug!(
            path = %path.display(),
            tables = document.tables.len(),
            "loaded schema file"
        );
        Ok(SchemaFile {
            tables: document.tables,
        })
    }

    /// Build from an in-memory table map
    pub fn from_tables(tables: BTreeMap<String, Vec<String>>) -> Self {
        SchemaFile { tables }
    }

    /// Table names, sorted
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}

impl SchemaSource for SchemaFile {
    fn column_listing(&self, table: &str) -> Result<Vec<String>, GenerateError> {
        self.tables
            .get(table)
            .cloned()
            .ok_or_else(|| GenerateError::SchemaNotFound {
                table: table.to_string(),
            })
    }
}

/// Columns given directly (e.g. `--columns id,title,cover_img`)
///
/// Answers every table name with the same list. An empty list means the table
/// does not exist.
#[derive(Debug, Clone, Default)]
pub struct InlineColumns {
    columns: Vec<String>,
}

impl InlineColumns {
    pub fn new(columns: Vec<String>) -> Self {
        InlineColumns { columns }
    }

    /// Parse a comma-separated list, trimming whitespace and dropping blanks
    pub fn parse(list: &str) -> Self {
        InlineColumns {
            columns: list
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

impl SchemaSource for InlineColumns {
    fn column_listing(&self, table: &str) -> Result<Vec<String>, GenerateError> {
        if self.columns.is_empty() {
            return Err(GenerateError::SchemaNotFound {
                table: table.to_string(),
            });
        }
        Ok(self.columns.clone())
    }
}

/// First conventional schema file present in `root`
pub fn auto_detect_schema(root: &Path) -> Option<PathBuf> {
    SCHEMA_FILE_NAMES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.exists())
}

/// Validate the model name, look up its table and build the [`ModelSpec`]
///
/// The table name is the `table` configured for the model, else the snake-cased
/// plural of the model (`OrderItem` → `order_items`). Nothing is generated when
/// this fails.
pub fn load_model_spec(
    name: &str,
    source: &dyn SchemaSource,
    classifier: &Classifier,
    policy: &ExclusionPolicy,
) -> Result<ModelSpec, GenerateError> {
    let name = ModelName::parse(name)?;
    let table = policy.table_for(&name);
    let columns = source.column_listing(&table)?;
    tracing::debug!(model = %name, table = %table, columns = columns.len(), "resolved table");
    Ok(ModelSpec::detect(name, columns, classifier))
}
