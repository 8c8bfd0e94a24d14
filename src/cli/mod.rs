//! # CLI Module
//!
//! Command-line glue for the `autocrud-gen` binary. Everything here resolves
//! inputs (configuration, schema source, layering choice) and prints the outcome;
//! generation itself lives in [`crate::generator`].
//!
//! ## Commands
//!
//! ### `generate`
//!
//! ```bash
//! autocrud-gen generate Product --schema schema.yaml --service
//! autocrud-gen generate Tag --columns id,label,created_at,updated_at --direct --dry-run
//! ```
//!
//! Options:
//! - `--schema <FILE>` / `--columns <LIST>` - Column source (default: `schema.yaml` in the root)
//! - `--service` / `--direct` - Layering mode; asked interactively when neither is given
//! - `--root <DIR>` - Application root (default: current directory)
//! - `--config <FILE>` - Configuration file (default: `autocrud.toml` in the root)
//! - `--with-support-traits` - Also emit `ApiResponseTrait` and `FileStorageTrait`
//! - `--dry-run` - Report without writing
//!
//! ### `inspect`
//!
//! ```bash
//! autocrud-gen inspect User --schema schema.yaml
//! ```
//!
//! Prints each column's kind and the artifacts that include it.

mod commands;


pub use commands::{inspect_lines, report_lines, run, run_cli, schema_source, Cli, Commands, SchemaArgs};
