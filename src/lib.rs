//! # autocrud
//!
//! **autocrud** generates the CRUD layer of a Laravel API from nothing more than a
//! model name and the ordered column list of its table.
//!
//! ## Overview
//!
//! Column names carry the conventions: `id`, `created_at`, `updated_at` and
//! `deleted_at` are bookkeeping, `password` and friends are sensitive, and a
//! suffix such as `_img` or `_doc` marks a stored file. From those alone the
//! generator writes a resource transformer, store and update form requests, a
//! controller (optionally backed by a service class) and a route block.
//!
//! ## Architecture
//!
//! - **[`model`]** - Model names, inflection and the table-driven column classifier
//! - **[`media`]** - Media subtypes, their column suffixes and file allow-lists
//! - **[`exclusion`]** - Which column kinds take part in which artifact, per model
//! - **[`generator`]** - Rule synthesis, projections, handler bodies, routes, planning and emission
//! - **[`schema`]** - Where column lists come from (schema files, inline lists)
//! - **[`config`]** - `autocrud.toml` loading and defaults
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - The `autocrud-gen` command line
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant User
//!     participant CLI as CLI<br/>(autocrud-gen)
//!     participant Schema as schema::SchemaSource
//!     participant Gen as generator::Generator
//!     participant Emit as generator::emit_plan
//!     participant FS as File System
//!
//!     User->>CLI: autocrud-gen generate Product
//!     CLI->>Schema: column_listing("products")
//!     Schema-->>CLI: [id, title, cover_img, ...]
//!     CLI->>Gen: classify(spec)
//!     Gen->>Gen: plan(classified, options)
//!     Gen-->>CLI: ArtifactPlan
//!     CLI->>Emit: emit_plan(root, plan)
//!     Emit->>FS: create_new (resource, requests, controller, service)
//!     Emit->>FS: append (routes)
//!     Emit-->>CLI: EmitReport
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! autocrud-gen generate Product --columns id,title,cover_img,created_at,updated_at --direct
//! ```
//!
//! Existing artifacts are never overwritten; delete a file to regenerate it. The
//! route block is appended on every run unless `[routes] dedupe = true`.

pub mod cli;
pub mod config;
pub mod error;
pub mod exclusion;
pub mod generator;
pub mod logging;
pub mod media;
pub mod model;
pub mod schema;

pub use error::GenerateError;
pub use generator::{generate_model, ArtifactPlan, EmitReport, GenerationOptions, Generator};
pub use model::{classify, ColumnDescriptor, ColumnKind, ModelName, ModelSpec};
