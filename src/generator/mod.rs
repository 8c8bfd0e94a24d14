//! # Generator Module
//!
//! Turns a model's column list into the PHP artifacts of a Laravel CRUD API.
//!
//! ## Overview
//!
//! For one model the generator produces:
//! - **Resource** - read-model transformer projecting columns into the response body
//! - **Form requests** - `Store{Model}Request` and `Update{Model}Request` validation rules
//! - **Controller** - the request handler, with the soft-delete trio when supported
//! - **Service** - optional persistence facade the controller delegates to
//! - **Routes** - a registration block appended to the shared route file
//! - **Support traits** - optional `ApiResponseTrait` and `FileStorageTrait`
//!
//! ## Architecture
//!
//! ```text
//! Columns → Classifier → Exclusion Policy → Rules / Projections / Operation bodies
//!         → Askama templates → ArtifactPlan → Emitter
//! ```
//!
//! Every generator switches on [`crate::model::ColumnKind`], never on raw column
//! names. Direct and service-mediated handlers share the same
//! [`handler::OperationBody`] values; only the [`handler::CallSite`] differs.
//!
//! ## Write policy
//!
//! Every artifact except the route block is create-if-absent: an existing file is
//! reported as [`EmitStatus::AlreadyExists`] and never touched. The route block is
//! appended on every run unless `routes.dedupe` is set.
//!
//! ## Usage
//!
//! ```bash
//! autocrud-gen generate Product --schema schema.yaml --service
//! ```
//!
//! ```rust,ignore
//! use autocrud::generator::{generate_model, GenerationOptions, Generator};
//! use autocrud::schema::InlineColumns;
//!
//! let generator = Generator::default();
//! let columns = InlineColumns::parse("id,title,cover_img,created_at,updated_at");
//! let report = generate_model(
//!     &generator,
//!     "Product",
//!     &columns,
//!     std::path::Path::new("."),
//!     GenerationOptions::default(),
//!     false,
//! )?;
//! ```

pub mod code;
pub mod handler;
mod names;
mod plan;
mod project;
pub mod routes;
pub mod rules;
mod templates;
#[cfg(test)]
mod tests;
pub mod transformer;

pub use names::ArtifactNames;
pub use plan::*;
pub use project::*;
pub use templates::*;
