mod emit;
mod generate;

pub use emit::{emit_artifact, emit_plan, EmitRecord, EmitReport, EmitStatus};
pub use generate::{generate_model, Orchestrator, Stage};
