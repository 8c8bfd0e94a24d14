//! # Request-Handler Generator
//!
//! Builds the controller (and, in service mode, the service) for one model.
//!
//! Every operation is described once as an [`OperationBody`]: its inputs, the
//! persistence and storage statements it runs, the value it produces and the
//! envelope it answers with. A [`CallSite`] then decides where those statements
//! live:
//!
//! - [`DirectCalls`]: the controller runs them itself and answers failures inline
//! - [`ServiceCalls`]: a per-model service runs them and throws the failure
//!   envelope; the controller only forwards inputs and wraps results
//!
//! Both strategies consume the same bodies, so the two layering modes cannot drift
//! apart in behavior.

mod call_site;

pub use call_site::{CallSite, DirectCalls, ServiceCalls};

use std::fmt;

use super::code::quote;
use super::names::ArtifactNames;
use crate::model::{ColumnDescriptor, MediaSubtype};

/// One generated request-handling operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Create,
    Read,
    Update,
    Delete,
    ListTrashed,
    Restore,
    ForceDelete,
}

impl Operation {
    /// The five operations every model gets
    pub const CORE: [Operation; 5] = [
        Operation::List,
        Operation::Create,
        Operation::Read,
        Operation::Update,
        Operation::Delete,
    ];

    /// Operations added when the model supports soft delete
    pub const SOFT_DELETE: [Operation; 3] = [
        Operation::ListTrashed,
        Operation::Restore,
        Operation::ForceDelete,
    ];

    /// Operations generated for a model, in emission order
    pub fn for_model(supports_soft_delete: bool) -> Vec<Operation> {
        let mut ops = Operation::CORE.to_vec();
        if supports_soft_delete {
            ops.extend(Operation::SOFT_DELETE);
        }
        ops
    }

    /// Controller action name (the name route registration binds to)
    pub fn action(&self) -> &'static str {
        match self {
            Operation::List => "index",
            Operation::Create => "store",
            Operation::Read => "show",
            Operation::Update => "update",
            Operation::Delete => "destroy",
            Operation::ListTrashed => "trashed",
            Operation::Restore => "restore",
            Operation::ForceDelete => "forceDelete",
        }
    }

    /// Service method name (`createProduct`)
    pub fn service_method(&self, model: &str) -> String {
        let prefix = match self {
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Read => "get",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::ListTrashed => "trashedList",
            Operation::Restore => "restore",
            Operation::ForceDelete => "forceDelete",
        };
        format!("{prefix}{model}")
    }

    fn doc(&self) -> &'static str {
        match self {
            Operation::List => "Display a paginated listing of the resource.",
            Operation::Create => "Store a newly created resource in storage.",
            Operation::Read => "Display the specified resource.",
            Operation::Update => "Update the specified resource in storage.",
            Operation::Delete => "Remove the specified resource from storage.",
            Operation::ListTrashed => "Display a paginated listing of the trashed resources.",
            Operation::Restore => "Restore a trashed resource by its ID.",
            Operation::ForceDelete => "Permanently delete a trashed resource by its ID.",
        }
    }

    /// Verb used in failure log lines (`Error creating Product: ...`)
    fn failure_verb(&self) -> &'static str {
        match self {
            Operation::List => "listing",
            Operation::Create => "creating",
            Operation::Read => "retrieving",
            Operation::Update => "updating",
            Operation::Delete => "deleting",
            Operation::ListTrashed => "listing trashed",
            Operation::Restore => "restoring",
            Operation::ForceDelete => "force deleting",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action())
    }
}

/// Model-level inputs shared by every operation
#[derive(Debug, Clone)]
pub struct HandlerContext<'a> {
    pub names: &'a ArtifactNames,
    /// Columns assigned from validated input (handler-body exclusions applied)
    pub fields: &'a [ColumnDescriptor],
    pub supports_soft_delete: bool,
    pub per_page: u32,
    pub per_page_param: &'a str,
}

impl HandlerContext<'_> {
    /// Media columns among the assigned fields, in schema order
    pub fn media_fields(&self) -> impl Iterator<Item = (&str, MediaSubtype)> {
        self.fields
            .iter()
            .filter_map(|c| c.kind.media().map(|subtype| (c.name.as_str(), subtype)))
    }

    pub fn has_media(&self) -> bool {
        self.media_fields().next().is_some()
    }

    fn per_page_line(&self) -> String {
        format!(
            "$perPage = $request->input({}, {});",
            quote(self.per_page_param),
            self.per_page
        )
    }
}

/// Layering-independent description of one operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationBody {
    pub operation: Operation,
    /// Controller action parameters
    pub controller_params: String,
    /// Controller statements that extract inputs
    pub prelude: Vec<String>,
    /// Service method parameters
    pub service_params: String,
    /// Arguments the controller forwards to the service
    pub service_args: String,
    /// Persistence and storage statements
    pub work: Vec<String>,
    /// Variable holding the produced value, if any
    pub result: Option<String>,
    /// Lookup may fail with a not-found condition
    pub may_be_missing: bool,
    /// Success envelope expression
    pub response: String,
    /// Log line prefix for unexpected failures
    pub failure_log: String,
}

impl OperationBody {
    /// Describe `operation` for the model in `ctx`
    pub fn build(operation: Operation, ctx: &HandlerContext<'_>) -> Self {
        let n = ctx.names;
        let model = &n.model;
        let record = format!("${}", n.var);
        let resource = |var: &str| format!("new {}({var})", n.resource);
        let collection = |var: &str| {
            format!(
                "$this->resourcePaginated({}::collection({var}))",
                n.resource
            )
        };
        let validated = "$fieldInputs = $request->validated();".to_string();
        let bound_record = format!("{model} {record}");

        let mut body = OperationBody {
            operation,
            controller_params: String::new(),
            prelude: Vec::new(),
            service_params: String::new(),
            service_args: String::new(),
            work: Vec::new(),
            result: None,
            may_be_missing: false,
            response: String::new(),
            failure_log: format!("Error {} {model}: ", operation.failure_verb()),
        };

        match operation {
            Operation::List | Operation::ListTrashed => {
                let (var, query) = if operation == Operation::List {
                    (format!("${}", n.plural_var), format!("{model}::paginate($perPage)"))
                } else {
                    (
                        format!("$trashed{}", n.plural),
                        format!("{model}::onlyTrashed()->paginate($perPage)"),
                    )
                };
                body.controller_params = "Request $request".to_string();
                body.prelude.push(ctx.per_page_line());
                body.service_params = "int $perPage".to_string();
                body.service_args = "$perPage".to_string();
                body.work.push(format!("{var} = {query};"));
                body.response = collection(&var);
                body.result = Some(var);
            }
            Operation::Create => {
                body.controller_params = format!("{} $request", n.store_request);
                body.prelude.push(validated);
                body.service_params = "array $fieldInputs".to_string();
                body.service_args = "$fieldInputs".to_string();
                body.work.push(format!("{record} = {model}::create(["));
                for column in ctx.fields {
                    body.work.push(format!(
                        "    {} => {},",
                        quote(&column.name),
                        create_value(column, model)
                    ));
                }
                body.work.push("]);".to_string());
                body.response = format!(
                    "$this->successResponse({}, {}, 201)",
                    resource(&record),
                    quote(&format!("{model} Created Successfully"))
                );
                body.result = Some(record);
            }
            Operation::Read => {
                body.controller_params = bound_record.clone();
                body.service_params = bound_record;
                body.service_args = record.clone();
                body.response = format!("$this->successResponse({})", resource(&record));
                body.result = Some(record);
            }
            Operation::Update => {
                body.controller_params = format!("{} $request, {bound_record}", n.update_request);
                body.prelude.push(validated);
                body.service_params = format!("array $fieldInputs, {bound_record}");
                body.service_args = format!("$fieldInputs, {record}");
                body.work.push("$data = [".to_string());
                for column in ctx.fields {
                    body.work.push(format!(
                        "    {} => {},",
                        quote(&column.name),
                        update_value(column, model, &record)
                    ));
                }
                body.work.push("];".to_string());
                body.work.push(format!(
                    "{record}->update(array_filter($data, fn ($value) => !is_null($value)));"
                ));
                body.response = format!(
                    "$this->successResponse({}, {})",
                    resource(&record),
                    quote(&format!("{model} Updated Successfully"))
                );
                body.result = Some(record);
            }
            Operation::Delete => {
                body.controller_params = bound_record.clone();
                body.service_params = bound_record;
                body.service_args = record.clone();
                if !ctx.supports_soft_delete {
                    body.work.extend(delete_files(ctx, &record));
                }
                body.work.push(format!("{record}->delete();"));
                body.response = format!(
                    "$this->successResponse(null, {})",
                    quote(&format!("{model} Deleted Successfully"))
                );
            }
            Operation::Restore => {
                body.controller_params = "$id".to_string();
                body.service_params = "$id".to_string();
                body.service_args = "$id".to_string();
                body.may_be_missing = true;
                body.work.push(find_trashed(model, &record));
                body.work.push(format!("{record}->restore();"));
                body.response = format!(
                    "$this->successResponse({}, {})",
                    resource(&record),
                    quote(&format!("{model} Restored Successfully"))
                );
                body.result = Some(record);
            }
            Operation::ForceDelete => {
                body.controller_params = "$id".to_string();
                body.service_params = "$id".to_string();
                body.service_args = "$id".to_string();
                body.may_be_missing = true;
                body.work.push(find_trashed(model, &record));
                body.work.extend(delete_files(ctx, &record));
                body.work.push(format!("{record}->forceDelete();"));
                body.response = format!(
                    "$this->successResponse(null, {})",
                    quote(&format!("{model} Deleted Permanently"))
                );
            }
        }
        body
    }

    pub fn doc(&self) -> &'static str {
        self.operation.doc()
    }
}

fn input(column: &str) -> String {
    format!("$fieldInputs[{}] ?? null", quote(column))
}

fn create_value(column: &ColumnDescriptor, model: &str) -> String {
    match column.kind.media() {
        Some(subtype) => format!(
            "$this->storeFile({}, {}, {})",
            input(&column.name),
            quote(model),
            quote(subtype.as_str())
        ),
        None => input(&column.name),
    }
}

fn update_value(column: &ColumnDescriptor, model: &str, record: &str) -> String {
    match column.kind.media() {
        Some(subtype) => format!(
            "$this->replaceFile({}, {record}->{}, {}, {})",
            input(&column.name),
            column.name,
            quote(model),
            quote(subtype.as_str())
        ),
        None => input(&column.name),
    }
}

fn delete_files(ctx: &HandlerContext<'_>, record: &str) -> Vec<String> {
    ctx.media_fields()
        .map(|(column, _)| format!("$this->deleteFile({record}->{column});"))
        .collect()
}

fn find_trashed(model: &str, record: &str) -> String {
    format!("{record} = {model}::onlyTrashed()->findOrFail($id);")
}

/// Source of one generated PHP class, ready for the class template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSource {
    pub namespace: String,
    pub imports: Vec<String>,
    pub class_name: String,
    pub extends: Option<String>,
    pub traits: Vec<String>,
    /// Properties and constructor, pre-rendered at class-body depth
    pub members: String,
    /// Methods, each pre-rendered at class-body depth
    pub methods: Vec<String>,
}

/// Controller plus optional service for one model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerSources {
    pub controller: ClassSource,
    pub service: Option<ClassSource>,
}

/// Generate the request-handling classes for `ctx` through `call_site`
pub fn generate_handler(ctx: &HandlerContext<'_>, call_site: &dyn CallSite) -> HandlerSources {
    let bodies: Vec<OperationBody> = Operation::for_model(ctx.supports_soft_delete)
        .into_iter()
        .map(|op| OperationBody::build(op, ctx))
        .collect();
    tracing::debug!(
        model = %ctx.names.model,
        call_site = call_site.name(),
        operations = bodies.len(),
        "generating request handlers"
    );
    HandlerSources {
        controller: call_site.controller(ctx, &bodies),
        service: call_site.service(ctx, &bodies),
    }
}

#[cfg(test)]
mod tests;
