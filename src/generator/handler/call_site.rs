use super::{ClassSource, HandlerContext, OperationBody};
use crate::generator::code::{quote, PhpWriter};
use crate::generator::names::ArtifactNames;

const BASE_CONTROLLER_NS: &str = "App\\Http\\Controllers";

/// Where an operation's persistence work runs
///
/// Implementors receive the same [`OperationBody`] list and only decide the
/// indirection: inline in the controller, or behind a service facade.
pub trait CallSite {
    /// Short label used in logs and reports
    fn name(&self) -> &'static str;

    /// The controller class
    fn controller(&self, ctx: &HandlerContext<'_>, bodies: &[OperationBody]) -> ClassSource;

    /// The service class, if this strategy has one
    fn service(&self, _ctx: &HandlerContext<'_>, _bodies: &[OperationBody]) -> Option<ClassSource> {
        None
    }
}

/// How a guarded block reports a failure envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Failure {
    /// `return $this->errorResponse(...)` from a controller action
    Return,
    /// `throw new HttpResponseException($this->errorResponse(...))` from a service
    Throw,
}

impl Failure {
    fn statement(&self, message: &str, status: u16) -> String {
        let envelope = format!("$this->errorResponse(null, {}, {status})", quote(message));
        match self {
            Failure::Return => format!("return {envelope};"),
            Failure::Throw => format!("throw new HttpResponseException({envelope});"),
        }
    }
}

const SERVER_ERROR: &str = "there is something wrong in server";

/// `try { work; tail } catch (...) { ... }`
fn write_guarded(
    w: &mut PhpWriter,
    names: &ArtifactNames,
    body: &OperationBody,
    failure: Failure,
    tail: Option<String>,
) {
    w.open("try {");
    for line in &body.work {
        w.line(line);
    }
    if let Some(tail) = tail {
        w.line(tail);
    }
    if body.may_be_missing {
        w.reopen("} catch (ModelNotFoundException $e) {");
        w.line(failure.statement(&format!("{} not found", names.model), 404));
    }
    w.reopen("} catch (Exception $e) {");
    w.line(format!(
        "Log::error({} . $e->getMessage());",
        quote(&body.failure_log)
    ));
    w.line(failure.statement(SERVER_ERROR, 500));
    w.close("}");
}

fn render_method(signature: String, body: &OperationBody, write: impl FnOnce(&mut PhpWriter)) -> String {
    let mut w = PhpWriter::at(1);
    w.method(body.doc(), &signature, write);
    w.finish()
}

fn base_imports(names: &ArtifactNames) -> Vec<String> {
    vec![names.model_fqcn.clone(), "Illuminate\\Http\\Request".to_string()]
}

/// Resource and request classes, plus the base controller when it lives elsewhere
fn controller_imports(names: &ArtifactNames) -> Vec<String> {
    let mut imports = vec![
        names.resource_fqcn(),
        names.store_request_fqcn(),
        names.update_request_fqcn(),
    ];
    if names.controller_ns != BASE_CONTROLLER_NS {
        imports.push(format!("{BASE_CONTROLLER_NS}\\Controller"));
    }
    imports
}

/// Controller performs persistence and storage calls itself
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectCalls;

impl CallSite for DirectCalls {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn controller(&self, ctx: &HandlerContext<'_>, bodies: &[OperationBody]) -> ClassSource {
        let names = ctx.names;
        let mut imports = vec!["Exception".to_string()];
        imports.extend(base_imports(names));
        imports.push("Illuminate\\Support\\Facades\\Log".to_string());
        if ctx.supports_soft_delete {
            imports.push("Illuminate\\Database\\Eloquent\\ModelNotFoundException".to_string());
        }
        imports.push(names.support_trait("ApiResponseTrait"));
        let mut traits = vec!["ApiResponseTrait".to_string()];
        if ctx.has_media() {
            imports.push(names.support_trait("FileStorageTrait"));
            traits.push("FileStorageTrait".to_string());
        }
        imports.extend(controller_imports(names));

        let methods = bodies
            .iter()
            .map(|body| {
                let signature = format!(
                    "public function {}({})",
                    body.operation.action(),
                    body.controller_params
                );
                render_method(signature, body, |w| {
                    for line in &body.prelude {
                        w.line(line);
                    }
                    if body.work.is_empty() {
                        w.line(format!("return {};", body.response));
                    } else {
                        let tail = format!("return {};", body.response);
                        write_guarded(w, names, body, Failure::Return, Some(tail));
                    }
                })
            })
            .collect();

        ClassSource {
            namespace: names.controller_ns.clone(),
            imports,
            class_name: names.controller.clone(),
            extends: Some("Controller".to_string()),
            traits,
            members: String::new(),
            methods,
        }
    }
}

/// Controller delegates every operation to a per-model service
#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceCalls;

impl CallSite for ServiceCalls {
    fn name(&self) -> &'static str {
        "service"
    }

    fn controller(&self, ctx: &HandlerContext<'_>, bodies: &[OperationBody]) -> ClassSource {
        let names = ctx.names;
        let mut imports = base_imports(names);
        imports.push(names.service_fqcn());
        imports.push(names.support_trait("ApiResponseTrait"));
        imports.extend(controller_imports(names));

        let service_prop = format!("$this->{}", names.service_var);
        let mut members = PhpWriter::at(1);
        members.line(format!("protected {} ${};", names.service, names.service_var));
        members.blank();
        members.method(
            "Inject the service that performs persistence and storage work.",
            &format!(
                "public function __construct({} ${})",
                names.service, names.service_var
            ),
            |w| {
                w.line(format!("{service_prop} = ${};", names.service_var));
            },
        );

        let methods = bodies
            .iter()
            .map(|body| {
                let signature = format!(
                    "public function {}({})",
                    body.operation.action(),
                    body.controller_params
                );
                render_method(signature, body, |w| {
                    for line in &body.prelude {
                        w.line(line);
                    }
                    let call = format!(
                        "{service_prop}->{}({})",
                        body.operation.service_method(&names.model),
                        body.service_args
                    );
                    match &body.result {
                        Some(var) => w.line(format!("{var} = {call};")),
                        None => w.line(format!("{call};")),
                    };
                    w.line(format!("return {};", body.response));
                })
            })
            .collect();

        ClassSource {
            namespace: names.controller_ns.clone(),
            imports,
            class_name: names.controller.clone(),
            extends: Some("Controller".to_string()),
            traits: vec!["ApiResponseTrait".to_string()],
            members: members.finish(),
            methods,
        }
    }

    fn service(&self, ctx: &HandlerContext<'_>, bodies: &[OperationBody]) -> Option<ClassSource> {
        let names = ctx.names;
        let mut imports = vec![
            "Exception".to_string(),
            names.model_fqcn.clone(),
            "Illuminate\\Support\\Facades\\Log".to_string(),
            "Illuminate\\Http\\Exceptions\\HttpResponseException".to_string(),
        ];
        if ctx.supports_soft_delete {
            imports.push("Illuminate\\Database\\Eloquent\\ModelNotFoundException".to_string());
        }
        imports.push(names.support_trait("ApiResponseTrait"));
        let mut traits = vec!["ApiResponseTrait".to_string()];
        if ctx.has_media() {
            imports.push(names.support_trait("FileStorageTrait"));
            traits.push("FileStorageTrait".to_string());
        }

        let methods = bodies
            .iter()
            .map(|body| {
                let signature = format!(
                    "public function {}({})",
                    body.operation.service_method(&names.model),
                    body.service_params
                );
                render_method(signature, body, |w| {
                    let tail = body.result.as_ref().map(|var| format!("return {var};"));
                    if body.work.is_empty() {
                        if let Some(tail) = tail {
                            w.line(tail);
                        }
                    } else {
                        write_guarded(w, names, body, Failure::Throw, tail);
                    }
                })
            })
            .collect();

        Some(ClassSource {
            namespace: names.service_ns.clone(),
            imports,
            class_name: names.service.clone(),
            extends: None,
            traits,
            members: String::new(),
            methods,
        })
    }
}
