//! Class names, namespaces, variables and paths derived from one model name

use std::path::PathBuf;

use crate::config::{namespace_for, GeneratorConfig};
use crate::model::ModelName;

/// Every identifier the generated artifacts use for one model
///
/// For `OrderItem` with the default configuration:
///
/// ```text
/// resource        OrderItemResource       App\Http\Resources
/// store_request   StoreOrderItemRequest   App\Http\Requests\OrderItemRequest
/// controller      OrderItemController     App\Http\Controllers
/// service         OrderItemService        App\Services
/// variables       $orderItem / $orderItems / $orderItemService
/// route path      order_items
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNames {
    pub model: String,
    pub plural: String,
    pub var: String,
    pub plural_var: String,
    pub model_fqcn: String,
    pub resource: String,
    pub resource_ns: String,
    pub request_folder: String,
    pub store_request: String,
    pub update_request: String,
    pub request_ns: String,
    pub controller: String,
    pub controller_ns: String,
    pub service: String,
    pub service_var: String,
    pub service_ns: String,
    pub support_ns: String,
    pub route_path: String,
    pub resource_path: PathBuf,
    pub store_request_path: PathBuf,
    pub update_request_path: PathBuf,
    pub controller_path: PathBuf,
    pub service_path: PathBuf,
    pub routes_path: PathBuf,
}

impl ArtifactNames {
    pub fn new(name: &ModelName, config: &GeneratorConfig) -> Self {
        let paths = &config.paths;
        let model = name.as_str().to_string();
        let var = name.variable();
        let request_folder = format!("{model}Request");
        let requests_dir = paths.requests_dir.join(&request_folder);
        let store_request = format!("Store{model}Request");
        let update_request = format!("Update{model}Request");
        let resource = format!("{model}Resource");
        let controller = format!("{model}Controller");
        let service = format!("{model}Service");

        ArtifactNames {
            plural: name.plural(),
            plural_var: name.plural_variable(),
            model_fqcn: format!("{}\\{model}", config.generation.model_namespace),
            resource_path: paths.resources_dir.join(format!("{resource}.php")),
            resource_ns: namespace_for(&paths.resources_dir),
            store_request_path: requests_dir.join(format!("{store_request}.php")),
            update_request_path: requests_dir.join(format!("{update_request}.php")),
            request_ns: namespace_for(&requests_dir),
            controller_path: paths.controllers_dir.join(format!("{controller}.php")),
            controller_ns: namespace_for(&paths.controllers_dir),
            service_path: paths.services_dir.join(format!("{service}.php")),
            service_ns: namespace_for(&paths.services_dir),
            service_var: format!("{var}Service"),
            support_ns: namespace_for(&paths.support_dir),
            route_path: name.route_path(config.routes.style),
            routes_path: paths.routes_file.clone(),
            request_folder,
            store_request,
            update_request,
            resource,
            controller,
            service,
            var,
            model,
        }
    }

    pub fn resource_fqcn(&self) -> String {
        format!("{}\\{}", self.resource_ns, self.resource)
    }

    pub fn controller_fqcn(&self) -> String {
        format!("{}\\{}", self.controller_ns, self.controller)
    }

    pub fn service_fqcn(&self) -> String {
        format!("{}\\{}", self.service_ns, self.service)
    }

    pub fn store_request_fqcn(&self) -> String {
        format!("{}\\{}", self.request_ns, self.store_request)
    }

    pub fn update_request_fqcn(&self) -> String {
        format!("{}\\{}", self.request_ns, self.update_request)
    }

    /// Fully qualified name of a support trait (`ApiResponseTrait`)
    pub fn support_trait(&self, name: &str) -> String {
        format!("{}\\{name}", self.support_ns)
    }
}
