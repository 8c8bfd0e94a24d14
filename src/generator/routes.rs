//! Route registration block
//!
//! One `Route::apiResource` line covers list/create/read/update/delete. With soft
//! delete, three explicit routes come first so `{path}/trashed` is matched before
//! the resource's `{path}/{id}` item route:
//!
//! ```text
//! Route::get('products/trashed', [ProductController::class, 'trashed']);
//! Route::post('products/{id}/restore', [ProductController::class, 'restore']);
//! Route::delete('products/{id}/forceDelete', [ProductController::class, 'forceDelete']);
//! Route::apiResource('products', ProductController::class);
//! ```

use super::code::quote;
use super::handler::Operation;
use super::names::ArtifactNames;

/// A single explicit route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteLine {
    pub verb: &'static str,
    pub path: String,
    pub operation: Operation,
}

/// Sub-path and verb of each soft-delete operation
fn soft_delete_route(operation: Operation) -> Option<(&'static str, &'static str)> {
    match operation {
        Operation::ListTrashed => Some(("get", "/trashed")),
        Operation::Restore => Some(("post", "/{id}/restore")),
        Operation::ForceDelete => Some(("delete", "/{id}/forceDelete")),
        _ => None,
    }
}

/// Explicit routes for the soft-delete trio (empty without soft delete)
pub fn soft_delete_routes(names: &ArtifactNames, supports_soft_delete: bool) -> Vec<RouteLine> {
    if !supports_soft_delete {
        return Vec::new();
    }
    Operation::SOFT_DELETE
        .iter()
        .filter_map(|op| {
            soft_delete_route(*op).map(|(verb, sub)| RouteLine {
                verb,
                path: format!("{}{sub}", names.route_path),
                operation: *op,
            })
        })
        .collect()
}

/// PHP statements of the route block, in registration order
pub fn route_statements(names: &ArtifactNames, supports_soft_delete: bool) -> Vec<String> {
    let controller = format!("{}::class", names.controller_fqcn());
    let mut lines: Vec<String> = soft_delete_routes(names, supports_soft_delete)
        .into_iter()
        .map(|route| {
            format!(
                "Route::{}({}, [{controller}, {}]);",
                route.verb,
                quote(&route.path),
                quote(route.operation.action())
            )
        })
        .collect();
    lines.push(format!(
        "Route::apiResource({}, {controller});",
        quote(&names.route_path)
    ));
    lines
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::config::GeneratorConfig;
    use crate::model::ModelName;

    fn names() -> ArtifactNames {
        ArtifactNames::new(&ModelName::parse("Product").unwrap(), &GeneratorConfig::default())
    }

    #[test]
    fn test_resource_only() {
        assert_eq!(
            route_statements(&names(), false),
            ["Route::apiResource('products', App\\Http\\Controllers\\ProductController::class);"]
        );
    }

    #[test]
    fn test_soft_delete_routes_precede_resource() {
        let lines = route_statements(&names(), true);
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "Route::get('products/trashed', [App\\Http\\Controllers\\ProductController::class, 'trashed']);"
        );
        assert_eq!(
            lines[1],
            "Route::post('products/{id}/restore', [App\\Http\\Controllers\\ProductController::class, 'restore']);"
        );
        assert_eq!(
            lines[2],
            "Route::delete('products/{id}/forceDelete', [App\\Http\\Controllers\\ProductController::class, 'forceDelete']);"
        );
        assert!(lines[3].starts_with("Route::apiResource('products'"));
    }

    #[test]
    fn test_every_soft_delete_operation_is_routed() {
        let routes = soft_delete_routes(&names(), true);
        let routed: Vec<_> = routes.iter().map(|r| r.operation).collect();
        assert_eq!(routed, Operation::SOFT_DELETE);
    }
}
