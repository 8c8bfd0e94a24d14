#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::config::GeneratorConfig;
use crate::model::{Classifier, ModelName};

fn names(model: &str) -> ArtifactNames {
    ArtifactNames::new(&ModelName::parse(model).unwrap(), &GeneratorConfig::default())
}

fn fields(columns: &[&str]) -> Vec<ColumnDescriptor> {
    let classifier = Classifier::default();
    columns.iter().map(|c| classifier.classify(c)).collect()
}

fn ctx<'a>(
    names: &'a ArtifactNames,
    fields: &'a [ColumnDescriptor],
    supports_soft_delete: bool,
) -> HandlerContext<'a> {
    HandlerContext {
        names,
        fields,
        supports_soft_delete,
        per_page: 10,
        per_page_param: "per_page",
    }
}

fn method<'a>(class: &'a ClassSource, name: &str) -> &'a str {
    let needle = format!("public function {name}(");
    class
        .methods
        .iter()
        .find(|m| m.contains(&needle))
        .unwrap_or_else(|| panic!("method {name} not generated"))
}

#[test]
fn test_operations_for_model() {
    assert_eq!(Operation::for_model(false).len(), 5);
    let all = Operation::for_model(true);
    assert_eq!(all.len(), 8);
    assert_eq!(&all[5..], &Operation::SOFT_DELETE);
    assert_eq!(Operation::ForceDelete.action(), "forceDelete");
    assert_eq!(Operation::ListTrashed.service_method("Product"), "trashedListProduct");
}

#[test]
fn test_create_body_assigns_fields_and_stores_media() {
    let names = names("Product");
    let fields = fields(&["title", "cover_img"]);
    let body = OperationBody::build(Operation::Create, &ctx(&names, &fields, false));
    assert_eq!(body.controller_params, "StoreProductRequest $request");
    assert_eq!(body.prelude, ["$fieldInputs = $request->validated();"]);
    assert_eq!(
        body.work,
        [
            "$product = Product::create([",
            "    'title' => $fieldInputs['title'] ?? null,",
            "    'cover_img' => $this->storeFile($fieldInputs['cover_img'] ?? null, 'Product', 'image'),",
            "]);",
        ]
    );
    assert_eq!(
        body.response,
        "$this->successResponse(new ProductResource($product), 'Product Created Successfully', 201)"
    );
}

#[test]
fn test_update_body_replaces_files_and_drops_nulls() {
    let names = names("Product");
    let fields = fields(&["title", "cover_img"]);
    let body = OperationBody::build(Operation::Update, &ctx(&names, &fields, false));
    assert!(body.work.contains(
        &"    'cover_img' => $this->replaceFile($fieldInputs['cover_img'] ?? null, $product->cover_img, 'Product', 'image'),".to_string()
    ));
    assert_eq!(
        body.work.last().unwrap(),
        "$product->update(array_filter($data, fn ($value) => !is_null($value)));"
    );
    assert_eq!(body.service_params, "array $fieldInputs, Product $product");
}

#[test]
fn test_delete_removes_files_first_without_soft_delete() {
    let names = names("Product");
    let fields = fields(&["title", "cover_img", "manual_doc"]);
    let body = OperationBody::build(Operation::Delete, &ctx(&names, &fields, false));
    assert_eq!(
        body.work,
        [
            "$this->deleteFile($product->cover_img);",
            "$this->deleteFile($product->manual_doc);",
            "$product->delete();",
        ]
    );
}

#[test]
fn test_delete_keeps_files_with_soft_delete() {
    let names = names("Product");
    let fields = fields(&["title", "cover_img"]);
    let body = OperationBody::build(Operation::Delete, &ctx(&names, &fields, true));
    assert_eq!(body.work, ["$product->delete();"]);
}

#[test]
fn test_force_delete_removes_files_after_lookup() {
    let names = names("Product");
    let fields = fields(&["title", "cover_img"]);
    let body = OperationBody::build(Operation::ForceDelete, &ctx(&names, &fields, true));
    assert!(body.may_be_missing);
    assert_eq!(
        body.work,
        [
            "$product = Product::onlyTrashed()->findOrFail($id);",
            "$this->deleteFile($product->cover_img);",
            "$product->forceDelete();",
        ]
    );
    assert_eq!(body.response, "$this->successResponse(null, 'Product Deleted Permanently')");
}

#[test]
fn test_list_uses_configured_page_size() {
    let names = names("Category");
    let fields = fields(&["name"]);
    let mut context = ctx(&names, &fields, true);
    context.per_page = 25;
    context.per_page_param = "limit";
    let list = OperationBody::build(Operation::List, &context);
    assert_eq!(list.prelude, ["$perPage = $request->input('limit', 25);"]);
    assert_eq!(list.work, ["$categories = Category::paginate($perPage);"]);
    let trashed = OperationBody::build(Operation::ListTrashed, &context);
    assert_eq!(
        trashed.work,
        ["$trashedCategories = Category::onlyTrashed()->paginate($perPage);"]
    );
    assert_eq!(
        trashed.response,
        "$this->resourcePaginated(CategoryResource::collection($trashedCategories))"
    );
}

#[test]
fn test_direct_controller() {
    let names = names("Product");
    let fields = fields(&["title", "cover_img"]);
    let sources = generate_handler(&ctx(&names, &fields, false), &DirectCalls);
    assert!(sources.service.is_none());

    let controller = &sources.controller;
    assert_eq!(controller.class_name, "ProductController");
    assert_eq!(controller.traits, ["ApiResponseTrait", "FileStorageTrait"]);
    assert!(!controller
        .imports
        .iter()
        .any(|i| i.ends_with("ModelNotFoundException")));
    assert_eq!(controller.methods.len(), 5);

    let store = method(controller, "store");
    assert!(store.contains("        try {\n"));
    assert!(store.contains("Log::error('Error creating Product: ' . $e->getMessage());"));
    assert!(store.contains("return $this->errorResponse(null, 'there is something wrong in server', 500);"));
    assert!(!store.contains("ModelNotFoundException"));

    let show = method(controller, "show");
    assert!(show.contains("public function show(Product $product)"));
    assert!(!show.contains("try {"));

    let destroy = method(controller, "destroy");
    let delete_file = destroy.find("$this->deleteFile($product->cover_img);").unwrap();
    let delete_record = destroy.find("$product->delete();").unwrap();
    assert!(delete_file < delete_record);
}

#[test]
fn test_direct_controller_soft_delete_trio() {
    let names = names("Product");
    let fields = fields(&["title", "cover_img"]);
    let sources = generate_handler(&ctx(&names, &fields, true), &DirectCalls);
    let controller = &sources.controller;
    assert_eq!(controller.methods.len(), 8);
    assert!(controller
        .imports
        .contains(&"Illuminate\\Database\\Eloquent\\ModelNotFoundException".to_string()));

    let restore = method(controller, "restore");
    assert!(restore.contains("} catch (ModelNotFoundException $e) {"));
    assert!(restore.contains("return $this->errorResponse(null, 'Product not found', 404);"));
    assert!(restore.contains("'Product Restored Successfully'"));

    assert!(!method(controller, "destroy").contains("deleteFile"));
    assert!(method(controller, "forceDelete").contains("$this->deleteFile($product->cover_img);"));
}

#[test]
fn test_plain_model_skips_storage_trait() {
    let names = names("Tag");
    let fields = fields(&["label"]);
    let sources = generate_handler(&ctx(&names, &fields, false), &DirectCalls);
    assert_eq!(sources.controller.traits, ["ApiResponseTrait"]);
}

#[test]
fn test_service_mode_controller_delegates() {
    let names = names("Product");
    let fields = fields(&["title", "cover_img"]);
    let sources = generate_handler(&ctx(&names, &fields, true), &ServiceCalls);
    let controller = &sources.controller;
    assert!(controller.members.contains("protected ProductService $productService;"));
    assert!(controller
        .members
        .contains("public function __construct(ProductService $productService)"));
    assert!(controller.imports.contains(&"App\\Services\\ProductService".to_string()));

    let store = method(controller, "store");
    assert!(store.contains("$product = $this->productService->createProduct($fieldInputs);"));
    assert!(!store.contains("try {"));
    assert!(!store.contains("storeFile"));

    let destroy = method(controller, "destroy");
    assert!(destroy.contains("$this->productService->deleteProduct($product);"));

    let restore = method(controller, "restore");
    assert!(restore.contains("$product = $this->productService->restoreProduct($id);"));
}

#[test]
fn test_service_owns_persistence_and_throws_envelopes() {
    let names = names("Product");
    let fields = fields(&["title", "cover_img"]);
    let sources = generate_handler(&ctx(&names, &fields, true), &ServiceCalls);
    let service = sources.service.unwrap();
    assert_eq!(service.class_name, "ProductService");
    assert_eq!(service.namespace, "App\\Services");
    assert!(service.extends.is_none());
    assert_eq!(service.methods.len(), 8);

    let create = method(&service, "createProduct");
    assert!(create.contains("public function createProduct(array $fieldInputs)"));
    assert!(create.contains("$this->storeFile($fieldInputs['cover_img'] ?? null, 'Product', 'image')"));
    assert!(create.contains("return $product;"));
    assert!(create.contains(
        "throw new HttpResponseException($this->errorResponse(null, 'there is something wrong in server', 500));"
    ));

    let force = method(&service, "forceDeleteProduct");
    assert!(force.contains(
        "throw new HttpResponseException($this->errorResponse(null, 'Product not found', 404));"
    ));
    assert!(!force.contains("return $product;"));

    let get = method(&service, "getProduct");
    assert!(get.contains("return $product;"));
    assert!(!get.contains("try {"));
}

#[test]
fn test_modes_share_operation_semantics() {
    let names = names("Product");
    let fields = fields(&["title", "cover_img"]);
    let context = ctx(&names, &fields, false);
    let direct = generate_handler(&context, &DirectCalls).controller;
    let service = generate_handler(&context, &ServiceCalls).service.unwrap();
    for op in Operation::for_model(false) {
        let body = OperationBody::build(op, &context);
        let direct_method = method(&direct, op.action());
        let service_method = method(&service, &op.service_method("Product"));
        for line in &body.work {
            assert!(direct_method.contains(line.trim()), "{op}: {line}");
            assert!(service_method.contains(line.trim()), "{op}: {line}");
        }
    }
}
