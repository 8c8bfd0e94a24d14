#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::config::GeneratorConfig;
use crate::model::{ModelName, ModelSpec};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("autocrud_gen_test_{}_{}", std::process::id(), nanos));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn spec(generator: &Generator, model: &str, columns: &[&str]) -> ModelSpec {
    ModelSpec::detect(
        ModelName::parse(model).unwrap(),
        columns.iter().map(|c| c.to_string()).collect(),
        generator.classifier(),
    )
}

fn plan_for(model: &str, columns: &[&str], options: GenerationOptions) -> ArtifactPlan {
    let generator = Generator::default();
    let classified = generator.classify(&spec(&generator, model, columns));
    generator.plan(&classified, options).unwrap()
}

fn content(plan: &ArtifactPlan, target: ArtifactTarget) -> &str {
    &plan.get(target).unwrap().content
}

const PRODUCT: &[&str] = &["id", "title", "cover_img", "created_at", "updated_at"];
const SOFT_PRODUCT: &[&str] = &["id", "title", "cover_img", "created_at", "updated_at", "deleted_at"];

#[test]
fn test_plan_paths_and_policies() {
    let plan = plan_for("Product", PRODUCT, GenerationOptions::default());
    let paths: Vec<_> = plan
        .iter()
        .map(|a| (a.target, a.path.to_string_lossy().into_owned(), a.policy))
        .collect();
    assert_eq!(
        paths,
        [
            (
                ArtifactTarget::Transformer,
                "app/Http/Resources/ProductResource.php".to_string(),
                WritePolicy::CreateIfAbsent
            ),
            (
                ArtifactTarget::StoreRequest,
                "app/Http/Requests/ProductRequest/StoreProductRequest.php".to_string(),
                WritePolicy::CreateIfAbsent
            ),
            (
                ArtifactTarget::UpdateRequest,
                "app/Http/Requests/ProductRequest/UpdateProductRequest.php".to_string(),
                WritePolicy::CreateIfAbsent
            ),
            (
                ArtifactTarget::Controller,
                "app/Http/Controllers/ProductController.php".to_string(),
                WritePolicy::CreateIfAbsent
            ),
            (
                ArtifactTarget::Routes,
                "routes/api.php".to_string(),
                WritePolicy::AppendAlways
            ),
        ]
    );
}

#[test]
fn test_product_create_rules() {
    let plan = plan_for("Product", PRODUCT, GenerationOptions::default());
    let store = content(&plan, ArtifactTarget::StoreRequest);
    assert!(store.contains("namespace App\\Http\\Requests\\ProductRequest;"));
    assert!(store.contains("class StoreProductRequest extends FormRequest"));
    assert!(store.contains("use App\\Traits\\ApiResponseTrait;"));
    assert!(store.contains("            'title' => ['required'],\n"));
    assert!(store.contains(
        "'cover_img' => 'required|file|image|mimes:png,jpg,jpeg,gif|max:10000|mimetypes:image/jpeg,image/png,image/jpg,image/gif',"
    ));
    for omitted in ["'id'", "'created_at'", "'updated_at'"] {
        assert!(!store.contains(omitted), "{omitted} in create rules");
    }
}

#[test]
fn test_product_update_rules_nullable() {
    let plan = plan_for("Product", PRODUCT, GenerationOptions::default());
    let update = content(&plan, ArtifactTarget::UpdateRequest);
    assert!(update.contains("'title' => ['nullable'],"));
    assert!(update.contains("'cover_img' => 'nullable|file|image|"));
    assert!(!update.contains("required"));
}

#[test]
fn test_product_resource_projection() {
    let plan = plan_for("Product", PRODUCT, GenerationOptions::default());
    let resource = content(&plan, ArtifactTarget::Transformer);
    assert!(resource.contains("class ProductResource extends JsonResource"));
    assert!(resource.contains("'id' => $this->id,"));
    assert!(resource.contains("'title' => $this->title,"));
    assert!(resource.contains("'cover_img' => $this->cover_img ? asset($this->cover_img) : null,"));
    assert!(!resource.contains("created_at"));
}

#[test]
fn test_product_delete_removes_file_before_record() {
    let plan = plan_for("Product", PRODUCT, GenerationOptions::default());
    let controller = content(&plan, ArtifactTarget::Controller);
    let delete_file = controller.find("$this->deleteFile($product->cover_img);").unwrap();
    let delete_record = controller.find("$product->delete();").unwrap();
    assert!(delete_file < delete_record);
    assert!(!controller.contains("forceDelete"));

    let routes = content(&plan, ArtifactTarget::Routes);
    assert!(routes.contains("Route::apiResource('products', App\\Http\\Controllers\\ProductController::class);"));
    assert!(!routes.contains("trashed"));
}

#[test]
fn test_soft_delete_product() {
    let plan = plan_for("Product", SOFT_PRODUCT, GenerationOptions::default());
    let controller = content(&plan, ArtifactTarget::Controller);

    let destroy_start = controller.find("public function destroy(").unwrap();
    let destroy_end = controller[destroy_start..].find("public function trashed(").unwrap();
    assert!(!controller[destroy_start..destroy_start + destroy_end].contains("deleteFile"));

    let force = &controller[controller.find("public function forceDelete(").unwrap()..];
    assert!(force.contains("$this->deleteFile($product->cover_img);"));

    let routes = content(&plan, ArtifactTarget::Routes);
    assert!(routes.contains("'products/trashed'"));
    assert!(routes.contains("'products/{id}/restore'"));
    assert!(routes.contains("'products/{id}/forceDelete'"));
    assert!(routes.find("'products/trashed'").unwrap() < routes.find("apiResource").unwrap());
}

#[test]
fn test_user_sensitive_columns_excluded() {
    let columns = [
        "id",
        "name",
        "email",
        "password",
        "email_verified_at",
        "remember_token",
        "avatar_img",
        "created_at",
        "updated_at",
    ];
    let plan = plan_for("User", &columns, GenerationOptions::default());
    for target in [
        ArtifactTarget::Transformer,
        ArtifactTarget::StoreRequest,
        ArtifactTarget::UpdateRequest,
        ArtifactTarget::Controller,
    ] {
        let text = content(&plan, target);
        assert!(!text.contains("password"), "{target} mentions password");
        assert!(!text.contains("email_verified_at"), "{target} mentions email_verified_at");
        assert!(!text.contains("remember_token"), "{target} mentions remember_token");
        assert!(text.contains("name"), "{target} lost name");
    }
}

#[test]
fn test_sensitive_columns_kept_for_other_models() {
    let plan = plan_for("Account", &["id", "password"], GenerationOptions::default());
    assert!(content(&plan, ArtifactTarget::StoreRequest).contains("'password' => ['required'],"));
}

#[test]
fn test_service_mode_adds_service() {
    let options = GenerationOptions {
        use_service_layer: true,
        with_support_traits: false,
    };
    let plan = plan_for("Product", PRODUCT, options);
    let service = plan.get(ArtifactTarget::Service).unwrap();
    assert_eq!(service.path, PathBuf::from("app/Services/ProductService.php"));
    assert!(service.content.contains("namespace App\\Services;"));
    assert!(service.content.contains("class ProductService\n"));
    assert!(content(&plan, ArtifactTarget::Controller).contains("$this->productService->"));
}

#[test]
fn test_support_traits_share_media_table() {
    let options = GenerationOptions {
        use_service_layer: false,
        with_support_traits: true,
    };
    let plan = plan_for("Product", PRODUCT, options);
    let response = plan.get(ArtifactTarget::ResponseTrait).unwrap();
    assert_eq!(response.path, PathBuf::from("app/Traits/ApiResponseTrait.php"));
    assert!(response.content.contains("namespace App\\Traits;"));
    assert!(response.content.contains("public function resourcePaginated("));

    let storage = content(&plan, ArtifactTarget::StorageTrait);
    assert!(storage.contains("'image' => ["));
    assert!(storage.contains("'extensions' => ['png', 'jpg', 'jpeg', 'gif'],"));
    assert!(storage.contains("'document' => ["));
}

#[test]
fn test_routes_block_respects_dedupe_setting() {
    let mut config = GeneratorConfig::default();
    config.routes.dedupe = true;
    let generator = Generator::new(config);
    let classified = generator.classify(&spec(&generator, "Product", PRODUCT));
    let plan = generator.plan(&classified, GenerationOptions::default()).unwrap();
    assert_eq!(
        plan.get(ArtifactTarget::Routes).unwrap().policy,
        WritePolicy::AppendIfMissing
    );
}

#[test]
fn test_orchestrator_stages_and_regeneration() {
    let root = temp_dir();
    let generator = Generator::default();
    let spec = spec(&generator, "Product", PRODUCT);

    let mut orchestrator = Orchestrator::new(&generator, &root);
    assert_eq!(orchestrator.stage(), Stage::Start);
    let first = orchestrator.run(&spec, GenerationOptions::default()).unwrap();
    assert_eq!(orchestrator.stage(), Stage::Done);
    assert_eq!(first.status_of(ArtifactTarget::Controller), Some(EmitStatus::Created));
    assert_eq!(first.status_of(ArtifactTarget::Routes), Some(EmitStatus::Appended));

    let resource_path = root.join("app/Http/Resources/ProductResource.php");
    fs::write(&resource_path, "<?php // edited by hand\n").unwrap();

    let second = Orchestrator::new(&generator, &root)
        .run(&spec, GenerationOptions::default())
        .unwrap();
    assert_eq!(second.status_of(ArtifactTarget::Transformer), Some(EmitStatus::AlreadyExists));
    assert_eq!(second.status_of(ArtifactTarget::Routes), Some(EmitStatus::Appended));
    assert_eq!(fs::read_to_string(&resource_path).unwrap(), "<?php // edited by hand\n");

    let routes = fs::read_to_string(root.join("routes/api.php")).unwrap();
    assert_eq!(routes.matches("Route::apiResource('products'").count(), 2);

    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn test_generate_model_missing_table() {
    let root = temp_dir();
    let generator = Generator::default();
    let source = crate::schema::SchemaFile::from_tables(Default::default());
    let err = generate_model(
        &generator,
        "Product",
        &source,
        &root,
        GenerationOptions::default(),
        false,
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "Table products does not exist.");
    assert!(fs::read_dir(&root).unwrap().next().is_none());
    fs::remove_dir_all(&root).unwrap();
}
