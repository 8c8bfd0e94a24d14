//! Askama templates for every generated artifact
//!
//! Templates live in `templates/` at the crate root. Decision logic stays in Rust;
//! templates only lay out pre-computed names, rule strings and method bodies.

use askama::Template;

use super::handler::ClassSource;
use super::transformer::Projection;
use crate::error::GenerateError;
use crate::media::MediaTable;

/// Template data for a controller or service class
#[derive(Template)]
#[template(path = "class.php.txt", escape = "none")]
pub struct ClassTemplateData {
    pub namespace: String,
    pub imports: Vec<String>,
    pub class_name: String,
    /// ` extends Controller` or empty
    pub extends_clause: String,
    /// Comma-separated trait list
    pub traits: String,
    pub members: String,
    pub methods: Vec<String>,
}

impl From<&ClassSource> for ClassTemplateData {
    fn from(source: &ClassSource) -> Self {
        ClassTemplateData {
            namespace: source.namespace.clone(),
            imports: source.imports.clone(),
            class_name: source.class_name.clone(),
            extends_clause: source
                .extends
                .as_ref()
                .map(|parent| format!(" extends {parent}"))
                .unwrap_or_default(),
            traits: source.traits.join(", "),
            members: source.members.clone(),
            methods: source.methods.clone(),
        }
    }
}

/// Template data for the read-model transformer
#[derive(Template)]
#[template(path = "resource.php.txt", escape = "none")]
pub struct ResourceTemplateData {
    pub namespace: String,
    pub class_name: String,
    pub fields: Vec<Projection>,
}

/// One entry of a form request's `rules()` array
#[derive(Debug, Clone)]
pub struct RuleLine {
    /// Quoted column name
    pub key: String,
    /// Rule expression
    pub rule: String,
}

/// Template data for a store or update form request
#[derive(Template)]
#[template(path = "form_request.php.txt", escape = "none")]
pub struct FormRequestTemplateData {
    pub namespace: String,
    pub class_name: String,
    /// Fully qualified `ApiResponseTrait`
    pub response_trait: String,
    /// `store` or `update`
    pub purpose: String,
    pub rules: Vec<RuleLine>,
}

/// Template data for the appended route block
#[derive(Template)]
#[template(path = "routes.php.txt", escape = "none")]
pub struct RoutesTemplateData {
    pub model: String,
    pub lines: Vec<String>,
}

/// Template for the response envelope trait
#[derive(Template)]
#[template(path = "api_response_trait.php.txt", escape = "none")]
pub struct ApiResponseTraitTemplateData {
    pub namespace: String,
}

/// Allow-list of one media subtype, rendered as PHP array items
#[derive(Debug, Clone)]
pub struct AllowList {
    pub subtype: String,
    pub extensions: String,
    pub mime_types: String,
}

/// Template for the file storage trait
#[derive(Template)]
#[template(path = "file_storage_trait.php.txt", escape = "none")]
pub struct FileStorageTraitTemplateData {
    pub namespace: String,
    pub allow_lists: Vec<AllowList>,
}

impl FileStorageTraitTemplateData {
    /// Allow-lists rendered from the same table the validation rules use
    pub fn new(namespace: String, media: &MediaTable) -> Self {
        let list = |items: &[String]| {
            items
                .iter()
                .map(|item| format!("'{item}'"))
                .collect::<Vec<_>>()
                .join(", ")
        };
        FileStorageTraitTemplateData {
            namespace,
            allow_lists: media
                .rules()
                .iter()
                .map(|rule| AllowList {
                    subtype: rule.subtype.as_str().to_string(),
                    extensions: list(&rule.extensions),
                    mime_types: list(&rule.mime_types),
                })
                .collect(),
        }
    }
}

/// Render a template, mapping failures to [`GenerateError::Render`]
///
/// The result always ends with exactly one newline.
pub fn render(template: &impl Template, artifact: &'static str) -> Result<String, GenerateError> {
    let rendered = template.render().map_err(|e| GenerateError::Render {
        artifact,
        message: e.to_string(),
    })?;
    let mut content = rendered.trim_end().to_string();
    content.push('\n');
    Ok(content)
}
