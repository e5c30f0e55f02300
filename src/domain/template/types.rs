//! Template types and error definitions

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::engine::{PlaceholderStyle, ValueMap};

/// Name given to templates created without one
pub const DEFAULT_TEMPLATE_NAME: &str = "New Template";

/// Suffix appended to the name of a duplicated template
pub const DUPLICATE_SUFFIX: &str = " (copy)";

/// Template-specific error type
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template name must not be blank")]
    BlankName,
}

/// Result type for template operations
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Current time as Unix epoch milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// A named text template
///
/// Serialized with camelCase keys so exported files stay compatible with
/// existing template collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateItem {
    /// Unique template identifier
    pub id: String,

    /// Human-readable template name
    pub name: String,

    /// Template text with {{variable}} placeholders
    pub content: String,

    /// Creation timestamp (epoch millis)
    pub created_at: i64,

    /// Last update timestamp (epoch millis)
    pub updated_at: i64,
}

impl TemplateItem {
    /// Create an item stamped with `now` for both timestamps
    pub fn new(id: String, name: String, content: String, now: i64) -> Self {
        Self {
            id,
            name,
            content,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Trim a user-supplied name, rejecting one that is blank
pub fn normalize_name(name: &str) -> TemplateResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TemplateError::BlankName);
    }
    Ok(trimmed.to_string())
}

/// Request to create a new template
#[derive(Debug, Default, Deserialize)]
pub struct CreateTemplateRequest {
    /// Template name (defaults to "New Template")
    pub name: Option<String>,

    /// Template text (defaults to empty)
    pub content: Option<String>,
}

/// Request to update an existing template
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTemplateRequest {
    /// New name (optional)
    pub name: Option<String>,

    /// New content (optional)
    pub content: Option<String>,
}

impl UpdateTemplateRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.content.is_none()
    }
}

/// Query parameters for listing templates
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive substring of the template name
    pub q: Option<String>,
}

/// Response for listing templates
#[derive(Debug, Serialize)]
pub struct TemplateListResponse {
    /// Templates, newest first
    pub templates: Vec<TemplateItem>,

    /// Total count
    pub total: usize,
}

/// Request to render a stored template
#[derive(Debug, Default, Deserialize)]
pub struct RenderRequest {
    /// Values to use; stored drafts fill in anything missing
    #[serde(default)]
    pub values: Option<ValueMap>,

    /// Placeholder style (defaults to the configured one)
    #[serde(default)]
    pub placeholder_style: Option<PlaceholderStyle>,
}

/// Request to render ad-hoc content
#[derive(Debug, Deserialize)]
pub struct RenderContentRequest {
    pub content: String,

    #[serde(default)]
    pub values: ValueMap,

    #[serde(default)]
    pub placeholder_style: Option<PlaceholderStyle>,
}

/// Request to extract variables from ad-hoc content
#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub content: String,
}

/// Request to set draft values for a stored template
#[derive(Debug, Deserialize)]
pub struct SetValuesRequest {
    pub values: ValueMap,
}

/// Variables of a template together with its synced draft values
#[derive(Debug, Serialize)]
pub struct VariablesResponse {
    pub vars: Vec<String>,
    pub invalid: Vec<String>,
    pub values: ValueMap,
}

/// Output of a render
#[derive(Debug, Clone, Serialize)]
pub struct RenderedTemplate {
    /// Final text
    pub rendered: String,

    /// Variables found in the template
    pub vars: Vec<String>,

    /// Malformed tokens found in the template
    pub invalid: Vec<String>,

    /// Values reconciled against `vars`
    pub values: ValueMap,

    /// Placeholder style that was applied
    pub placeholder_style: PlaceholderStyle,
}

/// Response for an import
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    /// Number of imported templates
    pub imported: usize,

    /// The imported templates as stored
    pub templates: Vec<TemplateItem>,
}
