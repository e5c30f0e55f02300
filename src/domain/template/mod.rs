//! Text template system.
//!
//! This module provides:
//! - The template engine: variable extraction, value synchronization and
//!   rendering of `{{variable}}` placeholders
//! - In-memory template storage with CRUD operations
//! - Per-template value drafts kept in sync with template content
//! - JSON import/export of template collections
//!
//! # Example
//!
//! ```ignore
//! let store = TemplateStore::new();
//! let drafts = ValueDrafts::new();
//!
//! let template = store.create(CreateTemplateRequest {
//!     name: Some("Welcome".to_string()),
//!     content: Some("Hola {{nombre}}, bienvenido a {{empresa}}".to_string()),
//! })?;
//!
//! drafts.set_values(&template, HashMap::from([("nombre".into(), "Juan".into())]));
//!
//! let rendered = drafts.render(&template, None, PlaceholderStyle::Brackets);
//! assert_eq!(rendered.rendered, "Hola Juan, bienvenido a [empresa]");
//! ```

mod drafts;
pub mod engine;
mod store;
mod transfer;
mod types;

pub use drafts::{preview, ValueDrafts};
pub use engine::{
    extract_variables, is_valid_variable_name, render_template, sync_values, Extraction,
    PlaceholderStyle, RenderOptions, ValueMap,
};
pub use store::{create_template_store, TemplateStore};
pub use transfer::{export_templates, generate_id, import_templates, TransferError};
pub use types::{
    normalize_name, now_millis, CreateTemplateRequest, ExtractRequest, ImportResponse,
    ListQuery, RenderContentRequest,
    RenderRequest, RenderedTemplate, SetValuesRequest, TemplateError, TemplateItem,
    TemplateListResponse, TemplateResult, UpdateTemplateRequest, VariablesResponse,
    DEFAULT_TEMPLATE_NAME, DUPLICATE_SUFFIX,
};
