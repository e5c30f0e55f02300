//! Template storage with CRUD operations

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::transfer::{generate_id, import_templates, TransferError};
use super::types::{
    normalize_name, now_millis, CreateTemplateRequest, TemplateError, TemplateItem,
    TemplateResult, UpdateTemplateRequest, DEFAULT_TEMPLATE_NAME, DUPLICATE_SUFFIX,
};

/// In-memory template storage.
///
/// Keeps templates in display order: new, duplicated and imported templates
/// are placed at the front.
pub struct TemplateStore {
    templates: RwLock<Vec<TemplateItem>>,
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateStore {
    /// Create an empty template store
    pub fn new() -> Self {
        Self::with_templates(Vec::new())
    }

    /// Create a store holding previously persisted templates
    pub fn with_templates(templates: Vec<TemplateItem>) -> Self {
        Self {
            templates: RwLock::new(templates),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<TemplateItem>> {
        self.templates.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<TemplateItem>> {
        self.templates.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create a new template at the front of the list
    pub fn create(&self, request: CreateTemplateRequest) -> TemplateResult<TemplateItem> {
        let name = match request.name {
            Some(name) => normalize_name(&name)?,
            None => DEFAULT_TEMPLATE_NAME.to_string(),
        };

        let now = now_millis();
        let template = TemplateItem::new(
            generate_id(now),
            name,
            request.content.unwrap_or_default(),
            now,
        );

        self.write().insert(0, template.clone());
        Ok(template)
    }

    /// Get a template by ID
    pub fn get(&self, id: &str) -> TemplateResult<TemplateItem> {
        self.read()
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| TemplateError::NotFound(id.to_string()))
    }

    /// List all templates in display order
    pub fn list(&self) -> Vec<TemplateItem> {
        self.read().clone()
    }

    /// Templates whose name contains `query`, ignoring case
    pub fn search(&self, query: &str) -> Vec<TemplateItem> {
        let query = query.to_lowercase();
        self.read()
            .iter()
            .filter(|t| t.name.to_lowercase().contains(&query))
            .cloned()
            .collect()
    }

    /// Update name and/or content of an existing template.
    ///
    /// A new name is trimmed and must not be blank.
    pub fn update(&self, id: &str, updates: UpdateTemplateRequest) -> TemplateResult<TemplateItem> {
        let name = updates.name.as_deref().map(normalize_name).transpose()?;

        let mut templates = self.write();
        let template = templates
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TemplateError::NotFound(id.to_string()))?;

        if let Some(name) = name {
            template.name = name;
        }

        if let Some(content) = updates.content {
            template.content = content;
        }

        template.updated_at = now_millis();
        Ok(template.clone())
    }

    /// Copy a template under a fresh ID, placing the copy first
    pub fn duplicate(&self, id: &str) -> TemplateResult<TemplateItem> {
        let mut templates = self.write();
        let source = templates
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| TemplateError::NotFound(id.to_string()))?;

        let now = now_millis();
        let copy = TemplateItem::new(
            generate_id(now),
            format!("{}{}", source.name, DUPLICATE_SUFFIX),
            source.content.clone(),
            now,
        );

        templates.insert(0, copy.clone());
        Ok(copy)
    }

    /// Delete a template by ID
    pub fn delete(&self, id: &str) -> TemplateResult<TemplateItem> {
        let mut templates = self.write();
        let index = templates
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| TemplateError::NotFound(id.to_string()))?;

        Ok(templates.remove(index))
    }

    /// Import an exported collection ahead of the existing templates.
    ///
    /// ID collisions are resolved and the items inserted under one write
    /// lock, so concurrent imports cannot both claim the same ID.
    pub fn import(&self, json: &str, now: i64) -> Result<Vec<TemplateItem>, TransferError> {
        let mut templates = self.write();
        let imported = import_templates(json, &templates, now)?;
        templates.splice(0..0, imported.iter().cloned());
        Ok(imported)
    }

    /// Check if a template exists
    pub fn exists(&self, id: &str) -> bool {
        self.read().iter().any(|t| t.id == id)
    }

    /// Get the number of templates
    pub fn count(&self) -> usize {
        self.read().len()
    }
}

/// Create an Arc-wrapped template store
pub fn create_template_store(templates: Vec<TemplateItem>) -> Arc<TemplateStore> {
    Arc::new(TemplateStore::with_templates(templates))
}
