//! In-memory storage backend.
//!
//! Keeps the serialized document so it goes through the same encode/decode
//! path as persistent backends. Contents are lost on restart.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::backend::{StorageError, TemplateRepository};

#[derive(Default)]
pub struct MemoryTemplateRepository {
    document: RwLock<Option<String>>,
}

impl MemoryTemplateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend pre-populated with a stored document
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: RwLock::new(Some(document.into())),
        }
    }
}

#[async_trait]
impl TemplateRepository for MemoryTemplateRepository {
    fn backend_type(&self) -> &'static str {
        "memory"
    }

    async fn get_raw(&self) -> Result<Option<String>, StorageError> {
        Ok(self.document.read().await.clone())
    }

    async fn set_raw(&self, payload: String) -> Result<(), StorageError> {
        *self.document.write().await = Some(payload);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::template::TemplateItem;

    #[tokio::test]
    async fn test_load_empty() {
        let repo = MemoryTemplateRepository::new();
        assert!(repo.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let repo = MemoryTemplateRepository::new();
        let items = vec![
            TemplateItem::new("a".into(), "A".into(), "{{x}}".into(), 1),
            TemplateItem::new("b".into(), "B".into(), "".into(), 2),
        ];

        repo.save(&items).await.unwrap();
        assert_eq!(repo.load().await.unwrap(), items);
    }

    #[tokio::test]
    async fn test_load_invalid_document_is_empty() {
        let repo = MemoryTemplateRepository::with_document(r#"[{"id": 1}]"#);
        assert!(repo.load().await.unwrap().is_empty());

        let repo = MemoryTemplateRepository::with_document("not json");
        assert!(repo.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_document_uses_camel_case() {
        let repo = MemoryTemplateRepository::new();
        repo.save(&[TemplateItem::new("a".into(), "A".into(), "".into(), 3)])
            .await
            .unwrap();

        let raw = repo.get_raw().await.unwrap().unwrap();
        assert!(raw.contains("\"createdAt\":3"));
    }
}
