//! Backend trait for template persistence.
//!
//! The whole template list is stored as one JSON document under a single
//! key, so backends only need to get and set a string.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::template::TemplateItem;
use crate::infrastructure::redis::pool::PoolError;

/// Errors that can occur during storage backend operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Redis operation failed
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend is temporarily unavailable
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

impl From<PoolError> for StorageError {
    fn from(err: PoolError) -> Self {
        match err {
            PoolError::Redis(e) => StorageError::Redis(e),
            PoolError::ConnectionUnavailable(msg) => StorageError::Unavailable(msg),
        }
    }
}

/// Key-value persistence of the template list.
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// Backend type identifier
    fn backend_type(&self) -> &'static str;

    /// Read the stored document, `None` when nothing was saved yet
    async fn get_raw(&self) -> Result<Option<String>, StorageError>;

    /// Replace the stored document
    async fn set_raw(&self, payload: String) -> Result<(), StorageError>;

    /// Check that the backend is reachable
    async fn ping(&self) -> Result<(), StorageError> {
        Ok(())
    }

    /// Load all templates.
    ///
    /// A stored document that is not a valid template list is logged and
    /// treated as empty; backend failures are returned.
    async fn load(&self) -> Result<Vec<TemplateItem>, StorageError> {
        let Some(raw) = self.get_raw().await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<TemplateItem>>(&raw) {
            Ok(templates) => Ok(templates),
            Err(e) => {
                tracing::error!(
                    backend = self.backend_type(),
                    error = %e,
                    "Invalid templates data in storage, starting empty"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Save all templates
    async fn save(&self, templates: &[TemplateItem]) -> Result<(), StorageError> {
        let payload = serde_json::to_string(templates)?;
        self.set_raw(payload).await
    }
}
