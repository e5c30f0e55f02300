//! Redis storage backend.
//!
//! The template list is stored as a JSON string under a single key.

use std::sync::Arc;

use async_trait::async_trait;

use crate::infrastructure::redis::pool::{RedisPool, RedisPoolExt};

use super::backend::{StorageError, TemplateRepository};

pub struct RedisTemplateRepository {
    /// Redis connection pool
    pool: Arc<RedisPool>,

    /// Key holding the template document
    key: String,
}

impl RedisTemplateRepository {
    pub fn new(pool: Arc<RedisPool>, key: String) -> Self {
        Self { pool, key }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

#[async_trait]
impl TemplateRepository for RedisTemplateRepository {
    fn backend_type(&self) -> &'static str {
        "redis"
    }

    async fn get_raw(&self) -> Result<Option<String>, StorageError> {
        let document = self.pool.get_string(&self.key).await?;
        tracing::debug!(
            key = %self.key,
            found = document.is_some(),
            "Loaded template document from Redis"
        );
        Ok(document)
    }

    async fn set_raw(&self, payload: String) -> Result<(), StorageError> {
        let bytes = payload.len();
        self.pool.set_string(&self.key, &payload).await?;
        tracing::debug!(key = %self.key, bytes, "Saved template document to Redis");
        Ok(())
    }

    async fn ping(&self) -> Result<(), StorageError> {
        self.pool.ping().await?;
        Ok(())
    }
}
