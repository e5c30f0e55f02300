//! Storage backend factory

use std::sync::Arc;

use crate::infrastructure::config::{RedisConfig, StorageConfig};
use crate::infrastructure::redis::pool::RedisPool;

use super::backend::TemplateRepository;
use super::memory_backend::MemoryTemplateRepository;
use super::redis_backend::RedisTemplateRepository;

/// Create a storage backend based on configuration.
///
/// - `"redis"`: a `RedisTemplateRepository`, or memory if the pool cannot be built
/// - `"memory"` (default): a `MemoryTemplateRepository`
pub fn create_template_repository(
    settings: &StorageConfig,
    redis: &RedisConfig,
) -> Arc<dyn TemplateRepository> {
    match settings.backend.as_str() {
        "redis" => match RedisPool::new(redis.clone()) {
            Ok(pool) => {
                tracing::info!(
                    backend = "redis",
                    key = %settings.key,
                    "Creating Redis template storage"
                );
                Arc::new(RedisTemplateRepository::new(
                    Arc::new(pool),
                    settings.key.clone(),
                ))
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Redis storage requested but pool could not be created, falling back to memory"
                );
                Arc::new(MemoryTemplateRepository::new())
            }
        },
        _ => {
            tracing::info!(backend = "memory", "Creating memory template storage");
            Arc::new(MemoryTemplateRepository::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_backend_is_memory() {
        let repo = create_template_repository(&StorageConfig::default(), &RedisConfig::default());
        assert_eq!(repo.backend_type(), "memory");
    }

    #[test]
    fn test_redis_backend_selected() {
        let settings = StorageConfig {
            backend: "redis".to_string(),
            ..Default::default()
        };
        let repo = create_template_repository(&settings, &RedisConfig::default());
        assert_eq!(repo.backend_type(), "redis");
    }

    #[test]
    fn test_bad_redis_url_falls_back() {
        let settings = StorageConfig {
            backend: "redis".to_string(),
            ..Default::default()
        };
        let redis = RedisConfig {
            url: "not-a-url".to_string(),
        };
        let repo = create_template_repository(&settings, &redis);
        assert_eq!(repo.backend_type(), "memory");
    }
}
