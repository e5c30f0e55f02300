//! Template persistence.
//!
//! # Backend Architecture
//!
//! - `MemoryTemplateRepository`: process-local storage (default)
//! - `RedisTemplateRepository`: persistent storage in a single Redis key
//!
//! Use `create_template_repository()` to pick one from configuration.

mod backend;
mod factory;
mod memory_backend;
mod redis_backend;

pub use backend::{StorageError, TemplateRepository};
pub use factory::create_template_repository;
pub use memory_backend::MemoryTemplateRepository;
pub use redis_backend::RedisTemplateRepository;
