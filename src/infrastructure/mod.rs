//! Infrastructure layer modules
//!
//! This module contains shared infrastructure components:
//! - `config`: Application configuration and settings
//! - `error`: Unified HTTP error type
//! - `metrics`: Prometheus metrics helpers
//! - `redis`: Redis connection pool

pub mod config;
pub mod error;
pub mod metrics;
pub mod redis;
