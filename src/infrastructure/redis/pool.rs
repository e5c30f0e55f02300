//! Redis connection pool for persistent storage backends.

use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client, RedisError, RedisResult};
use tokio::sync::RwLock;

use crate::infrastructure::config::RedisConfig;

/// Error type for Redis pool operations.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    /// Redis operation failed
    #[error("Redis error: {0}")]
    Redis(#[from] RedisError),

    /// Connection not available
    #[error("Connection not available: {0}")]
    ConnectionUnavailable(String),
}

/// Redis connection pool for data operations.
///
/// Holds a single multiplexed connection shared across tasks. The connection
/// is established on first use and dropped after connection-level failures
/// so the next call reconnects.
pub struct RedisPool {
    /// Redis client for creating connections
    client: Client,

    /// Multiplexed connection (shared across tasks)
    connection: RwLock<Option<MultiplexedConnection>>,

    /// Configuration
    config: RedisConfig,
}

impl RedisPool {
    /// Create a new Redis pool. Does not connect.
    pub fn new(config: RedisConfig) -> Result<Self, PoolError> {
        let client = Client::open(config.url.as_str())?;

        Ok(Self {
            client,
            connection: RwLock::new(None),
            config,
        })
    }

    /// Get a connection, establishing one if none exists.
    pub async fn get_connection(&self) -> Result<MultiplexedConnection, PoolError> {
        {
            let conn = self.connection.read().await;
            if let Some(ref c) = *conn {
                return Ok(c.clone());
            }
        }

        self.connect().await
    }

    async fn connect(&self) -> Result<MultiplexedConnection, PoolError> {
        let mut conn_guard = self.connection.write().await;

        // Another task may have connected while we waited
        if let Some(ref c) = *conn_guard {
            return Ok(c.clone());
        }

        match self.client.get_multiplexed_tokio_connection().await {
            Ok(conn) => {
                *conn_guard = Some(conn.clone());
                tracing::info!("Redis pool connection established");
                Ok(conn)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to connect to Redis");
                Err(PoolError::ConnectionUnavailable(e.to_string()))
            }
        }
    }

    /// Run a command, dropping the cached connection on connection errors.
    pub async fn execute<F, T, Fut>(&self, f: F) -> Result<T, PoolError>
    where
        F: FnOnce(MultiplexedConnection) -> Fut,
        Fut: std::future::Future<Output = RedisResult<T>>,
    {
        let conn = self.get_connection().await?;

        match f(conn).await {
            Ok(result) => Ok(result),
            Err(e) => {
                if e.is_connection_dropped() || e.is_io_error() {
                    let mut conn_guard = self.connection.write().await;
                    *conn_guard = None;
                }
                Err(PoolError::Redis(e))
            }
        }
    }

    /// Get the Redis URL (for debugging).
    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Ping Redis to check connectivity.
    pub async fn ping(&self) -> Result<(), PoolError> {
        self.execute(|mut conn| async move {
            let _: String = redis::cmd("PING").query_async(&mut conn).await?;
            Ok(())
        })
        .await
    }
}

/// Typed helpers for the Redis commands used by storage backends.
#[async_trait::async_trait]
pub trait RedisPoolExt {
    /// GET a string value.
    async fn get_string(&self, key: &str) -> Result<Option<String>, PoolError>;

    /// SET a string value.
    async fn set_string(&self, key: &str, value: &str) -> Result<(), PoolError>;
}

#[async_trait::async_trait]
impl RedisPoolExt for RedisPool {
    async fn get_string(&self, key: &str) -> Result<Option<String>, PoolError> {
        let key = key.to_string();
        self.execute(|mut conn| async move { conn.get::<_, Option<String>>(key).await })
            .await
    }

    async fn set_string(&self, key: &str, value: &str) -> Result<(), PoolError> {
        let key = key.to_string();
        let value = value.to_string();
        self.execute(|mut conn| async move { conn.set::<_, _, ()>(key, value).await })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_creation_does_not_connect() {
        let pool = RedisPool::new(RedisConfig::default()).unwrap();
        assert_eq!(pool.url(), "redis://localhost:6379");
    }

    #[test]
    fn test_pool_rejects_invalid_url() {
        let config = RedisConfig {
            url: "not-a-url".to_string(),
        };
        assert!(matches!(RedisPool::new(config), Err(PoolError::Redis(_))));
    }
}
