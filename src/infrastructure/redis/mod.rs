//! Redis connectivity
//!
//! - `RedisPool`: lazily connected multiplexed connection for data operations
//! - `RedisPoolExt`: typed helpers for the commands used by storage backends

pub mod pool;

pub use pool::{PoolError, RedisPool, RedisPoolExt};
