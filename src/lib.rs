// Infrastructure layer (shared components)
pub mod infrastructure;

// Re-export infrastructure modules at the crate root
pub use infrastructure::config;
pub use infrastructure::error;
pub use infrastructure::metrics;

// Domain layer (business logic)
pub mod domain;
pub use domain::storage;
pub use domain::template;

// Application layer
pub mod api;
pub mod server;

// Supporting modules
pub mod tasks;
pub mod telemetry;
