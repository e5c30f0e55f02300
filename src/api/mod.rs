//! API layer - HTTP endpoint handlers organized by concern.

mod health;
mod metrics;
mod render;
mod routes;
mod template;
mod transfer;

pub use health::{health, stats};
pub use metrics::prometheus_metrics;
pub use routes::api_routes;
