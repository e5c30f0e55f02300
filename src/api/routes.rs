use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::server::{api_key_auth, AppState};

use super::health::{health, stats};
use super::metrics::prometheus_metrics;
use super::render::{
    extract, render_content, render_stored, reset_values, set_values, template_variables,
};
use super::template::{
    create_template, delete_template, duplicate_template, get_template, list_templates,
    update_template,
};
use super::transfer::{export, import};

pub fn api_routes(state: AppState) -> Router<AppState> {
    let v1 = Router::new()
        // Collection
        .route("/templates", get(list_templates).post(create_template))
        .route("/templates/export", get(export))
        .route("/templates/import", post(import))
        // Single template
        .route(
            "/templates/{id}",
            get(get_template)
                .patch(update_template)
                .delete(delete_template),
        )
        .route("/templates/{id}/duplicate", post(duplicate_template))
        // Variables & rendering
        .route("/templates/{id}/variables", get(template_variables))
        .route(
            "/templates/{id}/values",
            axum::routing::put(set_values).delete(reset_values),
        )
        .route("/templates/{id}/render", post(render_stored))
        .route("/render", post(render_content))
        .route("/extract", post(extract))
        .route_layer(middleware::from_fn_with_state(state, api_key_auth));

    Router::new()
        // Health & Stats
        .route("/health", get(health))
        .route("/stats", get(stats))
        .route("/metrics", get(prometheus_metrics))
        .nest("/api/v1", v1)
}
