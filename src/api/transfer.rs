//! Import/export endpoints.

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use crate::error::{AppError, Result};
use crate::metrics::TemplateMetrics;
use crate::server::AppState;
use crate::template::{export_templates, now_millis, ImportResponse};

/// GET /api/v1/templates/export - Download all templates as JSON
#[tracing::instrument(name = "http.export_templates", skip(state))]
pub async fn export(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let templates = state.template_store.list();
    let json = export_templates(&templates)?;
    let disposition = format!(
        "attachment; filename=\"templates-{}.json\"",
        Utc::now().format("%Y-%m-%d")
    );

    tracing::info!(count = templates.len(), "Templates exported");
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        json,
    ))
}

/// POST /api/v1/templates/import - Import templates from exported JSON
///
/// The body is the raw JSON text. Nothing is applied unless the whole
/// payload validates.
#[tracing::instrument(name = "http.import_templates", skip(state, body), fields(bytes = body.len()))]
pub async fn import(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ImportResponse>> {
    if body.trim().is_empty() {
        TemplateMetrics::record_import_rejected();
        return Err(AppError::EmptyImport);
    }

    let imported = match state.template_store.import(&body, now_millis()) {
        Ok(imported) => imported,
        Err(e) => {
            TemplateMetrics::record_import_rejected();
            return Err(e.into());
        }
    };

    for template in &imported {
        state.sync_draft(template);
    }
    state.autosave.save_now();

    TemplateMetrics::record_import_ok();
    TemplateMetrics::set_count(state.template_store.count());
    tracing::info!(imported = imported.len(), "Templates imported");

    Ok(Json(ImportResponse {
        imported: imported.len(),
        templates: imported,
    }))
}
