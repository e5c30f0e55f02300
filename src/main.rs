use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::broadcast;

use text_template_service::config::Settings;
use text_template_service::metrics::TemplateMetrics;
use text_template_service::server::{create_app, AppState};
use text_template_service::storage::{create_template_repository, TemplateRepository};
use text_template_service::tasks::{autosave_channel, AutosaveTask};
use text_template_service::telemetry::init_telemetry;
use text_template_service::template::create_template_store;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let settings = Settings::new()?;

    // Initialize tracing
    let _telemetry = init_telemetry(&settings.otel)?;
    tracing::info!("Configuration loaded");

    // Load persisted templates
    let repository = create_template_repository(&settings.storage, &settings.redis);
    let templates = repository
        .load()
        .await
        .context("Failed to load templates from storage")?;
    tracing::info!(
        backend = repository.backend_type(),
        count = templates.len(),
        "Templates loaded"
    );

    let store = create_template_store(templates);
    TemplateMetrics::set_count(store.count());

    // Start autosave task in background
    let (shutdown_tx, _) = broadcast::channel::<()>(1);
    let (autosave, requests) = autosave_channel();
    let autosave_task = AutosaveTask::new(
        &settings.autosave,
        store.clone(),
        repository.clone(),
        requests,
        shutdown_tx.subscribe(),
    );
    let autosave_handle = tokio::spawn(autosave_task.run());

    // Create Axum app
    let addr = settings.server_addr();
    let state = AppState::new(settings, store, repository, autosave);
    let app = create_app(state);

    // Start server
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal_handler())
        .await?;

    // In-flight requests are drained; stop the autosave task after its final flush
    let _ = shutdown_tx.send(());
    tracing::info!("Waiting for background tasks to finish...");
    if let Err(e) = autosave_handle.await {
        tracing::error!(error = %e, "Autosave task panicked");
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal_handler() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}
