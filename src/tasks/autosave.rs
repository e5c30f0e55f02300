use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::time::Instant;

use crate::config::AutosaveConfig;
use crate::domain::storage::TemplateRepository;
use crate::domain::template::TemplateStore;
use crate::metrics::{StorageMetrics, TemplateMetrics};

/// Kind of save a store mutation asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveRequest {
    /// Write after the debounce window has passed without further requests
    Debounced,
    /// Write now
    Immediate,
}

/// Cloneable handle used by request handlers to ask for a save
#[derive(Clone)]
pub struct AutosaveHandle {
    tx: mpsc::UnboundedSender<SaveRequest>,
}

impl AutosaveHandle {
    /// Schedule a debounced save (content and name edits)
    pub fn schedule(&self) {
        self.send(SaveRequest::Debounced);
    }

    /// Save right away (create, duplicate, delete, import)
    pub fn save_now(&self) {
        self.send(SaveRequest::Immediate);
    }

    fn send(&self, request: SaveRequest) {
        if self.tx.send(request).is_err() {
            tracing::warn!(?request, "Autosave task is not running, change not persisted");
        }
    }
}

/// Create the handle/receiver pair connecting handlers to the autosave task
pub fn autosave_channel() -> (AutosaveHandle, mpsc::UnboundedReceiver<SaveRequest>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (AutosaveHandle { tx }, rx)
}

/// Background task writing the template list to storage
pub struct AutosaveTask {
    debounce: Duration,
    store: Arc<TemplateStore>,
    repository: Arc<dyn TemplateRepository>,
    requests: mpsc::UnboundedReceiver<SaveRequest>,
    shutdown: broadcast::Receiver<()>,
}

impl AutosaveTask {
    pub fn new(
        config: &AutosaveConfig,
        store: Arc<TemplateStore>,
        repository: Arc<dyn TemplateRepository>,
        requests: mpsc::UnboundedReceiver<SaveRequest>,
        shutdown: broadcast::Receiver<()>,
    ) -> Self {
        Self {
            debounce: Duration::from_millis(config.debounce_ms),
            store,
            repository,
            requests,
            shutdown,
        }
    }

    /// Run until shutdown, flushing any pending save before returning
    pub async fn run(mut self) {
        let mut deadline: Option<Instant> = None;

        tracing::info!(
            debounce_ms = self.debounce.as_millis() as u64,
            backend = self.repository.backend_type(),
            "Autosave task started"
        );

        loop {
            // Queued requests are handled before the shutdown signal
            tokio::select! {
                biased;

                request = self.requests.recv() => match request {
                    Some(SaveRequest::Debounced) => {
                        deadline = Some(Instant::now() + self.debounce);
                    }
                    Some(SaveRequest::Immediate) => {
                        deadline = None;
                        self.flush().await;
                    }
                    None => break,
                },
                _ = wait_until(deadline) => {
                    deadline = None;
                    self.flush().await;
                }
                _ = self.shutdown.recv() => {
                    tracing::info!("Autosave task received shutdown signal");
                    break;
                }
            }
        }

        let mut pending = deadline.is_some();
        while self.requests.try_recv().is_ok() {
            pending = true;
        }
        if pending {
            self.flush().await;
        }

        tracing::info!("Autosave task stopped");
    }

    async fn flush(&self) {
        let templates = self.store.list();
        TemplateMetrics::set_count(templates.len());

        match self.repository.save(&templates).await {
            Ok(()) => {
                StorageMetrics::record("save", true);
                tracing::debug!(count = templates.len(), "Templates saved");
            }
            Err(e) => {
                StorageMetrics::record("save", false);
                tracing::error!(
                    error = %e,
                    count = templates.len(),
                    "Failed to save templates, will retry on next change"
                );
            }
        }
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
