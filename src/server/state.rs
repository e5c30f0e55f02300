use std::sync::Arc;
use std::time::Instant;

use crate::config::Settings;
use crate::domain::storage::TemplateRepository;
use crate::domain::template::{
    PlaceholderStyle, TemplateItem, TemplateStore, ValueDrafts, VariablesResponse,
};
use crate::tasks::AutosaveHandle;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub template_store: Arc<TemplateStore>,
    pub drafts: Arc<ValueDrafts>,
    pub repository: Arc<dyn TemplateRepository>,
    pub autosave: AutosaveHandle,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        settings: Settings,
        template_store: Arc<TemplateStore>,
        repository: Arc<dyn TemplateRepository>,
        autosave: AutosaveHandle,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            template_store,
            drafts: Arc::new(ValueDrafts::new()),
            autosave,
            repository,
            started_at: Instant::now(),
        }
    }

    /// Placeholder style to use when a request does not name one
    pub fn default_placeholder_style(&self) -> PlaceholderStyle {
        self.settings.render.placeholder_style
    }

    /// Reconcile the draft of `template` with its content
    pub fn sync_draft(&self, template: &TemplateItem) -> VariablesResponse {
        let synced = self.drafts.sync(template);
        self.retain_draft(&template.id);
        synced
    }

    /// Drop the draft of `id` if its template no longer exists.
    ///
    /// Must run after every draft write. Delete removes the template before
    /// its draft, so whichever side runs last sees the template gone and
    /// removes a draft written in between.
    pub fn retain_draft(&self, id: &str) {
        if !self.template_store.exists(id) {
            self.drafts.remove(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::storage::MemoryTemplateRepository;
    use crate::domain::template::CreateTemplateRequest;
    use crate::tasks::autosave_channel;

    fn state() -> AppState {
        let (autosave, _requests) = autosave_channel();
        AppState::new(
            Settings::default(),
            Arc::new(TemplateStore::new()),
            Arc::new(MemoryTemplateRepository::new()),
            autosave,
        )
    }

    #[test]
    fn test_sync_after_delete_leaves_no_draft() {
        let state = state();
        let template = state
            .template_store
            .create(CreateTemplateRequest {
                name: None,
                content: Some("{{a}}".to_string()),
            })
            .unwrap();

        // Delete lands between the handler's read and its draft write
        state.template_store.delete(&template.id).unwrap();
        state.drafts.remove(&template.id);

        state.sync_draft(&template);
        assert!(state.drafts.get(&template.id).is_none());

        state.drafts.set_values(&template, Default::default());
        state.retain_draft(&template.id);
        assert!(state.drafts.is_empty());
    }

    #[test]
    fn test_sync_keeps_draft_of_live_template() {
        let state = state();
        let template = state
            .template_store
            .create(CreateTemplateRequest::default())
            .unwrap();

        state.sync_draft(&template);
        assert!(state.drafts.get(&template.id).is_some());
    }
}
