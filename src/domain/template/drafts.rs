//! Per-template value drafts
//!
//! Each template keeps the values a user has filled in so far. Whenever the
//! template content is read for rendering, the draft is reconciled with the
//! variables currently in the content.

use dashmap::DashMap;

use super::engine::{
    extract_variables, render_template, sync_values, PlaceholderStyle, RenderOptions, ValueMap,
};
use super::types::{RenderedTemplate, TemplateItem, VariablesResponse};

/// Extract, reconcile and render in one pass.
///
/// `values` may hold stale or extra keys; only the variables present in
/// `content` survive into the result.
pub fn preview(content: &str, values: &ValueMap, style: PlaceholderStyle) -> RenderedTemplate {
    let extraction = extract_variables(content);
    let values = sync_values(&extraction.vars, values);
    let rendered = render_template(content, &values, RenderOptions::with_style(style));

    RenderedTemplate {
        rendered,
        vars: extraction.vars,
        invalid: extraction.invalid,
        values,
        placeholder_style: style,
    }
}

/// Value maps keyed by template ID
#[derive(Default)]
pub struct ValueDrafts {
    drafts: DashMap<String, ValueMap>,
}

impl ValueDrafts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile the draft of `template` with its current content
    pub fn sync(&self, template: &TemplateItem) -> VariablesResponse {
        let extraction = extract_variables(&template.content);
        let mut entry = self.drafts.entry(template.id.clone()).or_default();
        let values = sync_values(&extraction.vars, entry.value());
        *entry = values.clone();

        VariablesResponse {
            vars: extraction.vars,
            invalid: extraction.invalid,
            values,
        }
    }

    /// Merge `values` into the draft, keeping only current variables
    pub fn set_values(&self, template: &TemplateItem, values: ValueMap) -> ValueMap {
        let extraction = extract_variables(&template.content);
        let mut entry = self.drafts.entry(template.id.clone()).or_default();

        let mut merged = entry.value().clone();
        merged.extend(values);
        let synced = sync_values(&extraction.vars, &merged);
        *entry = synced.clone();

        synced
    }

    /// Clear every value of the draft, keeping the current variables
    pub fn reset(&self, template: &TemplateItem) -> ValueMap {
        let extraction = extract_variables(&template.content);
        let values = sync_values(&extraction.vars, &ValueMap::new());
        self.drafts.insert(template.id.clone(), values.clone());
        values
    }

    /// Render `template` using its draft, overlaid with `overrides`.
    ///
    /// Overrides apply to this render only and are not written to the draft.
    pub fn render(
        &self,
        template: &TemplateItem,
        overrides: Option<ValueMap>,
        style: PlaceholderStyle,
    ) -> RenderedTemplate {
        let mut values = self.get(&template.id).unwrap_or_default();
        if let Some(overrides) = overrides {
            values.extend(overrides);
        }

        preview(&template.content, &values, style)
    }

    /// Current draft of a template, if any
    pub fn get(&self, id: &str) -> Option<ValueMap> {
        self.drafts.get(id).map(|entry| entry.value().clone())
    }

    /// Forget the draft of a deleted template
    pub fn remove(&self, id: &str) {
        self.drafts.remove(id);
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(content: &str) -> TemplateItem {
        TemplateItem::new("t1".into(), "T".into(), content.into(), 1)
    }

    fn values(pairs: &[(&str, &str)]) -> ValueMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_preview_pipeline() {
        let result = preview(
            "Hola {{nombre}} {{1x}}",
            &values(&[("nombre", "Ana"), ("stale", "z")]),
            PlaceholderStyle::Brackets,
        );

        assert_eq!(result.rendered, "Hola Ana {{1x}}");
        assert_eq!(result.vars, vec!["nombre"]);
        assert_eq!(result.invalid, vec!["1x"]);
        assert_eq!(result.values, values(&[("nombre", "Ana")]));
    }

    #[test]
    fn test_sync_follows_content_edits() {
        let drafts = ValueDrafts::new();
        let mut item = template("{{a}} {{b}}");

        drafts.set_values(&item, values(&[("a", "x"), ("b", "y")]));

        item.content = "{{a}} {{c}}".to_string();
        let synced = drafts.sync(&item);

        assert_eq!(synced.vars, vec!["a", "c"]);
        assert_eq!(synced.values, values(&[("a", "x"), ("c", "")]));
        assert_eq!(drafts.get("t1").unwrap(), synced.values);
    }

    #[test]
    fn test_set_values_ignores_unknown_names() {
        let drafts = ValueDrafts::new();
        let item = template("{{a}}");

        let stored = drafts.set_values(&item, values(&[("a", "1"), ("zzz", "2")]));
        assert_eq!(stored, values(&[("a", "1")]));
    }

    #[test]
    fn test_set_values_merges() {
        let drafts = ValueDrafts::new();
        let item = template("{{a}} {{b}}");

        drafts.set_values(&item, values(&[("a", "1")]));
        let stored = drafts.set_values(&item, values(&[("b", "2")]));
        assert_eq!(stored, values(&[("a", "1"), ("b", "2")]));
    }

    #[test]
    fn test_render_overrides_are_not_persisted() {
        let drafts = ValueDrafts::new();
        let item = template("{{a}}-{{b}}");
        drafts.set_values(&item, values(&[("a", "1"), ("b", "2")]));

        let rendered = drafts.render(&item, Some(values(&[("b", "B")])), PlaceholderStyle::Brackets);
        assert_eq!(rendered.rendered, "1-B");
        assert_eq!(drafts.get("t1").unwrap(), values(&[("a", "1"), ("b", "2")]));
    }

    #[test]
    fn test_reset_and_remove() {
        let drafts = ValueDrafts::new();
        let item = template("{{a}}");
        drafts.set_values(&item, values(&[("a", "1")]));

        assert_eq!(drafts.reset(&item), values(&[("a", "")]));

        drafts.remove("t1");
        assert!(drafts.is_empty());
        assert_eq!(
            drafts.render(&item, None, PlaceholderStyle::Empty).rendered,
            ""
        );
    }
}
