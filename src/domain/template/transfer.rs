//! Import/export of template collections as JSON
//!
//! Exports are pretty-printed JSON arrays. Imports are all-or-nothing: the
//! payload is checked for JSON syntax first, then for shape, and nothing is
//! returned unless every item is well formed.

use std::collections::HashSet;

use rand::Rng;
use thiserror::Error;

use super::types::TemplateItem;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 7;

/// Errors raised while importing or exporting templates
#[derive(Debug, Error)]
pub enum TransferError {
    /// The payload is not JSON at all
    #[error("Invalid JSON format")]
    InvalidJson(#[source] serde_json::Error),

    /// The payload is JSON but not a list of templates
    #[error("Invalid template format: {0}")]
    InvalidFormat(String),

    /// Serialization failed on export
    #[error("Export failed: {0}")]
    Export(#[source] serde_json::Error),
}

impl TransferError {
    pub fn code(&self) -> &'static str {
        match self {
            TransferError::InvalidJson(_) => "INVALID_JSON",
            TransferError::InvalidFormat(_) => "INVALID_FORMAT",
            TransferError::Export(_) => "EXPORT_FAILED",
        }
    }
}

/// Generate a template ID of the form `{millis}-{7 base36 chars}`
pub fn generate_id(now: i64) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect();
    format!("{}-{}", now, suffix)
}

/// Serialize templates as a pretty-printed JSON array
pub fn export_templates(items: &[TemplateItem]) -> Result<String, TransferError> {
    serde_json::to_string_pretty(items).map_err(TransferError::Export)
}

/// Parse and validate an exported collection.
///
/// Items whose ID is already taken (by `existing` or by an earlier item of the
/// same import) get a fresh ID and a new creation time. Every imported item
/// is marked as updated at `now`.
pub fn import_templates(
    json: &str,
    existing: &[TemplateItem],
    now: i64,
) -> Result<Vec<TemplateItem>, TransferError> {
    let value: serde_json::Value = serde_json::from_str(json).map_err(TransferError::InvalidJson)?;

    if !value.is_array() {
        return Err(TransferError::InvalidFormat(
            "expected an array of templates".to_string(),
        ));
    }

    let parsed: Vec<TemplateItem> =
        serde_json::from_value(value).map_err(|e| TransferError::InvalidFormat(e.to_string()))?;

    let mut taken: HashSet<String> = existing.iter().map(|item| item.id.clone()).collect();
    let mut imported = Vec::with_capacity(parsed.len());

    for mut item in parsed {
        if taken.contains(&item.id) {
            let mut id = generate_id(now);
            while taken.contains(&id) {
                id = generate_id(now);
            }
            tracing::debug!(old_id = %item.id, new_id = %id, "Reassigned colliding template ID");
            item.id = id;
            item.created_at = now;
        }

        item.updated_at = now;
        taken.insert(item.id.clone());
        imported.push(item);
    }

    Ok(imported)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, created: i64) -> TemplateItem {
        TemplateItem::new(id.to_string(), format!("T {}", id), "Hi {{name}}".to_string(), created)
    }

    #[test]
    fn test_generate_id_format() {
        let id = generate_id(1700000000000);
        let (millis, suffix) = id.split_once('-').unwrap();
        assert_eq!(millis, "1700000000000");
        assert_eq!(suffix.len(), ID_SUFFIX_LEN);
        assert!(suffix.bytes().all(|b| ID_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_export_is_camel_case_array() {
        let json = export_templates(&[item("a", 1)]).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\"createdAt\": 1"));
        assert!(json.contains("\n  {"));
    }

    #[test]
    fn test_import_roundtrip_keeps_ids() {
        let json = export_templates(&[item("a", 1), item("b", 2)]).unwrap();
        let imported = import_templates(&json, &[], 50).unwrap();

        assert_eq!(imported.len(), 2);
        assert_eq!(imported[0].id, "a");
        assert_eq!(imported[0].created_at, 1);
        assert_eq!(imported[0].updated_at, 50);
        assert_eq!(imported[1].id, "b");
    }

    #[test]
    fn test_import_reassigns_colliding_ids() {
        let json = export_templates(&[item("a", 1)]).unwrap();
        let imported = import_templates(&json, &[item("a", 1)], 99).unwrap();

        assert_ne!(imported[0].id, "a");
        assert!(imported[0].id.starts_with("99-"));
        assert_eq!(imported[0].created_at, 99);
        assert_eq!(imported[0].updated_at, 99);
        assert_eq!(imported[0].content, "Hi {{name}}");
    }

    #[test]
    fn test_import_reassigns_duplicates_within_payload() {
        let json = export_templates(&[item("a", 1), item("a", 2)]).unwrap();
        let imported = import_templates(&json, &[], 7).unwrap();

        assert_eq!(imported[0].id, "a");
        assert_ne!(imported[1].id, "a");
        assert_eq!(imported[1].created_at, 7);
    }

    #[test]
    fn test_import_rejects_bad_json() {
        let err = import_templates("{not json", &[], 0).unwrap_err();
        assert!(matches!(err, TransferError::InvalidJson(_)));
        assert_eq!(err.to_string(), "Invalid JSON format");
    }

    #[test]
    fn test_import_rejects_non_array() {
        let err = import_templates(r#"{"id": "a"}"#, &[], 0).unwrap_err();
        assert!(matches!(err, TransferError::InvalidFormat(_)));
    }

    #[test]
    fn test_import_rejects_missing_fields() {
        let json = r#"[{"id": "a", "name": "A", "content": "x", "createdAt": 1}]"#;
        let err = import_templates(json, &[], 0).unwrap_err();
        assert!(matches!(err, TransferError::InvalidFormat(_)));
        assert!(err.to_string().starts_with("Invalid template format:"));
    }

    #[test]
    fn test_import_rejects_wrong_types() {
        let json = r#"[{"id": 1, "name": "A", "content": "x", "createdAt": 1, "updatedAt": 1}]"#;
        let err = import_templates(json, &[], 0).unwrap_err();
        assert_eq!(err.code(), "INVALID_FORMAT");
    }

    #[test]
    fn test_import_empty_array() {
        assert!(import_templates("[]", &[item("a", 1)], 0).unwrap().is_empty());
    }
}
