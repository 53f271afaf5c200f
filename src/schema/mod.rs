//! Survey schema loading and title normalization.
//!
//! A schema document is an ordered list of field descriptors. The loader
//! keeps the original order and builds the two lookup structures the rest
//! of the pipeline works from: reference -> field and normalized title ->
//! field.

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// A single question definition from the schema document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaField {
    /// Stable identifier linking answers back to this question.
    pub reference: String,
    /// Human-readable question text.
    pub title: String,
    /// Raw answer-type string from the document ("text" when absent).
    pub type_hint: String,
}

/// Coarse classification of a field's raw type hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintKind {
    Number,
    Choice,
    Text,
    Other,
}

impl SchemaField {
    pub fn hint_kind(&self) -> HintKind {
        classify_hint(&self.type_hint)
    }
}

/// Coarse classification of a raw answer-type string. Source schemas carry
/// free-form type names ("opinion_scale", "multiple_choice", ...), so the
/// classification is substring-based.
pub fn classify_hint(type_hint: &str) -> HintKind {
    let hint = type_hint.to_lowercase();
    if hint.contains("number") || hint.contains("scale") {
        HintKind::Number
    } else if hint.contains("choice") || hint.contains("dropdown") || hint.contains("multiple") {
        HintKind::Choice
    } else if hint.contains("text") {
        HintKind::Text
    } else {
        HintKind::Other
    }
}

/// An immutable, loaded survey schema with lookup indexes.
#[derive(Debug, Clone)]
pub struct SurveySchema {
    pub id: String,
    pub title: String,
    fields: Vec<SchemaField>,
    by_reference: HashMap<String, usize>,
    by_normalized_title: HashMap<String, usize>,
}

impl SurveySchema {
    /// Builds a schema from an ordered field list. Duplicate references or
    /// normalized titles keep the first occurrence in schema order.
    pub fn new(id: String, title: String, fields: Vec<SchemaField>) -> Result<Self> {
        if fields.is_empty() {
            bail!("Schema document contains no field definitions");
        }
        let mut by_reference = HashMap::new();
        let mut by_normalized_title = HashMap::new();
        for (index, field) in fields.iter().enumerate() {
            by_reference.entry(field.reference.clone()).or_insert(index);
            by_normalized_title
                .entry(normalize_title(&field.title))
                .or_insert(index);
        }
        Ok(Self {
            id,
            title,
            fields,
            by_reference,
            by_normalized_title,
        })
    }

    /// Parses a schema document. Unknown keys are ignored; each field needs
    /// at least a reference (`ref`, falling back to `id`) and a title.
    pub fn from_document(document: &Value) -> Result<Self> {
        let field_list = match document.get("fields").and_then(Value::as_array) {
            Some(list) => list,
            None => bail!("Schema document has no recognizable field list"),
        };
        let mut fields = Vec::with_capacity(field_list.len());
        for raw in field_list {
            let reference = string_key(raw, "ref")
                .or_else(|| string_key(raw, "id"))
                .unwrap_or_default();
            let title = string_key(raw, "title").unwrap_or_default();
            let type_hint = string_key(raw, "type").unwrap_or_else(|| "text".to_string());
            fields.push(SchemaField {
                reference,
                title: title.trim().to_string(),
                type_hint,
            });
        }
        let id = string_key(document, "id").unwrap_or_else(|| "form".to_string());
        let title = string_key(document, "title").unwrap_or_else(|| "Untitled Form".to_string());
        Self::new(id, title, fields)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read schema document {}", path.display()))?;
        let document: Value = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid JSON in schema document {}", path.display()))?;
        Self::from_document(&document)
    }

    /// Fields in document order.
    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    pub fn field_by_reference(&self, reference: &str) -> Option<&SchemaField> {
        self.by_reference
            .get(reference)
            .map(|index| &self.fields[*index])
    }

    pub fn field_by_normalized_title(&self, normalized: &str) -> Option<&SchemaField> {
        self.by_normalized_title
            .get(normalized)
            .map(|index| &self.fields[*index])
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn string_key(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(|s| s.to_string())
        .filter(|s| !s.is_empty())
}

/// Canonical form used for title lookup and similarity scoring: trimmed,
/// lower-cased, every character outside `[a-z0-9 ]` removed.
pub fn normalize_title(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_title("  What is your AGE?! ");
        assert_eq!(once, "what is your age");
        assert_eq!(normalize_title(&once), once);
    }

    #[test]
    fn loads_fields_and_defaults_missing_type() {
        let document = json!({
            "id": "form_abc",
            "title": "Macro Survey",
            "fields": [
                {"ref": "r1", "title": "What is your age?", "type": "number"},
                {"id": "f2", "title": "Where do you live?"},
            ],
            "unknown_key": true,
        });
        let schema = SurveySchema::from_document(&document).unwrap();
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.fields()[1].reference, "f2");
        assert_eq!(schema.fields()[1].type_hint, "text");
        assert!(schema
            .field_by_normalized_title("what is your age")
            .is_some());
    }

    #[test]
    fn rejects_document_without_field_list() {
        let document = json!({"id": "form_abc"});
        assert!(SurveySchema::from_document(&document).is_err());
        let empty = json!({"fields": []});
        assert!(SurveySchema::from_document(&empty).is_err());
    }
}
