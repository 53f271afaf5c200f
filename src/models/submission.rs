//! Structured submission payload shared by the reconstruction and
//! normalization paths.
//!
//! The payload is the stable contract with external collaborators: it is
//! what reconstruction emits, and what normalization accepts whether the
//! payload was rebuilt here or arrived from the survey platform directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// A question definition embedded in a submission payload. Serialized
/// reference key is `ref` to match schema documents; `id` and `reference`
/// are accepted on input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldDefinition {
    #[serde(rename = "ref", alias = "id", alias = "reference")]
    pub reference: String,
    pub title: String,
    #[serde(rename = "type", default = "default_field_type")]
    pub field_type: String,
}

fn default_field_type() -> String {
    "text".to_string()
}

/// The label payload of a choice answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChoiceLabel {
    pub label: String,
}

/// A typed answer value, tagged by its `type` key. Unknown answer shapes
/// fall through to `Other`, which retains the raw key/value map so no data
/// is lost on round trips.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TypedAnswer {
    Number { number: f64 },
    Choice { choice: ChoiceLabel },
    Text { text: String },
    #[serde(untagged)]
    Other(Map<String, Value>),
}

impl TypedAnswer {
    pub fn text(value: impl Into<String>) -> Self {
        TypedAnswer::Text { text: value.into() }
    }

    pub fn choice(label: impl Into<String>) -> Self {
        TypedAnswer::Choice {
            choice: ChoiceLabel {
                label: label.into(),
            },
        }
    }

    /// The answer-kind string: the tag for the typed arms, the raw map's
    /// own `type` key (or "other") for the untyped arm.
    pub fn kind(&self) -> &str {
        match self {
            TypedAnswer::Number { .. } => "number",
            TypedAnswer::Choice { .. } => "choice",
            TypedAnswer::Text { .. } => "text",
            TypedAnswer::Other(raw) => raw
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("other"),
        }
    }
}

/// One answer inside a submission payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnswerRecord {
    pub field_reference: String,
    #[serde(flatten)]
    pub value: TypedAnswer,
}

/// A structured survey submission: identity and timing metadata, the
/// question definitions the answers refer to, and the ordered answers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmissionPayload {
    pub submission_id: String,
    pub landed_at: DateTime<Utc>,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub hidden_metadata: HashMap<String, String>,
    #[serde(default)]
    pub field_definitions: Vec<FieldDefinition>,
    #[serde(default)]
    pub answers: Vec<AnswerRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn typed_answers_round_trip_through_json() {
        let record = AnswerRecord {
            field_reference: "r1".into(),
            value: TypedAnswer::Number { number: 29.0 },
        };
        let encoded = serde_json::to_value(&record).unwrap();
        assert_eq!(
            encoded,
            json!({"field_reference": "r1", "type": "number", "number": 29.0})
        );
        let decoded: AnswerRecord = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn unknown_answer_shapes_are_retained() {
        let raw = json!({"field_reference": "r9", "type": "date", "date": "2024-05-01"});
        let decoded: AnswerRecord = serde_json::from_value(raw).unwrap();
        match &decoded.value {
            TypedAnswer::Other(map) => {
                assert_eq!(map.get("type").and_then(Value::as_str), Some("date"));
                assert!(!map.contains_key("field_reference"));
            }
            other => panic!("expected Other, got {other:?}"),
        }
        assert_eq!(decoded.value.kind(), "date");
    }
}
