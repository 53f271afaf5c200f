//! Flattens a structured submission payload into a uniform answer list
//! enriched with question metadata.
//!
//! Works on any payload, rebuilt here or received from the survey
//! platform directly, and never fails: missing metadata degrades to
//! nulls and unknown answer shapes pass through as raw values.

use crate::models::{SubmissionPayload, TypedAnswer};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Submission-level metadata carried alongside the flattened answers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmissionMeta {
    pub submission_id: String,
    pub landed_at: DateTime<Utc>,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub hidden_metadata: HashMap<String, String>,
}

/// One answer with its question metadata resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NormalizedAnswer {
    pub field_id: String,
    pub field_title: Option<String>,
    pub field_type: String,
    pub answer_type: String,
    pub value: Value,
}

/// The flattened, metadata-enriched form of a submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NormalizedSubmission {
    pub meta: SubmissionMeta,
    pub answers: Vec<NormalizedAnswer>,
}

/// Produces the normalized view of a payload. Pure; the input is not
/// consumed or cached, and every call derives the answers fresh.
pub fn normalize_submission(payload: &SubmissionPayload) -> NormalizedSubmission {
    let definitions: HashMap<&str, (&str, &str)> = payload
        .field_definitions
        .iter()
        .map(|def| {
            (
                def.reference.as_str(),
                (def.title.as_str(), def.field_type.as_str()),
            )
        })
        .collect();

    let answers = payload
        .answers
        .iter()
        .map(|answer| {
            let kind = answer.value.kind().to_string();
            let (field_title, field_type) = match definitions.get(answer.field_reference.as_str())
            {
                Some((title, field_type)) => {
                    (Some((*title).to_string()), (*field_type).to_string())
                }
                // Partial payload: fall back to the answer's own kind.
                None => (None, kind.clone()),
            };
            NormalizedAnswer {
                field_id: answer.field_reference.clone(),
                field_title,
                field_type,
                answer_type: kind,
                value: answer_value(&answer.value),
            }
        })
        .collect();

    NormalizedSubmission {
        meta: SubmissionMeta {
            submission_id: payload.submission_id.clone(),
            landed_at: payload.landed_at,
            submitted_at: payload.submitted_at,
            hidden_metadata: payload.hidden_metadata.clone(),
        },
        answers,
    }
}

/// Extracts the flat value for an answer. Unknown shapes return the raw
/// answer map (which excludes the field-reference key) rather than
/// discarding data.
fn answer_value(value: &TypedAnswer) -> Value {
    match value {
        TypedAnswer::Number { number } => Value::from(*number),
        TypedAnswer::Choice { choice } => Value::from(choice.label.clone()),
        TypedAnswer::Text { text } => Value::from(text.clone()),
        TypedAnswer::Other(raw) => Value::Object(raw.clone()),
    }
}
