//! Rebuilds a structured submission payload from ref-aligned records.
//!
//! Reconstruction is total: references that do not resolve against the
//! schema get a placeholder definition and a warning instead of failing
//! the run.

use crate::alignment::ref_text::AlignedRecord;
use crate::models::{AnswerRecord, FieldDefinition, SubmissionPayload, TypedAnswer};
use crate::schema::{classify_hint, HintKind, SurveySchema};
use chrono::Utc;
use std::collections::HashMap;
use uuid::Uuid;

/// Classifies a raw answer string into a typed answer, guided by the
/// field's raw type hint.
///
/// Numeric detection runs before choice detection: numeric-scale fields
/// are sometimes labeled "choice" in source schemas, and a leading digit
/// wins regardless of hint. When a numeric hint has no digits to extract,
/// the answer degrades to text.
pub fn infer_answer(type_hint: &str, raw: &str) -> TypedAnswer {
    let answer = raw.trim();
    let leading_digit = answer.chars().next().map_or(false, |c| c.is_ascii_digit());
    if classify_hint(type_hint) == HintKind::Number || leading_digit {
        return match first_digit_run(answer) {
            Some(number) => TypedAnswer::Number { number },
            None => TypedAnswer::text(answer),
        };
    }
    if classify_hint(type_hint) == HintKind::Choice {
        return TypedAnswer::choice(answer);
    }
    TypedAnswer::text(answer)
}

/// First contiguous digit run anywhere in the text, as a number.
fn first_digit_run(text: &str) -> Option<f64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let rest = &text[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}

/// Caller-supplied identity for a rebuilt submission.
#[derive(Debug, Clone, Default)]
pub struct RebuildRequest {
    /// Submission identifier; a fresh UUID when absent.
    pub submission_id: Option<String>,
    /// Hidden metadata carried through to the payload (user ids etc.).
    pub hidden_metadata: HashMap<String, String>,
}

/// A rebuilt payload plus the diagnostics collected along the way.
#[derive(Debug, Clone)]
pub struct RebuildOutcome {
    pub payload: SubmissionPayload,
    pub warnings: Vec<String>,
}

/// Reassembles aligned records into a schema-conformant payload.
///
/// Field definitions and answers append in input order; repeated
/// references are kept as-is and left to consumers to resolve. References
/// missing from the schema synthesize a text-typed placeholder definition
/// titled after the record's question.
pub fn rebuild_submission(
    schema: &SurveySchema,
    records: &[AlignedRecord],
    request: RebuildRequest,
) -> RebuildOutcome {
    let mut warnings = Vec::new();
    let mut field_definitions = Vec::with_capacity(records.len());
    let mut answers = Vec::with_capacity(records.len());

    for record in records {
        let definition = match schema.field_by_reference(&record.reference) {
            Some(field) => FieldDefinition {
                reference: field.reference.clone(),
                title: field.title.clone(),
                field_type: field.type_hint.clone(),
            },
            None => {
                warnings.push(format!(
                    "Reference {} not found in schema; added as text field",
                    record.reference
                ));
                FieldDefinition {
                    reference: record.reference.clone(),
                    title: record.question.clone(),
                    field_type: "text".to_string(),
                }
            }
        };
        let value = infer_answer(&definition.field_type, &record.answer);
        answers.push(AnswerRecord {
            field_reference: definition.reference.clone(),
            value,
        });
        field_definitions.push(definition);
    }

    let now = Utc::now();
    let payload = SubmissionPayload {
        submission_id: request
            .submission_id
            .unwrap_or_else(|| Uuid::new_v4().to_string()),
        landed_at: now,
        submitted_at: now,
        hidden_metadata: request.hidden_metadata,
        field_definitions,
        answers,
    };
    RebuildOutcome { payload, warnings }
}
