mod common;

use serde_json::{json, Value};
use surveybase::alignment::{align_transcript, export_aligned_text, parse_aligned_text};
use surveybase::config::AlignmentSettings;
use surveybase::models::SubmissionPayload;
use surveybase::normalize::normalize_submission;
use surveybase::reconstruction::{rebuild_submission, RebuildRequest};
use surveybase::transcript::blocks;

#[test]
fn normalizes_a_rebuilt_payload() {
    let schema = common::sample_schema();
    let aligned = align_transcript(
        &schema,
        blocks(common::TRANSCRIPTION),
        &AlignmentSettings::default(),
    );
    let parsed = parse_aligned_text(&export_aligned_text(&aligned.matched));
    let payload = rebuild_submission(&schema, &parsed.records, RebuildRequest::default()).payload;

    let normalized = normalize_submission(&payload);
    assert_eq!(normalized.meta.submission_id, payload.submission_id);
    assert_eq!(normalized.answers.len(), 3);

    let age = &normalized.answers[0];
    assert_eq!(age.field_id, "age_ref");
    assert_eq!(age.field_title.as_deref(), Some("What is your age?"));
    assert_eq!(age.field_type, "number");
    assert_eq!(age.answer_type, "number");
    assert_eq!(age.value, json!(29.0));

    let pace = &normalized.answers[2];
    assert_eq!(pace.field_type, "multiple_choice");
    assert_eq!(pace.answer_type, "choice");
    assert_eq!(pace.value, json!("Slow and immersive"));
}

#[test]
fn unknown_answer_kinds_pass_through_as_raw_objects() {
    let raw = json!({
        "submission_id": "resp_raw",
        "landed_at": "2026-08-06T10:00:00Z",
        "submitted_at": "2026-08-06T10:05:00Z",
        "field_definitions": [
            {"ref": "when_ref", "title": "When do you want to travel?", "type": "date"},
        ],
        "answers": [
            {"field_reference": "when_ref", "type": "date", "date": "2027-02-01"},
        ],
    });
    let payload: SubmissionPayload = serde_json::from_value(raw).unwrap();
    let normalized = normalize_submission(&payload);

    let answer = &normalized.answers[0];
    assert_eq!(answer.answer_type, "date");
    // The raw answer object comes back minus the field-reference key.
    assert_eq!(
        answer.value,
        json!({"type": "date", "date": "2027-02-01"})
    );
}

#[test]
fn missing_definitions_degrade_to_the_answer_kind() {
    let raw = json!({
        "submission_id": "resp_partial",
        "landed_at": "2026-08-06T10:00:00Z",
        "submitted_at": "2026-08-06T10:05:00Z",
        "hidden_metadata": {"user_id": "12345"},
        "answers": [
            {"field_reference": "ghost_ref", "type": "text", "text": "hello"},
        ],
    });
    let payload: SubmissionPayload = serde_json::from_value(raw).unwrap();
    let normalized = normalize_submission(&payload);

    let answer = &normalized.answers[0];
    assert_eq!(answer.field_id, "ghost_ref");
    assert_eq!(answer.field_title, None);
    assert_eq!(answer.field_type, "text");
    assert_eq!(answer.value, Value::from("hello"));
    assert_eq!(normalized.meta.hidden_metadata["user_id"], "12345");
}

#[test]
fn normalization_is_a_pure_function_of_the_payload() {
    let schema = common::sample_schema();
    let aligned = align_transcript(
        &schema,
        blocks(common::TRANSCRIPTION),
        &AlignmentSettings::default(),
    );
    let parsed = parse_aligned_text(&export_aligned_text(&aligned.matched));
    let payload = rebuild_submission(&schema, &parsed.records, RebuildRequest::default()).payload;

    let first = normalize_submission(&payload);
    let second = normalize_submission(&payload);
    assert_eq!(first, second);
}
