mod common;

use std::fs;

use surveybase::alignment::{
    align_transcript, export_aligned_text, parse_aligned_text,
};
use surveybase::config::AlignmentSettings;
use surveybase::transcript::blocks;

#[test]
fn parse_reproduces_exported_entries_in_order() {
    let schema = common::sample_schema();
    let outcome = align_transcript(
        &schema,
        blocks(common::TRANSCRIPTION),
        &AlignmentSettings::default(),
    );
    let exported = export_aligned_text(&outcome.matched);
    let parsed = parse_aligned_text(&exported);

    assert!(parsed.warnings.is_empty());
    assert_eq!(parsed.records.len(), outcome.matched.len());
    for (record, entry) in parsed.records.iter().zip(&outcome.matched) {
        assert_eq!(record.reference, entry.reference);
        assert_eq!(record.question, entry.question);
        assert_eq!(record.answer, entry.answer);
    }
}

#[test]
fn round_trip_survives_the_filesystem() {
    let schema = common::sample_schema();
    let outcome = align_transcript(
        &schema,
        blocks(common::TRANSCRIPTION),
        &AlignmentSettings::default(),
    );

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("aligned.txt");
    fs::write(&path, export_aligned_text(&outcome.matched)).unwrap();

    let parsed = parse_aligned_text(&fs::read_to_string(&path).unwrap());
    assert_eq!(parsed.records.len(), 3);
    assert_eq!(parsed.records[1].reference, "city_ref");
    assert_eq!(parsed.records[1].answer, "Lisbon, Portugal");
}

#[test]
fn match_annotations_are_review_aids_only() {
    let schema = common::sample_schema();
    let outcome = align_transcript(
        &schema,
        blocks(common::TRANSCRIPTION),
        &AlignmentSettings::default(),
    );
    let exported = export_aligned_text(&outcome.matched);
    assert!(exported.contains("Match: EXACT"));
    assert!(exported.contains("Match: FUZZY"));
    assert!(exported.contains("A_ref: city_ref"));

    // Hand-editing the review annotations must not change what parses.
    let edited = exported
        .replace("Match: EXACT", "Match: FUZZY")
        .replace("A_ref: city_ref", "A_ref: something-else");
    let parsed = parse_aligned_text(&edited);
    assert_eq!(parsed.records.len(), outcome.matched.len());
    assert_eq!(parsed.records[1].reference, "city_ref");
}
