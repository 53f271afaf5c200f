#![allow(dead_code)]

use serde_json::json;
use surveybase::schema::SurveySchema;

/// Three-question schema mirroring the macro survey documents the
/// pipeline is fed in production.
pub fn sample_schema() -> SurveySchema {
    SurveySchema::from_document(&json!({
        "id": "form_macro",
        "title": "Macro Survey",
        "fields": [
            {"ref": "age_ref", "title": "What is your age?", "type": "number"},
            {"ref": "city_ref", "title": "Where do you live?", "type": "text"},
            {"ref": "pace_ref", "title": "Preferred travel pace", "type": "multiple_choice"},
        ],
    }))
    .unwrap()
}

/// A cleaned transcription: one exact match, one typo the fuzzy path has
/// to recover, one exact choice, one question the schema does not know,
/// and a header line with no answer that the block parser must drop.
pub const TRANSCRIPTION: &str = "\
Transcribed by assistant

What is your age?
29 years old

Where do u live
Lisbon,
Portugal

Preferred travel pace
Slow and immersive

Favourite ice cream flavour?
Pistachio
";
