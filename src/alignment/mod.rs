//! Aligns transcribed question/answer blocks to survey schema fields.
//!
//! Exact matches on normalized titles are taken first; everything else
//! falls back to a similarity scan over the whole schema. Blocks that
//! clear neither path are reported back to the caller, never dropped.

pub mod ref_text;

pub use ref_text::{export_aligned_text, parse_aligned_text, AlignedRecord, ParseOutcome};

use crate::config::AlignmentSettings;
use crate::schema::{normalize_title, SurveySchema};
use crate::transcript::TranscriptBlock;
use serde::{Deserialize, Serialize};

/// How an entry was aligned to its schema field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    Fuzzy,
}

impl MatchKind {
    /// Uppercase form used in the ref-aligned text format.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Exact => "EXACT",
            MatchKind::Fuzzy => "FUZZY",
        }
    }
}

/// A transcribed answer aligned to a schema field. The question carries
/// the schema field's display title, not the transcribed wording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedEntry {
    pub reference: String,
    pub question: String,
    pub answer: String,
    pub kind: MatchKind,
}

/// Result of aligning one transcription against a schema.
#[derive(Debug, Clone, Default)]
pub struct AlignmentOutcome {
    pub matched: Vec<MatchedEntry>,
    pub unmatched: Vec<TranscriptBlock>,
}

/// Counts reported to the user at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSummary {
    pub exact: usize,
    pub fuzzy: usize,
    pub unmatched: usize,
}

impl AlignmentOutcome {
    pub fn summary(&self) -> MatchSummary {
        let exact = self
            .matched
            .iter()
            .filter(|entry| entry.kind == MatchKind::Exact)
            .count();
        MatchSummary {
            exact,
            fuzzy: self.matched.len() - exact,
            unmatched: self.unmatched.len(),
        }
    }
}

/// Aligns each block to exactly one schema field or records it unmatched.
pub fn align_transcript(
    schema: &SurveySchema,
    blocks: impl Iterator<Item = TranscriptBlock>,
    settings: &AlignmentSettings,
) -> AlignmentOutcome {
    let mut outcome = AlignmentOutcome::default();
    for block in blocks {
        let normalized = normalize_title(&block.question);
        if let Some(field) = schema.field_by_normalized_title(&normalized) {
            outcome.matched.push(MatchedEntry {
                reference: field.reference.clone(),
                question: field.title.clone(),
                answer: block.answer,
                kind: MatchKind::Exact,
            });
            continue;
        }
        match closest_field(schema, &normalized, settings.fuzzy_threshold) {
            Some(index) => {
                let field = &schema.fields()[index];
                outcome.matched.push(MatchedEntry {
                    reference: field.reference.clone(),
                    question: field.title.clone(),
                    answer: block.answer,
                    kind: MatchKind::Fuzzy,
                });
            }
            None => outcome.unmatched.push(block),
        }
    }
    outcome
}

/// Highest-scoring field at or above the threshold. Equal scores keep the
/// first candidate in schema order.
fn closest_field(schema: &SurveySchema, normalized: &str, threshold: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, field) in schema.fields().iter().enumerate() {
        let score = strsim::normalized_levenshtein(normalized, &normalize_title(&field.title));
        if score < threshold {
            continue;
        }
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((index, score));
        }
    }
    best.map(|(index, _)| index)
}
