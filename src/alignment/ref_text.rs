//! The ref-aligned text format: a human-reviewable intermediate file that
//! carries schema references next to each transcribed answer.
//!
//! The layout is a stable on-disk contract. Each record is five lines
//! (numbered question, `Q_ref:`, `A:`, `A_ref:`, `Match:`) followed by a
//! blank line:
//!
//! ```text
//! 1. Q: What is your age?
//!    Q_ref: r1
//!    A: 29 years old
//!    A_ref: r1
//!    Match: EXACT
//! ```
//!
//! Parsing is the exporter's inverse for `{reference, question, answer}`;
//! the match kind is a review aid and is dropped on the way back in.

use super::MatchedEntry;
use std::fmt::Write as _;

/// A `{reference, question, answer}` triple recovered from ref-aligned
/// text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedRecord {
    pub reference: String,
    pub question: String,
    pub answer: String,
}

/// Parse result: recovered records plus diagnostics for skipped blocks.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub records: Vec<AlignedRecord>,
    pub warnings: Vec<String>,
}

/// Serializes matched entries into the ref-aligned text format.
pub fn export_aligned_text(entries: &[MatchedEntry]) -> String {
    let mut out = String::new();
    for (index, entry) in entries.iter().enumerate() {
        let _ = writeln!(out, "{}. Q: {}", index + 1, entry.question);
        let _ = writeln!(out, "   Q_ref: {}", entry.reference);
        let _ = writeln!(out, "   A: {}", entry.answer);
        let _ = writeln!(out, "   A_ref: {}", entry.reference);
        let _ = writeln!(out, "   Match: {}", entry.kind.as_str());
        out.push('\n');
    }
    out
}

/// Which tag a collected value belongs to while a record is being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Question,
    Reference,
    Answer,
}

#[derive(Debug, Default)]
struct PendingRecord {
    question: Vec<String>,
    reference: Vec<String>,
    answer: Vec<String>,
    current: Option<Tag>,
}

impl PendingRecord {
    fn is_blank(&self) -> bool {
        self.question.is_empty() && self.reference.is_empty() && self.answer.is_empty()
    }

    fn push(&mut self, tag: Tag, value: &str) {
        self.current = Some(tag);
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        self.parts_mut(tag).push(value.to_string());
    }

    fn continue_current(&mut self, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        if let Some(tag) = self.current {
            self.parts_mut(tag).push(value.to_string());
        }
    }

    fn parts_mut(&mut self, tag: Tag) -> &mut Vec<String> {
        match tag {
            Tag::Question => &mut self.question,
            Tag::Reference => &mut self.reference,
            Tag::Answer => &mut self.answer,
        }
    }

    fn finish(self, outcome: &mut ParseOutcome) {
        if self.is_blank() {
            return;
        }
        let question = self.question.join(" ");
        let answer = self.answer.join(" ");
        // The reference is a single token; anything after whitespace is
        // commentary.
        let reference = self
            .reference
            .join(" ")
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string();
        if reference.is_empty() || answer.is_empty() {
            outcome.warnings.push(format!(
                "Skipped record without {}: {:?}",
                if reference.is_empty() {
                    "a reference"
                } else {
                    "an answer"
                },
                if question.is_empty() { &answer } else { &question },
            ));
            return;
        }
        outcome.records.push(AlignedRecord {
            reference,
            question,
            answer,
        });
    }
}

/// Re-parses ref-aligned text into `{reference, question, answer}`
/// records. `A_ref:` and `Match:` lines are dropped; records split on
/// numbered lines or blank lines; tags are case-insensitive. Lines without
/// a tag continue the preceding tag's value, joined with single spaces.
pub fn parse_aligned_text(text: &str) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();
    let mut pending = PendingRecord::default();
    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            std::mem::take(&mut pending).finish(&mut outcome);
            continue;
        }
        let line = match strip_record_index(line) {
            Some(rest) => {
                std::mem::take(&mut pending).finish(&mut outcome);
                rest
            }
            None => line,
        };
        match split_tag(line) {
            // Review annotations; not carried state.
            Some((tag, _))
                if tag.eq_ignore_ascii_case("a_ref") || tag.eq_ignore_ascii_case("match") => {}
            Some((tag, value)) if tag.eq_ignore_ascii_case("q_ref") => {
                pending.push(Tag::Reference, value);
            }
            Some((tag, value)) if tag.eq_ignore_ascii_case("q") => {
                pending.push(Tag::Question, value);
            }
            Some((tag, value)) if tag.eq_ignore_ascii_case("a") => {
                pending.push(Tag::Answer, value);
            }
            _ => pending.continue_current(line),
        }
    }
    pending.finish(&mut outcome);
    outcome
}

/// Strips a leading `N.` record index, returning the rest of the line.
fn strip_record_index(line: &str) -> Option<&str> {
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    let rest = &line[digits..];
    rest.strip_prefix('.').map(str::trim_start)
}

/// Splits `tag: value` at the first colon, where the tag is a single word
/// of letters, digits, or underscores. Returns `None` for untagged lines.
fn split_tag(line: &str) -> Option<(&str, &str)> {
    let colon = line.find(':')?;
    let tag = line[..colon].trim_end();
    if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    Some((tag, &line[colon + 1..]))
}
