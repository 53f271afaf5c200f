//! Splits a free-form transcription into ordered question/answer blocks.

/// One transcribed question together with its answer text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptBlock {
    pub question: String,
    pub answer: String,
}

/// Lazy iterator over the question/answer blocks of a transcription.
///
/// Blocks are separated by blank lines (runs of blank lines collapse to a
/// single separator). Within a block the first non-blank line is the
/// question and the remaining non-blank lines join with single spaces to
/// form the answer. Blocks with fewer than two non-blank lines carry no
/// answer and are skipped.
pub struct Blocks<'a> {
    lines: std::str::Lines<'a>,
}

impl<'a> Iterator for Blocks<'a> {
    type Item = TranscriptBlock;

    fn next(&mut self) -> Option<TranscriptBlock> {
        loop {
            let mut collected: Vec<&str> = Vec::new();
            let mut saw_any_line = false;
            for line in self.lines.by_ref() {
                saw_any_line = true;
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    if collected.is_empty() {
                        continue;
                    }
                    break;
                }
                collected.push(trimmed);
            }
            if collected.len() >= 2 {
                return Some(TranscriptBlock {
                    question: collected[0].to_string(),
                    answer: collected[1..].join(" "),
                });
            }
            if !saw_any_line {
                return None;
            }
            // Single-line block: nothing to pair, keep scanning.
        }
    }
}

/// Returns the lazy block sequence for a transcription.
pub fn blocks(text: &str) -> Blocks<'_> {
    Blocks {
        lines: text.lines(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_blank_lines_and_joins_answers() {
        let text = "What is your age?\n29 years old\n\nWhere do you live?\nLisbon,\nPortugal\n";
        let parsed: Vec<TranscriptBlock> = blocks(text).collect();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].question, "What is your age?");
        assert_eq!(parsed[0].answer, "29 years old");
        assert_eq!(parsed[1].answer, "Lisbon, Portugal");
    }

    #[test]
    fn collapses_consecutive_blank_lines() {
        let text = "Q one\nA one\n\n\n\nQ two\nA two";
        let parsed: Vec<TranscriptBlock> = blocks(text).collect();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].question, "Q two");
    }

    #[test]
    fn drops_blocks_without_an_answer() {
        let text = "Orphan question\n\nReal question\nReal answer\n\nAnother orphan\n";
        let parsed: Vec<TranscriptBlock> = blocks(text).collect();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].question, "Real question");
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert_eq!(blocks("").count(), 0);
        assert_eq!(blocks("\n\n  \n").count(), 0);
    }
}
