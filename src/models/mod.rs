pub mod submission;

pub use submission::{AnswerRecord, ChoiceLabel, FieldDefinition, SubmissionPayload, TypedAnswer};
