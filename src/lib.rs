pub mod alignment;
pub mod config;
pub mod models;
pub mod normalize;
pub mod reconstruction;
pub mod schema;
pub mod services;
pub mod transcript;

// Re-export commonly used types for convenience.
pub use alignment::{AlignmentOutcome, MatchKind, MatchSummary, MatchedEntry};
pub use config::{AlignmentSettings, AppConfig};
pub use models::{AnswerRecord, FieldDefinition, SubmissionPayload, TypedAnswer};
pub use normalize::{normalize_submission, NormalizedSubmission};
pub use schema::{SchemaField, SurveySchema};
