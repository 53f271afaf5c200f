//! Contracts for the external collaborators around the pipeline.
//!
//! Scoring and persistence are not implemented here; the pipeline only
//! fixes the shapes it hands them and what it expects back.

use crate::normalize::NormalizedSubmission;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One destination record from the static trip catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogItem {
    pub title: String,
    pub tier: u32,
    pub pb_sd: String,
    pub continent: String,
    #[serde(default)]
    pub transport_modes: Vec<String>,
    #[serde(default)]
    pub themes: Vec<String>,
    pub activity_level: u32,
    pub cultural_depth: u32,
    #[serde(default)]
    pub region_examples: Vec<String>,
    pub description: String,
}

/// One scored catalog item in a ranked list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedItem {
    pub title: String,
    pub score: f64,
    pub rationale: String,
}

/// One row of the full scoring audit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditRow {
    pub title: String,
    pub score: f64,
    pub tier: String,
    pub pb_sd: String,
    pub continent: String,
}

/// The JSON object a scoring model must return: the leading picks, the
/// runners-up, and an audit table covering the whole catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RankedOutput {
    #[serde(rename = "top_8", default)]
    pub top: Vec<RankedItem>,
    #[serde(rename = "next_5", default)]
    pub runners_up: Vec<RankedItem>,
    #[serde(rename = "audit_table", default)]
    pub audit: Vec<AuditRow>,
}

/// Scores catalog items against a normalized submission and returns a
/// ranked list.
pub trait RecommendationScorer {
    fn score(&self, catalog: &[CatalogItem], profile: &NormalizedSubmission)
        -> Result<RankedOutput>;
}

/// Stores submissions and scoring outputs.
///
/// Implementations must return the generated row identifier and fail the
/// whole operation when the backend does not produce one.
pub trait SubmissionStore {
    /// Persists a raw payload together with its normalized form; returns
    /// the new row identifier.
    fn store_submission(&self, raw: &Value, normalized: &NormalizedSubmission) -> Result<String>;

    /// Persists a scoring output linked to a stored submission; returns
    /// the new row identifier.
    fn store_ranking(&self, submission_row_id: &str, output: &RankedOutput) -> Result<String>;
}
