use serde::{Deserialize, Serialize};

/// A resolved diagnosis candidate, as returned to the client.
///
/// `id` and `name` come from the external inference service when the
/// primary path succeeds; the remaining fields are backfilled from the
/// local reference table, or templated generic text when the candidate
/// has no reference entry. `description` is never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedDisease {
    pub id: String,
    pub name: String,
    pub description: String,
    pub common_symptoms: Vec<String>,
    pub risk_factors: Vec<String>,
    pub basic_treatment: String,
}

/// The subset of a detected disease persisted in history entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseSummary {
    pub id: String,
    pub name: String,
    pub description: String,
}
