use std::sync::Arc;

use super::reference::{ConditionRef, ConditionTable};
use super::ResolveError;
use crate::inference::{DiagnosisRequest, Evidence, InferenceApi, InferenceError};
use crate::models::{DetectedDisease, Sex};

/// Resolves a set of selected symptom ids to a candidate condition.
///
/// The primary path calls the external inference service and enriches
/// its top candidate from the reference table. On upstream failure the
/// resolver degrades to a local set-overlap scan; the failure is only
/// surfaced when that scan also finds nothing. Nothing is ever retried.
pub struct DiagnosisResolver {
    engine: Arc<dyn InferenceApi>,
    table: Arc<ConditionTable>,
}

impl DiagnosisResolver {
    pub fn new(engine: Arc<dyn InferenceApi>, table: Arc<ConditionTable>) -> Self {
        Self { engine, table }
    }

    /// Resolve symptoms to zero or more candidate conditions.
    ///
    /// The primary path yields at most one (enriched) result; the
    /// fallback path may yield several, one per overlapping reference
    /// entry. Zero candidates from a healthy service is an empty
    /// success, not an error.
    pub async fn resolve(
        &self,
        symptom_ids: &[String],
        sex: Sex,
        age: i64,
    ) -> Result<Vec<DetectedDisease>, ResolveError> {
        if symptom_ids.is_empty() {
            return Err(ResolveError::Validation(
                "Please provide an array of symptom IDs.".into(),
            ));
        }
        if age <= 0 {
            return Err(ResolveError::Validation(
                "A valid age is required for diagnosis.".into(),
            ));
        }

        let request = DiagnosisRequest {
            sex,
            age,
            evidence: symptom_ids.iter().map(|id| Evidence::present(id)).collect(),
        };

        match self.engine.diagnosis(&request).await {
            Ok(response) => {
                let Some(top) = response.conditions.into_iter().next() else {
                    // No disease detected: empty success.
                    return Ok(Vec::new());
                };
                let display_name = top.display_name().to_string();
                Ok(vec![self.enrich(top.id, display_name)])
            }
            Err(err) => self.degrade(symptom_ids, err),
        }
    }

    /// Merge reference-table metadata into the service's top candidate,
    /// or synthesize generic text when the id has no reference entry.
    fn enrich(&self, id: String, display_name: String) -> DetectedDisease {
        match self.table.find(&id) {
            Some(entry) => DetectedDisease {
                id,
                name: display_name,
                description: entry.description.clone(),
                common_symptoms: entry.common_symptoms.clone(),
                risk_factors: entry.risk_factors.clone(),
                basic_treatment: entry.basic_treatment.clone(),
            },
            None => DetectedDisease {
                id,
                name: display_name.clone(),
                description: format!(
                    "A potential condition: {display_name}. Consult a medical professional for more details."
                ),
                common_symptoms: Vec::new(),
                risk_factors: Vec::new(),
                basic_treatment:
                    "Consult a medical professional for proper diagnosis and treatment.".into(),
            },
        }
    }

    /// Fallback: return every reference entry sharing a symptom with
    /// the input, unmodified from the table. The upstream error is
    /// surfaced only when no entry overlaps.
    fn degrade(
        &self,
        symptom_ids: &[String],
        err: InferenceError,
    ) -> Result<Vec<DetectedDisease>, ResolveError> {
        tracing::warn!(error = %err, "Inference service failed, falling back to local matching");

        let matches = self.table.match_symptoms(symptom_ids);
        if !matches.is_empty() {
            return Ok(matches.into_iter().map(reference_to_disease).collect());
        }

        Err(ResolveError::Upstream {
            status: err.status(),
            details: err
                .payload()
                .map(str::to_string)
                .unwrap_or_else(|| err.to_string()),
        })
    }
}

fn reference_to_disease(entry: &ConditionRef) -> DetectedDisease {
    DetectedDisease {
        id: entry.id.clone(),
        name: entry.name.clone(),
        description: entry.description.clone(),
        common_symptoms: entry.common_symptoms.clone(),
        risk_factors: entry.risk_factors.clone(),
        basic_treatment: entry.basic_treatment.clone(),
    }
}
