//! Wire types for the external inference service.

use serde::{Deserialize, Serialize};

use crate::models::Sex;

/// A symptom asserted present, in the format the inference service
/// expects. Absent symptoms, severity, and time-course are not
/// supported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evidence {
    pub id: String,
    pub choice_id: String,
}

impl Evidence {
    pub fn present(id: &str) -> Self {
        Self {
            id: id.to_string(),
            choice_id: "present".to_string(),
        }
    }
}

/// Request body for `POST {base}/diagnosis`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisRequest {
    pub sex: Sex,
    pub age: i64,
    pub evidence: Vec<Evidence>,
}

/// Response body from `POST {base}/diagnosis`. Candidates arrive
/// pre-sorted by likelihood.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiagnosisResponse {
    #[serde(default)]
    pub conditions: Vec<ApiCondition>,
}

/// One candidate condition as returned by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiCondition {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
}

impl ApiCondition {
    /// User-facing name: prefer `common_name`, then `name`, then the id.
    pub fn display_name(&self) -> &str {
        self.common_name
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or(&self.id)
    }
}

/// One catalog entry as returned by `GET {base}/symptoms`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSymptom {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,
}

impl ApiSymptom {
    pub fn display_name(&self) -> &str {
        self.common_name
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or(&self.id)
    }
}
