use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::condition::DiseaseSummary;
use super::enums::Sex;
use super::symptom::Symptom;

/// One completed diagnosis, recorded for the requesting user.
/// Entries are append-only: never mutated or deleted by this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_age: i64,
    pub user_sex: Sex,
    pub selected_symptoms: Vec<Symptom>,
    pub detected_disease: DiseaseSummary,
    pub timestamp: DateTime<Utc>,
}
