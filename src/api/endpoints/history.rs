//! History endpoints.
//!
//! Two endpoints:
//! - `POST /api/history` — record a completed diagnosis
//! - `GET /api/history` — the caller's past queries, newest first
//!
//! Entries are append-only and stamped with the authenticated user's
//! identity; a save failure is reported but never retried (the
//! diagnosis already shown to the user is unaffected).

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, UserContext};
use crate::db::repository::history;
use crate::models::{DiseaseSummary, HistoryEntry, Symptom};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordRequest {
    #[serde(default)]
    pub selected_symptoms: Vec<Symptom>,
    pub detected_disease: Option<DiseaseSummary>,
}

#[derive(Serialize)]
pub struct RecordResponse {
    pub message: String,
    pub entry: HistoryEntry,
}

/// `POST /api/history` — persist one completed diagnosis.
pub async fn record(
    State(ctx): State<ApiContext>,
    Extension(user): Extension<UserContext>,
    Json(request): Json<RecordRequest>,
) -> Result<(StatusCode, Json<RecordResponse>), ApiError> {
    let Some(detected_disease) = request.detected_disease else {
        return Err(ApiError::BadRequest("Invalid history data provided.".into()));
    };
    if request.selected_symptoms.is_empty() {
        return Err(ApiError::BadRequest("Invalid history data provided.".into()));
    }

    let entry = HistoryEntry {
        id: Uuid::new_v4(),
        user_id: user.user_id,
        user_name: user.name,
        user_age: user.age,
        user_sex: user.sex,
        selected_symptoms: request.selected_symptoms,
        detected_disease,
        timestamp: Utc::now(),
    };

    let conn = ctx.open_db()?;
    history::insert_history(&conn, &entry)
        .map_err(|_| ApiError::Persistence("Failed to save history.".into()))?;

    Ok((
        StatusCode::CREATED,
        Json(RecordResponse {
            message: "History saved successfully!".into(),
            entry,
        }),
    ))
}

/// `GET /api/history` — the caller's saved queries, newest first.
pub async fn list(
    State(ctx): State<ApiContext>,
    Extension(user): Extension<UserContext>,
) -> Result<Json<Vec<HistoryEntry>>, ApiError> {
    let conn = ctx.open_db()?;
    let entries = history::history_for_user(&conn, &user.user_id)
        .map_err(|_| ApiError::Persistence("Failed to fetch history.".into()))?;
    Ok(Json(entries))
}
