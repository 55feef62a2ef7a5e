//! Diagnosis endpoint: the HTTP face of the resolution workflow.

use std::str::FromStr;

use axum::extract::State;
use axum::{Extension, Json};
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, UserContext};
use crate::models::{DetectedDisease, Sex};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnoseRequest {
    #[serde(default)]
    pub symptom_ids: Vec<String>,
    #[serde(default)]
    pub sex: String,
    #[serde(default)]
    pub age: i64,
}

/// `POST /api/diagnose` — resolve selected symptoms to a candidate
/// condition. Returns at most one result on the primary path, several
/// on the fallback path, or an empty list when the service reports no
/// candidates.
pub async fn resolve(
    State(ctx): State<ApiContext>,
    Extension(_user): Extension<UserContext>,
    Json(request): Json<DiagnoseRequest>,
) -> Result<Json<Vec<DetectedDisease>>, ApiError> {
    if request.symptom_ids.is_empty() {
        return Err(ApiError::BadRequest(
            "Please provide an array of symptom IDs.".into(),
        ));
    }
    if request.sex.trim().is_empty() || request.age <= 0 {
        return Err(ApiError::BadRequest(
            "Sex and a valid Age are required for diagnosis.".into(),
        ));
    }
    let sex = Sex::from_str(&request.sex).map_err(|_| {
        ApiError::BadRequest("Invalid sex provided. Must be \"male\" or \"female\".".into())
    })?;

    let results = ctx
        .resolver
        .resolve(&request.symptom_ids, sex, request.age)
        .await?;

    Ok(Json(results))
}
