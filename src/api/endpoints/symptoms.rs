//! Symptom catalog endpoint.
//!
//! A pass-through of the external service's catalog, mapped to the
//! `{id, name}` shape the frontend selects from. There is no local
//! fallback here; the reference table holds conditions, not symptoms.

use axum::extract::State;
use axum::{Extension, Json};

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, UserContext};
use crate::models::Symptom;

/// `GET /api/symptoms` — the selectable symptom catalog.
pub async fn catalog(
    State(ctx): State<ApiContext>,
    Extension(_user): Extension<UserContext>,
) -> Result<Json<Vec<Symptom>>, ApiError> {
    let catalog = ctx
        .inference
        .symptoms()
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch symptoms from external API.", &e))?;

    let symptoms = catalog
        .into_iter()
        .map(|entry| {
            let name = entry.display_name().to_string();
            Symptom { id: entry.id, name }
        })
        .collect();

    Ok(Json(symptoms))
}
