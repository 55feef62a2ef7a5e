//! Bearer credential authentication middleware.
//!
//! Extracts `Authorization: Bearer <token>`, resolves the token hash to
//! a server-side session, and injects [`UserContext`] into request
//! extensions for downstream handlers. The three rejection cases are
//! distinct: missing credential, invalid credential, expired credential.
//! Expired session rows are deleted when encountered.

use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::Utc;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, UserContext};
use crate::auth;
use crate::db::repository::{session, user};

/// Require a valid session credential.
///
/// Accesses `ApiContext` from request extensions (injected by Extension layer).
pub async fn require_auth(req: Request<axum::body::Body>, next: Next) -> Response {
    match require_auth_inner(req, next).await {
        Ok(resp) => resp,
        Err(err) => err.into_response(),
    }
}

async fn require_auth_inner(
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let ctx: ApiContext = req
        .extensions()
        .get::<ApiContext>()
        .cloned()
        .ok_or(ApiError::Internal("missing API context".into()))?;

    // 1. Extract the bearer token; its absence is its own rejection
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(ApiError::NoCredential)?
        .to_string();

    // 2. Resolve the token hash to a session
    let conn = ctx.open_db()?;
    let token_hash = auth::hash_token(&token);

    let record = session::find_session(&conn, &token_hash)?
        .ok_or(ApiError::InvalidCredential)?;

    if record.expires_at <= Utc::now() {
        session::delete_session(&conn, &token_hash)?;
        return Err(ApiError::CredentialExpired);
    }

    // 3. Resolve the session to a user identity
    let account = user::find_user_by_id(&conn, &record.user_id)?
        .ok_or(ApiError::InvalidCredential)?;

    req.extensions_mut().insert(UserContext {
        user_id: account.id,
        name: account.name,
        age: account.age,
        sex: account.sex,
    });

    // 4. Process request
    Ok(next.run(req).await)
}
