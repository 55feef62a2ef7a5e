//! Account endpoints: registration and login.
//!
//! Both issue a fresh session token on success. The token itself is
//! returned once; only its hash is stored server-side, with an expiry
//! of `session_ttl_secs`.

use std::str::FromStr;
use std::sync::OnceLock;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{Duration, Utc};
use regex::Regex;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::auth;
use crate::db::repository::{session, user};
use crate::models::{Sex, User, UserSummary};

const MIN_PASSWORD_LEN: usize = 6;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: i64,
    #[serde(default)]
    pub sex: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: UserSummary,
}

/// `POST /api/auth/register` — create an account and issue a session.
pub async fn register(
    State(ctx): State<ApiContext>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    if request.name.trim().is_empty()
        || request.sex.trim().is_empty()
        || request.email.trim().is_empty()
        || request.password.is_empty()
    {
        return Err(ApiError::BadRequest("Please enter all fields".into()));
    }
    if request.password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::BadRequest(
            "Password must be at least 6 characters long".into(),
        ));
    }
    if request.age <= 0 || request.age > 120 {
        return Err(ApiError::BadRequest(
            "Please enter a valid age between 1 and 120.".into(),
        ));
    }
    let sex = Sex::from_str(&request.sex).map_err(|_| {
        ApiError::BadRequest("Invalid sex provided. Must be \"male\" or \"female\".".into())
    })?;
    let email = request.email.trim().to_lowercase();
    if !email_pattern().is_match(&email) {
        return Err(ApiError::BadRequest("Please fill a valid email address".into()));
    }

    let conn = ctx.open_db()?;

    if user::find_user_by_email(&conn, &email)?.is_some() {
        return Err(ApiError::BadRequest("User already exists".into()));
    }

    let account = User {
        id: Uuid::new_v4(),
        name: request.name.trim().to_string(),
        age: request.age,
        sex,
        email,
        password_hash: auth::hash_password(&request.password),
        created_at: Utc::now(),
    };
    user::insert_user(&conn, &account)?;

    let token = issue_session(&conn, &ctx, &account)?;
    tracing::info!(user_id = %account.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User registered successfully!".into(),
            token,
            user: UserSummary::from(&account),
        }),
    ))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// `POST /api/auth/login` — verify credentials and issue a session.
///
/// Unknown email and wrong password produce the same rejection, so the
/// response does not reveal which accounts exist.
pub async fn login(
    State(ctx): State<ApiContext>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(ApiError::BadRequest("Please enter all fields".into()));
    }

    let conn = ctx.open_db()?;
    let email = request.email.trim().to_lowercase();

    let account = user::find_user_by_email(&conn, &email)?
        .ok_or_else(|| ApiError::BadRequest("Invalid credentials".into()))?;

    let valid = auth::verify_password(&request.password, &account.password_hash)
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    if !valid {
        return Err(ApiError::BadRequest("Invalid credentials".into()));
    }

    let token = issue_session(&conn, &ctx, &account)?;
    tracing::info!(user_id = %account.id, "User logged in");

    Ok(Json(AuthResponse {
        message: "Logged in successfully!".into(),
        token,
        user: UserSummary::from(&account),
    }))
}

/// Create a session row for the account and return the bearer token.
fn issue_session(conn: &Connection, ctx: &ApiContext, account: &User) -> Result<String, ApiError> {
    // Opportunistic cleanup keeps the table from accumulating dead rows.
    session::purge_expired(conn, Utc::now())?;

    let token = auth::generate_token();
    let now = Utc::now();
    let ttl = Duration::seconds(ctx.config.session_ttl_secs as i64);
    session::insert_session(
        conn,
        &session::SessionRecord {
            token_hash: auth::hash_token(&token),
            user_id: account.id,
            issued_at: now,
            expires_at: now + ttl,
        },
    )?;
    Ok(token)
}
