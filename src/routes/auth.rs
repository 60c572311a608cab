use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::{
    auth::{jwt::JwtKeys, password},
    error::{ApiError, Json},
    state::AppState,
    store::NewUser,
};

pub(crate) const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, axum::Json<TokenResponse>), ApiError> {
    if !is_valid_email(&payload.email) {
        return Err(ApiError::BadRequest("Invalid email".into()));
    }
    if payload.password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::BadRequest("Password too short".into()));
    }
    if payload.first_name.trim().is_empty() {
        return Err(ApiError::BadRequest("First name is required".into()));
    }

    let password_hash = password::hash_password(&payload.password)?;
    let user = state
        .store
        .insert(NewUser {
            email: payload.email,
            password_hash,
            first_name: payload.first_name,
        })
        .await?;

    let token = JwtKeys::from_ref(&state).sign(&user.email)?;
    info!(email = %user.email, "user registered");
    Ok((StatusCode::CREATED, axum::Json(TokenResponse { token })))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<axum::Json<TokenResponse>, ApiError> {
    if !is_valid_email(&payload.email) {
        return Err(ApiError::BadRequest("Invalid email".into()));
    }

    // Unknown email and wrong password are indistinguishable to the caller.
    let user = state
        .store
        .find(&payload.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email/password".to_string()))?;

    let ok = password::verify_password(&payload.password, &user.password_hash)?;
    if !ok {
        warn!(email = %user.email, "login with wrong password");
        return Err(ApiError::Unauthorized("Invalid email/password".into()));
    }

    let token = JwtKeys::from_ref(&state).sign(&user.email)?;
    info!(email = %user.email, "user logged in");
    Ok(axum::Json(TokenResponse { token }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_regex_accepts_plain_addresses() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("first.last@sub.domain.org"));
    }

    #[test]
    fn email_regex_rejects_malformed_addresses() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("spaces in@x.com"));
        assert!(!is_valid_email("@x.com"));
    }
}
