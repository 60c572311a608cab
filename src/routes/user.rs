use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::{
    auth::{jwt::AuthUser, password},
    error::{ApiError, Json},
    state::AppState,
    store::UserPatch,
};

use super::auth::MIN_PASSWORD_LEN;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetail {
    pub email: String,
    pub first_name: String,
    pub favorite_team_ids: Vec<i32>,
    pub favorite_player_ids: Vec<i32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPublic {
    pub email: String,
    pub first_name: String,
}

#[derive(Debug, Serialize)]
struct DetailResponse {
    user: UserDetail,
}

#[derive(Debug, Serialize)]
struct PublicResponse {
    user: UserPublic,
}

#[derive(Debug, Serialize)]
struct DeletedResponse {
    deleted: String,
}

/// Only the display name and the password can change; `deny_unknown_fields`
/// turns an attempted email change into a 400.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub password: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/user", get(get_current_user))
        .route("/user/:email", axum::routing::patch(update_user).delete(delete_user))
}

fn ensure_same_user(auth_email: &str, path_email: &str) -> Result<(), ApiError> {
    if auth_email != path_email {
        warn!(auth_email = %auth_email, path_email = %path_email, "cross-account access denied");
        return Err(ApiError::Unauthorized(
            "Cannot act on another user's account".to_string(),
        ));
    }
    Ok(())
}

#[instrument(skip(state))]
async fn get_current_user(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
) -> Result<axum::Json<DetailResponse>, ApiError> {
    let user = state
        .store
        .find(&email)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No user: {email}")))?;

    Ok(axum::Json(DetailResponse {
        user: UserDetail {
            email: user.email,
            first_name: user.first_name,
            favorite_team_ids: user.favorite_teams,
            favorite_player_ids: user.favorite_players,
        },
    }))
}

#[instrument(skip(state, payload))]
async fn update_user(
    State(state): State<AppState>,
    AuthUser(auth_email): AuthUser,
    Path(email): Path<String>,
    payload: Result<Json<UpdateUserRequest>, ApiError>,
) -> Result<axum::Json<PublicResponse>, ApiError> {
    // The same-user check comes first: acting on another account is 401
    // regardless of what the body looks like.
    ensure_same_user(&auth_email, &email)?;
    let Json(payload) = payload?;

    if payload.first_name.is_none() && payload.password.is_none() {
        return Err(ApiError::BadRequest("Nothing to update".into()));
    }
    if let Some(first_name) = &payload.first_name {
        if first_name.trim().is_empty() {
            return Err(ApiError::BadRequest("First name must not be empty".into()));
        }
    }
    let password_hash = match &payload.password {
        Some(p) if p.len() < MIN_PASSWORD_LEN => {
            return Err(ApiError::BadRequest("Password too short".into()));
        }
        Some(p) => Some(password::hash_password(p)?),
        None => None,
    };

    let user = state
        .store
        .update(
            &email,
            UserPatch {
                first_name: payload.first_name,
                password_hash,
            },
        )
        .await?;

    info!(email = %user.email, "user updated");
    Ok(axum::Json(PublicResponse {
        user: UserPublic {
            email: user.email,
            first_name: user.first_name,
        },
    }))
}

#[instrument(skip(state))]
async fn delete_user(
    State(state): State<AppState>,
    AuthUser(auth_email): AuthUser,
    Path(email): Path<String>,
) -> Result<axum::Json<DeletedResponse>, ApiError> {
    ensure_same_user(&auth_email, &email)?;
    state.store.delete(&email).await?;
    info!(email = %email, "user deleted");
    Ok(axum::Json(DeletedResponse { deleted: email }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_response_uses_camel_case_id_lists() {
        let response = DetailResponse {
            user: UserDetail {
                email: "a@x.com".into(),
                first_name: "A".into(),
                favorite_team_ids: vec![5],
                favorite_player_ids: vec![],
            },
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["user"]["favoriteTeamIds"], serde_json::json!([5]));
        assert_eq!(json["user"]["favoritePlayerIds"], serde_json::json!([]));
        assert!(json["user"].get("passwordHash").is_none());
    }

    #[test]
    fn update_request_rejects_unknown_fields() {
        let err = serde_json::from_value::<UpdateUserRequest>(serde_json::json!({
            "email": "new@x.com"
        }));
        assert!(err.is_err());
    }

    #[test]
    fn same_user_guard_rejects_mismatched_emails() {
        assert!(ensure_same_user("a@x.com", "b@x.com").is_err());
        assert!(ensure_same_user("a@x.com", "a@x.com").is_ok());
    }
}
