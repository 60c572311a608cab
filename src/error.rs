use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::{mlb::MlbError, store::StoreError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("stats service unavailable: {0}")]
    Upstream(String),

    #[error("Internal server error")]
    Internal(anyhow::Error),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

/// Wire shape for every error: `{"error":{"message","status"}}`.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    message: String,
    status: u16,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            // Duplicate email / duplicate favorite respond 400, not 409.
            ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Internal(err) => error!(error = %err, "request failed"),
            ApiError::Upstream(msg) => error!(error = %msg, "upstream request failed"),
            other => warn!(error = %other, status = %status, "request rejected"),
        }
        let body = ErrorBody {
            error: ErrorDetail {
                message: self.to_string(),
                status: status.as_u16(),
            },
        };
        (status, axum::Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail(email) => {
                ApiError::Conflict(format!("Duplicate email: {email}"))
            }
            StoreError::DuplicateFavorite { kind, id } => {
                ApiError::Conflict(format!("Already a favorite {kind}: {id}"))
            }
            StoreError::UserNotFound(email) => ApiError::NotFound(format!("No user: {email}")),
            StoreError::Backend(err) => ApiError::Internal(err),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<MlbError> for ApiError {
    fn from(err: MlbError) -> Self {
        match err {
            MlbError::NotFound => ApiError::NotFound("Not found".into()),
            MlbError::Http(err) => ApiError::Upstream(err.to_string()),
        }
    }
}

/// `axum::Json` with rejections mapped into the error body shape above;
/// a request body that fails to parse answers 400, not 422.
pub struct Json<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Json<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
