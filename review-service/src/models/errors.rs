use crate::models::responses::DetailResponse;
use crate::models::storage::StoreError;
use crate::services::auth::AuthError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::error;

/// Field name to the messages describing what is wrong with it.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid input: {0:?}")]
    Validation(FieldErrors),
    #[error("Authentication credentials were not provided.")]
    Unauthenticated,
    #[error("Given token not valid for any token type")]
    InvalidToken,
    #[error("No active account found with the given credentials")]
    BadCredentials,
    #[error("Token is invalid or expired")]
    InvalidRefresh,
    #[error("Invalid page.")]
    InvalidPage,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ApiError {
    pub fn field(field: &str, message: &str) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![message.to_string()]);
        ApiError::Validation(errors)
    }

    fn detail(status: StatusCode, detail: String, code: Option<&str>) -> Response {
        let body = DetailResponse {
            detail,
            code: code.map(str::to_string),
        };
        (status, Json(body)).into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            ApiError::Unauthenticated | ApiError::BadCredentials => {
                Self::detail(StatusCode::UNAUTHORIZED, self.to_string(), None)
            }
            ApiError::InvalidToken | ApiError::InvalidRefresh => Self::detail(
                StatusCode::UNAUTHORIZED,
                self.to_string(),
                Some("token_not_valid"),
            ),
            ApiError::InvalidPage => Self::detail(StatusCode::NOT_FOUND, self.to_string(), None),
            ApiError::Store(e) => {
                error!("Storage failure: {}", e);
                Self::detail(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                    None,
                )
            }
            ApiError::Auth(e) => {
                error!("Auth failure: {}", e);
                Self::detail(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                    None,
                )
            }
        }
    }
}
