use crate::models::errors::ApiError;
use crate::models::storage::User;
use crate::routes::AppState;
use crate::services::auth::TokenType;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::debug;

/// The user behind a valid `Authorization: Bearer <access token>` header.
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(ApiError::Unauthenticated)?;

        let claims = state
            .tokens
            .verify(token, TokenType::Access)
            .map_err(|e| {
                debug!("Rejected bearer token: {}", e);
                ApiError::InvalidToken
            })?;

        let user = state
            .store
            .find_user_by_id(claims.user_id)
            .await?
            .ok_or(ApiError::InvalidToken)?;

        Ok(AuthUser(user))
    }
}
