use crate::models::errors::ApiError;
use crate::models::requests::{RefreshRequest, RegisterRequest, TokenRequest};
use crate::models::responses::{AccessTokenResponse, TokenPairResponse, UserResponse};
use crate::models::storage::{NewUser, StoreError};
use crate::routes::AppState;
use crate::services::auth::{hash_password, verify_password};
use crate::services::validation::{
    validate_credentials, validate_registration, BLANK, REQUIRED, USERNAME_TAKEN,
};
use axum::{extract::State, http::StatusCode, response::Json};
use tracing::{info, warn};

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let registration = validate_registration(request)?;

    let new_user = NewUser {
        username: registration.username,
        email: registration.email,
        password_hash: hash_password(&registration.password)?,
    };

    match state.store.create_user(&new_user).await {
        Ok(user) => {
            info!("Registered user {}", user.username);
            Ok((StatusCode::CREATED, Json(user.into())))
        }
        Err(StoreError::Conflict(_)) => Err(ApiError::field("username", USERNAME_TAKEN)),
        Err(e) => Err(e.into()),
    }
}

pub async fn obtain_token(
    State(state): State<AppState>,
    Json(request): Json<TokenRequest>,
) -> Result<Json<TokenPairResponse>, ApiError> {
    let credentials = validate_credentials(request.username, request.password)?;

    let user = state
        .store
        .find_user_by_username(&credentials.username)
        .await?
        .filter(|user| verify_password(&credentials.password, &user.password_hash))
        .ok_or_else(|| {
            warn!("Failed login for {}", credentials.username);
            ApiError::BadCredentials
        })?;

    let (access, refresh) = state.tokens.issue_pair(&user)?;
    info!("Issued tokens for {}", user.username);

    Ok(Json(TokenPairResponse { access, refresh }))
}

pub async fn refresh_token(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<AccessTokenResponse>, ApiError> {
    let refresh = match request.refresh {
        None => return Err(ApiError::field("refresh", REQUIRED)),
        Some(token) if token.trim().is_empty() => return Err(ApiError::field("refresh", BLANK)),
        Some(token) => token,
    };

    let access = state.tokens.refresh(refresh.trim()).map_err(|e| {
        warn!("Rejected refresh token: {}", e);
        ApiError::InvalidRefresh
    })?;

    Ok(Json(AccessTokenResponse { access }))
}
