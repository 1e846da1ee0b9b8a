use crate::models::errors::ApiError;
use crate::models::requests::{PageParams, ReviewRequest};
use crate::models::responses::{PageResponse, ReviewResponse};
use crate::models::storage::NewReview;
use crate::routes::auth::AuthUser;
use crate::routes::AppState;
use crate::services::validation::validate_review;
use crate::utils::pagination::Page;
use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
    response::Json,
};
use tracing::info;

pub async fn add_review(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<ReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>), ApiError> {
    let review = validate_review(request)?;

    let stored = state
        .store
        .add_review(
            &user,
            &NewReview {
                isbn: review.isbn,
                title: review.title,
                comment: review.comment,
            },
        )
        .await?;

    info!("{} reviewed ISBN {}", user.username, stored.isbn);
    Ok((StatusCode::CREATED, Json(stored.into())))
}

pub async fn list_reviews(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(isbn): Path<String>,
    Query(params): Query<PageParams>,
    uri: Uri,
) -> Result<Json<PageResponse<ReviewResponse>>, ApiError> {
    let count = state.store.count_reviews(&isbn).await?;
    let page = Page::resolve(&params, count)?;

    let results = state
        .store
        .list_reviews(&isbn, page.offset(), page.size)
        .await?
        .into_iter()
        .map(ReviewResponse::from)
        .collect();

    Ok(Json(PageResponse {
        count,
        next: page.next_link(uri.path(), count),
        previous: page.previous_link(uri.path()),
        results,
    }))
}
