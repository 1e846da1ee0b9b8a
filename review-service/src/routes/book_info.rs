use crate::models::requests::BookInfoParams;
use crate::models::responses::ErrorResponse;
use crate::routes::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::error;

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Relays the lookup service's answer for `?isbn=`, status included.
pub async fn get_book_info(
    State(state): State<AppState>,
    Query(params): Query<BookInfoParams>,
) -> Response {
    let isbn = match params.isbn.as_deref().map(str::trim) {
        Some(isbn) if !isbn.is_empty() => isbn,
        _ => return error_response(StatusCode::BAD_REQUEST, "ISBN is required"),
    };

    match state.book_info.get_book_info(isbn).await {
        Ok((status, body)) => match StatusCode::from_u16(status) {
            Ok(status) => (status, Json(body)).into_response(),
            Err(_) => {
                error!("Book info service answered with status {}", status);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        },
        Err(e) => {
            error!("Couldn't get book info for ISBN {}: {}", isbn, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}
