use crate::models::responses::{BookMetadata, ErrorResponse};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

pub const ISBN_REQUIRED: &str = "ISBN is required";
pub const BOOK_NOT_FOUND: &str = "Book not found";

/// Result of a single book lookup. The boundary picks the HTTP status from
/// the variant alone.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found(BookMetadata),
    NotFound,
    InvalidInput,
    Failure(String),
}

impl LookupOutcome {
    pub fn status(&self) -> StatusCode {
        match self {
            LookupOutcome::Found(_) => StatusCode::OK,
            LookupOutcome::NotFound => StatusCode::NOT_FOUND,
            LookupOutcome::InvalidInput => StatusCode::BAD_REQUEST,
            LookupOutcome::Failure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for LookupOutcome {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            LookupOutcome::Found(metadata) => (status, Json(metadata)).into_response(),
            LookupOutcome::NotFound => {
                (status, Json(ErrorResponse::new(BOOK_NOT_FOUND))).into_response()
            }
            LookupOutcome::InvalidInput => {
                (status, Json(ErrorResponse::new(ISBN_REQUIRED))).into_response()
            }
            LookupOutcome::Failure(message) => {
                (status, Json(ErrorResponse::new(message))).into_response()
            }
        }
    }
}
