pub mod book_info;
pub mod health;

use crate::services::lookup::LookupService;
use axum::{routing::get, Router};
use std::sync::Arc;

pub fn router(service: Arc<LookupService>) -> Router {
    Router::new()
        .route("/status", get(health::health_check))
        .route("/book-info", get(book_info::get_book_info))
        .with_state(service)
}
