use crate::models::outcome::LookupOutcome;
use crate::services::lookup::LookupService;
use axum::extract::{Query, State};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct BookInfoParams {
    pub isbn: Option<String>,
}

pub async fn get_book_info(
    Query(params): Query<BookInfoParams>,
    State(service): State<Arc<LookupService>>,
) -> LookupOutcome {
    info!("Book info request: {:?}", params);
    service.lookup(params.isbn.as_deref()).await
}
