pub mod auth;
pub mod book_info;
pub mod health;
pub mod reviews;
pub mod users;

use crate::models::storage::Store;
use crate::services::auth::TokenIssuer;
use crate::services::bookinfo::BookInfoClient;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub tokens: Arc<TokenIssuer>,
    pub book_info: Arc<BookInfoClient>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/status", get(health::health_check))
        .route("/api/register/", post(users::register))
        .route("/api/token/", post(users::obtain_token))
        .route("/api/token/refresh/", post(users::refresh_token))
        .route("/api/reviews/", post(reviews::add_review))
        .route("/api/reviews/:isbn/", get(reviews::list_reviews))
        .route("/api/book-info/", get(book_info::get_book_info))
        .with_state(state)
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use crate::models::memory::MemoryStore;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use chrono::Duration;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    pub const TEST_SECRET: &[u8] = b"test-secret-for-route-tests";

    pub fn test_state(book_info_url: &str) -> AppState {
        AppState {
            store: Arc::new(MemoryStore::new()),
            tokens: Arc::new(TokenIssuer::new(
                TEST_SECRET,
                Duration::minutes(5),
                Duration::hours(24),
            )),
            book_info: Arc::new(BookInfoClient::new(book_info_url)),
        }
    }

    pub async fn send(
        state: &AppState,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = router(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    /// Registers `username` and returns an access token for it.
    pub async fn login(state: &AppState, username: &str) -> String {
        let (status, _) = send(
            state,
            Method::POST,
            "/api/register/",
            None,
            Some(serde_json::json!({
                "username": username,
                "email": format!("{}@example.com", username),
                "password": "testpass123"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(
            state,
            Method::POST,
            "/api/token/",
            None,
            Some(serde_json::json!({"username": username, "password": "testpass123"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["access"].as_str().unwrap().to_string()
    }
}
