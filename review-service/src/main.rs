use chrono::Duration;
use rand::{distributions::Alphanumeric, Rng};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod models;
mod routes;
mod services;
mod utils;

use config::Config;
use models::memory::MemoryStore;
use models::storage::{PostgresStore, Store};
use routes::AppState;
use services::auth::TokenIssuer;
use services::bookinfo::BookInfoClient;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "review_service=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env();

    let store: Store = match config.backend_type.to_lowercase().as_str() {
        "postgres" | "postgresql" => {
            info!("Using PostgreSQL backend");
            let postgres_store = PostgresStore::new(&config.database_url)
                .await
                .expect("Failed to connect to PostgreSQL");

            Arc::new(postgres_store)
        }
        _ => {
            info!("Using in-memory backend");
            Arc::new(MemoryStore::new())
        }
    };

    if let Err(e) = store.test_connection().await {
        error!("Failed to connect to storage backend: {}", e);
        std::process::exit(1);
    }
    info!("Storage backend connection successful");

    let secret = config.jwt_secret.clone().unwrap_or_else(|| {
        warn!("JWT_SECRET is not set, tokens will not survive a restart");
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(48)
            .map(char::from)
            .collect()
    });

    let state = AppState {
        store,
        tokens: Arc::new(TokenIssuer::new(
            secret.as_bytes(),
            Duration::minutes(config.access_token_minutes),
            Duration::hours(config.refresh_token_hours),
        )),
        book_info: Arc::new(BookInfoClient::new(&config.bookinfo_service_url)),
    };

    let app = routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", config.port);

    info!(
        "Review service starting on {} (book info at {})",
        addr, config.bookinfo_service_url
    );

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
