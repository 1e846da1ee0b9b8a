use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod models;
mod routes;
mod services;
mod utils;

use config::Config;
use services::catalog::{Catalog, HttpCatalogClient};
use services::lookup::LookupService;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookinfo_service=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env();
    info!("Using catalog at {}", config.catalog_base_url);

    let catalog: Catalog = Arc::new(HttpCatalogClient::new(&config.catalog_base_url));
    let service = Arc::new(LookupService::new(catalog));

    let app = routes::router(service)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", config.port);

    info!("Book info service starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
