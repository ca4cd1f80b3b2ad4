use anyhow::Result;
use axum::{
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use risk_model::ThreatCatalog;

mod render;
mod routes;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<ThreatCatalog>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "risk_gateway=debug,info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let catalog = ThreatCatalog::with_defaults();
    tracing::info!(
        "Loaded threat catalog: {} countries, {} categories",
        catalog.countries().count(),
        catalog.categories().len()
    );

    let state = AppState {
        catalog: Arc::new(catalog),
    };

    // JSON API for programmatic access
    let api_routes = Router::new()
        .route("/assess", post(routes::assess))
        .route("/catalog", get(routes::catalog_info));

    // HTML form + results views
    let app = Router::new()
        .route("/", get(routes::index_page).post(routes::submit_weights))
        .route("/health", get(health))
        .nest("/api/v1", api_routes)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        );

    let port = std::env::var("RISK_GATEWAY_PORT")
        .or_else(|_| std::env::var("PORT"))
        .unwrap_or_else(|_| "8080".to_string());
    let addr = format!("0.0.0.0:{}", port);

    tracing::info!("Risk gateway starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "risk-gateway",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
