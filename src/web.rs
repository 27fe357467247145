//! HTTP API for the price checker
//!
//! Exposes the batch price check plus store listing and health endpoints,
//! all JSON with permissive CORS for browser frontends.

use axum::extract::State;
use axum::http::{header, Method, StatusCode};
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::checker::PriceChecker;
use crate::models::{BatchSummary, CardRecord};

/// Shared application state (immutable checker)
#[derive(Clone)]
struct AppState {
    checker: Arc<PriceChecker>,
}

/// POST /api/check-prices request body
#[derive(Deserialize)]
struct CheckPricesRequest {
    /// Newline-delimited card names
    #[serde(default)]
    cards: String,
    /// Selected store keys
    #[serde(default)]
    stores: Vec<String>,
}

#[derive(Serialize)]
struct CheckPricesResponse {
    success: bool,
    results: Vec<CardRecord>,
    summary: BatchSummary,
    selected_stores: Vec<String>,
}

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
}

fn error_response(status: StatusCode, message: String) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            success: false,
            error: message,
        }),
    )
}

/// POST /api/check-prices
async fn check_prices_handler(
    State(state): State<AppState>,
    Json(request): Json<CheckPricesRequest>,
) -> Result<Json<CheckPricesResponse>, (StatusCode, Json<ErrorResponse>)> {
    let report = state
        .checker
        .run_batch(&request.cards, &request.stores)
        .await
        .map_err(|e| {
            let status = if e.is_request_error() {
                StatusCode::BAD_REQUEST
            } else {
                log::error!("Batch check failed: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            };
            error_response(status, e.to_string())
        })?;

    Ok(Json(CheckPricesResponse {
        success: true,
        results: report.results,
        summary: report.summary,
        selected_stores: request.stores,
    }))
}

#[derive(Serialize)]
struct StoreInfo {
    key: String,
    name: String,
    #[serde(rename = "type")]
    kind: &'static str,
}

/// GET /api/stores
async fn stores_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    let stores: Vec<StoreInfo> = state
        .checker
        .store_configs()
        .map(|(key, config)| StoreInfo {
            key: key.clone(),
            name: config.name.clone(),
            kind: config.kind.as_str(),
        })
        .collect();

    Json(serde_json::json!({ "success": true, "stores": stores }))
}

/// GET /api/health
async fn health_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "stores_configured": state.checker.store_count(),
    }))
}

/// Build the API router
pub fn create_router(checker: Arc<PriceChecker>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/check-prices", post(check_prices_handler))
        .route("/api/stores", get(stores_handler))
        .route("/api/health", get(health_handler))
        .layer(cors)
        .with_state(AppState { checker })
}

/// Start the API server with graceful shutdown on ctrl-c
pub async fn serve(checker: Arc<PriceChecker>, host: &str, port: u16) -> crate::error::Result<()> {
    let app = create_router(checker);
    let addr = format!("{}:{}", host, port);

    log::info!("API server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    log::info!("Shutdown signal received");
}
