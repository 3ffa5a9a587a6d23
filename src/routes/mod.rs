use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{error::AppResult, middleware, state::AppState};

pub mod dishes;
pub mod pairings;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(
            TraceLayer::new_for_http().make_span_with(middleware::make_span_with_request_id),
        )
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(dishes::list_categories))
        .route("/categories/:category/dishes", get(dishes::list_dishes))
        .route("/dishes/:name", get(dishes::get_dish))
        .route("/dishes/:name/pairings", get(pairings::recommend_for_dish))
        .route("/pairings/narrative", post(pairings::narrative))
        .route("/summary", get(summary))
        .route("/reload", post(reload))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Session summary: counts, wine types, and when the snapshot loaded
async fn summary(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let data = state.sessions.snapshot().await?;
    Ok(Json(json!({
        "wines": data.catalog.len(),
        "dishes": data.dishes.len(),
        "wine_types": data.wine_types,
        "loaded_at": data.loaded_at,
    })))
}

/// Explicit reload: invalidates the session cache and eagerly loads a
/// fresh snapshot so source connectivity problems surface here
async fn reload(State(state): State<AppState>) -> AppResult<Json<Value>> {
    state.sessions.invalidate().await;
    let data = state.sessions.snapshot().await?;
    Ok(Json(json!({
        "status": "reloaded",
        "wines": data.catalog.len(),
        "dishes": data.dishes.len(),
    })))
}
