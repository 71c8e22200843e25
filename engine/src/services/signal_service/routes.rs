use super::{check_ohlcv, health, SignalService};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn router(service: Arc<SignalService>) -> Router {
    Router::new()
        .route(
            "/check_ohlcv_v2",
            post(check_ohlcv::handle_check_ohlcv_post).get(check_ohlcv::handle_check_ohlcv_get),
        )
        .route("/health", get(health::handle_health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}
