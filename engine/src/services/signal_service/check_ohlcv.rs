// Handlers for /check_ohlcv_v2
use super::SignalService;
use crate::error::EngineError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use shared::models::{AnalyzeRequest, SignalResult};
use std::sync::Arc;

pub async fn handle_check_ohlcv_post(
    State(service): State<Arc<SignalService>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<SignalResult>, EngineError> {
    let Json(request) = payload.map_err(|rejection| {
        EngineError::ValidationError(format!("Invalid request body: {}", rejection.body_text()))
    })?;
    tracing::info!(pool = %request.pair_address, "Received POST check_ohlcv_v2");
    service.check_pool(&request.pair_address).await.map(Json)
}

/// The browser frontend sends the address as a query parameter.
pub async fn handle_check_ohlcv_get(
    State(service): State<Arc<SignalService>>,
    query: Result<Query<AnalyzeRequest>, QueryRejection>,
) -> Result<Json<SignalResult>, EngineError> {
    let Query(request) = query.map_err(|rejection| {
        EngineError::ValidationError(format!("Invalid query string: {}", rejection.body_text()))
    })?;
    tracing::info!(pool = %request.pair_address, "Received GET check_ohlcv_v2");
    service.check_pool(&request.pair_address).await.map(Json)
}
