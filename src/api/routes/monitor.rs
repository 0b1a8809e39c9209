//! Monitoring-session endpoints

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::Value;

use crate::api::{
    error::{ApiError, ApiResult},
    state::ApiState,
    types::{MonitorStatusResponse, SessionsResponse, StartMonitorResponse, StopMonitorResponse},
    utils::{coerce_f64, get_str},
};

/// POST /api/monitor/start
///
/// Start monitoring a token's price against a threshold. Returns a session id
/// to track the monitoring session; the poller starts before the response is
/// sent.
pub async fn start_monitor(
    State(state): State<ApiState>,
    Json(body): Json<Value>,
) -> ApiResult<Json<StartMonitorResponse>> {
    let symbol = get_str(&body, "symbol");
    let threshold = body.get("threshold");

    let (Some(symbol), Some(threshold)) = (symbol, threshold) else {
        return Err(ApiError::InvalidRequest(
            "Both 'symbol' and 'threshold' are required".to_string(),
        ));
    };

    let numbers_required = || {
        ApiError::InvalidRequest("Threshold and update_interval must be numbers".to_string())
    };

    let threshold = coerce_f64(threshold).ok_or_else(numbers_required)?;

    let interval = match body.get("update_interval") {
        Some(value) => coerce_f64(value).ok_or_else(numbers_required)?,
        None => state.default_interval_secs,
    };

    let session = state.registry.create(&symbol, threshold, interval).await?;

    Ok(Json(StartMonitorResponse {
        success: true,
        message: format!(
            "Started monitoring {} with threshold ${:.2}",
            session.symbol, session.threshold
        ),
        session_id: session.id.clone(),
        symbol: session.symbol.clone(),
        threshold: session.threshold,
        update_interval: session.interval_secs,
    }))
}

/// GET /api/monitor/{id}
///
/// Get the latest observed state of a monitoring session
pub async fn get_monitor_status(
    State(state): State<ApiState>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<MonitorStatusResponse>> {
    let session = state
        .registry
        .get(&session_id)
        .await
        .ok_or_else(|| ApiError::NotFound("Session not found".to_string()))?;

    let data = session.latest_data().await;

    Ok(Json(MonitorStatusResponse {
        success: true,
        session_id,
        is_running: session.is_running(),
        data,
    }))
}

/// POST /api/monitor/{id}/stop
///
/// Stop a monitoring session. Idempotent; the session stays queryable.
pub async fn stop_monitor(
    State(state): State<ApiState>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<StopMonitorResponse>> {
    if !state.registry.stop(&session_id).await {
        return Err(ApiError::NotFound("Session not found".to_string()));
    }

    Ok(Json(StopMonitorResponse {
        success: true,
        message: format!("Stopped monitoring session {session_id}"),
    }))
}

/// GET /api/monitor/sessions
///
/// List all monitoring sessions
pub async fn list_sessions(State(state): State<ApiState>) -> ApiResult<Json<SessionsResponse>> {
    let sessions = state.registry.list().await;

    Ok(Json(SessionsResponse {
        success: true,
        count: sessions.len(),
        sessions,
    }))
}
