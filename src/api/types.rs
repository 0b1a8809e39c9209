//! Shared API response types
//!
//! Typed responses instead of ad-hoc JSON values, so the wire contract lives
//! in one place.

use serde::Serialize;

use crate::registry::{SessionData, SessionSummary};

/// Response for GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub timestamp: String,
}

/// Response for GET /api/tokens
#[derive(Debug, Clone, Serialize)]
pub struct TokensResponse {
    pub success: bool,
    pub count: usize,
    pub tokens: Vec<&'static str>,
}

/// Response for GET /api/price/{symbol}
#[derive(Debug, Clone, Serialize)]
pub struct PriceResponse {
    pub success: bool,
    pub symbol: String,
    pub price: f64,
    pub timestamp: String,
}

/// Response for POST /api/check
#[derive(Debug, Clone, Serialize)]
pub struct CheckResponse {
    pub success: bool,
    pub symbol: String,
    pub price: f64,
    pub threshold: f64,
    pub is_below_threshold: bool,
    /// Boolean result, mirrors is_below_threshold
    pub result: bool,
    pub timestamp: String,
}

/// Response for POST /api/monitor/start
#[derive(Debug, Clone, Serialize)]
pub struct StartMonitorResponse {
    pub success: bool,
    pub message: String,
    pub session_id: String,
    pub symbol: String,
    pub threshold: f64,
    pub update_interval: f64,
}

/// Response for GET /api/monitor/{id}
#[derive(Debug, Clone, Serialize)]
pub struct MonitorStatusResponse {
    pub success: bool,
    pub session_id: String,
    pub is_running: bool,
    pub data: SessionData,
}

/// Response for POST /api/monitor/{id}/stop
#[derive(Debug, Clone, Serialize)]
pub struct StopMonitorResponse {
    pub success: bool,
    pub message: String,
}

/// Response for GET /api/monitor/sessions
#[derive(Debug, Clone, Serialize)]
pub struct SessionsResponse {
    pub success: bool,
    pub count: usize,
    pub sessions: Vec<SessionSummary>,
}
