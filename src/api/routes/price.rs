//! One-shot price endpoints (no session)
//!
//! Both paths call the feed client directly and return immediately; they are
//! stateless and idempotent.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::Value;

use crate::api::{
    error::{ApiError, ApiResult},
    state::ApiState,
    types::{CheckResponse, PriceResponse},
    utils::{coerce_f64, get_str},
};
use crate::feeds;

/// GET /api/price/{symbol}
///
/// Get the current price for any supported token. The symbol may contain a
/// slash ("BTC/USD"), so the route uses a wildcard segment.
pub async fn get_price(
    State(state): State<ApiState>,
    Path(symbol): Path<String>,
) -> ApiResult<Json<PriceResponse>> {
    let symbol = symbol.to_uppercase();

    // Unknown symbols are a validation failure, not a fetch failure.
    if feeds::feed_id_for(&symbol).is_none() {
        return Err(ApiError::UnsupportedToken(symbol));
    }

    let sample = state.feed.fetch_price(&symbol).await?;

    Ok(Json(PriceResponse {
        success: true,
        symbol,
        price: sample.price,
        timestamp: sample.timestamp.to_rfc3339(),
    }))
}

/// POST /api/check
///
/// Check a token's current price against a threshold (single check)
pub async fn check_threshold(
    State(state): State<ApiState>,
    Json(body): Json<Value>,
) -> ApiResult<Json<CheckResponse>> {
    let symbol = get_str(&body, "symbol");
    let threshold = body.get("threshold");

    let (Some(symbol), Some(threshold)) = (symbol, threshold) else {
        return Err(ApiError::InvalidRequest(
            "Both 'symbol' and 'threshold' are required".to_string(),
        ));
    };

    let Some(threshold) = coerce_f64(threshold) else {
        return Err(ApiError::InvalidRequest(
            "Threshold must be a number".to_string(),
        ));
    };

    let symbol = symbol.to_uppercase();

    if feeds::feed_id_for(&symbol).is_none() {
        return Err(ApiError::UnsupportedToken(symbol));
    }

    let sample = state.feed.fetch_price(&symbol).await?;
    let is_below = sample.is_below(threshold);

    Ok(Json(CheckResponse {
        success: true,
        symbol,
        price: sample.price,
        threshold,
        is_below_threshold: is_below,
        result: is_below,
        timestamp: sample.timestamp.to_rfc3339(),
    }))
}
