//! Token enumeration endpoint

use axum::Json;

use crate::api::types::TokensResponse;
use crate::feeds;

/// GET /api/tokens
///
/// List all symbols with a known price feed
pub async fn list_tokens() -> Json<TokensResponse> {
    let tokens = feeds::available_symbols();

    Json(TokensResponse {
        success: true,
        count: tokens.len(),
        tokens,
    })
}
