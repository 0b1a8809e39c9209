pub mod actors;
pub mod api;
pub mod config;
pub mod feeds;
pub mod registry;
pub mod util;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single decoded price observation from the feed.
///
/// Produced by the feed client and consumed immediately by callers; never persisted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PriceSample {
    /// Normalized price in USD
    pub price: f64,

    /// When the sample was fetched
    pub timestamp: DateTime<Utc>,
}

impl PriceSample {
    /// Whether this sample sits below the given threshold.
    pub fn is_below(&self, threshold: f64) -> bool {
        self.price < threshold
    }
}
