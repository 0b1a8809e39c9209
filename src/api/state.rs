//! API shared state

use std::sync::Arc;

use crate::feeds::HermesClient;
use crate::registry::SessionRegistry;

/// Shared state passed to all API handlers
#[derive(Clone)]
pub struct ApiState {
    /// Registry owning the monitoring sessions and their pollers
    pub registry: Arc<SessionRegistry>,

    /// Feed client for the one-shot query paths
    pub feed: HermesClient,

    /// Polling interval applied when a start request omits one
    pub default_interval_secs: f64,
}

impl ApiState {
    pub fn new(registry: Arc<SessionRegistry>, feed: HermesClient, default_interval_secs: f64) -> Self {
        Self {
            registry,
            feed,
            default_interval_secs,
        }
    }
}
