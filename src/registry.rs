//! Session registry for price-monitoring sessions
//!
//! Owns the set of monitoring sessions and their latest observed state.
//! The registry is created once at startup and injected into the API state;
//! there is no ambient global. Session ids come from a monotonic counter
//! (`session_1`, `session_2`, ...).
//!
//! Each session has exactly one owning poller task writing its latest sample;
//! handlers only read snapshots. Stopping a session flips its running flag and
//! signals the poller's command channel. Stopped sessions stay queryable,
//! frozen at their last sample, until process exit.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::PriceSample;
use crate::actors::poller::PollerHandle;
use crate::feeds::{self, HermesClient};

/// Floor for the polling interval, bounding request rate against the feed
pub const MIN_INTERVAL_SECS: f64 = 0.5;

/// Polling interval used when the start request does not specify one
pub const DEFAULT_INTERVAL_SECS: f64 = 10.0;

/// Clamp a requested polling interval up to the allowed floor.
pub fn clamp_interval(interval_secs: f64) -> f64 {
    if interval_secs < MIN_INTERVAL_SECS {
        MIN_INTERVAL_SECS
    } else {
        interval_secs
    }
}

/// Lifecycle status of a monitoring session
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SessionStatus {
    /// Session created, no fetch has completed yet
    #[serde(rename = "Starting...")]
    Starting,

    /// At least one fetch succeeded, samples are flowing
    Monitoring,

    /// Session stopped; state is frozen at the last sample
    Stopped,
}

impl SessionStatus {
    /// Get the string representation
    ///
    /// This matches the serde serialization format.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Starting => "Starting...",
            SessionStatus::Monitoring => "Monitoring",
            SessionStatus::Stopped => "Stopped",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Latest observed state of a session, as exposed by the status endpoint
#[derive(Debug, Clone, Serialize)]
pub struct SessionData {
    pub symbol: String,
    pub price: Option<f64>,
    pub is_below_threshold: Option<bool>,
    pub threshold: f64,
    pub timestamp: Option<String>,
    pub status: SessionStatus,
}

/// Summary row for session enumeration
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub symbol: String,
    pub threshold: f64,
    pub is_running: bool,
    pub status: SessionStatus,
}

/// Errors that can occur when creating a session
#[derive(Debug)]
pub enum SessionError {
    /// The symbol has no known price feed
    UnknownSymbol(String),

    /// Threshold is not a positive finite number
    InvalidThreshold,

    /// Interval is not a positive finite number
    InvalidInterval,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::UnknownSymbol(symbol) => {
                write!(f, "Unsupported token: {}", symbol)
            }
            SessionError::InvalidThreshold => {
                write!(f, "Threshold must be a positive number")
            }
            SessionError::InvalidInterval => {
                write!(f, "Update interval must be a positive number")
            }
        }
    }
}

impl std::error::Error for SessionError {}

/// Runtime state of one monitoring session
///
/// The owning poller is the sole writer of `data`; any number of status
/// queries read it concurrently.
#[derive(Debug)]
pub struct MonitorSession {
    /// Session identifier (format: "session_N")
    pub id: String,

    /// Monitored symbol (uppercase)
    pub symbol: String,

    /// Threshold in USD
    pub threshold: f64,

    /// Polling interval in seconds, already clamped
    pub interval_secs: f64,

    running: AtomicBool,
    data: RwLock<SessionData>,
}

impl MonitorSession {
    pub(crate) fn new(id: String, symbol: String, threshold: f64, interval_secs: f64) -> Self {
        let data = SessionData {
            symbol: symbol.clone(),
            price: None,
            is_below_threshold: None,
            threshold,
            timestamp: None,
            status: SessionStatus::Starting,
        };

        Self {
            id,
            symbol,
            threshold,
            interval_secs,
            running: AtomicBool::new(true),
            data: RwLock::new(data),
        }
    }

    /// Polling interval as a [`Duration`].
    pub fn interval(&self) -> Duration {
        Duration::from_secs_f64(self.interval_secs)
    }

    /// Whether the session is still active.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Snapshot of the latest observed state.
    pub async fn latest_data(&self) -> SessionData {
        self.data.read().await.clone()
    }

    /// Record a successful sample.
    ///
    /// Skipped if the session was stopped while the fetch was in flight, so a
    /// stopped session never transitions back to "Monitoring".
    pub async fn record_sample(&self, sample: PriceSample) {
        let mut data = self.data.write().await;

        if !self.is_running() {
            return;
        }

        data.price = Some(sample.price);
        data.is_below_threshold = Some(sample.is_below(self.threshold));
        data.timestamp = Some(sample.timestamp.to_rfc3339());
        data.status = SessionStatus::Monitoring;
    }

    /// Flip the session to the terminal stopped state. Idempotent.
    pub async fn mark_stopped(&self) {
        let mut data = self.data.write().await;
        self.running.store(false, Ordering::SeqCst);
        data.status = SessionStatus::Stopped;
    }
}

struct SessionEntry {
    session: Arc<MonitorSession>,
    handle: PollerHandle,
}

/// Registry of all monitoring sessions
pub struct SessionRegistry {
    feed: HermesClient,
    sessions: RwLock<HashMap<String, SessionEntry>>,
    counter: AtomicU64,
}

impl SessionRegistry {
    /// Create an empty registry whose pollers fetch through the given client.
    pub fn new(feed: HermesClient) -> Self {
        Self {
            feed,
            sessions: RwLock::new(HashMap::new()),
            counter: AtomicU64::new(0),
        }
    }

    /// Create a new session and spawn its poller.
    ///
    /// The symbol is uppercased before validation. An interval below
    /// [`MIN_INTERVAL_SECS`] is clamped up, not rejected.
    pub async fn create(
        &self,
        symbol: &str,
        threshold: f64,
        interval_secs: f64,
    ) -> Result<Arc<MonitorSession>, SessionError> {
        let symbol = symbol.to_uppercase();

        if feeds::feed_id_for(&symbol).is_none() {
            return Err(SessionError::UnknownSymbol(symbol));
        }

        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(SessionError::InvalidThreshold);
        }

        if !interval_secs.is_finite() || interval_secs <= 0.0 {
            return Err(SessionError::InvalidInterval);
        }

        let interval_secs = clamp_interval(interval_secs);

        let id = format!("session_{}", self.counter.fetch_add(1, Ordering::SeqCst) + 1);
        let session = Arc::new(MonitorSession::new(
            id.clone(),
            symbol,
            threshold,
            interval_secs,
        ));

        let handle = PollerHandle::spawn(session.clone(), self.feed.clone());

        debug!(
            "created {} for {} (threshold {}, interval {}s)",
            id, session.symbol, threshold, interval_secs
        );

        self.sessions.write().await.insert(
            id,
            SessionEntry {
                session: session.clone(),
                handle,
            },
        );

        Ok(session)
    }

    /// Look up a session by id.
    pub async fn get(&self, id: &str) -> Option<Arc<MonitorSession>> {
        self.sessions
            .read()
            .await
            .get(id)
            .map(|entry| entry.session.clone())
    }

    /// Stop a session. Returns `false` if the id is unknown.
    ///
    /// Idempotent: stopping an already-stopped session succeeds and changes
    /// nothing.
    pub async fn stop(&self, id: &str) -> bool {
        let (session, handle) = {
            let sessions = self.sessions.read().await;
            let Some(entry) = sessions.get(id) else {
                return false;
            };
            (entry.session.clone(), entry.handle.clone())
        };

        session.mark_stopped().await;

        // The poller may already have exited after an earlier stop.
        let _ = handle.shutdown().await;

        debug!("stopped {}", id);

        true
    }

    /// Snapshot of all sessions for enumeration.
    pub async fn list(&self) -> Vec<SessionSummary> {
        let sessions = self.sessions.read().await;

        let mut summaries = Vec::with_capacity(sessions.len());
        for entry in sessions.values() {
            let session = &entry.session;
            let data = session.latest_data().await;
            summaries.push(SessionSummary {
                session_id: session.id.clone(),
                symbol: session.symbol.clone(),
                threshold: session.threshold,
                is_running: session.is_running(),
                status: data.status,
            });
        }

        summaries
    }
}
