//! SessionPollerActor - fetches one session's price on an interval
//!
//! One poller exists per monitoring session. The actor loops: fetch a sample,
//! write it into the session state, sleep for the session's interval. A failed
//! fetch leaves the previous sample untouched and retries after a fixed short
//! backoff instead of the full interval; only an explicit stop terminates the
//! loop.
//!
//! ## Message Flow
//!
//! ```text
//! Sleep elapses → Fetch price → Compare to threshold → Write session state
//!     ↑
//!     └─── Commands (PollNow, Shutdown)
//! ```

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument, trace, warn};

use crate::feeds::HermesClient;
use crate::registry::MonitorSession;

use super::messages::PollerCommand;

/// Retry delay after a failed fetch
const FETCH_BACKOFF: Duration = Duration::from_secs(5);

/// Actor that polls the price feed for a single session
pub struct SessionPollerActor {
    /// Session state this poller owns the writes to
    session: Arc<MonitorSession>,

    /// Feed client (shared connection pool)
    feed: HermesClient,

    /// Command receiver for control messages
    command_rx: mpsc::Receiver<PollerCommand>,
}

impl SessionPollerActor {
    fn new(
        session: Arc<MonitorSession>,
        feed: HermesClient,
        command_rx: mpsc::Receiver<PollerCommand>,
    ) -> Self {
        Self {
            session,
            feed,
            command_rx,
        }
    }

    /// Run the actor's main loop
    ///
    /// The first fetch happens immediately after spawn; the session only shows
    /// "Starting..." until it completes. The loop runs until:
    /// - the session's running flag is observed false
    /// - a Shutdown command is received
    /// - the command channel is closed
    #[instrument(skip(self), fields(session = %self.session.id, symbol = %self.session.symbol))]
    pub async fn run(mut self) {
        debug!("starting session poller");

        let mut delay = self.poll_and_next_delay().await;

        loop {
            if !self.session.is_running() {
                break;
            }

            tokio::select! {
                _ = tokio::time::sleep(delay) => {
                    if !self.session.is_running() {
                        break;
                    }
                    delay = self.poll_and_next_delay().await;
                }

                cmd = self.command_rx.recv() => match cmd {
                    Some(PollerCommand::PollNow { respond_to }) => {
                        debug!("received PollNow command");
                        let result = self.poll_price().await;
                        if result.is_ok() {
                            delay = self.session.interval();
                        }
                        let _ = respond_to.send(result);
                    }

                    Some(PollerCommand::Shutdown) | None => {
                        debug!("received shutdown");
                        break;
                    }
                },
            }
        }

        debug!("session poller stopped");
    }

    /// Fetch once and pick the sleep before the next attempt.
    async fn poll_and_next_delay(&self) -> Duration {
        match self.poll_price().await {
            Ok(()) => self.session.interval(),
            Err(e) => {
                // Transient: keep the previous sample, retry shortly.
                warn!("fetch failed, retrying in {:?}: {:#}", FETCH_BACKOFF, e);
                FETCH_BACKOFF
            }
        }
    }

    /// Fetch one sample and write it into the session state.
    async fn poll_price(&self) -> Result<()> {
        let sample = self
            .feed
            .fetch_price(&self.session.symbol)
            .await
            .context("failed to fetch price")?;

        trace!("observed price {}", sample.price);

        self.session.record_sample(sample).await;

        Ok(())
    }
}

/// Handle for controlling a SessionPollerActor
///
/// Can be cloned and shared; the registry keeps one per session.
#[derive(Clone)]
pub struct PollerHandle {
    sender: mpsc::Sender<PollerCommand>,
}

impl PollerHandle {
    /// Spawn a poller for the given session.
    pub fn spawn(session: Arc<MonitorSession>, feed: HermesClient) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel(8);

        let actor = SessionPollerActor::new(session, feed, cmd_rx);

        tokio::spawn(actor.run());

        Self { sender: cmd_tx }
    }

    /// Trigger an immediate fetch, bypassing the interval timer.
    pub async fn poll_now(&self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(PollerCommand::PollNow { respond_to: tx })
            .await
            .context("failed to send PollNow command")?;

        rx.await.context("failed to receive response")??;
        Ok(())
    }

    /// Tell the poller to exit.
    pub async fn shutdown(&self) -> Result<()> {
        self.sender
            .send(PollerCommand::Shutdown)
            .await
            .context("failed to send Shutdown command")?;
        Ok(())
    }
}
