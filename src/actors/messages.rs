//! Message types for actor communication

use tokio::sync::oneshot;

/// Commands that can be sent to a session poller
#[derive(Debug)]
pub enum PollerCommand {
    /// Trigger an immediate fetch (bypassing the interval timer)
    ///
    /// Used for testing and manual refresh operations.
    PollNow {
        /// Channel to send the result back
        respond_to: oneshot::Sender<anyhow::Result<()>>,
    },

    /// Stop the poller
    ///
    /// The actor exits after any in-flight fetch completes. Sent by the
    /// registry when a session is stopped.
    Shutdown,
}
