//! Actor-based session polling
//!
//! Each monitoring session gets its own poller actor running as an independent
//! tokio task. The actor repeatedly fetches the session's price, writes the
//! result into the shared session state, and sleeps for the configured
//! interval until it observes a stop.
//!
//! ## Communication Patterns
//!
//! 1. **Commands**: each poller has an mpsc command channel for control messages
//! 2. **Request/Response**: oneshot channels for synchronous queries (PollNow)
//! 3. **Shared state**: the session record itself is the single point of
//!    truth read by the API handlers

pub mod messages;
pub mod poller;
