//! The chat-transport boundary.
//!
//! The core never talks to a chat platform directly: it consumes
//! [`InboundEvent`](crate::session::InboundEvent)s and pushes
//! [`Reply`](crate::session::Reply)s through a [`ReplySink`]. Operator
//! delivery is a send to the configured operator identity over the same
//! sink. The bundled [`stdio`] adapter speaks JSON lines for local runs and
//! scripting; a production adapter would implement the same trait against
//! its platform API.

pub mod stdio;

use thiserror::Error;

use divano_core::UserId;

use crate::session::Reply;

/// Errors delivering a reply to the transport.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The transport has shut down; nothing can be delivered any more.
    #[error("transport closed")]
    Closed,

    /// The transport reported a per-message failure.
    #[error("delivery failed: {0}")]
    Failed(String),
}

/// Outbound side of the chat transport.
pub trait ReplySink: Send + Sync {
    /// Deliver one reply to one user (or to the operator identity).
    fn send(
        &self,
        user: UserId,
        reply: Reply,
    ) -> impl Future<Output = Result<(), DeliveryError>> + Send;
}
