//! Inbound events from the chat transport.

use serde::{Deserialize, Serialize};

use divano_core::UserId;

/// One discrete event from the transport, already reduced to the facts the
/// core consumes: who, what kind, and the event-specific payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundEvent {
    pub user: UserId,
    #[serde(flatten)]
    pub kind: EventKind,
}

/// Event kinds the session controller routes on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventKind {
    /// The start command; replies with the main menu.
    Start,
    /// Plain text: a category name, a menu label, or a free-text search.
    Text { text: String },
    /// The user shared contact info.
    Contact { phone: String },
    /// An inline button was pressed; `data` is the raw action code.
    Action { data: String },
    /// The payment platform asks for pre-checkout confirmation.
    PreCheckout { query_id: String, payload: String },
    /// The payment succeeded for the given invoice payload.
    PaymentSuccess { payload: String },
}
