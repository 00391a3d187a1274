//! Outbound replies to the chat transport.
//!
//! Plain data; the transport decides how to render a menu keyboard, an
//! inline button grid, or a payment session against its platform.

use serde::{Deserialize, Serialize};

use super::action::CallbackAction;

/// One inline button: a human label and the action it fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionButton {
    pub label: String,
    pub action: CallbackAction,
}

impl ActionButton {
    pub fn new(label: impl Into<String>, action: CallbackAction) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

/// A payment-session request for the external gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRequest {
    pub title: String,
    pub description: String,
    /// Opaque tag echoed back in the payment-success callback.
    pub payload: String,
    /// ISO 4217 currency code.
    pub currency: String,
    pub prices: Vec<LabeledPrice>,
}

/// One invoice line: label and amount in minor currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledPrice {
    pub label: String,
    pub amount_minor: i64,
}

/// Everything the core ever says back to the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reply {
    /// A plain (possibly lightly HTML-styled) message.
    Text { text: String },
    /// A transient alert; carries no conversation state.
    Alert { text: String },
    /// A message with a reply keyboard; `request_contact` marks the first
    /// row's button as a contact-share affordance.
    Menu {
        text: String,
        rows: Vec<Vec<String>>,
        request_contact: bool,
    },
    /// A message with an inline action grid.
    Card {
        text: String,
        actions: Vec<Vec<ActionButton>>,
    },
    /// A message with a single URL button.
    LinkCard {
        text: String,
        label: String,
        url: String,
    },
    /// Ask the payment gateway to open a checkout session.
    Invoice(InvoiceRequest),
    /// Approve a pre-checkout query.
    ApproveCheckout { query_id: String },
}
