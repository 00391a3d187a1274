//! The conversational state machine and its boundary types.
//!
//! Inbound events arrive from the chat transport already reduced to user
//! identity + event kind; outbound replies are plain data the transport
//! renders however it likes. Inline action codes are decoded exactly once,
//! at the boundary, into [`CallbackAction`] - nothing downstream re-parses
//! strings.

mod action;
mod controller;
mod event;
mod render;
mod reply;

pub use action::CallbackAction;
pub use controller::{SessionController, SessionOptions};
pub use event::{EventKind, InboundEvent};
pub use reply::{ActionButton, InvoiceRequest, LabeledPrice, Reply};
