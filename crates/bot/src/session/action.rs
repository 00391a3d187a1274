//! Inline action codes.
//!
//! The wire carries opaque strings (`add_<code>`, `clear_cart`, ...); inside
//! the process they are this tagged enum. Parsing happens once at the
//! boundary and encoding once at render time; an undecodable code is the
//! caller's cue to drop the event.

use serde::{Deserialize, Serialize};

use divano_core::ProductCode;

/// Decoded inline action attached to a message button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    /// Append one occurrence of a code to the cart.
    Add(ProductCode),
    /// Remove one occurrence of a code from the cart.
    Remove(ProductCode),
    /// Append one occurrence from within the cart view.
    Increase(ProductCode),
    /// Remove one occurrence from within the cart view.
    Decrease(ProductCode),
    /// Empty the cart's code list.
    ClearCart,
    /// Manual-request checkout: forward the cart to the operator.
    SendRequest,
    /// Direct-payment checkout: request a payment session.
    PayInline,
    /// Return to the main menu.
    BackToMain,
    /// Inert button (e.g. the quantity label between − and +).
    Noop,
}

impl CallbackAction {
    /// Decode a wire action code. `None` means the code is malformed or
    /// unknown; fail closed and ignore the event.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "clear_cart" => return Some(Self::ClearCart),
            "send_request" => return Some(Self::SendRequest),
            "pay_inline" => return Some(Self::PayInline),
            "back_to_main" => return Some(Self::BackToMain),
            "noop" => return Some(Self::Noop),
            _ => {}
        }

        let coded = |prefix: &str, make: fn(ProductCode) -> Self| {
            raw.strip_prefix(prefix)
                .filter(|rest| !rest.is_empty())
                .map(|rest| make(ProductCode::new(rest)))
        };

        coded("add_", Self::Add)
            .or_else(|| coded("remove_", Self::Remove))
            .or_else(|| coded("increase_", Self::Increase))
            .or_else(|| coded("decrease_", Self::Decrease))
    }

    /// Encode to the wire spelling `parse` accepts.
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::Add(code) => format!("add_{code}"),
            Self::Remove(code) => format!("remove_{code}"),
            Self::Increase(code) => format!("increase_{code}"),
            Self::Decrease(code) => format!("decrease_{code}"),
            Self::ClearCart => "clear_cart".to_string(),
            Self::SendRequest => "send_request".to_string(),
            Self::PayInline => "pay_inline".to_string(),
            Self::BackToMain => "back_to_main".to_string(),
            Self::Noop => "noop".to_string(),
        }
    }
}

impl Serialize for CallbackAction {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for CallbackAction {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown action code: {raw}")))
    }
}
