//! Per-user cart state and request-time pricing.

mod pricer;
mod store;

pub use pricer::{Receipt, ReceiptLine, price_cart};
pub use store::CartStore;
