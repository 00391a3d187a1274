//! Per-user mutable cart state.
//!
//! A cart is a flat list of product codes with repetition as quantity:
//! appending a code increments its quantity by one, removing one occurrence
//! decrements it. Quantity is always count-of-occurrences, never a
//! separately tracked integer, so add and remove stay symmetric and no code
//! can go negative.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use divano_core::{ProductCode, UserId};

#[derive(Debug, Default)]
struct CartEntry {
    codes: Vec<ProductCode>,
    phone: Option<String>,
}

/// Shared store of carts, keyed by user identity.
///
/// Cheaply cloneable; all clones see the same state. The lock guards short
/// synchronous sections only and is never held across an await point.
/// Concurrent mutations to the same user's cart are last-write-wins, which
/// is acceptable at one-event-at-a-time granularity.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    inner: Arc<RwLock<HashMap<UserId, CartEntry>>>,
}

impl CartStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a code, increasing its quantity by one.
    ///
    /// No existence check happens here: a stale or unknown code may enter
    /// the cart and will simply fail to resolve at pricing time.
    pub fn add(&self, user: UserId, code: ProductCode) {
        let mut carts = self.inner.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        carts.entry(user).or_default().codes.push(code);
    }

    /// Remove a single occurrence of a code. Returns whether one was found;
    /// a no-op when the code is absent.
    pub fn remove_one(&self, user: UserId, code: &ProductCode) -> bool {
        let mut carts = self.inner.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        let Some(entry) = carts.get_mut(&user) else {
            return false;
        };
        let Some(position) = entry.codes.iter().position(|c| c == code) else {
            return false;
        };
        entry.codes.remove(position);
        true
    }

    /// Empty the code list. A previously captured phone number is preserved.
    pub fn clear(&self, user: UserId) {
        let mut carts = self.inner.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(entry) = carts.get_mut(&user) {
            entry.codes.clear();
        }
    }

    /// Record the user's phone number, overwriting any earlier value.
    pub fn set_phone(&self, user: UserId, phone: impl Into<String>) {
        let mut carts = self.inner.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        carts.entry(user).or_default().phone = Some(phone.into());
    }

    /// The phone number captured for a user, if any.
    #[must_use]
    pub fn phone(&self, user: UserId) -> Option<String> {
        let carts = self.inner.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        carts.get(&user).and_then(|entry| entry.phone.clone())
    }

    /// Quantity-by-code summary in insertion order of first occurrence,
    /// for stable display. An empty vec for an unknown user.
    #[must_use]
    pub fn summary(&self, user: UserId) -> Vec<(ProductCode, u32)> {
        let carts = self.inner.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        let Some(entry) = carts.get(&user) else {
            return Vec::new();
        };

        let mut summary: Vec<(ProductCode, u32)> = Vec::new();
        for code in &entry.codes {
            match summary.iter_mut().find(|(c, _)| c == code) {
                Some((_, quantity)) => *quantity += 1,
                None => summary.push((code.clone(), 1)),
            }
        }
        summary
    }

    /// Whether the user's cart holds no codes.
    #[must_use]
    pub fn is_empty(&self, user: UserId) -> bool {
        let carts = self.inner.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        carts.get(&user).is_none_or(|entry| entry.codes.is_empty())
    }
}
