//! The session state machine.
//!
//! Routes inbound events to the catalog, cart store and pricer, enforces
//! the phone gate, and drives both checkout paths. Every failure is scoped
//! to one user interaction; nothing here is fatal to the process.

use std::sync::Arc;

use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use divano_core::{Category, ProductCode, UserId};

use crate::cart::{CartStore, Receipt, price_cart};
use crate::catalog::{CatalogCache, InventoryApi, ProductCodeTable, ProductIndex};
use crate::transport::{DeliveryError, ReplySink};

use super::action::CallbackAction;
use super::event::{EventKind, InboundEvent};
use super::render;
use super::reply::Reply;

/// Knobs the controller needs beyond its collaborators.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Fixed identity that receives manual-request summaries.
    pub operator: UserId,
    /// ISO 4217 code used on payment sessions.
    pub currency_code: String,
    /// Symbol appended to rendered amounts.
    pub currency_symbol: String,
    /// Optional loyalty-points bot link for the main menu.
    pub loyalty_url: Option<String>,
}

struct Inner<C, S> {
    table: Arc<ProductCodeTable>,
    cache: CatalogCache<C>,
    index: ProductIndex,
    carts: CartStore,
    sink: S,
    opts: SessionOptions,
}

/// The conversational state machine, shared by every event-handling task.
pub struct SessionController<C, S> {
    inner: Arc<Inner<C, S>>,
}

impl<C, S> Clone for SessionController<C, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C, S> SessionController<C, S>
where
    C: InventoryApi + Clone + Send + Sync + 'static,
    S: ReplySink,
{
    /// Assemble the controller; the product index is derived from the table
    /// here, once.
    #[must_use]
    pub fn new(
        table: Arc<ProductCodeTable>,
        cache: CatalogCache<C>,
        carts: CartStore,
        sink: S,
        opts: SessionOptions,
    ) -> Self {
        let index = ProductIndex::build(&table);
        Self {
            inner: Arc::new(Inner {
                table,
                cache,
                index,
                carts,
                sink,
                opts,
            }),
        }
    }

    /// Handle one inbound event end to end.
    ///
    /// # Errors
    ///
    /// Returns an error only when the transport itself refuses delivery;
    /// domain-level failures are absorbed into user-visible replies.
    #[instrument(skip(self, event), fields(user = %event.user))]
    pub async fn handle(&self, event: InboundEvent) -> Result<(), DeliveryError> {
        let user = event.user;
        match event.kind {
            EventKind::Start => self.send_main_menu(user).await,
            EventKind::Contact { phone } => self.on_contact(user, phone).await,
            EventKind::Text { text } => self.on_text(user, &text).await,
            EventKind::Action { data } => match CallbackAction::parse(&data) {
                Some(action) => self.on_action(user, action).await,
                None => {
                    warn!(%user, data, "ignoring unknown action code");
                    Ok(())
                }
            },
            EventKind::PreCheckout { query_id, .. } => {
                // Accepted race: stock and price are not re-validated here.
                self.send(user, Reply::ApproveCheckout { query_id }).await
            }
            EventKind::PaymentSuccess { payload } => self.on_payment_success(user, &payload).await,
        }
    }

    async fn send(&self, user: UserId, reply: Reply) -> Result<(), DeliveryError> {
        self.inner.sink.send(user, reply).await
    }

    async fn send_text(&self, user: UserId, text: impl Into<String>) -> Result<(), DeliveryError> {
        self.send(user, Reply::Text { text: text.into() }).await
    }

    async fn send_alert(&self, user: UserId, text: impl Into<String>) -> Result<(), DeliveryError> {
        self.send(user, Reply::Alert { text: text.into() }).await
    }

    async fn send_main_menu(&self, user: UserId) -> Result<(), DeliveryError> {
        let menu = render::main_menu(&self.inner.table, self.inner.opts.loyalty_url.is_some());
        self.send(user, menu).await
    }

    async fn on_contact(&self, user: UserId, phone: String) -> Result<(), DeliveryError> {
        self.inner.carts.set_phone(user, phone);
        self.send_text(
            user,
            "📱 Phone number received. You can now check out from the cart.",
        )
        .await
    }

    async fn on_text(&self, user: UserId, text: &str) -> Result<(), DeliveryError> {
        match text {
            render::CART_LABEL => self.show_cart(user).await,
            render::SEARCH_LABEL => {
                self.send_text(user, "Type part of a product name to search:")
                    .await
            }
            render::POINTS_LABEL if self.inner.opts.loyalty_url.is_some() => {
                let url = self.inner.opts.loyalty_url.clone().unwrap_or_default();
                self.send(
                    user,
                    Reply::LinkCard {
                        text: "Open the loyalty bot to check your points:".to_string(),
                        label: "🎯 Open loyalty bot".to_string(),
                        url,
                    },
                )
                .await
            }
            _ => {
                if let Some(category) = self.inner.table.category_by_name(text) {
                    let category = category.clone();
                    self.browse(user, &category).await
                } else {
                    self.search(user, text).await
                }
            }
        }
    }

    async fn on_action(&self, user: UserId, action: CallbackAction) -> Result<(), DeliveryError> {
        match action {
            CallbackAction::Add(code) => {
                self.inner.carts.add(user, code);
                self.send_alert(user, "Added to cart!").await
            }
            CallbackAction::Increase(code) => {
                self.inner.carts.add(user, code);
                self.show_cart(user).await
            }
            CallbackAction::Decrease(code) | CallbackAction::Remove(code) => {
                self.inner.carts.remove_one(user, &code);
                self.show_cart(user).await
            }
            CallbackAction::ClearCart => {
                self.inner.carts.clear(user);
                self.send_text(user, "🧺 Cart cleared.").await
            }
            CallbackAction::SendRequest => self.manual_request(user).await,
            CallbackAction::PayInline => self.pay_inline(user).await,
            CallbackAction::BackToMain => self.send_main_menu(user).await,
            CallbackAction::Noop => Ok(()),
        }
    }

    // =========================================================================
    // Browsing & search
    // =========================================================================

    async fn browse(&self, user: UserId, category: &Category) -> Result<(), DeliveryError> {
        let items = self.inner.cache.get(category).await;
        if items.is_empty() {
            return self
                .send_text(
                    user,
                    format!("No items in '{category}' are in stock right now."),
                )
                .await;
        }
        for item in items.iter() {
            self.send(user, render::item_card(item, &self.inner.opts.currency_symbol))
                .await?;
        }
        Ok(())
    }

    /// Case-insensitive substring search across all categories' live items.
    async fn search(&self, user: UserId, query: &str) -> Result<(), DeliveryError> {
        let needle = query.to_lowercase();
        let mut found = false;

        let categories: Vec<Category> = self.inner.table.categories().cloned().collect();
        for category in &categories {
            let items = self.inner.cache.get(category).await;
            for item in items.iter() {
                if item.name.to_lowercase().contains(&needle) {
                    found = true;
                    self.send(user, render::item_card(item, &self.inner.opts.currency_symbol))
                        .await?;
                }
            }
        }

        if found {
            Ok(())
        } else {
            self.send_text(user, "Nothing found.").await
        }
    }

    // =========================================================================
    // Cart view & checkout
    // =========================================================================

    async fn show_cart(&self, user: UserId) -> Result<(), DeliveryError> {
        let summary = self.inner.carts.summary(user);
        if summary.is_empty() {
            return self.send_text(user, "Your cart is empty.").await;
        }

        // Re-priced on every view so the rendering reflects live data, not
        // the prices at add time.
        let receipt = self.price(user, &summary).await;
        self.send(user, render::cart_view(&receipt, &self.inner.opts.currency_symbol))
            .await
    }

    async fn price(&self, user: UserId, summary: &[(ProductCode, u32)]) -> Receipt {
        price_cart(&self.inner.index, &self.inner.cache, user, summary).await
    }

    /// Phone gate: both checkout paths require a captured phone number.
    async fn gated_phone(&self, user: UserId) -> Result<Option<String>, DeliveryError> {
        if let Some(phone) = self.inner.carts.phone(user) {
            return Ok(Some(phone));
        }
        self.send(user, render::phone_request()).await?;
        Ok(None)
    }

    async fn manual_request(&self, user: UserId) -> Result<(), DeliveryError> {
        let Some(phone) = self.gated_phone(user).await? else {
            return Ok(());
        };

        let summary = self.inner.carts.summary(user);
        if summary.is_empty() {
            return self.send_alert(user, "Cart is empty.").await;
        }

        let receipt = self.price(user, &summary).await;
        let text =
            render::operator_summary(&receipt, &phone, &self.inner.opts.currency_symbol);

        match self
            .inner
            .sink
            .send(self.inner.opts.operator, Reply::Text { text })
            .await
        {
            Ok(()) => {
                // Clear only after the operator actually has the request.
                self.inner.carts.clear(user);
                info!(%user, total = receipt.total, "manual request delivered");
                self.send_text(user, "✅ Your request has been sent. We will be in touch.")
                    .await
            }
            Err(e) => {
                error!(%user, error = %e, "operator delivery failed, cart preserved");
                self.send_alert(user, "❗ Could not send the request. Please try again.")
                    .await
            }
        }
    }

    async fn pay_inline(&self, user: UserId) -> Result<(), DeliveryError> {
        if self.gated_phone(user).await?.is_none() {
            return Ok(());
        }

        let summary = self.inner.carts.summary(user);
        if summary.is_empty() {
            return self.send_alert(user, "Cart is empty.").await;
        }

        let receipt = self.price(user, &summary).await;
        if receipt.is_empty() {
            // Every line dropped at pricing time; refuse to invoice a void.
            return self
                .send_alert(user, "Your cart items are no longer available.")
                .await;
        }

        let payload = Uuid::new_v4().to_string();
        info!(%user, %payload, total = receipt.total, "issuing payment session");
        let invoice =
            render::invoice(&receipt, payload, &self.inner.opts.currency_code);
        self.send(user, Reply::Invoice(invoice)).await
    }

    async fn on_payment_success(
        &self,
        user: UserId,
        payload: &str,
    ) -> Result<(), DeliveryError> {
        info!(%user, payload, "payment confirmed");
        self.inner.carts.clear(user);
        self.send_text(user, "✅ Payment received. Thank you for your order!")
            .await
    }
}
