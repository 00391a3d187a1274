//! Shared harness: an in-memory inventory fake, a recording reply sink,
//! and a fully wired session controller.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use divano_bot::cart::CartStore;
use divano_bot::catalog::{
    CachePolicy, CatalogCache, CatalogSource, InventoryApi, InventoryError, ProductCodeTable,
    StockRecord,
};
use divano_bot::session::{EventKind, InboundEvent, Reply, SessionController, SessionOptions};
use divano_bot::transport::{DeliveryError, ReplySink};
use divano_core::{ProductCode, UserId};

/// Fixed identity that receives manual-request summaries in tests.
pub const OPERATOR: UserId = UserId::new(999);

/// Three categories, four codes, configuration order fixed.
pub const TABLE_JSON: &str = r#"{
    "Sofas": { "S1": "Sofa A", "S2": "Sofa B" },
    "Armchairs": { "A1": "Velvet Armchair" },
    "Tables": { "T1": "Oak Table" }
}"#;

/// Scripted outcome for one product code.
#[derive(Debug, Clone, Copy)]
enum Outcome {
    Record(StockRecord),
    Fail,
}

/// In-memory inventory fake; unscripted codes report no matching row.
#[derive(Debug, Clone, Default)]
pub struct FakeInventory {
    outcomes: HashMap<String, Outcome>,
}

impl FakeInventory {
    #[must_use]
    pub fn in_stock(mut self, code: &str, stock: f64, sale_price_minor: i64) -> Self {
        self.outcomes.insert(
            code.to_string(),
            Outcome::Record(StockRecord {
                stock,
                sale_price_minor: Some(sale_price_minor),
            }),
        );
        self
    }

    #[must_use]
    pub fn failing(mut self, code: &str) -> Self {
        self.outcomes.insert(code.to_string(), Outcome::Fail);
        self
    }
}

impl InventoryApi for FakeInventory {
    async fn lookup(&self, code: &ProductCode) -> Result<Option<StockRecord>, InventoryError> {
        match self.outcomes.get(code.as_str()) {
            Some(Outcome::Record(record)) => Ok(Some(*record)),
            Some(Outcome::Fail) => Err(InventoryError::Api {
                status: 502,
                message: "scripted failure".to_string(),
            }),
            None => Ok(None),
        }
    }
}

/// Reply sink that records everything; optionally refuses delivery to one
/// identity (for operator-failure scenarios).
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    sent: Arc<Mutex<Vec<(UserId, Reply)>>>,
    refuse: Option<UserId>,
}

impl RecordingSink {
    #[must_use]
    pub fn refusing(user: UserId) -> Self {
        Self {
            refuse: Some(user),
            ..Self::default()
        }
    }

    /// Everything sent so far, oldest first.
    #[must_use]
    pub fn replies(&self) -> Vec<(UserId, Reply)> {
        self.sent.lock().expect("sink lock").clone()
    }

    /// Everything sent to one user, dropping the rest.
    #[must_use]
    pub fn replies_to(&self, user: UserId) -> Vec<Reply> {
        self.replies()
            .into_iter()
            .filter_map(|(to, reply)| (to == user).then_some(reply))
            .collect()
    }

    pub fn reset(&self) {
        self.sent.lock().expect("sink lock").clear();
    }
}

impl ReplySink for RecordingSink {
    async fn send(&self, user: UserId, reply: Reply) -> Result<(), DeliveryError> {
        if self.refuse == Some(user) {
            return Err(DeliveryError::Failed("scripted refusal".to_string()));
        }
        self.sent.lock().expect("sink lock").push((user, reply));
        Ok(())
    }
}

/// Wire a controller over the fake inventory and a recording sink.
#[must_use]
pub fn harness(
    api: FakeInventory,
    sink: RecordingSink,
    policy: CachePolicy,
) -> (SessionController<FakeInventory, RecordingSink>, RecordingSink) {
    let table = Arc::new(ProductCodeTable::from_json(TABLE_JSON).expect("test table"));
    let source = CatalogSource::new(api, Arc::clone(&table));
    let cache = CatalogCache::new(source, policy);

    let controller = SessionController::new(
        table,
        cache,
        CartStore::new(),
        sink.clone(),
        SessionOptions {
            operator: OPERATOR,
            currency_code: "RUB".to_string(),
            currency_symbol: "₽".to_string(),
            loyalty_url: None,
        },
    );
    (controller, sink)
}

/// Shorthand for the common forever-cached harness.
#[must_use]
pub fn default_harness(
    api: FakeInventory,
) -> (SessionController<FakeInventory, RecordingSink>, RecordingSink) {
    harness(api, RecordingSink::default(), CachePolicy::Forever)
}

/// Build an inbound event.
#[must_use]
pub fn event(user: i64, kind: EventKind) -> InboundEvent {
    InboundEvent {
        user: UserId::new(user),
        kind,
    }
}

/// Text event shorthand.
#[must_use]
pub fn text(user: i64, value: &str) -> InboundEvent {
    event(
        user,
        EventKind::Text {
            text: value.to_string(),
        },
    )
}

/// Inline-action event shorthand (raw wire code, decoded by the controller).
#[must_use]
pub fn action(user: i64, data: &str) -> InboundEvent {
    event(
        user,
        EventKind::Action {
            data: data.to_string(),
        },
    )
}
