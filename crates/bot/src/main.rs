//! Divano Bot - conversational furniture storefront.
//!
//! # Architecture
//!
//! - JSON-lines stdio transport (one inbound event per line, one reply per
//!   line); a platform adapter terminates the real chat protocol and speaks
//!   these frames
//! - Inventory platform REST API for live stock and pricing
//! - In-memory cart store and catalog cache; nothing survives a restart
//!
//! Each inbound event is handled on its own task, so a user awaiting a
//! remote catalog or checkout call never blocks other users.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use divano_bot::cart::CartStore;
use divano_bot::catalog::{CatalogCache, CatalogSource, InventoryClient, ProductCodeTable};
use divano_bot::config::BotConfig;
use divano_bot::session::{SessionController, SessionOptions};
use divano_bot::transport::stdio::{self, StdioSink};

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &BotConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = BotConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Initialize tracing with EnvFilter and Sentry integration
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "divano_bot=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    // Load the static product table; it defines the full addressable
    // product space for the process lifetime.
    let table = Arc::new(
        ProductCodeTable::from_path(&config.products_file).expect("Failed to load product table"),
    );
    tracing::info!(
        categories = table.len(),
        path = %config.products_file.display(),
        "product table loaded"
    );

    let inventory = InventoryClient::new(&config.inventory)
        .expect("Failed to build inventory API client");
    let source = CatalogSource::new(inventory, Arc::clone(&table));
    let cache = CatalogCache::new(source, config.cache_policy);

    let sink = StdioSink::spawn();
    let controller = SessionController::new(
        table,
        cache,
        CartStore::new(),
        sink,
        SessionOptions {
            operator: config.operator,
            currency_code: config.currency_code.clone(),
            currency_symbol: config.currency_symbol.clone(),
            loyalty_url: config.loyalty_url.clone(),
        },
    );

    let mut events = stdio::spawn_stdin_reader();
    tracing::info!(cache_policy = ?config.cache_policy, "divano-bot listening on stdio");

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            maybe_event = events.recv() => {
                let Some(event) = maybe_event else {
                    tracing::info!("event stream closed, exiting");
                    break;
                };
                let controller = controller.clone();
                tokio::spawn(async move {
                    if let Err(e) = controller.handle(event).await {
                        tracing::error!(error = %e, "event handling failed");
                    }
                });
            }
            () = &mut shutdown => break,
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
