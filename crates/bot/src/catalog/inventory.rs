//! Inventory platform API client.
//!
//! One bearer-token-authenticated GET per product code against the remote
//! assortment endpoint, filtered by external code. The caller receives the
//! stock figure and the first listed sale price (minor units) of the first
//! matching row, or `None` when no row matches.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;

use divano_core::ProductCode;

use crate::config::InventoryConfig;

/// Per-request timeout; expiry takes the same skip path as any other
/// upstream failure.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when interacting with the inventory API.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to build or parse a request/response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Stock and pricing facts for one product, as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StockRecord {
    /// Remote stock figure. The platform reports fractional stock for some
    /// unit types; consumers coerce it to an integer.
    pub stock: f64,
    /// First listed sale price in minor currency units, if any is set.
    pub sale_price_minor: Option<i64>,
}

/// Read-only catalog lookup by external code.
///
/// The production implementation is [`InventoryClient`]; tests substitute
/// an in-memory fake.
pub trait InventoryApi: Send + Sync {
    /// Look up the current stock record for a product code.
    ///
    /// `Ok(None)` means no matching row — indistinguishable from a product
    /// the platform has never heard of.
    fn lookup(
        &self,
        code: &ProductCode,
    ) -> impl Future<Output = Result<Option<StockRecord>, InventoryError>> + Send;
}

/// HTTP client for the inventory platform's assortment endpoint.
#[derive(Clone)]
pub struct InventoryClient {
    client: reqwest::Client,
    base_url: String,
}

impl InventoryClient {
    /// Create a new inventory API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a valid header value or the
    /// HTTP client fails to build.
    pub fn new(config: &InventoryConfig) -> Result<Self, InventoryError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.token.expose_secret());
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&auth_value)
                .map_err(|e| InventoryError::Parse(format!("Invalid token format: {e}")))?,
        );
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl InventoryApi for InventoryClient {
    async fn lookup(&self, code: &ProductCode) -> Result<Option<StockRecord>, InventoryError> {
        let url = format!("{}/entity/assortment", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("filter", format!("externalCode={}", code.as_str()))])
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(InventoryError::Api {
                status: status.as_u16(),
                message: message.chars().take(200).collect(),
            });
        }

        let body: AssortmentResponse = response
            .json()
            .await
            .map_err(|e| InventoryError::Parse(e.to_string()))?;

        Ok(body.rows.into_iter().next().map(StockRecord::from))
    }
}

// =============================================================================
// Wire types
// =============================================================================

/// Assortment query response body; only the fields we read.
#[derive(Debug, Deserialize)]
struct AssortmentResponse {
    #[serde(default)]
    rows: Vec<AssortmentRow>,
}

#[derive(Debug, Deserialize)]
struct AssortmentRow {
    #[serde(default)]
    stock: f64,
    #[serde(rename = "salePrices", default)]
    sale_prices: Vec<SalePrice>,
}

#[derive(Debug, Deserialize)]
struct SalePrice {
    #[serde(default)]
    value: f64,
}

impl From<AssortmentRow> for StockRecord {
    fn from(row: AssortmentRow) -> Self {
        Self {
            stock: row.stock,
            // Platform price values are numeric minor units; truncation to
            // whole minor units is intended.
            #[allow(clippy::cast_possible_truncation)]
            sale_price_minor: row.sale_prices.first().map(|p| p.value as i64),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assortment_row() {
        let raw = r#"{
            "rows": [
                { "stock": 5.0, "salePrices": [{ "value": 150000.0 }, { "value": 1.0 }] }
            ]
        }"#;
        let body: AssortmentResponse = serde_json::from_str(raw).unwrap();
        let record = StockRecord::from(body.rows.into_iter().next().unwrap());
        assert!((record.stock - 5.0).abs() < f64::EPSILON);
        assert_eq!(record.sale_price_minor, Some(150_000));
    }

    #[test]
    fn test_parse_row_without_prices_or_stock() {
        let raw = r#"{ "rows": [ {} ] }"#;
        let body: AssortmentResponse = serde_json::from_str(raw).unwrap();
        let record = StockRecord::from(body.rows.into_iter().next().unwrap());
        assert!(record.stock.abs() < f64::EPSILON);
        assert_eq!(record.sale_price_minor, None);
    }

    #[test]
    fn test_parse_empty_rows() {
        let raw = r#"{ "rows": [] }"#;
        let body: AssortmentResponse = serde_json::from_str(raw).unwrap();
        assert!(body.rows.is_empty());
    }

    #[test]
    fn test_parse_missing_rows_field() {
        let body: AssortmentResponse = serde_json::from_str("{}").unwrap();
        assert!(body.rows.is_empty());
    }
}
