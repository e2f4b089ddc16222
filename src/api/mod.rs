//! The network boundary supplying catalog data and accepting orders.
//!
//! [`OrderGateway`] is the single seam between the state core and the shop
//! backend: one canonical HTTP implementation ([`ShopClient`]) plus whatever
//! test doubles a suite needs.

mod client;

pub use client::ShopClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{PaymentMethod, Product};

/// Submission payload: order info + contacts + the basket total and item
/// ids at submission time. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub payment: PaymentMethod,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub total: u64,
    pub items: Vec<String>,
}

/// Success body returned by the shop for an accepted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub id: String,
    pub total: u64,
}

/// Envelope of the catalog listing endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct CatalogPage {
    pub total: u64,
    pub items: Vec<Product>,
}

/// Failures crossing the network boundary.
///
/// Handled asymmetrically by the state core: catalog-load failures propagate
/// to the caller, submission failures become a modal message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("shop returned {status} for {url}: {message}")]
    Status {
        url: String,
        status: u16,
        message: String,
    },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// The external boundary that converts a basket into a persisted order.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Fetches the full catalog. Image URLs are absolute on return.
    async fn fetch_catalog(&self) -> Result<Vec<Product>, ApiError>;

    /// Submits an order; the receipt carries the server-confirmed total.
    async fn submit_order(&self, order: &Order) -> Result<OrderReceipt, ApiError>;
}
