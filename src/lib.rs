//! State/event core of a storefront single-page application.
//!
//! The crate owns the product catalog, the shopping basket, checkout form
//! state and modal navigation, and notifies observers of every state
//! transition.
//!
//! # Architecture
//!
//! ```text
//! UI action ──→ AppState ──→ sub-store ──→ validation ──→ EventBus ──→ view
//!     ↑                                                       │
//!     └───────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`model`]**: the state stores and the [`model::AppState`] orchestrator
//! - **[`events`]**: synchronous publish/subscribe between model and views
//! - **[`api`]**: the [`api::OrderGateway`] network boundary
//! - **[`config`]**: TOML configuration for the canonical API client
//!
//! All mutation is synchronous except catalog loading and order submission,
//! which await the gateway. Rendering, templating and process bootstrap are
//! the embedder's job.

pub mod api;
pub mod config;
pub mod events;
pub mod model;

pub use api::{ApiError, Order, OrderGateway, OrderReceipt, ShopClient};
pub use config::{ApiConfig, Config, ConfigError};
pub use events::{AppEvent, EventBus, EventKind, Subscription};
pub use model::{
    AppState, BasketEntry, Contacts, ContactsUpdate, FormStatus, InvalidOperation, ModalKind,
    OrderInfo, OrderInfoUpdate, OrderOutcome, PaymentMethod, Product,
};
