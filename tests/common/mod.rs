//! Shared test utilities and mock infrastructure.

#![allow(dead_code)]

pub mod mock_shop;

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use kiosk::api::{ApiError, Order, OrderGateway, OrderReceipt};
use kiosk::{AppEvent, AppState, EventBus, Product};

/// Installs the tracing subscriber once per test binary.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn product(id: &str, title: &str, price: Option<u64>) -> Product {
    Product {
        id: id.to_string(),
        title: title.to_string(),
        description: format!("{title} description"),
        image: format!("/{id}.svg"),
        category: "other".to_string(),
        price,
    }
}

/// Three products: two purchasable, one priceless.
pub fn sample_products() -> Vec<Product> {
    vec![
        product("soul-1", "+1 soul", Some(100)),
        product("hook-2", "Grappling hook", Some(250)),
        product("gift-3", "Priceless gift", None),
    ]
}

/// Programmable in-memory gateway double.
///
/// The catalog is fixed at construction; order responses are a queue, with
/// a default success receipt echoing the submitted total. `holding()` makes
/// `submit_order` block until [`StubGateway::release`] for interleaving
/// tests.
pub struct StubGateway {
    products: Vec<Product>,
    order_responses: Mutex<VecDeque<Result<OrderReceipt, ApiError>>>,
    submitted: Mutex<Vec<Order>>,
    hold: Option<Notify>,
}

impl StubGateway {
    pub fn with_catalog(products: Vec<Product>) -> Self {
        Self {
            products,
            order_responses: Mutex::new(VecDeque::new()),
            submitted: Mutex::new(Vec::new()),
            hold: None,
        }
    }

    pub fn holding(mut self) -> Self {
        self.hold = Some(Notify::new());
        self
    }

    pub fn queue_receipt(&self, id: &str, total: u64) {
        self.order_responses.lock().push_back(Ok(OrderReceipt {
            id: id.to_string(),
            total,
        }));
    }

    pub fn queue_failure(&self, status: u16, message: &str) {
        self.order_responses.lock().push_back(Err(ApiError::Status {
            url: "stub:/order".to_string(),
            status,
            message: message.to_string(),
        }));
    }

    /// Lets one held submission proceed.
    pub fn release(&self) {
        self.hold
            .as_ref()
            .expect("release() on a gateway built without holding()")
            .notify_one();
    }

    pub fn submitted(&self) -> Vec<Order> {
        self.submitted.lock().clone()
    }
}

#[async_trait]
impl OrderGateway for StubGateway {
    async fn fetch_catalog(&self) -> Result<Vec<Product>, ApiError> {
        Ok(self.products.clone())
    }

    async fn submit_order(&self, order: &Order) -> Result<OrderReceipt, ApiError> {
        self.submitted.lock().push(order.clone());
        if let Some(hold) = &self.hold {
            hold.notified().await;
        }
        self.order_responses.lock().pop_front().unwrap_or_else(|| {
            Ok(OrderReceipt {
                id: "order-1".to_string(),
                total: order.total,
            })
        })
    }
}

/// Wildcard subscriber recording every emission in order.
#[derive(Clone)]
pub struct EventLog {
    events: Arc<Mutex<Vec<AppEvent>>>,
}

impl EventLog {
    pub fn attach(bus: &EventBus) -> Self {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        bus.on_any(move |_, event| sink.lock().push(event.clone()));
        Self { events }
    }

    pub fn events(&self) -> Vec<AppEvent> {
        self.events.lock().clone()
    }

    /// The string tokens of everything seen, in emission order.
    pub fn tokens(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .iter()
            .map(|event| event.kind().as_str())
            .collect()
    }

    pub fn count_of(&self, token: &str) -> usize {
        self.tokens().iter().filter(|t| **t == token).count()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

/// An [`AppState`] with the sample catalog loaded and an attached event
/// log, cleared of the load's own emission.
pub async fn loaded_state() -> (Arc<AppState>, Arc<StubGateway>, EventLog) {
    loaded_state_with(StubGateway::with_catalog(sample_products())).await
}

pub async fn loaded_state_with(gateway: StubGateway) -> (Arc<AppState>, Arc<StubGateway>, EventLog) {
    let gateway = Arc::new(gateway);
    let bus = EventBus::new();
    let log = EventLog::attach(&bus);
    let state = Arc::new(AppState::new(
        Arc::clone(&gateway) as Arc<dyn OrderGateway>,
        bus,
    ));
    state
        .load_products()
        .await
        .expect("stub catalog load cannot fail");
    log.clear();
    (state, gateway, log)
}
