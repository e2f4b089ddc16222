//! Mock shop backend for exercising the HTTP client end to end.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use kiosk::ApiConfig;

/// A canned `(status, body)` response.
type Canned = (u16, Value);

struct ShopState {
    catalog_response: Mutex<Canned>,
    order_responses: Mutex<VecDeque<Canned>>,
    orders: Mutex<Vec<Value>>,
}

/// In-process HTTP server speaking the shop wire protocol.
///
/// Serves `GET /api/product` and `POST /api/order`; submitted order bodies
/// are captured for assertions.
pub struct MockShop {
    pub addr: SocketAddr,
    state: Arc<ShopState>,
}

impl MockShop {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind mock shop");
        let addr = listener.local_addr().expect("mock shop has no local addr");

        let state = Arc::new(ShopState {
            catalog_response: Mutex::new((200, json!({ "total": 0, "items": [] }))),
            order_responses: Mutex::new(VecDeque::new()),
            orders: Mutex::new(Vec::new()),
        });

        let router = Router::new()
            .route("/api/product", get(catalog_handler))
            .route("/api/order", post(order_handler))
            .with_state(Arc::clone(&state));

        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("mock shop server failed");
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn assets_url(&self) -> String {
        format!("http://{}/content", self.addr)
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url(),
            assets_url: self.assets_url(),
            timeout_seconds: 5,
            connect_timeout_seconds: 2,
        }
    }

    /// Replaces the catalog response wholesale; pass the full envelope.
    pub fn set_catalog(&self, status: u16, body: Value) {
        *self.state.catalog_response.lock() = (status, body);
    }

    pub fn queue_order_response(&self, status: u16, body: Value) {
        self.state.order_responses.lock().push_back((status, body));
    }

    pub fn captured_orders(&self) -> Vec<Value> {
        self.state.orders.lock().clone()
    }
}

async fn catalog_handler(State(state): State<Arc<ShopState>>) -> (StatusCode, Json<Value>) {
    let (status, body) = state.catalog_response.lock().clone();
    (status_code(status), Json(body))
}

async fn order_handler(
    State(state): State<Arc<ShopState>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.orders.lock().push(body);
    let (status, body) = state
        .order_responses
        .lock()
        .pop_front()
        .unwrap_or((200, json!({ "id": "order-1", "total": 0 })));
    (status_code(status), Json(body))
}

fn status_code(status: u16) -> StatusCode {
    StatusCode::from_u16(status).expect("invalid canned status")
}
