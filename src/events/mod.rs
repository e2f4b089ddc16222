//! Synchronous publish/subscribe between the state model and its observers.
//!
//! The bus has no domain knowledge beyond the [`AppEvent`] payload enum.
//! There is no ambient/global instance: the application constructs one
//! [`EventBus`] and hands clones to every component that needs it.
//!
//! Emission is a direct synchronous call stack — no queuing, no async
//! dispatch. Handlers run in registration order, exact-kind and wildcard
//! subscriptions interleaved by when they were registered. A panicking
//! handler aborts sibling delivery for that emission; handlers are expected
//! not to panic.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::model::{BasketEntry, FormStatus, ModalKind, Product};

/// Every state transition the model announces, with its payload.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The catalog was replaced wholesale.
    ProductsChanged { products: Vec<Product> },
    /// An entry was added or removed, or the basket was cleared.
    BasketChanged { items: Vec<BasketEntry>, total: u64 },
    /// Delivery/payment fields changed or were revalidated.
    OrderInfoChanged { status: FormStatus },
    /// Contact fields changed or were revalidated.
    ContactsChanged { status: FormStatus },
    /// The visible modal transitioned.
    ModalChanged {
        previous: ModalKind,
        current: ModalKind,
    },
    /// Fine-grained companion to [`AppEvent::ModalChanged`], keyed per state.
    ModalOpened { modal: ModalKind },
    /// The gateway accepted an order; carries the server-confirmed total.
    OrderSucceeded { total: u64 },
}

impl AppEvent {
    /// The subscription key this event is delivered under.
    pub fn kind(&self) -> EventKind {
        match self {
            AppEvent::ProductsChanged { .. } => EventKind::ProductsChanged,
            AppEvent::BasketChanged { .. } => EventKind::BasketChanged,
            AppEvent::OrderInfoChanged { .. } => EventKind::OrderInfoChanged,
            AppEvent::ContactsChanged { .. } => EventKind::ContactsChanged,
            AppEvent::ModalChanged { .. } => EventKind::ModalChanged,
            AppEvent::ModalOpened { modal } => EventKind::Modal(*modal),
            AppEvent::OrderSucceeded { .. } => EventKind::OrderSucceeded,
        }
    }
}

/// Subscription key: one per [`AppEvent`] variant, with the modal-opened
/// companion split per modal state for fine-grained subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ProductsChanged,
    BasketChanged,
    OrderInfoChanged,
    ContactsChanged,
    ModalChanged,
    Modal(ModalKind),
    OrderSucceeded,
}

impl EventKind {
    /// The string token consumed by the presentation layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::ProductsChanged => "products-changed",
            EventKind::BasketChanged => "basket-changed",
            EventKind::OrderInfoChanged => "order-info-changed",
            EventKind::ContactsChanged => "contacts-changed",
            EventKind::ModalChanged => "modal-changed",
            EventKind::Modal(ModalKind::None) => "modal:none",
            EventKind::Modal(ModalKind::Preview) => "modal:preview",
            EventKind::Modal(ModalKind::Basket) => "modal:basket",
            EventKind::Modal(ModalKind::OrderInfo) => "modal:order-info",
            EventKind::Modal(ModalKind::Contacts) => "modal:contacts",
            EventKind::Modal(ModalKind::Success) => "modal:success",
            EventKind::OrderSucceeded => "order-succeeded",
        }
    }
}

/// Identifies one registration; returned by [`EventBus::on`] and
/// [`EventBus::on_any`], consumed by [`EventBus::off`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Handler = Arc<dyn Fn(&AppEvent) + Send + Sync>;

enum Filter {
    Exact(EventKind),
    Any,
}

struct Entry {
    id: u64,
    filter: Filter,
    handler: Handler,
}

/// Shared publish/subscribe dispatcher.
///
/// Cloning is cheap and clones share the same registry. Handlers are invoked
/// after the internal lock is released, so a handler may subscribe,
/// unsubscribe or emit without deadlocking; registrations made during a
/// dispatch take effect from the next emission.
#[derive(Clone)]
pub struct EventBus {
    entries: Arc<RwLock<Vec<Entry>>>,
    next_id: Arc<AtomicU64>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Registers a handler for one event kind.
    pub fn on<F>(&self, kind: EventKind, handler: F) -> Subscription
    where
        F: Fn(&AppEvent) + Send + Sync + 'static,
    {
        self.register(Filter::Exact(kind), Arc::new(handler))
    }

    /// Registers a wildcard handler receiving `(kind, payload)` for every
    /// emission. Used for diagnostic tracing.
    pub fn on_any<F>(&self, handler: F) -> Subscription
    where
        F: Fn(EventKind, &AppEvent) + Send + Sync + 'static,
    {
        self.register(
            Filter::Any,
            Arc::new(move |event: &AppEvent| handler(event.kind(), event)),
        )
    }

    /// Removes a registration. Returns `false` when it was already gone.
    pub fn off(&self, subscription: Subscription) -> bool {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|entry| entry.id != subscription.0);
        entries.len() != before
    }

    /// Synchronously invokes all matching handlers in registration order.
    pub fn emit(&self, event: &AppEvent) {
        let kind = event.kind();
        // Snapshot under the read lock, dispatch outside it.
        let matching: Vec<Handler> = self
            .entries
            .read()
            .iter()
            .filter(|entry| match entry.filter {
                Filter::Exact(registered) => registered == kind,
                Filter::Any => true,
            })
            .map(|entry| Arc::clone(&entry.handler))
            .collect();
        for handler in matching {
            handler(event);
        }
    }

    fn register(&self, filter: Filter, handler: Handler) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.entries.write().push(Entry {
            id,
            filter,
            handler,
        });
        Subscription(id)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
