//! The application state orchestrator.
//!
//! Composes the catalog, basket, checkout form and modal controller behind
//! one lock, exposes the unified mutator/accessor contract and is the single
//! point that emits change events. Handlers subscribed on the bus may call
//! back into the state: every emission happens after the internal lock has
//! been released, and no lock is ever held across an await point.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::api::{ApiError, Order, OrderGateway, OrderReceipt};
use crate::events::{AppEvent, EventBus};
use crate::model::basket::{Basket, BasketEntry};
use crate::model::catalog::{Catalog, Product};
use crate::model::checkout::{
    CheckoutForm, Contacts, ContactsUpdate, FormStatus, OrderInfo, OrderInfoUpdate,
};
use crate::model::error::InvalidOperation;
use crate::model::modal::{ModalController, ModalKind, OpenContext};

/// Rejection message for the in-flight submission guard.
const SUBMISSION_IN_PROGRESS: &str = "An order submission is already in progress";

/// Result of [`AppState::order_products`].
///
/// Submission is best-effort: gateway failures are captured here (and in the
/// modal message) instead of being returned as `Err`, so the type is
/// `#[must_use]` — callers decide success by inspecting it, not by `?`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "submission failures are reported through the outcome, not as Err"]
pub enum OrderOutcome {
    /// The gateway accepted the order.
    Completed(OrderReceipt),
    /// The gateway rejected the order, or one was already in flight.
    Rejected { message: String },
}

impl OrderOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, OrderOutcome::Completed(_))
    }

    pub fn receipt(&self) -> Option<&OrderReceipt> {
        match self {
            OrderOutcome::Completed(receipt) => Some(receipt),
            OrderOutcome::Rejected { .. } => None,
        }
    }
}

/// Everything behind the lock. Mutations are synchronous and atomic from
/// the caller's perspective.
#[derive(Default)]
struct Stores {
    catalog: Catalog,
    basket: Basket,
    checkout: CheckoutForm,
    modal: ModalController,
    /// Failure text of the last order submission; empty when none.
    modal_message: String,
}

/// The single shared state instance of the application.
///
/// Mutators take `&self`; the type is `Send + Sync` and meant to live in an
/// `Arc` shared between UI tasks and event handlers. Only these methods
/// write the stores — observers get snapshots, never references.
pub struct AppState {
    bus: EventBus,
    gateway: Arc<dyn OrderGateway>,
    stores: Mutex<Stores>,
    /// At most one order submission may be in flight.
    submitting: AtomicBool,
}

impl AppState {
    pub fn new(gateway: Arc<dyn OrderGateway>, bus: EventBus) -> Self {
        Self {
            bus,
            gateway,
            stores: Mutex::new(Stores::default()),
            submitting: AtomicBool::new(false),
        }
    }

    /// The bus this state emits on; subscribe here.
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    // ---- gateway operations ------------------------------------------------

    /// Replaces the catalog from the gateway and emits `products-changed`.
    ///
    /// Fetch failures propagate to the caller unchanged — the embedder
    /// decides between retry and a fatal load error.
    pub async fn load_products(&self) -> Result<(), ApiError> {
        let products = self.gateway.fetch_catalog().await?;
        tracing::info!("catalog loaded: {} products", products.len());
        let snapshot = {
            let mut stores = self.stores.lock();
            stores.catalog.replace_all(products);
            stores.catalog.products().to_vec()
        };
        self.bus.emit(&AppEvent::ProductsChanged { products: snapshot });
        Ok(())
    }

    /// Submits the current order snapshot to the gateway.
    ///
    /// On success the basket is cleared and `basket-changed` +
    /// `order-succeeded` fire, the latter with the server-confirmed total.
    /// On failure the error text is captured into the modal message and the
    /// basket is left untouched. A second call while one is in flight is
    /// rejected without touching any state.
    ///
    /// The core does not forbid submitting an empty basket; that guard lives
    /// in the order-info modal precondition.
    pub async fn order_products(&self) -> OrderOutcome {
        if self.submitting.swap(true, Ordering::SeqCst) {
            return OrderOutcome::Rejected {
                message: SUBMISSION_IN_PROGRESS.to_string(),
            };
        }
        let order = self.order();
        let result = self.gateway.submit_order(&order).await;
        self.submitting.store(false, Ordering::SeqCst);

        match result {
            Ok(receipt) => {
                let (items, total) = {
                    let mut stores = self.stores.lock();
                    stores.basket.clear();
                    stores.modal_message.clear();
                    (stores.basket.items().to_vec(), stores.basket.total())
                };
                tracing::info!(
                    "order '{}' accepted for a total of {}",
                    receipt.id,
                    receipt.total
                );
                self.bus.emit(&AppEvent::BasketChanged { items, total });
                self.bus.emit(&AppEvent::OrderSucceeded {
                    total: receipt.total,
                });
                OrderOutcome::Completed(receipt)
            }
            Err(err) => {
                let message = err.to_string();
                tracing::warn!("order submission failed: {message}");
                self.stores.lock().modal_message = message.clone();
                OrderOutcome::Rejected { message }
            }
        }
    }

    // ---- basket ------------------------------------------------------------

    /// Adds a catalog product to the basket and emits `basket-changed`.
    ///
    /// Fails when the id is unknown to the catalog, the product has no
    /// price, or it is already in the basket.
    pub fn add_to_basket(&self, id: &str) -> Result<(), InvalidOperation> {
        let (items, total) = {
            let mut guard = self.stores.lock();
            let stores = &mut *guard;
            let entry = {
                let product =
                    stores
                        .catalog
                        .get(id)
                        .ok_or_else(|| InvalidOperation::UnknownProduct {
                            id: id.to_string(),
                        })?;
                BasketEntry::project(product).ok_or_else(|| InvalidOperation::NotForSale {
                    id: id.to_string(),
                })?
            };
            stores.basket.insert(entry)?;
            (stores.basket.items().to_vec(), stores.basket.total())
        };
        self.bus.emit(&AppEvent::BasketChanged { items, total });
        Ok(())
    }

    /// Empties the basket unconditionally and emits `basket-changed`.
    pub fn clear_basket(&self) {
        let (items, total) = {
            let mut stores = self.stores.lock();
            stores.basket.clear();
            (stores.basket.items().to_vec(), stores.basket.total())
        };
        self.bus.emit(&AppEvent::BasketChanged { items, total });
    }

    /// Removes a basket entry and emits `basket-changed`.
    pub fn remove_from_basket(&self, id: &str) -> Result<(), InvalidOperation> {
        let (items, total) = {
            let mut stores = self.stores.lock();
            stores.basket.remove(id)?;
            (stores.basket.items().to_vec(), stores.basket.total())
        };
        self.bus.emit(&AppEvent::BasketChanged { items, total });
        Ok(())
    }

    // ---- checkout forms ----------------------------------------------------

    /// Merges a partial order-info update, revalidates the full form and
    /// emits `order-info-changed`.
    pub fn fill_order_info(&self, update: OrderInfoUpdate) -> FormStatus {
        let status = self.stores.lock().checkout.fill_order_info(update);
        self.bus.emit(&AppEvent::OrderInfoChanged {
            status: status.clone(),
        });
        status
    }

    /// Merges a partial contacts update, revalidates the full form and
    /// emits `contacts-changed`.
    pub fn fill_contacts(&self, update: ContactsUpdate) -> FormStatus {
        let status = self.stores.lock().checkout.fill_contacts(update);
        self.bus.emit(&AppEvent::ContactsChanged {
            status: status.clone(),
        });
        status
    }

    /// Resets both form statuses to cleared without touching field values.
    /// Emits nothing: the modal events of the open that follows trigger the
    /// re-render.
    pub fn clear_validation(&self) {
        self.stores.lock().checkout.clear_validation();
    }

    /// Restores both forms to their defaults; used after a successful
    /// order. Emits nothing.
    pub fn reset_forms(&self) {
        self.stores.lock().checkout.reset();
    }

    // ---- modal navigation --------------------------------------------------

    /// Attempts a guarded modal transition.
    ///
    /// `preview_id` is only consulted for [`ModalKind::Preview`]. Opening a
    /// form-bearing modal reruns that form's validation and emits its status
    /// event first; a successful transition then emits `modal-changed`
    /// followed by the literal state token. Re-opening the current modal
    /// skips the transition pair.
    pub fn open_modal(
        &self,
        target: ModalKind,
        preview_id: Option<&str>,
    ) -> Result<(), InvalidOperation> {
        let (status_event, change) = {
            let mut guard = self.stores.lock();
            let stores = &mut *guard;
            let context = OpenContext {
                preview_id,
                basket_is_empty: stores.basket.is_empty(),
                order_info_valid: stores.checkout.order_info_is_valid(),
            };
            let change = stores.modal.open(target, context)?;
            let status_event = match target {
                ModalKind::OrderInfo => Some(AppEvent::OrderInfoChanged {
                    status: stores.checkout.revalidate_order_info(),
                }),
                ModalKind::Contacts => Some(AppEvent::ContactsChanged {
                    status: stores.checkout.revalidate_contacts(),
                }),
                _ => None,
            };
            (status_event, change)
        };

        if let Some(event) = status_event {
            self.bus.emit(&event);
        }
        if let Some(change) = change {
            tracing::debug!(
                "modal {} -> {}",
                change.previous.as_str(),
                change.current.as_str()
            );
            self.bus.emit(&AppEvent::ModalChanged {
                previous: change.previous,
                current: change.current,
            });
            self.bus.emit(&AppEvent::ModalOpened {
                modal: change.current,
            });
        }
        Ok(())
    }

    /// Returns to the rest state. Always succeeds.
    pub fn close_modal(&self) {
        self.open_modal(ModalKind::None, None)
            .expect("closing the modal is unconditional");
    }

    // ---- accessors ---------------------------------------------------------

    pub fn products(&self) -> Vec<Product> {
        self.stores.lock().catalog.products().to_vec()
    }

    pub fn product(&self, id: &str) -> Option<Product> {
        self.stores.lock().catalog.get(id).cloned()
    }

    pub fn basket_items(&self) -> Vec<BasketEntry> {
        self.stores.lock().basket.items().to_vec()
    }

    pub fn basket_contains(&self, id: &str) -> bool {
        self.stores.lock().basket.contains(id)
    }

    pub fn basket_total(&self) -> u64 {
        self.stores.lock().basket.total()
    }

    pub fn basket_size(&self) -> usize {
        self.stores.lock().basket.len()
    }

    pub fn order_info(&self) -> OrderInfo {
        self.stores.lock().checkout.order_info().clone()
    }

    pub fn contacts(&self) -> Contacts {
        self.stores.lock().checkout.contacts().clone()
    }

    pub fn order_info_status(&self) -> FormStatus {
        self.stores.lock().checkout.order_info_status().clone()
    }

    pub fn contacts_status(&self) -> FormStatus {
        self.stores.lock().checkout.contacts_status().clone()
    }

    pub fn current_modal(&self) -> ModalKind {
        self.stores.lock().modal.current()
    }

    pub fn previous_modal(&self) -> ModalKind {
        self.stores.lock().modal.previous()
    }

    pub fn previewed_product(&self) -> Option<String> {
        self.stores
            .lock()
            .modal
            .previewed_product()
            .map(str::to_string)
    }

    /// Failure text of the last order submission; empty when none.
    pub fn modal_message(&self) -> String {
        self.stores.lock().modal_message.clone()
    }

    /// Whether an order submission is currently in flight.
    pub fn submission_in_progress(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    /// The submission payload derived from the current basket and forms.
    /// A snapshot — later mutations do not affect an order already built.
    pub fn order(&self) -> Order {
        let guard = self.stores.lock();
        let order_info = guard.checkout.order_info();
        let contacts = guard.checkout.contacts();
        Order {
            payment: order_info.payment,
            address: order_info.address.clone(),
            email: contacts.email.clone(),
            phone: contacts.phone.clone(),
            total: guard.basket.total(),
            items: guard.basket.item_ids(),
        }
    }
}
