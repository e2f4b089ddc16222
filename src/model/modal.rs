//! Finite-state controller for the visible overlay.
//!
//! At most one modal is active at a time; transitions go through
//! [`ModalController::open`] and nothing else. Guards that need data from
//! other stores (basket size, order-info validity) receive it through
//! [`OpenContext`] — the controller itself holds no references to them.

use crate::model::error::InvalidOperation;

/// The exclusive overlay states of the application. `None` is the rest
/// state; every state is reachable from every other given the right
/// context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ModalKind {
    #[default]
    None,
    Preview,
    Basket,
    OrderInfo,
    Contacts,
    Success,
}

impl ModalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModalKind::None => "none",
            ModalKind::Preview => "preview",
            ModalKind::Basket => "basket",
            ModalKind::OrderInfo => "order-info",
            ModalKind::Contacts => "contacts",
            ModalKind::Success => "success",
        }
    }
}

/// A successful transition, for the coarse `modal-changed` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ModalChange {
    pub previous: ModalKind,
    pub current: ModalKind,
}

/// Cross-store facts the transition guards need.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OpenContext<'a> {
    pub preview_id: Option<&'a str>,
    pub basket_is_empty: bool,
    pub order_info_valid: bool,
}

/// Tracks the current overlay, the immediately preceding one and the
/// previewed product id.
#[derive(Debug, Default)]
pub struct ModalController {
    current: ModalKind,
    previous: ModalKind,
    previewed: Option<String>,
}

impl ModalController {
    /// Attempts a transition to `target`.
    ///
    /// - `Preview` requires a product id in the context; a missing id fails
    ///   and clears the previewed id as a side effect, leaving modal state
    ///   unchanged.
    /// - `OrderInfo` requires a non-empty basket.
    /// - `Contacts` requires currently-valid order info.
    /// - `Basket`, `Success` and `None` are unconditional.
    ///
    /// Returns `Ok(None)` when `target` is already current — the idempotent
    /// re-open is silent and the previous state is not rewritten.
    pub(crate) fn open(
        &mut self,
        target: ModalKind,
        context: OpenContext<'_>,
    ) -> Result<Option<ModalChange>, InvalidOperation> {
        match target {
            ModalKind::Preview => match context.preview_id {
                Some(id) => self.previewed = Some(id.to_string()),
                None => {
                    self.previewed = None;
                    return Err(InvalidOperation::NoProductSelected);
                }
            },
            ModalKind::OrderInfo if context.basket_is_empty => {
                return Err(InvalidOperation::EmptyBasket);
            }
            ModalKind::Contacts if !context.order_info_valid => {
                return Err(InvalidOperation::OrderInfoInvalid);
            }
            _ => {}
        }

        if self.current == target {
            return Ok(None);
        }
        self.previous = self.current;
        self.current = target;
        Ok(Some(ModalChange {
            previous: self.previous,
            current: self.current,
        }))
    }

    pub fn current(&self) -> ModalKind {
        self.current
    }

    pub fn previous(&self) -> ModalKind {
        self.previous
    }

    pub fn previewed_product(&self) -> Option<&str> {
        self.previewed.as_deref()
    }
}
