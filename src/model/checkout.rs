//! Checkout form state: delivery/payment info, contact info and their
//! validation statuses.

use serde::{Deserialize, Serialize};

use crate::model::validate;

/// How the order will be paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Card,
    Cash,
}

/// Delivery and payment fields of the checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrderInfo {
    pub payment: PaymentMethod,
    pub address: String,
}

/// Contact fields of the checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Contacts {
    pub email: String,
    pub phone: String,
}

/// Partial update for [`OrderInfo`]; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct OrderInfoUpdate {
    pub payment: Option<PaymentMethod>,
    pub address: Option<String>,
}

/// Partial update for [`Contacts`]; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ContactsUpdate {
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Validity + message pair recomputed after every field mutation.
///
/// A status produced by validation satisfies `valid == message.is_empty()`.
/// The default is the cleared status `{"", false}`: no error to show, but
/// not yet known to be valid — used when re-entering a form so stale errors
/// do not flash.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormStatus {
    pub message: String,
    pub valid: bool,
}

impl FormStatus {
    fn from_validation(error: Option<String>) -> Self {
        match error {
            Some(message) => Self {
                message,
                valid: false,
            },
            None => Self {
                message: String::new(),
                valid: true,
            },
        }
    }
}

/// Persistent checkout form state.
///
/// Partial updates are shallow-merged into the structs before the
/// corresponding validator runs on the full state.
#[derive(Debug, Default)]
pub struct CheckoutForm {
    order_info: OrderInfo,
    contacts: Contacts,
    order_info_status: FormStatus,
    contacts_status: FormStatus,
}

impl CheckoutForm {
    /// Merges the update, revalidates and returns the fresh status.
    pub fn fill_order_info(&mut self, update: OrderInfoUpdate) -> FormStatus {
        if let Some(payment) = update.payment {
            self.order_info.payment = payment;
        }
        if let Some(address) = update.address {
            self.order_info.address = address;
        }
        self.revalidate_order_info()
    }

    /// Merges the update, revalidates and returns the fresh status.
    pub fn fill_contacts(&mut self, update: ContactsUpdate) -> FormStatus {
        if let Some(email) = update.email {
            self.contacts.email = email;
        }
        if let Some(phone) = update.phone {
            self.contacts.phone = phone;
        }
        self.revalidate_contacts()
    }

    /// Recomputes the order-info status from current field values; used on
    /// entry into the order-info modal.
    pub fn revalidate_order_info(&mut self) -> FormStatus {
        self.order_info_status =
            FormStatus::from_validation(validate::validate_order_info(&self.order_info));
        self.order_info_status.clone()
    }

    /// Recomputes the contacts status from current field values; used on
    /// entry into the contacts modal.
    pub fn revalidate_contacts(&mut self) -> FormStatus {
        self.contacts_status =
            FormStatus::from_validation(validate::validate_contacts(&self.contacts));
        self.contacts_status.clone()
    }

    /// Read-only check for the contacts-modal guard; does not touch the
    /// stored status.
    pub fn order_info_is_valid(&self) -> bool {
        validate::validate_order_info(&self.order_info).is_none()
    }

    /// Resets both statuses to cleared without touching field values.
    pub fn clear_validation(&mut self) {
        self.order_info_status = FormStatus::default();
        self.contacts_status = FormStatus::default();
    }

    /// Restores both forms and their statuses to defaults; used after a
    /// successful order.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn order_info(&self) -> &OrderInfo {
        &self.order_info
    }

    pub fn contacts(&self) -> &Contacts {
        &self.contacts
    }

    pub fn order_info_status(&self) -> &FormStatus {
        &self.order_info_status
    }

    pub fn contacts_status(&self) -> &FormStatus {
        &self.contacts_status
    }
}
