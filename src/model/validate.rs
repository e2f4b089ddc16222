//! Pure form validators.
//!
//! Each function maps the full merged form state to an error message or
//! `None`; callers merge partial updates into persistent state first and
//! never validate a delta alone. No side effects, no stored state.

use crate::model::checkout::{Contacts, OrderInfo};

const REQUIRED_ORDER_INFO: &str = "Payment method and delivery address are required fields";
const REQUIRED_CONTACTS: &str = "Email and phone are required fields";
const INVALID_EMAIL: &str = "Invalid email";
const INVALID_PHONE: &str = "Invalid phone";

/// `Some` exactly when the delivery address is empty. The payment method is
/// an enum and always carries a value, so only the address can be missing.
pub fn validate_order_info(info: &OrderInfo) -> Option<String> {
    if info.address.is_empty() {
        Some(format!("{REQUIRED_ORDER_INFO}."))
    } else {
        None
    }
}

/// Accumulates complaints in a fixed order, joined with ". " and terminated
/// with a period: missing fields first, then email shape, then phone shape.
pub fn validate_contacts(contacts: &Contacts) -> Option<String> {
    let mut errors: Vec<&str> = Vec::new();
    if contacts.email.is_empty() || contacts.phone.is_empty() {
        errors.push(REQUIRED_CONTACTS);
    }
    if !contacts.email.is_empty() && !is_valid_email(&contacts.email) {
        errors.push(INVALID_EMAIL);
    }
    if !contacts.phone.is_empty() && !is_valid_phone(&contacts.phone) {
        errors.push(INVALID_PHONE);
    }
    if errors.is_empty() {
        None
    } else {
        Some(format!("{}.", errors.join(". ")))
    }
}

/// `local@domain.tld`: ASCII word characters plus `.`/`_`/`+`/`-` in the
/// local part, alphanumerics/hyphens in the domain, a dot-separated tld.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.split_once('.') else {
        return false;
    };
    !local.is_empty()
        && !host.is_empty()
        && !tld.is_empty()
        && local
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'+' | b'-'))
        && host.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
        && tld
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.'))
}

/// Optional leading `+`, then 10 to 14 digits.
fn is_valid_phone(phone: &str) -> bool {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    (10..=14).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit())
}
