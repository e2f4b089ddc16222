use thiserror::Error;

/// A disallowed user/UI action: invalid id, illegal modal transition or a
/// missing precondition.
///
/// Returned synchronously from the offending call and meant to be handled at
/// the call site that issued the action. Transient form invalidity is never
/// reported this way — that is data ([`crate::model::FormStatus`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidOperation {
    #[error("product '{id}' is not in the catalog")]
    UnknownProduct { id: String },

    #[error("product '{id}' has no price and cannot be purchased")]
    NotForSale { id: String },

    #[error("product '{id}' is already in the basket")]
    AlreadyInBasket { id: String },

    #[error("product '{id}' is not in the basket")]
    NotInBasket { id: String },

    #[error("no product selected")]
    NoProductSelected,

    #[error("no products selected")]
    EmptyBasket,

    #[error("order information is incorrect")]
    OrderInfoInvalid,
}
