//! Unified error types for the storefront core.
//!
//! Every fallible operation returns [`Result`]. The variants mirror the
//! failures a caller can meaningfully react to: missing rows, ownership
//! violations, bad input, an empty cart at checkout, and the compare-list
//! cap. Anything unexpected from the storage layer surfaces as [`Error::Database`].

use crate::entities::OrderStatus;
use rust_decimal::Decimal;
use thiserror::Error;

/// All failures the storefront core can report.
#[derive(Debug, Error)]
pub enum Error {
    /// A referenced row does not exist or is not visible to the caller.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Kind of row that was looked up (e.g., "outfit", "cart item")
        entity: &'static str,
        /// Identifier that failed to resolve
        id: i64,
    },

    /// The caller does not own the row they are trying to mutate.
    #[error("profile {profile_id} is not allowed to modify {entity}")]
    Forbidden {
        /// The calling profile
        profile_id: i64,
        /// Description of the protected target (e.g., "cart item 9")
        entity: String,
    },

    /// A cart quantity was zero or negative.
    #[error("quantity must be at least 1, got {quantity}")]
    InvalidQuantity {
        /// The rejected quantity
        quantity: i32,
    },

    /// A catalog price was negative.
    #[error("price must not be negative, got {price}")]
    InvalidPrice {
        /// The rejected price
        price: Decimal,
    },

    /// A review rating fell outside the admissible 1-5 range.
    #[error("rating must be between 1 and 5, got {rating}")]
    InvalidRating {
        /// The rejected rating
        rating: i16,
    },

    /// Checkout was attempted with no cart rows.
    #[error("cart is empty")]
    EmptyCart,

    /// The compare list already holds the maximum number of outfits.
    #[error("compare list is full ({count} items)")]
    CompareListFull {
        /// How many compare rows the profile currently holds
        count: u64,
    },

    /// An order status change that the lifecycle does not allow.
    #[error("order status cannot change from {from:?} to {to:?}")]
    InvalidStatusTransition {
        /// Status the order is currently in
        from: OrderStatus,
        /// Status that was requested
        to: OrderStatus,
    },

    /// Invalid configuration or input outside the dedicated variants.
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable description of what was wrong
        message: String,
    },

    /// Unexpected storage-layer failure.
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
