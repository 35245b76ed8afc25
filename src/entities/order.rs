//! Order entity - An immutable, price-frozen record of a checkout.
//!
//! Orders are created in one shot from a cart and never edited afterwards,
//! except for status transitions. `total_amount` is fixed at creation time
//! and is not recomputed when catalog prices change.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle of an order.
///
/// Legal transitions are `Pending -> Processing -> Completed`, with
/// cancellation possible from `Pending` or `Processing`. `Completed` and
/// `Cancelled` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum OrderStatus {
    /// Placed but not yet picked up for fulfilment
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Being fulfilled
    #[sea_orm(string_value = "processing")]
    Processing,
    /// Fulfilled, terminal
    #[sea_orm(string_value = "completed")]
    Completed,
    /// Abandoned before fulfilment, terminal
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl OrderStatus {
    /// Whether a status change from `self` to `next` is legal.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Processing)
                | (Self::Processing, Self::Completed)
                | (Self::Pending, Self::Cancelled)
                | (Self::Processing, Self::Cancelled)
        )
    }

    /// Whether no further transitions are possible.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Profile of the customer, kept nullable so orders survive account removal
    pub customer_id: Option<i64>,
    /// Current lifecycle state
    pub status: OrderStatus,
    /// Sum of item price x quantity, frozen at creation
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub total_amount: Decimal,
    /// Payment channel recorded with the order (no processing happens here)
    pub payment_method: String,
    /// When the order was placed
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each order belongs to one customer profile
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::CustomerId",
        to = "super::profile::Column::Id"
    )]
    Customer,
    /// One order owns many order items
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
