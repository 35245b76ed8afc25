//! Order item entity - One line of an order, with the price frozen.
//!
//! `price` is a copy of the outfit's catalog price taken at order creation,
//! never a live reference. The outfit reference is nullable so the line
//! survives outfit deletion.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_items")]
pub struct Model {
    /// Unique identifier for the order line
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Order this line belongs to
    pub order_id: i64,
    /// Outfit this line was created from, if it still exists
    pub outfit_id: Option<i64>,
    /// Units ordered
    pub quantity: i32,
    /// Unit price at the moment the order was placed, write-once
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
}

/// Defines relationships between OrderItem and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line belongs to one order
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id"
    )]
    Order,
    /// Each line references the outfit it was created from
    #[sea_orm(
        belongs_to = "super::outfit::Entity",
        from = "Column::OutfitId",
        to = "super::outfit::Column::Id"
    )]
    Outfit,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::outfit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Outfit.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
