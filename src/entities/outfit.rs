//! Outfit entity - A catalog listing with a live price.
//!
//! Outfits are referenced, never owned, by cart, order, review, wishlist,
//! and compare rows. The price here is the live catalog price; order items
//! copy it at checkout time rather than referencing it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Outfit database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "outfits")]
pub struct Model {
    /// Unique identifier for the outfit
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Current catalog price, always non-negative
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    /// Category this outfit is filed under, if any
    pub category_id: Option<i64>,
    /// Profile of the designer who listed the outfit
    pub designer_id: Option<i64>,
    /// Whether the outfit is visible on the storefront
    pub is_active: bool,
    /// Brand label used by the comparison view
    pub brand: Option<String>,
    /// Color used by the comparison view
    pub color: Option<String>,
    /// Size used by the comparison view
    pub size: Option<String>,
    /// Material used by the comparison view
    pub material: Option<String>,
    /// When the outfit was listed
    pub created_at: DateTimeUtc,
    /// When the outfit was last edited
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Outfit and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The category this outfit belongs to
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    /// The designer profile that listed this outfit
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::DesignerId",
        to = "super::profile::Column::Id"
    )]
    Designer,
    /// Cart rows referencing this outfit
    #[sea_orm(has_many = "super::cart_item::Entity")]
    CartItems,
    /// Wishlist rows referencing this outfit
    #[sea_orm(has_many = "super::wishlist_item::Entity")]
    WishlistItems,
    /// Compare rows referencing this outfit
    #[sea_orm(has_many = "super::compare_item::Entity")]
    CompareItems,
    /// Order items referencing this outfit
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
    /// Reviews left on this outfit
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Designer.def()
    }
}

impl Related<super::cart_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CartItems.def()
    }
}

impl Related<super::wishlist_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WishlistItems.def()
    }
}

impl Related<super::compare_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CompareItems.def()
    }
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
