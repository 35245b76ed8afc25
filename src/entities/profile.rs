//! Profile entity - Represents a storefront account's profile.
//!
//! Every account has exactly one profile, created as part of registration.
//! A single profile at a time may carry the seller flag, which gates catalog
//! management.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Profile database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    /// Unique identifier for the profile
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Account handle supplied by the identity layer
    #[sea_orm(unique)]
    pub username: String,
    /// Free-text biography shown on the profile page
    pub bio: String,
    /// Contact phone number
    pub phone: String,
    /// Whether this profile is the storefront's designer/seller account.
    /// At most one profile carries this flag at any time.
    pub is_seller: bool,
}

/// Defines relationships between Profile and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Outfits designed by this profile
    #[sea_orm(has_many = "super::outfit::Entity")]
    Outfits,
    /// Orders placed by this profile
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
    /// Cart rows owned by this profile
    #[sea_orm(has_many = "super::cart_item::Entity")]
    CartItems,
    /// Wishlist rows owned by this profile
    #[sea_orm(has_many = "super::wishlist_item::Entity")]
    WishlistItems,
    /// Compare rows owned by this profile
    #[sea_orm(has_many = "super::compare_item::Entity")]
    CompareItems,
    /// Reviews written by this profile
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
    /// Notifications delivered to this profile
    #[sea_orm(has_many = "super::notification::Entity")]
    Notifications,
}

impl Related<super::outfit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Outfits.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
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

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl Related<super::notification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notifications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
