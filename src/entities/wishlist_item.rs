//! Wishlist item entity - Set membership of an outfit in a profile's wishlist.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Wishlist item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wishlist_items")]
pub struct Model {
    /// Unique identifier for the wishlist row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Profile that owns this row
    pub profile_id: i64,
    /// Outfit this row refers to
    pub outfit_id: i64,
    /// When the outfit was added
    pub added_at: DateTimeUtc,
}

/// Defines relationships between WishlistItem and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each wishlist row belongs to one profile
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::ProfileId",
        to = "super::profile::Column::Id"
    )]
    Profile,
    /// Each wishlist row references one outfit
    #[sea_orm(
        belongs_to = "super::outfit::Entity",
        from = "Column::OutfitId",
        to = "super::outfit::Column::Id"
    )]
    Outfit,
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profile.def()
    }
}

impl Related<super::outfit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Outfit.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
