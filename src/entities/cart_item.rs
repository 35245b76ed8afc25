//! Cart item entity - A mutable per-profile, per-outfit quantity row.
//!
//! There is at most one row per (profile, outfit) pair; repeat adds bump the
//! quantity instead of inserting. A quantity of zero is never stored, the row
//! is deleted instead. The cart logic enforces both rules inside a single
//! transaction.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Cart item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cart_items")]
pub struct Model {
    /// Unique identifier for the cart row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Profile that owns this cart row
    pub profile_id: i64,
    /// Outfit this row refers to
    pub outfit_id: i64,
    /// Number of units in the cart, always at least 1
    pub quantity: i32,
    /// When the row was first created
    pub added_at: DateTimeUtc,
}

/// Defines relationships between CartItem and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each cart row belongs to one profile
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::ProfileId",
        to = "super::profile::Column::Id"
    )]
    Profile,
    /// Each cart row references one outfit
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
