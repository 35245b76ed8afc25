//! Compare item entity - Set membership of an outfit in a profile's compare list.
//!
//! Unlike the wishlist, the compare list is capped per profile; the list
//! logic re-checks the cap inside the same transaction as the insert.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Compare item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "compare_items")]
pub struct Model {
    /// Unique identifier for the compare row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Profile that owns this row
    pub profile_id: i64,
    /// Outfit this row refers to
    pub outfit_id: i64,
    /// When the outfit was added
    pub added_at: DateTimeUtc,
}

/// Defines relationships between CompareItem and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each compare row belongs to one profile
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::ProfileId",
        to = "super::profile::Column::Id"
    )]
    Profile,
    /// Each compare row references one outfit
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
