//! Review entity - A rating and comment left on an outfit.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Review database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    /// Unique identifier for the review
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Outfit being reviewed
    pub outfit_id: i64,
    /// Reviewer profile, kept nullable so reviews survive account removal
    pub reviewer_id: Option<i64>,
    /// Star rating, validated to 1-5 at write time
    pub rating: i16,
    /// Free-text comment, may be empty
    pub comment: String,
    /// When the review was written
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Review and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each review belongs to one outfit
    #[sea_orm(
        belongs_to = "super::outfit::Entity",
        from = "Column::OutfitId",
        to = "super::outfit::Column::Id"
    )]
    Outfit,
    /// Each review was written by one profile
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::ReviewerId",
        to = "super::profile::Column::Id"
    )]
    Reviewer,
}

impl Related<super::outfit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Outfit.def()
    }
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviewer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
