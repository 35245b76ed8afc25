//! Category entity - A browsable grouping of outfits.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    /// Unique identifier for the category
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g., "Evening Wear")
    #[sea_orm(unique)]
    pub name: String,
    /// URL-safe identifier derived from the name
    #[sea_orm(unique)]
    pub slug: String,
    /// Accent color used when rendering the category
    pub color: String,
    /// Whether the category is surfaced on the landing page
    pub featured: bool,
}

/// Defines relationships between Category and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Outfits filed under this category
    #[sea_orm(has_many = "super::outfit::Entity")]
    Outfits,
}

impl Related<super::outfit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Outfits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
