//! Database configuration for the storefront.
//!
//! Handles `SQLite` connection setup and table creation using `SeaORM`. The
//! schema is generated from the entity definitions via
//! `Schema::create_table_from_entity`, so the database always matches the
//! Rust structs without hand-written SQL.

use crate::entities::{
    CartItem, Category, CompareItem, Message, Notification, Order, OrderItem, Outfit, Profile,
    Review, WishlistItem,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from the environment or returns the default `SQLite` path.
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/fashionhub.sqlite?mode=rwc".to_string())
}

/// Establishes a connection to the database named by `DATABASE_URL`.
///
/// Falls back to a local `SQLite` file if no environment variable is set.
///
/// # Errors
/// Returns an error if the connection cannot be established.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates any missing storefront tables from the entity definitions.
///
/// Tables are created in dependency order so the generated foreign keys
/// always point at something that exists.
///
/// # Errors
/// Returns an error if any of the generated DDL statements fail.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut statements = [
        schema.create_table_from_entity(Profile),
        schema.create_table_from_entity(Category),
        schema.create_table_from_entity(Outfit),
        schema.create_table_from_entity(CartItem),
        schema.create_table_from_entity(WishlistItem),
        schema.create_table_from_entity(CompareItem),
        schema.create_table_from_entity(Order),
        schema.create_table_from_entity(OrderItem),
        schema.create_table_from_entity(Review),
        schema.create_table_from_entity(Notification),
        schema.create_table_from_entity(Message),
    ];

    for statement in &mut statements {
        statement.if_not_exists();
        db.execute(builder.build(statement)).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        outfit::Model as OutfitModel, profile::Model as ProfileModel, review::Model as ReviewModel,
    };
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Query a few tables to verify they exist
        let _: Vec<ProfileModel> = Profile::find().limit(1).all(&db).await?;
        let _: Vec<OutfitModel> = Outfit::find().limit(1).all(&db).await?;
        let _: Vec<ReviewModel> = Review::find().limit(1).all(&db).await?;

        Ok(())
    }
}
