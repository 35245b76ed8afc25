//! Shared test utilities for the storefront.
//!
//! This module provides common helper functions for setting up test
//! databases and creating test entities with sensible defaults.

#![allow(clippy::unwrap_used)]

use crate::{
    config,
    core::profile as profile_ops,
    entities::{outfit, profile},
    errors::Result,
};
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, Set, prelude::*};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    config::database::create_tables(&db).await?;
    Ok(db)
}

/// Parses a decimal literal, panicking on bad test input.
pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

/// Registers a test profile with empty bio and phone.
pub async fn create_test_profile(
    db: &DatabaseConnection,
    username: &str,
) -> Result<profile::Model> {
    profile_ops::register_profile(db, username.to_string(), String::new(), String::new()).await
}

/// Registers a test profile and hands it the seller flag.
pub async fn create_seller_profile(
    db: &DatabaseConnection,
    username: &str,
) -> Result<profile::Model> {
    let registered = create_test_profile(db, username).await?;
    profile_ops::assign_seller(db, registered.id).await
}

/// Inserts an active outfit directly, bypassing the catalog policy checks.
///
/// # Defaults
/// * `is_active`: true
/// * `designer_id`: None
pub async fn create_test_outfit(
    db: &DatabaseConnection,
    name: &str,
    price: &str,
) -> Result<outfit::Model> {
    create_custom_outfit(db, name, dec(price), true, None).await
}

/// Inserts an outfit with custom flags, bypassing the catalog policy checks.
/// Use this to set up inactive listings or designer-owned listings.
pub async fn create_custom_outfit(
    db: &DatabaseConnection,
    name: &str,
    price: Decimal,
    is_active: bool,
    designer_id: Option<i64>,
) -> Result<outfit::Model> {
    let now = chrono::Utc::now();
    outfit::ActiveModel {
        name: Set(name.to_string()),
        description: Set(String::new()),
        price: Set(price),
        category_id: Set(None),
        designer_id: Set(designer_id),
        is_active: Set(is_active),
        brand: Set(None),
        color: Set(None),
        size: Set(None),
        material: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Sets up a complete test environment with a shopper profile and an outfit
/// priced at 10.00. Returns (db, profile, outfit) for common scenarios.
pub async fn setup_with_outfit()
-> Result<(DatabaseConnection, profile::Model, outfit::Model)> {
    let db = setup_test_db().await?;
    let shopper = create_test_profile(&db, "test_shopper").await?;
    let outfit = create_test_outfit(&db, "Test Outfit", "10.00").await?;
    Ok((db, shopper, outfit))
}
