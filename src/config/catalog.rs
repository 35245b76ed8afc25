//! Catalog seed data loading from config.toml
//!
//! This module loads the initial categories and outfits from a TOML file and
//! provisions any that are missing. Seeding is idempotent: rows that already
//! exist by name are skipped, so the binary can run repeatedly against the
//! same database.

use crate::entities::{Category, Outfit, category, outfit};
use crate::errors::{Error, Result};
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, Set, TransactionTrait, prelude::*};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, warn};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct CatalogConfig {
    /// Categories to provision
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,
    /// Outfits to provision
    #[serde(default)]
    pub outfits: Vec<OutfitConfig>,
}

/// Seed data for a single category
#[derive(Debug, Deserialize, Clone)]
pub struct CategoryConfig {
    /// Display name, unique across categories
    pub name: String,
    /// URL-safe identifier
    pub slug: String,
    /// Accent color, defaults to "blue"
    #[serde(default = "default_color")]
    pub color: String,
    /// Whether the category is featured on the landing page
    #[serde(default)]
    pub featured: bool,
}

/// Seed data for a single outfit
#[derive(Debug, Deserialize, Clone)]
pub struct OutfitConfig {
    /// Display name
    pub name: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Catalog price, e.g. "49.99"
    pub price: Decimal,
    /// Name of the category to file the outfit under, if any
    pub category: Option<String>,
    /// Brand label
    pub brand: Option<String>,
    /// Color
    pub color: Option<String>,
    /// Size
    pub size: Option<String>,
    /// Material
    pub material: Option<String>,
}

fn default_color() -> String {
    "blue".to_string()
}

/// Loads catalog seed configuration from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CatalogConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads catalog seed configuration from the default location (./config.toml)
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_default_config() -> Result<CatalogConfig> {
    load_config("config.toml")
}

/// Provisions any configured categories and outfits that are missing.
///
/// Everything runs inside one transaction. Rows are matched by name; a row
/// that already exists is left untouched, including its price. Outfits that
/// name an unknown category are still created, just without a category link.
///
/// # Errors
/// Returns an error if a seed price is negative or a database operation fails.
pub async fn seed_initial_catalog(db: &DatabaseConnection, config: &CatalogConfig) -> Result<()> {
    info!(
        "Seeding catalog: {} categories, {} outfits configured.",
        config.categories.len(),
        config.outfits.len()
    );
    let txn = db.begin().await?;

    for cfg_category in &config.categories {
        let exists = Category::find()
            .filter(category::Column::Name.eq(&cfg_category.name))
            .one(&txn)
            .await?
            .is_some();
        if exists {
            debug!("Category '{}' already exists. Skipping.", cfg_category.name);
            continue;
        }

        info!("Inserting new category '{}'", cfg_category.name);
        category::ActiveModel {
            name: Set(cfg_category.name.clone()),
            slug: Set(cfg_category.slug.clone()),
            color: Set(cfg_category.color.clone()),
            featured: Set(cfg_category.featured),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    for cfg_outfit in &config.outfits {
        if cfg_outfit.price < Decimal::ZERO {
            return Err(Error::Config {
                message: format!(
                    "Outfit '{}' has a negative price: {}",
                    cfg_outfit.name, cfg_outfit.price
                ),
            });
        }

        let exists = Outfit::find()
            .filter(outfit::Column::Name.eq(&cfg_outfit.name))
            .one(&txn)
            .await?
            .is_some();
        if exists {
            debug!("Outfit '{}' already exists. Skipping.", cfg_outfit.name);
            continue;
        }

        let category_id = match &cfg_outfit.category {
            Some(category_name) => {
                let found = Category::find()
                    .filter(category::Column::Name.eq(category_name))
                    .one(&txn)
                    .await?;
                if found.is_none() {
                    warn!(
                        "Outfit '{}' names unknown category '{}'. Creating without one.",
                        cfg_outfit.name, category_name
                    );
                }
                found.map(|c| c.id)
            }
            None => None,
        };

        info!("Inserting new outfit '{}'", cfg_outfit.name);
        let now = chrono::Utc::now();
        outfit::ActiveModel {
            name: Set(cfg_outfit.name.clone()),
            description: Set(cfg_outfit.description.clone()),
            price: Set(cfg_outfit.price),
            category_id: Set(category_id),
            designer_id: Set(None),
            is_active: Set(true),
            brand: Set(cfg_outfit.brand.clone()),
            color: Set(cfg_outfit.color.clone()),
            size: Set(cfg_outfit.size.clone()),
            material: Set(cfg_outfit.material.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;
    info!("Finished seeding catalog.");
    Ok(())
}
