//! Catalog business logic - Categories and outfit listings.
//!
//! Reads only ever surface active outfits; management operations load the
//! row regardless of its active flag so a designer can edit a delisted
//! outfit. All mutations go through the policy predicates in
//! [`crate::core::policy`].

use crate::{
    core::policy,
    entities::{Category, OrderItem, Outfit, category, outfit, profile},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{Condition, QueryOrder, Set, prelude::*};
use std::collections::HashMap;
use tracing::info;

/// Sort orders accepted by the outfit listing views.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutfitSort {
    /// Most recently listed first
    #[default]
    Newest,
    /// Cheapest first
    PriceLowToHigh,
    /// Most expensive first
    PriceHighToLow,
    /// Most-ordered first
    Popular,
}

/// Fields accepted when creating or editing an outfit.
#[derive(Debug, Clone, Default)]
pub struct OutfitDraft {
    /// Display name
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Catalog price, must not be negative
    pub price: Decimal,
    /// Category to file the outfit under
    pub category_id: Option<i64>,
    /// Brand label for the comparison view
    pub brand: Option<String>,
    /// Color for the comparison view
    pub color: Option<String>,
    /// Size for the comparison view
    pub size: Option<String>,
    /// Material for the comparison view
    pub material: Option<String>,
}

fn validate_draft(draft: &OutfitDraft) -> Result<()> {
    if draft.name.trim().is_empty() {
        return Err(Error::Config {
            message: "Outfit name cannot be empty".to_string(),
        });
    }
    if draft.price < Decimal::ZERO {
        return Err(Error::InvalidPrice { price: draft.price });
    }
    Ok(())
}

/// Creates a new category.
///
/// # Errors
/// Returns an error if the name or slug is empty or already in use.
pub async fn create_category(
    db: &DatabaseConnection,
    name: String,
    slug: String,
    color: String,
    featured: bool,
) -> Result<category::Model> {
    if name.trim().is_empty() || slug.trim().is_empty() {
        return Err(Error::Config {
            message: "Category name and slug cannot be empty".to_string(),
        });
    }

    let clash = Category::find()
        .filter(
            Condition::any()
                .add(category::Column::Name.eq(name.trim()))
                .add(category::Column::Slug.eq(slug.trim())),
        )
        .one(db)
        .await?
        .is_some();
    if clash {
        return Err(Error::Config {
            message: format!("Category '{}' already exists", name.trim()),
        });
    }

    category::ActiveModel {
        name: Set(name.trim().to_string()),
        slug: Set(slug.trim().to_string()),
        color: Set(color),
        featured: Set(featured),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// All categories, ordered alphabetically by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>> {
    Category::find()
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Categories surfaced on the landing page.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn featured_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>> {
    Category::find()
        .filter(category::Column::Featured.eq(true))
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a category by its URL slug.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_category_by_slug(
    db: &DatabaseConnection,
    slug: &str,
) -> Result<Option<category::Model>> {
    Category::find()
        .filter(category::Column::Slug.eq(slug))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists a new outfit on the storefront, bound to its creator as designer.
///
/// # Errors
/// Returns `Forbidden` if the caller is not the seller, or a validation
/// error for an empty name or negative price.
pub async fn create_outfit(
    db: &DatabaseConnection,
    creator: &profile::Model,
    draft: OutfitDraft,
) -> Result<outfit::Model> {
    if !policy::can_create_outfit(creator) {
        return Err(Error::Forbidden {
            profile_id: creator.id,
            entity: "the catalog".to_string(),
        });
    }
    validate_draft(&draft)?;

    let now = chrono::Utc::now();
    let created = outfit::ActiveModel {
        name: Set(draft.name.trim().to_string()),
        description: Set(draft.description),
        price: Set(draft.price),
        category_id: Set(draft.category_id),
        designer_id: Set(Some(creator.id)),
        is_active: Set(true),
        brand: Set(draft.brand),
        color: Set(draft.color),
        size: Set(draft.size),
        material: Set(draft.material),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(
        "Profile {} listed outfit {} ('{}')",
        creator.id, created.id, created.name
    );
    Ok(created)
}

/// Edits an existing outfit.
///
/// # Errors
/// Returns `NotFound` if the outfit does not exist, `Forbidden` if the
/// caller may not manage it, or a validation error for the draft fields.
pub async fn update_outfit(
    db: &DatabaseConnection,
    caller: &profile::Model,
    outfit_id: i64,
    draft: OutfitDraft,
) -> Result<outfit::Model> {
    let existing = Outfit::find_by_id(outfit_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "outfit",
            id: outfit_id,
        })?;

    if !policy::can_manage(caller, &existing) {
        return Err(Error::Forbidden {
            profile_id: caller.id,
            entity: format!("outfit {outfit_id}"),
        });
    }
    validate_draft(&draft)?;

    let mut active: outfit::ActiveModel = existing.into();
    active.name = Set(draft.name.trim().to_string());
    active.description = Set(draft.description);
    active.price = Set(draft.price);
    active.category_id = Set(draft.category_id);
    active.brand = Set(draft.brand);
    active.color = Set(draft.color);
    active.size = Set(draft.size);
    active.material = Set(draft.material);
    active.updated_at = Set(chrono::Utc::now());
    active.update(db).await.map_err(Into::into)
}

/// Takes an outfit off the storefront without deleting its history.
///
/// # Errors
/// Returns `NotFound` if the outfit does not exist or `Forbidden` if the
/// caller may not manage it.
pub async fn deactivate_outfit(
    db: &DatabaseConnection,
    caller: &profile::Model,
    outfit_id: i64,
) -> Result<outfit::Model> {
    let existing = Outfit::find_by_id(outfit_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "outfit",
            id: outfit_id,
        })?;

    if !policy::can_manage(caller, &existing) {
        return Err(Error::Forbidden {
            profile_id: caller.id,
            entity: format!("outfit {outfit_id}"),
        });
    }

    let mut active: outfit::ActiveModel = existing.into();
    active.is_active = Set(false);
    active.updated_at = Set(chrono::Utc::now());
    let updated = active.update(db).await?;
    info!("Outfit {} deactivated by profile {}", outfit_id, caller.id);
    Ok(updated)
}

/// Fetches an active outfit for storefront display.
///
/// Inactive and unknown outfits both come back as `None`.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_outfit(db: &DatabaseConnection, outfit_id: i64) -> Result<Option<outfit::Model>> {
    Outfit::find_by_id(outfit_id)
        .filter(outfit::Column::IsActive.eq(true))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Active outfits in the given order, optionally restricted to one category.
///
/// # Errors
/// Returns an error if a database query fails.
pub async fn list_outfits(
    db: &DatabaseConnection,
    category_id: Option<i64>,
    sort: OutfitSort,
) -> Result<Vec<outfit::Model>> {
    let mut query = Outfit::find().filter(outfit::Column::IsActive.eq(true));
    if let Some(category_id) = category_id {
        query = query.filter(outfit::Column::CategoryId.eq(category_id));
    }

    match sort {
        OutfitSort::Newest => query
            .order_by_desc(outfit::Column::CreatedAt)
            .order_by_desc(outfit::Column::Id)
            .all(db)
            .await
            .map_err(Into::into),
        OutfitSort::PriceLowToHigh => query
            .order_by_asc(outfit::Column::Price)
            .all(db)
            .await
            .map_err(Into::into),
        OutfitSort::PriceHighToLow => query
            .order_by_desc(outfit::Column::Price)
            .all(db)
            .await
            .map_err(Into::into),
        OutfitSort::Popular => {
            // The catalog is small; count order lines in memory rather than
            // building an aggregated join.
            let outfits = query.all(db).await?;
            let lines = OrderItem::find().all(db).await?;
            let mut ordered_counts: HashMap<i64, usize> = HashMap::new();
            for line in lines {
                if let Some(outfit_id) = line.outfit_id {
                    *ordered_counts.entry(outfit_id).or_default() +=
                        usize::try_from(line.quantity.max(0)).unwrap_or(0);
                }
            }
            let mut outfits = outfits;
            outfits.sort_by(|a, b| {
                let count_a = ordered_counts.get(&a.id).copied().unwrap_or(0);
                let count_b = ordered_counts.get(&b.id).copied().unwrap_or(0);
                count_b.cmp(&count_a).then(b.id.cmp(&a.id))
            });
            Ok(outfits)
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::{cart, order};
    use crate::test_utils::{
        create_seller_profile, create_test_outfit, create_test_profile, dec, setup_test_db,
    };

    fn draft(name: &str, price: &str) -> OutfitDraft {
        OutfitDraft {
            name: name.to_string(),
            price: dec(price),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_category_and_lookup() -> Result<()> {
        let db = setup_test_db().await?;

        let created = create_category(
            &db,
            "Evening Wear".to_string(),
            "evening-wear".to_string(),
            "purple".to_string(),
            true,
        )
        .await?;

        let by_slug = get_category_by_slug(&db, "evening-wear").await?.unwrap();
        assert_eq!(by_slug.id, created.id);

        let featured = featured_categories(&db).await?;
        assert_eq!(featured.len(), 1);

        // Duplicate name is rejected
        let result = create_category(
            &db,
            "Evening Wear".to_string(),
            "other-slug".to_string(),
            "blue".to_string(),
            false,
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_outfit_requires_seller() -> Result<()> {
        let db = setup_test_db().await?;
        let shopper = create_test_profile(&db, "shopper").await?;
        let seller = create_seller_profile(&db, "designer").await?;

        let result = create_outfit(&db, &shopper, draft("Gown", "10.00")).await;
        assert!(matches!(result.unwrap_err(), Error::Forbidden { .. }));

        let created = create_outfit(&db, &seller, draft("Gown", "10.00")).await?;
        assert_eq!(created.designer_id, Some(seller.id));
        assert!(created.is_active);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_outfit_validation() -> Result<()> {
        let db = setup_test_db().await?;
        let seller = create_seller_profile(&db, "designer").await?;

        let result = create_outfit(&db, &seller, draft("  ", "10.00")).await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        let result = create_outfit(&db, &seller, draft("Gown", "-0.01")).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidPrice { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_outfit_policy_and_fields() -> Result<()> {
        let db = setup_test_db().await?;
        let seller = create_seller_profile(&db, "designer").await?;
        let shopper = create_test_profile(&db, "shopper").await?;
        let outfit = create_outfit(&db, &seller, draft("Gown", "10.00")).await?;

        let result = update_outfit(&db, &shopper, outfit.id, draft("Hijacked", "1.00")).await;
        assert!(matches!(result.unwrap_err(), Error::Forbidden { .. }));

        let updated = update_outfit(&db, &seller, outfit.id, draft("Gown v2", "12.50")).await?;
        assert_eq!(updated.name, "Gown v2");
        assert_eq!(updated.price, dec("12.50"));

        let result = update_outfit(&db, &seller, 999, draft("Ghost", "1.00")).await;
        assert!(matches!(result.unwrap_err(), Error::NotFound { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_deactivate_hides_from_storefront() -> Result<()> {
        let db = setup_test_db().await?;
        let seller = create_seller_profile(&db, "designer").await?;
        let outfit = create_outfit(&db, &seller, draft("Gown", "10.00")).await?;

        assert!(get_outfit(&db, outfit.id).await?.is_some());
        deactivate_outfit(&db, &seller, outfit.id).await?;
        assert!(get_outfit(&db, outfit.id).await?.is_none());
        assert!(list_outfits(&db, None, OutfitSort::Newest).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_list_outfits_price_sorts() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_outfit(&db, "Mid", "20.00").await?;
        create_test_outfit(&db, "Cheap", "5.00").await?;
        create_test_outfit(&db, "Dear", "80.00").await?;

        let ascending = list_outfits(&db, None, OutfitSort::PriceLowToHigh).await?;
        let names: Vec<&str> = ascending.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["Cheap", "Mid", "Dear"]);

        let descending = list_outfits(&db, None, OutfitSort::PriceHighToLow).await?;
        let names: Vec<&str> = descending.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["Dear", "Mid", "Cheap"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_outfits_popular_sort() -> Result<()> {
        let db = setup_test_db().await?;
        let shopper = create_test_profile(&db, "shopper").await?;
        let quiet = create_test_outfit(&db, "Quiet", "10.00").await?;
        let hot = create_test_outfit(&db, "Hot", "10.00").await?;

        // Three units of one outfit ordered, none of the other
        cart::add_item(&db, shopper.id, hot.id, 3).await?;
        order::checkout(&db, shopper.id).await?;

        let popular = list_outfits(&db, None, OutfitSort::Popular).await?;
        assert_eq!(popular[0].id, hot.id);
        assert_eq!(popular[1].id, quiet.id);

        Ok(())
    }
}
