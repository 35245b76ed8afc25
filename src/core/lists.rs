//! Wishlist and compare business logic - Per-profile outfit sets.
//!
//! Membership is a toggle: adding an outfit that is already present removes
//! it instead of duplicating. The compare list is additionally capped, and
//! the cap is re-checked inside the same transaction as the insert so two
//! overlapping adds cannot both slip under it.

use crate::{
    entities::{CompareItem, Outfit, WishlistItem, compare_item, outfit, wishlist_item},
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, PaginatorTrait, QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::info;

/// Maximum number of outfits a profile may hold on its compare list.
pub const COMPARE_LIMIT: u64 = 4;

/// Which membership set a toggle targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKind {
    /// Unbounded per-profile favorites
    Wishlist,
    /// Capped side-by-side comparison set
    Compare,
}

/// What a toggle did, and how many rows the list now holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// True if the outfit was added, false if an existing row was removed
    pub added: bool,
    /// Row count for this profile's list after the toggle
    pub count: u64,
}

async fn ensure_outfit_exists<C>(conn: &C, outfit_id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    let exists = Outfit::find_by_id(outfit_id).one(conn).await?.is_some();
    if exists {
        Ok(())
    } else {
        Err(Error::NotFound {
            entity: "outfit",
            id: outfit_id,
        })
    }
}

/// Flips an outfit's membership in one of the profile's lists.
///
/// Toggling twice with no interference returns the list to its original
/// state. For the compare list, an add beyond [`COMPARE_LIMIT`] fails with
/// `CompareListFull` and mutates nothing.
///
/// # Errors
/// Returns `NotFound` if the outfit does not exist and `CompareListFull`
/// when a compare add would exceed the cap.
pub async fn toggle(
    db: &DatabaseConnection,
    profile_id: i64,
    outfit_id: i64,
    kind: ListKind,
) -> Result<ToggleOutcome> {
    let txn = db.begin().await?;
    ensure_outfit_exists(&txn, outfit_id).await?;

    let outcome = match kind {
        ListKind::Wishlist => {
            let existing = WishlistItem::find()
                .filter(wishlist_item::Column::ProfileId.eq(profile_id))
                .filter(wishlist_item::Column::OutfitId.eq(outfit_id))
                .one(&txn)
                .await?;

            let added = if let Some(existing) = existing {
                existing.delete(&txn).await?;
                false
            } else {
                wishlist_item::ActiveModel {
                    profile_id: Set(profile_id),
                    outfit_id: Set(outfit_id),
                    added_at: Set(chrono::Utc::now()),
                    ..Default::default()
                }
                .insert(&txn)
                .await?;
                true
            };

            let count = WishlistItem::find()
                .filter(wishlist_item::Column::ProfileId.eq(profile_id))
                .count(&txn)
                .await?;
            ToggleOutcome { added, count }
        }
        ListKind::Compare => {
            let existing = CompareItem::find()
                .filter(compare_item::Column::ProfileId.eq(profile_id))
                .filter(compare_item::Column::OutfitId.eq(outfit_id))
                .one(&txn)
                .await?;

            let added = if let Some(existing) = existing {
                existing.delete(&txn).await?;
                false
            } else {
                // Re-check the cap in the same transaction as the insert
                let current = CompareItem::find()
                    .filter(compare_item::Column::ProfileId.eq(profile_id))
                    .count(&txn)
                    .await?;
                if current >= COMPARE_LIMIT {
                    return Err(Error::CompareListFull { count: current });
                }

                compare_item::ActiveModel {
                    profile_id: Set(profile_id),
                    outfit_id: Set(outfit_id),
                    added_at: Set(chrono::Utc::now()),
                    ..Default::default()
                }
                .insert(&txn)
                .await?;
                true
            };

            let count = CompareItem::find()
                .filter(compare_item::Column::ProfileId.eq(profile_id))
                .count(&txn)
                .await?;
            ToggleOutcome { added, count }
        }
    };

    txn.commit().await?;
    info!(
        "Profile {} toggled outfit {} on {:?}: added={}, count={}",
        profile_id, outfit_id, kind, outcome.added, outcome.count
    );
    Ok(outcome)
}

/// The profile's wishlisted outfits, most recently added first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn wishlist_outfits(
    db: &DatabaseConnection,
    profile_id: i64,
) -> Result<Vec<(wishlist_item::Model, outfit::Model)>> {
    let rows = WishlistItem::find()
        .filter(wishlist_item::Column::ProfileId.eq(profile_id))
        .order_by_desc(wishlist_item::Column::AddedAt)
        .order_by_desc(wishlist_item::Column::Id)
        .find_also_related(Outfit)
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .filter_map(|(item, outfit)| outfit.map(|o| (item, o)))
        .collect())
}

/// The profile's compare-list outfits, most recently added first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn compare_outfits(
    db: &DatabaseConnection,
    profile_id: i64,
) -> Result<Vec<(compare_item::Model, outfit::Model)>> {
    let rows = CompareItem::find()
        .filter(compare_item::Column::ProfileId.eq(profile_id))
        .order_by_desc(compare_item::Column::AddedAt)
        .order_by_desc(compare_item::Column::Id)
        .find_also_related(Outfit)
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .filter_map(|(item, outfit)| outfit.map(|o| (item, o)))
        .collect())
}
