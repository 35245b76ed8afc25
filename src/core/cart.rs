//! Cart business logic - The mutable pre-purchase ledger.
//!
//! Each profile holds at most one cart row per outfit; repeat adds bump the
//! quantity. Quantity changes use atomic column updates
//! (`quantity = quantity + 1`) instead of read-modify-write, so overlapping
//! requests from the same profile cannot lose updates. Totals are always
//! computed on read from the current catalog prices; only checkout freezes
//! them.

use crate::{
    entities::{CartItem, Outfit, cart_item, outfit},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{ConnectionTrait, QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{debug, info};

/// One cart row joined with its outfit, priced at view time.
#[derive(Debug, Clone)]
pub struct CartLine {
    /// The stored cart row
    pub item: cart_item::Model,
    /// The outfit it refers to
    pub outfit: outfit::Model,
    /// Current price x quantity
    pub subtotal: Decimal,
}

/// A profile's full cart with its grand total.
#[derive(Debug, Clone)]
pub struct CartView {
    /// All cart lines, oldest first
    pub lines: Vec<CartLine>,
    /// Sum of the line subtotals
    pub total: Decimal,
}

impl CartView {
    /// The grand total as a two-decimal string for display.
    #[must_use]
    pub fn total_display(&self) -> String {
        format_amount(self.total)
    }
}

/// The result of changing one cart row's quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartUpdate {
    /// New quantity; 0 means the row was deleted
    pub quantity: i32,
    /// Current price x new quantity for this line
    pub subtotal: Decimal,
    /// Recomputed total across the whole cart
    pub cart_total: Decimal,
}

/// Formats a monetary amount with two decimal places for the view layer.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    format!("{amount:.2}")
}

async fn fetch_active_outfit<C>(conn: &C, outfit_id: i64) -> Result<outfit::Model>
where
    C: ConnectionTrait,
{
    let found = Outfit::find_by_id(outfit_id)
        .filter(outfit::Column::IsActive.eq(true))
        .one(conn)
        .await?;
    found.ok_or(Error::NotFound {
        entity: "outfit",
        id: outfit_id,
    })
}

async fn fetch_owned_item<C>(
    conn: &C,
    profile_id: i64,
    item_id: i64,
) -> Result<cart_item::Model>
where
    C: ConnectionTrait,
{
    let item = CartItem::find_by_id(item_id)
        .one(conn)
        .await?
        .ok_or(Error::NotFound {
            entity: "cart item",
            id: item_id,
        })?;
    if item.profile_id != profile_id {
        return Err(Error::Forbidden {
            profile_id,
            entity: format!("cart item {item_id}"),
        });
    }
    Ok(item)
}

/// Sums the profile's cart at current catalog prices.
///
/// Rows whose outfit has been removed from the catalog entirely are ignored
/// rather than failing the whole view.
async fn compute_cart_total<C>(conn: &C, profile_id: i64) -> Result<Decimal>
where
    C: ConnectionTrait,
{
    let rows = CartItem::find()
        .filter(cart_item::Column::ProfileId.eq(profile_id))
        .find_also_related(Outfit)
        .all(conn)
        .await?;

    let mut total = Decimal::ZERO;
    for (item, outfit) in rows {
        if let Some(outfit) = outfit {
            total += outfit.price * Decimal::from(item.quantity);
        }
    }
    Ok(total)
}

/// Puts `quantity` units of an outfit into the profile's cart.
///
/// If the profile already has a row for this outfit its quantity is bumped
/// atomically; otherwise a new row is created. Both paths run inside one
/// transaction so the one-row-per-outfit rule holds.
///
/// # Errors
/// Returns `InvalidQuantity` for a quantity below 1 and `NotFound` if the
/// outfit does not exist or is inactive.
pub async fn add_item(
    db: &DatabaseConnection,
    profile_id: i64,
    outfit_id: i64,
    quantity: i32,
) -> Result<cart_item::Model> {
    if quantity < 1 {
        return Err(Error::InvalidQuantity { quantity });
    }

    let txn = db.begin().await?;
    let outfit = fetch_active_outfit(&txn, outfit_id).await?;

    let existing = CartItem::find()
        .filter(cart_item::Column::ProfileId.eq(profile_id))
        .filter(cart_item::Column::OutfitId.eq(outfit_id))
        .one(&txn)
        .await?;

    let row = if let Some(existing) = existing {
        CartItem::update_many()
            .col_expr(
                cart_item::Column::Quantity,
                Expr::col(cart_item::Column::Quantity).add(quantity),
            )
            .filter(cart_item::Column::Id.eq(existing.id))
            .exec(&txn)
            .await?;
        CartItem::find_by_id(existing.id)
            .one(&txn)
            .await?
            .ok_or(Error::NotFound {
                entity: "cart item",
                id: existing.id,
            })?
    } else {
        cart_item::ActiveModel {
            profile_id: Set(profile_id),
            outfit_id: Set(outfit_id),
            quantity: Set(quantity),
            added_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?
    };

    txn.commit().await?;
    info!(
        "Profile {} carted {}x outfit {} ('{}'), row quantity now {}",
        profile_id, quantity, outfit_id, outfit.name, row.quantity
    );
    Ok(row)
}

/// Adds one unit to a cart row.
///
/// # Errors
/// Returns `NotFound` if the row does not exist and `Forbidden` if it
/// belongs to another profile.
pub async fn increment(
    db: &DatabaseConnection,
    profile_id: i64,
    item_id: i64,
) -> Result<CartUpdate> {
    let txn = db.begin().await?;
    let item = fetch_owned_item(&txn, profile_id, item_id).await?;

    CartItem::update_many()
        .col_expr(
            cart_item::Column::Quantity,
            Expr::col(cart_item::Column::Quantity).add(1),
        )
        .filter(cart_item::Column::Id.eq(item.id))
        .exec(&txn)
        .await?;

    let updated = CartItem::find_by_id(item.id)
        .one(&txn)
        .await?
        .ok_or(Error::NotFound {
            entity: "cart item",
            id: item.id,
        })?;
    let outfit = Outfit::find_by_id(updated.outfit_id)
        .one(&txn)
        .await?
        .ok_or(Error::NotFound {
            entity: "outfit",
            id: updated.outfit_id,
        })?;

    let subtotal = outfit.price * Decimal::from(updated.quantity);
    let cart_total = compute_cart_total(&txn, profile_id).await?;
    txn.commit().await?;

    Ok(CartUpdate {
        quantity: updated.quantity,
        subtotal,
        cart_total,
    })
}

/// Removes one unit from a cart row, deleting the row at quantity 1.
///
/// A stored quantity of zero is not representable; reaching it deletes the
/// row instead.
///
/// # Errors
/// Returns `NotFound` if the row does not exist and `Forbidden` if it
/// belongs to another profile.
pub async fn decrement(
    db: &DatabaseConnection,
    profile_id: i64,
    item_id: i64,
) -> Result<CartUpdate> {
    let txn = db.begin().await?;
    let item = fetch_owned_item(&txn, profile_id, item_id).await?;

    let update = if item.quantity > 1 {
        CartItem::update_many()
            .col_expr(
                cart_item::Column::Quantity,
                Expr::col(cart_item::Column::Quantity).sub(1),
            )
            .filter(cart_item::Column::Id.eq(item.id))
            .exec(&txn)
            .await?;

        let updated = CartItem::find_by_id(item.id)
            .one(&txn)
            .await?
            .ok_or(Error::NotFound {
                entity: "cart item",
                id: item.id,
            })?;
        let outfit = Outfit::find_by_id(updated.outfit_id)
            .one(&txn)
            .await?
            .ok_or(Error::NotFound {
                entity: "outfit",
                id: updated.outfit_id,
            })?;

        CartUpdate {
            quantity: updated.quantity,
            subtotal: outfit.price * Decimal::from(updated.quantity),
            cart_total: compute_cart_total(&txn, profile_id).await?,
        }
    } else {
        item.delete(&txn).await?;
        debug!(
            "Cart item {} reached quantity 0 and was deleted for profile {}",
            item_id, profile_id
        );
        CartUpdate {
            quantity: 0,
            subtotal: Decimal::ZERO,
            cart_total: compute_cart_total(&txn, profile_id).await?,
        }
    };

    txn.commit().await?;
    Ok(update)
}

/// Deletes a cart row outright, whatever its quantity.
///
/// # Errors
/// Returns `NotFound` if the row does not exist and `Forbidden` if it
/// belongs to another profile.
pub async fn remove(db: &DatabaseConnection, profile_id: i64, item_id: i64) -> Result<()> {
    let item = fetch_owned_item(db, profile_id, item_id).await?;
    item.delete(db).await?;
    info!("Profile {} removed cart item {}", profile_id, item_id);
    Ok(())
}

/// The profile's cart with per-line subtotals and the grand total.
///
/// Prices are read from the catalog at call time; nothing here is cached or
/// frozen.
///
/// # Errors
/// Returns an error if a database query fails.
pub async fn view_cart(db: &DatabaseConnection, profile_id: i64) -> Result<CartView> {
    let rows = CartItem::find()
        .filter(cart_item::Column::ProfileId.eq(profile_id))
        .order_by_asc(cart_item::Column::AddedAt)
        .order_by_asc(cart_item::Column::Id)
        .find_also_related(Outfit)
        .all(db)
        .await?;

    let mut lines = Vec::with_capacity(rows.len());
    let mut total = Decimal::ZERO;
    for (item, outfit) in rows {
        // A row whose outfit has vanished from the catalog is skipped
        let Some(outfit) = outfit else { continue };
        let subtotal = outfit.price * Decimal::from(item.quantity);
        total += subtotal;
        lines.push(CartLine {
            item,
            outfit,
            subtotal,
        });
    }

    Ok(CartView { lines, total })
}
