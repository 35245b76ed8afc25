//! Order business logic - Converting a cart into a price-frozen order.
//!
//! Checkout is the one multi-row write sequence in the storefront and runs
//! entirely inside a single database transaction: the order row, its items,
//! the cart deletion, and the customer notification all land together or
//! not at all. Item prices are copied from the catalog at that moment and
//! never touched again.

use crate::{
    core::{messaging, policy},
    entities::{CartItem, Order, OrderItem, OrderStatus, Outfit, cart_item, order, order_item},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{info, warn};

/// Payment channel recorded on every order. The storefront stores the
/// choice but never talks to a payment provider.
pub const DEFAULT_PAYMENT_METHOD: &str = "mpesa";

/// Places an order from everything currently in the profile's cart.
///
/// Totals and item prices are taken from the catalog at this moment and
/// frozen into the order. The cart is cleared in the same transaction, so a
/// failure anywhere leaves both the cart and the order store untouched.
///
/// # Errors
/// Returns `EmptyCart` if the profile has no cart rows (no order row is
/// created), `Forbidden` if checkout is not permitted for this profile, or
/// `NotFound` if a carted outfit has vanished from the catalog.
pub async fn checkout(db: &DatabaseConnection, profile_id: i64) -> Result<order::Model> {
    let txn = db.begin().await?;

    let caller = crate::entities::Profile::find_by_id(profile_id)
        .one(&txn)
        .await?
        .ok_or(Error::NotFound {
            entity: "profile",
            id: profile_id,
        })?;
    if !policy::can_checkout(&caller) {
        return Err(Error::Forbidden {
            profile_id,
            entity: "checkout".to_string(),
        });
    }

    let rows = CartItem::find()
        .filter(cart_item::Column::ProfileId.eq(profile_id))
        .find_also_related(Outfit)
        .all(&txn)
        .await?;
    if rows.is_empty() {
        warn!("Profile {} attempted checkout with an empty cart", profile_id);
        return Err(Error::EmptyCart);
    }

    // Resolve every line before writing anything
    let mut lines = Vec::with_capacity(rows.len());
    let mut total_amount = Decimal::ZERO;
    for (item, outfit) in rows {
        let outfit = outfit.ok_or(Error::NotFound {
            entity: "outfit",
            id: item.outfit_id,
        })?;
        total_amount += outfit.price * Decimal::from(item.quantity);
        lines.push((item, outfit));
    }

    let created = order::ActiveModel {
        customer_id: Set(Some(profile_id)),
        status: Set(OrderStatus::Pending),
        total_amount: Set(total_amount),
        payment_method: Set(DEFAULT_PAYMENT_METHOD.to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    for (item, outfit) in &lines {
        order_item::ActiveModel {
            order_id: Set(created.id),
            outfit_id: Set(Some(outfit.id)),
            quantity: Set(item.quantity),
            // Freeze the catalog price into the line
            price: Set(outfit.price),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    CartItem::delete_many()
        .filter(cart_item::Column::ProfileId.eq(profile_id))
        .exec(&txn)
        .await?;

    messaging::notify(
        &txn,
        profile_id,
        format!("Order #{} placed, awaiting payment confirmation", created.id),
    )
    .await?;

    txn.commit().await?;
    info!(
        "Profile {} checked out order {} ({} lines, total {})",
        profile_id,
        created.id,
        lines.len(),
        created.total_amount
    );
    Ok(created)
}

/// One order with its frozen lines, visible to its customer only.
///
/// # Errors
/// Returns `NotFound` if the order does not exist and `Forbidden` if it
/// belongs to another profile.
pub async fn get_order(
    db: &DatabaseConnection,
    profile_id: i64,
    order_id: i64,
) -> Result<(order::Model, Vec<order_item::Model>)> {
    let found = Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "order",
            id: order_id,
        })?;
    if found.customer_id != Some(profile_id) {
        return Err(Error::Forbidden {
            profile_id,
            entity: format!("order {order_id}"),
        });
    }

    let items = OrderItem::find()
        .filter(order_item::Column::OrderId.eq(order_id))
        .order_by_asc(order_item::Column::Id)
        .all(db)
        .await?;
    Ok((found, items))
}

/// The profile's orders, newest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn order_history(
    db: &DatabaseConnection,
    profile_id: i64,
) -> Result<Vec<order::Model>> {
    Order::find()
        .filter(order::Column::CustomerId.eq(profile_id))
        .order_by_desc(order::Column::CreatedAt)
        .order_by_desc(order::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Moves an order along its lifecycle.
///
/// This is an administrative action; the legality table lives on
/// [`OrderStatus::can_transition_to`] and illegal moves change nothing.
///
/// # Errors
/// Returns `NotFound` if the order does not exist and
/// `InvalidStatusTransition` for a move the lifecycle does not allow.
pub async fn transition_status(
    db: &DatabaseConnection,
    order_id: i64,
    next: OrderStatus,
) -> Result<order::Model> {
    let found = Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "order",
            id: order_id,
        })?;

    if !found.status.can_transition_to(next) {
        return Err(Error::InvalidStatusTransition {
            from: found.status,
            to: next,
        });
    }

    let from = found.status;
    let mut active: order::ActiveModel = found.into();
    active.status = Set(next);
    let updated = active.update(db).await?;
    info!("Order {} moved {:?} -> {:?}", order_id, from, next);
    Ok(updated)
}
