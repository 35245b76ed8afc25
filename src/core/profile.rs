//! Profile business logic - Account profiles and the seller flag.
//!
//! Registration creates the profile record explicitly and synchronously, so
//! an account never exists without one. The seller flag is a storefront-wide
//! singleton: assigning it to a profile atomically clears it from any other.

use crate::{
    entities::{Profile, profile},
    errors::{Error, Result},
};
use sea_orm::sea_query::Expr;
use sea_orm::{Set, TransactionTrait, prelude::*};
use tracing::info;

/// Creates the profile record for a freshly registered account.
///
/// Runs in its own transaction so registration either produces a complete
/// profile or nothing. New profiles never carry the seller flag.
///
/// # Errors
/// Returns an error if the username is empty or already taken, or if the
/// insert fails.
pub async fn register_profile(
    db: &DatabaseConnection,
    username: String,
    bio: String,
    phone: String,
) -> Result<profile::Model> {
    let username = username.trim().to_string();
    if username.is_empty() {
        return Err(Error::Config {
            message: "Username cannot be empty".to_string(),
        });
    }

    let txn = db.begin().await?;

    let taken = Profile::find()
        .filter(profile::Column::Username.eq(&username))
        .one(&txn)
        .await?
        .is_some();
    if taken {
        return Err(Error::Config {
            message: format!("Username '{username}' is already taken"),
        });
    }

    let created = profile::ActiveModel {
        username: Set(username),
        bio: Set(bio),
        phone: Set(phone),
        is_seller: Set(false),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    info!("Registered profile {} ('{}')", created.id, created.username);
    Ok(created)
}

/// Finds a profile by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_profile_by_id(
    db: &DatabaseConnection,
    profile_id: i64,
) -> Result<Option<profile::Model>> {
    Profile::find_by_id(profile_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a profile by its username.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_profile_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<profile::Model>> {
    Profile::find()
        .filter(profile::Column::Username.eq(username))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Updates the free-text fields of a profile.
///
/// # Errors
/// Returns `NotFound` if the profile does not exist.
pub async fn update_profile(
    db: &DatabaseConnection,
    profile_id: i64,
    bio: String,
    phone: String,
) -> Result<profile::Model> {
    let existing = Profile::find_by_id(profile_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "profile",
            id: profile_id,
        })?;

    let mut active: profile::ActiveModel = existing.into();
    active.bio = Set(bio);
    active.phone = Set(phone);
    active.update(db).await.map_err(Into::into)
}

/// Makes `profile_id` the storefront's seller.
///
/// Inside one transaction the flag is cleared from every other profile and
/// set on the target, so at most one profile ever carries it.
///
/// # Errors
/// Returns `NotFound` if the target profile does not exist.
pub async fn assign_seller(db: &DatabaseConnection, profile_id: i64) -> Result<profile::Model> {
    let txn = db.begin().await?;

    Profile::find_by_id(profile_id)
        .one(&txn)
        .await?
        .ok_or(Error::NotFound {
            entity: "profile",
            id: profile_id,
        })?;

    // Clear the flag wherever it currently sits, then set it on the target.
    Profile::update_many()
        .col_expr(profile::Column::IsSeller, Expr::value(false))
        .filter(profile::Column::IsSeller.eq(true))
        .filter(profile::Column::Id.ne(profile_id))
        .exec(&txn)
        .await?;

    Profile::update_many()
        .col_expr(profile::Column::IsSeller, Expr::value(true))
        .filter(profile::Column::Id.eq(profile_id))
        .exec(&txn)
        .await?;

    let updated = Profile::find_by_id(profile_id)
        .one(&txn)
        .await?
        .ok_or(Error::NotFound {
            entity: "profile",
            id: profile_id,
        })?;

    txn.commit().await?;
    info!("Profile {} is now the seller", profile_id);
    Ok(updated)
}

/// The profile currently carrying the seller flag, if any.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn current_seller(db: &DatabaseConnection) -> Result<Option<profile::Model>> {
    Profile::find()
        .filter(profile::Column::IsSeller.eq(true))
        .one(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_register_profile_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result =
            register_profile(&db, String::new(), String::new(), String::new()).await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        let result =
            register_profile(&db, "   ".to_string(), String::new(), String::new()).await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_profile_and_lookup() -> Result<()> {
        let db = setup_test_db().await?;

        let created = register_profile(
            &db,
            "amina".to_string(),
            "Loves bold prints".to_string(),
            "0712000001".to_string(),
        )
        .await?;
        assert!(!created.is_seller);

        let by_id = get_profile_by_id(&db, created.id).await?.unwrap();
        assert_eq!(by_id, created);

        let by_name = get_profile_by_username(&db, "amina").await?.unwrap();
        assert_eq!(by_name.id, created.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_register_profile_duplicate_username() -> Result<()> {
        let db = setup_test_db().await?;

        register_profile(&db, "amina".to_string(), String::new(), String::new()).await?;
        let result =
            register_profile(&db, "amina".to_string(), String::new(), String::new()).await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_profile() -> Result<()> {
        let db = setup_test_db().await?;
        let created =
            register_profile(&db, "amina".to_string(), String::new(), String::new()).await?;

        let updated = update_profile(
            &db,
            created.id,
            "New bio".to_string(),
            "0712000002".to_string(),
        )
        .await?;
        assert_eq!(updated.bio, "New bio");
        assert_eq!(updated.phone, "0712000002");

        let result = update_profile(&db, 999, String::new(), String::new()).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NotFound { entity: "profile", id: 999 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_assign_seller_moves_flag_atomically() -> Result<()> {
        let db = setup_test_db().await?;
        let first =
            register_profile(&db, "amina".to_string(), String::new(), String::new()).await?;
        let second =
            register_profile(&db, "wanjiru".to_string(), String::new(), String::new()).await?;

        assert!(current_seller(&db).await?.is_none());

        let flagged = assign_seller(&db, first.id).await?;
        assert!(flagged.is_seller);
        assert_eq!(current_seller(&db).await?.unwrap().id, first.id);

        // Reassigning clears the previous holder in the same step
        assign_seller(&db, second.id).await?;
        let seller = current_seller(&db).await?.unwrap();
        assert_eq!(seller.id, second.id);

        let first_after = get_profile_by_id(&db, first.id).await?.unwrap();
        assert!(!first_after.is_seller);

        let sellers = Profile::find()
            .filter(profile::Column::IsSeller.eq(true))
            .all(&db)
            .await?;
        assert_eq!(sellers.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_assign_seller_unknown_profile() -> Result<()> {
        let db = setup_test_db().await?;
        let result = assign_seller(&db, 42).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NotFound { entity: "profile", id: 42 }
        ));
        Ok(())
    }
}
