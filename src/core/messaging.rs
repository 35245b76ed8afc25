//! Messaging business logic - Directed mail and notifications.
//!
//! Both mailboxes are polled list views; nothing here pushes in real time.
//! [`notify`] is generic over the connection so other operations (checkout
//! in particular) can write a notification inside their own transaction.

use crate::{
    entities::{Message, Notification, Profile, message, notification},
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, QueryOrder, Set, prelude::*};
use tracing::info;

/// Sends a message from one profile to another.
///
/// # Errors
/// Returns `NotFound` if the receiver does not exist and a validation error
/// for an empty body.
pub async fn send_message(
    db: &DatabaseConnection,
    sender_id: i64,
    receiver_id: i64,
    subject: String,
    body: String,
) -> Result<message::Model> {
    if body.trim().is_empty() {
        return Err(Error::Config {
            message: "Message body cannot be empty".to_string(),
        });
    }

    Profile::find_by_id(receiver_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "profile",
            id: receiver_id,
        })?;

    let sent = message::ActiveModel {
        sender_id: Set(Some(sender_id)),
        receiver_id: Set(Some(receiver_id)),
        subject: Set(subject),
        body: Set(body),
        read: Set(false),
        sent_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(
        "Profile {} sent message {} to profile {}",
        sender_id, sent.id, receiver_id
    );
    Ok(sent)
}

/// Messages received by the profile, newest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn inbox(db: &DatabaseConnection, profile_id: i64) -> Result<Vec<message::Model>> {
    Message::find()
        .filter(message::Column::ReceiverId.eq(profile_id))
        .order_by_desc(message::Column::SentAt)
        .order_by_desc(message::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Marks a received message as read.
///
/// # Errors
/// Returns `NotFound` if the message does not exist and `Forbidden` if the
/// caller is not its receiver.
pub async fn mark_message_read(
    db: &DatabaseConnection,
    profile_id: i64,
    message_id: i64,
) -> Result<message::Model> {
    let found = Message::find_by_id(message_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "message",
            id: message_id,
        })?;
    if found.receiver_id != Some(profile_id) {
        return Err(Error::Forbidden {
            profile_id,
            entity: format!("message {message_id}"),
        });
    }

    let mut active: message::ActiveModel = found.into();
    active.read = Set(true);
    active.update(db).await.map_err(Into::into)
}

/// Writes a notification into a profile's mailbox.
///
/// Generic over the connection so callers can notify inside their own
/// transaction.
///
/// # Errors
/// Returns an error if the insert fails.
pub async fn notify<C>(conn: &C, profile_id: i64, text: String) -> Result<notification::Model>
where
    C: ConnectionTrait,
{
    notification::ActiveModel {
        profile_id: Set(profile_id),
        message: Set(text),
        read: Set(false),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(Into::into)
}

/// The profile's notifications, newest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn notifications(
    db: &DatabaseConnection,
    profile_id: i64,
) -> Result<Vec<notification::Model>> {
    Notification::find()
        .filter(notification::Column::ProfileId.eq(profile_id))
        .order_by_desc(notification::Column::CreatedAt)
        .order_by_desc(notification::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Marks one of the profile's notifications as read.
///
/// # Errors
/// Returns `NotFound` if the notification does not exist and `Forbidden`
/// if it belongs to another profile.
pub async fn mark_notification_read(
    db: &DatabaseConnection,
    profile_id: i64,
    notification_id: i64,
) -> Result<notification::Model> {
    let found = Notification::find_by_id(notification_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "notification",
            id: notification_id,
        })?;
    if found.profile_id != profile_id {
        return Err(Error::Forbidden {
            profile_id,
            entity: format!("notification {notification_id}"),
        });
    }

    let mut active: notification::ActiveModel = found.into();
    active.read = Set(true);
    active.update(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{create_test_profile, setup_test_db};

    #[tokio::test]
    async fn test_send_message_validation() -> Result<()> {
        let db = setup_test_db().await?;
        let sender = create_test_profile(&db, "sender").await?;
        let receiver = create_test_profile(&db, "receiver").await?;

        let result = send_message(
            &db,
            sender.id,
            receiver.id,
            "Hi".to_string(),
            "   ".to_string(),
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        let result = send_message(
            &db,
            sender.id,
            999,
            String::new(),
            "Hello".to_string(),
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NotFound { entity: "profile", id: 999 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_inbox_receives_newest_first() -> Result<()> {
        let db = setup_test_db().await?;
        let sender = create_test_profile(&db, "sender").await?;
        let receiver = create_test_profile(&db, "receiver").await?;

        let first = send_message(
            &db,
            sender.id,
            receiver.id,
            "First".to_string(),
            "body".to_string(),
        )
        .await?;
        let second = send_message(
            &db,
            sender.id,
            receiver.id,
            "Second".to_string(),
            "body".to_string(),
        )
        .await?;

        let inbox_items = inbox(&db, receiver.id).await?;
        assert_eq!(inbox_items.len(), 2);
        assert_eq!(inbox_items[0].id, second.id);
        assert_eq!(inbox_items[1].id, first.id);

        // The sender's inbox is unaffected
        assert!(inbox(&db, sender.id).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_mark_message_read_receiver_only() -> Result<()> {
        let db = setup_test_db().await?;
        let sender = create_test_profile(&db, "sender").await?;
        let receiver = create_test_profile(&db, "receiver").await?;
        let sent = send_message(
            &db,
            sender.id,
            receiver.id,
            String::new(),
            "body".to_string(),
        )
        .await?;
        assert!(!sent.read);

        let result = mark_message_read(&db, sender.id, sent.id).await;
        assert!(matches!(result.unwrap_err(), Error::Forbidden { .. }));

        let marked = mark_message_read(&db, receiver.id, sent.id).await?;
        assert!(marked.read);

        Ok(())
    }

    #[tokio::test]
    async fn test_notifications_roundtrip() -> Result<()> {
        let db = setup_test_db().await?;
        let profile = create_test_profile(&db, "shopper").await?;
        let other = create_test_profile(&db, "other").await?;

        notify(&db, profile.id, "Sale starts tomorrow".to_string()).await?;
        let second = notify(&db, profile.id, "Order shipped".to_string()).await?;

        let notes = notifications(&db, profile.id).await?;
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].id, second.id);
        assert!(notifications(&db, other.id).await?.is_empty());

        let result = mark_notification_read(&db, other.id, second.id).await;
        assert!(matches!(result.unwrap_err(), Error::Forbidden { .. }));

        let marked = mark_notification_read(&db, profile.id, second.id).await?;
        assert!(marked.read);

        Ok(())
    }
}
