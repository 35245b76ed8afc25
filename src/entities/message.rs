//! Message entity - Directed mail between two profiles.
//!
//! Both endpoints are nullable so conversations survive account removal.
//! No `Related` impl to `profile` is defined because the sender and receiver
//! links would be ambiguous; the messaging logic filters on the columns
//! directly.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Message database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    /// Unique identifier for the message
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Sending profile
    pub sender_id: Option<i64>,
    /// Receiving profile
    pub receiver_id: Option<i64>,
    /// Subject line, may be empty
    pub subject: String,
    /// Message body
    pub body: String,
    /// Whether the receiver has seen it
    pub read: bool,
    /// When it was sent
    pub sent_at: DateTimeUtc,
}

/// Defines relationships between Message and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The profile that sent this message
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::SenderId",
        to = "super::profile::Column::Id"
    )]
    Sender,
    /// The profile this message was sent to
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::ReceiverId",
        to = "super::profile::Column::Id"
    )]
    Receiver,
}

impl ActiveModelBehavior for ActiveModel {}
