//! Warning entity - A moderation warning issued to a guild member.
//!
//! Ids are derived from the issuing timestamp rather than generated by the database,
//! so the primary key is a string with auto-increment disabled.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Warning database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "warnings")]
pub struct Model {
    /// Base64 of the issuing millisecond timestamp and issue sequence
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Discord guild the warning belongs to
    pub guild_id: String,
    /// Discord user id of the warned member
    pub user_id: String,
    /// Reason given by the moderator
    pub reason: String,
    /// Discord user id of the issuing moderator
    pub moderator_id: String,
    /// When the warning was issued
    pub created_at: DateTimeUtc,
}

/// Warnings reference no other table
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
