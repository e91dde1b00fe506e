//! User entity - An account that owns habits and may receive reminders.
//!
//! Accounts are keyed by the Discord user that authenticated the command.
//! The Telegram chat id is the delivery address for reminders; accounts
//! without one are never selected by the reminder sweep.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the account
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Discord user id of the account holder
    #[sea_orm(unique)]
    pub discord_id: String,
    /// Telegram chat id reminders are delivered to, None until registered
    pub tg_chat_id: Option<String>,
    /// Superusers see every habit in listings
    pub is_superuser: bool,
    /// When the account was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user owns many habits
    #[sea_orm(has_many = "super::habit::Entity")]
    Habits,
}

impl Related<super::habit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Habits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
