//! Habit entity - A tracked recurring action.
//!
//! Each habit has a time of day, a repetition frequency in days, and the
//! computed instant of its next reminder. A habit may point at a pleasant
//! habit of the same table as its reward (`linked_habit_id`).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Habit database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "habits")]
pub struct Model {
    /// Unique identifier for the habit
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Account that created the habit
    pub owner_id: Option<i64>,
    /// Where the action happens (e.g., "at home")
    pub place: Option<String>,
    /// Time of day the action happens, in the process timezone
    pub time: chrono::NaiveTime,
    /// What to do (e.g., "drink a glass of water")
    pub action: Option<String>,
    /// Pleasant habits act as rewards for good habits
    pub is_pleasant: bool,
    /// Pleasant habit performed as the reward for this one
    pub linked_habit_id: Option<i64>,
    /// Beneficial habit
    pub is_good: bool,
    /// Days between occurrences, 1 to 7
    pub frequency: i32,
    /// Free-text reward, mutually exclusive with `linked_habit_id`
    pub reward: Option<String>,
    /// How long the action takes, in seconds (1 to 120)
    pub continuation_time: i32,
    /// Visible in the public habit listing
    pub is_public: bool,
    /// When the habit was created
    pub created_at: DateTimeUtc,
    /// When the habit was last modified
    pub updated_at: DateTimeUtc,
    /// Next instant a reminder is due
    pub next_reminder: Option<DateTimeUtc>,
}

/// Defines relationships between Habit and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each habit belongs to one user; deleting the user deletes the habit
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Owner,
    /// Optional reward habit; deleting it clears the link
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::LinkedHabitId",
        to = "Column::Id",
        on_delete = "SetNull"
    )]
    LinkedHabit,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
