//! Shared test utilities for `HabitBuddy`.
//!
//! Helpers for setting up an in-memory database, creating accounts and
//! habits with sensible defaults, and a messenger that records what it sends.

#![allow(clippy::unwrap_used)]

use crate::{
    core::{habit, user, validation::HabitFields},
    entities,
    errors::{Error, Result},
    notify::Messenger,
};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveTime, Utc};
use sea_orm::{DatabaseConnection, Set, prelude::*};
use std::{collections::HashSet, sync::Mutex};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a regular account, optionally with a Telegram chat id.
pub async fn create_test_user(
    db: &DatabaseConnection,
    discord_id: &str,
    chat_id: Option<&str>,
) -> Result<entities::user::Model> {
    let account = user::get_or_create_user(db, discord_id).await?;
    match chat_id {
        Some(_) => user::set_chat_id(db, account, chat_id).await,
        None => Ok(account),
    }
}

/// Creates a superuser account without a chat id.
pub async fn create_superuser(
    db: &DatabaseConnection,
    discord_id: &str,
) -> Result<entities::user::Model> {
    user::ensure_superuser(db, discord_id).await
}

/// Creates a habit for `owner` at [`test_now`].
pub async fn create_test_habit(
    db: &DatabaseConnection,
    owner: &entities::user::Model,
    fields: HabitFields,
) -> Result<entities::habit::Model> {
    habit::create_habit(db, owner, fields, test_now()).await
}

/// Overwrites a habit's `next_reminder`, standing in for an edit or for time
/// passing.
pub async fn set_next_reminder(
    db: &DatabaseConnection,
    habit_id: i64,
    next_reminder: DateTime<Utc>,
) -> Result<()> {
    entities::habit::ActiveModel {
        id: Set(habit_id),
        next_reminder: Set(Some(next_reminder)),
        ..Default::default()
    }
    .update(db)
    .await?;
    Ok(())
}

/// A valid good habit.
///
/// # Defaults
/// * action: "Drink a glass of water"
/// * place: "Home"
/// * time: 18:00, daily
/// * `continuation_time`: 15 seconds
pub fn good_habit() -> HabitFields {
    HabitFields {
        action: Some("Drink a glass of water".to_string()),
        place: Some("Home".to_string()),
        is_good: true,
        continuation_time: 15,
        ..HabitFields::default()
    }
}

/// A valid private pleasant habit at 18:00.
pub fn pleasant_habit() -> HabitFields {
    HabitFields {
        action: Some("Take a bath".to_string()),
        place: Some("Home".to_string()),
        is_pleasant: true,
        continuation_time: 60,
        ..HabitFields::default()
    }
}

/// A good habit whose reward is the habit `linked_id`.
pub fn linked_to(linked_id: i64) -> HabitFields {
    HabitFields {
        linked_habit_id: Some(linked_id),
        ..good_habit()
    }
}

/// An unsaved habit row for pure functions. Good unless `is_pleasant`.
pub fn habit_model(id: i64, is_pleasant: bool) -> entities::habit::Model {
    let created = utc_time("2025-10-24T05:00:00+00:00");
    entities::habit::Model {
        id,
        owner_id: Some(1),
        place: None,
        time: time_of_day(18, 0),
        action: None,
        is_pleasant,
        linked_habit_id: None,
        is_good: !is_pleasant,
        frequency: 1,
        reward: None,
        continuation_time: 60,
        is_public: false,
        created_at: created,
        updated_at: created,
        next_reminder: None,
    }
}

/// Offset used by every test: UTC+7.
pub fn test_zone() -> FixedOffset {
    FixedOffset::east_opt(7 * 3600).unwrap()
}

/// The instant test habits are created at: 2025-10-24 12:00 at UTC+7.
pub fn test_now() -> DateTime<FixedOffset> {
    local_time("2025-10-24T12:00:00+07:00")
}

/// Parses an RFC 3339 timestamp, keeping its offset.
pub fn local_time(rfc3339: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(rfc3339).unwrap()
}

/// Parses an RFC 3339 timestamp as UTC.
pub fn utc_time(rfc3339: &str) -> DateTime<Utc> {
    local_time(rfc3339).with_timezone(&Utc)
}

/// Renders a stored instant in the test zone, e.g. `2025-10-24T17:35:00+07:00`.
pub fn in_test_zone(instant: DateTime<Utc>) -> String {
    instant.with_timezone(&test_zone()).to_rfc3339()
}

/// A time of day with zero seconds.
pub fn time_of_day(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

/// Messenger that keeps every message instead of sending it.
///
/// Chat ids passed to [`RecordingMessenger::failing_for`] are rejected with
/// [`Error::Delivery`].
#[derive(Debug, Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<(String, String)>>,
    failing: HashSet<String>,
}

impl RecordingMessenger {
    /// A messenger that fails for the given chat ids.
    pub fn failing_for(chat_ids: &[&str]) -> Self {
        Self {
            sent: Mutex::default(),
            failing: chat_ids.iter().map(|id| (*id).to_string()).collect(),
        }
    }

    /// `(chat_id, text)` pairs delivered so far, in order.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send(&self, chat_id: &str, text: &str) -> Result<()> {
        if self.failing.contains(chat_id) {
            return Err(Error::Delivery {
                message: format!("chat {chat_id} is unreachable"),
            });
        }
        self.sent
            .lock()
            .unwrap()
            .push((chat_id.to_string(), text.to_string()));
        Ok(())
    }
}
