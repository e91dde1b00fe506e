//! Reminder sweep - finds habits whose reminder is due and delivers them.
//!
//! One sweep:
//! 1. selects every habit with `next_reminder <= now + lookahead` whose owner
//!    has a Telegram chat id,
//! 2. sends one reminder per habit,
//! 3. moves each delivered habit's `next_reminder` forward by its frequency.
//!
//! A failed delivery is logged and the habit is left as it was, so it stays
//! overdue and the next sweep tries again. Other habits in the same sweep
//! are not affected.

use crate::{
    config::ReminderSettings,
    core::{message::format_reminder, schedule::advance_by_frequency},
    entities::{Habit, User, habit, user},
    errors::Result,
    notify::Messenger,
};
use chrono::{DateTime, TimeDelta, Utc};
use sea_orm::{QueryOrder, prelude::*, sea_query::Expr};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// A habit selected by a sweep together with its delivery address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueHabit {
    /// The habit as read by the sweep
    pub habit: habit::Model,
    /// Owner's Telegram chat id
    pub chat_id: String,
}

/// What happened to a single due habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Reminder sent and `next_reminder` advanced
    Sent,
    /// Reminder sent, but `next_reminder` had already been changed by
    /// someone else (an edit or another sweep), so it was left alone
    Superseded,
}

/// Counters for one sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepReport {
    /// Upper bound used for the due query (`now + lookahead`)
    pub checked_at: DateTime<Utc>,
    /// Habits selected
    pub due: usize,
    /// Reminders sent and rescheduled
    pub sent: usize,
    /// Reminders sent whose reschedule lost to a concurrent change
    pub skipped: usize,
    /// Deliveries that failed; these habits stay overdue
    pub failed: usize,
}

impl SweepReport {
    /// One-line summary for the log.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Reminder sweep up to {}: {} due, {} sent, {} skipped, {} failed",
            self.checked_at.format("%Y-%m-%d %H:%M:%S UTC"),
            self.due,
            self.sent,
            self.skipped,
            self.failed
        )
    }
}

/// Selects every habit due at or before `check_time` whose owner has a
/// delivery address, earliest first.
pub async fn find_due_habits<C>(db: &C, check_time: DateTime<Utc>) -> Result<Vec<DueHabit>>
where
    C: ConnectionTrait,
{
    let rows = Habit::find()
        .find_also_related(User)
        .filter(habit::Column::NextReminder.lte(check_time))
        .filter(user::Column::TgChatId.is_not_null())
        .order_by_asc(habit::Column::NextReminder)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(habit, owner)| {
            let chat_id = owner?.tg_chat_id?;
            Some(DueHabit { habit, chat_id })
        })
        .collect())
}

/// Moves `habit.next_reminder` forward by `habit.frequency` days.
///
/// The update only applies if the stored value still equals the one in
/// `habit`, so a reminder is never advanced twice for one delivery. Returns
/// whether the row was updated.
pub async fn advance_next_reminder<C>(db: &C, habit: &habit::Model) -> Result<bool>
where
    C: ConnectionTrait,
{
    let Some(current) = habit.next_reminder else {
        return Ok(false);
    };
    let next = advance_by_frequency(current, habit.frequency);

    let result = Habit::update_many()
        .col_expr(habit::Column::NextReminder, Expr::value(next))
        .filter(habit::Column::Id.eq(habit.id))
        .filter(habit::Column::NextReminder.eq(current))
        .exec(db)
        .await?;

    Ok(result.rows_affected == 1)
}

/// Sends the reminder for one due habit and reschedules it.
///
/// A delivery error is returned before anything is written.
#[instrument(skip(db, messenger, due), fields(habit_id = due.habit.id))]
pub async fn dispatch_reminder<C>(
    db: &C,
    messenger: &dyn Messenger,
    due: &DueHabit,
) -> Result<DispatchOutcome>
where
    C: ConnectionTrait,
{
    let linked = match due.habit.linked_habit_id {
        Some(linked_id) => Habit::find_by_id(linked_id).one(db).await?,
        None => None,
    };
    let text = format_reminder(&due.habit, linked.as_ref())?;

    messenger.send(&due.chat_id, &text).await?;

    if advance_next_reminder(db, &due.habit).await? {
        Ok(DispatchOutcome::Sent)
    } else {
        Ok(DispatchOutcome::Superseded)
    }
}

/// Runs reminder sweeps against one database and messenger.
#[derive(Clone)]
pub struct Sweeper {
    db: DatabaseConnection,
    messenger: Arc<dyn Messenger>,
    lookahead: TimeDelta,
}

impl Sweeper {
    /// Creates a sweeper using the lookahead from `settings`.
    ///
    /// Settings are range-checked when loaded; an out-of-range lookahead
    /// here falls back to zero.
    #[must_use]
    pub fn new(
        db: DatabaseConnection,
        messenger: Arc<dyn Messenger>,
        settings: &ReminderSettings,
    ) -> Self {
        Self {
            db,
            messenger,
            lookahead: TimeDelta::try_seconds(settings.lookahead_secs).unwrap_or_default(),
        }
    }

    /// Runs one sweep at the current instant.
    pub async fn run_once(&self) -> Result<SweepReport> {
        self.run_once_at(Utc::now()).await
    }

    /// Runs one sweep as if the current instant were `now`.
    ///
    /// Only the due query can fail the sweep as a whole; per-habit failures
    /// are counted in the report.
    #[instrument(skip(self))]
    pub async fn run_once_at(&self, now: DateTime<Utc>) -> Result<SweepReport> {
        let checked_at = now + self.lookahead;
        let due_habits = find_due_habits(&self.db, checked_at).await?;

        let mut report = SweepReport {
            checked_at,
            due: due_habits.len(),
            sent: 0,
            skipped: 0,
            failed: 0,
        };

        for due in &due_habits {
            match dispatch_reminder(&self.db, self.messenger.as_ref(), due).await {
                Ok(DispatchOutcome::Sent) => {
                    report.sent += 1;
                    debug!("Sent reminder for habit #{}", due.habit.id);
                }
                Ok(DispatchOutcome::Superseded) => {
                    report.skipped += 1;
                    debug!(
                        "Habit #{} was rescheduled elsewhere, leaving it as is",
                        due.habit.id
                    );
                }
                Err(e) => {
                    report.failed += 1;
                    warn!(
                        "Failed to deliver reminder for habit #{} to chat {}: {}",
                        due.habit.id, due.chat_id, e
                    );
                }
            }
        }

        Ok(report)
    }
}
