//! Habit Discord commands - create, list, inspect, update and delete habits.
//!
//! The commands translate Discord options into
//! [`HabitFields`](crate::core::validation::HabitFields) and
//! [`HabitPatch`](crate::core::validation::HabitPatch) values and leave every
//! rule to [`crate::core::habit`].
//! Rejections come back as user-facing errors and are shown verbatim.

use crate::{
    core::{message::describe_habit, pagination::Page},
    entities::habit::Model as HabitModel,
};
use chrono::{DateTime, FixedOffset, Utc};
use std::fmt::Write;

/// "every day" or "every N days"
#[must_use]
pub fn format_frequency(days: i32) -> String {
    if days == 1 {
        "every day".to_string()
    } else {
        format!("every {days} days")
    }
}

/// Renders an instant in the process timezone, e.g. `2025-10-24 18:00 (UTC+07:00)`.
#[must_use]
pub fn format_local(instant: DateTime<Utc>, timezone: FixedOffset) -> String {
    instant
        .with_timezone(&timezone)
        .format("%Y-%m-%d %H:%M (UTC%:z)")
        .to_string()
}

/// One listing line, e.g. `` `#3` Drink a glass of water at 18:00 - every day 🌍 ``.
#[must_use]
pub fn format_habit_line(habit: &HabitModel) -> String {
    let kind = match (habit.is_good, habit.is_pleasant) {
        (true, true) => "💚🎁",
        (_, true) => "🎁",
        _ => "💚",
    };
    let visibility = if habit.is_public { " 🌍" } else { "" };
    format!(
        "{kind} `#{}` {} - {}{visibility}",
        habit.id,
        describe_habit(habit),
        format_frequency(habit.frequency)
    )
}

/// Renders a page of habits with a navigation footer.
pub fn format_habit_page(title: &str, page: &Page<HabitModel>) -> Result<String, std::fmt::Error> {
    if page.total_items == 0 {
        return Ok(format!("{title}\n\n_No habits yet. Create one with `/create_habit`._"));
    }
    if page.items.is_empty() {
        return Ok(format!(
            "{title}\n\n_Page {} is empty: there {} only {} page{}._",
            page.page,
            if page.total_pages == 1 { "is" } else { "are" },
            page.total_pages,
            if page.total_pages == 1 { "" } else { "s" }
        ));
    }

    let mut response = format!("{title}\n\n");
    for habit in &page.items {
        writeln!(&mut response, "{}", format_habit_line(habit))?;
    }
    write!(
        &mut response,
        "\nPage {}/{} | {} habit{}",
        page.page,
        page.total_pages,
        page.total_items,
        if page.total_items == 1 { "" } else { "s" }
    )?;
    if page.has_next() {
        write!(&mut response, " | next: `page: {}`", page.page + 1)?;
    }
    Ok(response)
}

/// Full description of one habit.
///
/// `linked` is the habit referenced by `habit.linked_habit_id`, if loaded.
pub fn format_habit_details(
    habit: &HabitModel,
    linked: Option<&HabitModel>,
    timezone: FixedOffset,
) -> Result<String, std::fmt::Error> {
    let not_set = crate::core::message::NOT_SET;
    let mut response = format!("📋 **Habit #{}**\n\n", habit.id);

    writeln!(
        &mut response,
        "🎯 Action: {}",
        habit.action.as_deref().unwrap_or(not_set)
    )?;
    writeln!(
        &mut response,
        "📍 Place: {}",
        habit.place.as_deref().unwrap_or(not_set)
    )?;
    writeln!(&mut response, "⏰ Time: {}", habit.time.format("%H:%M"))?;
    writeln!(&mut response, "🔁 Frequency: {}", format_frequency(habit.frequency))?;
    writeln!(
        &mut response,
        "⏱️ Duration: {} seconds",
        habit.continuation_time
    )?;

    let kind = match (habit.is_good, habit.is_pleasant) {
        (true, true) => "Good and pleasant",
        (_, true) => "Pleasant",
        _ => "Good",
    };
    writeln!(&mut response, "🏷️ Type: {kind}")?;

    match (habit.linked_habit_id, &habit.reward) {
        (Some(linked_id), _) => {
            let description = linked.map_or_else(
                || format!("habit #{linked_id}"),
                |l| format!("#{} {}", l.id, describe_habit(l)),
            );
            writeln!(&mut response, "🎁 Reward: {description}")?;
        }
        (None, Some(reward)) => writeln!(&mut response, "🎁 Reward: {reward}")?,
        (None, None) => {}
    }

    writeln!(
        &mut response,
        "👁️ Visibility: {}",
        if habit.is_public { "Public" } else { "Private" }
    )?;
    write!(
        &mut response,
        "🔔 Next reminder: {}",
        habit
            .next_reminder
            .map_or_else(|| "not scheduled".to_string(), |next| format_local(next, timezone))
    )?;
    Ok(response)
}

/// Turns a "new value" option and a "clear" flag into a patch entry for a
/// nullable field. Clearing wins over a new value.
#[must_use]
pub fn replace_or_clear<T>(value: Option<T>, clear: Option<bool>) -> Option<Option<T>> {
    if clear.unwrap_or(false) {
        Some(None)
    } else {
        value.map(Some)
    }
}

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use super::{format_habit_details, format_habit_page, format_local, replace_or_clear};
    use crate::{
        bot::{BotData, caller_account, handlers::autocomplete},
        core::{
            habit,
            validation::{HabitFields, HabitPatch, parse_time_of_day},
        },
        errors::{Error, Result},
    };
    use std::fmt::Write;

    /// Creates a habit. Unset options use their defaults.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command, prefix_command)]
    pub async fn create_habit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "What to do"] action: Option<String>,
        #[description = "Where to do it"] place: Option<String>,
        #[description = "Time of day as HH:MM (default: 18:00)"] time: Option<String>,
        #[description = "Is this a useful habit? (default: true unless pleasant)"] is_good: Option<
            bool,
        >,
        #[description = "Is this a pleasant habit used as a reward? (default: false)"]
        is_pleasant: Option<bool>,
        #[description = "Pleasant habit to do as the reward"]
        #[autocomplete = "autocomplete::autocomplete_linkable_habit"]
        linked_habit: Option<i64>,
        #[description = "Free-text reward"] reward: Option<String>,
        #[description = "Repeat every N days, 1 to 7 (default: 1)"] frequency: Option<i32>,
        #[description = "Duration in seconds, 1 to 120 (default: 60)"] duration: Option<i32>,
        #[description = "Show in the public list? (default: false)"] is_public: Option<bool>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let reminders = &ctx.data().config.reminders;
        let account = caller_account(ctx).await?;

        let defaults = HabitFields::default();
        let is_pleasant = is_pleasant.unwrap_or(false);
        let fields = HabitFields {
            place,
            action,
            time: time
                .as_deref()
                .map(parse_time_of_day)
                .transpose()?
                .unwrap_or(defaults.time),
            is_pleasant,
            is_good: is_good.unwrap_or(!is_pleasant),
            linked_habit_id: linked_habit,
            reward,
            frequency: frequency.unwrap_or(defaults.frequency),
            continuation_time: duration.unwrap_or(defaults.continuation_time),
            is_public: is_public.unwrap_or(defaults.is_public),
        };

        let created = habit::create_habit(db, &account, fields, reminders.now()).await?;

        let mut response = format!("✅ Created habit **#{}**.", created.id);
        if let Some(next) = created.next_reminder {
            write!(
                &mut response,
                "\n🔔 First reminder: {}",
                format_local(next, reminders.timezone)
            )?;
        }
        if account.tg_chat_id.is_none() {
            response.push_str(
                "\nℹ️ Register a Telegram chat with `/register_chat` to receive reminders.",
            );
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Lists your habits, newest first. Superusers see every habit.
    #[poise::command(slash_command, prefix_command)]
    pub async fn habits(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Page number (default: 1)"] page: Option<u64>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let page_size = ctx.data().config.habits.page_size;
        let account = caller_account(ctx).await?;

        let listing = habit::list_habits(db, &account, page.unwrap_or(1), page_size).await?;
        let title = if account.is_superuser {
            "📂 **All Habits**"
        } else {
            "📂 **Your Habits**"
        };

        ctx.say(format_habit_page(title, &listing)?).await?;
        Ok(())
    }

    /// Lists habits shared by their owners, newest first.
    #[poise::command(slash_command, prefix_command)]
    pub async fn public_habits(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Page number (default: 1)"] page: Option<u64>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let page_size = ctx.data().config.habits.page_size;
        let account = caller_account(ctx).await?;

        let listing =
            habit::list_public_habits(db, &account, page.unwrap_or(1), page_size).await?;

        ctx.say(format_habit_page("🌍 **Public Habits**", &listing)?)
            .await?;
        Ok(())
    }

    /// Shows one of your habits in detail.
    #[poise::command(slash_command, prefix_command)]
    pub async fn habit_info(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Habit to show"]
        #[autocomplete = "autocomplete::autocomplete_own_habit"]
        habit_id: i64,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let timezone = ctx.data().config.reminders.timezone;
        let account = caller_account(ctx).await?;

        let found = habit::get_owned_habit(db, &account, habit_id).await?;
        let linked = match found.linked_habit_id {
            Some(linked_id) => Some(habit::get_habit(db, linked_id).await?),
            None => None,
        };

        ctx.say(format_habit_details(&found, linked.as_ref(), timezone)?)
            .await?;
        Ok(())
    }

    /// Changes only the fields you pass; the rest stay as they are.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command, prefix_command)]
    pub async fn update_habit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Habit to update"]
        #[autocomplete = "autocomplete::autocomplete_own_habit"]
        habit_id: i64,
        #[description = "New action"] action: Option<String>,
        #[description = "New place"] place: Option<String>,
        #[description = "New time of day as HH:MM"] time: Option<String>,
        #[description = "Useful habit?"] is_good: Option<bool>,
        #[description = "Pleasant habit?"] is_pleasant: Option<bool>,
        #[description = "New pleasant habit to do as the reward"]
        #[autocomplete = "autocomplete::autocomplete_linkable_habit"]
        linked_habit: Option<i64>,
        #[description = "New free-text reward"] reward: Option<String>,
        #[description = "Repeat every N days, 1 to 7"] frequency: Option<i32>,
        #[description = "Duration in seconds, 1 to 120"] duration: Option<i32>,
        #[description = "Show in the public list?"] is_public: Option<bool>,
        #[description = "Remove the linked habit"] clear_linked_habit: Option<bool>,
        #[description = "Remove the free-text reward"] clear_reward: Option<bool>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let reminders = &ctx.data().config.reminders;

        let patch = HabitPatch {
            place: place.map(Some),
            action: action.map(Some),
            time: time.as_deref().map(parse_time_of_day).transpose()?,
            is_pleasant,
            is_good,
            linked_habit_id: replace_or_clear(linked_habit, clear_linked_habit),
            reward: replace_or_clear(reward, clear_reward),
            frequency,
            continuation_time: duration,
            is_public,
        };

        if patch.is_empty() {
            ctx.say("❌ Please specify at least one field to update.")
                .await?;
            return Ok(());
        }

        let account = caller_account(ctx).await?;
        let updated =
            habit::update_habit(db, &account, habit_id, patch, reminders.now()).await?;

        let mut response = format!("✅ Updated habit **#{}**.", updated.id);
        if let Some(next) = updated.next_reminder {
            write!(
                &mut response,
                "\n🔔 Next reminder: {}",
                format_local(next, reminders.timezone)
            )?;
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Deletes one of your habits. Habits using it as their reward are unlinked.
    #[poise::command(slash_command, prefix_command)]
    pub async fn delete_habit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Habit to delete"]
        #[autocomplete = "autocomplete::autocomplete_own_habit"]
        habit_id: i64,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let account = caller_account(ctx).await?;

        habit::delete_habit(db, &account, habit_id).await?;

        ctx.say(format!("✅ Deleted habit **#{habit_id}**.")).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
