//! Autocomplete handlers for Discord slash command parameters.
//!
//! Habit parameters are integer ids; the suggestions show the habit's
//! description as the label and submit the id as the value.

use crate::{
    bot::BotData,
    core::{habit, message::describe_habit, user},
    entities::habit::Model as HabitModel,
    errors::Error,
};
use poise::serenity_prelude as serenity;

/// Discord accepts at most 25 choices
const MAX_CHOICES: usize = 25;

/// Label shown for a habit, e.g. `#12 Drink a glass of water at 18:00`.
#[must_use]
pub fn choice_label(habit: &HabitModel) -> String {
    format!("#{} {}", habit.id, describe_habit(habit))
}

/// Keeps the habits whose label contains `partial` (case-insensitive), as
/// `(label, id)` pairs.
#[must_use]
pub fn matching_habits(habits: Vec<HabitModel>, partial: &str) -> Vec<(String, i64)> {
    let partial_lower = partial.trim().to_lowercase();
    habits
        .into_iter()
        .map(|habit| (choice_label(&habit), habit.id))
        .filter(|(label, _)| label.to_lowercase().contains(&partial_lower))
        .take(MAX_CHOICES)
        .collect()
}

fn to_choices(matches: Vec<(String, i64)>) -> Vec<serenity::AutocompleteChoice> {
    matches
        .into_iter()
        .map(|(label, id)| serenity::AutocompleteChoice::new(label, id))
        .collect()
}

/// Suggests the caller's own habits.
///
/// Callers without an account get no suggestions; autocomplete never
/// registers anyone.
pub async fn autocomplete_own_habit(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<serenity::AutocompleteChoice> {
    let db = &ctx.data().database;
    let discord_id = ctx.author().id.to_string();

    let Ok(Some(account)) = user::get_user_by_discord_id(db, &discord_id).await else {
        return Vec::new();
    };
    let Ok(habits) = habit::list_owned_habits(db, &account).await else {
        return Vec::new();
    };
    to_choices(matching_habits(habits, partial))
}

/// Suggests pleasant habits the caller may link as a reward.
pub async fn autocomplete_linkable_habit(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<serenity::AutocompleteChoice> {
    let db = &ctx.data().database;
    let discord_id = ctx.author().id.to_string();

    let Ok(Some(account)) = user::get_user_by_discord_id(db, &discord_id).await else {
        return Vec::new();
    };
    let Ok(habits) = habit::list_linkable_habits(db, &account).await else {
        return Vec::new();
    };
    to_choices(matching_habits(habits, partial))
}
