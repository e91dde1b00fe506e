//! Reminder message text.
//!
//! The body always names the action, the place and the duration. A linked
//! reward habit takes precedence over a free-text reward; habits with
//! neither get the short form.

use crate::entities::habit;
use std::fmt::Write;

/// Shown in place of an action or place the owner left empty
pub const NOT_SET: &str = "not set";

/// One-line description of a habit, e.g. `Meditate at 18:00`.
#[must_use]
pub fn describe_habit(habit: &habit::Model) -> String {
    format!(
        "{} at {}",
        habit.action.as_deref().unwrap_or(NOT_SET),
        habit.time.format("%H:%M")
    )
}

/// Builds the reminder text for `habit`.
///
/// `linked` is the habit referenced by `habit.linked_habit_id`, if it could
/// be loaded.
pub fn format_reminder(
    habit: &habit::Model,
    linked: Option<&habit::Model>,
) -> Result<String, std::fmt::Error> {
    let mut text = String::from("Reminder!\n");
    writeln!(
        &mut text,
        "Action: {}",
        habit.action.as_deref().unwrap_or(NOT_SET)
    )?;
    writeln!(
        &mut text,
        "Place: {}",
        habit.place.as_deref().unwrap_or(NOT_SET)
    )?;

    if let Some(linked_id) = habit.linked_habit_id {
        let description = linked.map_or_else(|| format!("habit #{linked_id}"), describe_habit);
        writeln!(&mut text, "Linked habit: {description}")?;
    } else if let Some(reward) = &habit.reward {
        writeln!(&mut text, "Reward: {reward}")?;
    }

    write!(&mut text, "Duration: {} seconds", habit.continuation_time)?;
    Ok(text)
}
