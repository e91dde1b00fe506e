//! Habit field validation.
//!
//! Every habit write (create or partial update) is merged into a complete
//! [`HabitFields`] value and checked here before anything reaches the
//! database. Rejections carry a human-readable message that is shown to the
//! writer unchanged.

use crate::{
    entities::habit,
    errors::{Error, Result},
};
use chrono::NaiveTime;

/// Fewest days allowed between two occurrences
pub const MIN_FREQUENCY_DAYS: i32 = 1;
/// Most days allowed between two occurrences
pub const MAX_FREQUENCY_DAYS: i32 = 7;
/// Shortest allowed duration of the action, in seconds
pub const MIN_CONTINUATION_SECS: i32 = 1;
/// Longest allowed duration of the action, in seconds
pub const MAX_CONTINUATION_SECS: i32 = 120;

/// Time of day used when a habit is created without one (18:00)
#[must_use]
pub fn default_habit_time() -> NaiveTime {
    NaiveTime::from_hms_opt(18, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Every user-writable attribute of a habit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitFields {
    /// Where the action happens
    pub place: Option<String>,
    /// What to do
    pub action: Option<String>,
    /// Time of day of the action
    pub time: NaiveTime,
    /// Reward-type habit
    pub is_pleasant: bool,
    /// Beneficial habit
    pub is_good: bool,
    /// Pleasant habit used as the reward
    pub linked_habit_id: Option<i64>,
    /// Free-text reward
    pub reward: Option<String>,
    /// Days between occurrences
    pub frequency: i32,
    /// Duration of the action in seconds
    pub continuation_time: i32,
    /// Visible in the public listing
    pub is_public: bool,
}

impl Default for HabitFields {
    /// A daily, private, one-minute habit at 18:00 with no flags set.
    fn default() -> Self {
        Self {
            place: None,
            action: None,
            time: default_habit_time(),
            is_pleasant: false,
            is_good: false,
            linked_habit_id: None,
            reward: None,
            frequency: MIN_FREQUENCY_DAYS,
            continuation_time: 60,
            is_public: false,
        }
    }
}

impl From<&habit::Model> for HabitFields {
    fn from(model: &habit::Model) -> Self {
        Self {
            place: model.place.clone(),
            action: model.action.clone(),
            time: model.time,
            is_pleasant: model.is_pleasant,
            is_good: model.is_good,
            linked_habit_id: model.linked_habit_id,
            reward: model.reward.clone(),
            frequency: model.frequency,
            continuation_time: model.continuation_time,
            is_public: model.is_public,
        }
    }
}

impl HabitFields {
    /// Trims free text and turns blank strings into `None`.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            place: normalize_text(self.place),
            action: normalize_text(self.action),
            reward: normalize_text(self.reward),
            ..self
        }
    }
}

/// A partial update. `None` keeps the stored value; for nullable attributes
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HabitPatch {
    /// New place, or `Some(None)` to clear
    pub place: Option<Option<String>>,
    /// New action, or `Some(None)` to clear
    pub action: Option<Option<String>>,
    /// New time of day
    pub time: Option<NaiveTime>,
    /// New pleasant flag
    pub is_pleasant: Option<bool>,
    /// New good flag
    pub is_good: Option<bool>,
    /// New linked habit, or `Some(None)` to unlink
    pub linked_habit_id: Option<Option<i64>>,
    /// New reward, or `Some(None)` to clear
    pub reward: Option<Option<String>>,
    /// New frequency
    pub frequency: Option<i32>,
    /// New duration
    pub continuation_time: Option<i32>,
    /// New visibility
    pub is_public: Option<bool>,
}

impl HabitPatch {
    /// True when the patch would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Overlays the patch on the stored fields.
    #[must_use]
    pub fn apply_to(self, current: HabitFields) -> HabitFields {
        HabitFields {
            place: self.place.unwrap_or(current.place),
            action: self.action.unwrap_or(current.action),
            time: self.time.unwrap_or(current.time),
            is_pleasant: self.is_pleasant.unwrap_or(current.is_pleasant),
            is_good: self.is_good.unwrap_or(current.is_good),
            linked_habit_id: self.linked_habit_id.unwrap_or(current.linked_habit_id),
            reward: self.reward.unwrap_or(current.reward),
            frequency: self.frequency.unwrap_or(current.frequency),
            continuation_time: self.continuation_time.unwrap_or(current.continuation_time),
            is_public: self.is_public.unwrap_or(current.is_public),
        }
    }
}

/// Trims a free-text value; blank becomes `None`.
#[must_use]
pub fn normalize_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Parses a time of day written as `HH:MM` or `HH:MM:SS`.
pub fn parse_time_of_day(input: &str) -> Result<NaiveTime> {
    let input = input.trim();
    NaiveTime::parse_from_str(input, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M"))
        .map_err(|_| Error::validation(format!("Invalid time '{input}': use HH:MM or HH:MM:SS")))
}

/// Checks the habit rules against a complete set of fields.
///
/// `linked` is the habit referenced by `fields.linked_habit_id`, already
/// loaded by the caller. The checks run in a fixed order and the first
/// violation is returned.
pub fn validate_habit(fields: &HabitFields, linked: Option<&habit::Model>) -> Result<()> {
    if fields.continuation_time > MAX_CONTINUATION_SECS {
        return Err(Error::validation(format!(
            "Continuation time cannot exceed {MAX_CONTINUATION_SECS} seconds"
        )));
    }
    if fields.continuation_time < MIN_CONTINUATION_SECS {
        return Err(Error::validation(
            "Continuation time cannot be less than 1 second",
        ));
    }

    if fields.frequency < MIN_FREQUENCY_DAYS {
        return Err(Error::validation("Frequency cannot be less than 1 day"));
    }
    if fields.frequency > MAX_FREQUENCY_DAYS {
        return Err(Error::validation(format!(
            "Frequency cannot exceed {MAX_FREQUENCY_DAYS} days: a habit must be performed at least once a week"
        )));
    }

    let has_link = fields.linked_habit_id.is_some();
    let has_reward = fields.reward.is_some();

    if fields.is_pleasant {
        if has_reward {
            return Err(Error::validation("A pleasant habit cannot have a reward"));
        }
        if has_link {
            return Err(Error::validation(
                "A pleasant habit cannot be linked to another habit",
            ));
        }
    }

    if has_link && has_reward {
        return Err(Error::validation(
            "A habit cannot have both a linked habit and a reward",
        ));
    }

    if has_link && !linked.is_some_and(|target| target.is_pleasant) {
        return Err(Error::validation("The linked habit must be a pleasant habit"));
    }

    if !fields.is_good && !fields.is_pleasant {
        return Err(Error::validation("A habit must be useful or pleasant"));
    }

    Ok(())
}
