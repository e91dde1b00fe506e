//! Unified error type for `HabitBuddy`.
//!
//! Every layer (core logic, messaging, bot commands) returns [`Result`], so a
//! failure can travel from the database up to the Discord reply without
//! conversion boilerplate.

use thiserror::Error;

/// All errors produced by the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Settings file or environment could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Underlying sea-orm failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A habit write violated one of the habit rules; never persisted
    #[error("{message}")]
    Validation {
        /// Human-readable reason, shown to the writer as-is
        message: String,
    },

    /// No habit with this id exists
    #[error("Habit #{id} not found")]
    HabitNotFound {
        /// The requested habit id
        id: i64,
    },

    /// The habit exists but belongs to someone else
    #[error("You do not have permission to access habit #{habit_id}")]
    AccessDenied {
        /// The requested habit id
        habit_id: i64,
    },

    /// No account is registered for this Discord user
    #[error("No account registered for user {discord_id}")]
    UserNotFound {
        /// Discord user id of the missing account
        discord_id: String,
    },

    /// The messaging provider rejected a reminder
    #[error("Delivery error: {message}")]
    Delivery {
        /// Provider status and response body
        message: String,
    },

    /// Transport-level failure talking to the messaging provider
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Missing or malformed environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing into a response buffer failed
    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl Error {
    /// Builds a [`Error::Validation`] from any displayable reason.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Whether the message is meant for the person who issued the request.
    ///
    /// Rejected writes, missing habits and ownership failures are reported
    /// verbatim; everything else is an internal failure.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::HabitNotFound { .. }
                | Self::AccessDenied { .. }
                | Self::UserNotFound { .. }
        )
    }
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
