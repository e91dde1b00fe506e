//! General Discord commands - ping and help.
//! These commands don't touch the database.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**HabitBuddy Help**\n\
        Track habits and get a Telegram reminder whenever one is due.\n\n\
        **Getting Started**\n\
        • `/register_chat <chat_id>` - Sets the Telegram chat reminders are sent to.\n\
        • `/unregister_chat` - Stops reminders without touching your habits.\n\
        • `/profile` - Shows your account.\n\
        • `/delete_account confirm: True` - Deletes your account and all of your habits.\n\n\
        **Habit Commands**\n\
        • `/create_habit [action] [place] [time] ...` - Creates a habit (time as HH:MM).\n\
        • `/habits [page]` - Lists your habits.\n\
        • `/public_habits [page]` - Lists habits others have shared.\n\
        • `/habit_info <habit>` - Shows one of your habits.\n\
        • `/update_habit <habit> ...` - Changes only the fields you pass.\n\
        • `/delete_habit <habit>` - Deletes one of your habits.\n\n\
        **Rules**\n\
        • A habit is good, pleasant, or both.\n\
        • A good habit is rewarded by a pleasant habit *or* a free-text reward, not both.\n\
        • A pleasant habit has no reward of its own.\n\
        • Frequency is 1 to 7 days, duration is 1 to 120 seconds.\n\n\
        **Utility Commands**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
