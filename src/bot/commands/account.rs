//! Account Discord commands - delivery address, profile and account deletion.

use crate::entities::user::Model as UserModel;
use std::fmt::Write;

/// Renders the caller's profile.
pub fn format_profile(account: &UserModel, habit_count: usize) -> Result<String, std::fmt::Error> {
    let mut response = String::from("👤 **Your account**\n\n");
    writeln!(&mut response, "🆔 Account: #{}", account.id)?;
    writeln!(
        &mut response,
        "💬 Telegram chat: {}",
        account
            .tg_chat_id
            .as_deref()
            .map_or_else(|| "not registered".to_string(), |chat| format!("`{chat}`"))
    )?;
    writeln!(
        &mut response,
        "🛡️ Role: {}",
        if account.is_superuser {
            "Superuser"
        } else {
            "Regular"
        }
    )?;
    writeln!(&mut response, "📋 Habits: {habit_count}")?;
    write!(
        &mut response,
        "📅 Registered: {}",
        account.created_at.format("%Y-%m-%d")
    )?;
    Ok(response)
}

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use super::format_profile;
    use crate::{
        bot::{BotData, caller_account},
        core::{habit, user},
        errors::{Error, Result},
    };

    /// Sets the Telegram chat reminders are delivered to.
    #[poise::command(slash_command, prefix_command)]
    pub async fn register_chat(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Your Telegram chat id (a number)"] chat_id: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let account = caller_account(ctx).await?;

        let account = user::set_chat_id(db, account, Some(&chat_id)).await?;
        let chat = account.tg_chat_id.unwrap_or_default();

        ctx.say(format!("✅ Reminders will be sent to Telegram chat `{chat}`."))
            .await?;
        Ok(())
    }

    /// Stops reminder delivery. Habits keep their schedule.
    #[poise::command(slash_command, prefix_command)]
    pub async fn unregister_chat(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let db = &ctx.data().database;
        let discord_id = ctx.author().id.to_string();

        let account = user::get_user_by_discord_id(db, &discord_id)
            .await?
            .ok_or(Error::UserNotFound { discord_id })?;
        user::set_chat_id(db, account, None).await?;

        ctx.say(
            "✅ Telegram chat removed. Your habits keep their schedule; reminders resume once you register a chat again.",
        )
        .await?;
        Ok(())
    }

    /// Shows the caller's account.
    #[poise::command(slash_command, prefix_command)]
    pub async fn profile(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let db = &ctx.data().database;
        let account = caller_account(ctx).await?;
        let owned = habit::list_owned_habits(db, &account).await?;

        ctx.say(format_profile(&account, owned.len())?).await?;
        Ok(())
    }

    /// Deletes the caller's account and every habit it owns.
    #[poise::command(slash_command, prefix_command)]
    pub async fn delete_account(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Confirm deletion of your account and all of your habits"] confirm: bool,
    ) -> Result<()> {
        if !confirm {
            ctx.say(
                "⚠️ This deletes your account and all of your habits. Run `/delete_account confirm: True` to proceed.",
            )
            .await?;
            return Ok(());
        }

        let db = &ctx.data().database;
        let discord_id = ctx.author().id.to_string();
        let account = user::get_user_by_discord_id(db, &discord_id)
            .await?
            .ok_or(Error::UserNotFound { discord_id })?;

        let deleted = user::delete_user(db, &account).await?;
        ctx.say(format!(
            "✅ Deleted your account and {deleted} habit{}.",
            if deleted == 1 { "" } else { "s" }
        ))
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
