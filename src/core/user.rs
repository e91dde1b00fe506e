//! Account business logic - registration, delivery address, superusers and
//! account deletion.
//!
//! An account is created the first time a Discord user issues a command, so
//! callers normally go through [`get_or_create_user`].

use crate::{
    entities::{Habit, User, habit, user},
    errors::{Error, Result},
};
use sea_orm::{Set, TransactionTrait, prelude::*, sea_query::Expr};
use tracing::info;

/// Finds an account by its Discord user id.
pub async fn get_user_by_discord_id<C>(db: &C, discord_id: &str) -> Result<Option<user::Model>>
where
    C: ConnectionTrait,
{
    User::find()
        .filter(user::Column::DiscordId.eq(discord_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Returns the account for `discord_id`, creating a regular account on first use.
pub async fn get_or_create_user<C>(db: &C, discord_id: &str) -> Result<user::Model>
where
    C: ConnectionTrait,
{
    if let Some(existing) = get_user_by_discord_id(db, discord_id).await? {
        return Ok(existing);
    }

    let account = user::ActiveModel {
        discord_id: Set(discord_id.to_string()),
        tg_chat_id: Set(None),
        is_superuser: Set(false),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let created = account.insert(db).await?;
    info!("Registered new account #{} for user {}", created.id, discord_id);
    Ok(created)
}

/// Checks that a Telegram chat id is a (possibly negative) integer.
pub fn parse_chat_id(input: &str) -> Result<String> {
    let trimmed = input.trim();
    trimmed
        .parse::<i64>()
        .map(|id| id.to_string())
        .map_err(|_| {
            Error::validation(format!(
                "Invalid Telegram chat id '{trimmed}': it must be a number"
            ))
        })
}

/// Registers or clears the account's delivery address.
///
/// With `None` the account stops receiving reminders; its habits keep their
/// schedule and are picked up again once an address is registered.
pub async fn set_chat_id<C>(
    db: &C,
    account: user::Model,
    chat_id: Option<&str>,
) -> Result<user::Model>
where
    C: ConnectionTrait,
{
    let chat_id = chat_id.map(parse_chat_id).transpose()?;

    let mut active_model: user::ActiveModel = account.into();
    active_model.tg_chat_id = Set(chat_id);
    active_model.update(db).await.map_err(Into::into)
}

/// Makes `discord_id` a superuser, creating the account if needed.
pub async fn ensure_superuser<C>(db: &C, discord_id: &str) -> Result<user::Model>
where
    C: ConnectionTrait,
{
    let account = get_or_create_user(db, discord_id).await?;
    if account.is_superuser {
        return Ok(account);
    }

    let mut active_model: user::ActiveModel = account.into();
    active_model.is_superuser = Set(true);
    let promoted = active_model.update(db).await?;
    info!("Granted superuser to account #{}", promoted.id);
    Ok(promoted)
}

/// Deletes an account together with every habit it owns.
///
/// Habits of other accounts that used one of the deleted habits as their
/// reward are unlinked, not deleted.
pub async fn delete_user(db: &DatabaseConnection, account: &user::Model) -> Result<u64> {
    let txn = db.begin().await?;

    let owned_ids: Vec<i64> = Habit::find()
        .filter(habit::Column::OwnerId.eq(account.id))
        .all(&txn)
        .await?
        .into_iter()
        .map(|owned| owned.id)
        .collect();

    if !owned_ids.is_empty() {
        Habit::update_many()
            .col_expr(habit::Column::LinkedHabitId, Expr::value(Option::<i64>::None))
            .filter(habit::Column::LinkedHabitId.is_in(owned_ids.clone()))
            .exec(&txn)
            .await?;
    }

    let deleted = Habit::delete_many()
        .filter(habit::Column::OwnerId.eq(account.id))
        .exec(&txn)
        .await?
        .rows_affected;

    User::delete_by_id(account.id).exec(&txn).await?;
    txn.commit().await?;

    info!(
        "Deleted account #{} and {} owned habit(s)",
        account.id, deleted
    );
    Ok(deleted)
}
