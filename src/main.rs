use habit_buddy::{
    bot::{self, BotData},
    config::{database, settings},
    core::{scheduler, sweep::Sweeper, user},
    errors::{Error, Result},
    notify::{Messenger, TelegramMessenger},
};
use dotenvy::dotenv;
use std::{env, sync::Arc, time::Duration};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load the application settings
    let app_config = Arc::new(settings::load_app_configuration()?);

    // 4. Connect and create tables
    let db = database::create_connection()
        .await
        .inspect(|_| info!("Database connected."))
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Promote configured superusers
    for discord_id in &app_config.superusers {
        user::ensure_superuser(&db, discord_id).await?;
    }

    // 6. Start the reminder sweeper
    // Tokens are loaded directly before use, never stored in AppConfig
    let telegram_token = env::var("TELEGRAM_BOT_TOKEN")
        .inspect_err(|e| error!("TELEGRAM_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;
    let messenger: Arc<dyn Messenger> =
        Arc::new(TelegramMessenger::new(&app_config.telegram, telegram_token)?);
    let sweeper = Sweeper::new(db.clone(), messenger, &app_config.reminders);
    let sweep_handle = scheduler::spawn_sweeper(
        sweeper,
        Duration::from_secs(app_config.reminders.sweep_interval_secs),
    );

    // 7. Run the bot
    let discord_token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;

    let result = bot::run_bot(discord_token, BotData::new(db, Arc::clone(&app_config))).await;
    sweep_handle.abort();
    result
}
