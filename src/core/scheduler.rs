//! Periodic reminder sweeps.

use crate::core::sweep::Sweeper;
use std::time::Duration;
use tokio::{task::JoinHandle, time::MissedTickBehavior};
use tracing::{debug, error, info};

/// Spawns a background task that runs `sweeper` every `every`.
///
/// The first sweep runs immediately. Ticks missed while a slow sweep was
/// running are skipped rather than replayed, so sweeps never overlap within
/// one process. A failed sweep is logged and the loop keeps going.
pub fn spawn_sweeper(sweeper: Sweeper, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!("Reminder sweeper started, running every {:?}", every);

        loop {
            ticker.tick().await;
            match sweeper.run_once().await {
                Ok(report) if report.due == 0 => {
                    debug!("No reminders due up to {}", report.checked_at);
                }
                Ok(report) => info!("{}", report.summary()),
                Err(e) => error!("Reminder sweep failed: {}", e),
            }
        }
    })
}
