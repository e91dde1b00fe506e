//! Core business logic, independent of Discord.

/// Habit create, read, list, update and delete
pub mod habit;
/// Reminder message text
pub mod message;
/// Page arithmetic for habit listings
pub mod pagination;
/// Next-reminder calculation
pub mod schedule;
/// Periodic sweep task
pub mod scheduler;
/// One reminder sweep
pub mod sweep;
/// Accounts and delivery addresses
pub mod user;
/// Habit field rules
pub mod validation;
