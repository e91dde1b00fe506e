//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Account and delivery address commands
pub mod account;

/// General utility commands
pub mod general;

/// Habit management commands
pub mod habit;

// Export commands
pub use account::*;
pub use general::*;
pub use habit::*;
