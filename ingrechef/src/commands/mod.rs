//! User-facing flows
//!
//! What each screen of the app does, expressed over `AppState`:
//! - `recipes`: ingredient search and recipe detail, gated by the daily quota
//! - `bookmarks`: saved recipes
//! - `settings`: user profile and quota status/reset
//!
//! Errors returned here carry a `user_message()` for display.

pub mod bookmarks;
pub mod recipes;
pub mod settings;

pub use bookmarks::*;
pub use recipes::*;
pub use settings::*;
