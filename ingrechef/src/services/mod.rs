//! Services module
//!
//! Stores that sit on the key-value store: request quota, bookmarks and
//! the user profile. Each owns a disjoint set of keys.

pub mod bookmarks;
pub mod quota;
pub mod settings;

pub use bookmarks::BookmarkStore;
pub use quota::{Clock, QuotaStatus, QuotaTracker, SystemClock, UsageLevel};
pub use settings::SettingsService;
