//! Application configuration
//!
//! Central location for constants, persisted keys, fixed catalogues,
//! and the runtime configuration resolved at startup.

use std::path::PathBuf;
use std::time::Duration;

// ===== Request Quota =====

/// Maximum number of API requests per calendar day
pub const DAILY_LIMIT: u32 = 75;

/// Usage percentage at which the quota is reported as nearly exhausted
pub const NEAR_LIMIT_PERCENT: u32 = 80;

// ===== Persisted Keys =====

pub const BOOKMARKS_KEY: &str = "ingrechef_bookmarks";
pub const REQUEST_COUNT_KEY: &str = "ingrechef_request_count";
pub const LAST_RESET_DATE_KEY: &str = "ingrechef_last_reset_date";
pub const SETTINGS_KEY: &str = "ingrechef_settings";

/// Calendar-day format used for the last reset date
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ===== Recipe API =====

pub const DEFAULT_API_BASE_URL: &str = "https://api.spoonacular.com/recipes";

/// Number of results requested per search
pub const SEARCH_RESULT_COUNT: u32 = 10;

/// Connector placed between ingredient tokens in `includeIngredients`
pub const INGREDIENT_CONNECTOR: &str = ",+";

pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

pub const USER_AGENT: &str = concat!("IngreChef/", env!("CARGO_PKG_VERSION"));

// ===== Catalogues =====

/// Cuisine filters offered to the user as (query value, label).
/// The empty value means no cuisine filter.
pub const CUISINES: &[(&str, &str)] = &[
    ("", "Any Cuisine"),
    ("american", "American"),
    ("chinese", "Chinese"),
    ("japanese", "Japanese"),
    ("indian", "Indian"),
    ("italian", "Italian"),
    ("mediterranean", "Mediterranean"),
    ("mexican", "Mexican"),
    ("thai", "Thai"),
    ("french", "French"),
    ("korean", "Korean"),
    ("middle eastern", "Middle Eastern"),
];

/// Profile avatar choices, indexed by `UserProfile::selected_avatar`
pub const AVATARS: &[&str] = &[
    "https://i.postimg.cc/cC52fdqf/chef-hat.png",
    "https://i.postimg.cc/BbvR8Xzq/chef-hat-1.png",
    "https://i.postimg.cc/G3MZWxB9/toque.png",
];

/// Label for a cuisine value, "Any Cuisine" for unknown values
pub fn cuisine_label(value: &str) -> &'static str {
    CUISINES
        .iter()
        .find(|(v, _)| *v == value)
        .map(|(_, label)| *label)
        .unwrap_or(CUISINES[0].1)
}

pub fn is_known_cuisine(value: &str) -> bool {
    CUISINES.iter().any(|(v, _)| *v == value)
}

pub fn avatar_url(index: usize) -> Option<&'static str> {
    AVATARS.get(index).copied()
}

// ===== Runtime Configuration =====

/// Values resolved from the command line and environment at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding the SQLite key-value database
    pub data_dir: PathBuf,
    /// Spoonacular API key; only network commands need it
    pub api_key: Option<String>,
    pub api_base_url: String,
}

impl AppConfig {
    pub fn new(data_dir: PathBuf, api_key: Option<String>, api_base_url: Option<String>) -> Self {
        Self {
            data_dir,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            api_base_url: api_base_url.unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("ingrechef.db")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuisine_label_lookup() {
        assert_eq!(cuisine_label("thai"), "Thai");
        assert_eq!(cuisine_label("middle eastern"), "Middle Eastern");
        assert_eq!(cuisine_label(""), "Any Cuisine");
        assert_eq!(cuisine_label("martian"), "Any Cuisine");
    }

    #[test]
    fn test_known_cuisines() {
        assert!(is_known_cuisine(""));
        assert!(is_known_cuisine("korean"));
        assert!(!is_known_cuisine("Korean"));
    }

    #[test]
    fn test_avatar_bounds() {
        assert!(avatar_url(0).is_some());
        assert!(avatar_url(AVATARS.len() - 1).is_some());
        assert!(avatar_url(AVATARS.len()).is_none());
    }

    #[test]
    fn test_blank_api_key_treated_as_missing() {
        let config = AppConfig::new(PathBuf::from("/tmp/x"), Some("  ".to_string()), None);
        assert!(config.api_key.is_none());
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.db_path(), PathBuf::from("/tmp/x/ingrechef.db"));
    }
}
