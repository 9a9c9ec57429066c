//! Application state and initialization
//!
//! All services are built here from one key-value store and made
//! available through AppState.

use crate::api::{RecipeApi, SpoonacularClient};
use crate::config::AppConfig;
use crate::database;
use crate::error::{AppError, Result};
use crate::services::{BookmarkStore, Clock, QuotaTracker, SettingsService, SystemClock};
use crate::storage::{KeyValueStore, MemoryStore, SqliteStore};
use std::sync::Arc;

/// Central application state holding all services
#[derive(Clone)]
pub struct AppState {
    pub quota: QuotaTracker,
    pub bookmarks: BookmarkStore,
    pub settings: SettingsService,
    api: Option<Arc<dyn RecipeApi>>,
}

impl AppState {
    /// Wire the services over an existing store, clock and optional API client
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        api: Option<Arc<dyn RecipeApi>>,
    ) -> Self {
        Self {
            quota: QuotaTracker::new(store.clone(), clock),
            bookmarks: BookmarkStore::new(store.clone()),
            settings: SettingsService::new(store),
            api,
        }
    }

    /// Recipe API client; fails when no API key was configured
    pub fn api(&self) -> Result<&dyn RecipeApi> {
        self.api
            .as_deref()
            .ok_or_else(|| AppError::Config("SPOONACULAR_API_KEY is not set".to_string()))
    }
}

fn build_api(config: &AppConfig) -> Result<Option<Arc<dyn RecipeApi>>> {
    let Some(api_key) = config.api_key.as_deref() else {
        tracing::debug!("No API key configured, network commands are disabled");
        return Ok(None);
    };

    let client = SpoonacularClient::builder(api_key)
        .base_url(config.api_base_url.clone())
        .build()?;

    Ok(Some(Arc::new(client)))
}

/// Application setup backed by the SQLite file in the data directory
pub async fn setup(config: &AppConfig) -> Result<AppState> {
    tracing::info!("Initializing application");
    tracing::info!("Data directory: {:?}", config.data_dir);

    std::fs::create_dir_all(&config.data_dir)?;

    let pool = database::create_pool(&config.db_path()).await?;
    let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::new(pool));

    let state = AppState::new(store, Arc::new(SystemClock), build_api(config)?);

    tracing::info!("Application initialized successfully");
    Ok(state)
}

/// Application setup whose state is discarded on exit
pub fn setup_ephemeral(config: &AppConfig) -> Result<AppState> {
    tracing::info!("Initializing application with in-memory storage");

    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    Ok(AppState::new(store, Arc::new(SystemClock), build_api(config)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_setup_creates_database_file() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig::new(temp.path().join("data"), None, None);

        let state = setup(&config).await.unwrap();

        assert!(config.db_path().exists());
        assert!(state.api().is_err());
        assert!(state.bookmarks.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_setup_with_api_key() {
        let config = AppConfig::new(
            std::path::PathBuf::from("/unused"),
            Some("key".to_string()),
            Some("http://127.0.0.1:1".to_string()),
        );

        let state = setup_ephemeral(&config).unwrap();

        assert!(state.api().is_ok());
    }
}
