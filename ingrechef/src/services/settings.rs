//! Settings service
//!
//! Persists the user profile as one JSON record in the key-value store.

use crate::config::{AVATARS, SETTINGS_KEY};
use crate::error::{AppError, Result};
use crate::models::UserProfile;
use crate::storage::KeyValueStore;
use std::sync::Arc;

/// Service for the single user profile record
#[derive(Clone)]
pub struct SettingsService {
    store: Arc<dyn KeyValueStore>,
}

impl SettingsService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the profile. Missing fields take their defaults; an absent or
    /// unreadable record yields the default profile.
    pub async fn get(&self) -> UserProfile {
        let raw = match self.store.get(SETTINGS_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return UserProfile::default(),
            Err(e) => {
                tracing::error!("Error getting settings: {}", e);
                return UserProfile::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!("Stored settings are unreadable, using defaults: {}", e);
            UserProfile::default()
        })
    }

    /// Overwrite the stored profile
    pub async fn save(&self, profile: &UserProfile) -> Result<()> {
        if profile.selected_avatar >= AVATARS.len() {
            return Err(AppError::Validation(format!(
                "Avatar {} does not exist, choose 0 to {}",
                profile.selected_avatar,
                AVATARS.len() - 1
            )));
        }

        // Save to store
        let content = serde_json::to_string(profile)?;

        self.store.set(SETTINGS_KEY, &content).await.map_err(|e| {
            tracing::error!("Error saving settings: {}", e);
            e
        })?;

        tracing::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::testing::FlakyStore;
    use crate::storage::MemoryStore;

    fn create_test_service() -> (SettingsService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (SettingsService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_default_profile_without_save() {
        let (service, _store) = create_test_service();

        let profile = service.get().await;

        assert_eq!(profile.display_name, "");
        assert_eq!(profile.bio, "");
        assert_eq!(profile.selected_avatar, 0);
    }

    #[tokio::test]
    async fn test_save_and_get() {
        let (service, _store) = create_test_service();

        let updated = UserProfile {
            display_name: "Ada".to_string(),
            bio: "Cooks on weekends".to_string(),
            selected_avatar: 2,
        };
        service.save(&updated).await.unwrap();

        assert_eq!(service.get().await, updated);
    }

    #[tokio::test]
    async fn test_partial_record_merges_over_defaults() {
        let (service, store) = create_test_service();
        store
            .set(SETTINGS_KEY, r#"{"displayName":"Old Format"}"#)
            .await
            .unwrap();

        let profile = service.get().await;

        assert_eq!(profile.display_name, "Old Format");
        assert_eq!(profile.bio, "");
        assert_eq!(profile.selected_avatar, 0);
    }

    #[tokio::test]
    async fn test_corrupt_record_reads_default() {
        let (service, store) = create_test_service();
        store.set(SETTINGS_KEY, "[1, 2").await.unwrap();

        assert_eq!(service.get().await, UserProfile::default());
    }

    #[tokio::test]
    async fn test_rejects_unknown_avatar() {
        let (service, store) = create_test_service();

        let profile = UserProfile {
            selected_avatar: AVATARS.len(),
            ..UserProfile::default()
        };

        assert!(matches!(
            service.save(&profile).await,
            Err(AppError::Validation(_))
        ));
        assert!(store.get(SETTINGS_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_write_failure_propagates() {
        let store = Arc::new(FlakyStore::default());
        let service = SettingsService::new(store.clone());
        store.fail_writes(true);

        assert!(service.save(&UserProfile::default()).await.is_err());
    }

    #[tokio::test]
    async fn test_settings_persistence_across_instances() {
        let store = Arc::new(MemoryStore::new());

        {
            let service = SettingsService::new(store.clone());
            let profile = UserProfile {
                display_name: "Kim".to_string(),
                ..UserProfile::default()
            };
            service.save(&profile).await.unwrap();
        }

        let service = SettingsService::new(store);
        assert_eq!(service.get().await.display_name, "Kim");
    }
}
