//! Profile and quota flows

use crate::app::AppState;
use crate::error::Result;
use crate::models::UserProfile;
use crate::services::QuotaStatus;

/// Changes to apply to the stored profile; `None` keeps the current value
#[derive(Debug, Default, Clone)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub selected_avatar: Option<usize>,
}

pub async fn load_profile(state: &AppState) -> UserProfile {
    state.settings.get().await
}

/// Merge `update` into the stored profile and save it
pub async fn save_profile(state: &AppState, update: ProfileUpdate) -> Result<UserProfile> {
    let current = state.settings.get().await;

    let profile = UserProfile {
        display_name: update.display_name.unwrap_or(current.display_name),
        bio: update.bio.unwrap_or(current.bio),
        selected_avatar: update.selected_avatar.unwrap_or(current.selected_avatar),
    };

    state.settings.save(&profile).await?;
    Ok(profile)
}

pub async fn quota_status(state: &AppState) -> QuotaStatus {
    state.quota.status().await
}

/// Explicit reset requested by the user
pub async fn reset_quota(state: &AppState) -> Result<QuotaStatus> {
    state.quota.try_reset_count().await?;
    Ok(state.quota.status().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::create_test_state;
    use crate::error::AppError;

    #[tokio::test]
    async fn test_save_profile_merges_fields() {
        let (state, _api) = create_test_state();

        save_profile(
            &state,
            ProfileUpdate {
                display_name: Some("Lee".to_string()),
                bio: Some("Soup person".to_string()),
                ..ProfileUpdate::default()
            },
        )
        .await
        .unwrap();

        let profile = save_profile(
            &state,
            ProfileUpdate {
                selected_avatar: Some(1),
                ..ProfileUpdate::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(profile.display_name, "Lee");
        assert_eq!(profile.bio, "Soup person");
        assert_eq!(profile.selected_avatar, 1);
        assert_eq!(load_profile(&state).await, profile);
    }

    #[tokio::test]
    async fn test_save_profile_rejects_bad_avatar() {
        let (state, _api) = create_test_state();

        let result = save_profile(
            &state,
            ProfileUpdate {
                selected_avatar: Some(99),
                ..ProfileUpdate::default()
            },
        )
        .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(load_profile(&state).await, UserProfile::default());
    }

    #[tokio::test]
    async fn test_reset_quota() {
        let (state, _api) = create_test_state();
        state.quota.increment_count().await;
        state.quota.increment_count().await;
        assert_eq!(quota_status(&state).await.used, 2);

        let status = reset_quota(&state).await.unwrap();

        assert_eq!(status.used, 0);
        assert_eq!(status.remaining, status.limit);
    }
}
