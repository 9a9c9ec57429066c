//! Recipe search and detail flows
//!
//! Both check the daily quota before touching the network and record
//! one request only after the call succeeds.

use crate::app::AppState;
use crate::config::is_known_cuisine;
use crate::error::{AppError, Result};
use crate::models::{RecipeDetail, RecipeSummary};
use serde::Serialize;

/// A recipe detail together with its bookmark state
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeView {
    pub detail: RecipeDetail,
    pub is_bookmarked: bool,
}

async fn ensure_quota(state: &AppState) -> Result<()> {
    if !state.quota.can_make_request().await {
        tracing::warn!("Daily request limit reached");
        return Err(AppError::QuotaExceeded {
            limit: state.quota.limit(),
        });
    }
    Ok(())
}

/// Search recipes by ingredients and cuisine
pub async fn search_recipes(
    state: &AppState,
    ingredients: &str,
    cuisine: &str,
) -> Result<Vec<RecipeSummary>> {
    if ingredients.trim().is_empty() {
        return Err(AppError::EmptyIngredients);
    }

    if !is_known_cuisine(cuisine) {
        return Err(AppError::Validation(format!("Unknown cuisine: {}", cuisine)));
    }

    let api = state.api()?;
    ensure_quota(state).await?;

    let results = api.search(ingredients, cuisine).await.map_err(|e| {
        tracing::error!("Recipe search error: {}", e);
        e
    })?;

    state.quota.increment_count().await;

    Ok(results)
}

/// Fetch one recipe's full information
pub async fn recipe_detail(state: &AppState, recipe_id: i64) -> Result<RecipeView> {
    let api = state.api()?;
    ensure_quota(state).await?;

    let detail = api.get_detail(recipe_id).await.map_err(|e| {
        tracing::error!("Recipe detail error for {}: {}", recipe_id, e);
        e
    })?;

    state.quota.increment_count().await;

    let is_bookmarked = state.bookmarks.contains(recipe_id).await;

    Ok(RecipeView {
        detail,
        is_bookmarked,
    })
}
