//! Bookmark flows

use crate::app::AppState;
use crate::error::Result;
use crate::models::RecipeSummary;

/// All saved recipes
pub async fn list_bookmarks(state: &AppState) -> Vec<RecipeSummary> {
    state.bookmarks.list().await
}

/// Save or unsave a recipe. Returns whether it is bookmarked afterwards.
pub async fn toggle_bookmark(state: &AppState, recipe: RecipeSummary) -> Result<bool> {
    state.bookmarks.toggle(recipe).await.map_err(|e| {
        tracing::error!("Bookmark error: {}", e);
        e
    })
}

pub async fn remove_bookmark(state: &AppState, recipe_id: i64) -> Result<()> {
    state.bookmarks.remove(recipe_id).await
}

/// Look up a saved recipe by id without touching the network
pub async fn find_bookmark(state: &AppState, recipe_id: i64) -> Option<RecipeSummary> {
    state
        .bookmarks
        .list()
        .await
        .into_iter()
        .find(|r| r.id == recipe_id)
}
