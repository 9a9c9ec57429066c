//! Bookmarks service
//!
//! Saved recipes, unique by id, persisted as one JSON array.
//! Every mutation rewrites the whole collection.

use crate::config::BOOKMARKS_KEY;
use crate::error::Result;
use crate::models::RecipeSummary;
use crate::storage::KeyValueStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct BookmarkStore {
    store: Arc<dyn KeyValueStore>,
}

impl BookmarkStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Saved recipes in stored order; empty when nothing readable is stored
    pub async fn list(&self) -> Vec<RecipeSummary> {
        let raw = match self.store.get(BOOKMARKS_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::error!("Error getting bookmarks: {}", e);
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!("Stored bookmarks are unreadable, ignoring them: {}", e);
            Vec::new()
        })
    }

    /// Save a recipe unless one with the same id is already saved
    pub async fn add(&self, recipe: RecipeSummary) -> Result<()> {
        let mut bookmarks = self.list().await;

        // Keep the first copy saved
        if bookmarks.iter().any(|b| b.id == recipe.id) {
            tracing::debug!("Recipe {} already bookmarked", recipe.id);
            return Ok(());
        }

        tracing::info!("Bookmarking recipe {}: {}", recipe.id, recipe.title);
        bookmarks.push(recipe);
        self.persist(&bookmarks).await
    }

    /// Drop every saved entry with this id; absent ids are not an error
    pub async fn remove(&self, recipe_id: i64) -> Result<()> {
        let mut bookmarks = self.list().await;
        bookmarks.retain(|b| b.id != recipe_id);

        tracing::info!("Removing bookmark {}", recipe_id);
        self.persist(&bookmarks).await
    }

    pub async fn contains(&self, recipe_id: i64) -> bool {
        self.list().await.iter().any(|b| b.id == recipe_id)
    }

    /// Add when absent, remove when present. Returns the new bookmarked state.
    pub async fn toggle(&self, recipe: RecipeSummary) -> Result<bool> {
        if self.contains(recipe.id).await {
            self.remove(recipe.id).await?;
            Ok(false)
        } else {
            self.add(recipe).await?;
            Ok(true)
        }
    }

    async fn persist(&self, bookmarks: &[RecipeSummary]) -> Result<()> {
        let json = serde_json::to_string(bookmarks)?;
        self.store.set(BOOKMARKS_KEY, &json).await.map_err(|e| {
            tracing::error!("Error saving bookmarks: {}", e);
            e
        })
    }
}
