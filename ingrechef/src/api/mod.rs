//! Recipe API
//!
//! A thin client for the external recipe search and detail endpoints.
//! The trait is the seam the flows depend on, so tests can substitute a fake.

pub mod spoonacular;

pub use spoonacular::{SpoonacularClient, SpoonacularClientBuilder};

use crate::error::Result;
use crate::models::{RecipeDetail, RecipeSummary};
use async_trait::async_trait;

#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// Recipes that use the given ingredients, optionally limited to a cuisine.
    /// `ingredients_text` is free text separated by commas or newlines.
    async fn search(&self, ingredients_text: &str, cuisine: &str) -> Result<Vec<RecipeSummary>>;

    /// Full information for one recipe
    async fn get_detail(&self, recipe_id: i64) -> Result<RecipeDetail>;
}

/// Split free-text ingredients on commas and newlines, trimming each token
/// and dropping empty ones.
pub fn parse_ingredients(text: &str) -> Vec<String> {
    text.split([',', '\n'])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ingredients() {
        assert_eq!(
            parse_ingredients("chicken, rice,\ntomatoes"),
            vec!["chicken", "rice", "tomatoes"]
        );
    }

    #[test]
    fn test_parse_ingredients_drops_empty_tokens() {
        assert_eq!(parse_ingredients(" ,\n\n, egg ,,"), vec!["egg"]);
        assert!(parse_ingredients("  \n ").is_empty());
    }

    #[test]
    fn test_parse_ingredients_keeps_inner_spaces() {
        assert_eq!(
            parse_ingredients("olive oil\r\nsea salt"),
            vec!["olive oil", "sea salt"]
        );
    }
}
