//! Spoonacular client
//!
//! One GET per call, no retries. A non-success status becomes
//! `AppError::Api` carrying the status and response body.

use super::{parse_ingredients, RecipeApi};
use crate::config::{
    DEFAULT_API_BASE_URL, HTTP_TIMEOUT, INGREDIENT_CONNECTOR, SEARCH_RESULT_COUNT, USER_AGENT,
};
use crate::error::{AppError, Result};
use crate::models::{RecipeDetail, RecipeSummary};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Search endpoint response; only `results` is used
#[derive(Deserialize, Debug)]
struct SearchResponse {
    #[serde(default)]
    results: Option<Vec<RecipeSummary>>,
}

/// Configuration for SpoonacularClient.
#[derive(Clone)]
pub struct SpoonacularClientBuilder {
    api_key: String,
    base_url: String,
    timeout: Duration,
    user_agent: String,
}

impl SpoonacularClientBuilder {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: HTTP_TIMEOUT,
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// Point the client at another host, e.g. a local mock server.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn build(self) -> Result<SpoonacularClient> {
        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .build()?;

        Ok(SpoonacularClient {
            http,
            api_key: self.api_key,
            base_url: self.base_url.trim_end_matches('/').to_string(),
        })
    }
}

/// Production client for the Spoonacular recipes API
#[derive(Clone)]
pub struct SpoonacularClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl SpoonacularClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        SpoonacularClientBuilder::new(api_key).build()
    }

    pub fn builder(api_key: impl Into<String>) -> SpoonacularClientBuilder {
        SpoonacularClientBuilder::new(api_key)
    }

    /// Query parameters for a search, in request order
    fn search_params(&self, ingredients_text: &str, cuisine: &str) -> Vec<(&'static str, String)> {
        let include_ingredients = parse_ingredients(ingredients_text).join(INGREDIENT_CONNECTOR);

        let mut params = vec![
            ("apiKey", self.api_key.clone()),
            ("includeIngredients", include_ingredients),
            ("number", SEARCH_RESULT_COUNT.to_string()),
            ("instructionsRequired", "true".to_string()),
            ("addRecipeInformation", "true".to_string()),
            ("fillIngredients", "true".to_string()),
        ];

        if !cuisine.is_empty() {
            params.push(("cuisine", cuisine.to_string()));
        }

        params
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&'static str, String)],
    ) -> Result<T> {
        let response = self.http.get(url).query(params).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("API error: {} {}", status, body);
            return Err(AppError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl RecipeApi for SpoonacularClient {
    async fn search(&self, ingredients_text: &str, cuisine: &str) -> Result<Vec<RecipeSummary>> {
        let url = format!("{}/complexSearch", self.base_url);
        let params = self.search_params(ingredients_text, cuisine);

        tracing::info!(cuisine, "Searching recipes for {:?}", ingredients_text);

        let response: SearchResponse = self.get_json(&url, &params).await?;
        let results = response.results.unwrap_or_default();

        tracing::debug!("Search returned {} recipes", results.len());
        Ok(results)
    }

    async fn get_detail(&self, recipe_id: i64) -> Result<RecipeDetail> {
        let url = format!("{}/{}/information", self.base_url, recipe_id);
        let params = [
            ("apiKey", self.api_key.clone()),
            ("includeNutrition", "false".to_string()),
        ];

        tracing::info!("Fetching recipe {}", recipe_id);
        self.get_json(&url, &params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(params: &'a [(&'static str, String)], name: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_search_params() {
        let client = SpoonacularClient::new("secret").unwrap();

        let params = client.search_params("chicken, rice,\ntomatoes", "thai");

        assert_eq!(param(&params, "apiKey"), Some("secret"));
        assert_eq!(
            param(&params, "includeIngredients"),
            Some("chicken,+rice,+tomatoes")
        );
        assert_eq!(param(&params, "number"), Some("10"));
        assert_eq!(param(&params, "instructionsRequired"), Some("true"));
        assert_eq!(param(&params, "addRecipeInformation"), Some("true"));
        assert_eq!(param(&params, "fillIngredients"), Some("true"));
        assert_eq!(param(&params, "cuisine"), Some("thai"));
    }

    #[test]
    fn test_search_params_without_cuisine() {
        let client = SpoonacularClient::new("secret").unwrap();

        let params = client.search_params("egg", "");

        assert_eq!(param(&params, "cuisine"), None);
        assert_eq!(params.len(), 6);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = SpoonacularClient::builder("k")
            .base_url("http://localhost:9999/recipes/")
            .build()
            .unwrap();

        assert_eq!(client.base_url, "http://localhost:9999/recipes");
    }

    #[test]
    fn test_search_response_without_results() {
        let response: SearchResponse = serde_json::from_str(r#"{"offset": 0}"#).unwrap();
        assert!(response.results.unwrap_or_default().is_empty());

        let response: SearchResponse = serde_json::from_str(r#"{"results": null}"#).unwrap();
        assert!(response.results.is_none());
    }
}
