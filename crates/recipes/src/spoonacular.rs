//! HTTP client for a Spoonacular-compatible recipe service.

use std::time::Duration;

use reqwest::{Client, Response};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::error::{RecipeError, Result};
use crate::traits::RecipeApi;
use crate::types::{RecipeId, RecipeInformation, RecipeMatch};

/// Default public endpoint of the recipe service.
pub const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com/recipes";

/// Recipe service client.
///
/// Every request carries the API key as the `apiKey` query parameter.
#[derive(Debug, Clone)]
pub struct SpoonacularClient {
    client: Client,
    base_url: String,
    api_key: String,
    ignore_pantry: bool,
}

impl SpoonacularClient {
    /// Create a client against `base_url` (see [`DEFAULT_BASE_URL`]).
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            ignore_pantry: true,
        })
    }

    /// Whether the service should ignore pantry staples (water, salt, flour...)
    /// when scoring matches (default: true)
    pub fn with_ignore_pantry(mut self, ignore_pantry: bool) -> Self {
        self.ignore_pantry = ignore_pantry;
        self
    }

    async fn read_json(response: Response, what: &str) -> Result<Value> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            error!("Recipe service sent malformed JSON for {}: {}", what, e);
            RecipeError::InvalidResponse(format!("{what}: {e}"))
        })
    }
}

/// Turn the match-phase body into matches.
///
/// Anything other than a JSON array (the service reports quota and auth
/// problems as an object) means no matches. Individual entries that are not
/// recipe objects are dropped.
pub fn matches_from_value(body: Value) -> Vec<RecipeMatch> {
    let items = match body {
        Value::Array(items) => items,
        other => {
            warn!("Match response is not a list: {}", other);
            return Vec::new();
        }
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<RecipeMatch>(item) {
            Ok(m) => Some(m),
            Err(e) => {
                warn!("Skipping unreadable recipe match: {}", e);
                None
            }
        })
        .collect()
}

impl RecipeApi for SpoonacularClient {
    async fn find_by_ingredients(
        &self,
        ingredients: &[String],
        number: usize,
    ) -> Result<Vec<RecipeMatch>> {
        let url = format!("{}/findByIngredients", self.base_url);
        let joined = ingredients.join(",");
        let number = number.to_string();
        let ignore_pantry = self.ignore_pantry.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("apiKey", self.api_key.as_str()),
                ("ingredients", joined.as_str()),
                ("number", number.as_str()),
                ("ignorePantry", ignore_pantry.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = Self::read_json(response, "findByIngredients").await?;
        if !status.is_success() {
            warn!("findByIngredients returned {}: {}", status, body);
            return Ok(Vec::new());
        }

        let matches = matches_from_value(body);
        debug!("findByIngredients({}) -> {} matches", joined, matches.len());
        Ok(matches)
    }

    async fn information(&self, id: &RecipeId) -> Result<RecipeInformation> {
        let url = format!("{}/{}/information", self.base_url, id);
        let response = self
            .client
            .get(&url)
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RecipeError::Status {
                status: status.as_u16(),
                what: format!("recipe {id} information"),
            });
        }

        let body = Self::read_json(response, "information").await?;
        serde_json::from_value(body).map_err(|e| RecipeError::InvalidResponse(e.to_string()))
    }
}
