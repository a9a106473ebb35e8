//! Client for TheMealDB's free JSON API.

use std::sync::Arc;

use crate::error::{FetchError, HttpError};
use crate::http::HttpClient;
use crate::types::{MealsEnvelope, Recipe};

/// Fetches recipes from a TheMealDB-compatible endpoint.
///
/// The upstream serves errors as JSON bodies too, so the HTTP status is
/// not consulted; any body that fails to parse surfaces as
/// [`FetchError::Malformed`].
pub struct MealDb {
    http: Arc<dyn HttpClient>,
    base_url: String,
}

impl MealDb {
    pub fn new(http: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fetch one random recipe.
    pub async fn random(&self) -> Result<Recipe, FetchError> {
        let url = format!("{}/random.php", self.base_url);
        tracing::debug!(url = %url, "fetching random recipe");
        let response = self.http.get(&url).await?;
        first_meal(&response.body)?.ok_or(FetchError::EmptyResult)
    }

    /// Search by name and return the first match, or `None` when the
    /// search comes back empty. Extra matches are dropped.
    pub async fn search_first(&self, name: &str) -> Result<Option<Recipe>, FetchError> {
        let url =
            reqwest::Url::parse_with_params(&format!("{}/search.php", self.base_url), [("s", name)])
                .map_err(|e| HttpError::InvalidUrl(e.to_string()))?;
        tracing::debug!(url = %url, "searching recipes by name");
        let response = self.http.get(url.as_str()).await?;
        let found = first_meal(&response.body)?;
        Ok(found)
    }
}

fn first_meal(body: &str) -> Result<Option<Recipe>, FetchError> {
    let envelope: MealsEnvelope =
        serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))?;
    let mut meals = envelope.meals.unwrap_or_default();
    if meals.len() > 1 {
        tracing::debug!(matches = meals.len(), "multiple matches, taking the first");
    }
    if meals.is_empty() {
        Ok(None)
    } else {
        Ok(Some(meals.remove(0)))
    }
}
