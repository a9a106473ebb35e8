//! Themed recipe remixing through an OpenAI-compatible chat API.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;

use crate::error::RemixError;
use crate::http::HttpClient;
use crate::ingredients;
use crate::types::Recipe;

/// Persona and constraints sent as the system message on every request.
pub const SYSTEM_PROMPT: &str = "You are a creative chef who loves to remix recipes. Give short, fun, creative, and totally doable recipe remixes. Highlight any changed ingredients or cooking instructions. Keep responses under 300 words.";

pub const MAX_TOKENS: u32 = 400;
pub const TEMPERATURE: f64 = 0.8;

/// Calls the chat-completions endpoint to rewrite a recipe around a theme.
pub struct Remixer {
    http: Arc<dyn HttpClient>,
    base_url: String,
    api_key: String,
    model: String,
}

/// Chat completion response format (only the fields we read).
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl Remixer {
    pub fn new(
        http: Arc<dyn HttpClient>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Produce a themed rewrite of `recipe` and return the completion text.
    pub async fn remix(&self, recipe: &Recipe, theme: &str) -> Result<String, RemixError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": build_user_prompt(recipe, theme)},
            ],
            "max_tokens": MAX_TOKENS,
            "temperature": TEMPERATURE,
        });

        tracing::debug!(model = %self.model, theme, "requesting remix");
        let response = self.http.post_json(&url, Some(&self.api_key), body).await?;
        if !response.is_success() {
            return Err(RemixError::Api(response.status));
        }

        let parsed: ChatResponse = serde_json::from_str(&response.body)
            .map_err(|e| RemixError::Malformed(e.to_string()))?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| RemixError::Malformed("no completion text in response".to_string()))
    }
}

/// Flattened text form of a recipe as fed to the model.
pub fn recipe_text(recipe: &Recipe) -> String {
    format!(
        "Recipe: {}\nIngredients: {}\nInstructions: {}",
        recipe.name,
        ingredients::ingredients_text(recipe),
        recipe.instructions()
    )
}

/// The user message combining the theme with the recipe text.
pub fn build_user_prompt(recipe: &Recipe, theme: &str) -> String {
    format!(
        "Please remix this recipe with the theme: \"{theme}\"\n\n{}",
        recipe_text(recipe)
    )
}
