//! Runtime configuration from environment variables.

use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Default TheMealDB base URL (the free v1 developer key).
pub const DEFAULT_MEALDB_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// Default OpenAI-compatible base URL for remixing.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Default remix model.
pub const DEFAULT_MODEL: &str = "gpt-4o";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
}

/// Remix API configuration. Absent from [`Config`] when no API key is
/// set, in which case remixing is disabled.
#[derive(Debug, Clone)]
pub struct RemixConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl RemixConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `OPENAI_API_KEY`: API key for the remix endpoint
    ///
    /// Optional:
    /// - `MEALMIX_MODEL`: Model name (default: "gpt-4o")
    /// - `MEALMIX_OPENAI_BASE_URL`: API base URL (default: "https://api.openai.com/v1")
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()))?;

        let model = env::var("MEALMIX_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let base_url = env::var("MEALMIX_OPENAI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string());

        Ok(Self {
            api_key,
            model,
            base_url,
        })
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the recipe API.
    pub mealdb_base_url: String,
    /// Remix settings, when an API key is configured.
    pub remix: Option<RemixConfig>,
    /// Directory holding the saved-recipes file.
    pub data_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `MEALMIX_MEALDB_BASE_URL`: Recipe API base URL
    /// - `MEALMIX_DATA_DIR`: Data directory (default: "~/.mealmix")
    /// - plus everything [`RemixConfig::from_env`] reads
    pub fn from_env() -> Self {
        let mealdb_base_url = env::var("MEALMIX_MEALDB_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_MEALDB_BASE_URL.to_string());

        let remix = RemixConfig::from_env().ok();

        let data_dir = env::var("MEALMIX_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::default_data_dir());

        Self {
            mealdb_base_url,
            remix,
            data_dir,
        }
    }

    /// Get the default data directory: ~/.mealmix
    pub fn default_data_dir() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".mealmix"))
            .unwrap_or_else(|| PathBuf::from("data"))
    }

    /// Path of the saved-recipes file inside the data directory.
    pub fn saved_recipes_path(&self) -> PathBuf {
        self.data_dir.join("saved_recipes.json")
    }
}
