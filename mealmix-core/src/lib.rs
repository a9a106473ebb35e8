pub mod app;
pub mod config;
pub mod error;
pub mod http;
pub mod ingredients;
pub mod mealdb;
pub mod remix;
pub mod store;
pub mod types;
pub mod view;

pub use app::App;
pub use config::{Config, ConfigError, RemixConfig};
pub use error::{FetchError, HttpError, RemixError};
pub use http::{HttpClient, HttpResponse, MockClient, RecordedRequest, ReqwestClient};
pub use mealdb::MealDb;
pub use remix::Remixer;
pub use store::{SaveOutcome, SavedRecipes, StoreError};
pub use types::{MealsEnvelope, Recipe};
pub use view::{
    RecipeAction, RecipeView, RegionState, RemixView, SavedAction, SavedRow, SavedView, Update,
};
