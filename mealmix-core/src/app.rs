//! Application state and the operations that drive the display.
//!
//! [`App`] owns the current recipe and a per-region request sequence.
//! Operations lock the state only to issue a ticket or to apply a result,
//! never across a network call. A response may update its region only
//! while its ticket matches the latest issued sequence number; anything
//! staler is dropped, so a slow early fetch cannot overwrite a newer one.

use tokio::sync::{mpsc, Mutex};

use crate::mealdb::MealDb;
use crate::remix::Remixer;
use crate::store::{SaveOutcome, SavedRecipes};
use crate::types::Recipe;
use crate::view::{self, RecipeView, RegionState, RemixView, SavedView, Update};

#[derive(Default)]
struct AppState {
    current: Option<Recipe>,
    recipe_seq: u64,
    remix_seq: u64,
}

/// The application core. Frontends call operations and render the
/// [`Update`] stream; nothing here performs output itself.
///
/// Remixing and saving are optional features: constructed without a
/// remixer or a store, the corresponding operations report the feature
/// as unavailable instead of failing.
pub struct App {
    mealdb: MealDb,
    remixer: Option<Remixer>,
    saved: Option<Mutex<SavedRecipes>>,
    state: Mutex<AppState>,
    updates: mpsc::UnboundedSender<Update>,
}

impl App {
    /// Create an app and the receiving end of its update stream.
    pub fn new(
        mealdb: MealDb,
        remixer: Option<Remixer>,
        saved: Option<SavedRecipes>,
    ) -> (Self, mpsc::UnboundedReceiver<Update>) {
        let (updates, rx) = mpsc::unbounded_channel();
        let app = Self {
            mealdb,
            remixer,
            saved: saved.map(Mutex::new),
            state: Mutex::new(AppState::default()),
            updates,
        };
        (app, rx)
    }

    pub fn remix_enabled(&self) -> bool {
        self.remixer.is_some()
    }

    pub fn saving_enabled(&self) -> bool {
        self.saved.is_some()
    }

    /// Name of the recipe currently held as state, if any.
    pub async fn current_recipe_name(&self) -> Option<String> {
        let state = self.state.lock().await;
        state.current.as_ref().map(|r| r.name.clone())
    }

    /// Fetch a random recipe and show it.
    pub async fn show_random(&self) {
        let ticket = self.begin_recipe_load().await;
        let result = self.mealdb.random().await;

        let mut state = self.state.lock().await;
        if state.recipe_seq != ticket {
            tracing::debug!(ticket, latest = state.recipe_seq, "dropping stale random-recipe response");
            return;
        }
        match result {
            Ok(recipe) => self.render(&mut state, recipe),
            Err(e) => {
                tracing::warn!(error = %e, "random recipe fetch failed");
                self.send(Update::Recipe(RegionState::Failed(
                    view::LOAD_FAILED.to_string(),
                )));
            }
        }
    }

    /// Look up a recipe by name and show the first match. The current
    /// recipe is left untouched when nothing matches or the lookup fails.
    pub async fn show_named(&self, name: &str) {
        let ticket = self.begin_recipe_load().await;
        let result = self.mealdb.search_first(name).await;

        let mut state = self.state.lock().await;
        if state.recipe_seq != ticket {
            tracing::debug!(ticket, latest = state.recipe_seq, "dropping stale lookup response");
            return;
        }
        match result {
            Ok(Some(recipe)) => self.render(&mut state, recipe),
            Ok(None) => self.send(Update::Recipe(RegionState::Failed(
                view::LOOKUP_NOT_FOUND.to_string(),
            ))),
            Err(e) => {
                tracing::warn!(name, error = %e, "recipe lookup failed");
                self.send(Update::Recipe(RegionState::Failed(
                    view::LOOKUP_FAILED.to_string(),
                )));
            }
        }
    }

    /// Remix the current recipe around `theme`.
    ///
    /// Requires a configured remixer and a current recipe; either missing
    /// puts a message in the remix region without any network call.
    pub async fn remix_current(&self, theme: &str) {
        let Some(remixer) = &self.remixer else {
            self.send(Update::Remix(RegionState::Failed(
                view::REMIX_UNAVAILABLE.to_string(),
            )));
            return;
        };

        let (ticket, recipe) = {
            let mut state = self.state.lock().await;
            let Some(recipe) = state.current.clone() else {
                self.send(Update::Remix(RegionState::Failed(
                    view::REMIX_NEEDS_RECIPE.to_string(),
                )));
                return;
            };
            state.remix_seq += 1;
            self.send(Update::Remix(RegionState::Loading(view::REMIX_IN_PROGRESS)));
            (state.remix_seq, recipe)
        };

        let result = remixer.remix(&recipe, theme).await;

        let state = self.state.lock().await;
        if state.remix_seq != ticket {
            tracing::debug!(ticket, latest = state.remix_seq, "dropping stale remix response");
            return;
        }
        match result {
            Ok(content) => self.send(Update::Remix(RegionState::Ready(RemixView::new(
                theme, &content,
            )))),
            Err(e) => {
                tracing::warn!(theme, error = %e, "remix failed");
                self.send(Update::Remix(RegionState::Failed(format!(
                    "{}\nError: {}",
                    view::REMIX_FAILED,
                    e
                ))));
            }
        }
    }

    /// Save the current recipe's name. Adding is idempotent; feedback
    /// arrives as a notice, and the saved list is refreshed on change.
    pub async fn save_current(&self) {
        let Some(saved) = &self.saved else {
            tracing::debug!("saving is disabled");
            return;
        };

        let name = {
            let state = self.state.lock().await;
            match &state.current {
                Some(recipe) => recipe.name.clone(),
                None => {
                    self.send(Update::Notice(view::SAVE_NEEDS_RECIPE.to_string()));
                    return;
                }
            }
        };

        let mut store = saved.lock().await;
        match store.add(&name) {
            Ok(SaveOutcome::Added) => {
                self.send(Update::Notice(view::RECIPE_SAVED.to_string()));
                self.send(Update::Saved(SavedView::new(store.names())));
            }
            Ok(SaveOutcome::AlreadySaved) => {
                self.send(Update::Notice(view::ALREADY_SAVED.to_string()));
            }
            Err(e) => {
                tracing::warn!(name, error = %e, "failed to persist saved recipes");
                self.send(Update::Notice(view::SAVE_FAILED.to_string()));
            }
        }
    }

    /// Remove a name from the saved list and refresh the view.
    pub async fn remove_saved(&self, name: &str) {
        let Some(saved) = &self.saved else {
            return;
        };
        let mut store = saved.lock().await;
        match store.remove(name) {
            Ok(_) => self.send(Update::Saved(SavedView::new(store.names()))),
            Err(e) => {
                tracing::warn!(name, error = %e, "failed to update saved recipes");
                self.send(Update::Notice(view::SAVED_UPDATE_FAILED.to_string()));
            }
        }
    }

    /// Emit the saved list as it currently stands.
    pub async fn refresh_saved(&self) {
        if let Some(saved) = &self.saved {
            let store = saved.lock().await;
            self.send(Update::Saved(SavedView::new(store.names())));
        }
    }

    /// Issue a new recipe-region ticket and announce loading. Holding the
    /// lock while sending keeps tickets and updates in the same order.
    async fn begin_recipe_load(&self) -> u64 {
        let mut state = self.state.lock().await;
        state.recipe_seq += 1;
        self.send(Update::Recipe(RegionState::Loading(view::LOADING)));
        state.recipe_seq
    }

    /// The single writer of the current recipe.
    fn render(&self, state: &mut AppState, recipe: Recipe) {
        let recipe_view = RecipeView::new(&recipe, self.saving_enabled());
        state.current = Some(recipe);
        self.send(Update::Recipe(RegionState::Ready(recipe_view)));
    }

    fn send(&self, update: Update) {
        // A closed receiver just means the frontend has shut down.
        let _ = self.updates.send(update);
    }
}
