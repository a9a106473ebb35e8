//! Declarative view-models for the three display regions.
//!
//! The core never renders anything itself. Operations emit [`Update`]
//! values describing what a region should show, and a frontend (the CLI,
//! or anything else) turns them into output. Action identifiers on the
//! views tell the frontend which operations are available, keeping data
//! shaping separate from presentation.

use crate::ingredients;
use crate::types::Recipe;

pub const LOADING: &str = "Loading...";
pub const LOAD_FAILED: &str = "Sorry, couldn't load a recipe.";
pub const LOOKUP_NOT_FOUND: &str = "Sorry, couldn't find that recipe.";
pub const LOOKUP_FAILED: &str = "Sorry, couldn't load that recipe.";
pub const REMIX_IN_PROGRESS: &str = "🎨 Creating your remix masterpiece...";
pub const REMIX_NEEDS_RECIPE: &str = "Please load a recipe first before remixing!";
pub const REMIX_FAILED: &str =
    "Oops! Something went wrong while creating your remix. Please try again!";
pub const REMIX_UNAVAILABLE: &str = "Remixing is unavailable (no OpenAI API key configured).";
pub const SAVE_NEEDS_RECIPE: &str = "Please load a recipe first before saving!";
pub const RECIPE_SAVED: &str = "Recipe saved!";
pub const ALREADY_SAVED: &str = "Recipe already saved!";
pub const SAVE_FAILED: &str = "Sorry, couldn't save that recipe.";
pub const SAVED_UPDATE_FAILED: &str = "Sorry, couldn't update saved recipes.";

/// Lifecycle of one display region.
///
/// Every fetch forces the region to `Loading` regardless of what it
/// showed before; the region then settles on `Ready` or `Failed`.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionState<V> {
    Idle,
    Loading(&'static str),
    Ready(V),
    Failed(String),
}

/// Actions a frontend may offer on the current recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeAction {
    Save,
}

/// Actions a frontend may offer on a saved-recipe row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavedAction {
    View,
    Delete,
}

/// Renderable form of a recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeView {
    pub title: String,
    pub image_url: String,
    pub ingredients: Vec<String>,
    pub instruction_lines: Vec<String>,
    pub actions: Vec<RecipeAction>,
}

impl RecipeView {
    pub fn new(recipe: &Recipe, saving_enabled: bool) -> Self {
        Self {
            title: recipe.name.clone(),
            image_url: recipe.thumbnail().to_string(),
            ingredients: ingredients::ingredient_lines(recipe),
            instruction_lines: split_lines(recipe.instructions()),
            actions: if saving_enabled {
                vec![RecipeAction::Save]
            } else {
                Vec::new()
            },
        }
    }
}

/// Renderable form of a completed remix.
#[derive(Debug, Clone, PartialEq)]
pub struct RemixView {
    pub heading: String,
    pub lines: Vec<String>,
}

impl RemixView {
    pub fn new(theme: &str, content: &str) -> Self {
        Self {
            heading: format!("🎨 Your Remixed Recipe: {theme}"),
            lines: split_lines(content),
        }
    }
}

/// One row of the saved-recipes list.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedRow {
    pub name: String,
    pub actions: Vec<SavedAction>,
}

/// The saved-recipes region. Frontends hide the section when empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedView {
    pub rows: Vec<SavedRow>,
}

impl SavedView {
    pub fn new(names: &[String]) -> Self {
        let rows = names
            .iter()
            .map(|name| SavedRow {
                name: name.clone(),
                actions: vec![SavedAction::View, SavedAction::Delete],
            })
            .collect();
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A single change to the display, emitted by app operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    Recipe(RegionState<RecipeView>),
    Remix(RegionState<RemixView>),
    Saved(SavedView),
    /// An interrupting notice outside any region, e.g. save feedback.
    Notice(String),
}

/// Split display text into lines, dropping carriage returns and any
/// trailing blank lines. Interior blank lines survive so paragraph
/// breaks are preserved.
pub fn split_lines(text: &str) -> Vec<String> {
    let trimmed = text.trim_end();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed
        .split('\n')
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect()
}
