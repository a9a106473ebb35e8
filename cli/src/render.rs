//! Terminal rendering of app updates.

use mealmix_core::view::{
    RecipeAction, RecipeView, RegionState, RemixView, SavedAction, SavedView, Update,
};

pub fn render(update: &Update) {
    match update {
        Update::Recipe(state) => render_recipe_region(state),
        Update::Remix(state) => render_remix_region(state),
        Update::Saved(saved) => render_saved(saved),
        Update::Notice(text) => println!("\n*** {text}"),
    }
}

fn render_recipe_region(state: &RegionState<RecipeView>) {
    match state {
        RegionState::Idle => {}
        RegionState::Loading(message) => println!("\n{message}"),
        RegionState::Ready(recipe) => render_recipe(recipe),
        RegionState::Failed(message) => println!("\n{message}"),
    }
}

fn render_recipe(recipe: &RecipeView) {
    println!("\n=== {} ===", recipe.title);
    if !recipe.image_url.is_empty() {
        println!("[image] {}", recipe.image_url);
    }
    println!("\nIngredients:");
    for line in &recipe.ingredients {
        println!("  - {line}");
    }
    println!("\nInstructions:");
    for line in &recipe.instruction_lines {
        println!("  {line}");
    }
    if recipe.actions.contains(&RecipeAction::Save) {
        println!("\n(Type 'save' to keep this recipe.)");
    }
}

fn render_remix_region(state: &RegionState<RemixView>) {
    match state {
        RegionState::Idle => {}
        RegionState::Loading(message) => println!("\n{message}"),
        RegionState::Ready(remix) => {
            println!("\n{}", remix.heading);
            for line in &remix.lines {
                println!("  {line}");
            }
        }
        RegionState::Failed(message) => println!("\n{message}"),
    }
}

fn render_saved(saved: &SavedView) {
    // An empty list hides the section entirely.
    if saved.is_empty() {
        return;
    }
    println!("\nSaved recipes:");
    for row in &saved.rows {
        println!("  - {}", row.name);
    }
    if let Some(row) = saved.rows.first() {
        let commands: Vec<String> = row
            .actions
            .iter()
            .map(|action| format!("{} <name>", action_word(*action)))
            .collect();
        println!("({} available)", commands.join(", "));
    }
}

fn action_word(action: SavedAction) -> &'static str {
    match action {
        SavedAction::View => "view",
        SavedAction::Delete => "delete",
    }
}

pub fn print_themes(themes: &[&str]) {
    println!("\nRemix themes:");
    for (i, theme) in themes.iter().enumerate() {
        println!("  {}. {theme}", i + 1);
    }
}

pub fn print_help() {
    println!("\nCommands:");
    println!("  random (r)      Show a new random recipe");
    println!("  remix [theme]   Remix the current recipe, with the selected theme unless given one");
    println!("  theme <n>       Select a remix theme by number, or set your own text");
    println!("  themes          List the built-in remix themes");
    println!("  save            Save the current recipe's name");
    println!("  list            Show saved recipes");
    println!("  view <name>     Look up a saved recipe by name");
    println!("  delete <name>   Remove a name from the saved list");
    println!("  quit (q)        Exit");
}
