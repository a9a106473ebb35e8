//! Ingredient extraction from TheMealDB's slot columns.
//!
//! Records carry twenty positional ingredient/measure column pairs rather
//! than a list. Extraction walks the slots in order and keeps only those
//! with a non-blank ingredient name.

use crate::types::Recipe;

/// Number of ingredient/measure column pairs in a TheMealDB record.
pub const SLOT_COUNT: usize = 20;

/// Display lines for a recipe's ingredients, in slot order.
///
/// Each line is `"{measure} {ingredient}"` with both parts trimmed; when
/// the measure is blank the line is the ingredient alone. Slots whose
/// ingredient is empty, whitespace, or absent are skipped, including gaps
/// in the middle of the slot range.
pub fn ingredient_lines(recipe: &Recipe) -> Vec<String> {
    let mut lines = Vec::new();
    for slot in 1..=SLOT_COUNT {
        let Some(ingredient) = recipe.ingredient(slot) else {
            continue;
        };
        let ingredient = ingredient.trim();
        if ingredient.is_empty() {
            continue;
        }
        let measure = recipe.measure(slot).unwrap_or_default().trim();
        if measure.is_empty() {
            lines.push(ingredient.to_string());
        } else {
            lines.push(format!("{measure} {ingredient}"));
        }
    }
    lines
}

/// Ingredient lines joined with `", "`, as fed to the remix prompt.
pub fn ingredients_text(recipe: &Recipe) -> String {
    ingredient_lines(recipe).join(", ")
}
