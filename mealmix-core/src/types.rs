use serde::Deserialize;
use std::collections::BTreeMap;

/// A recipe as TheMealDB returns it.
///
/// Only the name is a required column. Everything else, including the 20
/// numbered `strIngredientN`/`strMeasureN` slot pairs, lands in the
/// flattened `fields` map and is reached through accessors, because the
/// API pads absent columns with explicit `null`s. Slot pairing is
/// positional: the measure in slot `i` belongs to the ingredient in
/// slot `i`.
#[derive(Debug, Clone, Deserialize)]
pub struct Recipe {
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(flatten)]
    fields: BTreeMap<String, serde_json::Value>,
}

impl Recipe {
    /// Image URL, or empty when the column is absent or null.
    pub fn thumbnail(&self) -> &str {
        self.field("strMealThumb").unwrap_or_default()
    }

    /// Free-text cooking instructions, or empty when absent or null.
    pub fn instructions(&self) -> &str {
        self.field("strInstructions").unwrap_or_default()
    }

    /// Ingredient text in slot `slot` (1-based), if the column is present
    /// and holds a string.
    pub fn ingredient(&self, slot: usize) -> Option<&str> {
        self.field(&format!("strIngredient{slot}"))
    }

    /// Measure text in slot `slot` (1-based).
    pub fn measure(&self, slot: usize) -> Option<&str> {
        self.field(&format!("strMeasure{slot}"))
    }

    fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(serde_json::Value::as_str)
    }
}

/// Response envelope shared by the random and search endpoints.
///
/// The search endpoint returns `meals: null` rather than an empty list when
/// nothing matches.
#[derive(Debug, Deserialize)]
pub struct MealsEnvelope {
    #[serde(default)]
    pub meals: Option<Vec<Recipe>>,
}
