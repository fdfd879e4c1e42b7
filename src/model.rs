use serde::{Deserialize, Serialize};

use crate::transform;

/// Title used when a page gives no usable recipe name.
pub const UNKNOWN_RECIPE: &str = "Unknown Recipe";

/// A normalized recipe as recovered from a web page.
///
/// Built once per extraction and never mutated afterwards; display strings
/// (scaled or metric ingredient lines) are derived on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub name: String,
    pub image: Option<String>,
    /// Ingredient lines in recipe order, as found on the page.
    pub ingredients: Vec<String>,
    /// Flattened instruction steps in document order.
    pub instructions: Vec<String>,
}

impl Default for RecipeRecord {
    fn default() -> Self {
        Self {
            name: UNKNOWN_RECIPE.to_string(),
            image: None,
            ingredients: Vec::new(),
            instructions: Vec::new(),
        }
    }
}

impl RecipeRecord {
    /// True if the record carries any ingredient or instruction.
    pub fn has_content(&self) -> bool {
        !self.ingredients.is_empty() || !self.instructions.is_empty()
    }

    /// Ingredient lines rewritten for display with the given portion
    /// multiplier, optionally converted to metric.
    pub fn scaled_ingredients(&self, multiplier: f64, metric: bool) -> Vec<String> {
        self.ingredients
            .iter()
            .map(|line| transform::transform(line, multiplier, metric))
            .collect()
    }
}

/// Result of a single extraction call.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionOutcome {
    Found(RecipeRecord),
    /// The page was read but carried no recipe signal.
    NotFound,
    /// The page could not be fetched or read.
    TransportError(String),
}

impl ExtractionOutcome {
    pub fn recipe(&self) -> Option<&RecipeRecord> {
        match self {
            ExtractionOutcome::Found(recipe) => Some(recipe),
            _ => None,
        }
    }

    pub fn into_recipe(self) -> Option<RecipeRecord> {
        match self {
            ExtractionOutcome::Found(recipe) => Some(recipe),
            _ => None,
        }
    }
}

/// Bookmark payload handed to the persistence collaborator.
///
/// Keyed by the owning user identity and a display name; the storage
/// schema itself lives outside this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRecipe {
    pub owner: String,
    pub display_name: String,
    pub source_url: Option<String>,
    pub recipe: RecipeRecord,
}

impl SavedRecipe {
    pub fn new(owner: impl Into<String>, source_url: Option<String>, recipe: RecipeRecord) -> Self {
        Self {
            owner: owner.into(),
            display_name: recipe.name.clone(),
            source_url,
            recipe,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_uses_sentinel_name() {
        let record = RecipeRecord::default();
        assert_eq!(record.name, UNKNOWN_RECIPE);
        assert!(record.image.is_none());
        assert!(!record.has_content());
    }

    #[test]
    fn test_scaled_ingredients() {
        let record = RecipeRecord {
            ingredients: vec!["2 cups flour".to_string(), "salt to taste".to_string()],
            ..Default::default()
        };

        assert_eq!(
            record.scaled_ingredients(0.5, false),
            vec!["1 cups flour".to_string(), "salt to taste".to_string()]
        );
    }

    #[test]
    fn test_outcome_accessors() {
        let outcome = ExtractionOutcome::Found(RecipeRecord::default());
        assert!(outcome.recipe().is_some());
        assert!(ExtractionOutcome::NotFound.into_recipe().is_none());
        assert!(ExtractionOutcome::TransportError("boom".into())
            .recipe()
            .is_none());
    }

    #[test]
    fn test_saved_recipe_takes_display_name_from_record() {
        let recipe = RecipeRecord {
            name: "Pancakes".to_string(),
            ..Default::default()
        };
        let saved = SavedRecipe::new("cook@example.com", None, recipe);
        assert_eq!(saved.display_name, "Pancakes");
        assert_eq!(saved.owner, "cook@example.com");
    }
}
