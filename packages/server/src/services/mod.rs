//! Domain services. Each store wraps a connection (pool or transaction) and
//! returns `AppError` so handlers can propagate with `?`.

pub mod ingredient;
pub mod pantry;
pub mod rating;
pub mod recipe;
pub mod recommendation;
pub mod user;

use common::CookingUnit;

pub use ingredient::IngredientCatalog;
pub use pantry::{PantryEntry, PantryStore};
pub use rating::{NewRating, RatingAggregate, RatingStore};
pub use recipe::{NewRecipe, RecipeIngredientEntry, RecipePatch, RecipeStore, RecipeWithIngredients};
pub use recommendation::{RecommendationClient, RelayError};
pub use user::{NewUser, UserDirectory, UserPatch};

/// A named ingredient with an amount, as attached to a recipe or a pantry.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientLine {
    pub name: String,
    pub quantity: f64,
    pub unit: CookingUnit,
}

impl IngredientLine {
    pub fn new(name: impl Into<String>, quantity: f64, unit: CookingUnit) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit,
        }
    }
}
