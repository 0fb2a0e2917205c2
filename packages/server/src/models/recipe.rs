use chrono::NaiveDate;
use common::CookingUnit;
use serde::{Deserialize, Serialize};

use super::ingredient::IngredientResponse;
use super::shared::{IngredientEntryRequest, into_lines};
use crate::error::AppError;
use crate::services::{NewRecipe, RecipeIngredientEntry, RecipePatch, RecipeWithIngredients};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeRequest {
    #[schema(example = "Soup")]
    pub title: String,
    pub description: Option<String>,
    pub instructions: Option<String>,
    /// Owner email; free text.
    #[schema(example = "u@example.com")]
    pub user_email: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<IngredientEntryRequest>,
}

impl CreateRecipeRequest {
    pub fn into_new_recipe(self) -> Result<NewRecipe, AppError> {
        Ok(NewRecipe {
            title: self.title,
            description: self.description,
            instructions: self.instructions,
            owner_email: self.user_email,
            ingredients: into_lines(self.ingredients)?,
        })
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdateRecipeRequest {
    #[schema(example = "Carrot Soup")]
    pub title: String,
    pub description: Option<String>,
    pub instructions: Option<String>,
}

impl From<UpdateRecipeRequest> for RecipePatch {
    fn from(req: UpdateRecipeRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            instructions: req.instructions,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredientId {
    pub recipe_id: i32,
    pub ingredient_id: i32,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredientResponse {
    pub recipe_ingredient_id: RecipeIngredientId,
    pub ingredient: IngredientResponse,
    #[schema(example = 2)]
    pub quantity: f64,
    #[schema(value_type = String, example = "Count")]
    pub unit: CookingUnit,
}

impl From<RecipeIngredientEntry> for RecipeIngredientResponse {
    fn from(entry: RecipeIngredientEntry) -> Self {
        Self {
            recipe_ingredient_id: RecipeIngredientId {
                recipe_id: entry.association.recipe_id,
                ingredient_id: entry.association.ingredient_id,
            },
            ingredient: entry.ingredient.into(),
            quantity: entry.association.quantity,
            unit: entry.association.unit,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    #[schema(example = 1)]
    pub recipe_id: i32,
    #[schema(example = "Soup")]
    pub title: String,
    pub description: Option<String>,
    pub instructions: Option<String>,
    pub user_email: Option<String>,
    pub ingredients: Vec<RecipeIngredientResponse>,
    pub created_date: NaiveDate,
    pub last_modified_date: NaiveDate,
}

impl From<RecipeWithIngredients> for RecipeResponse {
    fn from(loaded: RecipeWithIngredients) -> Self {
        let recipe = loaded.recipe;
        Self {
            recipe_id: recipe.id,
            title: recipe.title,
            description: recipe.description,
            instructions: recipe.instructions,
            user_email: recipe.owner_email,
            ingredients: loaded.ingredients.into_iter().map(Into::into).collect(),
            created_date: recipe.created_date,
            last_modified_date: recipe.last_modified_date,
        }
    }
}
