use common::CookingUnit;
use serde::Serialize;

use super::ingredient::IngredientResponse;
use crate::services::PantryEntry;

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserIngredientId {
    pub user_id: i32,
    pub ingredient_id: i32,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserIngredientResponse {
    pub user_ingredient_id: UserIngredientId,
    pub ingredient: IngredientResponse,
    #[schema(example = 3)]
    pub quantity: f64,
    #[schema(value_type = String, example = "Count")]
    pub unit: CookingUnit,
}

impl From<PantryEntry> for UserIngredientResponse {
    fn from(found: PantryEntry) -> Self {
        Self {
            user_ingredient_id: UserIngredientId {
                user_id: found.entry.user_id,
                ingredient_id: found.entry.ingredient_id,
            },
            ingredient: found.ingredient.into(),
            quantity: found.entry.quantity,
            unit: found.entry.unit,
        }
    }
}
