use serde::{Deserialize, Serialize};

use crate::entity::ingredient;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateIngredientRequest {
    #[schema(example = "Carrot")]
    pub name: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngredientResponse {
    #[schema(example = 1)]
    pub ingredient_id: i32,
    #[schema(example = "Carrot")]
    pub name: String,
}

impl From<ingredient::Model> for IngredientResponse {
    fn from(model: ingredient::Model) -> Self {
        Self {
            ingredient_id: model.id,
            name: model.name,
        }
    }
}
