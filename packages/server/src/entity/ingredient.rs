use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ingredient")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Canonical name, case-sensitive as stored.
    #[sea_orm(unique)]
    pub name: String,

    #[sea_orm(has_many)]
    pub recipe_ingredients: HasMany<super::recipe_ingredient::Entity>,

    #[sea_orm(has_many)]
    pub user_ingredients: HasMany<super::user_ingredient::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
