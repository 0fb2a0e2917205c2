use common::CookingUnit;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_ingredient")]
pub struct Model {
    // Not a foreign key: pantry rows survive deletion of the profile.
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub ingredient_id: i32,
    #[sea_orm(belongs_to, from = "ingredient_id", to = "id")]
    pub ingredient: HasOne<super::ingredient::Entity>,

    pub quantity: f64,
    pub unit: CookingUnit,
}

impl ActiveModelBehavior for ActiveModel {}
