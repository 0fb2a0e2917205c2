use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rating")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub recipe_id: i32,
    #[sea_orm(belongs_to, from = "recipe_id", to = "id")]
    pub recipe: HasOne<super::recipe::Entity>,

    pub user_id: i32,

    /// Score in 0..=5.
    pub rating: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
}

impl ActiveModelBehavior for ActiveModel {}
