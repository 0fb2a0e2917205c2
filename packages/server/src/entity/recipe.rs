use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recipe")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub instructions: Option<String>,

    // Free text, not a reference to user_profile.
    pub owner_email: Option<String>,

    #[sea_orm(has_many)]
    pub ingredients: HasMany<super::recipe_ingredient::Entity>,

    #[sea_orm(has_many)]
    pub ratings: HasMany<super::rating::Entity>,

    pub created_date: Date,
    pub last_modified_date: Date,
}

impl ActiveModelBehavior for ActiveModel {}
