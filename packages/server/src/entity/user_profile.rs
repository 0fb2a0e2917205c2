use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_profile")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub full_name: Option<String>,

    #[sea_orm(unique)]
    pub email: String,

    pub join_date: Date,
}

impl ActiveModelBehavior for ActiveModel {}
