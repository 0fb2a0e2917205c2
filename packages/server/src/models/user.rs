use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::shared::validate_email;
use crate::entity::user_profile;
use crate::error::AppError;
use crate::services::{NewUser, UserPatch};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[schema(example = "Ada Lovelace")]
    pub full_name: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Defaults to today.
    pub join_date: Option<NaiveDate>,
}

impl CreateUserRequest {
    pub fn into_new_user(self) -> Result<NewUser, AppError> {
        validate_email(&self.email)?;
        Ok(NewUser {
            full_name: self.full_name,
            email: self.email.trim().to_string(),
            join_date: self.join_date,
        })
    }
}

/// Full replacement of the mutable profile fields.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[schema(example = "Ada King")]
    pub full_name: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: String,
}

impl UpdateUserRequest {
    pub fn into_patch(self) -> Result<UserPatch, AppError> {
        validate_email(&self.email)?;
        Ok(UserPatch {
            full_name: self.full_name,
            email: self.email.trim().to_string(),
        })
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = 1)]
    pub user_id: i32,
    pub full_name: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub join_date: NaiveDate,
}

impl From<user_profile::Model> for UserResponse {
    fn from(model: user_profile::Model) -> Self {
        Self {
            user_id: model.id,
            full_name: model.full_name,
            email: model.email,
            join_date: model.join_date,
        }
    }
}
