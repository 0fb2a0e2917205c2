use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr, TransactionSession, TransactionTrait,
};

use crate::entity::user_profile;
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: Option<String>,
    pub email: String,
    /// Defaults to today when absent.
    pub join_date: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct UserPatch {
    pub full_name: Option<String>,
    pub email: String,
}

/// Email identities and their profile records.
pub struct UserDirectory<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait + TransactionTrait> UserDirectory<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn list_all(&self) -> Result<Vec<user_profile::Model>, AppError> {
        Ok(user_profile::Entity::find()
            .order_by_asc(user_profile::Column::Id)
            .all(self.conn)
            .await?)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<user_profile::Model, AppError> {
        user_profile::Entity::find_by_id(id)
            .one(self.conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {id} not found")))
    }

    pub async fn get_by_email(&self, email: &str) -> Result<user_profile::Model, AppError> {
        self.find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User '{email}' not found")))
    }

    pub async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<user_profile::Model>, AppError> {
        Ok(user_profile::Entity::find()
            .filter(user_profile::Column::Email.eq(email))
            .one(self.conn)
            .await?)
    }

    pub async fn create(&self, user: NewUser) -> Result<user_profile::Model, AppError> {
        let email = user.email.clone();
        let model = user_profile::ActiveModel {
            full_name: Set(user.full_name),
            email: Set(user.email),
            join_date: Set(user.join_date.unwrap_or_else(today)),
            ..Default::default()
        };
        model
            .insert(self.conn)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    AppError::Conflict(format!("User '{email}' already exists"))
                }
                _ => AppError::from(e),
            })
    }

    /// Overwrite the full name and email of the user currently holding `email`.
    pub async fn update(&self, email: &str, patch: UserPatch) -> Result<(), AppError> {
        let existing = self.get_by_email(email).await?;

        let mut active: user_profile::ActiveModel = existing.into();
        active.full_name = Set(patch.full_name);
        active.email = Set(patch.email.clone());
        active.update(self.conn).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::Conflict(format!("User '{}' already exists", patch.email))
            }
            _ => AppError::from(e),
        })?;
        Ok(())
    }

    /// Remove the user with that email. A missing user is not an error.
    pub async fn delete_by_email(&self, email: &str) -> Result<(), AppError> {
        user_profile::Entity::delete_many()
            .filter(user_profile::Column::Email.eq(email))
            .exec(self.conn)
            .await?;
        Ok(())
    }

    /// Get-or-create used when an identity is seen for the first time.
    pub async fn provision(
        &self,
        email: &str,
        display_name: Option<&str>,
    ) -> Result<user_profile::Model, AppError> {
        if let Some(existing) = self.find_by_email(email).await? {
            return Ok(existing);
        }
        self.insert_or_reread(email, display_name).await
    }

    /// Insert a profile in a savepoint; on a unique violation roll back to it
    /// and return the row that won.
    async fn insert_or_reread(
        &self,
        email: &str,
        display_name: Option<&str>,
    ) -> Result<user_profile::Model, AppError> {
        let savepoint = self.conn.begin().await?;
        let model = user_profile::ActiveModel {
            full_name: Set(display_name.map(str::to_string)),
            email: Set(email.to_string()),
            join_date: Set(today()),
            ..Default::default()
        };

        match model.insert(&savepoint).await {
            Ok(inserted) => {
                savepoint.commit().await?;
                tracing::info!(id = inserted.id, email, "Provisioned user");
                Ok(inserted)
            }
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                savepoint.rollback().await?;
                self.get_by_email(email).await
            }
            Err(e) => Err(e.into()),
        }
    }
}

pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}
