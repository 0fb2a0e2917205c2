use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr, TransactionSession, TransactionTrait,
};

use crate::entity::ingredient;
use crate::error::AppError;

/// Canonical name to id mapping for ingredients.
pub struct IngredientCatalog<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait + TransactionTrait> IngredientCatalog<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn list_all(&self) -> Result<Vec<ingredient::Model>, AppError> {
        Ok(ingredient::Entity::find()
            .order_by_asc(ingredient::Column::Id)
            .all(self.conn)
            .await?)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<ingredient::Model, AppError> {
        ingredient::Entity::find_by_id(id)
            .one(self.conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Ingredient {id} not found")))
    }

    pub async fn get_by_name(&self, name: &str) -> Result<ingredient::Model, AppError> {
        self.find_by_name(name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Ingredient '{name}' not found")))
    }

    pub async fn create(&self, name: &str) -> Result<ingredient::Model, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation(
                "Ingredient name must not be blank".into(),
            ));
        }

        let model = ingredient::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        };
        model
            .insert(self.conn)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    AppError::Conflict(format!("Ingredient '{name}' already exists"))
                }
                _ => AppError::from(e),
            })
    }

    /// Remove an ingredient. A missing id is not an error.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        ingredient::Entity::delete_by_id(id)
            .exec(self.conn)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => AppError::Conflict(format!(
                    "Ingredient {id} is still used by a recipe or pantry"
                )),
                _ => AppError::from(e),
            })?;
        Ok(())
    }

    /// Look up an ingredient by name, creating it if absent.
    ///
    /// The insert runs in a savepoint. When a concurrent caller wins the race on
    /// the unique name, the savepoint is rolled back and the winner's row is
    /// returned, so the surrounding transaction stays usable.
    pub async fn get_or_create(&self, name: &str) -> Result<ingredient::Model, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation(
                "Ingredient name must not be blank".into(),
            ));
        }
        if let Some(existing) = self.find_by_name(name).await? {
            return Ok(existing);
        }
        self.insert_or_reread(name).await
    }

    /// Insert `name` in a savepoint; on a unique violation roll back to it and
    /// return the row that won.
    async fn insert_or_reread(&self, name: &str) -> Result<ingredient::Model, AppError> {
        let savepoint = self.conn.begin().await?;
        let model = ingredient::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        };

        match model.insert(&savepoint).await {
            Ok(inserted) => {
                savepoint.commit().await?;
                tracing::debug!(id = inserted.id, name, "Created ingredient");
                Ok(inserted)
            }
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                savepoint.rollback().await?;
                tracing::debug!(name, "Lost ingredient insert race, re-reading");
                self.get_by_name(name).await
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<ingredient::Model>, AppError> {
        Ok(ingredient::Entity::find()
            .filter(ingredient::Column::Name.eq(name))
            .one(self.conn)
            .await?)
    }
}
