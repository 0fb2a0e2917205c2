use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr, TransactionSession, TransactionTrait,
};

use super::IngredientLine;
use super::ingredient::IngredientCatalog;
use super::user::UserDirectory;
use crate::entity::{ingredient, user_ingredient};
use crate::error::AppError;

/// A pantry row joined with its ingredient.
#[derive(Debug, Clone, PartialEq)]
pub struct PantryEntry {
    pub entry: user_ingredient::Model,
    pub ingredient: ingredient::Model,
}

/// Each user's "ingredients I have", keyed by (user, ingredient).
pub struct PantryStore<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait + TransactionTrait> PantryStore<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Entries of the user with that email. An unknown email has an empty pantry.
    pub async fn list_for_user(&self, email: &str) -> Result<Vec<PantryEntry>, AppError> {
        let Some(user) = UserDirectory::new(self.conn).find_by_email(email).await? else {
            return Ok(Vec::new());
        };

        let rows = user_ingredient::Entity::find()
            .filter(user_ingredient::Column::UserId.eq(user.id))
            .find_also_related(ingredient::Entity)
            .order_by_asc(user_ingredient::Column::IngredientId)
            .all(self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(entry, ingredient)| {
                ingredient.map(|ingredient| PantryEntry { entry, ingredient })
            })
            .collect())
    }

    pub async fn add(&self, line: IngredientLine, email: &str) -> Result<PantryEntry, AppError> {
        let mut added = self.add_batch(vec![line], email).await?;
        added
            .pop()
            .ok_or_else(|| AppError::Internal("Pantry insert returned no entry".into()))
    }

    /// Add every line in order. Any failing line aborts the whole call.
    pub async fn add_batch(
        &self,
        lines: Vec<IngredientLine>,
        email: &str,
    ) -> Result<Vec<PantryEntry>, AppError> {
        let txn = self.conn.begin().await?;
        let user = UserDirectory::new(&txn).get_by_email(email).await?;
        let catalog = IngredientCatalog::new(&txn);

        let mut added = Vec::with_capacity(lines.len());
        for line in lines {
            let ingredient = catalog.get_or_create(&line.name).await?;
            let entry = user_ingredient::ActiveModel {
                user_id: Set(user.id),
                ingredient_id: Set(ingredient.id),
                quantity: Set(line.quantity),
                unit: Set(line.unit),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => AppError::Conflict(format!(
                    "'{}' is already in the pantry of {email}",
                    ingredient.name
                )),
                _ => AppError::from(e),
            })?;
            added.push(PantryEntry { entry, ingredient });
        }

        txn.commit().await?;
        Ok(added)
    }

    pub async fn delete(&self, ingredient_name: &str, email: &str) -> Result<(), AppError> {
        let user = UserDirectory::new(self.conn).get_by_email(email).await?;
        let found = find_entry(self.conn, user.id, ingredient_name)
            .await?
            .ok_or_else(|| not_in_pantry(ingredient_name, email))?;

        user_ingredient::Entity::delete_by_id((found.entry.user_id, found.entry.ingredient_id))
            .exec(self.conn)
            .await?;
        Ok(())
    }

    /// Overwrite quantity and unit of existing entries, matched by ingredient name.
    ///
    /// All or nothing: a name missing from the pantry leaves every entry unchanged.
    pub async fn update(&self, lines: Vec<IngredientLine>, email: &str) -> Result<(), AppError> {
        let txn = self.conn.begin().await?;
        let user = UserDirectory::new(&txn).get_by_email(email).await?;

        for line in lines {
            let found = find_entry(&txn, user.id, &line.name)
                .await?
                .ok_or_else(|| not_in_pantry(&line.name, email))?;

            let mut active: user_ingredient::ActiveModel = found.entry.into();
            active.quantity = Set(line.quantity);
            active.unit = Set(line.unit);
            active.update(&txn).await?;
        }

        txn.commit().await?;
        Ok(())
    }
}

async fn find_entry<C: ConnectionTrait>(
    conn: &C,
    user_id: i32,
    ingredient_name: &str,
) -> Result<Option<PantryEntry>, AppError> {
    let row = user_ingredient::Entity::find()
        .filter(user_ingredient::Column::UserId.eq(user_id))
        .find_also_related(ingredient::Entity)
        .filter(ingredient::Column::Name.eq(ingredient_name.trim()))
        .one(conn)
        .await?;

    Ok(row.and_then(|(entry, ingredient)| {
        ingredient.map(|ingredient| PantryEntry { entry, ingredient })
    }))
}

fn not_in_pantry(name: &str, email: &str) -> AppError {
    AppError::NotFound(format!("'{name}' is not in the pantry of {email}"))
}
