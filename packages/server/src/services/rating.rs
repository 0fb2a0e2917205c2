use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionSession, TransactionTrait,
};

use super::user::UserDirectory;
use crate::entity::{rating, recipe};
use crate::error::AppError;

pub const MAX_SCORE: i32 = 5;

#[derive(Debug, Clone)]
pub struct NewRating {
    pub rating: i32,
    pub comment: Option<String>,
}

/// Truncated mean score and number of ratings for one recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RatingAggregate {
    pub average: i64,
    pub count: i64,
}

impl RatingAggregate {
    /// Integer average (truncating) of `scores`; `(0, 0)` when empty.
    pub fn from_scores(scores: &[i32]) -> Self {
        if scores.is_empty() {
            return Self::default();
        }
        let count = scores.len() as i64;
        let sum: i64 = scores.iter().map(|&s| i64::from(s)).sum();
        Self {
            average: sum / count,
            count,
        }
    }
}

pub struct RatingStore<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait + TransactionTrait> RatingStore<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Aggregate over the recipe's ratings. An unknown recipe aggregates to `(0, 0)`.
    pub async fn get_aggregate(&self, recipe_id: i32) -> Result<RatingAggregate, AppError> {
        let scores: Vec<i32> = rating::Entity::find()
            .select_only()
            .column(rating::Column::Rating)
            .filter(rating::Column::RecipeId.eq(recipe_id))
            .into_tuple()
            .all(self.conn)
            .await?;
        Ok(RatingAggregate::from_scores(&scores))
    }

    /// First rating the user left on the recipe, if any.
    pub async fn get_for_user_and_recipe(
        &self,
        recipe_id: i32,
        email: &str,
    ) -> Result<Option<rating::Model>, AppError> {
        let Some(user) = UserDirectory::new(self.conn).find_by_email(email).await? else {
            return Ok(None);
        };

        Ok(rating::Entity::find()
            .filter(rating::Column::RecipeId.eq(recipe_id))
            .filter(rating::Column::UserId.eq(user.id))
            .order_by_asc(rating::Column::Id)
            .one(self.conn)
            .await?)
    }

    /// Record a rating. Repeated ratings by the same user are kept side by side.
    pub async fn create(
        &self,
        new: NewRating,
        recipe_id: i32,
        email: &str,
    ) -> Result<rating::Model, AppError> {
        validate_score(new.rating)?;

        recipe::Entity::find_by_id(recipe_id)
            .one(self.conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Recipe {recipe_id} not found")))?;
        let user = UserDirectory::new(self.conn).get_by_email(email).await?;

        let model = rating::ActiveModel {
            recipe_id: Set(recipe_id),
            user_id: Set(user.id),
            rating: Set(new.rating),
            comment: Set(new.comment),
            ..Default::default()
        };
        Ok(model.insert(self.conn).await?)
    }

    /// Overwrite score and comment of an existing rating.
    pub async fn update(&self, new: NewRating, rating_id: i32) -> Result<(), AppError> {
        validate_score(new.rating)?;

        let txn = self.conn.begin().await?;
        let existing = rating::Entity::find_by_id(rating_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Rating {rating_id} not found")))?;

        let mut active: rating::ActiveModel = existing.into();
        active.rating = Set(new.rating);
        active.comment = Set(new.comment);
        active.update(&txn).await?;

        txn.commit().await?;
        Ok(())
    }

    pub async fn delete_for_recipe(&self, recipe_id: i32) -> Result<u64, AppError> {
        let result = rating::Entity::delete_many()
            .filter(rating::Column::RecipeId.eq(recipe_id))
            .exec(self.conn)
            .await?;
        Ok(result.rows_affected)
    }
}

pub fn validate_score(score: i32) -> Result<(), AppError> {
    if !(0..=MAX_SCORE).contains(&score) {
        return Err(AppError::Validation(format!(
            "Rating must be between 0 and {MAX_SCORE}"
        )));
    }
    Ok(())
}
