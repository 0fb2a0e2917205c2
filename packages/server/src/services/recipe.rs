use std::collections::{HashMap, HashSet};

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr, TransactionSession, TransactionTrait,
};

use super::IngredientLine;
use super::ingredient::IngredientCatalog;
use super::user::today;
use crate::entity::{ingredient, recipe, recipe_ingredient};
use crate::error::AppError;

/// A recipe-ingredient association joined with its ingredient.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeIngredientEntry {
    pub association: recipe_ingredient::Model,
    pub ingredient: ingredient::Model,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecipeWithIngredients {
    pub recipe: recipe::Model,
    pub ingredients: Vec<RecipeIngredientEntry>,
}

#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub title: String,
    pub description: Option<String>,
    pub instructions: Option<String>,
    pub owner_email: Option<String>,
    pub ingredients: Vec<IngredientLine>,
}

#[derive(Debug, Clone)]
pub struct RecipePatch {
    pub title: String,
    pub description: Option<String>,
    pub instructions: Option<String>,
}

/// Recipes and their ingredient associations.
pub struct RecipeStore<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait + TransactionTrait> RecipeStore<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn list_all(&self) -> Result<Vec<RecipeWithIngredients>, AppError> {
        let recipes = recipe::Entity::find()
            .order_by_asc(recipe::Column::Id)
            .all(self.conn)
            .await?;
        with_ingredients(self.conn, recipes).await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<RecipeWithIngredients, AppError> {
        let model = find_recipe(self.conn, id).await?;
        let mut loaded = with_ingredients(self.conn, vec![model]).await?;
        loaded
            .pop()
            .ok_or_else(|| AppError::NotFound(format!("Recipe {id} not found")))
    }

    pub async fn list_by_owner(&self, email: &str) -> Result<Vec<RecipeWithIngredients>, AppError> {
        let recipes = recipe::Entity::find()
            .filter(recipe::Column::OwnerEmail.eq(email))
            .order_by_asc(recipe::Column::Id)
            .all(self.conn)
            .await?;
        with_ingredients(self.conn, recipes).await
    }

    /// Persist a recipe together with any inline ingredient lines.
    pub async fn create(&self, new: NewRecipe) -> Result<RecipeWithIngredients, AppError> {
        let title = validate_title(&new.title)?;
        reject_duplicate_names(&new.ingredients)?;

        let txn = self.conn.begin().await?;
        let date = today();
        let model = recipe::ActiveModel {
            title: Set(title),
            description: Set(new.description),
            instructions: Set(new.instructions),
            owner_email: Set(new.owner_email),
            created_date: Set(date),
            last_modified_date: Set(date),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        for line in &new.ingredients {
            insert_line(&txn, model.id, line).await?;
        }

        let entries = load_entries(&txn, &[model.id]).await?;
        txn.commit().await?;

        Ok(RecipeWithIngredients {
            recipe: model,
            ingredients: entries,
        })
    }

    /// Overwrite title, description and instructions. Associations and owner are untouched.
    pub async fn update(
        &self,
        id: i32,
        patch: RecipePatch,
    ) -> Result<RecipeWithIngredients, AppError> {
        let title = validate_title(&patch.title)?;
        let existing = find_recipe(self.conn, id).await?;

        let mut active: recipe::ActiveModel = existing.into();
        active.title = Set(title);
        active.description = Set(patch.description);
        active.instructions = Set(patch.instructions);
        active.last_modified_date = Set(today());
        let updated = active.update(self.conn).await?;

        let ingredients = load_entries(self.conn, &[id]).await?;
        Ok(RecipeWithIngredients {
            recipe: updated,
            ingredients,
        })
    }

    /// Remove a recipe and its associations. A missing id is not an error.
    ///
    /// Ratings must be deleted first; a recipe that still has ratings is a conflict.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let txn = self.conn.begin().await?;

        recipe_ingredient::Entity::delete_many()
            .filter(recipe_ingredient::Column::RecipeId.eq(id))
            .exec(&txn)
            .await?;

        recipe::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                    AppError::Conflict(format!("Recipe {id} still has ratings"))
                }
                _ => AppError::from(e),
            })?;

        txn.commit().await?;
        Ok(())
    }

    pub async fn get_ingredients(&self, id: i32) -> Result<Vec<RecipeIngredientEntry>, AppError> {
        find_recipe(self.conn, id).await?;
        load_entries(self.conn, &[id]).await
    }

    /// Attach one ingredient line. An ingredient already on the recipe is a conflict.
    pub async fn add_ingredient(
        &self,
        recipe_id: i32,
        line: IngredientLine,
    ) -> Result<RecipeWithIngredients, AppError> {
        self.add_ingredients(recipe_id, vec![line]).await
    }

    /// Attach every line in order. Any failing line aborts the whole call.
    pub async fn add_ingredients(
        &self,
        recipe_id: i32,
        lines: Vec<IngredientLine>,
    ) -> Result<RecipeWithIngredients, AppError> {
        let txn = self.conn.begin().await?;
        let model = find_recipe(&txn, recipe_id).await?;

        for line in &lines {
            insert_line(&txn, recipe_id, line).await?;
        }

        let ingredients = load_entries(&txn, &[recipe_id]).await?;
        txn.commit().await?;

        Ok(RecipeWithIngredients {
            recipe: model,
            ingredients,
        })
    }

    /// Reconcile the recipe's associations with `desired`, matching by ingredient name.
    ///
    /// Matched associations get the desired quantity and unit, unmatched ones are
    /// removed, and desired lines with no current match are added. Shared
    /// ingredient rows are never written.
    pub async fn update_ingredients(
        &self,
        recipe_id: i32,
        desired: Vec<IngredientLine>,
    ) -> Result<(), AppError> {
        reject_duplicate_names(&desired)?;

        let txn = self.conn.begin().await?;
        find_recipe(&txn, recipe_id).await?;

        let current = load_entries(&txn, &[recipe_id]).await?;
        let mut matched: HashSet<&str> = HashSet::new();
        let mut removed: Vec<i32> = Vec::new();

        for entry in current {
            match desired
                .iter()
                .find(|line| line.name.trim() == entry.ingredient.name)
            {
                Some(line) => {
                    matched.insert(line.name.trim());
                    let mut active: recipe_ingredient::ActiveModel = entry.association.into();
                    active.quantity = Set(line.quantity);
                    active.unit = Set(line.unit);
                    active.update(&txn).await?;
                }
                None => removed.push(entry.ingredient.id),
            }
        }

        if !removed.is_empty() {
            recipe_ingredient::Entity::delete_many()
                .filter(recipe_ingredient::Column::RecipeId.eq(recipe_id))
                .filter(recipe_ingredient::Column::IngredientId.is_in(removed.clone()))
                .exec(&txn)
                .await?;
        }

        let mut added = 0;
        for line in desired.iter().filter(|l| !matched.contains(l.name.trim())) {
            insert_line(&txn, recipe_id, line).await?;
            added += 1;
        }

        txn.commit().await?;
        tracing::debug!(
            recipe_id,
            updated = matched.len(),
            removed = removed.len(),
            added,
            "Reconciled recipe ingredients"
        );
        Ok(())
    }
}

/// Look up a recipe by ID, returning 404 if not found.
async fn find_recipe<C: ConnectionTrait>(conn: &C, id: i32) -> Result<recipe::Model, AppError> {
    recipe::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Recipe {id} not found")))
}

async fn insert_line<C: ConnectionTrait + TransactionTrait>(
    conn: &C,
    recipe_id: i32,
    line: &IngredientLine,
) -> Result<(), AppError> {
    let ingredient = IngredientCatalog::new(conn).get_or_create(&line.name).await?;

    recipe_ingredient::ActiveModel {
        recipe_id: Set(recipe_id),
        ingredient_id: Set(ingredient.id),
        quantity: Set(line.quantity),
        unit: Set(line.unit),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::Conflict(format!(
            "Recipe {recipe_id} already has ingredient '{}'",
            ingredient.name
        )),
        _ => AppError::from(e),
    })?;
    Ok(())
}

async fn load_entries<C: ConnectionTrait>(
    conn: &C,
    recipe_ids: &[i32],
) -> Result<Vec<RecipeIngredientEntry>, AppError> {
    if recipe_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows = recipe_ingredient::Entity::find()
        .filter(recipe_ingredient::Column::RecipeId.is_in(recipe_ids.iter().copied()))
        .find_also_related(ingredient::Entity)
        .order_by_asc(recipe_ingredient::Column::RecipeId)
        .order_by_asc(recipe_ingredient::Column::IngredientId)
        .all(conn)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(association, ingredient)| {
            ingredient.map(|ingredient| RecipeIngredientEntry {
                association,
                ingredient,
            })
        })
        .collect())
}

async fn with_ingredients<C: ConnectionTrait>(
    conn: &C,
    recipes: Vec<recipe::Model>,
) -> Result<Vec<RecipeWithIngredients>, AppError> {
    let ids: Vec<i32> = recipes.iter().map(|r| r.id).collect();
    let mut by_recipe: HashMap<i32, Vec<RecipeIngredientEntry>> = HashMap::new();
    for entry in load_entries(conn, &ids).await? {
        by_recipe
            .entry(entry.association.recipe_id)
            .or_default()
            .push(entry);
    }

    Ok(recipes
        .into_iter()
        .map(|recipe| {
            let ingredients = by_recipe.remove(&recipe.id).unwrap_or_default();
            RecipeWithIngredients {
                recipe,
                ingredients,
            }
        })
        .collect())
}

fn validate_title(title: &str) -> Result<String, AppError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("Title must not be blank".into()));
    }
    Ok(title.to_string())
}

fn reject_duplicate_names(lines: &[IngredientLine]) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for line in lines {
        if !seen.insert(line.name.trim()) {
            return Err(AppError::Validation(format!(
                "Ingredient '{}' is listed more than once",
                line.name.trim()
            )));
        }
    }
    Ok(())
}
