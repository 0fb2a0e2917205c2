use ::common::CookingUnit;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use pantry_server::entity::{ingredient, recipe_ingredient};
use pantry_server::error::AppError;
use pantry_server::services::{
    IngredientCatalog, IngredientLine, NewRecipe, NewUser, PantryStore, RecipeStore, UserDirectory,
};

use crate::common::test_db;

fn new_recipe(title: &str, ingredients: Vec<IngredientLine>) -> NewRecipe {
    NewRecipe {
        title: title.to_string(),
        description: None,
        instructions: None,
        owner_email: Some("u@example.com".to_string()),
        ingredients,
    }
}

mod catalog {
    use super::*;

    #[tokio::test]
    async fn get_or_create_reuses_the_existing_row() {
        let db = test_db().await;
        let catalog = IngredientCatalog::new(&db);

        let first = catalog.get_or_create("Carrot").await.unwrap();
        let second = catalog.get_or_create("  Carrot ").await.unwrap();

        assert_eq!(first.id, second.id);
        let rows = ingredient::Entity::find()
            .filter(ingredient::Column::Name.eq("Carrot"))
            .count(&db)
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn get_or_create_rejects_blank_names() {
        let db = test_db().await;

        let err = IngredientCatalog::new(&db)
            .get_or_create("   ")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }
}

mod recipes {
    use super::*;

    #[tokio::test]
    async fn reconciliation_never_renames_shared_ingredients() {
        let db = test_db().await;
        let store = RecipeStore::new(&db);
        let soup = store
            .create(new_recipe(
                "Soup",
                vec![
                    IngredientLine::new("Carrot", 2.0, CookingUnit::Count),
                    IngredientLine::new("Leek", 1.0, CookingUnit::Count),
                ],
            ))
            .await
            .unwrap();
        let carrot_id = soup.ingredients[0].ingredient.id;

        store
            .update_ingredients(
                soup.recipe.id,
                vec![IngredientLine::new("Parsnip", 3.0, CookingUnit::Count)],
            )
            .await
            .unwrap();

        let carrot = IngredientCatalog::new(&db).get_by_id(carrot_id).await.unwrap();
        assert_eq!(carrot.name, "Carrot");

        let entries = store.get_ingredients(soup.recipe.id).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].ingredient.name, "Parsnip");
        assert_eq!(entries[0].association.quantity, 3.0);
    }

    #[tokio::test]
    async fn reconciliation_updates_matched_lines_in_place() {
        let db = test_db().await;
        let store = RecipeStore::new(&db);
        let soup = store
            .create(new_recipe(
                "Soup",
                vec![IngredientLine::new("Salt", 1.0, CookingUnit::Teaspoon)],
            ))
            .await
            .unwrap();

        store
            .update_ingredients(
                soup.recipe.id,
                vec![IngredientLine::new("Salt", 2.5, CookingUnit::Gram)],
            )
            .await
            .unwrap();

        let entries = store.get_ingredients(soup.recipe.id).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].association.quantity, 2.5);
        assert_eq!(entries[0].association.unit, CookingUnit::Gram);
        assert_eq!(
            entries[0].ingredient.id,
            soup.ingredients[0].ingredient.id
        );
    }

    #[tokio::test]
    async fn failed_batch_add_leaves_no_partial_writes() {
        let db = test_db().await;
        let store = RecipeStore::new(&db);
        let soup = store
            .create(new_recipe(
                "Soup",
                vec![IngredientLine::new("Salt", 1.0, CookingUnit::Teaspoon)],
            ))
            .await
            .unwrap();

        let err = store
            .add_ingredients(
                soup.recipe.id,
                vec![
                    IngredientLine::new("Pepper", 1.0, CookingUnit::Teaspoon),
                    IngredientLine::new("Salt", 2.0, CookingUnit::Teaspoon),
                ],
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        let entries = store.get_ingredients(soup.recipe.id).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert!(
            IngredientCatalog::new(&db)
                .get_by_name("Pepper")
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn delete_removes_association_rows() {
        let db = test_db().await;
        let store = RecipeStore::new(&db);
        let soup = store
            .create(new_recipe(
                "Soup",
                vec![IngredientLine::new("Carrot", 2.0, CookingUnit::Count)],
            ))
            .await
            .unwrap();

        store.delete(soup.recipe.id).await.unwrap();

        let links = recipe_ingredient::Entity::find()
            .filter(recipe_ingredient::Column::RecipeId.eq(soup.recipe.id))
            .count(&db)
            .await
            .unwrap();
        assert_eq!(links, 0);
        assert!(IngredientCatalog::new(&db).get_by_name("Carrot").await.is_ok());
    }

    #[tokio::test]
    async fn update_bumps_last_modified_only() {
        let db = test_db().await;
        let store = RecipeStore::new(&db);
        let soup = store.create(new_recipe("Soup", vec![])).await.unwrap();

        let updated = store
            .update(
                soup.recipe.id,
                pantry_server::services::RecipePatch {
                    title: "Stew".to_string(),
                    description: Some("Thick".to_string()),
                    instructions: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.recipe.title, "Stew");
        assert_eq!(updated.recipe.created_date, soup.recipe.created_date);
        assert!(updated.recipe.last_modified_date >= soup.recipe.created_date);
    }
}

mod pantry {
    use super::*;

    #[tokio::test]
    async fn update_is_all_or_nothing() {
        let db = test_db().await;
        UserDirectory::new(&db)
            .create(NewUser {
                full_name: None,
                email: "u@example.com".to_string(),
                join_date: None,
            })
            .await
            .unwrap();
        let store = PantryStore::new(&db);
        store
            .add(
                IngredientLine::new("Rice", 1.0, CookingUnit::Kilogram),
                "u@example.com",
            )
            .await
            .unwrap();

        let err = store
            .update(
                vec![
                    IngredientLine::new("Rice", 5.0, CookingUnit::Kilogram),
                    IngredientLine::new("Beans", 1.0, CookingUnit::Kilogram),
                ],
                "u@example.com",
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        let entries = store.list_for_user("u@example.com").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entry.quantity, 1.0);
    }

    #[tokio::test]
    async fn provisioning_twice_keeps_one_user() {
        let db = test_db().await;
        let users = UserDirectory::new(&db);

        let first = users
            .provision("u@example.com", Some("Una"))
            .await
            .unwrap();
        let second = users.provision("u@example.com", None).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.full_name.as_deref(), Some("Una"));
        assert_eq!(users.list_all().await.unwrap().len(), 1);
    }
}
