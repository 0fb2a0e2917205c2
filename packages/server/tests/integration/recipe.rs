use serde_json::json;

use crate::common::{TestApp, entry, routes};

mod crud {
    use super::*;

    #[tokio::test]
    async fn created_recipe_has_dates_and_owner() {
        let app = TestApp::spawn().await;
        let token = app.sign_in("u@example.com").await;

        let res = app
            .post_with_token(
                routes::RECIPES,
                &json!({"title": "Soup", "userEmail": "u@example.com"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["title"], "Soup");
        assert_eq!(res.body["userEmail"], "u@example.com");
        assert_eq!(res.body["createdDate"], res.body["lastModifiedDate"]);
        assert_eq!(res.body["ingredients"], json!([]));
    }

    #[tokio::test]
    async fn recipe_can_be_created_with_inline_ingredients() {
        let app = TestApp::spawn().await;
        let token = app.sign_in("u@example.com").await;

        let res = app
            .post_with_token(
                routes::RECIPES,
                &json!({
                    "title": "Salad",
                    "ingredients": [entry("Lettuce", 1.0, "COUNT"), entry("Oil", 2.0, "tbsp")],
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        let ingredients = res.body["ingredients"].as_array().unwrap();
        assert_eq!(ingredients.len(), 2);
    }

    #[tokio::test]
    async fn blank_title_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.sign_in("u@example.com").await;

        let res = app
            .post_with_token(routes::RECIPES, &json!({"title": "  "}), &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn update_overwrites_text_but_not_ingredients_or_owner() {
        let app = TestApp::spawn().await;
        let token = app.sign_in("u@example.com").await;
        let id = app.create_recipe(&token, "Soup", "u@example.com").await;
        app.add_recipe_ingredient(id, &token, "Carrot", 2.0, "COUNT")
            .await;

        let res = app
            .put_with_token(
                &routes::recipe(id),
                &json!({"title": "Carrot Soup", "instructions": "Simmer."}),
                &token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["title"], "Carrot Soup");
        assert_eq!(res.body["instructions"], "Simmer.");
        assert_eq!(res.body["description"], serde_json::Value::Null);
        assert_eq!(res.body["userEmail"], "u@example.com");
        assert_eq!(res.body["ingredients"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_of_missing_recipe_is_not_found() {
        let app = TestApp::spawn().await;
        let token = app.sign_in("u@example.com").await;

        let res = app
            .put_with_token(&routes::recipe(42), &json!({"title": "Ghost"}), &token)
            .await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn recipes_are_listed_by_exact_owner() {
        let app = TestApp::spawn().await;
        let token = app.sign_in("u@example.com").await;
        app.create_recipe(&token, "Soup", "u@example.com").await;
        app.create_recipe(&token, "Stew", "u@example.com").await;
        app.create_recipe(&token, "Cake", "other@example.com").await;

        let mine = app
            .get_with_token(&routes::recipes_by_owner("u@example.com"), &token)
            .await;
        assert_eq!(mine.status, 200);
        assert_eq!(mine.body.as_array().unwrap().len(), 2);

        let all = app.get_with_token(routes::RECIPES, &token).await;
        assert_eq!(all.body.as_array().unwrap().len(), 3);

        let none = app
            .get_with_token(&routes::recipes_by_owner("U@example.com"), &token)
            .await;
        assert_eq!(none.body, json!([]));
    }

    #[tokio::test]
    async fn deleting_a_recipe_removes_it_and_its_ingredient_links() {
        let app = TestApp::spawn().await;
        let token = app.sign_in("u@example.com").await;
        let id = app.create_recipe(&token, "Soup", "u@example.com").await;
        app.add_recipe_ingredient(id, &token, "Carrot", 2.0, "COUNT")
            .await;

        let res = app.delete_with_token(&routes::recipe(id), &token).await;
        assert_eq!(res.status, 204);

        let gone = app.get_with_token(&routes::recipe(id), &token).await;
        assert_eq!(gone.status, 404);
        let links = app
            .get_with_token(&routes::recipe_ingredients(id), &token)
            .await;
        assert_eq!(links.status, 404);

        let again = app.delete_with_token(&routes::recipe(id), &token).await;
        assert_eq!(again.status, 204);
    }
}

mod ingredients {
    use super::*;

    #[tokio::test]
    async fn added_ingredient_is_listed_with_full_unit_name() {
        let app = TestApp::spawn().await;
        let token = app.sign_in("u@example.com").await;
        let id = app.create_recipe(&token, "Soup", "u@example.com").await;

        let added = app
            .post_with_token(
                &routes::recipe_ingredients(id),
                &entry("Carrot", 2.0, "CT"),
                &token,
            )
            .await;
        assert_eq!(added.status, 201, "{}", added.text);
        assert_eq!(added.body["recipeId"], id);

        let res = app
            .get_with_token(&routes::recipe_ingredients(id), &token)
            .await;
        assert_eq!(res.status, 200);
        let list = res.body.as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["ingredient"]["name"], "Carrot");
        assert_eq!(list[0]["quantity"], 2.0);
        assert_eq!(list[0]["unit"], "Count");
        assert_eq!(list[0]["recipeIngredientId"]["recipeId"], id);
    }

    #[tokio::test]
    async fn adding_the_same_ingredient_twice_conflicts() {
        let app = TestApp::spawn().await;
        let token = app.sign_in("u@example.com").await;
        let id = app.create_recipe(&token, "Soup", "u@example.com").await;
        app.add_recipe_ingredient(id, &token, "Carrot", 2.0, "COUNT")
            .await;

        let res = app
            .post_with_token(
                &routes::recipe_ingredients(id),
                &entry("Carrot", 5.0, "GRAM"),
                &token,
            )
            .await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn adding_to_a_missing_recipe_is_not_found() {
        let app = TestApp::spawn().await;
        let token = app.sign_in("u@example.com").await;

        let res = app
            .post_with_token(
                &routes::recipe_ingredients(77),
                &entry("Carrot", 1.0, "COUNT"),
                &token,
            )
            .await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn invalid_quantities_and_units_are_rejected() {
        let app = TestApp::spawn().await;
        let token = app.sign_in("u@example.com").await;
        let id = app.create_recipe(&token, "Soup", "u@example.com").await;

        for body in [
            entry("Carrot", -1.0, "COUNT"),
            entry("Carrot", 1.125, "COUNT"),
            entry("Carrot", 1.0, "BUCKET"),
        ] {
            let res = app
                .post_with_token(&routes::recipe_ingredients(id), &body, &token)
                .await;
            assert_eq!(res.status, 400, "{body}");
            assert_eq!(res.body["code"], "VALIDATION_ERROR");
        }
    }

    #[tokio::test]
    async fn batch_add_is_all_or_nothing() {
        let app = TestApp::spawn().await;
        let token = app.sign_in("u@example.com").await;
        let id = app.create_recipe(&token, "Soup", "u@example.com").await;
        app.add_recipe_ingredient(id, &token, "Salt", 1.0, "tsp")
            .await;

        let res = app
            .post_with_token(
                &routes::recipe_ingredients_batch(id),
                &json!([entry("Onion", 1.0, "COUNT"), entry("Salt", 2.0, "tsp")]),
                &token,
            )
            .await;
        assert_eq!(res.status, 409);

        let list = app
            .get_with_token(&routes::recipe_ingredients(id), &token)
            .await;
        let names: Vec<&str> = list
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["ingredient"]["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Salt"]);
    }

    #[tokio::test]
    async fn batch_add_returns_recipe_with_all_entries() {
        let app = TestApp::spawn().await;
        let token = app.sign_in("u@example.com").await;
        let id = app.create_recipe(&token, "Soup", "u@example.com").await;

        let res = app
            .post_with_token(
                &routes::recipe_ingredients_batch(id),
                &json!([entry("Onion", 1.0, "COUNT"), entry("Water", 1.5, "l")]),
                &token,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["ingredients"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn reconciliation_updates_removes_and_adds() {
        let app = TestApp::spawn().await;
        let token = app.sign_in("u@example.com").await;
        let id = app.create_recipe(&token, "Soup", "u@example.com").await;
        app.add_recipe_ingredient(id, &token, "Carrot", 2.0, "COUNT")
            .await;
        app.add_recipe_ingredient(id, &token, "Celery", 1.0, "COUNT")
            .await;

        let res = app
            .put_with_token(
                &routes::recipe_ingredients(id),
                &json!([entry("Carrot", 4.0, "COUNT"), entry("Onion", 1.0, "COUNT")]),
                &token,
            )
            .await;
        assert_eq!(res.status, 204, "{}", res.text);

        let list = app
            .get_with_token(&routes::recipe_ingredients(id), &token)
            .await;
        let mut entries: Vec<(String, f64)> = list
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|e| {
                (
                    e["ingredient"]["name"].as_str().unwrap().to_string(),
                    e["quantity"].as_f64().unwrap(),
                )
            })
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(
            entries,
            vec![("Carrot".to_string(), 4.0), ("Onion".to_string(), 1.0)]
        );
    }

    #[tokio::test]
    async fn reconciling_to_an_empty_list_removes_everything() {
        let app = TestApp::spawn().await;
        let token = app.sign_in("u@example.com").await;
        let id = app.create_recipe(&token, "Soup", "u@example.com").await;
        app.add_recipe_ingredient(id, &token, "Carrot", 2.0, "COUNT")
            .await;

        let res = app
            .put_with_token(&routes::recipe_ingredients(id), &json!([]), &token)
            .await;
        assert_eq!(res.status, 204);

        let list = app
            .get_with_token(&routes::recipe_ingredients(id), &token)
            .await;
        assert_eq!(list.body, json!([]));
    }

    #[tokio::test]
    async fn reconciliation_rejects_duplicate_names() {
        let app = TestApp::spawn().await;
        let token = app.sign_in("u@example.com").await;
        let id = app.create_recipe(&token, "Soup", "u@example.com").await;

        let res = app
            .put_with_token(
                &routes::recipe_ingredients(id),
                &json!([entry("Carrot", 1.0, "COUNT"), entry("Carrot", 2.0, "COUNT")]),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
    }
}
