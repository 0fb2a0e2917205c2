use serde_json::{Value, json};

use crate::common::{TestApp, routes};

mod aggregate {
    use super::*;

    #[tokio::test]
    async fn single_rating_is_reported() {
        let app = TestApp::spawn().await;
        let token = app.sign_in("u@example.com").await;
        let id = app.create_recipe(&token, "Soup", "u@example.com").await;

        let rating_id = app.rate(id, "u@example.com", 5, &token).await;
        assert!(rating_id > 0);

        let res = app.get_with_token(&routes::recipe_rating(id), &token).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!([5, 1]));
    }

    #[tokio::test]
    async fn unrated_recipe_reports_zeros() {
        let app = TestApp::spawn().await;
        let token = app.sign_in("u@example.com").await;
        let id = app.create_recipe(&token, "Soup", "u@example.com").await;

        let res = app.get_with_token(&routes::recipe_rating(id), &token).await;
        assert_eq!(res.body, json!([0, 0]));
    }

    #[tokio::test]
    async fn average_is_truncated() {
        let app = TestApp::spawn().await;
        let token = app.sign_in("u@example.com").await;
        let id = app.create_recipe(&token, "Soup", "u@example.com").await;

        for score in [3, 4, 5] {
            app.rate(id, "u@example.com", score, &token).await;
        }
        let res = app.get_with_token(&routes::recipe_rating(id), &token).await;
        assert_eq!(res.body, json!([4, 3]));

        let other = app.create_recipe(&token, "Stew", "u@example.com").await;
        for score in [4, 5] {
            app.rate(other, "u@example.com", score, &token).await;
        }
        let res = app
            .get_with_token(&routes::recipe_rating(other), &token)
            .await;
        assert_eq!(res.body, json!([4, 2]));
    }
}

mod lifecycle {
    use super::*;

    #[tokio::test]
    async fn user_rating_is_null_until_rated() {
        let app = TestApp::spawn().await;
        let token = app.sign_in("u@example.com").await;
        let id = app.create_recipe(&token, "Soup", "u@example.com").await;

        let before = app
            .get_with_token(&routes::user_rating(id, "u@example.com"), &token)
            .await;
        assert_eq!(before.status, 200);
        assert_eq!(before.body, Value::Null);

        let rating_id = app.rate(id, "u@example.com", 4, &token).await;
        let after = app
            .get_with_token(&routes::user_rating(id, "u@example.com"), &token)
            .await;
        assert_eq!(after.body["ratingId"], rating_id);
        assert_eq!(after.body["rating"], 4);
        assert_eq!(after.body["comment"], "tasty");
    }

    #[tokio::test]
    async fn update_changes_the_score() {
        let app = TestApp::spawn().await;
        let token = app.sign_in("u@example.com").await;
        let id = app.create_recipe(&token, "Soup", "u@example.com").await;
        let rating_id = app.rate(id, "u@example.com", 2, &token).await;

        let res = app
            .put_with_token(
                &routes::rating_update(rating_id),
                &json!({"rating": 5, "comment": "better the next day"}),
                &token,
            )
            .await;
        assert_eq!(res.status, 204, "{}", res.text);

        let agg = app.get_with_token(&routes::recipe_rating(id), &token).await;
        assert_eq!(agg.body, json!([5, 1]));
    }

    #[tokio::test]
    async fn updating_a_missing_rating_is_not_found() {
        let app = TestApp::spawn().await;
        let token = app.sign_in("u@example.com").await;

        let res = app
            .put_with_token(&routes::rating_update(999), &json!({"rating": 3}), &token)
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn recipe_with_ratings_cannot_be_deleted_until_they_are_removed() {
        let app = TestApp::spawn().await;
        let token = app.sign_in("u@example.com").await;
        let id = app.create_recipe(&token, "Soup", "u@example.com").await;
        app.rate(id, "u@example.com", 5, &token).await;

        let blocked = app.delete_with_token(&routes::recipe(id), &token).await;
        assert_eq!(blocked.status, 409);
        let still_there = app.get_with_token(&routes::recipe(id), &token).await;
        assert_eq!(still_there.status, 200);

        let cleared = app
            .delete_with_token(&routes::recipe_ratings(id), &token)
            .await;
        assert_eq!(cleared.status, 204);

        let deleted = app.delete_with_token(&routes::recipe(id), &token).await;
        assert_eq!(deleted.status, 204);
    }
}

mod validation {
    use super::*;

    #[tokio::test]
    async fn out_of_range_score_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.sign_in("u@example.com").await;
        let id = app.create_recipe(&token, "Soup", "u@example.com").await;

        for score in [6, -1] {
            let res = app
                .post_with_token(
                    &routes::add_rating(id, "u@example.com"),
                    &json!({"rating": score}),
                    &token,
                )
                .await;
            assert_eq!(res.status, 400, "score {score}");
        }
    }

    #[tokio::test]
    async fn unknown_recipe_or_user_is_not_found() {
        let app = TestApp::spawn().await;
        let token = app.sign_in("u@example.com").await;
        let id = app.create_recipe(&token, "Soup", "u@example.com").await;

        let no_recipe = app
            .post_with_token(
                &routes::add_rating(404, "u@example.com"),
                &json!({"rating": 3}),
                &token,
            )
            .await;
        assert_eq!(no_recipe.status, 404);

        let no_user = app
            .post_with_token(
                &routes::add_rating(id, "nobody@example.com"),
                &json!({"rating": 3}),
                &token,
            )
            .await;
        assert_eq!(no_user.status, 404);
    }
}
