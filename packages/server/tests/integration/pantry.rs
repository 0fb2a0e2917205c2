use serde_json::json;

use crate::common::{TestApp, entry, routes};

mod listing {
    use super::*;

    #[tokio::test]
    async fn unknown_email_has_an_empty_pantry() {
        let app = TestApp::spawn().await;
        let token = app.sign_in("u@example.com").await;

        let res = app
            .get_with_token(&routes::pantry("nobody@example.com"), &token)
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!([]));
    }

    #[tokio::test]
    async fn added_entries_are_listed_with_full_unit_name() {
        let app = TestApp::spawn().await;
        let token = app.sign_in("u@example.com").await;

        let res = app
            .post_with_token(
                &routes::pantry("u@example.com"),
                &entry("Egg", 6.0, "ct"),
                &token,
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["ingredient"]["name"], "Egg");

        let list = app
            .get_with_token(&routes::pantry("u@example.com"), &token)
            .await;
        let entries = list.body.as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["quantity"], 6.0);
        assert_eq!(entries[0]["unit"], "Count");
    }
}

mod changes {
    use super::*;

    #[tokio::test]
    async fn adding_the_same_ingredient_twice_conflicts() {
        let app = TestApp::spawn().await;
        let token = app.sign_in("u@example.com").await;
        let path = routes::pantry("u@example.com");
        app.post_with_token(&path, &entry("Egg", 6.0, "COUNT"), &token)
            .await;

        let res = app
            .post_with_token(&path, &entry("Egg", 2.0, "COUNT"), &token)
            .await;

        assert_eq!(res.status, 409);
    }

    #[tokio::test]
    async fn adding_for_an_unknown_user_is_not_found() {
        let app = TestApp::spawn().await;
        let token = app.sign_in("u@example.com").await;

        let res = app
            .post_with_token(
                &routes::pantry("nobody@example.com"),
                &entry("Egg", 6.0, "COUNT"),
                &token,
            )
            .await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn batch_with_a_conflicting_entry_adds_nothing() {
        let app = TestApp::spawn().await;
        let token = app.sign_in("u@example.com").await;
        app.post_with_token(
            &routes::pantry("u@example.com"),
            &entry("Milk", 1.0, "l"),
            &token,
        )
        .await;

        let res = app
            .post_with_token(
                &routes::pantry_batch("u@example.com"),
                &json!([entry("Flour", 500.0, "g"), entry("Milk", 2.0, "l")]),
                &token,
            )
            .await;
        assert_eq!(res.status, 409);

        let list = app
            .get_with_token(&routes::pantry("u@example.com"), &token)
            .await;
        let entries = list.body.as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["ingredient"]["name"], "Milk");
        assert_eq!(entries[0]["quantity"], 1.0);
    }

    #[tokio::test]
    async fn batch_adds_every_entry() {
        let app = TestApp::spawn().await;
        let token = app.sign_in("u@example.com").await;

        let res = app
            .post_with_token(
                &routes::pantry_batch("u@example.com"),
                &json!([entry("Flour", 500.0, "g"), entry("Milk", 2.0, "l")]),
                &token,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn deleting_an_entry() {
        let app = TestApp::spawn().await;
        let token = app.sign_in("u@example.com").await;
        app.post_with_token(
            &routes::pantry("u@example.com"),
            &entry("Egg", 6.0, "COUNT"),
            &token,
        )
        .await;

        let res = app
            .delete_with_token(&routes::pantry_entry("u@example.com", "Egg"), &token)
            .await;
        assert_eq!(res.status, 204);

        let again = app
            .delete_with_token(&routes::pantry_entry("u@example.com", "Egg"), &token)
            .await;
        assert_eq!(again.status, 404);

        let list = app
            .get_with_token(&routes::pantry("u@example.com"), &token)
            .await;
        assert_eq!(list.body, json!([]));
    }

    #[tokio::test]
    async fn update_changes_quantity_and_unit() {
        let app = TestApp::spawn().await;
        let token = app.sign_in("u@example.com").await;
        let path = routes::pantry("u@example.com");
        app.post_with_token(&path, &entry("Sugar", 1.0, "cup"), &token)
            .await;

        let res = app
            .put_with_token(&path, &json!([entry("Sugar", 250.0, "GRAM")]), &token)
            .await;
        assert_eq!(res.status, 204, "{}", res.text);

        let list = app.get_with_token(&path, &token).await;
        assert_eq!(list.body[0]["quantity"], 250.0);
        assert_eq!(list.body[0]["unit"], "Gram");
    }

    #[tokio::test]
    async fn update_with_a_missing_name_changes_nothing() {
        let app = TestApp::spawn().await;
        let token = app.sign_in("u@example.com").await;
        let path = routes::pantry("u@example.com");
        app.post_with_token(&path, &entry("Sugar", 1.0, "cup"), &token)
            .await;

        let res = app
            .put_with_token(
                &path,
                &json!([entry("Sugar", 3.0, "cup"), entry("Saffron", 1.0, "g")]),
                &token,
            )
            .await;
        assert_eq!(res.status, 404);

        let list = app.get_with_token(&path, &token).await;
        assert_eq!(list.body[0]["quantity"], 1.0);
        assert_eq!(list.body[0]["unit"], "Cup");
    }
}
