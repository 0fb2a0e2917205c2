use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/ingredients", ingredient_routes())
        .nest("/recipes", recipe_routes())
        .nest("/ratings", rating_routes())
        .nest("/users", user_routes())
        .nest("/myingredients", pantry_routes())
}

fn ingredient_routes() -> OpenApiRouter<AppState> {
    use handlers::ingredient::*;

    OpenApiRouter::new()
        .routes(routes!(list_ingredients, create_ingredient))
        .routes(routes!(get_ingredient, delete_ingredient))
}

fn recipe_routes() -> OpenApiRouter<AppState> {
    use handlers::rating::*;
    use handlers::recipe::*;
    use handlers::recommendation::*;

    // Static segments (`user`, `ratings`, `recommendations`) take priority over `{id}`.
    OpenApiRouter::new()
        .routes(routes!(list_recipes, create_recipe))
        .routes(routes!(get_recipe, update_recipe, delete_recipe))
        .routes(routes!(list_recipes_by_owner))
        .routes(routes!(
            get_recipe_ingredients,
            add_recipe_ingredient,
            update_recipe_ingredients
        ))
        .routes(routes!(add_recipe_ingredients))
        .routes(routes!(get_recipe_rating))
        .routes(routes!(delete_recipe_ratings))
        .routes(routes!(update_rating))
        .routes(routes!(recommend))
}

fn rating_routes() -> OpenApiRouter<AppState> {
    use handlers::rating::*;

    OpenApiRouter::new()
        .routes(routes!(get_user_rating))
        .routes(routes!(add_rating))
}

fn user_routes() -> OpenApiRouter<AppState> {
    use handlers::user::*;

    OpenApiRouter::new()
        .routes(routes!(list_users, create_user))
        .routes(routes!(get_user, update_user, delete_user))
}

fn pantry_routes() -> OpenApiRouter<AppState> {
    use handlers::pantry::*;

    OpenApiRouter::new()
        .routes(routes!(list_pantry, add_pantry_entry, update_pantry))
        .routes(routes!(add_pantry_entries))
        .routes(routes!(delete_pantry_entry))
}
