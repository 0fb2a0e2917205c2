pub mod ingredient;
pub mod rating;
pub mod recipe;
pub mod recipe_ingredient;
pub mod user_ingredient;
pub mod user_profile;
