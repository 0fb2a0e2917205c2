pub mod ingredient;
pub mod pantry;
pub mod rating;
pub mod recipe;
pub mod recommendation;
pub mod user;
