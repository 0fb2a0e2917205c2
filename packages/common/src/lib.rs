pub mod cooking_unit;

pub use cooking_unit::{CookingUnit, ParseUnitError};
