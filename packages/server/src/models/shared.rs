use common::CookingUnit;
use serde::Deserialize;

use crate::error::AppError;
use crate::services::IngredientLine;

/// Largest quantity with at most ten integer digits.
const MAX_QUANTITY: f64 = 9_999_999_999.99;

/// Ingredient reference by name inside an entry request.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct IngredientName {
    #[schema(example = "Carrot")]
    pub name: String,
}

/// An ingredient with an amount, as sent when attaching to a recipe or pantry.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct IngredientEntryRequest {
    pub ingredient: IngredientName,
    /// Non-negative, at most 10 integer and 2 fraction digits.
    #[schema(example = 2)]
    pub quantity: f64,
    /// Variant name, full name or abbreviation, case-insensitive.
    #[schema(value_type = String, example = "COUNT")]
    pub unit: CookingUnit,
}

impl IngredientEntryRequest {
    pub fn into_line(self) -> Result<IngredientLine, AppError> {
        let name = self.ingredient.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation(
                "Ingredient name must not be blank".into(),
            ));
        }
        validate_quantity(self.quantity)?;
        Ok(IngredientLine::new(name, self.quantity, self.unit))
    }
}

pub fn into_lines(entries: Vec<IngredientEntryRequest>) -> Result<Vec<IngredientLine>, AppError> {
    entries.into_iter().map(IngredientEntryRequest::into_line).collect()
}

/// Validate a quantity: non-negative, at most 10 integer digits and 2 fraction digits.
pub fn validate_quantity(quantity: f64) -> Result<(), AppError> {
    if !quantity.is_finite() || quantity < 0.0 {
        return Err(AppError::Validation(
            "Quantity must be a non-negative number".into(),
        ));
    }
    if quantity > MAX_QUANTITY {
        return Err(AppError::Validation(
            "Quantity must have at most 10 integer digits".into(),
        ));
    }
    let cents = quantity * 100.0;
    if (cents - cents.round()).abs() > 1e-6 {
        return Err(AppError::Validation(
            "Quantity must have at most 2 fraction digits".into(),
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), AppError> {
    if email.trim().is_empty() {
        return Err(AppError::Validation("Email must not be blank".into()));
    }
    Ok(())
}
