use crate::error::AppError;

/// Ingredient names forwarded to the recommendation service.
pub fn validate_recommendation_request(ingredients: &[String]) -> Result<(), AppError> {
    if ingredients.is_empty() {
        return Err(AppError::Validation(
            "At least one ingredient is required".into(),
        ));
    }
    if ingredients.iter().any(|name| name.trim().is_empty()) {
        return Err(AppError::Validation(
            "Ingredient names must not be blank".into(),
        ));
    }
    Ok(())
}
