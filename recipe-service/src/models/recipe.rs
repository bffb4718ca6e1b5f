use serde::Serialize;
use serde_json::Value;
use service_core::error::{AppError, ResponseStatus};
use validator::Validate;

pub const NO_DATA_MESSAGE: &str = "No data provided";
pub const INVALID_INGREDIENTS_MESSAGE: &str = "Invalid or missing ingredients";
pub const TOO_FEW_INGREDIENTS_MESSAGE: &str = "Please provide more ingredients";

/// A validated recipe request. `ingredients` is already trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct RecipeRequest {
    #[validate(length(min = 3, message = "Please provide more ingredients"))]
    pub ingredients: String,
}

impl RecipeRequest {
    /// Parse and validate a raw request body.
    ///
    /// Checks run in order and the first failure wins: the body must be a
    /// JSON object, `ingredients` must be a string, and the trimmed string
    /// must be at least three characters long.
    pub fn from_body(body: &[u8]) -> Result<Self, AppError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|_| AppError::BadRequest(NO_DATA_MESSAGE.to_string()))?;

        let object = value
            .as_object()
            .ok_or_else(|| AppError::BadRequest(NO_DATA_MESSAGE.to_string()))?;

        let ingredients = object
            .get("ingredients")
            .and_then(Value::as_str)
            .ok_or_else(|| AppError::BadRequest(INVALID_INGREDIENTS_MESSAGE.to_string()))?;

        let request = RecipeRequest {
            ingredients: ingredients.trim().to_string(),
        };
        request.validate()?;

        Ok(request)
    }
}

/// Success body of `POST /generate`.
///
/// Failures are rendered by `AppError` as `{"status": "error", "error": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeResponse {
    pub status: ResponseStatus,
    pub recipe: String,
}

impl RecipeResponse {
    pub fn success(recipe: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Success,
            recipe: recipe.into(),
        }
    }
}
