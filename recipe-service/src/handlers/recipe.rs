use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;

use crate::models::recipe::NO_DATA_MESSAGE;
use crate::models::{RecipeRequest, RecipeResponse};
use crate::services::metrics;
use crate::startup::AppState;

pub const BODY_TOO_LARGE_MESSAGE: &str = "Request body is too large";

/// Generate a recipe from a list of ingredients.
///
/// POST /generate
///
/// The body is parsed by hand rather than through the `Json` extractor so
/// that every malformed input gets the same 400 payload.
pub async fn generate_recipe(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<RecipeResponse>, AppError> {
    let request = body
        .map_err(body_error)
        .and_then(|body| RecipeRequest::from_body(&body))
        .map_err(|e| {
            metrics::record_generation("invalid");
            e
        })?;

    tracing::info!(
        ingredients_len = request.ingredients.chars().count(),
        "Generating recipe"
    );

    let recipe = state.generator.generate(&request).await?;

    Ok(Json(RecipeResponse::success(recipe)))
}

fn body_error(rejection: BytesRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(BODY_TOO_LARGE_MESSAGE.to_string())
    } else {
        tracing::debug!(error = %rejection, "Failed to read request body");
        AppError::BadRequest(NO_DATA_MESSAGE.to_string())
    }
}
