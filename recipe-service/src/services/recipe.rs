//! Recipe generation: prompt, provider call, and failure mapping.

use crate::models::RecipeRequest;
use crate::services::metrics;
use crate::services::prompt::render_recipe_prompt;
use crate::services::providers::{GenerationParams, ProviderError, TextProvider};
use service_core::error::AppError;
use std::sync::Arc;
use std::time::Instant;

pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate recipe. Please try again.";
pub const CONTENT_BLOCKED_MESSAGE: &str =
    "The request was blocked by the content safety filter. Please try different ingredients.";

/// Turns validated requests into recipes using a [`TextProvider`].
#[derive(Clone)]
pub struct RecipeGenerator {
    provider: Arc<dyn TextProvider>,
    params: GenerationParams,
}

impl RecipeGenerator {
    pub fn new(provider: Arc<dyn TextProvider>, params: GenerationParams) -> Self {
        Self { provider, params }
    }

    pub fn provider(&self) -> &Arc<dyn TextProvider> {
        &self.provider
    }

    /// Generate a recipe, returning the trimmed text.
    pub async fn generate(&self, request: &RecipeRequest) -> Result<String, AppError> {
        let prompt = render_recipe_prompt(&request.ingredients);
        let model = self.provider.model().to_string();

        let start = Instant::now();
        let result = self.provider.generate(&prompt, &self.params).await;
        metrics::record_provider_latency(&model, start.elapsed());

        match result {
            Ok(response) => {
                let recipe = response
                    .text
                    .as_deref()
                    .map(str::trim)
                    .filter(|text| !text.is_empty());

                match recipe {
                    Some(recipe) => {
                        tracing::info!(
                            model = %model,
                            input_tokens = response.input_tokens,
                            output_tokens = response.output_tokens,
                            finish_reason = response.finish_reason.as_str(),
                            "Recipe generated"
                        );
                        metrics::record_generation("success");
                        Ok(recipe.to_string())
                    }
                    None => {
                        tracing::warn!(
                            model = %model,
                            finish_reason = response.finish_reason.as_str(),
                            "Provider returned no recipe text"
                        );
                        metrics::record_generation("empty");
                        Err(AppError::GenerationFailed(
                            GENERATION_FAILED_MESSAGE.to_string(),
                        ))
                    }
                }
            }
            Err(ProviderError::ContentFiltered { reason }) => {
                tracing::warn!(
                    model = %model,
                    reason = reason.as_deref().unwrap_or("unspecified"),
                    "Prompt blocked by content policy"
                );
                metrics::record_generation("blocked");
                Err(AppError::ContentBlocked(CONTENT_BLOCKED_MESSAGE.to_string()))
            }
            Err(err) => {
                metrics::record_generation("error");
                Err(AppError::InternalError(
                    anyhow::Error::new(err)
                        .context(format!("Text generation with model {} failed", model)),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::mock::{MockOutcome, MockTextProvider};
    use axum::http::StatusCode;

    fn request(ingredients: &str) -> RecipeRequest {
        RecipeRequest {
            ingredients: ingredients.to_string(),
        }
    }

    fn generator(outcome: MockOutcome) -> (RecipeGenerator, Arc<MockTextProvider>) {
        let provider = Arc::new(MockTextProvider::new(outcome));
        (
            RecipeGenerator::new(provider.clone(), GenerationParams::default()),
            provider,
        )
    }

    #[tokio::test]
    async fn trims_generated_text() {
        let (generator, _) = generator(MockOutcome::Text("\n  Chicken Soup...  \n".into()));
        let recipe = generator.generate(&request("chicken, carrots")).await.unwrap();
        assert_eq!(recipe, "Chicken Soup...");
    }

    #[tokio::test]
    async fn sends_rendered_prompt_to_provider() {
        let (generator, provider) = generator(MockOutcome::Echo);
        generator.generate(&request("leeks, potatoes")).await.unwrap();

        let prompts = provider.prompts();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0], render_recipe_prompt("leeks, potatoes"));
    }

    #[tokio::test]
    async fn empty_text_is_a_generation_failure() {
        for outcome in [MockOutcome::Text("   ".into()), MockOutcome::NoText] {
            let (generator, _) = generator(outcome);
            let err = generator.generate(&request("eggs, ham")).await.unwrap_err();
            assert!(matches!(err, AppError::GenerationFailed(_)));
            assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[tokio::test]
    async fn content_filter_maps_to_blocked() {
        let (generator, _) = generator(MockOutcome::ContentFiltered);
        let err = generator.generate(&request("eggs, ham")).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.client_message(), CONTENT_BLOCKED_MESSAGE);
    }

    #[tokio::test]
    async fn other_failures_are_internal_and_not_exposed() {
        let (generator, _) = generator(MockOutcome::Failure("quota exhausted for key".into()));
        let err = generator.generate(&request("eggs, ham")).await.unwrap_err();
        assert!(matches!(err, AppError::InternalError(_)));
        assert!(!err.client_message().contains("quota"));
        assert!(format!("{:?}", err).contains("quota exhausted"));
    }
}
